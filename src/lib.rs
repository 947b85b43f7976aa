//! ESP8266 I2S Waveform Generator
//!
//! A `no_std`, `no_alloc` software-defined clock/waveform generator for the
//! ESP8266, built on the I2S transmitter and the SLC DMA engine.
//!
//! The I2S shifter is repurposed as a free-running bit pipe: a circular chain
//! of DMA descriptors replays a statically allocated sample buffer out of the
//! I2SO_DATA pad, so arbitrary bit patterns stream at up to the full bit
//! clock with zero CPU involvement after start-up.
//!
//! # Architecture
//!
//! 1. **Driver** ([`driver::clockgen`]): session lifecycle, buffer ownership,
//!    interrupt handling
//! 2. **Encoding** ([`pattern`], [`encoder`]): mark/space pattern tables and
//!    the pluggable buffer encoder
//! 3. **Clocking** ([`clock`]): divider search and register programming
//! 4. **HAL** ([`hal`]): pin routing, PLL clock gate, CPU interrupt plumbing
//!
//! # Output pins
//!
//! The transmitter is hard-wired to GPIO2 (word select), GPIO3 (data) and
//! GPIO15 (bit clock). The pads are claimed on `begin` and returned to GPIO
//! inputs on `end`.
//!
//! # Features
//!
//! - `defmt`: structured logging of lifecycle events and error formatting
//! - `critical-section`: ISR-safe [`sync::SharedClockGen`] wrapper
//!
//! # Example
//!
//! ```ignore
//! use esp8266_i2s_clockgen::{ClockGen, ClockGenConfig, ClockGenDefault, PatternRecord};
//!
//! // Static allocation; the DMA engine holds raw addresses into the buffer
//! static mut CLOCKGEN: ClockGenDefault = ClockGen::new();
//!
//! let drv = unsafe { &mut CLOCKGEN };
//!
//! drv.init(
//!     ClockGenConfig::new()
//!         .with_total_words(1024)
//!         .with_target_hz(1_000_000)
//!         .with_one_shot(false),
//! )?;
//!
//! // 3 bits high, 5 bits low, forever
//! drv.set_pattern_record(0, PatternRecord::new(3, 5, 0));
//! drv.begin()?;
//!
//! // ... later
//! drv.end();
//! ```
//!
//! # Memory Requirements
//!
//! The buffer capacity is a const generic; [`ClockGenLarge`] carries the
//! hardware-maximum 4096-word (16 KB) buffer plus 768 bytes of descriptors.

#![no_std]
#![deny(missing_docs)]
#![allow(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]
// Clippy lint levels live here; thresholds and config are in clippy.toml.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements
)]

#[cfg(test)]
extern crate std;

// =============================================================================
// Modules
// =============================================================================

pub mod clock;
pub mod driver;
pub mod encoder;
pub mod error;
pub mod hal;
pub mod pattern;

// Internal implementation details (pub(crate) only)
mod internal;

#[cfg(feature = "critical-section")]
#[cfg_attr(docsrs, doc(cfg(feature = "critical-section")))]
pub mod sync;

#[cfg(test)]
pub(crate) mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use clock::{ClockSetting, DividerPair};
pub use driver::{
    ClockGen, ClockGenConfig, ClockGenDefault, ClockGenLarge, ClockGenSmall, InterruptStatus,
    State,
};
pub use encoder::{BitEncoder, EncodeError, MarkSpaceEncoder};
pub use error::{ConfigError, Error, Result};
pub use pattern::{PatternRecord, PatternTable};

// =============================================================================
// Static allocation helpers
// =============================================================================

/// Declare a static ISR-safe clock generator.
///
/// Expands to a `static` [`sync::SharedClockGen`] with the given capacity in
/// 32-bit words (default 1024).
///
/// # Examples
///
/// ```ignore
/// esp8266_i2s_clockgen::clockgen_static_sync!(CLOCKGEN);
/// esp8266_i2s_clockgen::clockgen_static_sync!(BIG_CLOCKGEN, 4096);
/// ```
#[cfg(feature = "critical-section")]
#[macro_export]
macro_rules! clockgen_static_sync {
    ($name:ident) => {
        $crate::clockgen_static_sync!($name, 1024);
    };
    ($name:ident, $capacity:expr) => {
        static $name: $crate::sync::SharedClockGen<$capacity> =
            $crate::sync::SharedClockGen::new();
    };
}
