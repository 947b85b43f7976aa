//! Synchronization and Concurrency Support
//!
//! ISR-safe wrappers for sharing a [`ClockGen`](crate::ClockGen) between
//! application code and the SLC interrupt handler:
//!
//! - **Primitives** (`primitives`): [`CriticalSectionCell`] - ISR-safe
//!   interior mutability
//! - **Shared Wrapper** (`shared`): [`SharedClockGen`] - critical-section
//!   protected driver, suitable for `static` allocation
//!
//! # Example
//!
//! ```ignore
//! use esp8266_i2s_clockgen::sync::SharedClockGen;
//! use esp8266_i2s_clockgen::{ClockGenConfig, clockgen_isr};
//!
//! static CLOCKGEN: SharedClockGen<1024> = SharedClockGen::new();
//! clockgen_isr!(slc_isr, CLOCKGEN);
//!
//! fn main() {
//!     CLOCKGEN.with(|drv| {
//!         drv.init(ClockGenConfig::new().with_one_shot(true)).unwrap();
//!         unsafe { CLOCKGEN.attach_isr(slc_isr) };
//!         drv.begin().unwrap();
//!     });
//! }
//! ```

mod primitives;

pub use primitives::CriticalSectionCell;

mod shared;

pub use shared::{
    SharedClockGen, SharedClockGenDefault, SharedClockGenLarge, SharedClockGenSmall,
};
