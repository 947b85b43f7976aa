//! Hardware abstraction layer
//!
//! Small wrappers around the non-I2S pieces of the chip the driver needs:
//!
//! - [`pinmux`]: IO_MUX routing for the three I2S output pads
//! - [`clock`]: audio PLL clock gate for the I2S module
//! - [`interrupt`]: CPU-level SLC interrupt attach/mask/unmask
//!
//! On non-Xtensa targets (host tests) the ROM calls become no-ops; register
//! writes still go through the fake register store.

pub mod clock;
pub mod interrupt;
pub mod pinmux;
