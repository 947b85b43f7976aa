//! Waveform generator driver
//!
//! - [`clockgen`]: the main [`ClockGen`] driver
//! - [`config`]: session configuration builder
//! - [`state`]: lifecycle state machine
//! - [`interrupt`]: decoded SLC interrupt status

pub mod clockgen;
pub mod config;
pub mod interrupt;
pub mod state;

pub use clockgen::{ClockGen, ClockGenDefault, ClockGenLarge, ClockGenSmall};
pub use config::ClockGenConfig;
pub use interrupt::InterruptStatus;
pub use state::{Action, Event, State};
