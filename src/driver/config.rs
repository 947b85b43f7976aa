//! Session configuration.

use crate::clock::ClockSetting;
use crate::error::ConfigError;
use crate::internal::constants::{MAX_BUFFER_WORDS, MIN_BUFFER_WORDS};

/// Configuration for one waveform session.
///
/// Built with the `with_*` methods:
/// ```ignore
/// let config = ClockGenConfig::new()
///     .with_total_words(1024)
///     .with_target_hz(1_000_000)
///     .with_one_shot(true);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockGenConfig {
    /// Total sample buffer length in 32-bit words (32..=4096)
    pub total_words: usize,
    /// Bit clock derivation
    pub clock: ClockSetting,
    /// Stop after one pass through the ring instead of looping
    pub one_shot: bool,
}

impl ClockGenConfig {
    /// Create a configuration with defaults: 1024 words, slowest clock,
    /// continuous output.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            total_words: 1024,
            clock: ClockSetting::Dividers { div1: 63, div2: 63 },
            one_shot: false,
        }
    }

    /// Set the total sample buffer length in 32-bit words.
    #[must_use]
    pub const fn with_total_words(mut self, total_words: usize) -> Self {
        self.total_words = total_words;
        self
    }

    /// Set the clock derivation.
    #[must_use]
    pub const fn with_clock(mut self, clock: ClockSetting) -> Self {
        self.clock = clock;
        self
    }

    /// Set an explicit divider pair.
    #[must_use]
    pub const fn with_dividers(mut self, div1: u8, div2: u8) -> Self {
        self.clock = ClockSetting::Dividers { div1, div2 };
        self
    }

    /// Set a target bit clock frequency; the closest divider pair is used.
    #[must_use]
    pub const fn with_target_hz(mut self, hz: u32) -> Self {
        self.clock = ClockSetting::TargetHz(hz);
        self
    }

    /// Enable or disable one-shot mode.
    #[must_use]
    pub const fn with_one_shot(mut self, one_shot: bool) -> Self {
        self.one_shot = one_shot;
        self
    }

    /// Validate the configuration against the driver's buffer capacity.
    pub(crate) const fn validate(&self, capacity: usize) -> Result<(), ConfigError> {
        if self.total_words < MIN_BUFFER_WORDS || self.total_words > MAX_BUFFER_WORDS {
            return Err(ConfigError::InvalidBufferSize);
        }
        if self.total_words > capacity {
            return Err(ConfigError::ExceedsCapacity);
        }
        Ok(())
    }
}

impl Default for ClockGenConfig {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
