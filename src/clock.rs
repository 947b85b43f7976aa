//! Bit clock configuration.
//!
//! The I2S bit clock is derived from the 160 MHz peripheral clock through two
//! cascaded 6-bit dividers. Callers either supply both dividers directly or
//! give a target frequency and let the driver search for the closest pair.

use crate::internal::constants::{DIVIDER_FIELD_MASK, I2S_BASE_FREQ_HZ, MAX_DIVIDER};
use crate::internal::register::i2s::{self, I2sRegs};

/// How to derive the I2S bit clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockSetting {
    /// Explicit divider pair, bit clock = 160 MHz / div1 / div2
    Dividers {
        /// First divider (1..=63)
        div1: u8,
        /// Second divider (1..=63)
        div2: u8,
    },
    /// Target frequency in Hz; the closest reachable divider pair is chosen
    TargetHz(u32),
}

impl Default for ClockSetting {
    fn default() -> Self {
        // 160 MHz / 63 / 63 - the slowest clock the dividers can produce
        Self::Dividers { div1: 63, div2: 63 }
    }
}

/// A resolved divider pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DividerPair {
    /// First divider stage
    pub div1: u8,
    /// Second divider stage
    pub div2: u8,
}

impl DividerPair {
    /// Bit clock this pair produces, in Hz.
    #[must_use]
    pub fn frequency_hz(&self) -> f32 {
        I2S_BASE_FREQ_HZ as f32 / f32::from(self.div1) / f32::from(self.div2)
    }
}

/// Resolve a clock setting to a concrete divider pair.
///
/// For [`ClockSetting::TargetHz`] this scans every divider combination and
/// keeps the pair whose output frequency is closest to the target. Ties keep
/// the earlier candidate, so the higher `div1` wins. The scan is a few
/// thousand float operations; callers run it at configuration time, never in
/// the interrupt path.
#[must_use]
pub fn resolve(setting: ClockSetting) -> DividerPair {
    match setting {
        ClockSetting::Dividers { div1, div2 } => DividerPair {
            div1: div1 & DIVIDER_FIELD_MASK,
            div2: div2 & DIVIDER_FIELD_MASK,
        },
        ClockSetting::TargetHz(target) => {
            let target = target as f32;
            let mut best = DividerPair { div1: 1, div2: 1 };
            let mut delta_best = I2S_BASE_FREQ_HZ as f32;
            let mut i = MAX_DIVIDER;
            while i > 0 {
                let mut j = i;
                while j > 0 {
                    let freq = I2S_BASE_FREQ_HZ as f32 / f32::from(i) / f32::from(j);
                    let delta = libm::fabsf(freq - target);
                    if delta < delta_best {
                        delta_best = delta;
                        best = DividerPair { div1: i, div2: j };
                    }
                    j -= 1;
                }
                i -= 1;
            }
            best
        }
    }
}

/// Program a divider pair into the I2S configuration register.
///
/// The transmitter is held in reset while the clock fields change, then
/// released. The same write configures the frame format: MSB first, right
/// channel first, one-bit WS delay on both directions, 16 bits per channel,
/// master mode.
pub(crate) fn apply(pair: DividerPair) {
    let mut conf = I2sRegs::conf();
    conf |= i2s::CONF_TX_RESET;
    I2sRegs::set_conf(conf);

    conf &= !(i2s::CONF_TX_SLAVE_MOD
        | i2s::CONF_RX_SLAVE_MOD
        | (i2s::CONF_BITS_MOD_MASK << i2s::CONF_BITS_MOD_SHIFT)
        | (i2s::CONF_BCK_DIV_MASK << i2s::CONF_BCK_DIV_SHIFT)
        | (i2s::CONF_CLKM_DIV_MASK << i2s::CONF_CLKM_DIV_SHIFT));
    conf |= i2s::CONF_RIGHT_FIRST
        | i2s::CONF_MSB_RIGHT
        | i2s::CONF_RX_MSB_SHIFT
        | i2s::CONF_TX_MSB_SHIFT
        | (u32::from(pair.div1) << i2s::CONF_BCK_DIV_SHIFT)
        | (u32::from(pair.div2) << i2s::CONF_CLKM_DIV_SHIFT);
    I2sRegs::set_conf(conf);

    conf &= !i2s::CONF_TX_RESET;
    I2sRegs::set_conf(conf);
}

/// Read the bit clock back from the hardware divider fields.
///
/// This is the authoritative value; it reflects the 6-bit truncation the
/// register imposes rather than whatever the caller asked for.
#[must_use]
pub(crate) fn read_back() -> f32 {
    let conf = I2sRegs::conf();
    let div1 = (conf >> i2s::CONF_BCK_DIV_SHIFT) & i2s::CONF_BCK_DIV_MASK;
    let div2 = (conf >> i2s::CONF_CLKM_DIV_SHIFT) & i2s::CONF_CLKM_DIV_MASK;
    I2S_BASE_FREQ_HZ as f32 / div1 as f32 / div2 as f32
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_dividers_pass_through_masked() {
        let pair = resolve(ClockSetting::Dividers { div1: 10, div2: 4 });
        assert_eq!(pair, DividerPair { div1: 10, div2: 4 });

        // Values above 63 are truncated to the register field width
        let pair = resolve(ClockSetting::Dividers { div1: 64, div2: 65 });
        assert_eq!(pair, DividerPair { div1: 0, div2: 1 });
    }

    #[test]
    fn search_finds_exact_divider_products() {
        // 160 MHz / 40 = 4 MHz is reachable exactly (e.g. 40*1, 20*2, 10*4)
        let pair = resolve(ClockSetting::TargetHz(4_000_000));
        let product = u32::from(pair.div1) * u32::from(pair.div2);
        assert_eq!(product, 40);
        assert_eq!(pair.frequency_hz(), 4_000_000.0);
    }

    #[test]
    fn search_prefers_higher_div1_on_ties() {
        // The scan starts at div1=63 and only replaces on strictly better
        // deltas, so among equal products the largest div1 is kept
        let pair = resolve(ClockSetting::TargetHz(4_000_000));
        assert_eq!(pair.div1, 40);
        assert_eq!(pair.div2, 1);
    }

    #[test]
    fn search_is_optimal_for_odd_targets() {
        let target = 1_234_567u32;
        let pair = resolve(ClockSetting::TargetHz(target));

        let best_delta = libm::fabsf(pair.frequency_hz() - target as f32);
        for i in 1..=63u8 {
            for j in 1..=i {
                let freq = I2S_BASE_FREQ_HZ as f32 / f32::from(i) / f32::from(j);
                let delta = libm::fabsf(freq - target as f32);
                assert!(delta >= best_delta, "({i},{j}) beats ({},{})", pair.div1, pair.div2);
            }
        }
    }

    #[test]
    fn slowest_clock_is_default() {
        let pair = resolve(ClockSetting::default());
        assert_eq!(pair, DividerPair { div1: 63, div2: 63 });
        let hz = pair.frequency_hz();
        assert!(hz > 40_000.0 && hz < 41_000.0);
    }

    #[test]
    fn apply_then_read_back_round_trips() {
        crate::testing::fake_regs::reset();
        apply(DividerPair { div1: 25, div2: 3 });

        let expect = I2S_BASE_FREQ_HZ as f32 / 25.0 / 3.0;
        assert_eq!(read_back(), expect);

        // Transmitter reset must be released afterwards
        assert_eq!(I2sRegs::conf() & i2s::CONF_TX_RESET, 0);
    }
}
