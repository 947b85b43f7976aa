//! Decoded SLC interrupt status.

use crate::internal::register::slc;

/// Decoded view of the SLC interrupt status register.
///
/// Only the RX EOF flag drives behavior (one-shot termination); the rest are
/// decoded for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptStatus {
    /// TX link finished a descriptor
    pub tx_done: bool,
    /// TX link hit an EOF descriptor
    pub tx_eof: bool,
    /// RX link finished a descriptor
    pub rx_done: bool,
    /// RX link hit the EOF descriptor (one full ring pass)
    pub rx_eof: bool,
    /// TX link descriptor error
    pub tx_dscr_err: bool,
    /// RX link descriptor error
    pub rx_dscr_err: bool,
}

impl InterruptStatus {
    /// Decode a raw interrupt status register value.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self {
            tx_done: raw & slc::INT_TX_DONE != 0,
            tx_eof: raw & slc::INT_TX_EOF != 0,
            rx_done: raw & slc::INT_RX_DONE != 0,
            rx_eof: raw & slc::INT_RX_EOF != 0,
            tx_dscr_err: raw & slc::INT_TX_DSCR_ERR != 0,
            rx_dscr_err: raw & slc::INT_RX_DSCR_ERR != 0,
        }
    }

    /// Re-encode into the raw register layout.
    #[must_use]
    pub const fn to_raw(&self) -> u32 {
        let mut raw = 0;
        if self.tx_done {
            raw |= slc::INT_TX_DONE;
        }
        if self.tx_eof {
            raw |= slc::INT_TX_EOF;
        }
        if self.rx_done {
            raw |= slc::INT_RX_DONE;
        }
        if self.rx_eof {
            raw |= slc::INT_RX_EOF;
        }
        if self.tx_dscr_err {
            raw |= slc::INT_TX_DSCR_ERR;
        }
        if self.rx_dscr_err {
            raw |= slc::INT_RX_DSCR_ERR;
        }
        raw
    }

    /// Whether either link reported a descriptor error.
    #[inline(always)]
    #[must_use]
    pub const fn has_error(&self) -> bool {
        self.tx_dscr_err || self.rx_dscr_err
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_decodes_rx_eof() {
        let status = InterruptStatus::from_raw(slc::INT_RX_EOF);
        assert!(status.rx_eof);
        assert!(!status.rx_done);
        assert!(!status.has_error());
    }

    #[test]
    fn round_trip_preserves_known_bits() {
        let raw = slc::INT_RX_EOF | slc::INT_TX_DONE | slc::INT_RX_DSCR_ERR;
        let status = InterruptStatus::from_raw(raw);
        assert_eq!(status.to_raw(), raw);
        assert!(status.has_error());
    }

    #[test]
    fn unknown_bits_are_dropped() {
        let status = InterruptStatus::from_raw(0xFFFF_FFFF);
        let known = slc::INT_TX_DONE
            | slc::INT_TX_EOF
            | slc::INT_RX_DONE
            | slc::INT_RX_EOF
            | slc::INT_TX_DSCR_ERR
            | slc::INT_RX_DSCR_ERR;
        assert_eq!(status.to_raw(), known);
    }
}
