//! SLC (sdio link controller) DMA registers (base `0x6000_0B00`).
//!
//! The SLC engine moves data from memory into the I2S transmit FIFO through
//! its RX link - "RX" is named from the SLC's perspective, which *receives*
//! from RAM. The TX link is unused for output but still needs a valid
//! descriptor address or the engine raises a descriptor error.

// Full register map; not every field is driven.
#![allow(dead_code)]

use super::{SLC_BASE, reg_ro, reg_rw};

// Register offsets from SLC_BASE
/// SLC_CONF0
pub const CONF0_OFFSET: usize = 0x00;
/// SLC_INT_RAW
pub const INT_RAW_OFFSET: usize = 0x04;
/// SLC_INT_STATUS
pub const INT_ST_OFFSET: usize = 0x08;
/// SLC_INT_ENA
pub const INT_ENA_OFFSET: usize = 0x0C;
/// SLC_INT_CLR
pub const INT_CLR_OFFSET: usize = 0x10;
/// SLC_RX_LINK
pub const RX_LINK_OFFSET: usize = 0x1C;
/// SLC_TX_LINK
pub const TX_LINK_OFFSET: usize = 0x20;
/// SLC_RX_DSCR_CONF
pub const RX_DSCR_CONF_OFFSET: usize = 0x54;

// SLC_CONF0 bits
/// Reset the TX link state machine
pub const CONF0_TXLINK_RST: u32 = 1 << 0;
/// Reset the RX link state machine
pub const CONF0_RXLINK_RST: u32 = 1 << 1;
/// DMA mode field mask
pub const CONF0_MODE_MASK: u32 = 0x3;
/// DMA mode field shift
pub const CONF0_MODE_SHIFT: u32 = 12;

// SLC_INT bits (raw/status/enable/clear share the layout)
/// TX link done
pub const INT_TX_DONE: u32 = 1 << 14;
/// TX link hit an EOF descriptor
pub const INT_TX_EOF: u32 = 1 << 15;
/// RX link done
pub const INT_RX_DONE: u32 = 1 << 16;
/// RX link hit an EOF descriptor (end of ring frame)
pub const INT_RX_EOF: u32 = 1 << 17;
/// TX link descriptor error
pub const INT_TX_DSCR_ERR: u32 = 1 << 19;
/// RX link descriptor error
pub const INT_RX_DSCR_ERR: u32 = 1 << 20;

// SLC_RX_LINK / SLC_TX_LINK bits
/// Descriptor address field mask
pub const LINK_ADDR_MASK: u32 = 0x000F_FFFF;
/// Stop the link
pub const LINK_STOP: u32 = 1 << 28;
/// Start the link at the programmed descriptor address
pub const LINK_START: u32 = 1 << 29;
/// Restart the link
pub const LINK_RESTART: u32 = 1 << 30;

// SLC_RX_DSCR_CONF bits
/// Do not overwrite the token field on descriptor writeback
pub const RX_DSCR_TOKEN_NO_REPLACE: u32 = 1 << 16;
/// Do not overwrite the length info on descriptor writeback
pub const RX_DSCR_INFOR_NO_REPLACE: u32 = 1 << 17;
/// RX fill mode
pub const RX_DSCR_FILL_MODE: u32 = 1 << 18;
/// RX EOF mode
pub const RX_DSCR_EOF_MODE: u32 = 1 << 19;
/// RX fill enable
pub const RX_DSCR_FILL_EN: u32 = 1 << 20;

/// SLC register accessors
pub struct SlcRegs;

impl SlcRegs {
    reg_rw!(conf0, set_conf0, SLC_BASE, CONF0_OFFSET, "SLC configuration register 0");
    reg_ro!(int_status, SLC_BASE, INT_ST_OFFSET, "SLC interrupt status register");
    reg_rw!(int_ena, set_int_ena, SLC_BASE, INT_ENA_OFFSET, "SLC interrupt enable register");
    reg_rw!(int_clr, set_int_clr, SLC_BASE, INT_CLR_OFFSET, "SLC interrupt clear register");
    reg_rw!(rx_link, set_rx_link, SLC_BASE, RX_LINK_OFFSET, "SLC RX link register");
    reg_rw!(tx_link, set_tx_link, SLC_BASE, TX_LINK_OFFSET, "SLC TX link register");
    reg_rw!(
        rx_dscr_conf,
        set_rx_dscr_conf,
        SLC_BASE,
        RX_DSCR_CONF_OFFSET,
        "SLC RX descriptor configuration register"
    );

    /// Pulse both link reset bits.
    pub fn reset_links() {
        unsafe {
            super::set_bits(SLC_BASE + CONF0_OFFSET, CONF0_RXLINK_RST | CONF0_TXLINK_RST);
            super::clear_bits(SLC_BASE + CONF0_OFFSET, CONF0_RXLINK_RST | CONF0_TXLINK_RST);
        }
    }

    /// Select DMA mode 1 in CONF0.
    pub fn set_dma_mode() {
        unsafe {
            super::clear_bits(SLC_BASE + CONF0_OFFSET, CONF0_MODE_MASK << CONF0_MODE_SHIFT);
            super::set_bits(SLC_BASE + CONF0_OFFSET, 1 << CONF0_MODE_SHIFT);
        }
    }

    /// Configure descriptor writeback: keep token/info, no fill modes.
    pub fn configure_rx_descriptors() {
        unsafe {
            super::set_bits(
                SLC_BASE + RX_DSCR_CONF_OFFSET,
                RX_DSCR_INFOR_NO_REPLACE | RX_DSCR_TOKEN_NO_REPLACE,
            );
            super::clear_bits(
                SLC_BASE + RX_DSCR_CONF_OFFSET,
                RX_DSCR_FILL_EN | RX_DSCR_EOF_MODE | RX_DSCR_FILL_MODE,
            );
        }
    }

    /// Clear every pending SLC interrupt.
    #[inline(always)]
    pub fn clear_all_interrupts() {
        Self::set_int_clr(0xFFFF_FFFF);
    }

    /// Mask all SLC interrupt sources.
    #[inline(always)]
    pub fn disable_all_interrupts() {
        Self::set_int_ena(0);
    }

    /// Enable only the RX EOF interrupt (end of ring frame).
    #[inline(always)]
    pub fn enable_rx_eof_interrupt() {
        Self::set_int_ena(INT_RX_EOF);
    }

    /// Program the RX link descriptor address.
    pub fn set_rx_link_addr(addr: u32) {
        unsafe {
            super::clear_bits(SLC_BASE + RX_LINK_OFFSET, LINK_ADDR_MASK);
            super::set_bits(SLC_BASE + RX_LINK_OFFSET, addr & LINK_ADDR_MASK);
        }
    }

    /// Program the TX link descriptor address.
    pub fn set_tx_link_addr(addr: u32) {
        unsafe {
            super::clear_bits(SLC_BASE + TX_LINK_OFFSET, LINK_ADDR_MASK);
            super::set_bits(SLC_BASE + TX_LINK_OFFSET, addr & LINK_ADDR_MASK);
        }
    }

    /// Clear the RX link descriptor address.
    #[inline(always)]
    pub fn clear_rx_link_addr() {
        unsafe { super::clear_bits(SLC_BASE + RX_LINK_OFFSET, LINK_ADDR_MASK) }
    }

    /// Clear the TX link descriptor address.
    #[inline(always)]
    pub fn clear_tx_link_addr() {
        unsafe { super::clear_bits(SLC_BASE + TX_LINK_OFFSET, LINK_ADDR_MASK) }
    }

    /// Start the RX link (begins draining the descriptor ring).
    #[inline(always)]
    pub fn start_rx_link() {
        unsafe { super::set_bits(SLC_BASE + RX_LINK_OFFSET, LINK_START) }
    }

    /// Start the TX link.
    #[inline(always)]
    pub fn start_tx_link() {
        unsafe { super::set_bits(SLC_BASE + TX_LINK_OFFSET, LINK_START) }
    }
}
