//! I2S peripheral registers (base `0x6000_0E00`).
//!
//! Register names follow the ESP8266 NONOS SDK `i2s_reg.h`. Only the
//! transmitter side is driven; the receiver fields exist because the shared
//! configuration register carries both.

// Full register map; not every field is driven.
#![allow(dead_code)]

use super::{I2S_BASE, reg_bit_ops, reg_ro, reg_rw};

// Register offsets from I2S_BASE
/// I2SCONF - configuration (resets, start bits, format, clock dividers)
pub const CONF_OFFSET: usize = 0x08;
/// I2SINT_RAW
pub const INT_RAW_OFFSET: usize = 0x0C;
/// I2SINT_ST
pub const INT_ST_OFFSET: usize = 0x10;
/// I2SINT_ENA
pub const INT_ENA_OFFSET: usize = 0x14;
/// I2SINT_CLR
pub const INT_CLR_OFFSET: usize = 0x18;
/// I2S_FIFO_CONF
pub const FIFO_CONF_OFFSET: usize = 0x20;
/// I2SCONF_CHAN
pub const CONF_CHAN_OFFSET: usize = 0x2C;

// I2SCONF bits
/// Hold the transmitter in reset
pub const CONF_TX_RESET: u32 = 1 << 0;
/// Hold the receiver in reset
pub const CONF_RX_RESET: u32 = 1 << 1;
/// Reset the transmit FIFO
pub const CONF_TX_FIFO_RESET: u32 = 1 << 2;
/// Reset the receive FIFO
pub const CONF_RX_FIFO_RESET: u32 = 1 << 3;
/// All four reset bits (full module reset)
pub const CONF_RESET_MASK: u32 =
    CONF_TX_RESET | CONF_RX_RESET | CONF_TX_FIFO_RESET | CONF_RX_FIFO_RESET;
/// Start transmission
pub const CONF_TX_START: u32 = 1 << 4;
/// Start reception
pub const CONF_RX_START: u32 = 1 << 5;
/// Transmitter slave mode
pub const CONF_TX_SLAVE_MOD: u32 = 1 << 6;
/// Receiver slave mode
pub const CONF_RX_SLAVE_MOD: u32 = 1 << 7;
/// MSB placed on the right channel
pub const CONF_MSB_RIGHT: u32 = 1 << 8;
/// Right channel transmitted/received first
pub const CONF_RIGHT_FIRST: u32 = 1 << 9;
/// One-bit delay from WS to MSB on transmit (Philips I2S framing)
pub const CONF_TX_MSB_SHIFT: u32 = 1 << 10;
/// One-bit delay from WS to MSB on receive
pub const CONF_RX_MSB_SHIFT: u32 = 1 << 11;
/// Bits-per-channel modifier field mask
pub const CONF_BITS_MOD_MASK: u32 = 0xF;
/// Bits-per-channel modifier field shift
pub const CONF_BITS_MOD_SHIFT: u32 = 12;
/// Secondary (CLKM) clock divider field mask
pub const CONF_CLKM_DIV_MASK: u32 = 0x3F;
/// Secondary (CLKM) clock divider field shift
pub const CONF_CLKM_DIV_SHIFT: u32 = 16;
/// Primary (BCK) clock divider field mask
pub const CONF_BCK_DIV_MASK: u32 = 0x3F;
/// Primary (BCK) clock divider field shift
pub const CONF_BCK_DIV_SHIFT: u32 = 22;

// I2S_FIFO_CONF bits
/// DMA descriptor mode enable
pub const FIFO_CONF_DSCR_EN: u32 = 1 << 12;
/// Transmit FIFO mode field mask
pub const FIFO_CONF_TX_FIFO_MOD_MASK: u32 = 0x7;
/// Transmit FIFO mode field shift
pub const FIFO_CONF_TX_FIFO_MOD_SHIFT: u32 = 13;
/// Receive FIFO mode field mask
pub const FIFO_CONF_RX_FIFO_MOD_MASK: u32 = 0x7;
/// Receive FIFO mode field shift
pub const FIFO_CONF_RX_FIFO_MOD_SHIFT: u32 = 16;

// I2SCONF_CHAN bits
/// Transmit channel mode field mask
pub const CONF_CHAN_TX_MASK: u32 = 0x3;
/// Transmit channel mode field shift
pub const CONF_CHAN_TX_SHIFT: u32 = 0;
/// Receive channel mode field mask
pub const CONF_CHAN_RX_MASK: u32 = 0x3;
/// Receive channel mode field shift
pub const CONF_CHAN_RX_SHIFT: u32 = 3;

/// All six I2S interrupt bits
pub const INT_ALL: u32 = 0x3F;

/// I2S register accessors
pub struct I2sRegs;

impl I2sRegs {
    reg_rw!(conf, set_conf, I2S_BASE, CONF_OFFSET, "I2S configuration register");
    reg_ro!(int_status, I2S_BASE, INT_ST_OFFSET, "I2S interrupt status register");
    reg_rw!(int_ena, set_int_ena, I2S_BASE, INT_ENA_OFFSET, "I2S interrupt enable register");
    reg_rw!(int_clr, set_int_clr, I2S_BASE, INT_CLR_OFFSET, "I2S interrupt clear register");
    reg_rw!(fifo_conf, set_fifo_conf, I2S_BASE, FIFO_CONF_OFFSET, "I2S FIFO configuration register");
    reg_rw!(conf_chan, set_conf_chan, I2S_BASE, CONF_CHAN_OFFSET, "I2S channel configuration register");

    /// Pulse the four reset bits (clear, set, clear), resetting the module.
    pub fn reset_module() {
        let conf = Self::conf();
        Self::set_conf(conf & !CONF_RESET_MASK);
        Self::set_conf(conf | CONF_RESET_MASK);
        Self::set_conf(conf & !CONF_RESET_MASK);
    }

    reg_bit_ops!(
        start_tx,
        stop_tx,
        I2S_BASE,
        CONF_OFFSET,
        CONF_TX_START,
        "the transmitter start bit",
        "Set",
        "Clear"
    );

    /// Clear all pending I2S interrupts.
    #[inline(always)]
    pub fn clear_all_interrupts() {
        Self::set_int_clr(INT_ALL);
    }

    /// Mask all I2S interrupt sources.
    #[inline(always)]
    pub fn disable_all_interrupts() {
        Self::set_int_ena(0);
    }

    /// Put the FIFO into DMA descriptor mode with FIFO_MOD 0 on both sides.
    pub fn enable_dma_mode() {
        let mut fc = Self::fifo_conf();
        fc &= !(FIFO_CONF_DSCR_EN
            | (FIFO_CONF_TX_FIFO_MOD_MASK << FIFO_CONF_TX_FIFO_MOD_SHIFT)
            | (FIFO_CONF_RX_FIFO_MOD_MASK << FIFO_CONF_RX_FIFO_MOD_SHIFT));
        Self::set_fifo_conf(fc);
        Self::set_fifo_conf(fc | FIFO_CONF_DSCR_EN);
    }

    /// Set CHAN_MOD 0 (dual channel) on both directions.
    pub fn reset_channel_mode() {
        unsafe {
            super::clear_bits(
                I2S_BASE + CONF_CHAN_OFFSET,
                (CONF_CHAN_TX_MASK << CONF_CHAN_TX_SHIFT)
                    | (CONF_CHAN_RX_MASK << CONF_CHAN_RX_SHIFT),
            );
        }
    }
}
