//! IO_MUX routing for the I2S output pads.
//!
//! The ESP8266 I2S transmitter is hard-wired to three pads:
//!
//! | GPIO | Pad    | Signal              |
//! |------|--------|---------------------|
//! | 2    | GPIO2  | I2SO_WS (word sel)  |
//! | 3    | U0RXD  | I2SO_DATA           |
//! | 15   | MTDO   | I2SO_BCK (bit clk)  |
//!
//! All three select the I2S signal as pad function 1. Releasing a pad
//! restores its GPIO function and drops the output driver.

use crate::internal::register::{GPIO_BASE, IO_MUX_BASE, modify_reg, set_bits};

// IO_MUX pad register offsets (eagle_soc.h names)
const IO_MUX_GPIO2_OFFSET: usize = 0x38;
const IO_MUX_U0RXD_OFFSET: usize = 0x14;
const IO_MUX_MTDO_OFFSET: usize = 0x3C;

// Pad function select field: low two bits at 4..=5, third bit at 8
const FUNC_MASK_SHIFTED: u32 = 0x13 << 4;

// I2S output is function 1 on every pad it uses
const FUNC_I2S: u32 = 1;
// GPIO function per pad
const FUNC_GPIO2: u32 = 0;
const FUNC_GPIO3: u32 = 3;
const FUNC_GPIO15: u32 = 3;

// GPIO output enable, write-1-to-clear
const GPIO_ENABLE_W1TC_OFFSET: usize = 0x14;

const WS_GPIO: u32 = 2;
const DATA_GPIO: u32 = 3;
const BCK_GPIO: u32 = 15;

/// Encode a pad function value into its scattered register bits.
const fn func_bits(func: u32) -> u32 {
    (((func & 0x4) << 2) | (func & 0x3)) << 4
}

fn select_function(offset: usize, func: u32) {
    // SAFETY: offset is one of the three IO_MUX pad registers above
    unsafe {
        modify_reg(IO_MUX_BASE + offset, |v| {
            (v & !FUNC_MASK_SHIFTED) | func_bits(func)
        });
    }
}

/// Route all three pads to the I2S transmitter.
pub(crate) fn claim() {
    select_function(IO_MUX_GPIO2_OFFSET, FUNC_I2S);
    select_function(IO_MUX_U0RXD_OFFSET, FUNC_I2S);
    select_function(IO_MUX_MTDO_OFFSET, FUNC_I2S);
}

/// Return all three pads to GPIO inputs.
pub(crate) fn release() {
    select_function(IO_MUX_GPIO2_OFFSET, FUNC_GPIO2);
    select_function(IO_MUX_U0RXD_OFFSET, FUNC_GPIO3);
    select_function(IO_MUX_MTDO_OFFSET, FUNC_GPIO15);
    // SAFETY: GPIO_ENABLE_W1TC only clears output-enable bits
    unsafe {
        set_bits(
            GPIO_BASE + GPIO_ENABLE_W1TC_OFFSET,
            (1 << WS_GPIO) | (1 << DATA_GPIO) | (1 << BCK_GPIO),
        );
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::register::read_reg;

    #[test]
    fn func_bits_scatter() {
        assert_eq!(func_bits(0), 0);
        assert_eq!(func_bits(1), 1 << 4);
        assert_eq!(func_bits(3), 0x3 << 4);
        assert_eq!(func_bits(4), 1 << 8);
    }

    #[test]
    fn claim_selects_function_one_on_all_pads() {
        crate::testing::fake_regs::reset();
        claim();
        for offset in [IO_MUX_GPIO2_OFFSET, IO_MUX_U0RXD_OFFSET, IO_MUX_MTDO_OFFSET] {
            let v = unsafe { read_reg(IO_MUX_BASE + offset) };
            assert_eq!(v & FUNC_MASK_SHIFTED, func_bits(FUNC_I2S), "offset {offset:#x}");
        }
    }

    #[test]
    fn release_restores_gpio_functions() {
        crate::testing::fake_regs::reset();
        claim();
        release();

        let gpio2 = unsafe { read_reg(IO_MUX_BASE + IO_MUX_GPIO2_OFFSET) };
        assert_eq!(gpio2 & FUNC_MASK_SHIFTED, func_bits(FUNC_GPIO2));
        let u0rxd = unsafe { read_reg(IO_MUX_BASE + IO_MUX_U0RXD_OFFSET) };
        assert_eq!(u0rxd & FUNC_MASK_SHIFTED, func_bits(FUNC_GPIO3));

        let w1tc = unsafe { read_reg(GPIO_BASE + GPIO_ENABLE_W1TC_OFFSET) };
        assert_eq!(w1tc, (1 << 2) | (1 << 3) | (1 << 15));
    }
}
