//! I2S module clock gate.
//!
//! The I2S bit clock is derived from the audio PLL, whose output is gated by
//! a bit in the BBPLL block. The block is only reachable through the ROM's
//! internal I2C helper.

// BBPLL internal-I2C block and the audio clock output enable field
#[cfg(target_arch = "xtensa")]
const I2C_BBPLL_BLOCK: u32 = 0x67;
#[cfg(target_arch = "xtensa")]
const I2C_BBPLL_HOSTID: u32 = 4;
#[cfg(target_arch = "xtensa")]
const I2C_BBPLL_EN_AUDIO_CLOCK_OUT: u32 = 4;
#[cfg(target_arch = "xtensa")]
const EN_AUDIO_CLOCK_OUT_MSB: u32 = 7;
#[cfg(target_arch = "xtensa")]
const EN_AUDIO_CLOCK_OUT_LSB: u32 = 7;

#[cfg(target_arch = "xtensa")]
#[allow(non_snake_case)]
unsafe extern "C" {
    fn rom_i2c_writeReg_Mask(block: u32, host_id: u32, reg_add: u32, msb: u32, lsb: u32, data: u32);
}

/// Enable the audio PLL clock output feeding the I2S module.
#[cfg(target_arch = "xtensa")]
pub(crate) fn enable_i2s_clock() {
    // SAFETY: ROM helper; arguments are the documented BBPLL field coordinates
    unsafe {
        rom_i2c_writeReg_Mask(
            I2C_BBPLL_BLOCK,
            I2C_BBPLL_HOSTID,
            I2C_BBPLL_EN_AUDIO_CLOCK_OUT,
            EN_AUDIO_CLOCK_OUT_MSB,
            EN_AUDIO_CLOCK_OUT_LSB,
            1,
        );
    }
}

/// Host stand-in; the ROM helper does not exist off-target.
#[cfg(not(target_arch = "xtensa"))]
pub(crate) fn enable_i2s_clock() {}
