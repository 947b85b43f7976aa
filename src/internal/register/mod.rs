//! Memory-mapped register definitions for the ESP8266 I2S and SLC peripherals
//!
//! This module provides type-safe access to the peripheral registers.
//! All register access is volatile to ensure proper hardware interaction.
//! Under `cargo test` the volatile accessors are redirected to an in-process
//! register fake so lifecycle code can run on the host.

pub mod i2s;
pub mod slc;

/// I2S register block base address
pub const I2S_BASE: usize = 0x6000_0E00;

/// SLC (DMA) register block base address
pub const SLC_BASE: usize = 0x6000_0B00;

/// IO_MUX register block base address
pub const IO_MUX_BASE: usize = 0x6000_0800;

/// GPIO register block base address
pub const GPIO_BASE: usize = 0x6000_0300;

/// Read a 32-bit register at the given address
///
/// # Safety
/// The caller must ensure the address is valid and properly aligned.
#[cfg(not(test))]
#[inline(always)]
pub unsafe fn read_reg(addr: usize) -> u32 {
    unsafe { core::ptr::read_volatile(addr as *const u32) }
}

/// Write a 32-bit value to a register at the given address
///
/// # Safety
/// The caller must ensure the address is valid and properly aligned.
#[cfg(not(test))]
#[inline(always)]
pub unsafe fn write_reg(addr: usize, value: u32) {
    unsafe { core::ptr::write_volatile(addr as *mut u32, value) }
}

/// Read a register from the test fake (host builds only).
///
/// # Safety
/// Trivially safe; the signature matches the hardware accessor.
#[cfg(test)]
pub unsafe fn read_reg(addr: usize) -> u32 {
    crate::testing::fake_regs::read(addr)
}

/// Write a register to the test fake (host builds only).
///
/// # Safety
/// Trivially safe; the signature matches the hardware accessor.
#[cfg(test)]
pub unsafe fn write_reg(addr: usize, value: u32) {
    crate::testing::fake_regs::write(addr, value);
}

/// Modify a register using a read-modify-write operation
///
/// # Safety
/// The caller must ensure the address is valid and properly aligned.
#[inline(always)]
pub unsafe fn modify_reg<F>(addr: usize, f: F)
where
    F: FnOnce(u32) -> u32,
{
    // SAFETY: caller guarantees address validity
    let value = unsafe { read_reg(addr) };
    unsafe { write_reg(addr, f(value)) }
}

/// Set bits in a register (read-modify-write)
///
/// # Safety
/// The caller must ensure the address is valid and properly aligned.
#[inline(always)]
pub unsafe fn set_bits(addr: usize, bits: u32) {
    // SAFETY: caller guarantees address validity
    unsafe { modify_reg(addr, |v| v | bits) }
}

/// Clear bits in a register (read-modify-write)
///
/// # Safety
/// The caller must ensure the address is valid and properly aligned.
#[inline(always)]
pub unsafe fn clear_bits(addr: usize, bits: u32) {
    // SAFETY: caller guarantees address validity
    unsafe { modify_reg(addr, |v| v & !bits) }
}

// =============================================================================
// Register Access Macros
// =============================================================================

/// Generate read/write accessor methods for a register.
///
/// # Example
/// ```ignore
/// impl SlcRegs {
///     reg_rw!(int_ena, set_int_ena, SLC_BASE, SLC_INT_ENA_OFFSET,
///             "Interrupt Enable register");
/// }
/// ```
macro_rules! reg_rw {
    ($read_fn:ident, $write_fn:ident, $base:expr, $offset:expr, $doc:expr) => {
        #[doc = concat!("Read ", $doc)]
        #[inline(always)]
        pub fn $read_fn() -> u32 {
            unsafe { $crate::internal::register::read_reg($base + $offset) }
        }

        #[doc = concat!("Write ", $doc)]
        #[inline(always)]
        pub fn $write_fn(value: u32) {
            unsafe { $crate::internal::register::write_reg($base + $offset, value) }
        }
    };
}

/// Generate a read-only accessor method for a register.
macro_rules! reg_ro {
    ($read_fn:ident, $base:expr, $offset:expr, $doc:expr) => {
        #[doc = concat!("Read ", $doc)]
        #[inline(always)]
        pub fn $read_fn() -> u32 {
            unsafe { $crate::internal::register::read_reg($base + $offset) }
        }
    };
}

/// Generate set/clear bit operation methods for a register.
macro_rules! reg_bit_ops {
    ($set_fn:ident, $clear_fn:ident, $base:expr, $offset:expr, $bit:expr, $what:expr, $set_verb:expr, $clear_verb:expr) => {
        #[doc = concat!($set_verb, " ", $what)]
        #[inline(always)]
        pub fn $set_fn() {
            unsafe { $crate::internal::register::set_bits($base + $offset, $bit) }
        }

        #[doc = concat!($clear_verb, " ", $what)]
        #[inline(always)]
        pub fn $clear_fn() {
            unsafe { $crate::internal::register::clear_bits($base + $offset, $bit) }
        }
    };
}

// Export macros for use in submodules
pub(crate) use reg_bit_ops;
pub(crate) use reg_ro;
pub(crate) use reg_rw;
