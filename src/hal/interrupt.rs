//! CPU-level SLC interrupt control.
//!
//! The SLC engine owns Xtensa interrupt line 1. Attachment and masking go
//! through the ROM's `ets_isr_*` helpers; on the host they are no-ops so
//! lifecycle code stays runnable in tests.

use core::ffi::c_void;

/// Xtensa interrupt number assigned to the SLC engine.
pub const SLC_INTERRUPT_NUM: u32 = 1;

/// Raw interrupt handler signature expected by the ROM.
pub type RawHandler = unsafe extern "C" fn(*mut c_void);

#[cfg(target_arch = "xtensa")]
unsafe extern "C" {
    fn ets_isr_attach(i: u32, handler: RawHandler, arg: *mut c_void);
    fn ets_isr_mask(mask: u32);
    fn ets_isr_unmask(mask: u32);
}

/// Attach `handler` to the SLC interrupt line.
///
/// # Safety
/// `handler` runs in interrupt context; `arg` must stay valid for as long as
/// the handler remains attached.
#[cfg(target_arch = "xtensa")]
pub unsafe fn attach(handler: RawHandler, arg: *mut c_void) {
    // SAFETY: caller upholds the handler/arg contract
    unsafe { ets_isr_attach(SLC_INTERRUPT_NUM, handler, arg) }
}

/// Unmask the SLC interrupt line.
#[cfg(target_arch = "xtensa")]
pub fn enable() {
    // SAFETY: masking operations carry no memory safety requirements
    unsafe { ets_isr_unmask(1 << SLC_INTERRUPT_NUM) }
}

/// Mask the SLC interrupt line.
#[cfg(target_arch = "xtensa")]
pub fn disable() {
    // SAFETY: masking operations carry no memory safety requirements
    unsafe { ets_isr_mask(1 << SLC_INTERRUPT_NUM) }
}

/// Host stand-in.
///
/// # Safety
/// No-op off-target; the signature matches the hardware version.
#[cfg(not(target_arch = "xtensa"))]
pub unsafe fn attach(_handler: RawHandler, _arg: *mut c_void) {}

/// Host stand-in; under test it records the unmasked state.
#[cfg(not(target_arch = "xtensa"))]
pub fn enable() {
    #[cfg(test)]
    crate::testing::isr_gate::set_enabled(true);
}

/// Host stand-in; under test it records the masked state.
#[cfg(not(target_arch = "xtensa"))]
pub fn disable() {
    #[cfg(test)]
    crate::testing::isr_gate::set_enabled(false);
}
