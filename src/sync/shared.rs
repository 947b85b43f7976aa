//! ISR-safe driver wrapper using critical sections.

use super::primitives::CriticalSectionCell;
use crate::driver::ClockGen;
use crate::hal;

/// ISR-safe [`ClockGen`] wrapper.
///
/// All access goes through `critical_section::with()`, disabling interrupts
/// for the duration of the closure, so the SLC interrupt handler and
/// application code can share one static driver.
///
/// # Example
///
/// ```ignore
/// static CLOCKGEN: SharedClockGen<1024> = SharedClockGen::new();
///
/// CLOCKGEN.with(|drv| {
///     drv.begin().ok();
/// });
/// ```
pub struct SharedClockGen<const CAPACITY: usize> {
    inner: CriticalSectionCell<ClockGen<CAPACITY>>,
}

impl<const CAPACITY: usize> SharedClockGen<CAPACITY> {
    /// Create a new shared driver (const, suitable for static initialization).
    pub const fn new() -> Self {
        Self {
            inner: CriticalSectionCell::new(ClockGen::new()),
        }
    }

    /// Execute a closure with exclusive access to the driver.
    ///
    /// Interrupts are disabled for the duration of the closure.
    #[inline]
    pub fn with<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut ClockGen<CAPACITY>) -> R,
    {
        self.inner.with(f)
    }

    /// Try to execute a closure, returning `None` if already borrowed.
    #[inline]
    pub fn try_with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut ClockGen<CAPACITY>) -> R,
    {
        self.inner.try_with(f)
    }

    /// Attach `handler` to the SLC interrupt line.
    ///
    /// Use the [`clockgen_isr!`](crate::clockgen_isr) macro to generate a
    /// handler that forwards into this wrapper.
    ///
    /// # Safety
    /// `handler` runs in interrupt context and must remain valid while
    /// attached. It must not block on this wrapper other than through
    /// [`with`](Self::with).
    pub unsafe fn attach_isr(&self, handler: hal::interrupt::RawHandler) {
        // SAFETY: the handler contract is forwarded to the caller
        unsafe { hal::interrupt::attach(handler, core::ptr::null_mut()) }
    }
}

impl<const CAPACITY: usize> Default for SharedClockGen<CAPACITY> {
    fn default() -> Self {
        Self::new()
    }
}

/// Quarter-capacity shared driver.
pub type SharedClockGenSmall = SharedClockGen<256>;
/// Mid-size shared driver.
pub type SharedClockGenDefault = SharedClockGen<1024>;
/// Full-capacity shared driver.
pub type SharedClockGenLarge = SharedClockGen<4096>;

/// Generate an `extern "C"` SLC interrupt handler that forwards into a
/// static [`SharedClockGen`].
///
/// ```ignore
/// static CLOCKGEN: SharedClockGen<1024> = SharedClockGen::new();
/// clockgen_isr!(slc_isr, CLOCKGEN);
///
/// unsafe { CLOCKGEN.attach_isr(slc_isr) };
/// ```
#[macro_export]
macro_rules! clockgen_isr {
    ($name:ident, $shared:path) => {
        /// SLC interrupt trampoline.
        unsafe extern "C" fn $name(_arg: *mut ::core::ffi::c_void) {
            $shared.with(|drv| drv.handle_interrupt());
        }
    };
}

// =============================================================================
// Tests
// =============================================================================
