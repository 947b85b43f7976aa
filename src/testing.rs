//! Host-side test doubles.
//!
//! Compiled only for `cargo test`. Register accesses are redirected into an
//! in-process store (one per test thread), the CPU interrupt mask becomes a
//! flag, and [`SimulatedSlc`] walks a real descriptor ring the way the DMA
//! engine would, delivering the EOF interrupt when it is unmasked.

use std::vec::Vec;

use crate::driver::ClockGen;
use crate::internal::dma::{DescriptorRing, SlcDescriptor};
use crate::internal::register::slc::{self, SlcRegs};

/// In-process register store standing in for the memory-mapped peripherals.
pub mod fake_regs {
    use std::cell::RefCell;
    use std::collections::BTreeMap;

    std::thread_local! {
        static REGS: RefCell<BTreeMap<usize, u32>> = RefCell::new(BTreeMap::new());
    }

    /// Read a register; unwritten registers read as zero.
    pub fn read(addr: usize) -> u32 {
        REGS.with(|r| r.borrow().get(&addr).copied().unwrap_or(0))
    }

    /// Write a register.
    pub fn write(addr: usize, value: u32) {
        REGS.with(|r| {
            r.borrow_mut().insert(addr, value);
        });
    }

    /// Clear the whole store. Each test thread has its own store, but tests
    /// call this anyway so intent is explicit.
    pub fn reset() {
        REGS.with(|r| r.borrow_mut().clear());
    }

    /// Plant a value in the SLC interrupt status register.
    pub fn write_int_status(value: u32) {
        use crate::internal::register::{SLC_BASE, slc::INT_ST_OFFSET};
        write(SLC_BASE + INT_ST_OFFSET, value);
    }
}

/// Stand-in for the CPU-level interrupt mask (`ets_isr_mask`/`unmask`).
pub mod isr_gate {
    use std::cell::Cell;

    std::thread_local! {
        static ENABLED: Cell<bool> = const { Cell::new(false) };
    }

    /// Record the SLC interrupt line as masked or unmasked.
    pub fn set_enabled(enabled: bool) {
        ENABLED.with(|e| e.set(enabled));
    }

    /// Whether the SLC interrupt line is unmasked.
    pub fn is_enabled() -> bool {
        ENABLED.with(Cell::get)
    }

    /// Reset to the masked state.
    pub fn reset() {
        set_enabled(false);
    }
}

/// Walks a descriptor ring like the SLC engine: one descriptor per step,
/// firing the RX EOF interrupt into the driver when the EOF descriptor
/// completes and the interrupt is unmasked at both levels.
pub struct SimulatedSlc {
    /// Snapshot of every descriptor slot address, in ring order. Descriptor
    /// `next` fields hold 32-bit addresses (truncated on a 64-bit host), so
    /// the walk resolves them against this table instead of widening them.
    slots: Vec<*const SlcDescriptor>,
    current: usize,
}

impl SimulatedSlc {
    /// Start walking at the head of the given ring.
    pub fn attach<const N: usize>(ring: &DescriptorRing<N>) -> Self {
        let slots = (0..N).map(|ix| ring.get(ix) as *const SlcDescriptor).collect();
        Self { slots, current: 0 }
    }

    /// Complete one descriptor. Returns `false` once the chain is dead
    /// (detached or unlinked).
    pub fn step<const CAPACITY: usize>(&mut self, driver: &mut ClockGen<CAPACITY>) -> bool {
        // SAFETY: the descriptor ring lives inside `driver`, which the caller
        // keeps alive and in place for the duration of the walk
        let desc = unsafe { &*self.slots[self.current] };
        if !desc.is_owned() {
            return false;
        }
        let next = desc.next_addr();

        if desc.is_eof()
            && isr_gate::is_enabled()
            && SlcRegs::int_ena() & slc::INT_RX_EOF != 0
        {
            fake_regs::write_int_status(slc::INT_RX_EOF);
            driver.handle_interrupt();
            fake_regs::write_int_status(0);
        }

        let Some(next_ix) = self
            .slots
            .iter()
            .position(|&slot| slot as u32 == next)
        else {
            return false;
        };
        self.current = next_ix;
        true
    }
}
