//! SLC DMA descriptor structure.
//!
//! One descriptor per sub-buffer. The hardware follows the `next` pointers,
//! so a circular chain replays the sample buffer forever.

/// Volatile cell wrapper for descriptor fields
///
/// Ensures all accesses are volatile to prevent compiler optimization
/// from reordering or caching descriptor field accesses.
#[repr(transparent)]
pub(crate) struct VolatileCell<T: Copy> {
    value: core::cell::UnsafeCell<T>,
}

// Safety: VolatileCell is safe to share between threads because all access
// is through volatile operations which are atomic for u32 on the ESP8266.
unsafe impl<T: Copy> Sync for VolatileCell<T> {}

impl<T: Copy> VolatileCell<T> {
    /// Create a new volatile cell with the given initial value
    #[inline(always)]
    pub const fn new(value: T) -> Self {
        Self {
            value: core::cell::UnsafeCell::new(value),
        }
    }

    /// Read the value (volatile read)
    #[inline(always)]
    pub fn get(&self) -> T {
        unsafe { core::ptr::read_volatile(self.value.get()) }
    }

    /// Write a value (volatile write)
    #[inline(always)]
    pub fn set(&self, value: T) {
        unsafe { core::ptr::write_volatile(self.value.get(), value) }
    }

    /// Update the value using a function (read-modify-write)
    #[inline(always)]
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(T) -> T,
    {
        let old = self.get();
        self.set(f(old));
    }
}

/// SLC descriptor word 0 bit fields.
pub mod ctrl {
    /// Block size field mask (bytes the buffer can hold)
    pub const BLOCKSIZE_MASK: u32 = 0xFFF;
    /// Block size field shift
    pub const BLOCKSIZE_SHIFT: u32 = 0;
    /// Data length field mask (bytes to transfer)
    pub const DATALEN_MASK: u32 = 0xFFF;
    /// Data length field shift
    pub const DATALEN_SHIFT: u32 = 12;
    /// Sub start-of-frame flag
    pub const SUB_SOF: u32 = 1 << 29;
    /// End-of-frame flag - the link raises its EOF interrupt here
    pub const EOF: u32 = 1 << 30;
    /// Owner flag - set while the descriptor belongs to the DMA engine
    pub const OWNER: u32 = 1 << 31;
}

/// SLC DMA buffer descriptor (12 bytes).
///
/// Field layout matches the hardware: a packed control word
/// (blocksize/datalen/flags), the buffer address and the next descriptor
/// address.
#[repr(C)]
#[repr(align(4))]
pub struct SlcDescriptor {
    /// Control word: blocksize, datalen, sub_sof/eof/owner flags
    ctrl: VolatileCell<u32>,
    /// Buffer address
    buf_ptr: VolatileCell<u32>,
    /// Next descriptor address (circular chain)
    next_link: VolatileCell<u32>,
}

#[allow(dead_code)]
impl SlcDescriptor {
    /// Size of the descriptor in bytes
    pub const SIZE: usize = 12;

    /// Create a new zeroed descriptor.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ctrl: VolatileCell::new(0),
            buf_ptr: VolatileCell::new(0),
            next_link: VolatileCell::new(0),
        }
    }

    /// Wire this descriptor to a buffer and the next chain element.
    ///
    /// `len_bytes` is written to both blocksize and datalen; the owner flag
    /// is set so the DMA engine accepts the descriptor.
    pub fn setup(&self, buffer: *const u32, len_bytes: usize, next: *const SlcDescriptor) {
        self.buf_ptr.set(buffer as u32);
        self.next_link.set(next as u32);
        self.ctrl.set(
            ctrl::OWNER
                | (((len_bytes as u32) & ctrl::DATALEN_MASK) << ctrl::DATALEN_SHIFT)
                | (((len_bytes as u32) & ctrl::BLOCKSIZE_MASK) << ctrl::BLOCKSIZE_SHIFT),
        );
    }

    /// Mark this descriptor as the end of the ring frame.
    #[inline(always)]
    pub fn set_eof(&self) {
        self.ctrl.update(|v| v | ctrl::EOF);
    }

    /// Check the end-of-frame flag.
    #[inline(always)]
    #[must_use]
    pub fn is_eof(&self) -> bool {
        (self.ctrl.get() & ctrl::EOF) != 0
    }

    /// Check the owner flag.
    #[inline(always)]
    #[must_use]
    pub fn is_owned(&self) -> bool {
        (self.ctrl.get() & ctrl::OWNER) != 0
    }

    /// Data length in bytes.
    #[inline(always)]
    #[must_use]
    pub fn datalen(&self) -> usize {
        ((self.ctrl.get() >> ctrl::DATALEN_SHIFT) & ctrl::DATALEN_MASK) as usize
    }

    /// Grow the data length (used to fold the layout remainder into the
    /// final descriptor).
    pub fn extend_datalen(&self, extra_bytes: usize) {
        let len = (self.datalen() + extra_bytes) as u32 & ctrl::DATALEN_MASK;
        self.ctrl
            .update(|v| (v & !(ctrl::DATALEN_MASK << ctrl::DATALEN_SHIFT)) | (len << ctrl::DATALEN_SHIFT));
    }

    /// Buffer address.
    #[inline(always)]
    #[must_use]
    pub fn buffer_addr(&self) -> u32 {
        self.buf_ptr.get()
    }

    /// Next descriptor address.
    #[inline(always)]
    #[must_use]
    pub fn next_addr(&self) -> u32 {
        self.next_link.get()
    }

    /// Reset to the inert all-zero state.
    pub fn clear(&self) {
        self.ctrl.set(0);
        self.buf_ptr.set(0);
        self.next_link.set(0);
    }
}

// =============================================================================
// Tests
// =============================================================================
