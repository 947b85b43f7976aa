//! SLC DMA building blocks: buffer layout, descriptors and the ring.
//!
//! All memory is statically allocated; the driver owns the sample buffer and
//! the descriptor array, and the hardware borrows them (read-only) while a
//! session is running.

pub mod descriptor;
pub mod ring;

pub use descriptor::SlcDescriptor;
pub use ring::DescriptorRing;

use crate::internal::constants::{MAX_SUB_BUFFERS, MIN_SUB_BUFFER_WORDS};

/// Partition of the sample buffer into equal sub-buffers plus a remainder.
///
/// The split balances DMA interrupt frequency against per-interrupt latency:
/// starting from two halves, the sub-buffer count doubles (length halves)
/// while the count stays under half the descriptor capacity and the length
/// stays above 32 words. Whatever words are left over are folded into the
/// last sub-buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferLayout {
    /// Number of sub-buffers (always a power of two)
    pub buf_cnt: usize,
    /// Length of one sub-buffer in 32-bit words
    pub buf_len: usize,
    /// Extra words appended to the last sub-buffer
    pub remainder: usize,
}

impl BufferLayout {
    /// An inert layout (no session configured).
    pub const EMPTY: Self = Self {
        buf_cnt: 0,
        buf_len: 0,
        remainder: 0,
    };

    /// Compute the layout for a validated total word count.
    #[must_use]
    pub fn for_total(total_words: usize) -> Self {
        let mut buf_cnt = 2;
        let mut buf_len = total_words / 2;

        while buf_cnt < MAX_SUB_BUFFERS && buf_len > MIN_SUB_BUFFER_WORDS {
            buf_cnt <<= 1;
            buf_len >>= 1;
        }

        Self {
            buf_cnt,
            buf_len,
            remainder: total_words - buf_cnt * buf_len,
        }
    }

    /// Total words covered by this layout.
    #[inline(always)]
    #[must_use]
    pub const fn total_words(&self) -> usize {
        self.buf_cnt * self.buf_len + self.remainder
    }
}

// =============================================================================
// Tests
// =============================================================================
