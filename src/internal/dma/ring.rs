//! Circular descriptor ring over the sample buffer.

use super::BufferLayout;
use super::descriptor::SlcDescriptor;

/// Fixed-capacity descriptor ring.
///
/// Only the first `buf_cnt` descriptors of a layout are linked; the rest stay
/// inert. The chain is circular, so the SLC engine replays the sample buffer
/// until it is stopped (or, in one-shot mode, until the EOF interrupt fires).
pub struct DescriptorRing<const N: usize> {
    /// Array of descriptors
    descriptors: [SlcDescriptor; N],
}

#[allow(dead_code)]
impl<const N: usize> DescriptorRing<N> {
    /// Create a new ring with all descriptors inert.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            descriptors: [const { SlcDescriptor::new() }; N],
        }
    }

    /// Number of descriptor slots in the ring.
    #[inline(always)]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Wire a circular chain of `layout.buf_cnt` descriptors over `buffer`.
    ///
    /// Each descriptor covers `buf_len` words; the last one additionally
    /// absorbs the layout remainder and carries the EOF flag. Exactly one
    /// descriptor has EOF set afterwards.
    pub fn link(&self, buffer: &[u32], layout: &BufferLayout) {
        debug_assert!(layout.buf_cnt <= N);
        debug_assert!(layout.total_words() <= buffer.len());

        for x in 0..layout.buf_cnt {
            let next = &self.descriptors[(x + 1) % layout.buf_cnt];
            // SAFETY: x * buf_len + buf_len <= total_words <= buffer.len()
            let chunk = unsafe { buffer.as_ptr().add(x * layout.buf_len) };
            self.descriptors[x].setup(chunk, layout.buf_len * 4, next);
        }

        let last = &self.descriptors[layout.buf_cnt - 1];
        last.set_eof();
        last.extend_datalen(layout.remainder * 4);
    }

    /// Clear every descriptor back to the inert state.
    pub fn detach(&self) {
        for desc in &self.descriptors {
            desc.clear();
        }
    }

    /// Get a descriptor by index.
    #[inline(always)]
    pub fn get(&self, index: usize) -> &SlcDescriptor {
        &self.descriptors[index]
    }

    /// Address of the first descriptor (programmed into the RX link).
    #[inline(always)]
    #[must_use]
    pub fn first_addr_u32(&self) -> u32 {
        self.descriptors.as_ptr() as u32
    }

    /// Address of a spare linked descriptor for the unused TX link.
    ///
    /// The SLC raises a descriptor error if the TX link address is invalid,
    /// even though nothing is ever sent through it. Any linked descriptor
    /// will do; `link()` guarantees at least two.
    #[inline(always)]
    #[must_use]
    pub fn spare_addr_u32(&self) -> u32 {
        &self.descriptors[1] as *const SlcDescriptor as u32
    }

    /// Count descriptors carrying the EOF flag (ring invariant checks).
    #[must_use]
    pub fn eof_count(&self) -> usize {
        self.descriptors.iter().filter(|d| d.is_eof()).count()
    }

    /// Count descriptors that are linked (owner flag set).
    #[must_use]
    pub fn linked_count(&self) -> usize {
        self.descriptors.iter().filter(|d| d.is_owned()).count()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::constants::MAX_DESCRIPTORS;

    #[test]
    fn link_builds_circular_chain() {
        let buffer = [0u32; 256];
        let layout = BufferLayout::for_total(256);
        let ring: DescriptorRing<MAX_DESCRIPTORS> = DescriptorRing::new();

        ring.link(&buffer, &layout);

        // Every linked descriptor points at the next, last wraps to first
        for x in 0..layout.buf_cnt {
            let expect_next = ring.get((x + 1) % layout.buf_cnt) as *const SlcDescriptor as u32;
            assert_eq!(ring.get(x).next_addr(), expect_next, "descriptor {x}");
            assert!(ring.get(x).is_owned());
        }
        assert_eq!(
            ring.get(layout.buf_cnt - 1).next_addr(),
            ring.first_addr_u32()
        );
    }

    #[test]
    fn link_sets_exactly_one_eof() {
        let buffer = [0u32; 1024];
        let layout = BufferLayout::for_total(1024);
        let ring: DescriptorRing<MAX_DESCRIPTORS> = DescriptorRing::new();

        ring.link(&buffer, &layout);

        assert_eq!(ring.eof_count(), 1);
        assert!(ring.get(layout.buf_cnt - 1).is_eof());
    }

    #[test]
    fn link_covers_whole_buffer() {
        // 1000 words does not split evenly; the remainder lands on the tail
        let buffer = [0u32; 1000];
        let layout = BufferLayout::for_total(1000);
        let ring: DescriptorRing<MAX_DESCRIPTORS> = DescriptorRing::new();

        ring.link(&buffer, &layout);

        let mut bytes = 0;
        for x in 0..layout.buf_cnt {
            bytes += ring.get(x).datalen();
        }
        assert_eq!(bytes, 1000 * 4);
    }

    #[test]
    fn buffer_addresses_are_contiguous_strides() {
        let buffer = [0u32; 512];
        let layout = BufferLayout::for_total(512);
        let ring: DescriptorRing<MAX_DESCRIPTORS> = DescriptorRing::new();

        ring.link(&buffer, &layout);

        let base = buffer.as_ptr() as u32;
        for x in 0..layout.buf_cnt {
            assert_eq!(
                ring.get(x).buffer_addr(),
                base + (x * layout.buf_len * 4) as u32
            );
        }
    }

    #[test]
    fn detach_clears_all_descriptors() {
        let buffer = [0u32; 128];
        let layout = BufferLayout::for_total(128);
        let ring: DescriptorRing<MAX_DESCRIPTORS> = DescriptorRing::new();

        ring.link(&buffer, &layout);
        assert!(ring.linked_count() > 0);

        ring.detach();
        assert_eq!(ring.linked_count(), 0);
        assert_eq!(ring.eof_count(), 0);
    }

    #[test]
    fn relink_after_detach_keeps_single_eof() {
        let buffer = [0u32; 128];
        let layout = BufferLayout::for_total(128);
        let ring: DescriptorRing<MAX_DESCRIPTORS> = DescriptorRing::new();

        ring.link(&buffer, &layout);
        ring.detach();
        ring.link(&buffer, &layout);

        assert_eq!(ring.eof_count(), 1);
        assert_eq!(ring.linked_count(), layout.buf_cnt);
    }
}
