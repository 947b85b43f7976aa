//! Mark/space pattern table.
//!
//! A pattern is an ordered sequence of records, each describing a run of
//! mark (high) bits, a run of space (low) bits and a repeat count. A repeat
//! count of zero marks a terminal record that is held for the remainder of
//! the buffer.

use crate::internal::constants::{DEGENERATE_SPACE_BITS, MAX_PATTERN_RECORDS};

/// One cycle element of the output waveform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PatternRecord {
    /// Number of high output bits
    pub mark_bits: u16,
    /// Number of low output bits
    pub space_bits: u16,
    /// Cycles before advancing to the next record; 0 = hold forever
    pub repeat: u16,
}

impl PatternRecord {
    /// Create a new record.
    #[must_use]
    pub const fn new(mark_bits: u16, space_bits: u16, repeat: u16) -> Self {
        Self {
            mark_bits,
            space_bits,
            repeat,
        }
    }

    /// A record that would encode zero bits per cycle.
    #[inline(always)]
    #[must_use]
    pub const fn is_degenerate(&self) -> bool {
        self.mark_bits == 0 && self.space_bits == 0
    }

    /// Replace a degenerate record with a 16-bit space so the encoder
    /// always makes progress.
    #[must_use]
    pub(crate) const fn normalized(self) -> Self {
        if self.is_degenerate() {
            Self {
                mark_bits: 0,
                space_bits: DEGENERATE_SPACE_BITS,
                repeat: self.repeat,
            }
        } else {
            self
        }
    }
}

/// Bounded ordered sequence of pattern records.
///
/// The active length is the highest successfully written index plus one;
/// unwritten records below that index stay all-zero and are normalized by
/// the encoder when reached.
pub struct PatternTable {
    records: [PatternRecord; MAX_PATTERN_RECORDS],
    len: usize,
}

impl PatternTable {
    /// Table capacity in records.
    pub const CAPACITY: usize = MAX_PATTERN_RECORDS;

    /// Create an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: [PatternRecord::new(0, 0, 0); MAX_PATTERN_RECORDS],
            len: 0,
        }
    }

    /// Write one record.
    ///
    /// An in-range index stores the record (degenerate records are coerced to
    /// a 16-bit space) and extends the active length to `index + 1`. An
    /// out-of-range index discards the entire table - a fail-safe-to-empty
    /// policy rather than a reported error.
    pub fn set(&mut self, index: usize, record: PatternRecord) {
        if index < Self::CAPACITY {
            self.records[index] = record.normalized();
            self.len = index + 1;
        } else {
            self.len = 0;
        }
    }

    /// Read a record (unwritten in-range slots read as all-zero).
    #[inline(always)]
    #[must_use]
    pub fn get(&self, index: usize) -> PatternRecord {
        self.records[index]
    }

    /// Active sequence length.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no pattern has been configured.
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Discard all records.
    pub fn clear(&mut self) {
        self.len = 0;
    }
}

impl Default for PatternTable {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_extends_length_to_index_plus_one() {
        let mut table = PatternTable::new();
        table.set(0, PatternRecord::new(8, 8, 1));
        assert_eq!(table.len(), 1);
        table.set(4, PatternRecord::new(2, 2, 0));
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn set_last_valid_index() {
        let mut table = PatternTable::new();
        table.set(PatternTable::CAPACITY - 1, PatternRecord::new(1, 1, 0));
        assert_eq!(table.len(), PatternTable::CAPACITY);
    }

    #[test]
    fn out_of_range_set_invalidates_whole_table() {
        // Designed quirk inherited from the original firmware: an index past
        // the capacity silently empties the table instead of reporting an
        // error. Pinned here so nobody "fixes" it by accident.
        let mut table = PatternTable::new();
        table.set(0, PatternRecord::new(8, 8, 0));
        assert_eq!(table.len(), 1);

        table.set(PatternTable::CAPACITY, PatternRecord::new(1, 1, 0));
        assert!(table.is_empty());
    }

    #[test]
    fn degenerate_record_coerced_to_space_only() {
        let mut table = PatternTable::new();
        table.set(0, PatternRecord::new(0, 0, 3));

        let rec = table.get(0);
        assert_eq!(rec.mark_bits, 0);
        assert_eq!(rec.space_bits, 16);
        assert_eq!(rec.repeat, 3);
    }

    #[test]
    fn non_degenerate_record_stored_verbatim() {
        let mut table = PatternTable::new();
        table.set(0, PatternRecord::new(7, 0, 2));
        assert_eq!(table.get(0), PatternRecord::new(7, 0, 2));
    }

    #[test]
    fn clear_empties_table() {
        let mut table = PatternTable::new();
        table.set(2, PatternRecord::new(4, 4, 1));
        table.clear();
        assert!(table.is_empty());
    }
}
