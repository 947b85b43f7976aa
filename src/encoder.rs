//! Buffer encoders.
//!
//! An encoder turns the configured pattern into the 32-bit sample words the
//! DMA engine shifts out MSB-first. The driver ships with
//! [`MarkSpaceEncoder`]; custom encoders plug in through the [`BitEncoder`]
//! trait.

use crate::pattern::PatternTable;

/// Errors produced while encoding the sample buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// The pattern table holds no records
    EmptyPattern,
}

impl EncodeError {
    /// Get a static string description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyPattern => "pattern table is empty",
        }
    }
}

impl core::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::error::Error for EncodeError {}

/// Strategy for filling the sample buffer from a pattern table.
///
/// Implementations must fill `out` completely; the slice covers exactly the
/// configured session length. Encoders run outside the interrupt path, so
/// they may take their time.
pub trait BitEncoder {
    /// Fill `out` with sample words derived from `pattern`.
    fn fill(&self, pattern: &PatternTable, out: &mut [u32]) -> Result<(), EncodeError>;
}

/// The default mark/space run-length encoder.
///
/// Walks the pattern table record by record, emitting `mark_bits` ones
/// followed by `space_bits` zeroes per cycle and committing a sample word
/// every 32 bits. A record's repeat count is consumed each time the encoder
/// re-enters the mark phase; once exhausted the encoder advances, clamping at
/// the final record. A repeat count of zero pins the encoder on that record
/// for the rest of the buffer.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkSpaceEncoder;

impl MarkSpaceEncoder {
    /// Create the encoder.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl BitEncoder for MarkSpaceEncoder {
    fn fill(&self, pattern: &PatternTable, out: &mut [u32]) -> Result<(), EncodeError> {
        if pattern.is_empty() {
            return Err(EncodeError::EmptyPattern);
        }

        let last_ix = pattern.len() - 1;
        let mut record_ix = 0;
        // Unwritten gap slots read all-zero; normalize again here so they
        // become a 16-bit space instead of a zero-progress cycle.
        let mut record = pattern.get(record_ix).normalized();

        let mut level: u32 = 1; // start in the mark phase
        let mut bit_count = record.mark_bits;
        let mut repeat_count: u16 = 0;
        let mut sample: u32 = 0;
        let mut sample_bits: u8 = 0;
        let mut word_ix = 0;

        while word_ix < out.len() {
            if bit_count == 0 {
                level ^= 1;
                if level == 1 && record.repeat != 0 {
                    repeat_count += 1;
                    if repeat_count >= record.repeat {
                        repeat_count = 0;
                        if record_ix < last_ix {
                            record_ix += 1;
                            record = pattern.get(record_ix).normalized();
                        }
                    }
                }
                bit_count = if level == 1 {
                    record.mark_bits
                } else {
                    record.space_bits
                };
            } else {
                sample = (sample << 1) | level;
                bit_count -= 1;
                sample_bits += 1;
                if sample_bits == 32 {
                    sample_bits = 0;
                    out[word_ix] = sample;
                    word_ix += 1;
                }
            }
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
