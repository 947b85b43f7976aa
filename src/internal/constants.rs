//! Driver-wide constants.

/// Base frequency feeding the I2S clock dividers (160 MHz).
pub const I2S_BASE_FREQ_HZ: u32 = 160_000_000;

/// Width mask of each 6-bit clock divider field.
pub const DIVIDER_FIELD_MASK: u8 = 0x3F;

/// Largest value a divider field can hold.
pub const MAX_DIVIDER: u8 = 63;

/// Smallest configurable sample buffer, in 32-bit words.
pub const MIN_BUFFER_WORDS: usize = 32;

/// Largest configurable sample buffer, in 32-bit words (16 KB).
pub const MAX_BUFFER_WORDS: usize = 4096;

/// Descriptor slots in the ring.
pub const MAX_DESCRIPTORS: usize = 64;

/// Upper bound on linked sub-buffers; half the descriptor slots stay spare.
pub const MAX_SUB_BUFFERS: usize = MAX_DESCRIPTORS / 2;

/// Sub-buffer splitting stops once pieces reach this many words.
pub const MIN_SUB_BUFFER_WORDS: usize = 32;

/// Pattern table capacity in records.
pub const MAX_PATTERN_RECORDS: usize = 100;

/// Space bits substituted for a record that would encode zero bits.
pub const DEGENERATE_SPACE_BITS: u16 = 16;

/// Mark bits of the fallback pattern installed when none is configured.
pub const DEFAULT_MARK_BITS: u16 = 16;

/// Space bits of the fallback pattern.
pub const DEFAULT_SPACE_BITS: u16 = 16;

/// Diagnostic scratch slots exposed by the driver.
pub const DEBUG_SLOTS: usize = 4;
