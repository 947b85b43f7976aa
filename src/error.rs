//! Error types for the I2S clock generator driver
//!
//! Errors are organized by domain:
//! - [`ConfigError`]: Session configuration failures
//! - [`EncodeError`]: Pattern encoding failures (defined in [`crate::encoder`])
//!
//! The unified [`Error`] enum wraps all domain errors and is returned by
//! methods that can fail for more than one reason.

pub use crate::encoder::EncodeError;

// =============================================================================
// Configuration Errors
// =============================================================================

/// Session configuration errors
///
/// These errors occur while validating a session before any hardware or
/// driver state is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Buffer length outside the 32..=4096 word range
    InvalidBufferSize,
    /// Buffer length exceeds the driver's compiled-in capacity
    ExceedsCapacity,
    /// `begin` called before a successful `init`
    NotConfigured,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigError::InvalidBufferSize => "buffer size out of range",
            ConfigError::ExceedsCapacity => "buffer size exceeds driver capacity",
            ConfigError::NotConfigured => "driver not configured",
        }
    }
}

impl core::error::Error for ConfigError {}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// Match on the inner domain error for specific handling:
/// ```ignore
/// match result {
///     Err(Error::Config(ConfigError::InvalidBufferSize)) => { /* ... */ }
///     Err(Error::Encode(EncodeError::EmptyPattern)) => { /* ... */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration error
    Config(ConfigError),
    /// Pattern encoding error
    Encode(EncodeError),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Config(e) => write!(f, "config: {}", e.as_str()),
            Error::Encode(e) => write!(f, "encode: {}", e.as_str()),
        }
    }
}

impl core::error::Error for Error {}

// From impls for automatic conversion
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<EncodeError> for Error {
    fn from(e: EncodeError) -> Self {
        Error::Encode(e)
    }
}

/// Result type alias for driver operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

/// Result type alias for encoding operations
pub type EncodeResult<T> = core::result::Result<T, EncodeError>;

// =============================================================================
// Unit Tests
// =============================================================================
