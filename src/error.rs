//! Error types for the RMII PHY simulator
//!
//! Errors are organized by domain for better diagnostics:
//! - [`FramingError`]: Malformed frames observed on the line
//! - [`ConfigError`]: Session-start and configuration failures
//!
//! The unified [`Error`] enum wraps both domains and is returned by most
//! fallible operations. Framing errors are recovered locally (the decoder
//! drops the frame and returns to idle) and counted in the diagnostics
//! summary; configuration errors fail fast before any tick is driven.
//!
//! Protocol-level outcomes (`NoReply`, `ProtocolViolation`) are not errors:
//! they are the scenario's verdict and live in [`crate::verifier::Verdict`].

// =============================================================================
// Framing Errors
// =============================================================================

/// Frame-level errors detected while reconstructing line traffic
///
/// These are recoverable: the offending frame is discarded, the decoder
/// resumes from idle, and the occurrence is counted in
/// [`Diagnostics`](crate::phy::Diagnostics).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FramingError {
    /// Fewer than the 64-byte frame minimum (or no valid SFD) was captured
    Truncated,
    /// Trailing frame check sequence does not match the recomputed value
    ChecksumMismatch,
    /// Carrier asserted for less than one byte time
    RuntimeGlitch,
    /// ARP hardware type / address length is not Ethernet (1, 6 bytes)
    UnsupportedHardwareType,
    /// ARP protocol type / address length is not IPv4 (0x0800, 4 bytes)
    UnsupportedProtocolType,
}

impl core::fmt::Display for FramingError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FramingError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            FramingError::Truncated => "frame truncated",
            FramingError::ChecksumMismatch => "frame check sequence mismatch",
            FramingError::RuntimeGlitch => "carrier glitch shorter than one byte",
            FramingError::UnsupportedHardwareType => "unsupported ARP hardware type",
            FramingError::UnsupportedProtocolType => "unsupported ARP protocol type",
        }
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Configuration and session-start errors
///
/// These indicate a programming or configuration mistake rather than a
/// transient line condition, and are raised before any tick is driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Requested bit rate is not one of the supported 10/100 Mbit/s
    RateUnsupported,
    /// A transmit session is already in flight on the bus
    BusBusy,
    /// Invalid configuration parameter (e.g. zero-tick timeout)
    InvalidConfig,
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
            ConfigError::RateUnsupported => "unsupported bit rate",
            ConfigError::BusBusy => "transmit session already in flight",
            ConfigError::InvalidConfig => "invalid configuration",
        }
    }
}

// =============================================================================
// Unified Error
// =============================================================================

/// Unified error type wrapping all domain errors
///
/// Match on the inner domain error for specific handling:
/// ```ignore
/// match result {
///     Err(Error::Config(ConfigError::BusBusy)) => { /* ... */ }
///     Err(Error::Framing(FramingError::ChecksumMismatch)) => { /* ... */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Frame-level error
    Framing(FramingError),
    /// Configuration error
    Config(ConfigError),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Framing(e) => write!(f, "framing: {}", e.as_str()),
            Error::Config(e) => write!(f, "config: {}", e.as_str()),
        }
    }
}

// From impls for automatic conversion
impl From<FramingError> for Error {
    fn from(e: FramingError) -> Self {
        Error::Framing(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type alias for simulator operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for frame codec operations
pub type FramingResult<T> = core::result::Result<T, FramingError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

// =============================================================================
// Unit Tests
// =============================================================================
