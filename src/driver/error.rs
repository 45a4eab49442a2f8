//! Error types for the serial staging engine
//!
//! Errors are organized by domain for better diagnostics:
//! - [`ConfigError`]: Subsystem, descriptor and port configuration failures
//! - [`QueueError`]: Word queue and byte FIFO capacity/initialization issues
//! - [`IoError`]: Runtime TX/RX capacity outcomes
//!
//! The unified [`Error`] enum wraps all domain errors and is returned
//! by most driver methods. Byte-stream operations additionally report how far
//! they got through [`PartialError`].

// =============================================================================
// Configuration Errors
// =============================================================================

/// Configuration and initialization errors
///
/// These errors are never retried internally and are reported before any
/// staging state is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Out-of-range port, unknown mode or missing required argument
    InvalidArgument,
    /// Subsystem or word queue not initialized, or descriptor does not resolve
    NotInitialized,
    /// Descriptor resolves but is in the wrong mode for the operation
    NotConfigured,
    /// Register mapper failed or left the register binding empty
    MappingFailed,
    /// Every descriptor slot is in use
    NoFreeDescriptor,
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
            ConfigError::InvalidArgument => "invalid argument",
            ConfigError::NotInitialized => "not initialized",
            ConfigError::NotConfigured => "not configured for this mode",
            ConfigError::MappingFailed => "register mapping failed",
            ConfigError::NoFreeDescriptor => "no free descriptor",
        }
    }
}

// =============================================================================
// Queue Errors
// =============================================================================

/// Word queue and byte FIFO errors
///
/// Internal to the buffering layer; the driver API translates these into
/// [`ConfigError`] or direction-specific [`IoError`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum QueueError {
    /// Queue used before `init`
    NotInitialized,
    /// Queue holds its full capacity
    QueueFull,
    /// Queue holds nothing
    QueueEmpty,
}

impl core::fmt::Display for QueueError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl QueueError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            QueueError::NotInitialized => "queue not initialized",
            QueueError::QueueFull => "queue full",
            QueueError::QueueEmpty => "queue empty",
        }
    }

    /// Translate into the driver error seen by a transmit-side caller
    pub(crate) const fn into_tx(self) -> Error {
        match self {
            QueueError::NotInitialized => Error::Config(ConfigError::NotInitialized),
            QueueError::QueueFull => Error::Io(IoError::TxFull),
            QueueError::QueueEmpty => Error::Io(IoError::TxEmpty),
        }
    }

    /// Translate into the driver error seen by a receive-side caller
    pub(crate) const fn into_rx(self) -> Error {
        match self {
            QueueError::NotInitialized => Error::Config(ConfigError::NotInitialized),
            QueueError::QueueFull => Error::Io(IoError::RxFull),
            QueueError::QueueEmpty => Error::Io(IoError::RxEmpty),
        }
    }
}

// =============================================================================
// I/O Errors
// =============================================================================

/// Runtime TX/RX capacity outcomes
///
/// Expected, recoverable-by-retry conditions. A caller retries on a later
/// poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IoError {
    /// TX word queue cannot accept more data
    TxFull,
    /// TX word queue has nothing to hand out
    TxEmpty,
    /// RX word queue cannot accept more data
    RxFull,
    /// No received data is available
    RxEmpty,
}

impl core::fmt::Display for IoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl IoError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            IoError::TxFull => "transmit queue full",
            IoError::TxEmpty => "transmit queue empty",
            IoError::RxFull => "receive queue full",
            IoError::RxEmpty => "no received data",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// Match on the inner domain error for specific handling:
/// ```ignore
/// match result {
///     Err(Error::Config(ConfigError::NotConfigured)) => { /* ... */ }
///     Err(Error::Io(IoError::TxFull)) => { /* retry after poll */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration error
    Config(ConfigError),
    /// I/O error
    Io(IoError),
}

impl Error {
    /// Check whether retrying after a poll cycle can succeed
    #[must_use]
    pub const fn is_capacity(&self) -> bool {
        matches!(self, Error::Io(_))
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Config(e) => write!(f, "config: {}", e.as_str()),
            Error::Io(e) => write!(f, "io: {}", e.as_str()),
        }
    }
}

impl core::error::Error for Error {}

impl embedded_hal::digital::Error for Error {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

// From impls for automatic conversion
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<IoError> for Error {
    fn from(e: IoError) -> Self {
        Error::Io(e)
    }
}

// =============================================================================
// Partial Progress
// =============================================================================

/// Error from a byte-stream operation, paired with the bytes moved before it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PartialError {
    /// What stopped the transfer
    pub error: Error,
    /// Bytes accepted or produced before `error` occurred
    pub transferred: usize,
}

impl PartialError {
    /// Pair an error with a progress count
    #[must_use]
    pub const fn new(error: Error, transferred: usize) -> Self {
        Self { error, transferred }
    }
}

impl From<Error> for PartialError {
    fn from(error: Error) -> Self {
        Self::new(error, 0)
    }
}

impl From<ConfigError> for PartialError {
    fn from(error: ConfigError) -> Self {
        Self::new(Error::Config(error), 0)
    }
}

impl core::fmt::Display for PartialError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} after {} bytes", self.error, self.transferred)
    }
}

impl core::error::Error for PartialError {}

/// Result type alias for driver operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

/// Result type alias for queue operations
pub type QueueResult<T> = core::result::Result<T, QueueError>;

/// Result of a byte-stream transfer: bytes moved, or the error plus progress
pub type TransferResult = core::result::Result<usize, PartialError>;

// =============================================================================
// Unit Tests
// =============================================================================
