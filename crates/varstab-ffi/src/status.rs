//! C-compatible status codes.
//!
//! [`VarstabStatus`] is a `repr(i32)` enum covering every error the
//! engine can report, plus the conditions only the C boundary can hit
//! (bad handles, null pointers, poisoned locks, caught panics).

use varstab_core::BufferError;
use varstab_engine::{ConfigError, EngineError};

/// C-compatible status code returned by all FFI functions.
///
/// `Ok` = 0, all errors are negative. Values are ABI-stable.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VarstabStatus {
    /// Success.
    Ok = 0,
    /// Engine handle is invalid or was already destroyed.
    InvalidHandle = -1,
    /// Negative resize length, null out-pointer, or unknown precision.
    InvalidArgument = -2,
    /// Resize exceeded the element limit or the allocation failed.
    OutOfMemory = -3,
    /// Buffer accessed or read before its first resize.
    InvalidState = -4,
    /// A buffer handle from before the latest resize was used.
    StaleHandle = -5,
    /// Engine configuration was rejected.
    ConfigError = -6,
    /// Internal error (e.g. poisoned mutex after a prior panic).
    InternalError = -7,
    /// A Rust panic was caught at the FFI boundary.
    Panicked = -128,
}

impl From<&BufferError> for VarstabStatus {
    fn from(e: &BufferError) -> Self {
        match e {
            BufferError::InvalidArgument { .. } => VarstabStatus::InvalidArgument,
            BufferError::OutOfMemory { .. } => VarstabStatus::OutOfMemory,
            BufferError::InvalidState { .. } => VarstabStatus::InvalidState,
            BufferError::StaleHandle { .. } => VarstabStatus::StaleHandle,
        }
    }
}

impl From<&ConfigError> for VarstabStatus {
    fn from(_e: &ConfigError) -> Self {
        VarstabStatus::ConfigError
    }
}

impl From<&EngineError> for VarstabStatus {
    fn from(e: &EngineError) -> Self {
        match e {
            EngineError::Buffer(e) => VarstabStatus::from(e),
            EngineError::Config(e) => VarstabStatus::from(e),
        }
    }
}
