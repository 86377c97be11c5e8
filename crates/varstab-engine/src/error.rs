//! The engine-level error type.

use std::error::Error;
use std::fmt;

use varstab_core::BufferError;

use crate::config::ConfigError;

/// Errors surfaced by [`VarianceEngine`](crate::VarianceEngine) operations.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineError {
    /// Resize, handle or buffer access failed.
    Buffer(BufferError),
    /// The engine configuration is invalid.
    Config(ConfigError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buffer(e) => write!(f, "buffer: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Buffer(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

impl From<BufferError> for EngineError {
    fn from(e: BufferError) -> Self {
        Self::Buffer(e)
    }
}

impl From<ConfigError> for EngineError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
