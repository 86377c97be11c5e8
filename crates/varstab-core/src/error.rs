//! Error types for sample buffer management.
//!
//! Numeric special values (NaN, infinity) are never errors: the kernels
//! return them as ordinary results. Only allocation and lifecycle
//! failures are reported through [`BufferError`].

use std::error::Error;
use std::fmt;

use crate::precision::Precision;

/// Errors raised by resize, handle acquisition and handle resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BufferError {
    /// A resize request with a negative or otherwise malformed length.
    InvalidArgument {
        /// The length as the caller supplied it.
        requested: i64,
    },
    /// The allocation could not be satisfied. The previous allocation of
    /// the domain is left untouched.
    OutOfMemory {
        /// Domain whose resize failed.
        precision: Precision,
        /// Number of elements requested.
        requested: usize,
        /// Configured element limit, if the request exceeded one.
        limit: Option<usize>,
    },
    /// A handle or computation was requested before the domain was ever
    /// resized.
    InvalidState {
        /// Domain that has no allocation yet.
        precision: Precision,
    },
    /// A handle issued before the most recent resize of its domain.
    StaleHandle {
        /// Domain the handle belongs to.
        precision: Precision,
        /// The generation encoded in the handle.
        handle_generation: u64,
        /// The buffer's current generation.
        current_generation: u64,
    },
}

impl BufferError {
    /// The precision domain the error concerns, if any.
    pub fn precision(&self) -> Option<Precision> {
        match self {
            Self::InvalidArgument { .. } => None,
            Self::OutOfMemory { precision, .. }
            | Self::InvalidState { precision }
            | Self::StaleHandle { precision, .. } => Some(*precision),
        }
    }
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { requested } => {
                write!(f, "invalid buffer length: {requested}")
            }
            Self::OutOfMemory {
                precision,
                requested,
                limit: Some(limit),
            } => write!(
                f,
                "{precision} buffer of {requested} elements exceeds limit of {limit} elements"
            ),
            Self::OutOfMemory {
                precision,
                requested,
                limit: None,
            } => write!(
                f,
                "allocation of {precision} buffer with {requested} elements failed"
            ),
            Self::InvalidState { precision } => {
                write!(f, "{precision} buffer has not been allocated")
            }
            Self::StaleHandle {
                precision,
                handle_generation,
                current_generation,
            } => write!(
                f,
                "stale {precision} handle: generation {handle_generation}, current {current_generation}"
            ),
        }
    }
}

impl Error for BufferError {}

/// Convert a signed length from an external caller into an element count.
///
/// Negative lengths are rejected with [`BufferError::InvalidArgument`];
/// lengths that do not fit `usize` on this target are reported the same
/// way.
pub fn checked_len(requested: i64) -> Result<usize, BufferError> {
    usize::try_from(requested).map_err(|_| BufferError::InvalidArgument { requested })
}
