//! Core types and traits for the varstab variance engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the abstractions shared by the buffer, kernel and engine crates:
//! the [`Sample`] width trait, the [`Precision`] domain tag, error
//! types, and the summation strategies the variance kernels are built
//! from.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod precision;
pub mod sample;
pub mod sum;

pub use error::{checked_len, BufferError};
pub use precision::Precision;
pub use sample::Sample;
pub use sum::{CompensatedSum, ShiftedSums};
