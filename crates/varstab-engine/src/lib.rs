//! Variance engine for varstab.
//!
//! Provides [`VarianceEngine`], an explicit context owning one `f32` and
//! one `f64` sample buffer, and the catalogue of [`Algorithm`]s it runs
//! over them. Callers resize a buffer, write samples through the returned
//! handle, then evaluate any algorithm as often as they like; every
//! algorithm is a read-only scan.
//!
//! Numeric edge cases are results, not errors: an empty buffer yields
//! NaN from every algorithm and a single sample yields NaN from every
//! unbiased one. Errors are reserved for invalid resize requests,
//! allocation failures and use of a buffer before its first resize.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod algorithm;
pub mod config;
pub mod engine;
pub mod error;
pub mod report;

pub use algorithm::Algorithm;
pub use config::{ConfigError, EngineConfig, ShiftChoice};
pub use engine::VarianceEngine;
pub use error::EngineError;
pub use report::{ReportEntry, VarianceReport};
