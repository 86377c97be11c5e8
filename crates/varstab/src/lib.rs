//! varstab: numerically stable variance estimation over large sample sets.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all varstab sub-crates. For most users, adding `varstab` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use varstab::prelude::*;
//!
//! let mut engine = VarianceEngine::new(EngineConfig::default()).unwrap();
//!
//! // Samples sharing a large common offset.
//! let samples: Vec<f32> = [4.0, 7.0, 13.0, 16.0]
//!     .iter()
//!     .map(|x| x + 16_777_200.0)
//!     .collect();
//! let h = engine.resize32(samples.len() as i64).unwrap();
//! engine.view32_mut(&h).unwrap().copy_from_slice(&samples);
//!
//! let stable = engine.var_two_pass_mixed_precision().unwrap();
//! assert!((stable - 30.0).abs() < 1e-3);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `varstab-core` | `Sample`, `Precision`, `BufferError`, summation |
//! | [`buffer`] | `varstab-buffer` | `SampleBuffer`, `SampleStore`, `BufferHandle` |
//! | [`kernels`] | `varstab-kernels` | The variance algorithms as slice functions |
//! | [`engine`] | `varstab-engine` | `VarianceEngine`, `Algorithm`, `VarianceReport` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Numeric traits, precision domains and error types (`varstab-core`).
pub use varstab_core as types;

/// Dual-precision sample storage (`varstab-buffer`).
///
/// Most users go through [`engine::VarianceEngine`] instead; the store is
/// exposed for callers that manage buffers themselves.
pub use varstab_buffer as buffer;

/// Variance algorithms over plain slices (`varstab-kernels`).
///
/// Every function here is pure and generic over [`types::Sample`], so it
/// can be used on any `&[f32]` or `&[f64]` without an engine.
pub use varstab_kernels as kernels;

/// The variance engine context (`varstab-engine`).
pub use varstab_engine as engine;

/// Common imports for typical varstab usage.
///
/// ```rust
/// use varstab::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use varstab_core::{BufferError, Precision, Sample};

    // Buffers
    pub use varstab_buffer::BufferHandle;

    // Engine
    pub use varstab_engine::{
        Algorithm, ConfigError, EngineConfig, EngineError, ShiftChoice, VarianceEngine,
        VarianceReport,
    };
}
