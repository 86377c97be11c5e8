//! Dual-precision sample storage for the varstab engine.
//!
//! Owns the two independently allocated sample buffers (one `f32`, one
//! `f64`) and hands out generation-scoped handles into them.
//!
//! # Architecture
//!
//! ```text
//! SampleStore (owner, one per engine)
//! ├── BufferConfig (element limit, validated up front)
//! ├── SampleBuffer<f32> (Vec<f32> + generation counter)
//! └── SampleBuffer<f64> (Vec<f64> + generation counter)
//! ```
//!
//! # Handle lifecycle
//!
//! Every successful resize bumps the buffer's generation. A
//! [`BufferHandle`] records the generation it was issued at, and resolving
//! it against a newer generation fails with `StaleHandle` instead of
//! reading reallocated memory. Slices borrowed from the store cannot
//! outlive a resize at all, since resizing takes `&mut self`.
//!
//! # Resize policy
//!
//! Resizing follows `Vec::resize`: the common prefix is preserved, a
//! newly exposed tail is zero-filled, and shrinking truncates. Storage is
//! reserved before anything is mutated, so a failed resize leaves the
//! buffer's contents, length and generation unchanged.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod buffer;
pub mod config;
pub mod handle;
pub mod store;

pub use buffer::SampleBuffer;
pub use config::BufferConfig;
pub use handle::BufferHandle;
pub use store::{SampleStore, Stored};
