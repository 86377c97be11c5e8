//! Variance kernels for the varstab engine.
//!
//! Pure functions over sample slices. None of them allocate, keep state
//! between calls, or mutate their input, so they can be called repeatedly
//! on the same buffer.
//!
//! | Kernel | Passes | Accumulation | Stable under a large offset |
//! |--------|--------|--------------|-----------------------------|
//! | [`variance_simple`] / [`variance_simple_unbiased`] | 1 | storage width, plain fold | no |
//! | [`variance_two_pass_unbiased`] | 2 | storage width, compensated | yes |
//! | [`variance_two_pass_unbiased_in`] | 2 | wider accumulator, compensated | yes |
//! | [`variance_shift_unbiased`] | 1 | storage width, plain fold | if the shift is near the mean |
//! | [`variance_shift_unbiased_vectorized`] | 1 | storage width, per lane | if the shift is near the mean |
//!
//! Degenerate inputs are not errors: an empty slice yields NaN from every
//! kernel, and a single sample yields NaN from every unbiased kernel.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod shift;
pub mod simd;
pub mod simple;
pub mod two_pass;

pub use shift::{
    shifted_sums, variance_shift_unbiased, variance_shift_unbiased_vectorized,
    variance_shift_unbiased_with, Reduction,
};
pub use simd::SimdSample;
pub use simple::{sum_pair, variance_simple, variance_simple_unbiased};
pub use two_pass::{mean, mean_in, variance_two_pass_unbiased, variance_two_pass_unbiased_in};
