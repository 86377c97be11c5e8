//! The floating-point width abstraction shared by buffers and kernels.

use std::fmt::{Debug, Display};
use std::iter::Sum;

use num_traits::Float;

use crate::precision::Precision;

/// A floating-point width usable for sample storage or accumulation.
///
/// Implemented for `f32` and `f64` only. Kernels are written once
/// against this trait; mixed-precision variants additionally require
/// `num_traits::AsPrimitive` conversions between a storage width and an
/// accumulator width.
pub trait Sample: Float + Sum + Default + Debug + Display + Send + Sync + 'static {
    /// The storage domain values of this width live in.
    const PRECISION: Precision;

    /// Converts an element count to this width.
    ///
    /// Exact up to 2^24 for `f32` and 2^53 for `f64`; larger counts
    /// round to nearest like any other conversion.
    fn from_count(n: usize) -> Self;
}

impl Sample for f32 {
    const PRECISION: Precision = Precision::Single;

    #[inline]
    fn from_count(n: usize) -> Self {
        n as f32
    }
}

impl Sample for f64 {
    const PRECISION: Precision = Precision::Double;

    #[inline]
    fn from_count(n: usize) -> Self {
        n as f64
    }
}
