//! Lane-parallel accumulation of shifted sums.
//!
//! Each SIMD lane keeps its own `Σd` and `Σd²` over a strided subset of
//! the samples. The lanes are summed horizontally at the end and the
//! remainder that does not fill a whole vector is accumulated by the
//! scalar path, then [merged](ShiftedSums::merge) in.

use varstab_core::{Sample, ShiftedSums};
use wide::{f32x4, f64x2};

use crate::shift::scalar_shifted_sums;

/// A sample type with a portable SIMD vector representation.
pub trait SimdSample: Sample {
    /// Number of samples processed per vector operation.
    const LANES: usize;

    /// `Σ(x−shift)` and `Σ(x−shift)²` with one accumulator per lane.
    fn lane_shifted_sums(v: &[Self], shift: Self) -> ShiftedSums<Self>;
}

macro_rules! impl_simd_sample {
    ($t:ty, $v:ty, $lanes:literal) => {
        impl SimdSample for $t {
            const LANES: usize = $lanes;

            fn lane_shifted_sums(v: &[$t], shift: $t) -> ShiftedSums<$t> {
                let chunks = v.chunks_exact($lanes);
                let tail = chunks.remainder();
                let shift_v = <$v>::splat(shift);
                let mut sum = <$v>::splat(0.0);
                let mut sum_sq = <$v>::splat(0.0);
                for chunk in chunks {
                    let mut lane = [0.0; $lanes];
                    lane.copy_from_slice(chunk);
                    let d = <$v>::from(lane) - shift_v;
                    sum = sum + d;
                    sum_sq = sum_sq + d * d;
                }
                let body = ShiftedSums {
                    sum: sum.to_array().iter().copied().fold(0.0, |a, b| a + b),
                    sum_sq: sum_sq.to_array().iter().copied().fold(0.0, |a, b| a + b),
                    count: v.len() - tail.len(),
                };
                body.merge(scalar_shifted_sums(tail, shift))
            }
        }
    };
}

impl_simd_sample!(f32, f32x4, 4);
impl_simd_sample!(f64, f64x2, 2);
