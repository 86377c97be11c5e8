//! Shift-based single-pass variance.
//!
//! Variance is invariant under translation, so for any shift `C`:
//!
//! ```text
//!            Σ(x−C)² − (Σ(x−C))²/n
//! Var(x) = -----------------------
//!                   n − 1
//! ```
//!
//! The identity holds for every `C`; choosing `C` near the mean (the first
//! sample is the usual pick) keeps `x − C` small, which is what avoids the
//! cancellation of the plain single-pass formula. A far-off shift is still
//! correct in exact arithmetic, just no more stable than [`crate::simple`].
//!
//! How the running sums are formed is a [`Reduction`]; the final
//! arithmetic is always [`ShiftedSums::unbiased_variance`].

use varstab_core::{Sample, ShiftedSums};

use crate::simd::SimdSample;

/// How the shifted running sums are accumulated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reduction {
    /// One accumulator, samples in order.
    Scalar,
    /// One accumulator per SIMD lane, a scalar accumulator for the
    /// remainder, lanes combined at the end.
    Lanes,
}

/// `Σ(x−shift)` and `Σ(x−shift)²` under the chosen reduction.
pub fn shifted_sums<T: SimdSample>(v: &[T], shift: T, reduction: Reduction) -> ShiftedSums<T> {
    match reduction {
        Reduction::Scalar => scalar_shifted_sums(v, shift),
        Reduction::Lanes => T::lane_shifted_sums(v, shift),
    }
}

pub(crate) fn scalar_shifted_sums<T: Sample>(v: &[T], shift: T) -> ShiftedSums<T> {
    v.iter().fold(ShiftedSums::new(), |mut acc, &x| {
        acc.push(x - shift);
        acc
    })
}

/// Bessel-corrected shift-based variance under the chosen reduction.
pub fn variance_shift_unbiased_with<T: SimdSample>(v: &[T], shift: T, reduction: Reduction) -> T {
    shifted_sums(v, shift, reduction).unbiased_variance()
}

/// Bessel-corrected shift-based variance, scalar path.
///
/// NaN below two samples.
pub fn variance_shift_unbiased<T: Sample>(v: &[T], shift: T) -> T {
    scalar_shifted_sums(v, shift).unbiased_variance()
}

/// Bessel-corrected shift-based variance, lane-parallel path.
///
/// Agrees with [`variance_shift_unbiased`] up to the rounding differences
/// of a different summation order. NaN below two samples.
pub fn variance_shift_unbiased_vectorized<T: SimdSample>(v: &[T], shift: T) -> T {
    variance_shift_unbiased_with(v, shift, Reduction::Lanes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use varstab_test_utils::{
        benign_pattern, constant, offset_fixture, rel_err, OFFSET_FIXTURE_VARIANCE,
    };

    #[test]
    fn known_small_set_for_several_shifts() {
        let v = [2.0f64, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        for &s in &[0.0, 2.0, 5.0, 9.0, -100.0] {
            assert!((variance_shift_unbiased(&v, s) - 32.0 / 7.0).abs() < 1e-12);
        }
    }

    #[test]
    fn degenerate_counts_are_nan() {
        assert!(variance_shift_unbiased::<f32>(&[], 0.0).is_nan());
        assert!(variance_shift_unbiased(&[1.0f32], 1.0).is_nan());
        assert!(variance_shift_unbiased_vectorized::<f32>(&[], 0.0).is_nan());
        assert!(variance_shift_unbiased_vectorized(&[1.0f64], 0.0).is_nan());
    }

    #[test]
    fn first_sample_shift_survives_offset_fixture() {
        let v: Vec<f32> = offset_fixture(65_536);
        let scalar = variance_shift_unbiased(&v, v[0]) as f64;
        let lanes = variance_shift_unbiased_vectorized(&v, v[0]) as f64;
        assert!(rel_err(scalar, OFFSET_FIXTURE_VARIANCE) < 1e-3, "scalar {scalar}");
        assert!(rel_err(lanes, OFFSET_FIXTURE_VARIANCE) < 1e-3, "lanes {lanes}");
    }

    #[test]
    fn far_shift_is_correct_but_not_stable() {
        // Correctness: moderate data in f64, shift far outside the data.
        let v: Vec<f64> = benign_pattern(1000);
        let near = variance_shift_unbiased(&v, v[0]);
        let far = variance_shift_unbiased(&v, 1.0e4);
        assert!(rel_err(far, near) < 1e-9);

        // Stability: offset data in f32 with a zero shift degrades to the
        // single-pass formula.
        let v: Vec<f32> = offset_fixture(65_536);
        let zero_shift = variance_shift_unbiased(&v, 0.0) as f64;
        assert!(rel_err(zero_shift, OFFSET_FIXTURE_VARIANCE) > 0.5);
    }

    #[test]
    fn reductions_share_finalization() {
        let v: Vec<f64> = benign_pattern(1001);
        let scalar = shifted_sums(&v, 3.0, Reduction::Scalar);
        let lanes = shifted_sums(&v, 3.0, Reduction::Lanes);
        assert_eq!(scalar.count, lanes.count);
        assert_eq!(scalar, lanes);
    }

    #[test]
    fn constant_input_with_first_sample_shift_is_exactly_zero() {
        let v: Vec<f32> = constant(4099, 16_777_200.0);
        assert_eq!(variance_shift_unbiased(&v, v[0]), 0.0);
        assert_eq!(variance_shift_unbiased_vectorized(&v, v[0]), 0.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn shift_invariance_single_precision(
                ints in proptest::collection::vec(-50i32..=50, 32..256),
                s1 in -100i32..=100,
                s2 in -100i32..=100,
            ) {
                let v: Vec<f32> = ints.iter().map(|&i| i as f32).collect();
                let reference = variance_shift_unbiased(
                    &v.iter().map(|&x| x as f64).collect::<Vec<_>>(),
                    0.0,
                );
                prop_assume!(reference > 100.0);
                let a = variance_shift_unbiased(&v, s1 as f32) as f64;
                let b = variance_shift_unbiased(&v, s2 as f32) as f64;
                prop_assert!(rel_err(a, b) < 1e-4, "s1={} -> {}, s2={} -> {}", s1, a, s2, b);
            }

            #[test]
            fn shift_invariance_double_precision(
                v in proptest::collection::vec(-1.0e3f64..1.0e3, 2..512),
                s1 in -1.0e3f64..1.0e3,
                s2 in -1.0e3f64..1.0e3,
            ) {
                let reference = variance_shift_unbiased(&v, v[0]);
                prop_assume!(reference > 1.0);
                let a = variance_shift_unbiased(&v, s1);
                let b = variance_shift_unbiased(&v, s2);
                prop_assert!(rel_err(a, b) < 1e-8);
            }

            #[test]
            fn lanes_match_scalar_single_precision(
                ints in proptest::collection::vec(-50i32..=50, 2..1024),
                shift_index in any::<proptest::sample::Index>(),
            ) {
                // Integer data keeps every partial sum exact, so any
                // summation order yields identical totals.
                let v: Vec<f32> = ints.iter().map(|&i| i as f32).collect();
                let shift = v[shift_index.index(v.len())];
                let scalar = variance_shift_unbiased(&v, shift);
                let lanes = variance_shift_unbiased_vectorized(&v, shift);
                prop_assert_eq!(scalar.to_bits(), lanes.to_bits());
            }

            #[test]
            fn lanes_match_scalar_double_precision(
                v in proptest::collection::vec(-1.0e6f64..1.0e6, 2..1024),
                shift in -1.0e6f64..1.0e6,
            ) {
                let scalar = variance_shift_unbiased(&v, shift);
                let lanes = variance_shift_unbiased_vectorized(&v, shift);
                prop_assume!(scalar > 1e-3);
                prop_assert!(rel_err(lanes, scalar) < 1e-5);
            }
        }
    }
}
