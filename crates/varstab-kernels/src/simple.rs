//! Textbook single-pass variance.
//!
//! ```text
//!           Σx² − (Σx)²/n
//! Var(x) = ---------------
//!             n  or  n − 1
//! ```
//!
//! Cheapest of the kernels, and the one that breaks: when the samples
//! share a large common offset, `Σx²` and `(Σx)²/n` are two huge, nearly
//! equal numbers and their difference is mostly rounding error.

use varstab_core::{Sample, ShiftedSums};

/// `Σx` and `Σx²` in one scan, at storage width.
pub fn sum_pair<T: Sample>(v: &[T]) -> ShiftedSums<T> {
    v.iter().fold(ShiftedSums::new(), |mut acc, &x| {
        acc.push(x);
        acc
    })
}

/// Population (divide by `n`) single-pass variance. NaN when empty.
pub fn variance_simple<T: Sample>(v: &[T]) -> T {
    sum_pair(v).biased_variance()
}

/// Bessel-corrected single-pass variance. NaN below two samples.
pub fn variance_simple_unbiased<T: Sample>(v: &[T]) -> T {
    sum_pair(v).unbiased_variance()
}

#[cfg(test)]
mod tests {
    use super::*;
    use varstab_test_utils::{benign_pattern, offset_fixture, rel_err, OFFSET_FIXTURE_VARIANCE};

    #[test]
    fn known_small_set() {
        let v = [2.0f32, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(variance_simple(&v), 4.0);
        assert!((variance_simple_unbiased(&v) - 32.0 / 7.0).abs() < 1e-6);
    }

    #[test]
    fn sum_pair_counts_every_sample() {
        let sums = sum_pair(&[1.0f64, 2.0, 3.0]);
        assert_eq!(sums.sum, 6.0);
        assert_eq!(sums.sum_sq, 14.0);
        assert_eq!(sums.count, 3);
    }

    #[test]
    fn empty_and_single_sample() {
        assert!(variance_simple::<f32>(&[]).is_nan());
        assert!(variance_simple_unbiased::<f32>(&[]).is_nan());
        assert!(variance_simple_unbiased(&[5.0f64]).is_nan());
        assert_eq!(variance_simple(&[5.0f64]), 0.0);
    }

    #[test]
    fn exact_on_small_integer_data() {
        let v: Vec<f32> = benign_pattern(256);
        let reference = variance_simple_unbiased(&v.iter().map(|&x| x as f64).collect::<Vec<_>>());
        assert!(rel_err(variance_simple_unbiased(&v) as f64, reference) < 1e-6);
    }

    #[test]
    fn collapses_under_large_offset() {
        let v: Vec<f32> = offset_fixture(65_536);
        let got = variance_simple_unbiased(&v) as f64;
        assert!(
            rel_err(got, OFFSET_FIXTURE_VARIANCE) > 0.5,
            "single-pass f32 should not survive the offset, got {got}"
        );
    }
}
