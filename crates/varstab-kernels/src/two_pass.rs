//! Two-pass variance: mean first, then squared deviations.
//!
//! Centring before squaring removes the common offset before anything is
//! accumulated, so the cancellation that ruins the single-pass formula
//! never happens. Both passes use compensated summation: at `f32` a plain
//! fold over 65536 samples near 1.6e7 drifts the mean by several units,
//! which is enough on its own to double a variance of 14.
//!
//! The storage width `S` and accumulator width `A` are independent. The
//! plain kernel is `S = A`; the mixed-precision kernel reads `f32`
//! storage and accumulates in `f64`.

use num_traits::AsPrimitive;
use varstab_core::sum::bessel;
use varstab_core::{CompensatedSum, Sample};

/// Arithmetic mean at storage width. NaN when empty.
pub fn mean<T>(v: &[T]) -> T
where
    T: Sample + AsPrimitive<T>,
{
    mean_in::<T, T>(v)
}

/// Arithmetic mean of `S` samples accumulated at width `A`. NaN when empty.
pub fn mean_in<S, A>(v: &[S]) -> A
where
    S: Sample + AsPrimitive<A>,
    A: Sample,
{
    if v.is_empty() {
        return A::nan();
    }
    let total: CompensatedSum<A> = v.iter().map(|&x| x.as_()).collect();
    total.value() / A::from_count(v.len())
}

/// Bessel-corrected two-pass variance at storage width.
pub fn variance_two_pass_unbiased<T>(v: &[T]) -> T
where
    T: Sample + AsPrimitive<T>,
{
    variance_two_pass_unbiased_in::<T, T>(v)
}

/// Bessel-corrected two-pass variance of `S` samples, accumulated at
/// width `A` and converted back to `S`.
///
/// NaN below two samples.
pub fn variance_two_pass_unbiased_in<S, A>(v: &[S]) -> S
where
    S: Sample + AsPrimitive<A>,
    A: Sample + AsPrimitive<S>,
{
    let mean = mean_in::<S, A>(v);
    let centred: CompensatedSum<A> = v
        .iter()
        .map(|&x| {
            let d = x.as_() - mean;
            d * d
        })
        .collect();
    bessel(centred.value(), v.len()).as_()
}
