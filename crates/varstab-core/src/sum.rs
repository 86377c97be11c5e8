//! Summation strategies and the shared variance finalization.
//!
//! Every kernel reduces its input to one of two shapes before producing
//! a scalar: a mean (via [`CompensatedSum`] or a plain fold), or a set of
//! [`ShiftedSums`]. Keeping the final arithmetic here means the scalar
//! and lane-parallel shift paths cannot drift apart in how they apply
//! Bessel's correction.

use crate::sample::Sample;

/// Neumaier-compensated running sum.
///
/// Tracks the low-order bits lost by each addition in a separate
/// compensation term. Unlike plain Kahan summation it stays accurate when
/// an addend is larger in magnitude than the running total, which is the
/// common case for the first few samples of an offset data set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompensatedSum<T> {
    sum: T,
    compensation: T,
}

impl<T: Sample> CompensatedSum<T> {
    /// An empty sum.
    pub fn new() -> Self {
        Self {
            sum: T::zero(),
            compensation: T::zero(),
        }
    }

    /// Add one term.
    #[inline]
    pub fn add(&mut self, x: T) {
        let t = self.sum + x;
        if self.sum.abs() >= x.abs() {
            self.compensation = self.compensation + ((self.sum - t) + x);
        } else {
            self.compensation = self.compensation + ((x - t) + self.sum);
        }
        self.sum = t;
    }

    /// The compensated total.
    pub fn value(&self) -> T {
        self.sum + self.compensation
    }
}

impl<T: Sample> Default for CompensatedSum<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Sample> Extend<T> for CompensatedSum<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for x in iter {
            self.add(x);
        }
    }
}

impl<T: Sample> FromIterator<T> for CompensatedSum<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut acc = Self::new();
        acc.extend(iter);
        acc
    }
}

/// Running totals of `d = x - shift` over a sample set.
///
/// The simple single-pass algorithm is the special case `shift = 0`.
/// Partial totals from independent lanes combine with [`merge`](Self::merge).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShiftedSums<T> {
    /// Σd.
    pub sum: T,
    /// Σd².
    pub sum_sq: T,
    /// Number of samples accumulated.
    pub count: usize,
}

impl<T: Sample> ShiftedSums<T> {
    /// Totals over zero samples.
    pub fn new() -> Self {
        Self {
            sum: T::zero(),
            sum_sq: T::zero(),
            count: 0,
        }
    }

    /// Accumulate one already-shifted deviation.
    #[inline]
    pub fn push(&mut self, d: T) {
        self.sum = self.sum + d;
        self.sum_sq = self.sum_sq + d * d;
        self.count += 1;
    }

    /// Combine totals from a disjoint part of the same sample set.
    pub fn merge(self, other: Self) -> Self {
        Self {
            sum: self.sum + other.sum,
            sum_sq: self.sum_sq + other.sum_sq,
            count: self.count + other.count,
        }
    }

    /// `Σd² − (Σd)²/n`, the centred sum of squares. NaN when `n == 0`.
    fn centred_sum_sq(&self) -> T {
        if self.count == 0 {
            return T::nan();
        }
        let n = T::from_count(self.count);
        self.sum_sq - self.sum * self.sum / n
    }

    /// Bessel-corrected variance `(Σd² − (Σd)²/n) / (n − 1)`.
    ///
    /// NaN for fewer than two samples.
    pub fn unbiased_variance(&self) -> T {
        if self.count < 2 {
            return T::nan();
        }
        let n = T::from_count(self.count);
        self.centred_sum_sq() / (n - T::one())
    }

    /// Population variance `(Σd² − (Σd)²/n) / n`. NaN for zero samples.
    pub fn biased_variance(&self) -> T {
        if self.count == 0 {
            return T::nan();
        }
        self.centred_sum_sq() / T::from_count(self.count)
    }
}

impl<T: Sample> Default for ShiftedSums<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Divide a centred sum of squares by `n − 1`; NaN below two samples.
///
/// Used by the two-pass kernels, which accumulate `Σ(x − mean)²` directly.
pub fn bessel<T: Sample>(centred_sum_sq: T, count: usize) -> T {
    if count < 2 {
        return T::nan();
    }
    centred_sum_sq / (T::from_count(count) - T::one())
}
