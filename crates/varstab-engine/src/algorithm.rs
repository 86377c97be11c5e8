//! The catalogue of variance algorithms an engine can evaluate.

use std::fmt;

use varstab_core::Precision;

/// One of the engine's variance algorithms.
///
/// Every algorithm except [`Simple`](Self::Simple) applies Bessel's
/// correction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Single-pass over the `f32` buffer, divisor `n`.
    Simple,
    /// Single-pass over the `f32` buffer, divisor `n − 1`.
    SimpleUnbiased,
    /// Two-pass over the `f32` buffer at `f32` accumulation.
    TwoPassUnbiased,
    /// Two-pass over the `f32` buffer at `f64` accumulation, narrowed to `f32`.
    TwoPassMixedPrecision,
    /// Two-pass over the `f64` buffer. The reference.
    TwoPassUnbiased64,
    /// Shift-based over the `f32` buffer, scalar accumulation.
    ShiftUnbiased,
    /// Shift-based over the `f32` buffer, lane-parallel accumulation.
    ShiftUnbiasedVectorized,
}

impl Algorithm {
    /// Every algorithm, in report order.
    pub const ALL: [Algorithm; 7] = [
        Algorithm::Simple,
        Algorithm::SimpleUnbiased,
        Algorithm::TwoPassUnbiased,
        Algorithm::TwoPassMixedPrecision,
        Algorithm::TwoPassUnbiased64,
        Algorithm::ShiftUnbiased,
        Algorithm::ShiftUnbiasedVectorized,
    ];

    /// Stable identifier used in logs and reports.
    pub fn name(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::SimpleUnbiased => "simple_unbiased",
            Self::TwoPassUnbiased => "two_pass_unbiased",
            Self::TwoPassMixedPrecision => "two_pass_mixed_precision",
            Self::TwoPassUnbiased64 => "two_pass_unbiased64",
            Self::ShiftUnbiased => "shift_unbiased",
            Self::ShiftUnbiasedVectorized => "shift_unbiased_vectorized",
        }
    }

    /// Look an algorithm up by [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }

    /// The buffer the algorithm reads.
    pub fn precision(self) -> Precision {
        match self {
            Self::TwoPassUnbiased64 => Precision::Double,
            _ => Precision::Single,
        }
    }

    /// Whether the algorithm takes a shift.
    pub fn uses_shift(self) -> bool {
        matches!(self, Self::ShiftUnbiased | Self::ShiftUnbiasedVectorized)
    }

    /// Whether the algorithm keeps its accuracy when every sample carries
    /// a large common offset. Shift-based algorithms count as stable; they
    /// are when the shift lies near the data.
    pub fn is_offset_stable(self) -> bool {
        !matches!(self, Self::Simple | Self::SimpleUnbiased)
    }

    /// Whether the result is the unbiased (Bessel-corrected) estimate.
    pub fn is_unbiased(self) -> bool {
        !matches!(self, Self::Simple)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
