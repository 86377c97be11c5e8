//! Side-by-side results of every algorithm over the current buffers.

use std::fmt;

use crate::algorithm::Algorithm;

/// One algorithm's result.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReportEntry {
    /// The algorithm evaluated.
    pub algorithm: Algorithm,
    /// Its variance estimate, widened to `f64`.
    pub value: f64,
}

/// Every algorithm's result over one state of the buffers.
///
/// Produced by [`VarianceEngine::report`](crate::VarianceEngine::report).
/// Relative errors are measured against
/// [`Algorithm::TwoPassUnbiased64`].
#[derive(Clone, Debug, PartialEq)]
pub struct VarianceReport {
    /// Length of the `f32` buffer at evaluation time.
    pub len32: usize,
    /// Length of the `f64` buffer at evaluation time.
    pub len64: usize,
    /// Shift passed to the shift-based algorithms.
    pub shift: f64,
    entries: Vec<ReportEntry>,
}

impl VarianceReport {
    pub(crate) fn new(len32: usize, len64: usize, shift: f64, entries: Vec<ReportEntry>) -> Self {
        Self {
            len32,
            len64,
            shift,
            entries,
        }
    }

    /// All results, in [`Algorithm::ALL`] order.
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// The result of one algorithm.
    pub fn get(&self, algorithm: Algorithm) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.algorithm == algorithm)
            .map(|e| e.value)
    }

    /// The full 64-bit two-pass result.
    pub fn reference(&self) -> Option<f64> {
        self.get(Algorithm::TwoPassUnbiased64)
    }

    /// `|value − reference| / |reference|` for one algorithm.
    pub fn relative_error(&self, algorithm: Algorithm) -> Option<f64> {
        let reference = self.reference()?;
        let value = self.get(algorithm)?;
        Some((value - reference).abs() / reference.abs())
    }
}

impl fmt::Display for VarianceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "n32={} n64={} shift={}",
            self.len32, self.len64, self.shift
        )?;
        for entry in &self.entries {
            write!(
                f,
                "{:<28} {} {:>20.10}",
                entry.algorithm.name(),
                entry.algorithm.precision(),
                entry.value
            )?;
            match self.relative_error(entry.algorithm) {
                Some(err) if entry.algorithm != Algorithm::TwoPassUnbiased64 => {
                    writeln!(f, "  rel err {err:.3e}")?
                }
                _ => writeln!(f)?,
            }
        }
        Ok(())
    }
}
