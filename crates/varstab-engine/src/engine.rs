//! The variance engine context.
//!
//! [`VarianceEngine`] owns one [`SampleStore`] and runs the kernels over
//! its current contents. Any number of engines may coexist; nothing is
//! process-global.
//!
//! # Ownership model
//!
//! Views returned by [`view32`](VarianceEngine::view32) and friends borrow
//! from the engine, so the borrow checker rules out resizing while a view
//! is alive. Handles are plain values and may be held across a resize;
//! resolving one afterwards fails with `StaleHandle`.

use log::{trace, warn};
use varstab_buffer::{BufferHandle, SampleStore, Stored};
use varstab_core::{checked_len, Precision, Sample};
use varstab_kernels as kernels;

use crate::algorithm::Algorithm;
use crate::config::{EngineConfig, ShiftChoice};
use crate::error::EngineError;
use crate::report::{ReportEntry, VarianceReport};

// Compile-time assertion: engines move between threads.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<VarianceEngine>();
    }
};

/// A variance engine: one `f32` buffer, one `f64` buffer, and the
/// algorithms that read them.
///
/// # Example
///
/// ```
/// use varstab_engine::{Algorithm, EngineConfig, VarianceEngine};
///
/// let mut engine = VarianceEngine::new(EngineConfig::default())?;
/// let h = engine.resize32(4)?;
/// engine.view32_mut(&h)?.copy_from_slice(&[2.0, 4.0, 4.0, 6.0]);
/// let v = engine.evaluate(Algorithm::TwoPassUnbiased, None)?;
/// assert!((v - 8.0 / 3.0).abs() < 1e-6);
/// # Ok::<(), varstab_engine::EngineError>(())
/// ```
pub struct VarianceEngine {
    config: EngineConfig,
    store: SampleStore,
}

impl VarianceEngine {
    /// Create an engine with both buffers unallocated.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let store = SampleStore::new(config.buffer_config());
        Ok(Self { config, store })
    }

    /// The engine's configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The underlying store.
    pub fn store(&self) -> &SampleStore {
        &self.store
    }

    // ── Buffer lifecycle ────────────────────────────────────────────

    /// Resize the `f32` buffer to `n` elements.
    ///
    /// Negative `n` fails with `InvalidArgument`; `n` above the configured
    /// limit, or an allocation the system refuses, fails with
    /// `OutOfMemory` and leaves the buffer as it was. Any earlier `f32`
    /// handle is stale afterwards.
    pub fn resize32(&mut self, n: i64) -> Result<BufferHandle<f32>, EngineError> {
        self.resize::<f32>(n)
    }

    /// Resize the `f64` buffer to `n` elements. See [`resize32`](Self::resize32).
    pub fn resize64(&mut self, n: i64) -> Result<BufferHandle<f64>, EngineError> {
        self.resize::<f64>(n)
    }

    fn resize<T: Stored>(&mut self, n: i64) -> Result<BufferHandle<T>, EngineError> {
        let len = checked_len(n).inspect_err(|e| warn!("{} buffer: {e}", T::PRECISION))?;
        Ok(self.store.resize::<T>(len)?)
    }

    /// The current `f32` handle. `InvalidState` before the first resize.
    pub fn handle32(&self) -> Result<BufferHandle<f32>, EngineError> {
        Ok(self.store.handle::<f32>()?)
    }

    /// The current `f64` handle. `InvalidState` before the first resize.
    pub fn handle64(&self) -> Result<BufferHandle<f64>, EngineError> {
        Ok(self.store.handle::<f64>()?)
    }

    /// Whether `handle` still addresses the current `f32` allocation.
    pub fn is_current32(&self, handle: &BufferHandle<f32>) -> bool {
        self.store.buffer::<f32>().is_current(handle)
    }

    /// Whether `handle` still addresses the current `f64` allocation.
    pub fn is_current64(&self, handle: &BufferHandle<f64>) -> bool {
        self.store.buffer::<f64>().is_current(handle)
    }

    /// Current generation of one buffer (0 = never resized).
    pub fn generation(&self, precision: Precision) -> u64 {
        match precision {
            Precision::Single => self.store.buffer::<f32>().generation(),
            Precision::Double => self.store.buffer::<f64>().generation(),
        }
    }

    /// Read the `f32` buffer through a handle.
    pub fn view32(&self, handle: &BufferHandle<f32>) -> Result<&[f32], EngineError> {
        Ok(self.store.view(handle)?)
    }

    /// Read the `f64` buffer through a handle.
    pub fn view64(&self, handle: &BufferHandle<f64>) -> Result<&[f64], EngineError> {
        Ok(self.store.view(handle)?)
    }

    /// Write into the `f32` buffer through a handle.
    pub fn view32_mut(&mut self, handle: &BufferHandle<f32>) -> Result<&mut [f32], EngineError> {
        Ok(self.store.view_mut(handle)?)
    }

    /// Write into the `f64` buffer through a handle.
    pub fn view64_mut(&mut self, handle: &BufferHandle<f64>) -> Result<&mut [f64], EngineError> {
        Ok(self.store.view_mut(handle)?)
    }

    /// Resize the `f32` buffer to `samples.len()` and copy `samples` in.
    pub fn write32(&mut self, samples: &[f32]) -> Result<BufferHandle<f32>, EngineError> {
        self.write(samples)
    }

    /// Resize the `f64` buffer to `samples.len()` and copy `samples` in.
    pub fn write64(&mut self, samples: &[f64]) -> Result<BufferHandle<f64>, EngineError> {
        self.write(samples)
    }

    fn write<T: Stored>(&mut self, samples: &[T]) -> Result<BufferHandle<T>, EngineError> {
        let handle = self.store.resize::<T>(samples.len())?;
        self.store.view_mut(&handle)?.copy_from_slice(samples);
        Ok(handle)
    }

    /// Base pointer, length and generation of the `f32` buffer.
    ///
    /// The pointer is valid for `len` elements until the next `f32`
    /// resize or until the engine is dropped.
    pub fn raw_parts32(&mut self) -> Result<(*mut f32, usize, u64), EngineError> {
        let buffer = self.store.buffer_mut::<f32>();
        let (ptr, len) = buffer.raw_parts_mut()?;
        Ok((ptr, len, buffer.generation()))
    }

    /// Base pointer, length and generation of the `f64` buffer.
    /// See [`raw_parts32`](Self::raw_parts32).
    pub fn raw_parts64(&mut self) -> Result<(*mut f64, usize, u64), EngineError> {
        let buffer = self.store.buffer_mut::<f64>();
        let (ptr, len) = buffer.raw_parts_mut()?;
        Ok((ptr, len, buffer.generation()))
    }

    // ── Algorithms ──────────────────────────────────────────────────

    fn samples32(&self) -> Result<&[f32], EngineError> {
        Ok(self.store.contents::<f32>()?)
    }

    fn samples64(&self) -> Result<&[f64], EngineError> {
        Ok(self.store.contents::<f64>()?)
    }

    /// Biased single-pass variance of the `f32` buffer.
    pub fn var_simple(&self) -> Result<f32, EngineError> {
        let v = self.samples32()?;
        Ok(traced(Algorithm::Simple, v.len(), kernels::variance_simple(v)))
    }

    /// Unbiased single-pass variance of the `f32` buffer.
    pub fn var_simple_unbiased(&self) -> Result<f32, EngineError> {
        let v = self.samples32()?;
        Ok(traced(
            Algorithm::SimpleUnbiased,
            v.len(),
            kernels::variance_simple_unbiased(v),
        ))
    }

    /// Unbiased two-pass variance of the `f32` buffer at `f32` accumulation.
    pub fn var_two_pass_unbiased(&self) -> Result<f32, EngineError> {
        let v = self.samples32()?;
        Ok(traced(
            Algorithm::TwoPassUnbiased,
            v.len(),
            kernels::variance_two_pass_unbiased(v),
        ))
    }

    /// Unbiased two-pass variance of the `f32` buffer with `f64`
    /// accumulation, narrowed to `f32`.
    pub fn var_two_pass_mixed_precision(&self) -> Result<f32, EngineError> {
        let v = self.samples32()?;
        Ok(traced(
            Algorithm::TwoPassMixedPrecision,
            v.len(),
            kernels::variance_two_pass_unbiased_in::<f32, f64>(v),
        ))
    }

    /// Unbiased two-pass variance of the `f64` buffer.
    pub fn var_two_pass_unbiased64(&self) -> Result<f64, EngineError> {
        let v = self.samples64()?;
        Ok(traced(
            Algorithm::TwoPassUnbiased64,
            v.len(),
            kernels::variance_two_pass_unbiased(v),
        ))
    }

    /// Unbiased shift-based variance of the `f32` buffer, scalar path.
    pub fn var_shift_unbiased(&self, shift: f32) -> Result<f32, EngineError> {
        let v = self.samples32()?;
        Ok(traced(
            Algorithm::ShiftUnbiased,
            v.len(),
            kernels::variance_shift_unbiased(v, shift),
        ))
    }

    /// Unbiased shift-based variance of the `f32` buffer, SIMD path.
    pub fn var_shift_unbiased_vectorized(&self, shift: f32) -> Result<f32, EngineError> {
        let v = self.samples32()?;
        Ok(traced(
            Algorithm::ShiftUnbiasedVectorized,
            v.len(),
            kernels::variance_shift_unbiased_vectorized(v, shift),
        ))
    }

    /// Mean of the `f32` buffer at `f32` accumulation.
    pub fn mean32(&self) -> Result<f32, EngineError> {
        Ok(kernels::mean(self.samples32()?))
    }

    /// Mean of the `f64` buffer.
    pub fn mean64(&self) -> Result<f64, EngineError> {
        Ok(kernels::mean(self.samples64()?))
    }

    // ── Dispatch ────────────────────────────────────────────────────

    /// The shift a shift-based algorithm uses when none is supplied.
    pub fn default_shift(&self) -> Result<f64, EngineError> {
        match self.config.default_shift {
            ShiftChoice::Fixed(s) => Ok(s),
            ShiftChoice::FirstSample => {
                Ok(self.samples32()?.first().map_or(0.0, |&x| f64::from(x)))
            }
        }
    }

    /// Run one algorithm, widening its result to `f64`.
    ///
    /// `shift` is used by the shift-based algorithms (narrowed to `f32`)
    /// and ignored by the others; `None` falls back to the configured
    /// [`ShiftChoice`].
    pub fn evaluate(&self, algorithm: Algorithm, shift: Option<f64>) -> Result<f64, EngineError> {
        let shift = if algorithm.uses_shift() {
            let s = match shift {
                Some(s) => s,
                None => self.default_shift()?,
            };
            s as f32
        } else {
            0.0
        };
        Ok(match algorithm {
            Algorithm::Simple => f64::from(self.var_simple()?),
            Algorithm::SimpleUnbiased => f64::from(self.var_simple_unbiased()?),
            Algorithm::TwoPassUnbiased => f64::from(self.var_two_pass_unbiased()?),
            Algorithm::TwoPassMixedPrecision => f64::from(self.var_two_pass_mixed_precision()?),
            Algorithm::TwoPassUnbiased64 => self.var_two_pass_unbiased64()?,
            Algorithm::ShiftUnbiased => f64::from(self.var_shift_unbiased(shift)?),
            Algorithm::ShiftUnbiasedVectorized => {
                f64::from(self.var_shift_unbiased_vectorized(shift)?)
            }
        })
    }

    /// Run every algorithm with the default shift.
    ///
    /// Both buffers must be allocated.
    pub fn report(&self) -> Result<VarianceReport, EngineError> {
        let shift = f64::from(self.default_shift()? as f32);
        let entries = Algorithm::ALL
            .into_iter()
            .map(|algorithm| -> Result<ReportEntry, EngineError> {
                Ok(ReportEntry {
                    algorithm,
                    value: self.evaluate(algorithm, Some(shift))?,
                })
            })
            .collect::<Result<Vec<_>, EngineError>>()?;
        Ok(VarianceReport::new(
            self.samples32()?.len(),
            self.samples64()?.len(),
            shift,
            entries,
        ))
    }

    /// Bytes held by both buffers.
    pub fn memory_bytes(&self) -> usize {
        self.store.memory_bytes()
    }
}

impl Default for VarianceEngine {
    fn default() -> Self {
        let config = EngineConfig::default();
        let store = SampleStore::new(config.buffer_config());
        Self { config, store }
    }
}

fn traced<T: Sample>(algorithm: Algorithm, n: usize, value: T) -> T {
    trace!("{algorithm} over {n} {} samples = {value}", T::PRECISION);
    value
}
