//! Benchmark profiles and utilities for the varstab engine.
//!
//! - [`offset_profile`]: both buffers loaded with the large-offset fixture
//! - [`benign_profile`]: both buffers loaded with small exact integers
//! - [`time_repeated`]: wall-clock timing of repeated evaluations
//! - [`init_logging`]: stderr logging for the harness

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::time::{Duration, Instant};

use flexi_logger::{FlexiLoggerError, Logger, LoggerHandle};
use varstab_engine::{Algorithm, EngineError, VarianceEngine};
use varstab_test_utils::{benign_pattern, offset_fixture};

/// Repetitions the harness times per algorithm.
pub const HARNESS_REPETITIONS: usize = 16_384;

/// Resize both buffers to `v32.len()` / `v64.len()` and write the samples
/// through freshly acquired handles.
pub fn load(engine: &mut VarianceEngine, v32: &[f32], v64: &[f64]) -> Result<(), EngineError> {
    let h32 = engine.resize32(v32.len() as i64)?;
    engine.view32_mut(&h32)?.copy_from_slice(v32);
    let h64 = engine.resize64(v64.len() as i64)?;
    engine.view64_mut(&h64)?.copy_from_slice(v64);
    Ok(())
}

/// An engine holding `offset_fixture(n)` in both buffers.
pub fn offset_profile(n: usize) -> Result<VarianceEngine, EngineError> {
    let mut engine = VarianceEngine::default();
    load(&mut engine, &offset_fixture(n), &offset_fixture(n))?;
    Ok(engine)
}

/// An engine holding `benign_pattern(n)` in both buffers.
pub fn benign_profile(n: usize) -> Result<VarianceEngine, EngineError> {
    let mut engine = VarianceEngine::default();
    load(&mut engine, &benign_pattern(n), &benign_pattern(n))?;
    Ok(engine)
}

/// Evaluate `algorithm` `repetitions` times and return the elapsed time
/// with the last result.
pub fn time_repeated(
    engine: &VarianceEngine,
    algorithm: Algorithm,
    shift: Option<f64>,
    repetitions: usize,
) -> Result<(Duration, f64), EngineError> {
    let start = Instant::now();
    let mut last = f64::NAN;
    for _ in 0..repetitions {
        last = std::hint::black_box(engine.evaluate(algorithm, shift)?);
    }
    Ok((start.elapsed(), last))
}

/// Log to stderr at `default_spec` unless `RUST_LOG` says otherwise.
///
/// Keep the returned handle alive for as long as logging is wanted.
pub fn init_logging(default_spec: &str) -> Result<LoggerHandle, FlexiLoggerError> {
    Logger::try_with_env_or_str(default_spec)?
        .log_to_stderr()
        .start()
}
