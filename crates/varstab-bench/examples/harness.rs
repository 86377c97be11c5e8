//! Demonstration harness.
//!
//! Loads the large-offset fixture into both buffers, prints every
//! algorithm's estimate against the 64-bit reference, then times
//! repeated evaluations.
//!
//! Usage: `harness [ALGORITHM...]`. With no arguments every algorithm is
//! timed; otherwise only the named ones (e.g. `two_pass_mixed_precision`).

use std::error::Error;

use varstab_bench::{init_logging, load, time_repeated, HARNESS_REPETITIONS};
use varstab_engine::{Algorithm, VarianceEngine};
use varstab_test_utils::{offset_fixture, OFFSET_FIXTURE_LEN, OFFSET_FIXTURE_VARIANCE};

fn selected_algorithms() -> Result<Vec<Algorithm>, String> {
    let names: Vec<String> = std::env::args().skip(1).collect();
    if names.is_empty() {
        return Ok(Algorithm::ALL.to_vec());
    }
    names
        .iter()
        .map(|name| {
            Algorithm::from_name(name).ok_or_else(|| format!("unknown algorithm `{name}`"))
        })
        .collect()
}

fn main() -> Result<(), Box<dyn Error>> {
    let _logger = init_logging("info")?;
    let algorithms = selected_algorithms()?;
    println!("=== varstab harness ===\n");

    let mut engine = VarianceEngine::default();
    load(
        &mut engine,
        &offset_fixture::<f32>(OFFSET_FIXTURE_LEN),
        &offset_fixture::<f64>(OFFSET_FIXTURE_LEN),
    )?;
    log::info!(
        "loaded {OFFSET_FIXTURE_LEN} samples into {} and {}",
        engine.handle32()?,
        engine.handle64()?
    );

    println!("mean32 = {}", engine.mean32()?);
    println!("mean64 = {}", engine.mean64()?);
    println!("closed-form variance = {OFFSET_FIXTURE_VARIANCE}\n");

    let report = engine.report()?;
    println!("{report}");

    println!("timing {HARNESS_REPETITIONS} repetitions per algorithm:");
    let shift = Some(report.shift);
    for algorithm in algorithms {
        let (elapsed, value) = time_repeated(&engine, algorithm, shift, HARNESS_REPETITIONS)?;
        println!(
            "  {:<28} {:>10.3} ms  ({value})",
            algorithm.name(),
            elapsed.as_secs_f64() * 1e3,
        );
    }
    Ok(())
}
