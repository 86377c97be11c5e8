//! Deterministic sample sets.
//!
//! - [`offset_fixture`]: four small values on top of a large offset,
//!   replicated so that float32 single-pass variance falls apart.
//! - [`offset_blocks`]: a pattern in equal contiguous blocks on an offset.
//! - [`benign_pattern`]: small integers whose sums are exact in float32.
//! - [`constant`]: every sample equal.

use num_traits::cast;
use varstab_core::Sample;

/// Offset added to every [`offset_fixture`] sample. Just below 2^24, so
/// float32 still represents each sample exactly while its square does not.
pub const OFFSET: f64 = 16_777_200.0;

/// The four base values of [`offset_fixture`] before the offset.
pub const OFFSET_BASE: [f64; 4] = [4.0, 7.0, 13.0, 16.0];

/// Sample count the harness and the integration tests use.
pub const OFFSET_FIXTURE_LEN: usize = 65_536;

/// Exact unbiased variance of `offset_fixture(OFFSET_FIXTURE_LEN)`.
///
/// Sample `i ≥ 4` copies sample `i >> 2`, so the set holds one `4` and
/// 21845 each of `7`, `13` and `16` (plus the offset). Computed in exact
/// arithmetic this is `14.0009765625`.
pub const OFFSET_FIXTURE_VARIANCE: f64 = 14.0009765625;

fn lift<T: Sample>(x: f64) -> T {
    cast(x).unwrap_or_else(T::nan)
}

/// The large-offset fixture: samples `0..4` are `OFFSET_BASE + OFFSET`,
/// and sample `i ≥ 4` repeats sample `i >> 2`.
pub fn offset_fixture<T: Sample>(n: usize) -> Vec<T> {
    let mut v: Vec<T> = Vec::with_capacity(n);
    for i in 0..n {
        let x = if i < OFFSET_BASE.len() {
            lift(OFFSET_BASE[i] + OFFSET)
        } else {
            v[i >> 2]
        };
        v.push(x);
    }
    v
}

/// `pattern` laid out in equal contiguous blocks across `n` samples,
/// each shifted by `offset`.
///
/// When `n` is a multiple of `pattern.len()` every value appears exactly
/// `n / pattern.len()` times.
pub fn offset_blocks<T: Sample>(n: usize, offset: f64, pattern: &[f64]) -> Vec<T> {
    if pattern.is_empty() {
        return Vec::new();
    }
    (0..n)
        .map(|i| lift(pattern[i * pattern.len() / n] + offset))
        .collect()
}

/// `((i·37) mod 101) − 50`: integers in `[-50, 50]`, exact in both widths.
pub fn benign_pattern<T: Sample>(n: usize) -> Vec<T> {
    (0..n)
        .map(|i| lift(((i * 37) % 101) as f64 - 50.0))
        .collect()
}

/// `n` copies of `c`.
pub fn constant<T: Sample>(n: usize, c: f64) -> Vec<T> {
    vec![lift(c); n]
}
