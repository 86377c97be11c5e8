//! Test utilities for varstab development.
//!
//! Deterministic sample generators in [`fixtures`] and the relative-error
//! comparisons the kernel and engine tests share. Everything here is
//! generic over [`Sample`] so one fixture definition serves both widths.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{
    benign_pattern, constant, offset_blocks, offset_fixture, OFFSET, OFFSET_BASE,
    OFFSET_FIXTURE_LEN, OFFSET_FIXTURE_VARIANCE,
};

use varstab_core::Sample;

/// `|got − expected| / |expected|`, or the absolute error when
/// `expected` is zero. NaN in either argument yields `f64::INFINITY` so a
/// `< tol` assertion always fails on it.
pub fn rel_err(got: f64, expected: f64) -> f64 {
    if got.is_nan() || expected.is_nan() {
        return f64::INFINITY;
    }
    let diff = (got - expected).abs();
    if expected == 0.0 {
        diff
    } else {
        diff / expected.abs()
    }
}

/// Widen any sample to `f64` for comparison.
pub fn widen<T: Sample>(x: T) -> f64 {
    x.to_f64().unwrap_or(f64::NAN)
}

/// Panics unless `got` is within `tol` relative error of `expected`.
#[track_caller]
pub fn assert_close<T: Sample>(got: T, expected: f64, tol: f64) {
    let got = widen(got);
    let err = rel_err(got, expected);
    assert!(
        err <= tol,
        "expected {expected} within relative {tol}, got {got} (error {err:e})"
    );
}
