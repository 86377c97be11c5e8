//! Variance and mean FFI.
//!
//! Each function evaluates one algorithm over the engine's current buffer
//! contents and writes the scalar to `out`. NaN and infinity are ordinary
//! results; the status is only non-zero when no result could be produced.

use varstab_engine::{EngineError, VarianceEngine};

use crate::engine::get_engine;
use crate::status::VarstabStatus;

/// Run `eval` against the engine behind `engine` and store its result.
#[allow(unsafe_code)]
fn evaluate_into<T>(
    engine: u64,
    out: *mut T,
    eval: impl FnOnce(&VarianceEngine) -> Result<T, EngineError>,
) -> i32 {
    ffi_guard!({
        if out.is_null() {
            return VarstabStatus::InvalidArgument as i32;
        }
        let arc = match get_engine(engine) {
            Some(arc) => arc,
            None => return VarstabStatus::InvalidHandle as i32,
        };
        let guard = ffi_lock!(arc);
        match eval(&*guard) {
            Ok(value) => {
                // SAFETY: out is non-null and valid per caller contract.
                unsafe { *out = value };
                VarstabStatus::Ok as i32
            }
            Err(e) => VarstabStatus::from(&e) as i32,
        }
    })
}

/// Population single-pass variance of the `f32` buffer.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn varstab_var32_simple(engine: u64, out: *mut f32) -> i32 {
    evaluate_into(engine, out, VarianceEngine::var_simple)
}

/// Unbiased single-pass variance of the `f32` buffer.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn varstab_var32_simple_unbiased(engine: u64, out: *mut f32) -> i32 {
    evaluate_into(engine, out, VarianceEngine::var_simple_unbiased)
}

/// Unbiased two-pass variance of the `f32` buffer.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn varstab_var32_two_pass_unbiased(engine: u64, out: *mut f32) -> i32 {
    evaluate_into(engine, out, VarianceEngine::var_two_pass_unbiased)
}

/// Unbiased two-pass variance of the `f32` buffer, accumulated in `f64`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn varstab_var32_two_pass_mixed(engine: u64, out: *mut f32) -> i32 {
    evaluate_into(engine, out, VarianceEngine::var_two_pass_mixed_precision)
}

/// Unbiased two-pass variance of the `f64` buffer.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn varstab_var64_two_pass_unbiased(engine: u64, out: *mut f64) -> i32 {
    evaluate_into(engine, out, VarianceEngine::var_two_pass_unbiased64)
}

/// Unbiased shift-based variance of the `f32` buffer, scalar path.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn varstab_var32_shift_unbiased(engine: u64, shift: f32, out: *mut f32) -> i32 {
    evaluate_into(engine, out, |e| e.var_shift_unbiased(shift))
}

/// Unbiased shift-based variance of the `f32` buffer, SIMD path.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn varstab_var32_shift_unbiased_simd(
    engine: u64,
    shift: f32,
    out: *mut f32,
) -> i32 {
    evaluate_into(engine, out, |e| e.var_shift_unbiased_vectorized(shift))
}

/// Mean of the `f32` buffer.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn varstab_mean32(engine: u64, out: *mut f32) -> i32 {
    evaluate_into(engine, out, VarianceEngine::mean32)
}

/// Mean of the `f64` buffer.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn varstab_mean64(engine: u64, out: *mut f64) -> i32 {
    evaluate_into(engine, out, VarianceEngine::mean64)
}

#[cfg(test)]
#[allow(unsafe_code)]
mod tests {
    use super::*;
    use crate::engine::{
        varstab_buffer32, varstab_buffer64, varstab_engine_create, varstab_engine_destroy,
        varstab_resize32, varstab_resize64,
    };
    use varstab_test_utils::{offset_fixture, rel_err, OFFSET_FIXTURE_LEN, OFFSET_FIXTURE_VARIANCE};

    /// Create an engine and fill both buffers through raw pointers, the
    /// way a C harness does.
    fn loaded(v32: &[f32], v64: &[f64]) -> u64 {
        let mut h = 0u64;
        assert_eq!(varstab_engine_create(&mut h), 0);
        assert_eq!(varstab_resize32(h, v32.len() as i64, std::ptr::null_mut()), 0);
        assert_eq!(varstab_resize64(h, v64.len() as i64, std::ptr::null_mut()), 0);

        let mut p32: *mut f32 = std::ptr::null_mut();
        let mut p64: *mut f64 = std::ptr::null_mut();
        let mut len = 0usize;
        assert_eq!(varstab_buffer32(h, &mut p32, &mut len, std::ptr::null_mut()), 0);
        assert_eq!(len, v32.len());
        // SAFETY: p32 addresses `len` elements until the next resize.
        unsafe { std::slice::from_raw_parts_mut(p32, len) }.copy_from_slice(v32);
        assert_eq!(varstab_buffer64(h, &mut p64, &mut len, std::ptr::null_mut()), 0);
        assert_eq!(len, v64.len());
        // SAFETY: as above.
        unsafe { std::slice::from_raw_parts_mut(p64, len) }.copy_from_slice(v64);
        h
    }

    #[test]
    fn offset_fixture_through_the_c_surface() {
        let v32: Vec<f32> = offset_fixture(OFFSET_FIXTURE_LEN);
        let v64: Vec<f64> = offset_fixture(OFFSET_FIXTURE_LEN);
        let h = loaded(&v32, &v64);

        let mut reference = 0.0f64;
        assert_eq!(varstab_var64_two_pass_unbiased(h, &mut reference), 0);
        assert!(rel_err(reference, OFFSET_FIXTURE_VARIANCE) < 1e-12);

        let mut naive = 0.0f32;
        assert_eq!(varstab_var32_simple_unbiased(h, &mut naive), 0);
        assert!(rel_err(naive as f64, reference) > 0.5);

        let shift = v32[0];
        let stable: [(&str, extern "C" fn(u64, *mut f32) -> i32); 2] = [
            ("two_pass", varstab_var32_two_pass_unbiased),
            ("mixed", varstab_var32_two_pass_mixed),
        ];
        for (name, f) in stable {
            let mut got = 0.0f32;
            assert_eq!(f(h, &mut got), 0, "{name}");
            assert!(rel_err(got as f64, reference) < 1e-3, "{name}: {got}");
        }
        let mut scalar = 0.0f32;
        let mut lanes = 0.0f32;
        assert_eq!(varstab_var32_shift_unbiased(h, shift, &mut scalar), 0);
        assert_eq!(varstab_var32_shift_unbiased_simd(h, shift, &mut lanes), 0);
        assert!(rel_err(scalar as f64, reference) < 1e-3);
        assert!(rel_err(lanes as f64, scalar as f64) < 1e-5);

        varstab_engine_destroy(h);
    }

    #[test]
    fn small_set_means_and_biased_variance() {
        let h = loaded(&[2.0, 4.0, 4.0, 6.0], &[2.0, 4.0, 4.0, 6.0]);
        let mut m32 = 0.0f32;
        let mut m64 = 0.0f64;
        let mut biased = 0.0f32;
        assert_eq!(varstab_mean32(h, &mut m32), 0);
        assert_eq!(varstab_mean64(h, &mut m64), 0);
        assert_eq!(varstab_var32_simple(h, &mut biased), 0);
        assert_eq!(m32, 4.0);
        assert_eq!(m64, 4.0);
        assert_eq!(biased, 2.0);
        varstab_engine_destroy(h);
    }

    #[test]
    fn degenerate_counts_are_ok_status_with_nan() {
        let h = loaded(&[1.0], &[]);
        let mut v32 = 0.0f32;
        let mut v64 = 0.0f64;
        assert_eq!(varstab_var32_two_pass_unbiased(h, &mut v32), 0);
        assert!(v32.is_nan());
        assert_eq!(varstab_var64_two_pass_unbiased(h, &mut v64), 0);
        assert!(v64.is_nan());
        varstab_engine_destroy(h);
    }

    #[test]
    fn errors_leave_out_untouched() {
        let mut h = 0u64;
        varstab_engine_create(&mut h);
        let mut out = -1.0f32;
        assert_eq!(
            varstab_var32_simple(h, &mut out),
            VarstabStatus::InvalidState as i32
        );
        assert_eq!(out, -1.0);
        assert_eq!(
            varstab_var32_simple(h, std::ptr::null_mut()),
            VarstabStatus::InvalidArgument as i32
        );
        varstab_engine_destroy(h);
        assert_eq!(
            varstab_var32_simple(h, &mut out),
            VarstabStatus::InvalidHandle as i32
        );
    }

    #[test]
    fn every_entry_point_rejects_a_destroyed_engine() {
        use crate::engine::varstab_handle_is_current;

        let h = loaded(&[1.0, 2.0], &[1.0, 2.0]);
        assert_eq!(varstab_engine_destroy(h), 0);
        let invalid = VarstabStatus::InvalidHandle as i32;

        let mut len = 0usize;
        let mut p32: *mut f32 = std::ptr::null_mut();
        let mut p64: *mut f64 = std::ptr::null_mut();
        let mut current = 0u8;
        assert_eq!(varstab_engine_destroy(h), invalid);
        assert_eq!(varstab_resize32(h, 4, &mut len), invalid);
        assert_eq!(varstab_resize64(h, 4, &mut len), invalid);
        assert_eq!(varstab_buffer32(h, &mut p32, &mut len, std::ptr::null_mut()), invalid);
        assert_eq!(varstab_buffer64(h, &mut p64, &mut len, std::ptr::null_mut()), invalid);
        assert_eq!(varstab_handle_is_current(h, 32, 1, &mut current), invalid);

        let single: [(&str, extern "C" fn(u64, *mut f32) -> i32); 5] = [
            ("simple", varstab_var32_simple),
            ("simple_unbiased", varstab_var32_simple_unbiased),
            ("two_pass", varstab_var32_two_pass_unbiased),
            ("mixed", varstab_var32_two_pass_mixed),
            ("mean32", varstab_mean32),
        ];
        for (name, f) in single {
            let mut out = 0.0f32;
            assert_eq!(f(h, &mut out), invalid, "{name}");
        }
        let shifted: [(&str, extern "C" fn(u64, f32, *mut f32) -> i32); 2] = [
            ("shift", varstab_var32_shift_unbiased),
            ("shift_simd", varstab_var32_shift_unbiased_simd),
        ];
        for (name, f) in shifted {
            let mut out = 0.0f32;
            assert_eq!(f(h, 1.0, &mut out), invalid, "{name}");
        }
        let double: [(&str, extern "C" fn(u64, *mut f64) -> i32); 2] = [
            ("two_pass64", varstab_var64_two_pass_unbiased),
            ("mean64", varstab_mean64),
        ];
        for (name, f) in double {
            let mut out = 0.0f64;
            assert_eq!(f(h, &mut out), invalid, "{name}");
        }
    }
}

