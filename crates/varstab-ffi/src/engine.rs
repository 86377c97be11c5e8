//! Engine lifecycle and buffer access FFI: create, destroy, resize,
//! buffer pointers, handle currency.
//!
//! Engines live behind per-engine `Arc<Mutex<VarianceEngine>>` so the
//! global `ENGINES` table lock is only held for the handle lookup.
//! Different engines can be driven from different threads concurrently.

use std::sync::{Arc, Mutex};

use varstab_core::Precision;
use varstab_engine::{EngineConfig, EngineError, VarianceEngine};

use crate::handle::HandleTable;
use crate::status::VarstabStatus;

pub(crate) type EngineArc = Arc<Mutex<VarianceEngine>>;

static ENGINES: Mutex<HandleTable<EngineArc>> = Mutex::new(HandleTable::new());

/// Clone the Arc for an engine handle, briefly locking the global table.
///
/// Returns `None` if the handle is invalid or the mutex is poisoned.
pub(crate) fn get_engine(handle: u64) -> Option<EngineArc> {
    ENGINES.lock().ok()?.get(handle).cloned()
}

/// Create an engine with the default configuration.
///
/// Writes the new handle to `engine_out`. Both buffers start unallocated.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn varstab_engine_create(engine_out: *mut u64) -> i32 {
    ffi_guard!({
        if engine_out.is_null() {
            return VarstabStatus::InvalidArgument as i32;
        }
        let engine = match VarianceEngine::new(EngineConfig::default()) {
            Ok(e) => e,
            Err(e) => return VarstabStatus::from(&e) as i32,
        };
        let handle = ffi_lock!(ENGINES).insert(Arc::new(Mutex::new(engine)));
        // SAFETY: engine_out is non-null and valid per caller contract.
        unsafe { *engine_out = handle };
        VarstabStatus::Ok as i32
    })
}

/// Destroy an engine, releasing both buffers.
///
/// Every pointer obtained from [`varstab_buffer32`] / [`varstab_buffer64`]
/// for this engine dangles afterwards.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn varstab_engine_destroy(engine: u64) -> i32 {
    ffi_guard!({
        match ffi_lock!(ENGINES).remove(engine) {
            Some(_) => VarstabStatus::Ok as i32,
            None => VarstabStatus::InvalidHandle as i32,
        }
    })
}

/// Resize the `f32` buffer to `n` elements.
///
/// Writes the new length to `len_out` when it is non-null. On failure the
/// buffer is unchanged.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn varstab_resize32(engine: u64, n: i64, len_out: *mut usize) -> i32 {
    ffi_guard!({
        let arc = match get_engine(engine) {
            Some(arc) => arc,
            None => return VarstabStatus::InvalidHandle as i32,
        };
        let result = ffi_lock!(arc).resize32(n).map(|h| h.len());
        finish_resize(result, len_out)
    })
}

/// Resize the `f64` buffer to `n` elements. See [`varstab_resize32`].
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn varstab_resize64(engine: u64, n: i64, len_out: *mut usize) -> i32 {
    ffi_guard!({
        let arc = match get_engine(engine) {
            Some(arc) => arc,
            None => return VarstabStatus::InvalidHandle as i32,
        };
        let result = ffi_lock!(arc).resize64(n).map(|h| h.len());
        finish_resize(result, len_out)
    })
}

#[allow(unsafe_code)]
fn finish_resize(result: Result<usize, EngineError>, len_out: *mut usize) -> i32 {
    match result {
        Ok(len) => {
            if !len_out.is_null() {
                // SAFETY: len_out is non-null and valid per caller contract.
                unsafe { *len_out = len };
            }
            VarstabStatus::Ok as i32
        }
        Err(e) => VarstabStatus::from(&e) as i32,
    }
}

/// Base pointer, length and generation of the `f32` buffer.
///
/// `ptr_out` is required; `len_out` and `generation_out` may be null.
/// The pointer addresses exactly `len` writable elements until the next
/// `f32` resize or until the engine is destroyed.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn varstab_buffer32(
    engine: u64,
    ptr_out: *mut *mut f32,
    len_out: *mut usize,
    generation_out: *mut u64,
) -> i32 {
    ffi_guard!({
        if ptr_out.is_null() {
            return VarstabStatus::InvalidArgument as i32;
        }
        let arc = match get_engine(engine) {
            Some(arc) => arc,
            None => return VarstabStatus::InvalidHandle as i32,
        };
        let parts = ffi_lock!(arc).raw_parts32();
        write_parts(parts, ptr_out, len_out, generation_out)
    })
}

/// Base pointer, length and generation of the `f64` buffer.
/// See [`varstab_buffer32`].
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn varstab_buffer64(
    engine: u64,
    ptr_out: *mut *mut f64,
    len_out: *mut usize,
    generation_out: *mut u64,
) -> i32 {
    ffi_guard!({
        if ptr_out.is_null() {
            return VarstabStatus::InvalidArgument as i32;
        }
        let arc = match get_engine(engine) {
            Some(arc) => arc,
            None => return VarstabStatus::InvalidHandle as i32,
        };
        let parts = ffi_lock!(arc).raw_parts64();
        write_parts(parts, ptr_out, len_out, generation_out)
    })
}

#[allow(unsafe_code)]
fn write_parts<T>(
    parts: Result<(*mut T, usize, u64), EngineError>,
    ptr_out: *mut *mut T,
    len_out: *mut usize,
    generation_out: *mut u64,
) -> i32 {
    let (ptr, len, generation) = match parts {
        Ok(p) => p,
        Err(e) => return VarstabStatus::from(&e) as i32,
    };
    // SAFETY: ptr_out was checked non-null by the caller; the optional
    // pointers are checked here. All are valid per caller contract.
    unsafe {
        *ptr_out = ptr;
        if !len_out.is_null() {
            *len_out = len;
        }
        if !generation_out.is_null() {
            *generation_out = generation;
        }
    }
    VarstabStatus::Ok as i32
}

/// Whether `generation` is still the current generation of one buffer.
///
/// `precision` is `32` or `64`. Writes 1 (current) or 0 (stale, or the
/// buffer was never resized) to `out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn varstab_handle_is_current(
    engine: u64,
    precision: i32,
    generation: u64,
    out: *mut u8,
) -> i32 {
    ffi_guard!({
        if out.is_null() {
            return VarstabStatus::InvalidArgument as i32;
        }
        let precision = match precision {
            32 => Precision::Single,
            64 => Precision::Double,
            _ => return VarstabStatus::InvalidArgument as i32,
        };
        let arc = match get_engine(engine) {
            Some(arc) => arc,
            None => return VarstabStatus::InvalidHandle as i32,
        };
        let current = ffi_lock!(arc).generation(precision);
        let is_current = generation != 0 && generation == current;
        // SAFETY: out is non-null and valid per caller contract.
        unsafe { *out = u8::from(is_current) };
        VarstabStatus::Ok as i32
    })
}

#[cfg(test)]
#[allow(unsafe_code)]
mod tests {
    use super::*;

    fn create() -> u64 {
        let mut h = 0u64;
        assert_eq!(varstab_engine_create(&mut h), VarstabStatus::Ok as i32);
        h
    }

    #[test]
    fn create_and_destroy() {
        let h = create();
        assert_eq!(varstab_engine_destroy(h), VarstabStatus::Ok as i32);
        assert_eq!(varstab_engine_destroy(h), VarstabStatus::InvalidHandle as i32);
        assert_eq!(
            varstab_resize32(h, 4, std::ptr::null_mut()),
            VarstabStatus::InvalidHandle as i32
        );
    }

    #[test]
    fn null_out_pointers_rejected() {
        assert_eq!(
            varstab_engine_create(std::ptr::null_mut()),
            VarstabStatus::InvalidArgument as i32
        );
        let h = create();
        assert_eq!(
            varstab_buffer32(
                h,
                std::ptr::null_mut(),
                std::ptr::null_mut(),
                std::ptr::null_mut()
            ),
            VarstabStatus::InvalidArgument as i32
        );
        varstab_engine_destroy(h);
    }

    #[test]
    fn resize_reports_length_and_errors() {
        let h = create();
        let mut len = 0usize;
        assert_eq!(varstab_resize64(h, 12, &mut len), VarstabStatus::Ok as i32);
        assert_eq!(len, 12);
        assert_eq!(
            varstab_resize64(h, -1, &mut len),
            VarstabStatus::InvalidArgument as i32
        );
        assert_eq!(
            varstab_resize32(h, i64::MAX, &mut len),
            VarstabStatus::OutOfMemory as i32
        );
        assert_eq!(len, 12);
        varstab_engine_destroy(h);
    }

    #[test]
    fn buffer_before_resize_is_invalid_state() {
        let h = create();
        let mut ptr: *mut f64 = std::ptr::null_mut();
        assert_eq!(
            varstab_buffer64(h, &mut ptr, std::ptr::null_mut(), std::ptr::null_mut()),
            VarstabStatus::InvalidState as i32
        );
        assert!(ptr.is_null());
        varstab_engine_destroy(h);
    }

    #[test]
    fn buffer_pointer_is_writable_and_generation_tracks_resize() {
        let h = create();
        varstab_resize32(h, 4, std::ptr::null_mut());
        let mut ptr: *mut f32 = std::ptr::null_mut();
        let mut len = 0usize;
        let mut generation = 0u64;
        assert_eq!(
            varstab_buffer32(h, &mut ptr, &mut len, &mut generation),
            VarstabStatus::Ok as i32
        );
        assert_eq!(len, 4);
        // SAFETY: ptr addresses `len` elements until the next resize.
        let samples = unsafe { std::slice::from_raw_parts_mut(ptr, len) };
        samples.copy_from_slice(&[1.0, 2.0, 3.0, 4.0]);

        let mut current = 0u8;
        assert_eq!(
            varstab_handle_is_current(h, 32, generation, &mut current),
            VarstabStatus::Ok as i32
        );
        assert_eq!(current, 1);

        varstab_resize32(h, 8, std::ptr::null_mut());
        varstab_handle_is_current(h, 32, generation, &mut current);
        assert_eq!(current, 0);

        let arc = get_engine(h).unwrap();
        let engine = arc.lock().unwrap();
        let view = engine.view32(&engine.handle32().unwrap()).unwrap();
        assert_eq!(view, &[1.0, 2.0, 3.0, 4.0, 0.0, 0.0, 0.0, 0.0]);
        drop(engine);
        varstab_engine_destroy(h);
    }

    #[test]
    fn handle_is_current_validates_precision() {
        let h = create();
        let mut out = 9u8;
        assert_eq!(
            varstab_handle_is_current(h, 16, 1, &mut out),
            VarstabStatus::InvalidArgument as i32
        );
        assert_eq!(
            varstab_handle_is_current(h, 64, 0, &mut out),
            VarstabStatus::Ok as i32
        );
        assert_eq!(out, 0);
        varstab_engine_destroy(h);
    }
}
