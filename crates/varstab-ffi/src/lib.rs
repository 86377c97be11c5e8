//! C FFI bindings for the varstab variance engine.
//!
//! Exposes a C-compatible API over [`VarianceEngine`](varstab_engine::VarianceEngine).
//! Engines are addressed by opaque `u64` handles; every function returns
//! an `i32` [`VarstabStatus`] and writes results through out-pointers.
//! This is the only crate in the workspace that contains `unsafe` code.
//!
//! # Buffer pointers
//!
//! [`varstab_buffer32`] and [`varstab_buffer64`] hand out raw base
//! pointers into engine-owned storage so callers can write samples in
//! place. A pointer is valid until the next resize of the same buffer or
//! until the engine is destroyed. The generation returned alongside it
//! can be checked with [`varstab_handle_is_current`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

/// Run an FFI body, converting a caught panic into `Panicked`.
///
/// `return` inside the body returns from the guarded closure, so early
/// exits yield their status code as usual.
macro_rules! ffi_guard {
    ($body:block) => {
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| -> i32 { $body })) {
            Ok(status) => status,
            Err(_) => {
                log::error!("panic caught at FFI boundary");
                $crate::status::VarstabStatus::Panicked as i32
            }
        }
    };
}

/// Lock a mutex or return `InternalError` from the enclosing guarded body.
macro_rules! ffi_lock {
    ($mutex:expr) => {
        match $mutex.lock() {
            Ok(guard) => guard,
            Err(_) => return $crate::status::VarstabStatus::InternalError as i32,
        }
    };
}

pub mod engine;
mod handle;
pub mod status;
pub mod variance;

pub use engine::{
    varstab_buffer32, varstab_buffer64, varstab_engine_create, varstab_engine_destroy,
    varstab_handle_is_current, varstab_resize32, varstab_resize64,
};
pub use status::VarstabStatus;
pub use variance::{
    varstab_mean32, varstab_mean64, varstab_var32_shift_unbiased,
    varstab_var32_shift_unbiased_simd, varstab_var32_simple, varstab_var32_simple_unbiased,
    varstab_var32_two_pass_mixed, varstab_var32_two_pass_unbiased,
    varstab_var64_two_pass_unbiased,
};
