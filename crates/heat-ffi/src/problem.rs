//! Problem lifecycle FFI.

use std::ffi::c_char;

use crate::handle::{self, c_str, registry};
use crate::status::HeatStatus;

/// Create a problem on `[0, lenx]` with diffusivity `alpha`, end values
/// `bc0`/`bc1` and initial condition `ic` (e.g. `"spikes(0,100,50)"`).
///
/// Returns the problem handle, or a negative [`HeatStatus`].
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn heat_init_problem(
    lenx: f64,
    alpha: f64,
    bc0: f64,
    bc1: f64,
    ic: *const c_char,
) -> i64 {
    ffi_guard!({
        // SAFETY: ic is a NUL-terminated string per caller contract.
        let ic = match unsafe { c_str(ic) } {
            Ok(s) => s,
            Err(status) => return status.code(),
        };
        handle::issue(
            registry()
                .init_problem(lenx, alpha, bc0, bc1, ic)
                .map(|h| h.0),
        )
    })
}

/// Destroy a problem. Solutions built from it stay valid.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn heat_problem_destroy(problem: i64) -> i32 {
    ffi_guard!({
        match handle::problem(problem) {
            Ok(h) => handle::status(registry().discard_problem(h)),
            Err(status) => status.code(),
        }
    })
}
