//! The process-wide registry and handle conversions.
//!
//! C callers see handles as `int64_t`. Valid handles are the registry's
//! `u32` indices; anything negative or wider is rejected before lookup.

use std::ffi::{c_char, CStr};

use heat_core::{HeatError, ProblemHandle, RunHandle, SolutionHandle};
use heat_engine::Registry;

use crate::status::HeatStatus;

static REGISTRY: Registry = Registry::new();

pub(crate) fn registry() -> &'static Registry {
    &REGISTRY
}

pub(crate) fn index(raw: i64) -> Result<u32, HeatStatus> {
    u32::try_from(raw).map_err(|_| HeatStatus::InvalidHandle)
}

pub(crate) fn problem(raw: i64) -> Result<ProblemHandle, HeatStatus> {
    index(raw).map(ProblemHandle)
}

pub(crate) fn solution(raw: i64) -> Result<SolutionHandle, HeatStatus> {
    index(raw).map(SolutionHandle)
}

pub(crate) fn run(raw: i64) -> Result<RunHandle, HeatStatus> {
    index(raw).map(RunHandle)
}

/// Borrow a NUL-terminated UTF-8 string from C.
///
/// # Safety
///
/// `ptr` must be null or point to a NUL-terminated string that outlives
/// the returned borrow.
#[allow(unsafe_code)]
pub(crate) unsafe fn c_str<'a>(ptr: *const c_char) -> Result<&'a str, HeatStatus> {
    if ptr.is_null() {
        return Err(HeatStatus::InvalidArgument);
    }
    // SAFETY: non-null and NUL-terminated per caller contract.
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .map_err(|_| HeatStatus::InvalidArgument)
}

/// Collapse a registry result for a handle-returning function.
pub(crate) fn issue(result: Result<u32, HeatError>) -> i64 {
    match result {
        Ok(index) => i64::from(index),
        Err(e) => HeatStatus::from(&e).code(),
    }
}

/// Collapse a registry result for a status-returning function.
pub(crate) fn status(result: Result<(), HeatError>) -> i32 {
    match result {
        Ok(()) => HeatStatus::Ok.code(),
        Err(e) => HeatStatus::from(&e).code(),
    }
}
