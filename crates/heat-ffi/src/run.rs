//! Run execution and result retrieval FFI.
//!
//! A run executes to completion inside [`heat_run_simulation`]. Results
//! are then read one snapshot at a time into a caller buffer of at least
//! [`heat_run_grid_len`] doubles.

use std::ffi::c_char;
use std::path::PathBuf;
use std::sync::Arc;

use heat_engine::{RunOptions, Snapshot};

use crate::handle::{self, c_str, registry};
use crate::status::HeatStatus;

fn results(run: i64) -> Result<Arc<[Snapshot]>, HeatStatus> {
    let run = handle::run(run)?;
    registry().results(run).map_err(|e| HeatStatus::from(&e))
}

/// Run a solution to completion.
///
/// A snapshot is kept every `output_interval` steps (0: only the first and
/// last). With `save_interval > 0` curve files are written to
/// `./<run_name>/`, with a checkpoint every `save_interval` steps.
///
/// Returns the run handle, or a negative [`HeatStatus`]; a run that
/// diverges or fails to write is not kept.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn heat_run_simulation(
    solution: i64,
    run_name: *const c_char,
    output_interval: i64,
    save_interval: i64,
) -> i64 {
    heat_run_simulation_to(
        solution,
        run_name,
        output_interval,
        save_interval,
        std::ptr::null(),
    )
}

/// [`heat_run_simulation`] writing curve files under `output_dir` instead
/// of the working directory. A null `output_dir` means `"."`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn heat_run_simulation_to(
    solution: i64,
    run_name: *const c_char,
    output_interval: i64,
    save_interval: i64,
    output_dir: *const c_char,
) -> i64 {
    ffi_guard!({
        let solution = match handle::solution(solution) {
            Ok(h) => h,
            Err(status) => return status.code(),
        };
        // SAFETY: run_name is a NUL-terminated string per caller contract.
        let name = match unsafe { c_str(run_name) } {
            Ok(s) => s,
            Err(status) => return status.code(),
        };
        let root = if output_dir.is_null() {
            PathBuf::from(".")
        } else {
            // SAFETY: a non-null output_dir is NUL-terminated per caller contract.
            match unsafe { c_str(output_dir) } {
                Ok(s) => PathBuf::from(s),
                Err(status) => return status.code(),
            }
        };
        let (Ok(output_interval), Ok(save_interval)) =
            (u64::try_from(output_interval), u64::try_from(save_interval))
        else {
            return HeatStatus::InvalidArgument.code();
        };

        let mut options = RunOptions::new(name)
            .output_interval(output_interval)
            .save_interval(save_interval);
        if save_interval > 0 {
            options = options.persist_to(root);
        }
        handle::issue(
            registry()
                .run_simulation(solution, &options)
                .map(|h| h.0),
        )
    })
}

/// Number of snapshots a run recorded, final included.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn heat_run_snapshot_count(run: i64) -> i64 {
    ffi_guard!({
        match results(run) {
            Ok(snaps) => i64::try_from(snaps.len()).unwrap_or(i64::MAX),
            Err(status) => status.code(),
        }
    })
}

/// Number of grid points in each snapshot of a run.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn heat_run_grid_len(run: i64) -> i64 {
    ffi_guard!({
        let run = match handle::run(run).map(|h| registry().run(h)) {
            Ok(Ok(session)) => session,
            Ok(Err(e)) => return HeatStatus::from(&e).code(),
            Err(status) => return status.code(),
        };
        i64::try_from(run.solution().nx()).unwrap_or(i64::MAX)
    })
}

/// Copy snapshot `index` of a run into `buf`.
///
/// `step_out` and `time_out` may be null. `buf` must hold at least
/// [`heat_run_grid_len`] doubles; otherwise `BUFFER_TOO_SMALL` is returned
/// and nothing is written.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn heat_run_snapshot_read(
    run: i64,
    index: i64,
    step_out: *mut u64,
    time_out: *mut f64,
    buf: *mut f64,
    buf_len: usize,
) -> i32 {
    ffi_guard!({
        let snaps = match results(run) {
            Ok(s) => s,
            Err(status) => return status.code(),
        };
        let Some(snap) = usize::try_from(index).ok().and_then(|i| snaps.get(i)) else {
            return HeatStatus::InvalidArgument.code();
        };
        let values = snap.field.values();
        if buf.is_null() {
            return HeatStatus::InvalidArgument.code();
        }
        if buf_len < values.len() {
            return HeatStatus::BufferTooSmall.code();
        }
        // SAFETY: buf points to at least buf_len writable doubles per
        // caller contract, and values.len() <= buf_len.
        let out = unsafe { std::slice::from_raw_parts_mut(buf, values.len()) };
        out.copy_from_slice(values);
        if !step_out.is_null() {
            // SAFETY: step_out is non-null and valid per caller contract.
            unsafe { *step_out = snap.step };
        }
        if !time_out.is_null() {
            // SAFETY: time_out is non-null and valid per caller contract.
            unsafe { *time_out = snap.time };
        }
        HeatStatus::Ok.code()
    })
}

/// Destroy a run and its results.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn heat_run_destroy(run: i64) -> i32 {
    ffi_guard!({
        match handle::run(run) {
            Ok(h) => handle::status(registry().discard_run(h)),
            Err(status) => status.code(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::heat_init_problem;
    use crate::solution::heat_init_solution;

    fn solution() -> i64 {
        let p = heat_init_problem(1.0, 1.0, 0.0, 0.0, c"sin(1,1)".as_ptr());
        heat_init_solution(p, 0.1, 0.001, 0.01, 0, 1)
    }

    #[test]
    fn run_and_read_back() {
        let r = heat_run_simulation(solution(), c"ffi-unit".as_ptr(), 5, 0);
        assert!(r >= 0);
        assert_eq!(heat_run_snapshot_count(r), 4);
        assert_eq!(heat_run_grid_len(r), 11);

        let mut buf = [f64::NAN; 11];
        let mut step = u64::MAX;
        let mut time = -1.0;
        assert_eq!(
            heat_run_snapshot_read(r, 3, &mut step, &mut time, buf.as_mut_ptr(), buf.len()),
            0
        );
        assert_eq!(step, 10);
        assert!((time - 0.01).abs() < 1e-15);
        assert_eq!(buf[0], 0.0);
        assert!(buf[5] > 0.0 && buf[5] < 1.0);
        assert_eq!(heat_run_destroy(r), 0);
        assert_eq!(heat_run_snapshot_count(r), HeatStatus::InvalidHandle as i64);
    }

    #[test]
    fn read_argument_errors() {
        let r = heat_run_simulation(solution(), c"ffi-args".as_ptr(), 0, 0);
        let mut buf = [0.0; 11];
        let p = buf.as_mut_ptr();
        let null_u = std::ptr::null_mut();
        let null_f = std::ptr::null_mut();
        assert_eq!(
            heat_run_snapshot_read(r, 0, null_u, null_f, p, 10),
            HeatStatus::BufferTooSmall as i32
        );
        assert_eq!(
            heat_run_snapshot_read(r, 2, null_u, null_f, p, 11),
            HeatStatus::InvalidArgument as i32
        );
        assert_eq!(
            heat_run_snapshot_read(r, -1, null_u, null_f, p, 11),
            HeatStatus::InvalidArgument as i32
        );
        assert_eq!(
            heat_run_snapshot_read(r, 0, null_u, null_f, std::ptr::null_mut(), 11),
            HeatStatus::InvalidArgument as i32
        );
        assert_eq!(heat_run_snapshot_read(r, 1, null_u, null_f, p, 11), 0);
    }

    #[test]
    fn run_argument_errors() {
        let s = solution();
        assert_eq!(
            heat_run_simulation(s, std::ptr::null(), 1, 0),
            HeatStatus::InvalidArgument as i64
        );
        assert_eq!(
            heat_run_simulation(s, c"neg".as_ptr(), -1, 0),
            HeatStatus::InvalidArgument as i64
        );
        assert_eq!(
            heat_run_simulation(s, c"".as_ptr(), 1, 0),
            HeatStatus::InvalidParameter as i64
        );
        assert_eq!(
            heat_run_simulation(-3, c"x".as_ptr(), 1, 0),
            HeatStatus::InvalidHandle as i64
        );
    }
}
