//! C ABI for the 1D heat-equation engine.
//!
//! Every function returns either a handle (`>= 0`) or a negative
//! [`HeatStatus`] code, or an `i32` status. Handles index a process-wide
//! [`Registry`](heat_engine::Registry); they stay valid until destroyed
//! and are never reused. Panics are caught at the boundary and reported
//! as [`HeatStatus::Panicked`]; [`heat_last_panic_message`] then returns
//! the panic's text.
//!
//! Typical call sequence:
//!
//! ```c
//! int64_t p = heat_init_problem(1.0, 0.01, 0.0, 0.0, "const(1)");
//! int64_t s = heat_init_solution(p, 0.01, 1e-4, 1.0, 0, 1);
//! int64_t r = heat_run_simulation(s, "rod", 100, 0);
//! /* or heat_run_simulation_to(s, "rod", 100, 500, "/tmp/out") to persist */
//! int64_t n = heat_run_snapshot_count(r);
//! int64_t nx = heat_run_grid_len(r);
//! /* heat_run_snapshot_read(r, i, &step, &time, buf, nx) for i < n */
//! heat_run_destroy(r);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

/// Run `$body`, turning a panic into [`HeatStatus::Panicked`](crate::status::HeatStatus::Panicked)
/// and keeping its message for [`heat_last_panic_message`].
///
/// `return` inside the body returns from the guarded closure, so early
/// error exits work as in a plain function body.
macro_rules! ffi_guard {
    ($body:block) => {
        match ::std::panic::catch_unwind(::std::panic::AssertUnwindSafe(|| $body)) {
            Ok(code) => code,
            Err(payload) => {
                $crate::last_panic::record(&*payload);
                $crate::status::HeatStatus::Panicked.code()
            }
        }
    };
}

pub mod handle;
pub mod last_panic;
pub mod problem;
pub mod run;
pub mod solution;
pub mod status;

pub use last_panic::heat_last_panic_message;
pub use problem::{heat_init_problem, heat_problem_destroy};
pub use run::{
    heat_run_destroy, heat_run_grid_len, heat_run_simulation, heat_run_simulation_to,
    heat_run_snapshot_count, heat_run_snapshot_read,
};
pub use solution::{heat_init_solution, heat_solution_destroy, heat_solution_is_stable};
pub use status::HeatStatus;
