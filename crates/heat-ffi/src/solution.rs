//! Solution lifecycle FFI.

use heat_engine::{Scheme, SolverConfig, StabilityPolicy};

use crate::handle::{self, registry};
use crate::status::HeatStatus;

fn scheme_from_code(code: i32) -> Option<Scheme> {
    match code {
        0 => Some(Scheme::Ftcs),
        1 => Some(Scheme::DufortFrankel),
        _ => None,
    }
}

/// Discretize a problem.
///
/// `scheme` is 0 for FTCS or 1 for Dufort-Frankel. With `strict` non-zero
/// an FTCS step exceeding `alpha*dt/dx^2 <= 0.5` fails with
/// `STABILITY_VIOLATION`; with `strict` zero the solution is created and
/// [`heat_solution_is_stable`] reports the problem.
///
/// Returns the solution handle, or a negative [`HeatStatus`].
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn heat_init_solution(
    problem: i64,
    dx: f64,
    dt: f64,
    maxt: f64,
    scheme: i32,
    strict: i32,
) -> i64 {
    ffi_guard!({
        let problem = match handle::problem(problem) {
            Ok(h) => h,
            Err(status) => return status.code(),
        };
        let Some(scheme) = scheme_from_code(scheme) else {
            return HeatStatus::InvalidArgument.code();
        };
        let config = SolverConfig {
            scheme,
            stability_policy: if strict != 0 {
                StabilityPolicy::Reject
            } else {
                StabilityPolicy::Warn
            },
            ..SolverConfig::default()
        };
        handle::issue(
            registry()
                .init_solution(problem, dx, dt, maxt, &config)
                .map(|issued| issued.handle.0),
        )
    })
}

/// Write 1 to `stable_out` if the solution is within its scheme's
/// stability bound, 0 otherwise.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn heat_solution_is_stable(solution: i64, stable_out: *mut i32) -> i32 {
    ffi_guard!({
        if stable_out.is_null() {
            return HeatStatus::InvalidArgument.code();
        }
        let solution = match handle::solution(solution).map(|h| registry().solution(h)) {
            Ok(Ok(s)) => s,
            Ok(Err(e)) => return HeatStatus::from(&e).code(),
            Err(status) => return status.code(),
        };
        // SAFETY: stable_out is non-null and valid per caller contract.
        unsafe { *stable_out = i32::from(solution.is_stable()) };
        HeatStatus::Ok.code()
    })
}

/// Destroy a solution. Completed runs keep their results.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn heat_solution_destroy(solution: i64) -> i32 {
    ffi_guard!({
        match handle::solution(solution) {
            Ok(h) => handle::status(registry().discard_solution(h)),
            Err(status) => status.code(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::heat_init_problem;

    fn problem() -> i64 {
        heat_init_problem(1.0, 1.0, 0.0, 0.0, c"const(1)".as_ptr())
    }

    #[test]
    fn strict_rejects_unstable_ftcs() {
        let p = problem();
        assert_eq!(
            heat_init_solution(p, 0.1, 0.006, 0.06, 0, 1),
            HeatStatus::StabilityViolation as i64
        );
    }

    #[test]
    fn lenient_reports_instability() {
        let p = problem();
        let s = heat_init_solution(p, 0.1, 0.006, 0.06, 0, 0);
        assert!(s >= 0);
        let mut stable = -1;
        assert_eq!(heat_solution_is_stable(s, &mut stable), 0);
        assert_eq!(stable, 0);

        let df = heat_init_solution(p, 0.1, 0.006, 0.06, 1, 1);
        assert!(df >= 0);
        assert_eq!(heat_solution_is_stable(df, &mut stable), 0);
        assert_eq!(stable, 1);
    }

    #[test]
    fn argument_errors() {
        let p = problem();
        assert_eq!(
            heat_init_solution(p, 0.1, 0.001, 0.1, 7, 1),
            HeatStatus::InvalidArgument as i64
        );
        assert_eq!(
            heat_init_solution(-1, 0.1, 0.001, 0.1, 0, 1),
            HeatStatus::InvalidHandle as i64
        );
        assert_eq!(
            heat_init_solution(p, -0.1, 0.001, 0.1, 0, 1),
            HeatStatus::InvalidParameter as i64
        );
        let s = heat_init_solution(p, 0.1, 0.001, 0.1, 0, 1);
        assert_eq!(
            heat_solution_is_stable(s, std::ptr::null_mut()),
            HeatStatus::InvalidArgument as i32
        );
        assert_eq!(heat_solution_destroy(s), 0);
        let mut stable = 0;
        assert_eq!(
            heat_solution_is_stable(s, &mut stable),
            HeatStatus::InvalidHandle as i32
        );
    }
}
