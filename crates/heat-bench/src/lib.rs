//! Benchmark profiles for the 1D heat-equation engine.
//!
//! - [`reference_solution`]: a random rod at Fourier number 0.25
//! - [`REFERENCE_POINTS`] and [`STRESS_POINTS`]: the grid sizes benches use

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::sync::Arc;

use heat_core::HeatError;
use heat_engine::{Problem, Scheme, Solution, SolverConfig};

/// Grid size for the everyday profile.
pub const REFERENCE_POINTS: usize = 10_001;

/// Grid size large enough for the threaded interior update to pay off.
pub const STRESS_POINTS: usize = 1_000_001;

/// Fourier number every profile runs at; stable for both schemes.
pub const FOURIER: f64 = 0.25;

/// A unit rod with a seeded random initial field and cold ends.
pub fn reference_problem(seed: u64) -> Result<Problem, HeatError> {
    Problem::new(1.0, 1.0, 0.0, 0.0, &format!("rand({seed},0.5,0.5)"))
}

/// Discretize [`reference_problem`] on `points` grid points for `steps`
/// time steps.
pub fn reference_solution(
    points: usize,
    steps: u64,
    scheme: Scheme,
    workers: usize,
) -> Result<Solution, HeatError> {
    let dx = 1.0 / (points - 1) as f64;
    let dt = FOURIER * dx * dx;
    let config = SolverConfig {
        workers,
        ..SolverConfig::with_scheme(scheme)
    };
    Solution::new(
        Arc::new(reference_problem(42)?),
        dx,
        dt,
        steps as f64 * dt,
        config,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_solution_shape() {
        let s = reference_solution(REFERENCE_POINTS, 100, Scheme::Ftcs, 1).unwrap();
        assert_eq!(s.nx(), REFERENCE_POINTS);
        assert_eq!(s.nt(), 100);
        assert!((s.fourier() - FOURIER).abs() < 1e-9);
        assert!(s.is_stable());
    }

    #[test]
    fn threaded_profile_validates() {
        let s = reference_solution(STRESS_POINTS, 1, Scheme::DufortFrankel, 8).unwrap();
        assert!(s.step_context().parallelism.is_parallel_for(s.nx()));
    }
}
