//! Handle-based access to problems, solutions and runs.
//!
//! Each table sits behind its own `Mutex`, held only to issue, look up or
//! retire a handle. Runs execute on `Arc` clones outside any lock, so
//! independent runs proceed concurrently. `Registry::new` is `const`, so
//! a registry can live in a `static`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use heat_core::{
    Arena, HandleKind, HeatError, ProblemHandle, RunHandle, SolutionHandle, StabilityViolation,
};

use crate::batch::{self, BatchJob};
use crate::config::{RunOptions, SolverConfig};
use crate::problem::Problem;
use crate::session::RunSession;
use crate::snapshot::Snapshot;
use crate::solution::Solution;
use crate::store::ResultStore;

/// A freshly issued handle and any non-fatal diagnostic.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Issued<H> {
    /// The new handle.
    pub handle: H,
    /// Stability bound accepted under the warn policy.
    pub warning: Option<StabilityViolation>,
}

/// Tables of live problems, solutions and completed runs.
#[derive(Debug, Default)]
pub struct Registry {
    problems: Mutex<Arena<Arc<Problem>>>,
    solutions: Mutex<Arena<Arc<Solution>>>,
    runs: Mutex<ResultStore>,
}

/// Table mutations are single inserts or removals, so a table is never
/// left half-updated by a panicking holder.
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

fn exhausted(kind: HandleKind) -> HeatError {
    HeatError::invalid("handle", format!("{kind} handle space exhausted"))
}

impl Registry {
    /// An empty registry.
    pub const fn new() -> Self {
        Self {
            problems: Mutex::new(Arena::new()),
            solutions: Mutex::new(Arena::new()),
            runs: Mutex::new(ResultStore::new()),
        }
    }

    /// Validate and register a problem.
    pub fn init_problem(
        &self,
        lenx: f64,
        alpha: f64,
        bc0: f64,
        bc1: f64,
        ic: &str,
    ) -> Result<ProblemHandle, HeatError> {
        let problem = Problem::new(lenx, alpha, bc0, bc1, ic)?;
        self.add_problem(problem)
    }

    /// Register an already built problem.
    pub fn add_problem(&self, problem: Problem) -> Result<ProblemHandle, HeatError> {
        let handle = lock(&self.problems)
            .insert(Arc::new(problem))
            .map(ProblemHandle)
            .ok_or_else(|| exhausted(HandleKind::Problem))?;
        tracing::debug!(%handle, "problem registered");
        Ok(handle)
    }

    /// The problem behind `handle`.
    pub fn problem(&self, handle: ProblemHandle) -> Result<Arc<Problem>, HeatError> {
        lock(&self.problems)
            .get(handle.0)
            .cloned()
            .ok_or(HeatError::InvalidHandle {
                kind: HandleKind::Problem,
                handle: i64::from(handle.0),
            })
    }

    /// Discretize a registered problem and register the solution.
    ///
    /// A stability violation accepted under the warn policy is returned in
    /// [`Issued::warning`].
    pub fn init_solution(
        &self,
        problem: ProblemHandle,
        dx: f64,
        dt: f64,
        maxt: f64,
        config: &SolverConfig,
    ) -> Result<Issued<SolutionHandle>, HeatError> {
        let problem = self.problem(problem)?;
        let solution = Solution::new(problem, dx, dt, maxt, *config)?;
        let warning = solution.stability_warning().copied();
        let handle = lock(&self.solutions)
            .insert(Arc::new(solution))
            .map(SolutionHandle)
            .ok_or_else(|| exhausted(HandleKind::Solution))?;
        tracing::debug!(%handle, "solution registered");
        Ok(Issued { handle, warning })
    }

    /// The solution behind `handle`.
    pub fn solution(&self, handle: SolutionHandle) -> Result<Arc<Solution>, HeatError> {
        lock(&self.solutions)
            .get(handle.0)
            .cloned()
            .ok_or(HeatError::InvalidHandle {
                kind: HandleKind::Solution,
                handle: i64::from(handle.0),
            })
    }

    /// Run a registered solution to completion and keep the results.
    ///
    /// A failed run is not registered; its error is returned.
    pub fn run_simulation(
        &self,
        solution: SolutionHandle,
        options: &RunOptions,
    ) -> Result<RunHandle, HeatError> {
        let solution = self.solution(solution)?;
        let mut session = RunSession::new(solution, options.clone())?;
        session.execute()?;
        let handle = lock(&self.runs).insert(session)?;
        tracing::debug!(%handle, run = %options.name, "run registered");
        Ok(handle)
    }

    /// Run independent jobs on up to `workers` threads.
    ///
    /// Results come back in job order.
    pub fn run_batch(
        &self,
        jobs: &[BatchJob],
        workers: usize,
    ) -> Vec<Result<RunHandle, HeatError>> {
        batch::run_batch(self, jobs, workers)
    }

    /// The snapshots of a completed run.
    pub fn results(&self, run: RunHandle) -> Result<Arc<[Snapshot]>, HeatError> {
        lock(&self.runs).results(run)
    }

    /// The session behind a run handle, for its history and metrics.
    pub fn run(&self, run: RunHandle) -> Result<Arc<RunSession>, HeatError> {
        lock(&self.runs).get(run)
    }

    /// Retire a problem handle. Solutions already built from it keep
    /// working.
    pub fn discard_problem(&self, handle: ProblemHandle) -> Result<(), HeatError> {
        lock(&self.problems)
            .remove(handle.0)
            .map(drop)
            .ok_or(HeatError::InvalidHandle {
                kind: HandleKind::Problem,
                handle: i64::from(handle.0),
            })
    }

    /// Retire a solution handle. Completed runs keep their results.
    pub fn discard_solution(&self, handle: SolutionHandle) -> Result<(), HeatError> {
        lock(&self.solutions)
            .remove(handle.0)
            .map(drop)
            .ok_or(HeatError::InvalidHandle {
                kind: HandleKind::Solution,
                handle: i64::from(handle.0),
            })
    }

    /// Retire a run handle and drop its results.
    pub fn discard_run(&self, handle: RunHandle) -> Result<(), HeatError> {
        lock(&self.runs).discard(handle)
    }

    /// Live entries per table: `(problems, solutions, runs)`.
    pub fn counts(&self) -> (usize, usize, usize) {
        (
            lock(&self.problems).len(),
            lock(&self.solutions).len(),
            lock(&self.runs).len(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StabilityPolicy;

    static GLOBAL: Registry = Registry::new();

    #[test]
    fn full_lifecycle() {
        let reg = Registry::new();
        let p = reg.init_problem(1.0, 1.0, 0.0, 0.0, "const(1)").unwrap();
        let s = reg
            .init_solution(p, 0.25, 0.01, 0.05, &SolverConfig::default())
            .unwrap();
        assert_eq!(s.warning, None);
        let r = reg.run_simulation(s.handle, &RunOptions::new("r")).unwrap();
        assert_eq!(reg.results(r).unwrap().len(), 2);
        assert_eq!(reg.counts(), (1, 1, 1));

        reg.discard_run(r).unwrap();
        assert!(reg.results(r).is_err());
        reg.discard_solution(s.handle).unwrap();
        assert!(reg.run_simulation(s.handle, &RunOptions::new("r")).is_err());
        reg.discard_problem(p).unwrap();
        assert_eq!(reg.counts(), (0, 0, 0));
    }

    #[test]
    fn unknown_handles_rejected() {
        let reg = Registry::new();
        match reg.init_solution(ProblemHandle(7), 0.1, 0.1, 1.0, &SolverConfig::default()) {
            Err(HeatError::InvalidHandle { kind, handle }) => {
                assert_eq!(kind, HandleKind::Problem);
                assert_eq!(handle, 7);
            }
            other => panic!("expected InvalidHandle, got {other:?}"),
        }
        assert!(matches!(
            reg.results(RunHandle(0)),
            Err(HeatError::InvalidHandle {
                kind: HandleKind::Run,
                ..
            })
        ));
        assert!(reg.discard_problem(ProblemHandle(0)).is_err());
    }

    #[test]
    fn warn_policy_reports_violation() {
        let reg = Registry::new();
        let p = reg.init_problem(1.0, 1.0, 0.0, 0.0, "const(1)").unwrap();
        let cfg = SolverConfig {
            stability_policy: StabilityPolicy::Warn,
            ..SolverConfig::default()
        };
        let issued = reg.init_solution(p, 0.1, 0.006, 0.06, &cfg).unwrap();
        let warning = issued.warning.unwrap();
        assert!((warning.fourier - 0.6).abs() < 1e-12);
        assert!(!reg.solution(issued.handle).unwrap().is_stable());
    }

    #[test]
    fn static_registry_is_usable() {
        let p = GLOBAL.init_problem(2.0, 0.5, 1.0, 1.0, "ramp(1,1)").unwrap();
        assert_eq!(GLOBAL.problem(p).unwrap().lenx(), 2.0);
    }
}
