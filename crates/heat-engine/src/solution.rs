//! Discretization of a [`Problem`].

use std::sync::Arc;

use heat_core::{GridField, GridSpec, HeatError, StabilityViolation};
use heat_stepper::{fourier_number, Scheme, StepContext};

use crate::config::{SolverConfig, StabilityPolicy};
use crate::problem::{positive, Problem};

/// Most grid points a solution may use.
pub const MAX_POINTS: usize = 1 << 28;

/// Most time steps a solution may take.
pub const MAX_STEPS: u64 = 1 << 40;

/// A problem discretized in space and time, with a scheme.
///
/// `nx = round(lenx / dx) + 1` and the grid spacing actually used is
/// `lenx / (nx - 1)`, so the last point sits exactly on `lenx`. The number
/// of steps is `nt = round(maxt / dt)`.
#[derive(Clone, Debug)]
pub struct Solution {
    problem: Arc<Problem>,
    dx: f64,
    dt: f64,
    maxt: f64,
    grid: GridSpec,
    nt: u64,
    fourier: f64,
    config: SolverConfig,
    stability_warning: Option<StabilityViolation>,
}

impl Solution {
    /// Discretize `problem`.
    ///
    /// # Errors
    ///
    /// - [`HeatError::InvalidParameter`] for non-positive or non-finite
    ///   `dx`, `dt` or `maxt`, `dx >= lenx`, fewer than 3 grid points,
    ///   zero steps, a spike outside the grid, or an invalid `config`.
    /// - [`HeatError::StabilityViolation`] if the scheme's bound is
    ///   exceeded under [`StabilityPolicy::Reject`].
    pub fn new(
        problem: Arc<Problem>,
        dx: f64,
        dt: f64,
        maxt: f64,
        config: SolverConfig,
    ) -> Result<Self, HeatError> {
        config.validate()?;
        positive("dx", dx)?;
        positive("dt", dt)?;
        positive("maxt", maxt)?;

        let lenx = problem.lenx();
        if dx >= lenx {
            return Err(HeatError::invalid(
                "dx",
                format!("{dx} is not smaller than lenx {lenx}"),
            ));
        }
        let intervals = (lenx / dx).round();
        if intervals >= MAX_POINTS as f64 {
            return Err(HeatError::invalid(
                "dx",
                format!("grid would exceed {MAX_POINTS} points"),
            ));
        }
        let nx = intervals as usize + 1;
        if nx < 3 {
            return Err(HeatError::invalid(
                "dx",
                format!("grid of {nx} points has no interior"),
            ));
        }
        let steps = (maxt / dt).round();
        if steps < 1.0 {
            return Err(HeatError::invalid(
                "maxt",
                format!("maxt {maxt} is less than half a step of {dt}"),
            ));
        }
        if steps > MAX_STEPS as f64 {
            return Err(HeatError::invalid(
                "dt",
                format!("run would exceed {MAX_STEPS} steps"),
            ));
        }

        let grid = GridSpec::new(nx, lenx / (nx - 1) as f64);
        problem.initial_condition().check_grid(&grid)?;

        let fourier = fourier_number(problem.alpha(), dt, grid.dx);
        let stability_warning = match config.scheme.check_stability(fourier) {
            Ok(()) => None,
            Err(violation) => match config.stability_policy {
                StabilityPolicy::Reject => return Err(violation.into()),
                StabilityPolicy::Warn => {
                    tracing::warn!(
                        scheme = violation.scheme,
                        fourier = violation.fourier,
                        limit = violation.limit,
                        "accepting unstable discretization"
                    );
                    Some(violation)
                }
            },
        };

        Ok(Self {
            problem,
            dx,
            dt,
            maxt,
            grid,
            nt: steps as u64,
            fourier,
            config,
            stability_warning,
        })
    }

    /// The problem this solution discretizes.
    pub fn problem(&self) -> &Arc<Problem> {
        &self.problem
    }

    /// Grid spacing as requested.
    pub fn requested_dx(&self) -> f64 {
        self.dx
    }

    /// Grid spacing actually used.
    pub fn dx(&self) -> f64 {
        self.grid.dx
    }

    /// Time step.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Requested end time.
    pub fn maxt(&self) -> f64 {
        self.maxt
    }

    /// Number of grid points.
    pub fn nx(&self) -> usize {
        self.grid.nx
    }

    /// Number of time steps.
    pub fn nt(&self) -> u64 {
        self.nt
    }

    /// The spatial grid.
    pub fn grid(&self) -> GridSpec {
        self.grid
    }

    /// `alpha * dt / dx²` on the grid actually used.
    pub fn fourier(&self) -> f64 {
        self.fourier
    }

    /// Time-integration scheme.
    pub fn scheme(&self) -> Scheme {
        self.config.scheme
    }

    /// Settings the solution was built with.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// The stability violation accepted under the warn policy, if any.
    pub fn stability_warning(&self) -> Option<&StabilityViolation> {
        self.stability_warning.as_ref()
    }

    /// `false` if the discretization exceeds the scheme's stability bound.
    pub fn is_stable(&self) -> bool {
        self.stability_warning.is_none()
    }

    /// Simulated time after `step` steps.
    pub fn time_at(&self, step: u64) -> f64 {
        step as f64 * self.dt
    }

    /// Step parameters for a run of this solution.
    pub fn step_context(&self) -> StepContext {
        StepContext::new(self.fourier, self.problem.boundary())
            .with_parallelism(self.config.parallelism())
    }

    /// The initial condition sampled on the grid, endpoints set to the
    /// boundary values.
    pub fn initial_field(&self) -> GridField {
        let mut field = self.problem.initial_condition().sample(&self.grid);
        self.problem.boundary().apply(field.values_mut());
        field
    }
}
