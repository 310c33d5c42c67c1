//! Per-run step parameters handed to a [`TimeStepper`](crate::TimeStepper).

use crate::boundary::Dirichlet;
use crate::stencil::Parallelism;

/// Everything a stepper needs besides the field itself.
///
/// Built once per run: the coefficients are constant because the grid,
/// `dt` and diffusivity do not change during a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepContext {
    /// Fourier number `r = alpha * dt / dx²`.
    pub fourier: f64,
    /// End values re-imposed after every update.
    pub boundary: Dirichlet,
    /// How the interior update is spread across threads.
    pub parallelism: Parallelism,
}

impl StepContext {
    /// A sequential context.
    pub fn new(fourier: f64, boundary: Dirichlet) -> Self {
        Self {
            fourier,
            boundary,
            parallelism: Parallelism::sequential(),
        }
    }

    /// Replace the parallelism settings.
    pub fn with_parallelism(mut self, parallelism: Parallelism) -> Self {
        self.parallelism = parallelism;
        self
    }
}
