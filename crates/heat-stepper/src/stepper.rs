//! The [`TimeStepper`] trait.

use crate::context::StepContext;
use crate::levels::TimeLevels;

/// One explicit time-integration scheme.
///
/// # Contract
///
/// - `advance()` MUST be deterministic: the same levels and context give
///   bit-identical output, whatever the configured parallelism.
/// - After `advance()` the endpoints of the new current level equal the
///   context's Dirichlet values.
/// - Steppers are stateless; anything a scheme needs from earlier steps
///   lives in [`TimeLevels`].
///
/// This trait is object-safe; runs hold steppers as `Box<dyn TimeStepper>`.
pub trait TimeStepper: Send + Sync + 'static {
    /// Human-readable scheme name for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Number of time levels the update reads plus the one it writes.
    fn levels(&self) -> usize;

    /// Largest stable Fourier number, or `None` if unconditionally stable.
    fn max_fourier(&self) -> Option<f64>;

    /// Advance `levels` by one time step.
    fn advance(&self, levels: &mut TimeLevels, ctx: &StepContext);
}
