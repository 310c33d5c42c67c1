//! Forward-time centred-space scheme.

use heat_core::GridField;

use crate::context::StepContext;
use crate::levels::TimeLevels;
use crate::stencil::update_interior;
use crate::stepper::TimeStepper;

/// Two-level explicit scheme:
/// `u'[i] = u[i] + r * (u[i+1] - 2 u[i] + u[i-1])`.
///
/// Stable for `r <= 0.5`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ftcs;

impl Ftcs {
    /// Largest stable Fourier number.
    pub const MAX_FOURIER: f64 = 0.5;

    /// Write one FTCS update of `u` into `out`, then impose the boundary.
    ///
    /// `out` must have the same length as `u`.
    pub fn apply(u: &GridField, out: &mut GridField, ctx: &StepContext) {
        let r = ctx.fourier;
        let u = u.values();
        update_interior(out.values_mut(), ctx.parallelism, |i| {
            u[i] + r * (u[i + 1] - 2.0 * u[i] + u[i - 1])
        });
        ctx.boundary.apply(out.values_mut());
    }
}

impl TimeStepper for Ftcs {
    fn name(&self) -> &'static str {
        "FTCS"
    }

    fn levels(&self) -> usize {
        2
    }

    fn max_fourier(&self) -> Option<f64> {
        Some(Self::MAX_FOURIER)
    }

    fn advance(&self, levels: &mut TimeLevels, ctx: &StepContext) {
        {
            let (current, _, staging) = levels.split();
            Self::apply(current, staging, ctx);
        }
        levels.commit(false);
    }
}
