//! Dufort-Frankel three-level scheme.

use crate::context::StepContext;
use crate::ftcs::Ftcs;
use crate::levels::TimeLevels;
use crate::stencil::update_interior;
use crate::stepper::TimeStepper;

/// Three-level explicit scheme:
/// `u'[i] = ((1 - 2r) u_old[i] + 2r (u[i+1] + u[i-1])) / (1 + 2r)`.
///
/// Unconditionally stable. The first step has no earlier level, so it is
/// taken with [`Ftcs`]; every later step uses the three-level update.
#[derive(Clone, Copy, Debug, Default)]
pub struct DufortFrankel;

impl TimeStepper for DufortFrankel {
    fn name(&self) -> &'static str {
        "Dufort-Frankel"
    }

    fn levels(&self) -> usize {
        3
    }

    fn max_fourier(&self) -> Option<f64> {
        None
    }

    fn advance(&self, levels: &mut TimeLevels, ctx: &StepContext) {
        {
            let (current, previous, staging) = levels.split();
            match previous {
                None => Ftcs::apply(current, staging, ctx),
                Some(old) => {
                    let r2 = 2.0 * ctx.fourier;
                    let (u, old) = (current.values(), old.values());
                    update_interior(staging.values_mut(), ctx.parallelism, |i| {
                        ((1.0 - r2) * old[i] + r2 * (u[i + 1] + u[i - 1])) / (1.0 + r2)
                    });
                    ctx.boundary.apply(staging.values_mut());
                }
            }
        }
        levels.commit(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::Dirichlet;
    use heat_core::GridField;

    #[test]
    fn second_step_uses_previous_level() {
        let initial = GridField::from_values(vec![0.0, 0.0, 1.0, 0.0, 0.0], 0.25);
        let mut levels = TimeLevels::new(initial);
        let ctx = StepContext::new(0.25, Dirichlet::new(0.0, 0.0));

        DufortFrankel.advance(&mut levels, &ctx);
        assert_eq!(levels.current().values(), &[0.0, 0.25, 0.5, 0.25, 0.0]);
        assert_eq!(
            levels.previous().map(|p| p.values().to_vec()),
            Some(vec![0.0, 0.0, 1.0, 0.0, 0.0])
        );

        DufortFrankel.advance(&mut levels, &ctx);
        // r2 = 0.5: centre = (0.5 * 1.0 + 0.5 * 0.5) / 1.5
        let v = levels.current().values();
        assert!((v[2] - 0.5).abs() < 1e-15);
        // neighbours = (0.5 * 0.0 + 0.5 * (0.5 + 0.0)) / 1.5
        assert!((v[1] - 1.0 / 6.0).abs() < 1e-15);
        assert_eq!(v[0], 0.0);
        assert_eq!(levels.steps(), 2);
    }

    #[test]
    fn unconditionally_stable() {
        assert_eq!(DufortFrankel.max_fourier(), None);
        assert_eq!(DufortFrankel.levels(), 3);
    }
}
