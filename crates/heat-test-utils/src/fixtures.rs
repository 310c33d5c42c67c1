//! Reference scenarios.
//!
//! Each [`Scenario`] is a full problem/solution parameter set whose
//! behaviour is known, either from a closed form in [`crate::exact`] or
//! from its stability properties.

use heat_core::GridSpec;

/// Problem and discretization parameters for one run.
#[derive(Clone, Debug, PartialEq)]
pub struct Scenario {
    pub lenx: f64,
    pub alpha: f64,
    pub bc0: f64,
    pub bc1: f64,
    pub ic: String,
    pub dx: f64,
    pub dt: f64,
    pub maxt: f64,
}

impl Scenario {
    /// Unit rod, `alpha = 0.01`, uniform initial value 1, zero ends,
    /// integrated to `t = 1` with `r = 0.01`.
    pub fn uniform_rod() -> Self {
        Self {
            lenx: 1.0,
            alpha: 0.01,
            bc0: 0.0,
            bc1: 0.0,
            ic: "const(1)".into(),
            dx: 0.01,
            dt: 1.0e-4,
            maxt: 1.0,
        }
    }

    /// Uniform start relaxing to the line between `bc0 = 0` and `bc1 = 1`.
    /// Three diffusion times is enough for the line to be reached to
    /// rounding error.
    pub fn steady_line() -> Self {
        Self {
            lenx: 1.0,
            alpha: 1.0,
            bc0: 0.0,
            bc1: 1.0,
            ic: "const(1)".into(),
            dx: 0.05,
            dt: 1.0e-3,
            maxt: 3.0,
        }
    }

    /// Unit-strength spike at the centre (amplitude `1/dx`), run at
    /// `r = 1/6` to `t = 0.5`.
    pub fn centre_impulse() -> Self {
        let dx = 0.01;
        let alpha = 0.01;
        Self {
            lenx: 1.0,
            alpha,
            bc0: 0.0,
            bc1: 0.0,
            ic: format!("spikes(0,{},50)", 1.0 / dx),
            dx,
            dt: dx * dx / (6.0 * alpha),
            maxt: 0.5,
        }
    }

    /// `sin(2 pi x)` with zero ends, same grid as [`centre_impulse`](Self::centre_impulse).
    pub fn sine_mode() -> Self {
        let dx = 0.01;
        let alpha = 0.01;
        Self {
            lenx: 1.0,
            alpha,
            bc0: 0.0,
            bc1: 0.0,
            ic: "sin(1,2)".into(),
            dx,
            dt: dx * dx / (6.0 * alpha),
            maxt: 0.5,
        }
    }

    /// FTCS at `r = 0.6` for 5000 steps: overflows to non-finite values.
    pub fn unstable() -> Self {
        Self {
            lenx: 1.0,
            alpha: 1.0,
            bc0: 0.0,
            bc1: 0.0,
            ic: "rand(7,0,1)".into(),
            dx: 0.1,
            dt: 0.006,
            maxt: 30.0,
        }
    }

    /// Replace the integration end time.
    pub fn with_maxt(mut self, maxt: f64) -> Self {
        self.maxt = maxt;
        self
    }

    /// Points on the grid, `lenx / dx` rounded, plus one.
    pub fn nx(&self) -> usize {
        (self.lenx / self.dx).round() as usize + 1
    }

    /// The grid a solution for this scenario runs on.
    pub fn grid(&self) -> GridSpec {
        let nx = self.nx();
        GridSpec::new(nx, self.lenx / (nx - 1) as f64)
    }

    /// Number of steps, `maxt / dt` rounded.
    pub fn steps(&self) -> u64 {
        (self.maxt / self.dt).round() as u64
    }
}
