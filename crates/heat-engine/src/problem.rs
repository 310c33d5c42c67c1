//! The continuous problem: rod, material, end values, initial state.

use std::fmt;

use heat_core::{ConditionExpression, HeatError};
use heat_stepper::Dirichlet;

/// A 1D diffusion problem on `[0, lenx]`.
///
/// Immutable once built; solutions share it through an `Arc`.
#[derive(Clone, Debug, PartialEq)]
pub struct Problem {
    lenx: f64,
    alpha: f64,
    bc0: f64,
    bc1: f64,
    initial: ConditionExpression,
}

impl Problem {
    /// Build a problem, parsing the initial-condition expression `ic`.
    ///
    /// # Errors
    ///
    /// [`HeatError::InvalidParameter`] if `lenx` or `alpha` is not a
    /// positive finite number or a boundary value is not finite;
    /// [`HeatError::Parse`] if `ic` is not a valid expression.
    pub fn new(lenx: f64, alpha: f64, bc0: f64, bc1: f64, ic: &str) -> Result<Self, HeatError> {
        let initial = ConditionExpression::parse(ic)?;
        Self::with_condition(lenx, alpha, bc0, bc1, initial)
    }

    /// Build a problem from an already parsed initial condition.
    pub fn with_condition(
        lenx: f64,
        alpha: f64,
        bc0: f64,
        bc1: f64,
        initial: ConditionExpression,
    ) -> Result<Self, HeatError> {
        positive("lenx", lenx)?;
        positive("alpha", alpha)?;
        finite("bc0", bc0)?;
        finite("bc1", bc1)?;
        Ok(Self {
            lenx,
            alpha,
            bc0,
            bc1,
            initial,
        })
    }

    /// Length of the rod.
    pub fn lenx(&self) -> f64 {
        self.lenx
    }

    /// Thermal diffusivity.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Temperature held at `x = 0`.
    pub fn bc0(&self) -> f64 {
        self.bc0
    }

    /// Temperature held at `x = lenx`.
    pub fn bc1(&self) -> f64 {
        self.bc1
    }

    /// End values as a boundary condition.
    pub fn boundary(&self) -> Dirichlet {
        Dirichlet::new(self.bc0, self.bc1)
    }

    /// The initial condition.
    pub fn initial_condition(&self) -> &ConditionExpression {
        &self.initial
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lenx={} alpha={} bc0={} bc1={} ic={}",
            self.lenx, self.alpha, self.bc0, self.bc1, self.initial
        )
    }
}

pub(crate) fn positive(parameter: &'static str, v: f64) -> Result<(), HeatError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(HeatError::invalid(
            parameter,
            format!("must be positive and finite, got {v}"),
        ))
    }
}

fn finite(parameter: &'static str, v: f64) -> Result<(), HeatError> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(HeatError::invalid(
            parameter,
            format!("must be finite, got {v}"),
        ))
    }
}
