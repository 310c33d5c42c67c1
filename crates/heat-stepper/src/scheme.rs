//! Scheme selection and stability checks.

use std::fmt;

use heat_core::StabilityViolation;

use crate::dufort_frankel::DufortFrankel;
use crate::ftcs::Ftcs;
use crate::stepper::TimeStepper;

/// The explicit schemes a solution can be configured with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// Forward-time centred-space.
    #[default]
    Ftcs,
    /// Dufort-Frankel.
    DufortFrankel,
}

impl Scheme {
    /// A fresh stepper for this scheme.
    pub fn stepper(self) -> Box<dyn TimeStepper> {
        match self {
            Self::Ftcs => Box::new(Ftcs),
            Self::DufortFrankel => Box::new(DufortFrankel),
        }
    }

    /// Scheme name as used in logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Ftcs => "FTCS",
            Self::DufortFrankel => "Dufort-Frankel",
        }
    }

    /// Largest stable Fourier number, `None` if unconditionally stable.
    pub fn max_fourier(self) -> Option<f64> {
        match self {
            Self::Ftcs => Some(Ftcs::MAX_FOURIER),
            Self::DufortFrankel => None,
        }
    }

    /// Check a Fourier number against this scheme's bound.
    pub fn check_stability(self, fourier: f64) -> Result<(), StabilityViolation> {
        match self.max_fourier() {
            Some(limit) if fourier > limit => Err(StabilityViolation {
                scheme: self.name(),
                fourier,
                limit,
            }),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `alpha * dt / dx²`.
pub fn fourier_number(alpha: f64, dt: f64, dx: f64) -> f64 {
    alpha * dt / (dx * dx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ftcs_bound_is_inclusive() {
        assert!(Scheme::Ftcs.check_stability(0.5).is_ok());
        let err = Scheme::Ftcs.check_stability(0.6).unwrap_err();
        assert_eq!(err.scheme, "FTCS");
        assert_eq!(err.limit, 0.5);
        assert_eq!(err.fourier, 0.6);
    }

    #[test]
    fn dufort_frankel_accepts_any_fourier() {
        assert!(Scheme::DufortFrankel.check_stability(1.0e6).is_ok());
    }

    #[test]
    fn stepper_matches_scheme() {
        for scheme in [Scheme::Ftcs, Scheme::DufortFrankel] {
            let stepper = scheme.stepper();
            assert_eq!(stepper.name(), scheme.name());
            assert_eq!(stepper.max_fourier(), scheme.max_fourier());
        }
    }

    #[test]
    fn fourier_number_of_reference_grid() {
        let r = fourier_number(0.01, 1.0e-4, 0.01);
        assert!((r - 0.01).abs() < 1e-15);
    }
}
