//! Error types for the heat-equation engine.
//!
//! [`HeatError`] is the single taxonomy surfaced by construction, run and
//! retrieval operations. Validation errors (`InvalidParameter`,
//! `InvalidHandle`, `Parse`, `StabilityViolation`) are reported before a
//! handle is issued; run errors (`DivergenceDetected`, `IoFailure`) move a
//! run into its failed state.

use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::id::HandleKind;

/// Errors from problem/solution construction, runs and result retrieval.
#[derive(Debug)]
pub enum HeatError {
    /// A numeric or textual parameter is out of its valid range.
    InvalidParameter {
        /// Name of the offending parameter (e.g. `"dx"`).
        parameter: &'static str,
        /// Human-readable description of the violated constraint.
        reason: String,
    },
    /// A handle does not refer to a live registry entry.
    InvalidHandle {
        /// Table the handle was looked up in.
        kind: HandleKind,
        /// The raw handle value as supplied by the caller.
        handle: i64,
    },
    /// The initial-condition expression could not be parsed.
    Parse(ParseError),
    /// The FTCS stability bound is exceeded and the policy is `Reject`.
    StabilityViolation(StabilityViolation),
    /// A non-finite value appeared in the field during a run.
    DivergenceDetected {
        /// Step after which the value was observed (1-based).
        step: u64,
        /// Grid index of the first non-finite sample.
        index: usize,
    },
    /// Persisting a snapshot or checkpoint failed.
    IoFailure {
        /// Path being written when the failure occurred.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
}

impl HeatError {
    /// Shorthand for [`HeatError::InvalidParameter`].
    pub fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter,
            reason: reason.into(),
        }
    }
}

/// I/O failures are cloned by kind and message; the wrapped `io::Error`
/// itself is not cloneable.
impl Clone for HeatError {
    fn clone(&self) -> Self {
        match self {
            Self::InvalidParameter { parameter, reason } => Self::InvalidParameter {
                parameter: *parameter,
                reason: reason.clone(),
            },
            Self::InvalidHandle { kind, handle } => Self::InvalidHandle {
                kind: *kind,
                handle: *handle,
            },
            Self::Parse(e) => Self::Parse(e.clone()),
            Self::StabilityViolation(v) => Self::StabilityViolation(*v),
            Self::DivergenceDetected { step, index } => Self::DivergenceDetected {
                step: *step,
                index: *index,
            },
            Self::IoFailure { path, source } => Self::IoFailure {
                path: path.clone(),
                source: io::Error::new(source.kind(), source.to_string()),
            },
        }
    }
}

impl fmt::Display for HeatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter { parameter, reason } => {
                write!(f, "invalid parameter '{parameter}': {reason}")
            }
            Self::InvalidHandle { kind, handle } => write!(f, "invalid {kind} handle {handle}"),
            Self::Parse(e) => write!(f, "initial condition: {e}"),
            Self::StabilityViolation(v) => write!(f, "{v}"),
            Self::DivergenceDetected { step, index } => {
                write!(f, "non-finite value at grid index {index} after step {step}")
            }
            Self::IoFailure { path, source } => {
                write!(f, "failed to write {}: {source}", path.display())
            }
        }
    }
}

impl Error for HeatError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::StabilityViolation(v) => Some(v),
            Self::IoFailure { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ParseError> for HeatError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<StabilityViolation> for HeatError {
    fn from(v: StabilityViolation) -> Self {
        Self::StabilityViolation(v)
    }
}

/// An explicit scheme's Fourier number exceeds its stability limit.
///
/// Returned as an error under the reject policy and attached to the
/// solution as a non-fatal diagnostic under the warn policy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StabilityViolation {
    /// Name of the scheme whose bound is exceeded.
    pub scheme: &'static str,
    /// `alpha * dt / dx²` for the offending discretization.
    pub fourier: f64,
    /// The largest stable Fourier number for the scheme.
    pub limit: f64,
}

impl fmt::Display for StabilityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} stability bound exceeded: alpha*dt/dx^2 = {} > {}",
            self.scheme, self.fourier, self.limit
        )
    }
}

impl Error for StabilityViolation {}

/// Why an initial-condition expression was rejected.
#[derive(Clone, Debug, PartialEq)]
pub enum ParseErrorKind {
    /// The text is not of the form `name(arg, ...)`.
    Malformed {
        /// What was wrong with the shape of the expression.
        reason: &'static str,
    },
    /// The identifier does not name a known condition form.
    UnknownForm {
        /// The unrecognized identifier.
        name: String,
    },
    /// The form was given the wrong number of arguments.
    WrongArity {
        /// The condition form.
        name: &'static str,
        /// Description of the accepted argument counts.
        expected: &'static str,
        /// Number of arguments supplied.
        found: usize,
    },
    /// An argument is not a finite number.
    InvalidNumber {
        /// Zero-based argument position.
        position: usize,
        /// The argument text as written.
        text: String,
    },
    /// An argument is numeric but unusable for its role.
    InvalidArgument {
        /// Zero-based argument position.
        position: usize,
        /// Description of the constraint.
        reason: &'static str,
    },
    /// A `file(path)` condition could not be loaded.
    Unreadable {
        /// The path as written.
        path: String,
        /// Why the curve could not be read.
        reason: String,
    },
}

/// An initial-condition expression that failed to parse.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseError {
    /// The expression text as supplied.
    pub input: String,
    /// The failure category.
    pub kind: ParseErrorKind,
}

impl ParseError {
    /// Create a parse error for `input`.
    pub fn new(input: &str, kind: ParseErrorKind) -> Self {
        Self {
            input: input.to_string(),
            kind,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let input = &self.input;
        match &self.kind {
            ParseErrorKind::Malformed { reason } => write!(f, "malformed '{input}': {reason}"),
            ParseErrorKind::UnknownForm { name } => {
                write!(f, "unknown condition '{name}' in '{input}'")
            }
            ParseErrorKind::WrongArity {
                name,
                expected,
                found,
            } => write!(
                f,
                "'{name}' takes {expected} argument(s), got {found} in '{input}'"
            ),
            ParseErrorKind::InvalidNumber { position, text } => {
                write!(f, "argument {position} ('{text}') of '{input}' is not a finite number")
            }
            ParseErrorKind::InvalidArgument { position, reason } => {
                write!(f, "argument {position} of '{input}': {reason}")
            }
            ParseErrorKind::Unreadable { path, reason } => {
                write!(f, "cannot load '{path}' for '{input}': {reason}")
            }
        }
    }
}

impl Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_is_source_of_heat_error() {
        let parse = ParseError::new(
            "cosh(1)",
            ParseErrorKind::UnknownForm {
                name: "cosh".into(),
            },
        );
        let err = HeatError::from(parse.clone());
        assert!(err.to_string().contains("unknown condition 'cosh'"));
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), parse.to_string());
    }

    #[test]
    fn stability_violation_display_names_bound() {
        let v = StabilityViolation {
            scheme: "FTCS",
            fourier: 0.6,
            limit: 0.5,
        };
        assert_eq!(
            v.to_string(),
            "FTCS stability bound exceeded: alpha*dt/dx^2 = 0.6 > 0.5"
        );
    }

    #[test]
    fn invalid_handle_display() {
        let err = HeatError::InvalidHandle {
            kind: HandleKind::Run,
            handle: -1,
        };
        assert_eq!(err.to_string(), "invalid run handle -1");
    }

    #[test]
    fn io_failure_exposes_source() {
        let err = HeatError::IoFailure {
            path: PathBuf::from("out/x.curve"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().starts_with("failed to write out/x.curve"));
        assert!(err.source().is_some());

        let copy = err.clone();
        assert_eq!(copy.to_string(), err.to_string());
        match copy {
            HeatError::IoFailure { source, .. } => {
                assert_eq!(source.kind(), io::ErrorKind::PermissionDenied)
            }
            other => panic!("expected IoFailure, got {other:?}"),
        }
    }
}
