//! Strongly-typed registry handles.
//!
//! Handles are small, stable integer indices into the append-only
//! registry tables. They carry no lifetime: a handle outliving its entry
//! resolves to [`HeatError::InvalidHandle`](crate::HeatError::InvalidHandle)
//! instead of a default value.

use std::fmt;

/// Which registry table a handle belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandleKind {
    /// A [`ProblemHandle`].
    Problem,
    /// A [`SolutionHandle`].
    Solution,
    /// A [`RunHandle`].
    Run,
}

impl fmt::Display for HandleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Problem => write!(f, "problem"),
            Self::Solution => write!(f, "solution"),
            Self::Run => write!(f, "run"),
        }
    }
}

/// Identifies a registered diffusion problem.
///
/// `ProblemHandle(n)` is the n-th problem issued by a registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProblemHandle(pub u32);

impl fmt::Display for ProblemHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ProblemHandle {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a registered solution (discretization + scheme).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SolutionHandle(pub u32);

impl fmt::Display for SolutionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SolutionHandle {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a completed run held in the result store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunHandle(pub u32);

impl fmt::Display for RunHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for RunHandle {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
