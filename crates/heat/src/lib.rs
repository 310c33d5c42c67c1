//! Heat: an explicit finite-difference solver for the 1D heat equation.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the heat sub-crates. For most users, adding `heat` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use heat::prelude::*;
//!
//! let registry = Registry::new();
//! let problem = registry.init_problem(1.0, 1.0, 0.0, 1.0, "const(0)").unwrap();
//! let issued = registry
//!     .init_solution(problem, 0.1, 0.001, 0.1, &SolverConfig::default())
//!     .unwrap();
//! assert!(issued.warning.is_none());
//!
//! let run = registry
//!     .run_simulation(issued.handle, &RunOptions::new("quick").output_interval(50))
//!     .unwrap();
//! let snapshots = registry.results(run).unwrap();
//! assert_eq!(snapshots.len(), 4);
//!
//! let last = snapshots.last().unwrap();
//! assert_eq!(last.kind, SnapshotKind::Final);
//! assert_eq!(last.field.values()[10], 1.0);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `heat-core` | Grid fields, condition expressions, handles, errors |
//! | [`stepper`] | `heat-stepper` | FTCS and Dufort-Frankel time steppers |
//! | [`curve`] | `heat-curve` | Curve file formatting, writing and reading |
//! | [`engine`] | `heat-engine` | Problems, solutions, runs and the handle registry |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Grid fields, initial-condition expressions, handles and the error
/// taxonomy (`heat-core`).
pub use heat_core as types;

/// Time-integration schemes (`heat-stepper`).
///
/// [`stepper::Ftcs`] is conditionally stable; [`stepper::DufortFrankel`]
/// is unconditionally stable and needs three time levels.
pub use heat_stepper as stepper;

/// Curve file output (`heat-curve`).
pub use heat_curve as curve;

/// Problem and solution lifecycle, run sessions, batches and the
/// [`engine::Registry`] (`heat-engine`).
pub use heat_engine as engine;

/// Common imports for typical usage.
///
/// ```rust
/// use heat::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use heat_core::{
        ConditionExpression, GridField, GridSpec, HeatError, ProblemHandle, RunHandle,
        SolutionHandle,
    };

    // Schemes
    pub use heat_stepper::Scheme;

    // Engine
    pub use heat_engine::{
        BatchJob, Problem, Registry, RunOptions, RunSession, RunStatus, Snapshot, SnapshotKind,
        Solution, SolverConfig, StabilityPolicy,
    };
}
