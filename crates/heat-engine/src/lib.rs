//! Run lifecycle for the 1D heat equation.
//!
//! A [`Problem`] fixes the rod, its diffusivity, the Dirichlet end values
//! and the initial condition. A [`Solution`] discretizes a problem and
//! picks a scheme. A [`RunSession`] integrates a solution from `t = 0` to
//! `maxt`, recording [`Snapshot`]s in memory and optionally writing curve
//! files. The [`Registry`] hands out small integer handles for all three
//! so that foreign callers never hold Rust references.
//!
//! # Logging
//!
//! Diagnostics go through `tracing`: `warn!` for stability violations
//! accepted under [`StabilityPolicy::Warn`] and for divergence, `info!`
//! for progress lines, `debug!` for lifecycle transitions and file
//! writes. No subscriber is installed here.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod batch;
pub mod config;
pub mod metrics;
pub mod problem;
pub mod registry;
pub mod session;
pub mod snapshot;
pub mod solution;
pub mod store;

pub use batch::BatchJob;
pub use config::{RunOptions, SolverConfig, StabilityPolicy, CHANGE_HISTORY_LIMIT};
pub use metrics::RunMetrics;
pub use problem::Problem;
pub use registry::{Issued, Registry};
pub use session::{RunSession, RunStatus};
pub use snapshot::{Snapshot, SnapshotKind, SnapshotLog};
pub use solution::Solution;
pub use store::ResultStore;

pub use heat_core::{HeatError, ProblemHandle, RunHandle, SolutionHandle};
pub use heat_stepper::Scheme;
