//! Core types for the 1D heat-equation engine.
//!
//! Apart from [`heat_curve`], used to load `file(path)` initial
//! conditions, this crate has no internal dependencies. It defines the
//! vocabulary shared by the rest of the workspace: typed handles,
//! the append-only [`Arena`] that issues them, the discretized
//! [`GridField`], the [`ConditionExpression`] initial-condition grammar,
//! and the [`HeatError`] taxonomy.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod condition;
pub mod error;
pub mod field;
pub mod id;

pub use arena::Arena;
pub use condition::{ConditionExpression, Spike};
pub use error::{HeatError, ParseError, ParseErrorKind, StabilityViolation};
pub use field::{GridField, GridSpec};
pub use id::{HandleKind, ProblemHandle, RunHandle, SolutionHandle};
