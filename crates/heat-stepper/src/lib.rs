//! Explicit time steppers for the 1D heat equation.
//!
//! A [`TimeStepper`] advances the [`TimeLevels`] of a run by one `dt`:
//! it fills the staging buffer from the retained levels, re-imposes the
//! Dirichlet end values, and rotates the buffers. Two schemes are provided:
//!
//! - [`Ftcs`]: forward-time centred-space, two-level, stable for
//!   `alpha*dt/dx² <= 0.5`.
//! - [`DufortFrankel`]: three-level and unconditionally stable, bootstrapped
//!   by a single FTCS step.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boundary;
pub mod context;
pub mod dufort_frankel;
pub mod ftcs;
pub mod levels;
pub mod scheme;
pub mod stencil;
pub mod stepper;

pub use boundary::Dirichlet;
pub use context::StepContext;
pub use dufort_frankel::DufortFrankel;
pub use ftcs::Ftcs;
pub use levels::TimeLevels;
pub use scheme::{fourier_number, Scheme};
pub use stencil::Parallelism;
pub use stepper::TimeStepper;
