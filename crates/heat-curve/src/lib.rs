//! Plain-text curve files for heat-equation snapshots.
//!
//! A curve file is a `#` comment line naming the quantity followed by one
//! `x y` pair per line in increasing `x`, each number printed in
//! scientific notation with 17 fractional digits (C `% .17e`). This is
//! the format plotting tools such as VisIt read directly.
//!
//! ```text
//! # Temperature
//!  0.00000000000000000e+00  0.00000000000000000e+00
//!  1.00000000000000000e-02  9.99998643021411318e-01
//! ```
//!
//! - [`CurveWriter`] streams points to any `Write` sink
//! - [`read_curve`] parses any `BufRead` source back into a [`Curve`]
//! - [`CurveName`] and [`curve_path`] give the on-disk layout of a run

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod format;
pub mod reader;
pub mod writer;

pub use error::CurveError;
pub use format::{curve_path, format_point, format_value, CurveName};
pub use reader::{read_curve, read_curve_file, Curve};
pub use writer::{create_curve_file, write_curve_file, CurveWriter};

/// Comment label of solution and snapshot curves.
pub const TEMPERATURE_LABEL: &str = "Temperature";
