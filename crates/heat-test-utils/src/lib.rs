//! Test utilities for heat-equation development.
//!
//! [`exact`] holds closed-form solutions the numerical schemes are checked
//! against; [`fixtures`] holds named reference scenarios.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod exact;
pub mod fixtures;

pub use fixtures::Scenario;

/// Largest `|a_i - b_i|` over the common prefix of two sample slices.
pub fn max_abs_diff(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

/// Sample `f(x)` at `n` points spaced `dx` apart from `x = 0`.
pub fn sample(n: usize, dx: f64, f: impl Fn(f64) -> f64) -> Vec<f64> {
    (0..n).map(|i| f(i as f64 * dx)).collect()
}
