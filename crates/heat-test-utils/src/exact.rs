//! Closed-form solutions of `u_t = alpha * u_xx`.

use std::f64::consts::PI;

/// Terms summed by [`const_fourier_series`].
pub const FOURIER_TERMS: usize = 1000;

/// Steady state on `[0, lenx]` with end values `bc0` and `bc1`: the
/// straight line between them.
pub fn steady_state(x: f64, lenx: f64, bc0: f64, bc1: f64) -> f64 {
    bc0 + (bc1 - bc0) * x / lenx
}

/// Decay of `amplitude * sin(pi * frequency * x)` with zero ends on the
/// unit interval. `frequency` must be a positive integer for the ends to
/// stay at zero.
pub fn sine_decay(x: f64, t: f64, alpha: f64, amplitude: f64, frequency: f64) -> f64 {
    let k = PI * frequency;
    amplitude * (k * x).sin() * (-alpha * k * k * t).exp()
}

/// Spread of an instantaneous point source of total heat `strength`
/// released at `x0` on an unbounded line.
///
/// Valid on a bounded grid while the profile is still negligible at the
/// ends.
pub fn impulse(x: f64, t: f64, alpha: f64, x0: f64, strength: f64) -> f64 {
    let d = 4.0 * alpha * t;
    strength / (PI * d).sqrt() * (-(x - x0) * (x - x0) / d).exp()
}

/// Uniform initial value `c` with zero ends on the unit interval, summed
/// over the first [`FOURIER_TERMS`] sine modes.
///
/// Only odd modes contribute: `4c / (n pi) * sin(n pi x) * exp(-alpha n² pi² t)`.
pub fn const_fourier_series(x: f64, t: f64, alpha: f64, c: f64) -> f64 {
    (1..FOURIER_TERMS)
        .step_by(2)
        .map(|n| {
            let k = n as f64 * PI;
            4.0 * c / k * (k * x).sin() * (-alpha * k * k * t).exp()
        })
        .sum()
}
