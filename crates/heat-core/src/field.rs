//! The discretized temperature field and its grid description.

/// Uniform 1D grid: `nx` points spaced `dx` apart, starting at `x = 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridSpec {
    /// Number of grid points, endpoints included.
    pub nx: usize,
    /// Spacing between neighbouring points.
    pub dx: f64,
}

impl GridSpec {
    /// Create a grid description.
    pub fn new(nx: usize, dx: f64) -> Self {
        Self { nx, dx }
    }

    /// Position of grid point `index`.
    pub fn x(&self, index: usize) -> f64 {
        index as f64 * self.dx
    }

    /// Position of the last grid point.
    pub fn length(&self) -> f64 {
        self.x(self.nx.saturating_sub(1))
    }
}

/// Temperature samples at one instant, one per grid point.
#[derive(Clone, Debug, PartialEq)]
pub struct GridField {
    values: Vec<f64>,
    dx: f64,
}

impl GridField {
    /// A field of `spec.nx` zeros.
    pub fn zeros(spec: GridSpec) -> Self {
        Self {
            values: vec![0.0; spec.nx],
            dx: spec.dx,
        }
    }

    /// Wrap existing samples taken on a grid with spacing `dx`.
    pub fn from_values(values: Vec<f64>, dx: f64) -> Self {
        Self { values, dx }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the field has no samples.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Grid spacing.
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// The grid this field is sampled on.
    pub fn spec(&self) -> GridSpec {
        GridSpec::new(self.values.len(), self.dx)
    }

    /// Read-only view of the samples.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Mutable view of the samples.
    pub fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    /// Consume the field, returning its samples.
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// `(x, temperature)` pairs in increasing `x`.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        let dx = self.dx;
        self.values
            .iter()
            .enumerate()
            .map(move |(i, &v)| (i as f64 * dx, v))
    }

    /// Index of the first NaN or infinite sample, if any.
    pub fn first_non_finite(&self) -> Option<usize> {
        self.values.iter().position(|v| !v.is_finite())
    }

    /// Mean squared difference to `other`: `Σ (a_i - b_i)² / n`.
    ///
    /// Fields of different length are compared over the shorter prefix.
    pub fn mean_square_change(&self, other: &GridField) -> f64 {
        let n = self.values.len().min(other.values.len());
        if n == 0 {
            return 0.0;
        }
        let sum: f64 = self
            .values
            .iter()
            .zip(&other.values)
            .map(|(a, b)| (a - b) * (a - b))
            .sum();
        sum / n as f64
    }

    /// Largest absolute sample value (NaN if any sample is NaN).
    pub fn max_abs(&self) -> f64 {
        self.values
            .iter()
            .fold(0.0f64, |acc, v| if v.is_nan() { f64::NAN } else { acc.max(v.abs()) })
    }
}
