//! Fixed-value (Dirichlet) end conditions.

/// Temperatures held fixed at `x = 0` and `x = lenx`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dirichlet {
    /// Value imposed at the first grid point.
    pub left: f64,
    /// Value imposed at the last grid point.
    pub right: f64,
}

impl Dirichlet {
    /// Create a boundary pair.
    pub fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }

    /// Overwrite both endpoints of `values`, whatever the stencil put there.
    pub fn apply(&self, values: &mut [f64]) {
        if let Some(first) = values.first_mut() {
            *first = self.left;
        }
        if let Some(last) = values.last_mut() {
            *last = self.right;
        }
    }
}
