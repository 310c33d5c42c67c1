//! Rotating time-level buffers.
//!
//! [`TimeLevels`] keeps the field at the current time, optionally the
//! field one step earlier, and a staging buffer the next level is written
//! into. [`commit`](TimeLevels::commit) rotates the roles instead of
//! copying, so after the first three-level step no buffer is allocated.

use std::mem;

use heat_core::GridField;

/// The retained fields of a run.
#[derive(Clone, Debug)]
pub struct TimeLevels {
    current: GridField,
    previous: Option<GridField>,
    staging: GridField,
    steps: u64,
}

impl TimeLevels {
    /// Start from `initial` at step 0 with no earlier level.
    pub fn new(initial: GridField) -> Self {
        Self {
            staging: initial.clone(),
            current: initial,
            previous: None,
            steps: 0,
        }
    }

    /// The field at the current time.
    pub fn current(&self) -> &GridField {
        &self.current
    }

    /// The field one step before the current one, once a three-level
    /// scheme has started retaining it.
    pub fn previous(&self) -> Option<&GridField> {
        self.previous.as_ref()
    }

    /// Number of committed steps.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// The level that was current before the latest commit.
    ///
    /// Before the first commit this is a copy of the initial field.
    pub fn superseded(&self) -> &GridField {
        self.previous.as_ref().unwrap_or(&self.staging)
    }

    /// Borrow `(current, previous, staging)` for an update.
    pub fn split(&mut self) -> (&GridField, Option<&GridField>, &mut GridField) {
        (&self.current, self.previous.as_ref(), &mut self.staging)
    }

    /// Make the staging buffer the current level.
    ///
    /// With `retain_previous` the old current level becomes `previous`
    /// (three-level schemes); otherwise it is recycled as staging.
    pub fn commit(&mut self, retain_previous: bool) {
        if retain_previous {
            let recycled = match self.previous.take() {
                Some(old) => old,
                None => self.current.clone(),
            };
            let next = mem::replace(&mut self.staging, recycled);
            self.previous = Some(mem::replace(&mut self.current, next));
        } else {
            mem::swap(&mut self.current, &mut self.staging);
            self.previous = None;
        }
        self.steps += 1;
    }

    /// Consume the levels, returning the current field.
    pub fn into_current(self) -> GridField {
        self.current
    }
}
