//! Append-only slot arena backing the registry tables.
//!
//! Every inserted value gets the next slot index, and indices are never
//! reissued: removing a value retires its slot permanently. A stale index
//! therefore resolves to `None` rather than to an unrelated newer entry,
//! and handles stay small, stable integers for the whole process lifetime.

struct Slot<T> {
    data: Option<T>,
}

/// An append-only table mapping `u32` indices to owned values.
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    live: usize,
}

impl<T> std::fmt::Debug for Arena<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arena")
            .field("live", &self.live)
            .field("issued", &self.slots.len())
            .finish()
    }
}

impl<T> Arena<T> {
    /// Create an empty arena.
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            live: 0,
        }
    }

    /// Insert a value and return its index.
    ///
    /// Returns `None` once the index space (`u32`) is exhausted.
    pub fn insert(&mut self, value: T) -> Option<u32> {
        let index = u32::try_from(self.slots.len()).ok()?;
        self.slots.push(Slot { data: Some(value) });
        self.live += 1;
        Some(index)
    }

    /// Get a reference to the value at `index`.
    ///
    /// Returns `None` if the index was never issued or has been removed.
    pub fn get(&self, index: u32) -> Option<&T> {
        self.slots.get(index as usize)?.data.as_ref()
    }

    /// Get a mutable reference to the value at `index`.
    pub fn get_mut(&mut self, index: u32) -> Option<&mut T> {
        self.slots.get_mut(index as usize)?.data.as_mut()
    }

    /// Remove the value at `index`, retiring the slot.
    ///
    /// Returns `None` if the index is unknown or already removed
    /// (double-remove is a safe no-op).
    pub fn remove(&mut self, index: u32) -> Option<T> {
        let value = self.slots.get_mut(index as usize)?.data.take()?;
        self.live -= 1;
        Some(value)
    }

    /// Number of live (not removed) entries.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns `true` if no live entries remain.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of indices issued so far, including retired ones.
    pub fn issued(&self) -> usize {
        self.slots.len()
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}
