//! Completed runs, addressed by [`RunHandle`].

use std::sync::Arc;

use heat_core::{Arena, HandleKind, HeatError, RunHandle};

use crate::session::{RunSession, RunStatus};
use crate::snapshot::Snapshot;

/// Completed runs kept for later retrieval.
///
/// Entries live until discarded. Handles are never reissued, so a stale
/// handle keeps failing with [`HeatError::InvalidHandle`].
#[derive(Debug, Default)]
pub struct ResultStore {
    runs: Arena<Arc<RunSession>>,
}

impl ResultStore {
    /// An empty store.
    pub const fn new() -> Self {
        Self { runs: Arena::new() }
    }

    /// Keep a completed session.
    ///
    /// # Errors
    ///
    /// [`HeatError::InvalidParameter`] if the session has not completed
    /// or the handle space is exhausted.
    pub fn insert(&mut self, session: RunSession) -> Result<RunHandle, HeatError> {
        if session.status() != RunStatus::Completed {
            return Err(HeatError::invalid(
                "run",
                format!(
                    "session '{}' is {:?}, not completed",
                    session.name(),
                    session.status()
                ),
            ));
        }
        self.runs
            .insert(Arc::new(session))
            .map(RunHandle)
            .ok_or_else(|| HeatError::invalid("run", "run handle space exhausted"))
    }

    /// The session behind `handle`.
    pub fn get(&self, handle: RunHandle) -> Result<Arc<RunSession>, HeatError> {
        self.runs
            .get(handle.0)
            .cloned()
            .ok_or_else(|| invalid(handle))
    }

    /// The snapshots of the run behind `handle`.
    pub fn results(&self, handle: RunHandle) -> Result<Arc<[Snapshot]>, HeatError> {
        self.get(handle)?
            .snapshots()
            .ok_or_else(|| invalid(handle))
    }

    /// Forget a run. Its handle is retired.
    pub fn discard(&mut self, handle: RunHandle) -> Result<(), HeatError> {
        self.runs
            .remove(handle.0)
            .map(drop)
            .ok_or_else(|| invalid(handle))
    }

    /// Number of live runs.
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Returns `true` if no run is stored.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

fn invalid(handle: RunHandle) -> HeatError {
    HeatError::InvalidHandle {
        kind: HandleKind::Run,
        handle: i64::from(handle.0),
    }
}
