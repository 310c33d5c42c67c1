//! Recorded field states.

use std::sync::Arc;

use heat_core::GridField;
use indexmap::IndexMap;

/// Why a snapshot was recorded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SnapshotKind {
    /// Step 0 or a multiple of the output interval.
    Periodic,
    /// The state after the last step.
    Final,
}

/// The field at one step of a run.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    /// Steps taken when the field was recorded.
    pub step: u64,
    /// Simulated time, `step * dt`.
    pub time: f64,
    /// Why it was recorded.
    pub kind: SnapshotKind,
    /// The temperature samples.
    pub field: GridField,
}

/// Periodic snapshots keyed by step, in recording order, plus the final
/// one.
#[derive(Clone, Debug, Default)]
pub struct SnapshotLog {
    periodic: IndexMap<u64, Snapshot>,
    last: Option<Snapshot>,
}

impl SnapshotLog {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a periodic snapshot. A second snapshot for the same step
    /// replaces the first.
    pub fn record(&mut self, step: u64, time: f64, field: GridField) {
        self.periodic.insert(
            step,
            Snapshot {
                step,
                time,
                kind: SnapshotKind::Periodic,
                field,
            },
        );
    }

    /// Record the final snapshot.
    pub fn record_final(&mut self, step: u64, time: f64, field: GridField) {
        self.last = Some(Snapshot {
            step,
            time,
            kind: SnapshotKind::Final,
            field,
        });
    }

    /// The periodic snapshot taken at `step`.
    pub fn at_step(&self, step: u64) -> Option<&Snapshot> {
        self.periodic.get(&step)
    }

    /// The final snapshot, once recorded.
    pub fn final_snapshot(&self) -> Option<&Snapshot> {
        self.last.as_ref()
    }

    /// Number of snapshots, final included.
    pub fn len(&self) -> usize {
        self.periodic.len() + usize::from(self.last.is_some())
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All snapshots in recording order, final last.
    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.periodic.values().chain(self.last.iter())
    }

    /// Freeze the log into a shared slice.
    pub fn into_shared(self) -> Arc<[Snapshot]> {
        self.periodic.into_values().chain(self.last).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(v: f64) -> GridField {
        GridField::from_values(vec![v; 3], 0.5)
    }

    #[test]
    fn final_comes_last() {
        let mut log = SnapshotLog::new();
        assert!(log.is_empty());
        log.record(0, 0.0, field(0.0));
        log.record(10, 1.0, field(1.0));
        log.record_final(10, 1.0, field(1.0));
        assert_eq!(log.len(), 3);

        let kinds: Vec<_> = log.iter().map(|s| (s.step, s.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                (0, SnapshotKind::Periodic),
                (10, SnapshotKind::Periodic),
                (10, SnapshotKind::Final)
            ]
        );
        assert_eq!(log.at_step(10).map(|s| s.time), Some(1.0));
        assert_eq!(log.final_snapshot().map(|s| s.kind), Some(SnapshotKind::Final));

        let shared = log.into_shared();
        assert_eq!(shared.len(), 3);
        assert_eq!(shared[2].kind, SnapshotKind::Final);
    }

    #[test]
    fn same_step_replaces() {
        let mut log = SnapshotLog::new();
        log.record(5, 0.5, field(1.0));
        log.record(5, 0.5, field(2.0));
        assert_eq!(log.len(), 1);
        assert_eq!(log.at_step(5).map(|s| s.field.values()[0]), Some(2.0));
        assert!(log.at_step(4).is_none());
    }
}
