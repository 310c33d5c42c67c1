//! Per-run counters.

/// What a run did and how long it took.
///
/// Durations are in microseconds. Filled in as the run progresses; a
/// failed run reports the work done up to the failure.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunMetrics {
    /// Time steps taken.
    pub steps: u64,
    /// Whether the run stopped early on its convergence threshold.
    pub converged: bool,
    /// Snapshots recorded in memory, final included.
    pub snapshots: usize,
    /// Checkpoint curves written at the save interval.
    pub checkpoints: u64,
    /// Curve files written in total (initial, checkpoints, final, change).
    pub files_written: u64,
    /// Wall-clock time spent in `execute`, in microseconds.
    pub total_us: u64,
}
