//! One integration of a [`Solution`] from `t = 0` to `maxt`.
//!
//! # State machine
//!
//! ```text
//! Initialized ──execute()──> Running ──> Completed
//!                                   └──> Failed
//! ```
//!
//! Transitions only move forward; a session is executed at most once.
//! Step 0 is recorded on construction. While running, a snapshot is
//! recorded every `output_interval` steps and, when persisting, a
//! checkpoint curve is written every `save_interval` steps. A run with a
//! convergence threshold stops after the first step whose mean squared
//! change falls below it. Completion always records a final snapshot at
//! the last step taken. A non-finite value after a step or a failed file
//! write ends the run in `Failed`.
//!
//! The change history is streamed to its curve file as it grows; only the
//! most recent `history_limit` entries stay in memory.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use heat_core::{GridField, HeatError};
use heat_curve::{
    create_curve_file, curve_path, write_curve_file, CurveError, CurveName, CurveWriter,
    TEMPERATURE_LABEL,
};
use heat_stepper::{TimeLevels, TimeStepper};

use crate::config::RunOptions;
use crate::metrics::RunMetrics;
use crate::snapshot::{Snapshot, SnapshotLog};
use crate::solution::Solution;

const HISTORY_PREALLOC: usize = 1 << 16;

/// Lifecycle state of a [`RunSession`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStatus {
    /// Built, step 0 recorded, not yet executed.
    Initialized,
    /// Stepping.
    Running,
    /// All steps taken; results available.
    Completed,
    /// Stopped by divergence or an I/O failure.
    Failed,
}

/// A single run of a solution.
pub struct RunSession {
    solution: Arc<Solution>,
    options: RunOptions,
    stepper: Box<dyn TimeStepper>,
    levels: TimeLevels,
    log: SnapshotLog,
    results: Option<Arc<[Snapshot]>>,
    change_history: Vec<f64>,
    change_curve: Option<(PathBuf, CurveWriter<BufWriter<File>>)>,
    status: RunStatus,
    failure: Option<HeatError>,
    metrics: RunMetrics,
}

impl RunSession {
    /// Set up a run: sample the initial field and record step 0.
    ///
    /// # Errors
    ///
    /// [`HeatError::InvalidParameter`] if `options` do not validate.
    pub fn new(solution: Arc<Solution>, options: RunOptions) -> Result<Self, HeatError> {
        options.validate()?;
        let initial = solution.initial_field();
        let mut log = SnapshotLog::new();
        log.record(0, 0.0, initial.clone());
        tracing::debug!(
            run = %options.name,
            scheme = solution.scheme().name(),
            nx = solution.nx(),
            nt = solution.nt(),
            "run initialized"
        );
        Ok(Self {
            stepper: solution.scheme().stepper(),
            levels: TimeLevels::new(initial),
            change_history: Vec::with_capacity(
                usize::try_from(solution.nt())
                    .map_or(HISTORY_PREALLOC, |n| n.min(HISTORY_PREALLOC))
                    .min(options.history_limit),
            ),
            change_curve: None,
            solution,
            options,
            log,
            results: None,
            status: RunStatus::Initialized,
            failure: None,
            metrics: RunMetrics::default(),
        })
    }

    /// Take all `nt` steps, or fewer when the run converges first.
    ///
    /// On failure the session moves to [`RunStatus::Failed`], keeps the
    /// error (see [`failure`](Self::failure)) and returns it.
    ///
    /// # Errors
    ///
    /// - [`HeatError::InvalidParameter`] if the session was already executed.
    /// - [`HeatError::DivergenceDetected`] if a non-finite value appears.
    /// - [`HeatError::IoFailure`] if a curve file cannot be written.
    pub fn execute(&mut self) -> Result<(), HeatError> {
        if self.status != RunStatus::Initialized {
            return Err(HeatError::invalid(
                "run",
                format!("session '{}' has already been executed", self.options.name),
            ));
        }
        self.status = RunStatus::Running;
        tracing::debug!(run = %self.options.name, "run started");

        let start = Instant::now();
        let outcome = self.step_all();
        self.metrics.total_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);

        match outcome {
            Ok(()) => {
                self.metrics.snapshots = self.log.len();
                self.results = Some(std::mem::take(&mut self.log).into_shared());
                self.status = RunStatus::Completed;
                tracing::debug!(
                    run = %self.options.name,
                    steps = self.metrics.steps,
                    snapshots = self.metrics.snapshots,
                    total_us = self.metrics.total_us,
                    "run completed"
                );
                Ok(())
            }
            Err(err) => {
                self.metrics.snapshots = self.log.len();
                self.status = RunStatus::Failed;
                tracing::warn!(run = %self.options.name, error = %err, "run failed");
                self.failure = Some(err.clone());
                Err(err)
            }
        }
    }

    fn step_all(&mut self) -> Result<(), HeatError> {
        if self.options.persists() {
            self.write_field(CurveName::Step(0))?;
            self.open_change_curve()?;
        }

        let nt = self.solution.nt();
        let ctx = self.solution.step_context();
        let out_i = self.options.output_interval;
        let save_i = self.options.save_interval;
        let progress_i = self.options.progress_interval;
        let min_change = self.options.min_change;
        let mut last = 0;

        for step in 1..=nt {
            self.stepper.advance(&mut self.levels, &ctx);
            self.metrics.steps = step;
            last = step;

            let current = self.levels.current();
            if let Some(index) = current.first_non_finite() {
                return Err(HeatError::DivergenceDetected { step, index });
            }
            let change = current.mean_square_change(self.levels.superseded());
            self.push_change(step, change)?;

            let current = self.levels.current();
            if out_i > 0 && step % out_i == 0 {
                self.log
                    .record(step, self.solution.time_at(step), current.clone());
            }
            if self.options.persists() && save_i > 0 && step % save_i == 0 {
                self.write_field(CurveName::Step(step))?;
                self.metrics.checkpoints += 1;
            }
            if progress_i > 0 && step % progress_i == 0 {
                tracing::info!(
                    run = %self.options.name,
                    step,
                    nt,
                    change,
                    threshold = ?min_change,
                    "progress"
                );
            }
            if let Some(threshold) = min_change.filter(|&min| change < min) {
                self.metrics.converged = true;
                tracing::info!(
                    run = %self.options.name,
                    step,
                    change,
                    threshold,
                    "converged"
                );
                break;
            }
        }

        self.log.record_final(
            last,
            self.solution.time_at(last),
            self.levels.current().clone(),
        );
        if self.options.persists() {
            self.write_field(CurveName::Final)?;
            self.close_change_curve()?;
        }
        Ok(())
    }

    fn push_change(&mut self, step: u64, change: f64) -> Result<(), HeatError> {
        let limit = self.options.history_limit;
        self.change_history.push(change);
        if self.change_history.len() >= limit.saturating_mul(2).max(1) {
            let excess = self.change_history.len() - limit;
            self.change_history.drain(..excess);
        }
        if let Some((path, writer)) = self.change_curve.as_mut() {
            let x = step as f64 * self.solution.dt();
            if let Err(e) = writer.write_point(x, change) {
                return Err(io_failure(path.clone(), e));
            }
        }
        Ok(())
    }

    fn open_change_curve(&mut self) -> Result<(), HeatError> {
        let Some(root) = self.options.output_root.as_deref() else {
            return Ok(());
        };
        let run = &self.options.name;
        let label = format!("{run}/{run}_l2_change");
        let path = curve_path(root, run, CurveName::Change);
        match create_curve_file(&path, &label) {
            Ok(writer) => {
                self.change_curve = Some((path, writer));
                Ok(())
            }
            Err(e) => Err(io_failure(path, e)),
        }
    }

    fn close_change_curve(&mut self) -> Result<(), HeatError> {
        let Some((path, writer)) = self.change_curve.take() else {
            return Ok(());
        };
        let n = writer.points_written();
        writer.finish().map_err(|e| io_failure(path.clone(), e))?;
        self.metrics.files_written += 1;
        tracing::debug!(path = %path.display(), points = n, "curve written");
        Ok(())
    }

    fn write_field(&mut self, name: CurveName) -> Result<(), HeatError> {
        let points = self.levels.current().points().collect();
        self.write_curve(name, TEMPERATURE_LABEL.to_string(), points)
    }

    fn write_curve(
        &mut self,
        name: CurveName,
        label: String,
        points: Vec<(f64, f64)>,
    ) -> Result<(), HeatError> {
        let Some(root) = self.options.output_root.as_deref() else {
            return Ok(());
        };
        let path = curve_path(root, &self.options.name, name);
        match write_curve_file(&path, &label, points) {
            Ok(n) => {
                self.metrics.files_written += 1;
                tracing::debug!(path = %path.display(), points = n, "curve written");
                Ok(())
            }
            Err(e) => Err(io_failure(path, e)),
        }
    }

    /// Current lifecycle state.
    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// The error that failed the run.
    pub fn failure(&self) -> Option<&HeatError> {
        self.failure.as_ref()
    }

    /// The solution being run.
    pub fn solution(&self) -> &Arc<Solution> {
        &self.solution
    }

    /// The run's options.
    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// Run name.
    pub fn name(&self) -> &str {
        &self.options.name
    }

    /// Recorded snapshots in order, final last. `None` unless completed.
    ///
    /// Times are non-decreasing, not strictly increasing: when the last
    /// step taken is a multiple of the output interval, the final snapshot
    /// repeats the last periodic one's step and time.
    pub fn snapshots(&self) -> Option<Arc<[Snapshot]>> {
        self.results.clone()
    }

    /// The field at the most recent step.
    pub fn current_field(&self) -> &GridField {
        self.levels.current()
    }

    /// Mean squared change of the field after each step, in step order.
    ///
    /// Holds at most the last `history_limit` steps; earlier entries are
    /// only in the persisted change curve.
    pub fn change_history(&self) -> &[f64] {
        let h = &self.change_history;
        &h[h.len().saturating_sub(self.options.history_limit)..]
    }

    /// Counters for this run.
    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }
}

fn io_failure(path: PathBuf, e: CurveError) -> HeatError {
    HeatError::IoFailure {
        path,
        source: e.into_io(),
    }
}

impl std::fmt::Debug for RunSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunSession")
            .field("name", &self.options.name)
            .field("scheme", &self.stepper.name())
            .field("status", &self.status)
            .field("steps", &self.metrics.steps)
            .finish_non_exhaustive()
    }
}
