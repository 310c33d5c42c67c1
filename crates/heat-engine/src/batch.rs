//! Concurrent execution of independent runs.
//!
//! Jobs are fed to scoped worker threads over a `crossbeam-channel`; each
//! worker runs its job through the registry and sends `(index, result)`
//! back, and the caller reassembles results in job order. Runs share no
//! mutable state, so the outcome of each job is the same as running it
//! alone.

use std::thread;

use heat_core::{HeatError, RunHandle, SolutionHandle};

use crate::config::RunOptions;
use crate::registry::Registry;

/// One run to execute as part of a batch.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchJob {
    /// Solution to run.
    pub solution: SolutionHandle,
    /// Options for the run.
    pub options: RunOptions,
}

impl BatchJob {
    /// A job running `solution` with `options`.
    pub fn new(solution: SolutionHandle, options: RunOptions) -> Self {
        Self { solution, options }
    }
}

pub(crate) fn run_batch(
    registry: &Registry,
    jobs: &[BatchJob],
    workers: usize,
) -> Vec<Result<RunHandle, HeatError>> {
    let workers = workers.clamp(1, jobs.len().max(1));
    let (job_tx, job_rx) = crossbeam_channel::bounded::<(usize, &BatchJob)>(workers * 2);
    let (done_tx, done_rx) = crossbeam_channel::unbounded();

    thread::scope(|scope| {
        for _ in 0..workers {
            let job_rx = job_rx.clone();
            let done_tx = done_tx.clone();
            scope.spawn(move || {
                while let Ok((index, job)) = job_rx.recv() {
                    let result = registry.run_simulation(job.solution, &job.options);
                    if done_tx.send((index, result)).is_err() {
                        break;
                    }
                }
            });
        }
        drop(job_rx);
        drop(done_tx);

        for item in jobs.iter().enumerate() {
            if job_tx.send(item).is_err() {
                break;
            }
        }
        drop(job_tx);
    });

    let mut results: Vec<Option<Result<RunHandle, HeatError>>> = vec![None; jobs.len()];
    for (index, result) in done_rx.try_iter() {
        results[index] = Some(result);
    }
    tracing::debug!(jobs = jobs.len(), workers, "batch finished");
    results
        .into_iter()
        .map(|r| r.unwrap_or_else(|| Err(HeatError::invalid("batch", "job was not executed"))))
        .collect()
}
