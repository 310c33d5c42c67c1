//! Solver and run configuration.
//!
//! [`SolverConfig`] travels with a [`Solution`](crate::Solution) and fixes
//! how it is integrated. [`RunOptions`] is per run: its name, recording
//! cadence, convergence threshold and where (if anywhere) curve files go. Both validate to
//! [`HeatError::InvalidParameter`].

use std::path::PathBuf;

use heat_core::HeatError;
use heat_stepper::{Parallelism, Scheme};

/// What to do when an explicit scheme's stability bound is exceeded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StabilityPolicy {
    /// Refuse to build the solution.
    #[default]
    Reject,
    /// Build it, log a warning and attach the violation to the solution.
    Warn,
}

/// Default number of trailing change-history entries a session keeps in
/// memory.
pub const CHANGE_HISTORY_LIMIT: usize = 1 << 20;

/// Upper bound on per-step worker threads.
pub const MAX_WORKERS: usize = 64;

/// Scheme choice and execution settings for a solution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverConfig {
    /// Time-integration scheme. Default: FTCS.
    pub scheme: Scheme,
    /// Stability handling. Default: reject.
    pub stability_policy: StabilityPolicy,
    /// Threads per interior update. Default: 1.
    pub workers: usize,
    /// Smallest grid split across threads. Default: 4096.
    pub parallel_threshold: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            scheme: Scheme::Ftcs,
            stability_policy: StabilityPolicy::Reject,
            workers: 1,
            parallel_threshold: Parallelism::DEFAULT_THRESHOLD,
        }
    }
}

impl SolverConfig {
    /// Default settings with `scheme`.
    pub fn with_scheme(scheme: Scheme) -> Self {
        Self {
            scheme,
            ..Self::default()
        }
    }

    /// Check the settings.
    pub fn validate(&self) -> Result<(), HeatError> {
        if self.workers == 0 || self.workers > MAX_WORKERS {
            return Err(HeatError::invalid(
                "workers",
                format!("must be in 1..={MAX_WORKERS}, got {}", self.workers),
            ));
        }
        Ok(())
    }

    /// The stencil fan-out these settings describe.
    pub fn parallelism(&self) -> Parallelism {
        Parallelism {
            workers: self.workers,
            threshold: self.parallel_threshold,
        }
    }
}

/// Per-run settings.
#[derive(Clone, Debug, PartialEq)]
pub struct RunOptions {
    /// Run name; names the output directory and its files.
    pub name: String,
    /// Record a snapshot every this many steps. `0` records only step 0
    /// and the final state. Default: 100.
    pub output_interval: u64,
    /// Write a checkpoint curve every this many steps. `0` disables.
    /// Default: 0.
    pub save_interval: u64,
    /// Log a progress line every this many steps. `0` disables. Default: 0.
    pub progress_interval: u64,
    /// Stop once a step's mean squared change falls below this. `None`
    /// always runs all `nt` steps. Default: `None`.
    pub min_change: Option<f64>,
    /// Most recent change-history entries kept in memory. The change curve
    /// on disk always holds every step. Default: [`CHANGE_HISTORY_LIMIT`].
    pub history_limit: usize,
    /// Directory that receives `<name>/`. `None` keeps the run in memory.
    pub output_root: Option<PathBuf>,
}

impl RunOptions {
    /// In-memory options with default intervals.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            output_interval: 100,
            save_interval: 0,
            progress_interval: 0,
            min_change: None,
            history_limit: CHANGE_HISTORY_LIMIT,
            output_root: None,
        }
    }

    /// Set the snapshot interval.
    pub fn output_interval(mut self, steps: u64) -> Self {
        self.output_interval = steps;
        self
    }

    /// Set the checkpoint interval.
    pub fn save_interval(mut self, steps: u64) -> Self {
        self.save_interval = steps;
        self
    }

    /// Set the progress-log interval.
    pub fn progress_interval(mut self, steps: u64) -> Self {
        self.progress_interval = steps;
        self
    }

    /// End the run early once the mean squared change of a step drops
    /// below `threshold`.
    pub fn stop_below(mut self, threshold: f64) -> Self {
        self.min_change = Some(threshold);
        self
    }

    /// Keep only the last `entries` change-history values in memory.
    pub fn history_limit(mut self, entries: usize) -> Self {
        self.history_limit = entries;
        self
    }

    /// Write curve files under `root/<name>/`.
    pub fn persist_to(mut self, root: impl Into<PathBuf>) -> Self {
        self.output_root = Some(root.into());
        self
    }

    /// Whether the run writes files.
    pub fn persists(&self) -> bool {
        self.output_root.is_some()
    }

    /// Check the options.
    ///
    /// The name must be non-empty. When persisting it becomes a directory
    /// and file-name prefix, so it must also be a single path component.
    /// A convergence threshold must be positive and finite.
    pub fn validate(&self) -> Result<(), HeatError> {
        if self.name.is_empty() {
            return Err(HeatError::invalid("name", "run name is empty"));
        }
        if let Some(min) = self.min_change {
            if !(min.is_finite() && min > 0.0) {
                return Err(HeatError::invalid(
                    "min_change",
                    format!("must be positive and finite, got {min}"),
                ));
            }
        }
        if self.persists() && !is_path_safe(&self.name) {
            return Err(HeatError::invalid(
                "name",
                format!("'{}' is not a single path component", self.name),
            ));
        }
        Ok(())
    }
}

fn is_path_safe(name: &str) -> bool {
    name != "." && name != ".." && !name.contains(['/', '\\', '\0'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_solver_config_is_valid() {
        let cfg = SolverConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.scheme, Scheme::Ftcs);
        assert_eq!(cfg.stability_policy, StabilityPolicy::Reject);
        assert_eq!(cfg.parallelism(), Parallelism::sequential());
    }

    #[test]
    fn zero_workers_rejected() {
        let cfg = SolverConfig {
            workers: 0,
            ..SolverConfig::default()
        };
        match cfg.validate() {
            Err(HeatError::InvalidParameter { parameter, .. }) => assert_eq!(parameter, "workers"),
            other => panic!("expected InvalidParameter, got {other:?}"),
        }
    }

    #[test]
    fn too_many_workers_rejected() {
        let cfg = SolverConfig {
            workers: MAX_WORKERS + 1,
            ..SolverConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn run_options_builder() {
        let opts = RunOptions::new("wave")
            .output_interval(10)
            .save_interval(50)
            .progress_interval(5)
            .persist_to("/tmp/out");
        assert_eq!(opts.output_interval, 10);
        assert_eq!(opts.save_interval, 50);
        assert_eq!(opts.progress_interval, 5);
        assert!(opts.persists());
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn convergence_threshold_must_be_positive() {
        let opts = RunOptions::new("c").stop_below(1e-16);
        assert_eq!(opts.min_change, Some(1e-16));
        assert!(opts.validate().is_ok());
        for bad in [0.0, -1e-8, f64::NAN, f64::INFINITY] {
            match RunOptions::new("c").stop_below(bad).validate() {
                Err(HeatError::InvalidParameter { parameter, .. }) => {
                    assert_eq!(parameter, "min_change")
                }
                other => panic!("{bad}: expected InvalidParameter, got {other:?}"),
            }
        }
    }

    #[test]
    fn empty_name_rejected() {
        assert!(RunOptions::new("").validate().is_err());
    }

    #[test]
    fn path_names_rejected_only_when_persisting() {
        let in_memory = RunOptions::new("a/b");
        assert!(in_memory.validate().is_ok());
        for bad in ["a/b", "..", ".", "a\\b"] {
            let opts = RunOptions::new(bad).persist_to("out");
            assert!(opts.validate().is_err(), "{bad}");
        }
    }
}
