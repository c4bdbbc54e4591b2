//! Metrics collection for a single day's timed runs

use crate::{
    models::{TrialResult, UnitSummary},
    utils::time::parse_elapsed_micros,
};

/// Keeps the fastest valid timed run of one day
#[derive(Debug, Default)]
pub struct MetricsCollector {
    best: Option<(u64, TrialResult)>,
    runs: u32,
    failed: u32,
    unparseable: u32,
}

impl MetricsCollector {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a timed run.
    ///
    /// Failed runs and runs without a parseable duration are counted but
    /// never become the best run. On ties the earlier run is kept.
    pub fn add_run(&mut self, trial: TrialResult) {
        self.runs += 1;

        if !trial.succeeded {
            self.failed += 1;
            return;
        }

        let Some(micros) = trial.elapsed.as_deref().and_then(parse_elapsed_micros) else {
            self.unparseable += 1;
            return;
        };

        let is_better = self.best.as_ref().is_none_or(|(best, _)| micros < *best);
        if is_better {
            self.best = Some((micros, trial));
        }
    }

    /// Summary of the fastest valid run, if any
    pub fn calculate_summary(&self, unit_id: u32) -> Option<UnitSummary> {
        self.best
            .as_ref()
            .map(|(micros, trial)| UnitSummary::from_best(unit_id, trial, *micros))
    }

    /// Get number of runs
    pub fn run_count(&self) -> u32 {
        self.runs
    }

    /// Runs that exited nonzero or could not be launched
    pub fn failed_count(&self) -> u32 {
        self.failed
    }

    /// Successful runs whose duration could not be parsed
    pub fn unparseable_count(&self) -> u32 {
        self.unparseable
    }
}
