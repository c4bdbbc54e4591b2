//! Benchmark runner - Orchestrates the benchmarking process
//!
//! Days are benchmarked concurrently; the runs of a single day are strictly
//! sequential (warm-up first, then the timed runs). Each day produces its own
//! outcome and the caller sorts them, so completion order never matters.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::{
    config::BenchmarkConfig,
    models::{BenchmarkReport, UnitSummary, WorkUnit, WorkUnitTable},
};

use super::{executor::TrialInvoker, metrics::MetricsCollector};

/// Benchmark runner for the configured days
pub struct BenchmarkRunner {
    invoker: Arc<dyn TrialInvoker>,
    config: BenchmarkConfig,
}

impl BenchmarkRunner {
    /// Create a new benchmark runner
    pub fn new(invoker: Arc<dyn TrialInvoker>, config: BenchmarkConfig) -> Self {
        Self { invoker, config }
    }

    /// Benchmark every day in the table and collect the sorted results
    pub async fn run_all(&self, units: &WorkUnitTable) -> BenchmarkReport {
        info!(
            days = units.len(),
            warmup_runs = self.config.warmup_runs,
            timed_runs = self.config.timed_runs,
            parallelism = self.config.parallelism,
            "Starting benchmark"
        );

        let outcomes: Vec<(u32, Option<UnitSummary>)> = stream::iter(units.iter())
            .map(|unit| async move { (unit.id, self.benchmark_unit(unit).await) })
            .buffer_unordered(self.config.parallelism.max(1))
            .collect()
            .await;

        BenchmarkReport::from_outcomes(outcomes)
    }

    /// Warm up, then time a single day.
    ///
    /// Returns `None` if none of the timed runs succeeded with a parseable
    /// duration.
    pub async fn benchmark_unit(&self, unit: &WorkUnit) -> Option<UnitSummary> {
        debug!(day = unit.id, command = %unit.command_line(), "Warming up");
        for _ in 0..self.config.warmup_runs {
            self.invoker.invoke(unit).await;
        }

        let mut collector = MetricsCollector::new();
        for _ in 0..self.config.timed_runs {
            collector.add_run(self.invoker.invoke(unit).await);
        }

        match collector.calculate_summary(unit.id) {
            Some(summary) => {
                info!(
                    day = unit.id,
                    part1 = %summary.primary_answer,
                    part2 = %summary.secondary_answer,
                    time = %summary.display_elapsed,
                    "Day benchmarked"
                );
                Some(summary)
            }
            None => {
                warn!(
                    day = unit.id,
                    runs = collector.run_count(),
                    failed = collector.failed_count(),
                    unparseable = collector.unparseable_count(),
                    "Day {} has no valid timed runs and is omitted from the report",
                    unit.id
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::benchmark::executor::MockTrialInvoker;
    use crate::models::TrialResult;

    fn config() -> BenchmarkConfig {
        BenchmarkConfig {
            warmup_runs: 3,
            timed_runs: 10,
            trial_timeout: None,
            parallelism: 4,
        }
    }

    fn unit(id: u32) -> WorkUnit {
        WorkUnit {
            id,
            program: format!("day{:02}", id),
            args: vec![],
        }
    }

    fn table(ids: impl IntoIterator<Item = u32>) -> WorkUnitTable {
        WorkUnitTable::new(ids.into_iter().map(unit).collect())
    }

    fn timed(elapsed: &str) -> TrialResult {
        TrialResult {
            primary_answer: Some("1".to_string()),
            secondary_answer: Some("2".to_string()),
            elapsed: Some(elapsed.to_string()),
            succeeded: true,
        }
    }

    #[tokio::test]
    async fn test_runs_warmup_and_timed_runs() {
        let mut invoker = MockTrialInvoker::new();
        invoker
            .expect_invoke()
            .times(13)
            .returning(|_| timed("8 ms"));

        let runner = BenchmarkRunner::new(Arc::new(invoker), config());
        let summary = runner.benchmark_unit(&unit(1)).await;

        assert_eq!(summary.unwrap().display_elapsed, "8 ms");
    }

    /// Log sink shared with a test subscriber
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_failing_day_is_omitted() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let mut invoker = MockTrialInvoker::new();
        invoker.expect_invoke().returning(|unit| {
            if unit.id == 7 {
                TrialResult::failure()
            } else {
                timed(&format!("{} ms", unit.id))
            }
        });

        let runner = BenchmarkRunner::new(Arc::new(invoker), config());
        let report = runner.run_all(&table(1..=12)).await;

        assert_eq!(report.summaries.len(), 11);
        assert!(report.summaries.iter().all(|s| s.unit_id != 7));
        assert_eq!(report.omitted, vec![7]);

        let logs = logs.contents();
        assert!(logs.contains("WARN"));
        assert!(logs.contains("Day 7 has no valid timed runs and is omitted from the report"));
        assert!(!logs.contains("Day 6 has no valid timed runs"));
    }

    /// Finishes days out of id order
    struct DelayedInvoker;

    #[async_trait]
    impl TrialInvoker for DelayedInvoker {
        async fn invoke(&self, unit: &WorkUnit) -> TrialResult {
            let delay = match unit.id {
                5 => 1,
                1 => 15,
                9 => 5,
                _ => 10,
            };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            timed("1 ms")
        }
    }

    #[tokio::test]
    async fn test_results_sorted_regardless_of_completion_order() {
        let runner = BenchmarkRunner::new(
            Arc::new(DelayedInvoker),
            BenchmarkConfig {
                warmup_runs: 0,
                timed_runs: 1,
                trial_timeout: None,
                parallelism: 4,
            },
        );
        let report = runner.run_all(&table([5, 1, 9, 2])).await;

        let ids: Vec<u32> = report.summaries.iter().map(|s| s.unit_id).collect();
        assert_eq!(ids, vec![1, 2, 5, 9]);
        assert!(report.omitted.is_empty());
    }

    #[tokio::test]
    async fn test_best_run_answers_are_reported() {
        let mut invoker = MockTrialInvoker::new();
        let mut calls = 0;
        invoker.expect_invoke().returning(move |_| {
            calls += 1;
            match calls {
                // Warm-up runs are discarded even when fastest
                1 => timed("1 µs"),
                2 | 3 => TrialResult::failure(),
                6 => TrialResult {
                    primary_answer: Some("fast".to_string()),
                    ..timed("3 ms")
                },
                _ => timed("9 ms"),
            }
        });

        let runner = BenchmarkRunner::new(Arc::new(invoker), config());
        let summary = runner.benchmark_unit(&unit(3)).await.unwrap();

        assert_eq!(summary.best_elapsed_micros, 3_000);
        assert_eq!(summary.primary_answer, "fast");
        assert_eq!(summary.secondary_answer, "2");
    }
}
