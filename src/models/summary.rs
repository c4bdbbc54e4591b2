//! Benchmark summary models

use serde::{Deserialize, Serialize};

use crate::{constants::report::MISSING_FIELD, models::TrialResult, utils::time::format_micros};

/// Best result for one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSummary {
    pub unit_id: u32,
    /// Part 1 answer of the fastest run, or `-`
    pub primary_answer: String,
    /// Part 2 answer of the fastest run, or `-`
    pub secondary_answer: String,
    /// Minimum elapsed time over the valid timed runs
    pub best_elapsed_micros: u64,
    /// `best_elapsed_micros` formatted for the report table
    pub display_elapsed: String,
}

impl UnitSummary {
    /// Build the summary from the fastest valid trial
    pub fn from_best(unit_id: u32, best: &TrialResult, best_elapsed_micros: u64) -> Self {
        Self {
            unit_id,
            primary_answer: best
                .primary_answer
                .clone()
                .unwrap_or_else(|| MISSING_FIELD.to_string()),
            secondary_answer: best
                .secondary_answer
                .clone()
                .unwrap_or_else(|| MISSING_FIELD.to_string()),
            best_elapsed_micros,
            display_elapsed: format_micros(best_elapsed_micros),
        }
    }
}

/// Joined outcome of a benchmark run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    /// Days with at least one valid timed run, ascending by day
    pub summaries: Vec<UnitSummary>,
    /// Days without any valid timed run, ascending
    pub omitted: Vec<u32>,
}

impl BenchmarkReport {
    /// Collect per-day outcomes in any completion order
    pub fn from_outcomes(outcomes: impl IntoIterator<Item = (u32, Option<UnitSummary>)>) -> Self {
        let mut report = Self::default();

        for (unit_id, summary) in outcomes {
            match summary {
                Some(summary) => report.summaries.push(summary),
                None => report.omitted.push(unit_id),
            }
        }

        report.summaries.sort_by_key(|s| s.unit_id);
        report.omitted.sort_unstable();
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(unit_id: u32) -> UnitSummary {
        UnitSummary::from_best(unit_id, &TrialResult::default(), 1_000)
    }

    #[test]
    fn test_missing_answers_use_placeholder() {
        let s = summary(3);
        assert_eq!(s.primary_answer, "-");
        assert_eq!(s.secondary_answer, "-");
        assert_eq!(s.display_elapsed, "1 ms");
    }

    #[test]
    fn test_from_outcomes_sorts_by_day() {
        let report = BenchmarkReport::from_outcomes(vec![
            (5, Some(summary(5))),
            (1, Some(summary(1))),
            (7, None),
            (9, Some(summary(9))),
            (2, Some(summary(2))),
            (4, None),
        ]);

        let ids: Vec<u32> = report.summaries.iter().map(|s| s.unit_id).collect();
        assert_eq!(ids, vec![1, 2, 5, 9]);
        assert_eq!(report.omitted, vec![4, 7]);
    }
}
