//! Trial result model

use serde::{Deserialize, Serialize};

use crate::benchmark::parser::ParsedOutput;

/// Outcome of a single run of a day's program
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialResult {
    /// Part 1 answer (or single `Result:` answer)
    pub primary_answer: Option<String>,
    /// Part 2 answer
    pub secondary_answer: Option<String>,
    /// Raw duration text as printed by the program
    pub elapsed: Option<String>,
    /// Whether the program exited with status 0
    pub succeeded: bool,
}

impl TrialResult {
    /// Successful run with the fields scraped from its output
    pub fn success(parsed: ParsedOutput) -> Self {
        Self {
            primary_answer: parsed.primary_answer,
            secondary_answer: parsed.secondary_answer,
            elapsed: parsed.elapsed,
            succeeded: true,
        }
    }

    /// Failed run; captured output is discarded
    pub fn failure() -> Self {
        Self::default()
    }
}
