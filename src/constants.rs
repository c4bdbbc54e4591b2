//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// BENCHMARK DEFAULTS
// =============================================================================

/// Default number of discarded warm-up runs per day
pub const DEFAULT_WARMUP_RUNS: u32 = 3;

/// Default number of timed runs per day (the minimum is reported)
pub const DEFAULT_TIMED_RUNS: u32 = 10;

/// Default deadline for a single run in seconds (0 disables the deadline)
pub const DEFAULT_TRIAL_TIMEOUT_SECS: u64 = 300;

/// Default set of days to benchmark
pub const DEFAULT_DAYS: &str = "1-12";

/// Highest day accepted in a day list
pub const MAX_DAY: u32 = 25;

/// Default launch command. `{day}` is the zero-padded day, `{id}` the plain one.
pub const DEFAULT_COMMAND: &str = "java -cp build/classes/java/main aoc.day{day}.Day{day}";

/// Default report document
pub const DEFAULT_README_PATH: &str = "README.md";

/// Default log filter when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "aoc_bench=info";

// =============================================================================
// COMMAND TEMPLATE PLACEHOLDERS
// =============================================================================

/// Replaced by the two-digit day number
pub const DAY_PLACEHOLDER: &str = "{day}";

/// Replaced by the plain day number
pub const ID_PLACEHOLDER: &str = "{id}";

// =============================================================================
// REPORT FORMAT
// =============================================================================

/// Markdown constants of the generated Performance section
pub mod report {
    /// Section heading
    pub const HEADING: &str = "## Performance";

    /// Prefix of the machine description line
    pub const MACHINE_PREFIX: &str = "**Machine:**";

    /// Table header row
    pub const TABLE_HEADER: &str = "| Day | Time |";

    /// Table separator row
    pub const TABLE_SEPARATOR: &str = "|-----|------|";

    /// Placeholder for answers a run did not print
    pub const MISSING_FIELD: &str = "-";

    /// Fallback when machine metadata cannot be collected
    pub const UNKNOWN: &str = "Unknown";
}

// =============================================================================
// TIME UNITS
// =============================================================================

/// Microseconds per millisecond
pub const MICROS_PER_MILLI: u64 = 1_000;

/// Microseconds per second
pub const MICROS_PER_SECOND: u64 = 1_000_000;
