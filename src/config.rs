//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! All configuration is loaded before any day is run, so the set of work units is fixed
//! up front.

use std::env;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    DEFAULT_COMMAND, DEFAULT_DAYS, DEFAULT_LOG_FILTER, DEFAULT_README_PATH, DEFAULT_TIMED_RUNS,
    DEFAULT_TRIAL_TIMEOUT_SECS, DEFAULT_WARMUP_RUNS, MAX_DAY,
};

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub log: LogConfig,
    pub benchmark: BenchmarkConfig,
    pub units: UnitConfig,
    pub report: ReportConfig,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub rust_log: String,
}

/// Benchmark execution configuration
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Runs per day whose results are discarded
    pub warmup_runs: u32,
    /// Runs per day considered for the minimum
    pub timed_runs: u32,
    /// Deadline for a single run (None = wait forever)
    pub trial_timeout: Option<Duration>,
    /// Maximum number of days benchmarked concurrently
    pub parallelism: usize,
}

/// Work unit resolution
#[derive(Debug, Clone)]
pub struct UnitConfig {
    /// Days to run, ascending and deduplicated
    pub days: Vec<u32>,
    /// Launch command template
    pub command: String,
    /// Working directory for the launched programs
    pub working_dir: Option<PathBuf>,
}

/// Report document configuration
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub readme_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            log: LogConfig::from_env(),
            benchmark: BenchmarkConfig::from_env()?,
            units: UnitConfig::from_env()?,
            report: ReportConfig::from_env(),
        })
    }
}

impl LogConfig {
    fn from_env() -> Self {
        Self {
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
        }
    }
}

impl BenchmarkConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let warmup_runs = env::var("BENCH_WARMUP_RUNS")
            .unwrap_or_else(|_| DEFAULT_WARMUP_RUNS.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("BENCH_WARMUP_RUNS".to_string()))?;

        let timed_runs: u32 = env::var("BENCH_TIMED_RUNS")
            .unwrap_or_else(|_| DEFAULT_TIMED_RUNS.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("BENCH_TIMED_RUNS".to_string()))?;
        if timed_runs == 0 {
            return Err(ConfigError::InvalidValue("BENCH_TIMED_RUNS".to_string()));
        }

        let timeout_secs: u64 = env::var("BENCH_TRIAL_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TRIAL_TIMEOUT_SECS.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("BENCH_TRIAL_TIMEOUT_SECS".to_string()))?;

        let parallelism = match env::var("BENCH_PARALLELISM") {
            Ok(value) => value
                .parse::<NonZeroUsize>()
                .map_err(|_| ConfigError::InvalidValue("BENCH_PARALLELISM".to_string()))?
                .get(),
            Err(_) => default_parallelism(),
        };

        Ok(Self {
            warmup_runs,
            timed_runs,
            trial_timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
            parallelism,
        })
    }
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            warmup_runs: DEFAULT_WARMUP_RUNS,
            timed_runs: DEFAULT_TIMED_RUNS,
            trial_timeout: Some(Duration::from_secs(DEFAULT_TRIAL_TIMEOUT_SECS)),
            parallelism: default_parallelism(),
        }
    }
}

impl UnitConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let days = env::var("BENCH_DAYS").unwrap_or_else(|_| DEFAULT_DAYS.to_string());

        let command = env::var("BENCH_COMMAND").unwrap_or_else(|_| DEFAULT_COMMAND.to_string());
        if command.split_whitespace().next().is_none() {
            return Err(ConfigError::InvalidValue("BENCH_COMMAND".to_string()));
        }

        Ok(Self {
            days: parse_days(&days)
                .ok_or_else(|| ConfigError::InvalidValue("BENCH_DAYS".to_string()))?,
            command,
            working_dir: env::var("BENCH_WORKING_DIR").ok().map(PathBuf::from),
        })
    }
}

impl ReportConfig {
    fn from_env() -> Self {
        Self {
            readme_path: PathBuf::from(
                env::var("BENCH_README_PATH").unwrap_or_else(|_| DEFAULT_README_PATH.to_string()),
            ),
        }
    }
}

/// Parse a day list such as `1-12` or `1,3,5-7`.
///
/// Returns `None` for malformed input, days outside `1..=MAX_DAY`, reversed
/// ranges, or an empty list.
pub fn parse_days(list: &str) -> Option<Vec<u32>> {
    let mut days = Vec::new();

    for part in list.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match part.split_once('-') {
            Some((start, end)) => {
                let start: u32 = start.trim().parse().ok()?;
                let end: u32 = end.trim().parse().ok()?;
                if !is_valid_day(start) || !is_valid_day(end) || start > end {
                    return None;
                }
                days.extend(start..=end);
            }
            None => {
                let day: u32 = part.parse().ok()?;
                if !is_valid_day(day) {
                    return None;
                }
                days.push(day);
            }
        }
    }

    days.sort_unstable();
    days.dedup();
    (!days.is_empty()).then_some(days)
}

fn is_valid_day(day: u32) -> bool {
    (1..=MAX_DAY).contains(&day)
}

fn default_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}
