//! aoc-bench - Advent of Code Solution Benchmarking
//!
//! This library benchmarks a fixed set of external day programs and keeps the
//! `## Performance` section of a Markdown report in sync with the results.
//!
//! # Pipeline
//!
//! - **Executor**: launches one day program per trial and captures its output
//! - **Parser**: scrapes the answers and the self-reported duration
//! - **Runner**: warm-up and timed trials per day, days benchmarked concurrently
//! - **Report**: renders the section and patches it into the document

pub mod benchmark;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod report;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
