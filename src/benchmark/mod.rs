//! Benchmark execution engine
//!
//! A day is benchmarked by launching its program repeatedly through a
//! [`TrialInvoker`], scraping each run's output with [`parser`] and keeping the
//! fastest valid run in a [`MetricsCollector`].

pub mod executor;
pub mod metrics;
pub mod parser;
pub mod runner;

pub use executor::{CapturedRun, ProcessInvoker, TrialInvoker};
pub use metrics::MetricsCollector;
pub use runner::BenchmarkRunner;
