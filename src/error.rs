//! Custom error types and handling
//!
//! Only configuration and report document errors are allowed to end a run.
//! Everything that can go wrong while running a single day is converted into
//! an absent value by the benchmark runner and surfaced as a warning.

use std::path::PathBuf;
use std::time::Duration;

use crate::config::ConfigError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Day {0} is not configured")]
    UnknownDay(u32),

    // Process errors
    #[error("Failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Process exited with code {0}")]
    NonZeroExit(i32),

    #[error("Process terminated by signal")]
    Terminated,

    #[error("Process timed out after {0:?}")]
    TimedOut(Duration),

    #[error("Failed to collect process output: {0}")]
    Capture(#[source] std::io::Error),

    // Report document errors
    #[error("Failed to read {}: {source}", .path.display())]
    DocumentRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    DocumentWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::UnknownDay(_) => "UNKNOWN_DAY",
            Self::Launch { .. } => "LAUNCH_ERROR",
            Self::NonZeroExit(_) => "NON_ZERO_EXIT",
            Self::Terminated => "TERMINATED",
            Self::TimedOut(_) => "TIMED_OUT",
            Self::Capture(_) => "CAPTURE_ERROR",
            Self::DocumentRead { .. } => "DOCUMENT_READ_ERROR",
            Self::DocumentWrite { .. } => "DOCUMENT_WRITE_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether this error ends the whole run rather than a single day
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::Launch { .. }
                | Self::NonZeroExit(_)
                | Self::Terminated
                | Self::TimedOut(_)
                | Self::Capture(_)
        )
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
