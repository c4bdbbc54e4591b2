//! Process executor for day solutions
//!
//! Each call launches exactly one process, waits for it (optionally under a
//! deadline) and reaps it. A process still running when the deadline expires
//! is killed when its handle is dropped.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::task;
use tokio::time::timeout;
use tracing::debug;

use crate::{
    benchmark::parser,
    config::Config,
    error::{AppError, AppResult},
    models::{TrialResult, WorkUnit},
};

/// Runs a day's program once and reports the outcome
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TrialInvoker: Send + Sync {
    /// Run the program once. Never fails: a failed run yields
    /// `succeeded == false` with no fields.
    async fn invoke(&self, unit: &WorkUnit) -> TrialResult;
}

/// Output captured from one finished process
#[derive(Debug, Clone)]
pub struct CapturedRun {
    /// Interleaved stdout and stderr, lossily decoded
    pub output: String,
    /// Exit code, `None` if terminated by a signal
    pub exit_code: Option<i32>,
}

impl CapturedRun {
    /// The captured text if the process exited with status 0
    pub fn into_output(self) -> AppResult<String> {
        match self.exit_code {
            Some(0) => Ok(self.output),
            Some(code) => Err(AppError::NonZeroExit(code)),
            None => Err(AppError::Terminated),
        }
    }
}

/// Invoker backed by real OS processes
#[derive(Debug, Clone, Default)]
pub struct ProcessInvoker {
    working_dir: Option<PathBuf>,
    trial_timeout: Option<Duration>,
}

impl ProcessInvoker {
    /// Create a new process invoker
    pub fn new(working_dir: Option<PathBuf>, trial_timeout: Option<Duration>) -> Self {
        Self {
            working_dir,
            trial_timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.units.working_dir.clone(),
            config.benchmark.trial_timeout,
        )
    }

    /// Launch the program with no stdin and wait for it to finish.
    ///
    /// stdout and stderr share one pipe, so the captured text interleaves both
    /// streams in write order. Errors only if the process cannot be launched,
    /// its output cannot be collected, or it outlives the deadline. A nonzero
    /// exit is reported in the result.
    pub async fn capture(&self, unit: &WorkUnit) -> AppResult<CapturedRun> {
        let (mut reader, writer) = io::pipe().map_err(AppError::Capture)?;
        let stderr_writer = writer.try_clone().map_err(AppError::Capture)?;

        let mut command = Command::new(&unit.program);
        command
            .args(&unit.args)
            .stdin(Stdio::null())
            .stdout(writer)
            .stderr(stderr_writer)
            .kill_on_drop(true);

        if let Some(ref dir) = self.working_dir {
            command.current_dir(dir);
        }

        let spawned = command.spawn();
        // The command holds the parent's write ends; EOF needs them closed.
        drop(command);
        let mut child = spawned.map_err(|source| AppError::Launch {
            program: unit.program.clone(),
            source,
        })?;

        let drain = task::spawn_blocking(move || {
            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes).map(|_| bytes)
        });

        let finish = async {
            let status = child.wait().await.map_err(AppError::Capture)?;
            let bytes = drain
                .await
                .map_err(|e| AppError::Capture(io::Error::other(e)))?
                .map_err(AppError::Capture)?;
            Ok::<_, AppError>((status, bytes))
        };

        let (status, bytes) = match self.trial_timeout {
            Some(limit) => timeout(limit, finish)
                .await
                .map_err(|_| AppError::TimedOut(limit))??,
            None => finish.await?,
        };

        Ok(CapturedRun {
            output: String::from_utf8_lossy(&bytes).into_owned(),
            exit_code: status.code(),
        })
    }
}

#[async_trait]
impl TrialInvoker for ProcessInvoker {
    async fn invoke(&self, unit: &WorkUnit) -> TrialResult {
        match self.capture(unit).await.and_then(CapturedRun::into_output) {
            Ok(output) => TrialResult::success(parser::parse(&output)),
            Err(e) => {
                debug!(day = unit.id, error = %e, "Run failed");
                TrialResult::failure()
            }
        }
    }
}
