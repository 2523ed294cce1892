//! Worker port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::worker::{Duration, WorkerOperation};

/// Why a worker invocation did not succeed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkerError {
    #[error("Failed to start worker: {0}")]
    Spawn(String),

    #[error("{}", exit_detail(*code, stderr))]
    Exited { code: i32, stderr: String },

    #[error("Script terminated by signal")]
    Terminated,

    #[error("Script timed out after {0}")]
    TimedOut(Duration),

    #[error("Failed to read worker output: {0}")]
    Io(String),
}

/// Failure text for a nonzero exit: stderr when there is any
fn exit_detail(code: i32, stderr: &str) -> String {
    if stderr.trim().is_empty() {
        format!("Script exited with code {}", code)
    } else {
        stderr.trim().to_string()
    }
}

/// Port for the external processing worker
#[async_trait]
pub trait Worker: Send + Sync {
    /// Run one operation to completion.
    ///
    /// # Arguments
    /// * `operation` - Which worker operation to run
    /// * `args` - Positional arguments, passed after the script
    ///
    /// # Returns
    /// The worker's trimmed stdout on exit code 0
    async fn invoke(
        &self,
        operation: WorkerOperation,
        args: &[String],
    ) -> Result<String, WorkerError>;
}
