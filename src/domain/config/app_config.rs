//! Application configuration value object

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;
use crate::domain::worker::{Duration, WorkerOperation};

/// Directory holding the worker scripts when nothing is configured
pub const DEFAULT_WORKER_DIR_NAME: &str = "backend";

/// Which dialog implementation to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogBackend {
    /// Native OS dialogs
    #[default]
    Native,
    /// Prompts on the controlling terminal
    Terminal,
}

impl DialogBackend {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Terminal => "terminal",
        }
    }
}

impl fmt::Display for DialogBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DialogBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "native" => Ok(Self::Native),
            "terminal" => Ok(Self::Terminal),
            _ => Err(ConfigError::ValidationError {
                key: "dialogs".to_string(),
                message: format!("'{}' is not one of: native, terminal", s),
            }),
        }
    }
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub worker_dir: Option<String>,
    pub interpreter: Option<String>,
    pub process_script: Option<String>,
    pub transcribe_script: Option<String>,
    pub worker_timeout: Option<String>,
    pub dialogs: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    ///
    /// `worker_dir`, `interpreter` and `worker_timeout` have no static
    /// default: the first two are resolved at runtime, the last means
    /// "wait for the worker indefinitely".
    pub fn defaults() -> Self {
        Self {
            worker_dir: None,
            interpreter: None,
            process_script: Some(WorkerOperation::ProcessText.default_script().to_string()),
            transcribe_script: Some(
                WorkerOperation::TranscribeAudio
                    .default_script()
                    .to_string(),
            ),
            worker_timeout: None,
            dialogs: Some(DialogBackend::Native.to_string()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            worker_dir: other.worker_dir.or(self.worker_dir),
            interpreter: other.interpreter.or(self.interpreter),
            process_script: other.process_script.or(self.process_script),
            transcribe_script: other.transcribe_script.or(self.transcribe_script),
            worker_timeout: other.worker_timeout.or(self.worker_timeout),
            dialogs: other.dialogs.or(self.dialogs),
        }
    }

    /// Worker directory, or `backend` next to the running executable
    pub fn worker_dir_or_default(&self) -> PathBuf {
        if let Some(dir) = &self.worker_dir {
            return PathBuf::from(dir);
        }
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_WORKER_DIR_NAME)))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_WORKER_DIR_NAME))
    }

    /// Script for an operation, or its default
    pub fn script_for(&self, operation: WorkerOperation) -> &str {
        let configured = match operation {
            WorkerOperation::ProcessText => self.process_script.as_deref(),
            WorkerOperation::TranscribeAudio => self.transcribe_script.as_deref(),
        };
        configured.unwrap_or(operation.default_script())
    }

    /// Parsed worker timeout; `Ok(None)` when unset
    pub fn worker_timeout(&self) -> Result<Option<Duration>, ConfigError> {
        self.worker_timeout
            .as_deref()
            .map(|s| {
                s.parse::<Duration>()
                    .map_err(|e| ConfigError::ValidationError {
                        key: "worker_timeout".to_string(),
                        message: e.to_string(),
                    })
            })
            .transpose()
    }

    /// Dialog backend, or native if not set/invalid
    pub fn dialogs_or_default(&self) -> DialogBackend {
        self.dialogs
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }
}
