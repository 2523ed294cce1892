//! Python worker adapter
//!
//! Runs the worker scripts with the interpreter from the worker's virtualenv,
//! one process per invocation.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use crate::application::ports::{Worker, WorkerError};
use crate::domain::config::AppConfig;
use crate::domain::worker::{normalize_args, Duration, Platform, WorkerOperation};

/// Worker adapter backed by Python scripts in a worker directory
#[derive(Debug, Clone)]
pub struct PythonWorker {
    worker_dir: PathBuf,
    interpreter: Option<PathBuf>,
    process_script: String,
    transcribe_script: String,
    timeout: Option<Duration>,
    platform: Option<Platform>,
}

impl PythonWorker {
    /// Create a worker rooted at `worker_dir` with default scripts
    pub fn new(worker_dir: impl Into<PathBuf>) -> Self {
        Self {
            worker_dir: worker_dir.into(),
            interpreter: None,
            process_script: WorkerOperation::ProcessText.default_script().to_string(),
            transcribe_script: WorkerOperation::TranscribeAudio
                .default_script()
                .to_string(),
            timeout: None,
            platform: None,
        }
    }

    /// Build from merged configuration
    pub fn from_config(config: &AppConfig, timeout: Option<Duration>) -> Self {
        let mut worker = Self::new(config.worker_dir_or_default())
            .with_script(
                WorkerOperation::ProcessText,
                config.script_for(WorkerOperation::ProcessText),
            )
            .with_script(
                WorkerOperation::TranscribeAudio,
                config.script_for(WorkerOperation::TranscribeAudio),
            )
            .with_timeout(timeout);
        if let Some(interpreter) = &config.interpreter {
            worker = worker.with_interpreter(interpreter);
        }
        worker
    }

    /// Use an explicit interpreter instead of the venv layout
    pub fn with_interpreter(mut self, interpreter: impl Into<PathBuf>) -> Self {
        self.interpreter = Some(interpreter.into());
        self
    }

    /// Override the script for one operation
    pub fn with_script(mut self, operation: WorkerOperation, script: impl Into<String>) -> Self {
        match operation {
            WorkerOperation::ProcessText => self.process_script = script.into(),
            WorkerOperation::TranscribeAudio => self.transcribe_script = script.into(),
        }
        self
    }

    /// Bound each invocation; `None` waits indefinitely
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Pin the platform instead of detecting it per invocation
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn worker_dir(&self) -> &Path {
        &self.worker_dir
    }

    fn platform(&self) -> Platform {
        self.platform.unwrap_or_else(Platform::current)
    }

    /// Interpreter that will run the scripts
    pub fn interpreter_path(&self) -> PathBuf {
        match &self.interpreter {
            Some(path) => path.clone(),
            None => self.platform().venv_interpreter(&self.worker_dir),
        }
    }

    /// Script for an operation, inside the worker directory
    pub fn script_path(&self, operation: WorkerOperation) -> PathBuf {
        let script = match operation {
            WorkerOperation::ProcessText => &self.process_script,
            WorkerOperation::TranscribeAudio => &self.transcribe_script,
        };
        self.worker_dir.join(script)
    }

    /// Full interpreter argument list: script, then normalized arguments
    pub fn command_args(&self, operation: WorkerOperation, args: &[String]) -> Vec<String> {
        let mut command_args = vec![self.script_path(operation).to_string_lossy().into_owned()];
        command_args.extend(normalize_args(args, self.platform()));
        command_args
    }

    async fn run(&self, operation: WorkerOperation, args: &[String]) -> Result<String, WorkerError> {
        let interpreter = self.interpreter_path();
        let command_args = self.command_args(operation, args);
        debug!(
            %operation,
            interpreter = %interpreter.display(),
            cwd = %self.worker_dir.display(),
            args = ?command_args,
            "spawning worker"
        );

        let mut child = Command::new(&interpreter)
            .args(&command_args)
            .current_dir(&self.worker_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| WorkerError::Spawn(format!("{}: {}", interpreter.display(), e)))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| WorkerError::Io("stdout not captured".to_string()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| WorkerError::Io("stderr not captured".to_string()))?;

        let completion = async {
            let (out, err) = tokio::try_join!(
                collect_stream(stdout, operation, "stdout"),
                collect_stream(stderr, operation, "stderr"),
            )?;
            let status = child.wait().await?;
            Ok::<_, std::io::Error>((status, out, err))
        };

        let (status, out, err) = match self.timeout {
            Some(limit) => timeout(limit.as_std(), completion)
                .await
                .map_err(|_| WorkerError::TimedOut(limit))?,
            None => completion.await,
        }
        .map_err(|e| WorkerError::Io(e.to_string()))?;

        debug!(%operation, status = %status, "worker exited");

        match status.code() {
            Some(0) => Ok(String::from_utf8_lossy(&out).trim().to_string()),
            Some(code) => Err(WorkerError::Exited {
                code,
                stderr: String::from_utf8_lossy(&err).trim().to_string(),
            }),
            None => Err(WorkerError::Terminated),
        }
    }
}

/// Drain a child stream line by line, logging as output arrives
async fn collect_stream<R>(
    stream: R,
    operation: WorkerOperation,
    channel: &'static str,
) -> std::io::Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(stream);
    let mut collected = Vec::new();
    let mut line = Vec::new();

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line).await? == 0 {
            break;
        }
        debug!(
            %operation,
            channel,
            line = %String::from_utf8_lossy(&line).trim_end(),
            "worker output"
        );
        collected.extend_from_slice(&line);
    }

    Ok(collected)
}

#[async_trait]
impl Worker for PythonWorker {
    async fn invoke(
        &self,
        operation: WorkerOperation,
        args: &[String],
    ) -> Result<String, WorkerError> {
        self.run(operation, args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn venv_interpreter_by_platform() {
        let posix = PythonWorker::new("/opt/worker").with_platform(Platform::Posix);
        assert_eq!(
            posix.interpreter_path(),
            PathBuf::from("/opt/worker/venv/bin/python")
        );

        let windows = PythonWorker::new("/opt/worker").with_platform(Platform::Windows);
        assert!(windows.interpreter_path().ends_with("Scripts/python.exe")
            || windows.interpreter_path().ends_with("Scripts\\python.exe"));
    }

    #[test]
    fn explicit_interpreter_wins() {
        let worker = PythonWorker::new("/opt/worker").with_interpreter("/usr/bin/python3");
        assert_eq!(worker.interpreter_path(), PathBuf::from("/usr/bin/python3"));
    }

    #[test]
    fn script_paths() {
        let worker = PythonWorker::new("/opt/worker")
            .with_script(WorkerOperation::TranscribeAudio, "whisper_job.py");
        assert_eq!(
            worker.script_path(WorkerOperation::ProcessText),
            PathBuf::from("/opt/worker/process.py")
        );
        assert_eq!(
            worker.script_path(WorkerOperation::TranscribeAudio),
            PathBuf::from("/opt/worker/whisper_job.py")
        );
    }

    #[cfg(unix)]
    #[test]
    fn command_args_normalize_paths_only() {
        let worker = PythonWorker::new("/opt/worker").with_platform(Platform::Posix);
        let args = vec![
            "C:\\in\\talk.txt".to_string(),
            "My Title".to_string(),
            "rag".to_string(),
        ];
        assert_eq!(
            worker.command_args(WorkerOperation::ProcessText, &args),
            vec!["/opt/worker/process.py", "C:/in/talk.txt", "My Title", "rag"]
        );
    }

    #[test]
    fn from_config_applies_overrides() {
        let config = AppConfig {
            worker_dir: Some("/srv/worker".to_string()),
            interpreter: Some("/usr/bin/python3".to_string()),
            process_script: Some("chunk.py".to_string()),
            ..Default::default()
        };
        let worker = PythonWorker::from_config(&config, Some(Duration::from_secs(5)));
        assert_eq!(worker.worker_dir(), Path::new("/srv/worker"));
        assert_eq!(worker.interpreter_path(), PathBuf::from("/usr/bin/python3"));
        assert_eq!(
            worker.script_path(WorkerOperation::ProcessText),
            PathBuf::from("/srv/worker/chunk.py")
        );
        assert_eq!(
            worker.script_path(WorkerOperation::TranscribeAudio),
            PathBuf::from("/srv/worker/transcribe.py")
        );
    }

    #[tokio::test]
    async fn missing_interpreter_is_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let worker = PythonWorker::new(dir.path()).with_interpreter(dir.path().join("no-python"));
        let err = worker
            .invoke(WorkerOperation::ProcessText, &[])
            .await
            .unwrap_err();
        assert!(matches!(err, WorkerError::Spawn(_)));
        assert!(err.to_string().starts_with("Failed to start worker"));
    }
}
