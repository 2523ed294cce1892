//! CLI presenter for output formatting

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::preferences::DirectoryPreferences;
use crate::domain::worker::WorkerOperation;

/// Presenter for CLI output formatting
///
/// Status goes to stderr; only results go to stdout.
pub struct Presenter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    /// Start a spinner with message
    pub fn start_spinner(&self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg} {elapsed:.dim}")
        {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        *self.lock_spinner() = Some(spinner);
    }

    /// Mark spinner as success and finish
    pub fn spinner_success(&self, message: &str) {
        if let Some(spinner) = self.lock_spinner().take() {
            spinner.finish_with_message(format!("{} {}", "✓".green(), message));
        }
    }

    /// Mark spinner as failed and finish
    pub fn spinner_fail(&self, message: &str) {
        if let Some(spinner) = self.lock_spinner().take() {
            spinner.finish_with_message(format!("{} {}", "✗".red(), message));
        }
    }

    /// Stop spinner without status
    pub fn stop_spinner(&self) {
        if let Some(spinner) = self.lock_spinner().take() {
            spinner.finish_and_clear();
        }
    }

    /// Spinner lifecycle for a worker run
    pub fn worker_started(&self, operation: WorkerOperation) {
        self.start_spinner(worker_message(operation));
    }

    pub fn worker_finished(&self, operation: WorkerOperation, success: bool) {
        let label = worker_message(operation).trim_end_matches("...");
        if success {
            self.spinner_success(&format!("{} complete", label));
        } else {
            self.spinner_fail(&format!("{} failed", label));
        }
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout (the worker result)
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Output a path to stdout
    pub fn output_path(&self, path: &Path) {
        println!("{}", path.display());
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Print both directory preferences
    pub fn directories(&self, prefs: &DirectoryPreferences) {
        self.key_value("open", &prefs.open_directory.to_string_lossy());
        self.key_value("save", &prefs.save_directory.to_string_lossy());
    }

    fn lock_spinner(&self) -> MutexGuard<'_, Option<ProgressBar>> {
        self.spinner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

fn worker_message(operation: WorkerOperation) -> &'static str {
    match operation {
        WorkerOperation::ProcessText => "Processing transcript...",
        WorkerOperation::TranscribeAudio => "Transcribing audio...",
    }
}
