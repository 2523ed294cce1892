//! Request handlers
//!
//! One use case per bridge operation. Handlers only orchestrate: dialogs,
//! preference updates and a single worker invocation, in that order.

use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::preferences::{DirectoryField, DirectoryPreferences};
use crate::domain::request::{ChunkRequest, FileKind};
use crate::domain::worker::WorkerOperation;

use super::ports::{
    DialogError, FileDialogs, FolderDialog, OpenFileDialog, PreferencesStore, SaveFileDialog,
    Worker, WorkerError,
};
use super::preferences::PreferencesService;

/// Result text when the save dialog is dismissed
pub const SAVE_CANCELED: &str = "Save canceled.";

const OPEN_TITLE: &str = "Select Source File";
const SAVE_TITLE: &str = "Save Memory Chunk";
const OPEN_DIR_TITLE: &str = "Select Default Open Directory";
const SAVE_DIR_TITLE: &str = "Select Default Save Directory";

/// Errors from the request handlers
#[derive(Debug, Clone, Error)]
pub enum HandlerError {
    #[error("No audio file selected. Choose a file before transcribing.")]
    MissingSource,

    #[error(transparent)]
    Dialog(#[from] DialogError),

    #[error(transparent)]
    Worker(#[from] WorkerError),
}

/// How a worker-backed request ended, short of an error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerOutcome {
    /// Worker finished; its trimmed stdout
    Completed(String),
    /// User dismissed the save dialog; no worker ran
    Canceled,
}

/// Callbacks around the worker run
#[derive(Default)]
#[allow(clippy::type_complexity)]
pub struct HandlerCallbacks {
    /// Called right before the worker is spawned
    pub on_worker_start: Option<Box<dyn Fn(WorkerOperation) + Send + Sync>>,
    /// Called when the worker finished, with whether it succeeded
    pub on_worker_end: Option<Box<dyn Fn(WorkerOperation, bool) + Send + Sync>>,
}

/// The use cases behind the bridge
pub struct RequestHandlers<W, D, S>
where
    W: Worker,
    D: FileDialogs,
    S: PreferencesStore,
{
    worker: W,
    dialogs: D,
    preferences: PreferencesService<S>,
    callbacks: HandlerCallbacks,
}

impl<W, D, S> RequestHandlers<W, D, S>
where
    W: Worker,
    D: FileDialogs,
    S: PreferencesStore,
{
    /// Create a new handler set
    pub fn new(worker: W, dialogs: D, preferences: PreferencesService<S>) -> Self {
        Self {
            worker,
            dialogs,
            preferences,
            callbacks: HandlerCallbacks::default(),
        }
    }

    /// Attach worker lifecycle callbacks
    pub fn with_callbacks(mut self, callbacks: HandlerCallbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    pub fn preferences(&self) -> &PreferencesService<S> {
        &self.preferences
    }

    /// Let the user pick a source file.
    ///
    /// `Ok(None)` on cancel. A pick remembers its directory for next time.
    pub async fn select_file(&self, kind: FileKind) -> Result<Option<PathBuf>, HandlerError> {
        let dialog = OpenFileDialog {
            title: OPEN_TITLE.to_string(),
            directory: self.preferences.directory(DirectoryField::Open),
            kind,
        };

        let Some(path) = self.dialogs.pick_file(&dialog).await? else {
            debug!(%kind, "file selection canceled");
            return Ok(None);
        };

        self.preferences
            .update_from_file(DirectoryField::Open, &path);
        info!(path = %path.display(), "source file selected");
        Ok(Some(path))
    }

    /// Turn a text transcript into a memory chunk
    pub async fn process_text(&self, request: &ChunkRequest) -> Result<HandlerOutcome, HandlerError> {
        self.save_and_invoke(WorkerOperation::ProcessText, request)
            .await
    }

    /// Transcribe audio into a memory chunk
    ///
    /// A missing source fails before any dialog is shown.
    pub async fn transcribe_audio(
        &self,
        request: &ChunkRequest,
    ) -> Result<HandlerOutcome, HandlerError> {
        if request.is_source_missing() {
            return Err(HandlerError::MissingSource);
        }

        self.save_and_invoke(WorkerOperation::TranscribeAudio, request)
            .await
    }

    /// Ask for new open and save directories.
    ///
    /// Each picker is independent: cancelling one leaves that field alone.
    pub async fn set_default_directories(&self) -> Result<DirectoryPreferences, HandlerError> {
        for (field, title) in [
            (DirectoryField::Open, OPEN_DIR_TITLE),
            (DirectoryField::Save, SAVE_DIR_TITLE),
        ] {
            let dialog = FolderDialog {
                title: title.to_string(),
                directory: self.preferences.directory(field),
            };
            match self.dialogs.pick_folder(&dialog).await? {
                Some(dir) => self.preferences.update(field, dir),
                None => debug!(%field, "directory picker canceled"),
            }
        }

        Ok(self.preferences.get())
    }

    /// Current open and save directories
    pub fn get_default_directories(&self) -> DirectoryPreferences {
        self.preferences.get()
    }

    async fn save_and_invoke(
        &self,
        operation: WorkerOperation,
        request: &ChunkRequest,
    ) -> Result<HandlerOutcome, HandlerError> {
        let dialog = SaveFileDialog {
            title: SAVE_TITLE.to_string(),
            directory: self.preferences.directory(DirectoryField::Save),
            file_name: request.default_file_name(operation),
        };

        let Some(destination) = self.dialogs.save_file(&dialog).await? else {
            info!(%operation, "save canceled");
            return Ok(HandlerOutcome::Canceled);
        };

        self.preferences
            .update_from_file(DirectoryField::Save, &destination);

        let args = request.worker_args(&destination);
        info!(
            %operation,
            source = %request.source_path,
            destination = %destination.display(),
            "invoking worker"
        );

        if let Some(ref cb) = self.callbacks.on_worker_start {
            cb(operation);
        }

        let result = self.worker.invoke(operation, &args).await;

        if let Some(ref cb) = self.callbacks.on_worker_end {
            cb(operation, result.is_ok());
        }

        Ok(HandlerOutcome::Completed(result?))
    }
}
