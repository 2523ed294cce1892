//! File dialog port interface

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::request::FileKind;

/// Dialog errors (cancellation is not an error)
#[derive(Debug, Clone, Error)]
pub enum DialogError {
    #[error("File dialogs are unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),
}

/// Open-file dialog parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenFileDialog {
    pub title: String,
    pub directory: PathBuf,
    pub kind: FileKind,
}

/// Save-file dialog parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveFileDialog {
    pub title: String,
    pub directory: PathBuf,
    pub file_name: String,
}

impl SaveFileDialog {
    /// Full pre-filled destination
    pub fn default_path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }
}

/// Folder-picker parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderDialog {
    pub title: String,
    pub directory: PathBuf,
}

/// Port for user-facing file dialogs
///
/// Every method returns `Ok(None)` when the user cancels.
#[async_trait]
pub trait FileDialogs: Send + Sync {
    /// Ask for an existing file
    async fn pick_file(&self, dialog: &OpenFileDialog) -> Result<Option<PathBuf>, DialogError>;

    /// Ask for a destination file
    async fn save_file(&self, dialog: &SaveFileDialog) -> Result<Option<PathBuf>, DialogError>;

    /// Ask for an existing directory
    async fn pick_folder(&self, dialog: &FolderDialog) -> Result<Option<PathBuf>, DialogError>;
}

/// Blanket implementation for boxed dialog types
#[async_trait]
impl FileDialogs for Box<dyn FileDialogs> {
    async fn pick_file(&self, dialog: &OpenFileDialog) -> Result<Option<PathBuf>, DialogError> {
        self.as_ref().pick_file(dialog).await
    }

    async fn save_file(&self, dialog: &SaveFileDialog) -> Result<Option<PathBuf>, DialogError> {
        self.as_ref().save_file(dialog).await
    }

    async fn pick_folder(&self, dialog: &FolderDialog) -> Result<Option<PathBuf>, DialogError> {
        self.as_ref().pick_folder(dialog).await
    }
}
