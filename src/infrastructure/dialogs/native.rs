//! Native dialog adapter backed by rfd

use std::path::PathBuf;

use async_trait::async_trait;
use rfd::AsyncFileDialog;

use crate::application::ports::{
    DialogError, FileDialogs, FolderDialog, OpenFileDialog, SaveFileDialog,
};
use crate::domain::request::CHUNK_EXTENSION;

/// OS-native open/save/folder dialogs
///
/// On Linux the dialogs go through the XDG desktop portal.
pub struct NativeDialogs;

impl NativeDialogs {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NativeDialogs {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FileDialogs for NativeDialogs {
    async fn pick_file(&self, dialog: &OpenFileDialog) -> Result<Option<PathBuf>, DialogError> {
        let handle = AsyncFileDialog::new()
            .set_title(dialog.title.as_str())
            .set_directory(&dialog.directory)
            .add_filter(dialog.kind.label(), dialog.kind.extensions())
            .pick_file()
            .await;

        Ok(handle.map(|h| h.path().to_path_buf()))
    }

    async fn save_file(&self, dialog: &SaveFileDialog) -> Result<Option<PathBuf>, DialogError> {
        let handle = AsyncFileDialog::new()
            .set_title(dialog.title.as_str())
            .set_directory(&dialog.directory)
            .set_file_name(dialog.file_name.as_str())
            .add_filter("JSONL", &[CHUNK_EXTENSION])
            .save_file()
            .await;

        Ok(handle.map(|h| h.path().to_path_buf()))
    }

    async fn pick_folder(&self, dialog: &FolderDialog) -> Result<Option<PathBuf>, DialogError> {
        let handle = AsyncFileDialog::new()
            .set_title(dialog.title.as_str())
            .set_directory(&dialog.directory)
            .pick_folder()
            .await;

        Ok(handle.map(|h| h.path().to_path_buf()))
    }
}
