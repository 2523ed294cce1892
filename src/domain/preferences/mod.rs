//! Preferences domain module

mod directories;

pub use directories::{DirectoryField, DirectoryPreferences, StoredDirectories};

use std::path::PathBuf;

/// Platform documents directory, falling back to home, then the working directory
pub fn default_directory() -> PathBuf {
    dirs::document_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}
