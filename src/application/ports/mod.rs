//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod config;
pub mod dialogs;
pub mod preferences;
pub mod worker;

// Re-export common types
pub use config::ConfigStore;
pub use dialogs::{DialogError, FileDialogs, FolderDialog, OpenFileDialog, SaveFileDialog};
pub use preferences::PreferencesStore;
pub use worker::{Worker, WorkerError};
