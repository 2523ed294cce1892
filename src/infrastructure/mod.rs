//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the Python worker, native dialogs and the filesystem.

pub mod config;
pub mod dialogs;
pub mod preferences;
pub mod worker;

// Re-export adapters
pub use config::XdgConfigStore;
pub use dialogs::{create_dialogs, NativeDialogs, TerminalDialogs};
pub use preferences::JsonPreferencesStore;
pub use worker::PythonWorker;
