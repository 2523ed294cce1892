//! Domain layer - Core business logic
//!
//! Contains value objects and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod preferences;
pub mod request;
pub mod worker;

// Re-export common types
pub use config::{AppConfig, DialogBackend};
pub use error::*;
pub use preferences::{DirectoryField, DirectoryPreferences, StoredDirectories};
pub use request::{ChunkRequest, FileKind};
pub use worker::{Duration, Platform, WorkerOperation};
