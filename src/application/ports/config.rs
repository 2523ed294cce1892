//! Configuration store port interface

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Port for the persisted [`AppConfig`] layer
///
/// Only the file layer lives here; defaults, environment and flags are
/// merged on top by the caller.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Read the stored layer. A missing file is an empty config, not an error.
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Replace the stored layer
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// Where the layer is stored
    fn path(&self) -> PathBuf;

    fn exists(&self) -> bool;

    /// Write [`AppConfig::defaults`]; fails with `AlreadyExists` rather than overwrite
    async fn init(&self) -> Result<(), ConfigError>;
}
