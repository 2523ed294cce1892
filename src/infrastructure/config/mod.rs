//! Configuration storage adapters

mod xdg;

pub use xdg::{XdgConfigStore, CONFIG_FILE_NAME};

use std::path::PathBuf;

/// Per-user directory name shared by the config and preferences files
pub const APP_DIR_NAME: &str = "memory-chunker";

/// `<config dir>/memory-chunker`, falling back to `~/.config` and then the working directory
pub fn app_config_dir() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}
