//! Configuration domain module

mod app_config;

pub use app_config::{AppConfig, DialogBackend, DEFAULT_WORKER_DIR_NAME};
