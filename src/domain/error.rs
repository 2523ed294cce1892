//! Domain error types

use thiserror::Error;

/// Error when parsing a duration string
#[derive(Debug, Clone, Error)]
#[error("Invalid duration format: \"{input}\". Expected <number> followed by h, m or s (e.g., 90s, 10m, 1h30m)")]
pub struct DurationParseError {
    pub input: String,
}

/// Error when an unknown file kind is requested
#[derive(Debug, Clone, Error)]
#[error("Invalid file kind: \"{input}\". Valid kinds are: text, audio, any")]
pub struct InvalidFileKindError {
    pub input: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}

/// Error when directory preferences cannot be persisted
#[derive(Debug, Clone, Error)]
pub enum PreferencesError {
    #[error("Failed to read preferences: {0}")]
    ReadError(String),

    #[error("Failed to write preferences: {0}")]
    WriteError(String),
}
