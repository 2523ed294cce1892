//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, interrupt handling
//! and the command runners.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod presenter;
pub mod signals;

// Re-export commonly used types
pub use app::{
    build_bridge, load_merged_config, run_command, CliBridge, EXIT_CANCELED, EXIT_ERROR,
    EXIT_SUCCESS, EXIT_USAGE_ERROR,
};
pub use args::{ChunkArgs, Cli, Commands, ConfigAction, DirsAction};
pub use presenter::Presenter;
