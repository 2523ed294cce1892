//! CLI argument definitions using Clap

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::domain::config::DialogBackend;
use crate::domain::request::{FileKind, RAG_MODE};

/// Memory Chunker - turn transcripts and audio into JSONL memory chunks
#[derive(Parser, Debug)]
#[command(name = "memory-chunker")]
#[command(version)]
#[command(about = "Turn transcripts and audio into JSONL memory chunks using an external worker")]
#[command(long_about = None)]
pub struct Cli {
    /// Worker installation directory (holds the scripts and venv)
    #[arg(long, global = true, value_name = "DIR", env = "MEMORY_CHUNKER_WORKER_DIR")]
    pub worker_dir: Option<String>,

    /// Give up on the worker after this long (e.g., 90s, 20m, 1h)
    #[arg(long, global = true, value_name = "TIME")]
    pub timeout: Option<String>,

    /// Dialog implementation
    #[arg(long, global = true, value_name = "KIND")]
    pub dialogs: Option<DialogArg>,

    /// Log debug output, including worker output as it arrives
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pick a source file and print its path
    SelectFile {
        /// Restrict the dialog to one kind of file
        #[arg(short = 'k', long, value_enum, default_value_t = FileKindArg::Any)]
        kind: FileKindArg,
    },
    /// Turn a text transcript into a memory chunk
    Process(ChunkArgs),
    /// Transcribe an audio file into a memory chunk
    Transcribe(ChunkArgs),
    /// Show or choose the default open/save directories
    Dirs {
        #[command(subcommand)]
        action: DirsAction,
    },
    /// Serve bridge requests as JSON lines on stdin/stdout
    Serve,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Inputs shared by `process` and `transcribe`
#[derive(Args, Debug, Clone)]
pub struct ChunkArgs {
    /// Source file; a file dialog opens when omitted
    #[arg(value_name = "SOURCE")]
    pub source: Option<String>,

    /// Title of the memory
    #[arg(short = 't', long, default_value = "")]
    pub title: String,

    /// Instruction for the worker
    #[arg(short = 'i', long, default_value = "")]
    pub instruction: String,

    /// Processing mode, passed through to the worker
    #[arg(short = 'm', long, default_value = RAG_MODE)]
    pub mode: String,
}

/// Directory preference actions
#[derive(Subcommand, Debug, Clone, Copy)]
pub enum DirsAction {
    /// Print the current directories
    Get,
    /// Choose new directories with folder pickers
    Set,
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// File kind argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FileKindArg {
    Text,
    Audio,
    Any,
}

impl From<FileKindArg> for FileKind {
    fn from(arg: FileKindArg) -> Self {
        match arg {
            FileKindArg::Text => FileKind::Text,
            FileKindArg::Audio => FileKind::Audio,
            FileKindArg::Any => FileKind::Any,
        }
    }
}

/// Dialog backend argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum DialogArg {
    Native,
    Terminal,
}

impl From<DialogArg> for DialogBackend {
    fn from(arg: DialogArg) -> Self {
        match arg {
            DialogArg::Native => DialogBackend::Native,
            DialogArg::Terminal => DialogBackend::Terminal,
        }
    }
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "worker_dir",
    "interpreter",
    "process_script",
    "transcribe_script",
    "worker_timeout",
    "dialogs",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_process_defaults() {
        let cli = Cli::parse_from(["memory-chunker", "process"]);
        let Commands::Process(args) = cli.command else {
            panic!("Expected process command");
        };
        assert!(args.source.is_none());
        assert_eq!(args.title, "");
        assert_eq!(args.instruction, "");
        assert_eq!(args.mode, "rag");
    }

    #[test]
    fn cli_parses_transcribe_inputs() {
        let cli = Cli::parse_from([
            "memory-chunker",
            "transcribe",
            "talk.mp3",
            "-t",
            "Grandpa's War Stories",
            "-i",
            "Keep the dialogue",
            "-m",
            "summary",
        ]);
        let Commands::Transcribe(args) = cli.command else {
            panic!("Expected transcribe command");
        };
        assert_eq!(args.source.as_deref(), Some("talk.mp3"));
        assert_eq!(args.title, "Grandpa's War Stories");
        assert_eq!(args.instruction, "Keep the dialogue");
        assert_eq!(args.mode, "summary");
    }

    #[test]
    fn cli_parses_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "memory-chunker",
            "process",
            "a.txt",
            "--worker-dir",
            "/opt/worker",
            "--timeout",
            "5m",
            "--dialogs",
            "terminal",
            "-v",
        ]);
        assert_eq!(cli.worker_dir.as_deref(), Some("/opt/worker"));
        assert_eq!(cli.timeout.as_deref(), Some("5m"));
        assert_eq!(cli.dialogs, Some(DialogArg::Terminal));
        assert!(cli.verbose);
    }

    #[test]
    fn cli_parses_select_file_kind() {
        let cli = Cli::parse_from(["memory-chunker", "select-file", "--kind", "audio"]);
        assert!(matches!(
            cli.command,
            Commands::SelectFile {
                kind: FileKindArg::Audio
            }
        ));
    }

    #[test]
    fn cli_parses_dirs_and_config() {
        let cli = Cli::parse_from(["memory-chunker", "dirs", "get"]);
        assert!(matches!(
            cli.command,
            Commands::Dirs {
                action: DirsAction::Get
            }
        ));

        let cli = Cli::parse_from(["memory-chunker", "config", "set", "worker_timeout", "10m"]);
        if let Commands::Config {
            action: ConfigAction::Set { key, value },
        } = cli.command
        {
            assert_eq!(key, "worker_timeout");
            assert_eq!(value, "10m");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn file_kind_arg_converts() {
        assert_eq!(FileKind::from(FileKindArg::Text), FileKind::Text);
        assert_eq!(FileKind::from(FileKindArg::Any), FileKind::Any);
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("worker_dir"));
        assert!(is_valid_config_key("worker_timeout"));
        assert!(!is_valid_config_key("api_key"));
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
