//! Command runners

use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::ports::{ConfigStore, FileDialogs};
use crate::application::{HandlerCallbacks, PreferencesService, RequestHandlers};
use crate::bridge::{serve, Bridge, BridgeError, BridgeReply};
use crate::domain::config::{AppConfig, DialogBackend};
use crate::domain::error::ConfigError;
use crate::domain::preferences::default_directory;
use crate::domain::request::{ChunkRequest, FileKind};
use crate::domain::worker::WorkerOperation;
use crate::infrastructure::{create_dialogs, JsonPreferencesStore, PythonWorker, XdgConfigStore};

use super::args::{ChunkArgs, Commands, DirsAction};
use super::presenter::Presenter;
use super::signals::shutdown_requested;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;
pub const EXIT_CANCELED: u8 = 3;

/// Bridge as wired by the command line
pub type CliBridge = Bridge<PythonWorker, Box<dyn FileDialogs>, JsonPreferencesStore>;

/// Load and merge configuration from file and CLI.
///
/// Environment variables arrive through clap as part of `cli_config`, where
/// an explicit flag still beats the environment.
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|e| {
        warn!(error = %e, "ignoring unreadable config file");
        AppConfig::empty()
    });

    // Merge: defaults < file < env/cli
    AppConfig::defaults().merge(file_config).merge(cli_config)
}

/// Wire worker, dialogs and preferences into a bridge
pub fn build_bridge(
    config: &AppConfig,
    dialogs: Box<dyn FileDialogs>,
    callbacks: HandlerCallbacks,
) -> Result<CliBridge, ConfigError> {
    let timeout = config.worker_timeout()?;
    let worker = PythonWorker::from_config(config, timeout);
    debug!(
        worker_dir = %worker.worker_dir().display(),
        interpreter = %worker.interpreter_path().display(),
        "configured worker"
    );

    let preferences = PreferencesService::load(JsonPreferencesStore::new(), default_directory());
    let handlers = RequestHandlers::new(worker, dialogs, preferences).with_callbacks(callbacks);
    Ok(Bridge::new(handlers))
}

/// Run a bridge-backed command until it finishes or the user interrupts it
pub async fn run_command(command: Commands, config: AppConfig) -> ExitCode {
    let presenter = Arc::new(Presenter::new());

    if matches!(command, Commands::Serve) {
        return run_serve(&config, &presenter).await;
    }

    let bridge = match build_bridge(
        &config,
        create_dialogs(config.dialogs_or_default()),
        spinner_callbacks(&presenter),
    ) {
        Ok(bridge) => bridge,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    let code = tokio::select! {
        code = execute(command, &bridge, &presenter) => code,
        _ = interrupted() => {
            presenter.stop_spinner();
            presenter.warn("Interrupted.");
            EXIT_CANCELED
        }
    };
    ExitCode::from(code)
}

async fn execute(command: Commands, bridge: &CliBridge, presenter: &Presenter) -> u8 {
    let result = match command {
        Commands::SelectFile { kind } => bridge.select_file(kind.into()).await,
        Commands::Process(args) => run_chunk(bridge, WorkerOperation::ProcessText, args).await,
        Commands::Transcribe(args) => {
            run_chunk(bridge, WorkerOperation::TranscribeAudio, args).await
        }
        Commands::Dirs {
            action: DirsAction::Get,
        } => Ok(bridge.get_default_directories()),
        Commands::Dirs {
            action: DirsAction::Set,
        } => bridge.set_default_directories().await,
        Commands::Serve | Commands::Config { .. } => {
            presenter.error("Command is not handled here");
            return EXIT_USAGE_ERROR;
        }
    };

    match result {
        Ok(reply) => present_reply(presenter, reply),
        Err(e) => {
            presenter.error(&e.to_string());
            EXIT_ERROR
        }
    }
}

/// Resolve the source (asking for one if needed), then run the worker
async fn run_chunk(
    bridge: &CliBridge,
    operation: WorkerOperation,
    args: ChunkArgs,
) -> Result<BridgeReply, BridgeError> {
    let source = match args.source {
        Some(source) => {
            let path = absolute_source(&source)?;
            bridge.grant(path.clone());
            path
        }
        None => match bridge.select_file(source_kind(operation)).await? {
            BridgeReply::File(Some(path)) => path,
            _ => return Ok(BridgeReply::File(None)),
        },
    };

    let request = ChunkRequest::new(
        source.to_string_lossy(),
        args.title,
        args.instruction,
        args.mode,
    );
    match operation {
        WorkerOperation::ProcessText => bridge.process_transcript(&request).await,
        WorkerOperation::TranscribeAudio => bridge.transcribe_audio(&request).await,
    }
}

/// Serve JSON lines on stdin/stdout; stdin is the channel, so dialogs are native
async fn run_serve(config: &AppConfig, presenter: &Presenter) -> ExitCode {
    if config.dialogs_or_default() != DialogBackend::Native {
        warn!("serve always uses native dialogs");
    }

    let bridge = match build_bridge(
        config,
        create_dialogs(DialogBackend::Native),
        HandlerCallbacks::default(),
    ) {
        Ok(bridge) => Arc::new(bridge),
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    let result = tokio::select! {
        result = serve(bridge, tokio::io::stdin(), tokio::io::stdout()) => result,
        _ = interrupted() => Ok(()),
    };
    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            presenter.error(&format!("Bridge stream failed: {}", e));
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Print a reply and pick the exit code
fn present_reply(presenter: &Presenter, reply: BridgeReply) -> u8 {
    match reply {
        BridgeReply::File(Some(path)) => {
            presenter.output_path(&path);
            EXIT_SUCCESS
        }
        BridgeReply::File(None) => {
            presenter.warn("No file selected.");
            EXIT_CANCELED
        }
        BridgeReply::Text(text) => {
            presenter.output(&text);
            EXIT_SUCCESS
        }
        BridgeReply::Canceled(message) => {
            presenter.warn(&message);
            EXIT_CANCELED
        }
        BridgeReply::Directories(prefs) => {
            presenter.directories(&prefs);
            EXIT_SUCCESS
        }
    }
}

fn spinner_callbacks(presenter: &Arc<Presenter>) -> HandlerCallbacks {
    let on_start = Arc::clone(presenter);
    let on_end = Arc::clone(presenter);
    HandlerCallbacks {
        on_worker_start: Some(Box::new(move |operation: WorkerOperation| {
            on_start.worker_started(operation)
        })),
        on_worker_end: Some(Box::new(move |operation: WorkerOperation, success: bool| {
            on_end.worker_finished(operation, success)
        })),
    }
}

fn source_kind(operation: WorkerOperation) -> FileKind {
    match operation {
        WorkerOperation::ProcessText => FileKind::Text,
        WorkerOperation::TranscribeAudio => FileKind::Audio,
    }
}

/// The worker runs in its own directory, so relative sources are anchored here
fn absolute_source(source: &str) -> Result<PathBuf, BridgeError> {
    let path = Path::new(source);
    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()
            .map_err(|e| BridgeError::InvalidRequest(e.to_string()))?
            .join(path)
    };

    if !path.is_file() {
        return Err(BridgeError::InvalidRequest(format!(
            "Source file not found: {}",
            path.display()
        )));
    }
    Ok(path)
}

/// Resolves on interrupt; never resolves if signals cannot be watched
async fn interrupted() {
    if let Err(e) = shutdown_requested().await {
        warn!(error = %e, "cannot watch for interrupts");
        std::future::pending::<()>().await;
    }
}
