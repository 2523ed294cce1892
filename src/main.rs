//! Memory Chunker CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use memory_chunker::cli::{
    app::{load_merged_config, run_command, EXIT_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
};
use memory_chunker::domain::config::{AppConfig, DialogBackend};
use memory_chunker::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Commands::Config { action } = cli.command {
        let presenter = Presenter::new();
        let store = XdgConfigStore::new();
        if let Err(e) = handle_config_command(action, &store, &presenter).await {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    let cli_config = AppConfig {
        worker_dir: cli.worker_dir.clone(),
        worker_timeout: cli.timeout.clone(),
        dialogs: cli.dialogs.map(|d| DialogBackend::from(d).to_string()),
        ..AppConfig::empty()
    };
    let config = load_merged_config(cli_config).await;

    run_command(cli.command, config).await
}

/// Logs go to stderr; stdout carries results only
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
