//! Interrupt handling for command runs

use std::io;

use tracing::info;

/// Resolves when the process is asked to stop (Ctrl+C, or SIGTERM on unix).
///
/// Racing a command against this drops the command's future, which kills
/// any running worker.
pub async fn shutdown_requested() -> io::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigint = signal(SignalKind::interrupt())?;
        let mut sigterm = signal(SignalKind::terminate())?;
        tokio::select! {
            _ = sigint.recv() => info!("received SIGINT"),
            _ = sigterm.recv() => info!("received SIGTERM"),
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
        info!("received Ctrl+C");
    }

    Ok(())
}
