//! Line-oriented bridge server
//!
//! Reads one JSON request per line and writes one JSON response per line.
//! Requests run concurrently; responses are written as they finish and are
//! matched to requests by `id`.

use std::io;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

use crate::application::ports::{FileDialogs, PreferencesStore, Worker};

use super::protocol::{BridgeRequest, BridgeResponse};
use super::Bridge;

/// Serve requests from `reader` until end of input.
///
/// In-flight requests are allowed to finish before this returns.
pub async fn serve<W, D, S, R, O>(
    bridge: Arc<Bridge<W, D, S>>,
    reader: R,
    writer: O,
) -> io::Result<()>
where
    W: Worker + 'static,
    D: FileDialogs + 'static,
    S: PreferencesStore + 'static,
    R: AsyncRead + Unpin,
    O: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::channel::<BridgeResponse>(32);
    let writer_task = tokio::spawn(write_responses(rx, writer));

    let mut lines = BufReader::new(reader).lines();
    let mut in_flight = JoinSet::new();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let (id, parsed) = BridgeRequest::parse_line(&line);
        let request = match parsed {
            Ok(request) => request,
            Err(e) => {
                debug!(error = %e, "rejected bridge request");
                let response = BridgeResponse::error(id, format!("Invalid request: {}", e));
                if tx.send(response).await.is_err() {
                    break;
                }
                continue;
            }
        };

        info!(op = request.name(), %id, "bridge request");
        let bridge = Arc::clone(&bridge);
        let tx = tx.clone();
        in_flight.spawn(async move {
            let response = match bridge.dispatch(request).await {
                Ok(reply) => reply.into_response(id),
                Err(e) => BridgeResponse::error(id, e.to_string()),
            };
            let _ = tx.send(response).await;
        });
    }

    while let Some(joined) = in_flight.join_next().await {
        if let Err(e) = joined {
            error!(error = %e, "bridge request task failed");
        }
    }

    drop(tx);
    writer_task
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?
}

async fn write_responses<O>(mut rx: mpsc::Receiver<BridgeResponse>, mut writer: O) -> io::Result<()>
where
    O: AsyncWrite + Unpin,
{
    while let Some(response) = rx.recv().await {
        let mut line = serde_json::to_string(&response)?;
        line.push('\n');
        writer.write_all(line.as_bytes()).await?;
        writer.flush().await?;
    }
    Ok(())
}
