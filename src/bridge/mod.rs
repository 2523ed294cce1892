//! Bridge - the confined operation surface for the presentation layer
//!
//! The presentation layer can only call the five operations below. Source
//! paths must come from [`Bridge::select_file`] or from a trusted caller
//! via [`Bridge::grant`]; destinations only ever come from the save dialog.

pub mod protocol;
pub mod server;

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::application::ports::{FileDialogs, PreferencesStore, Worker};
use crate::application::{HandlerError, HandlerOutcome, RequestHandlers, SAVE_CANCELED};
use crate::domain::preferences::DirectoryPreferences;
use crate::domain::request::{ChunkRequest, FileKind};

pub use protocol::{BridgeRequest, BridgeResponse, ResponseStatus};
pub use server::serve;

/// Errors surfaced at the bridge boundary
#[derive(Debug, Clone, Error)]
pub enum BridgeError {
    #[error("Source file was not chosen through the file dialog: {0}")]
    PathNotGranted(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Handler(#[from] HandlerError),
}

/// Successful bridge results
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeReply {
    /// `selectFile`: the chosen path, or none on cancel
    File(Option<PathBuf>),
    /// Worker output text
    Text(String),
    /// User dismissed the save dialog
    Canceled(String),
    /// Current directory preferences
    Directories(DirectoryPreferences),
}

impl BridgeReply {
    /// Encode as a wire response
    pub fn into_response(self, id: Value) -> BridgeResponse {
        match self {
            Self::File(path) => BridgeResponse::ok(
                id,
                path.map(|p| Value::String(p.to_string_lossy().into_owned()))
                    .unwrap_or(Value::Null),
            ),
            Self::Text(text) => BridgeResponse::ok(id, Value::String(text)),
            Self::Canceled(message) => BridgeResponse::canceled(id, message),
            Self::Directories(prefs) => match serde_json::to_value(&prefs) {
                Ok(value) => BridgeResponse::ok(id, value),
                Err(e) => BridgeResponse::error(id, e.to_string()),
            },
        }
    }
}

/// Typed operation surface over the request handlers
pub struct Bridge<W, D, S>
where
    W: Worker,
    D: FileDialogs,
    S: PreferencesStore,
{
    handlers: RequestHandlers<W, D, S>,
    granted: Mutex<HashSet<PathBuf>>,
}

impl<W, D, S> Bridge<W, D, S>
where
    W: Worker,
    D: FileDialogs,
    S: PreferencesStore,
{
    pub fn new(handlers: RequestHandlers<W, D, S>) -> Self {
        Self {
            handlers,
            granted: Mutex::new(HashSet::new()),
        }
    }

    pub fn handlers(&self) -> &RequestHandlers<W, D, S> {
        &self.handlers
    }

    /// Allow a source path chosen outside the file dialog.
    ///
    /// Only trusted callers (the command line) may do this; the stdio
    /// server never does.
    pub fn grant(&self, path: impl Into<PathBuf>) {
        self.lock_granted().insert(path.into());
    }

    pub fn is_granted(&self, path: &Path) -> bool {
        self.lock_granted().contains(path)
    }

    /// Run one request to completion
    pub async fn dispatch(&self, request: BridgeRequest) -> Result<BridgeReply, BridgeError> {
        match request {
            BridgeRequest::SelectFile { kind } => self.select_file(kind).await,
            BridgeRequest::ProcessTranscript { .. } => {
                let chunk = self.granted_chunk(&request)?;
                self.process_transcript(&chunk).await
            }
            BridgeRequest::TranscribeAudio { .. } => {
                let chunk = self.granted_chunk(&request)?;
                self.transcribe_audio(&chunk).await
            }
            BridgeRequest::SetDefaultDirectories => self.set_default_directories().await,
            BridgeRequest::GetDefaultDirectories => Ok(self.get_default_directories()),
        }
    }

    /// `selectFile`
    pub async fn select_file(&self, kind: FileKind) -> Result<BridgeReply, BridgeError> {
        let chosen = self.handlers.select_file(kind).await?;
        if let Some(path) = &chosen {
            self.grant(path.clone());
        }
        Ok(BridgeReply::File(chosen))
    }

    /// `processTranscript`
    pub async fn process_transcript(&self, request: &ChunkRequest) -> Result<BridgeReply, BridgeError> {
        self.check_source(request)?;
        let outcome = self.handlers.process_text(request).await?;
        Ok(outcome_reply(outcome))
    }

    /// `transcribeAudio`
    pub async fn transcribe_audio(&self, request: &ChunkRequest) -> Result<BridgeReply, BridgeError> {
        self.check_source(request)?;
        let outcome = self.handlers.transcribe_audio(request).await?;
        Ok(outcome_reply(outcome))
    }

    /// `setDefaultDirectories`
    pub async fn set_default_directories(&self) -> Result<BridgeReply, BridgeError> {
        let prefs = self.handlers.set_default_directories().await?;
        Ok(BridgeReply::Directories(prefs))
    }

    /// `getDefaultDirectories`
    pub fn get_default_directories(&self) -> BridgeReply {
        BridgeReply::Directories(self.handlers.get_default_directories())
    }

    fn granted_chunk(&self, request: &BridgeRequest) -> Result<ChunkRequest, BridgeError> {
        request.chunk_request().ok_or_else(|| {
            BridgeError::InvalidRequest(format!("{} carries no source file", request.name()))
        })
    }

    /// Missing sources pass through so the handler can report them
    fn check_source(&self, request: &ChunkRequest) -> Result<(), BridgeError> {
        if request.is_source_missing() || self.is_granted(Path::new(&request.source_path)) {
            return Ok(());
        }
        warn!(source = %request.source_path, "rejected source path that was never granted");
        Err(BridgeError::PathNotGranted(request.source_path.clone()))
    }

    fn lock_granted(&self) -> MutexGuard<'_, HashSet<PathBuf>> {
        self.granted.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn outcome_reply(outcome: HandlerOutcome) -> BridgeReply {
    match outcome {
        HandlerOutcome::Completed(text) => BridgeReply::Text(text),
        HandlerOutcome::Canceled => BridgeReply::Canceled(SAVE_CANCELED.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn file_reply_encodes_null_on_cancel() {
        let response = BridgeReply::File(None).into_response(json!(1));
        assert_eq!(response.status, ResponseStatus::Ok);
        assert_eq!(response.result, Some(Value::Null));
    }

    #[test]
    fn directories_reply_uses_camel_case() {
        let response = BridgeReply::Directories(DirectoryPreferences::uniform("/docs"))
            .into_response(json!(1));
        assert_eq!(
            response.result,
            Some(json!({"openDirectory": "/docs", "saveDirectory": "/docs"}))
        );
    }

    #[test]
    fn canceled_reply_carries_message() {
        let response = outcome_reply(HandlerOutcome::Canceled).into_response(json!(9));
        assert_eq!(response.status, ResponseStatus::Canceled);
        assert_eq!(response.message.as_deref(), Some("Save canceled."));
    }
}
