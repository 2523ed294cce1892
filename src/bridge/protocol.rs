//! Bridge wire types
//!
//! One JSON object per line in each direction. Requests name an operation
//! and carry exactly that operation's arguments; anything else is rejected
//! while deserializing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::request::{ChunkRequest, FileKind};

/// Operations the presentation layer may request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", content = "args", rename_all = "camelCase", deny_unknown_fields)]
pub enum BridgeRequest {
    #[serde(rename_all = "camelCase")]
    SelectFile {
        #[serde(default)]
        kind: FileKind,
    },
    #[serde(rename_all = "camelCase")]
    ProcessTranscript {
        source_path: String,
        title: String,
        instruction: String,
        mode: String,
    },
    #[serde(rename_all = "camelCase")]
    TranscribeAudio {
        source_path: String,
        title: String,
        instruction: String,
        mode: String,
    },
    SetDefaultDirectories,
    GetDefaultDirectories,
}

impl BridgeRequest {
    /// Operation name as it appears on the wire
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SelectFile { .. } => "selectFile",
            Self::ProcessTranscript { .. } => "processTranscript",
            Self::TranscribeAudio { .. } => "transcribeAudio",
            Self::SetDefaultDirectories => "setDefaultDirectories",
            Self::GetDefaultDirectories => "getDefaultDirectories",
        }
    }

    /// Worker-backed requests as a chunk request
    pub fn chunk_request(&self) -> Option<ChunkRequest> {
        match self {
            Self::ProcessTranscript {
                source_path,
                title,
                instruction,
                mode,
            }
            | Self::TranscribeAudio {
                source_path,
                title,
                instruction,
                mode,
            } => Some(ChunkRequest::new(
                source_path.as_str(),
                title.as_str(),
                instruction.as_str(),
                mode.as_str(),
            )),
            _ => None,
        }
    }

    /// Parse one request line; the optional `id` is returned alongside
    pub fn parse_line(line: &str) -> (Value, Result<Self, serde_json::Error>) {
        let mut value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => return (Value::Null, Err(e)),
        };

        let id = value
            .as_object_mut()
            .and_then(|obj| obj.remove("id"))
            .unwrap_or(Value::Null);

        (id, serde_json::from_value(value))
    }
}

/// Response status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Ok,
    Canceled,
    Error,
}

/// One response line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BridgeResponse {
    pub id: Value,
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl BridgeResponse {
    pub fn ok(id: Value, result: Value) -> Self {
        Self {
            id,
            status: ResponseStatus::Ok,
            result: Some(result),
            message: None,
        }
    }

    pub fn canceled(id: Value, message: impl Into<String>) -> Self {
        Self {
            id,
            status: ResponseStatus::Canceled,
            result: None,
            message: Some(message.into()),
        }
    }

    pub fn error(id: Value, message: impl Into<String>) -> Self {
        Self {
            id,
            status: ResponseStatus::Error,
            result: None,
            message: Some(message.into()),
        }
    }
}
