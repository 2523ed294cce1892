//! Memory chunk request value object

use std::path::Path;

use crate::domain::worker::WorkerOperation;

use super::slug::chunk_file_name;

/// Source path placeholder the presentation layer sends when nothing was picked
pub const MISSING_SOURCE_PLACEHOLDER: &str = "No file selected";

/// Mode that names output files after the title
pub const RAG_MODE: &str = "rag";

/// What the user asked for: a source file plus the worker's free-form inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkRequest {
    pub source_path: String,
    pub title: String,
    pub instruction: String,
    /// Interpreted by the worker only
    pub mode: String,
}

impl ChunkRequest {
    pub fn new(
        source_path: impl Into<String>,
        title: impl Into<String>,
        instruction: impl Into<String>,
        mode: impl Into<String>,
    ) -> Self {
        Self {
            source_path: source_path.into(),
            title: title.into(),
            instruction: instruction.into(),
            mode: mode.into(),
        }
    }

    /// True when no usable source path was supplied
    pub fn is_source_missing(&self) -> bool {
        let source = self.source_path.trim();
        source.is_empty() || source == MISSING_SOURCE_PLACEHOLDER
    }

    /// Default save-dialog filename for an operation
    ///
    /// Text processing names the file after the title in `rag` mode and after
    /// the instruction otherwise. Transcription prefers the title and falls
    /// back to the instruction.
    pub fn default_file_name(&self, operation: WorkerOperation) -> String {
        let base = match operation {
            WorkerOperation::ProcessText if self.mode == RAG_MODE => &self.title,
            WorkerOperation::ProcessText => &self.instruction,
            WorkerOperation::TranscribeAudio if self.title.trim().is_empty() => {
                &self.instruction
            }
            WorkerOperation::TranscribeAudio => &self.title,
        };
        chunk_file_name(base)
    }

    /// Positional worker arguments
    ///
    /// Layout: `[source, title, instruction, mode, destination]`.
    pub fn worker_args(&self, destination: &Path) -> Vec<String> {
        vec![
            self.source_path.clone(),
            self.title.clone(),
            self.instruction.clone(),
            self.mode.clone(),
            destination.to_string_lossy().into_owned(),
        ]
    }
}
