//! Worker operations

use std::fmt;

/// Operations the external worker can perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkerOperation {
    /// Turn a text transcript into a memory chunk file
    ProcessText,
    /// Transcribe an audio file, then process the transcript
    TranscribeAudio,
}

impl WorkerOperation {
    /// Get the wire name of this operation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ProcessText => "process-text",
            Self::TranscribeAudio => "transcribe-audio",
        }
    }

    /// Default worker script for this operation
    pub const fn default_script(&self) -> &'static str {
        match self {
            Self::ProcessText => "process.py",
            Self::TranscribeAudio => "transcribe.py",
        }
    }
}

impl fmt::Display for WorkerOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
