//! Selectable source file kinds

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::InvalidFileKindError;

/// Kinds of source file the open dialog can be scoped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Text,
    Audio,
    #[default]
    Any,
}

impl FileKind {
    /// Filter label shown in the dialog
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Audio => "Audio",
            Self::Any => "Transcripts and audio",
        }
    }

    /// Extension allow-list, without leading dots
    pub const fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Text => &["txt"],
            Self::Audio => &["mp3", "wav", "ogg", "m4a"],
            Self::Any => &["txt", "mp3", "wav", "ogg", "m4a"],
        }
    }

    /// Check a path against the allow-list (case-insensitive)
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext = ext.to_lowercase();
                self.extensions().contains(&ext.as_str())
            })
            .unwrap_or(false)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Audio => "audio",
            Self::Any => "any",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FileKind {
    type Err = InvalidFileKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "audio" => Ok(Self::Audio),
            "any" | "all" => Ok(Self::Any),
            _ => Err(InvalidFileKindError {
                input: s.to_string(),
            }),
        }
    }
}
