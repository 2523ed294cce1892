//! Directory preferences value objects

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Which remembered directory to read or change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectoryField {
    /// Directory the open dialog starts in
    Open,
    /// Directory the save dialog starts in
    Save,
}

impl DirectoryField {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "openDirectory",
            Self::Save => "saveDirectory",
        }
    }
}

impl fmt::Display for DirectoryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Last-used open and save directories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryPreferences {
    pub open_directory: PathBuf,
    pub save_directory: PathBuf,
}

impl DirectoryPreferences {
    /// Both fields set to the same directory
    pub fn uniform(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            open_directory: dir.clone(),
            save_directory: dir,
        }
    }

    /// Build from stored values, keeping only directories that still exist
    ///
    /// Each field falls back to `default_dir` on its own.
    pub fn resolve(stored: StoredDirectories, default_dir: &Path) -> Self {
        let pick = |candidate: Option<PathBuf>| {
            candidate
                .filter(|dir| dir.is_dir())
                .unwrap_or_else(|| default_dir.to_path_buf())
        };

        Self {
            open_directory: pick(stored.open_directory),
            save_directory: pick(stored.save_directory),
        }
    }

    pub fn get(&self, field: DirectoryField) -> &Path {
        match field {
            DirectoryField::Open => &self.open_directory,
            DirectoryField::Save => &self.save_directory,
        }
    }

    pub fn set(&mut self, field: DirectoryField, dir: impl Into<PathBuf>) {
        match field {
            DirectoryField::Open => self.open_directory = dir.into(),
            DirectoryField::Save => self.save_directory = dir.into(),
        }
    }

    /// Copy with any vanished directory replaced by `default_dir`
    pub fn existing_or(&self, default_dir: &Path) -> Self {
        Self::resolve(
            StoredDirectories {
                open_directory: Some(self.open_directory.clone()),
                save_directory: Some(self.save_directory.clone()),
            },
            default_dir,
        )
    }
}

/// Raw directory values as found in the preferences file
///
/// Every field is optional so a damaged file degrades field by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredDirectories {
    pub open_directory: Option<PathBuf>,
    pub save_directory: Option<PathBuf>,
}

impl StoredDirectories {
    /// Leniently extract both fields from JSON text
    ///
    /// Unparseable text, a non-object document or a non-string value all
    /// count as "not stored" for the affected field.
    pub fn from_json(content: &str) -> Self {
        let value: serde_json::Value = match serde_json::from_str(content) {
            Ok(value) => value,
            Err(_) => return Self::default(),
        };

        let field = |key: &str| {
            value
                .get(key)
                .and_then(|v| v.as_str())
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
        };

        Self {
            open_directory: field(DirectoryField::Open.as_str()),
            save_directory: field(DirectoryField::Save.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_camel_case_keys() {
        let prefs = DirectoryPreferences {
            open_directory: PathBuf::from("/open"),
            save_directory: PathBuf::from("/save"),
        };
        let json = serde_json::to_value(&prefs).unwrap();
        assert_eq!(json["openDirectory"], "/open");
        assert_eq!(json["saveDirectory"], "/save");
    }

    #[test]
    fn from_json_reads_both_fields() {
        let stored =
            StoredDirectories::from_json(r#"{"openDirectory":"/a","saveDirectory":"/b"}"#);
        assert_eq!(stored.open_directory, Some(PathBuf::from("/a")));
        assert_eq!(stored.save_directory, Some(PathBuf::from("/b")));
    }

    #[test]
    fn from_json_tolerates_damage() {
        assert_eq!(StoredDirectories::from_json("not json"), StoredDirectories::default());
        assert_eq!(StoredDirectories::from_json("[1,2]"), StoredDirectories::default());

        let partial = StoredDirectories::from_json(r#"{"openDirectory":42,"saveDirectory":"/b"}"#);
        assert_eq!(partial.open_directory, None);
        assert_eq!(partial.save_directory, Some(PathBuf::from("/b")));
    }

    #[test]
    fn resolve_falls_back_per_field() {
        let existing = tempfile::tempdir().unwrap();
        let default_dir = tempfile::tempdir().unwrap();

        let stored = StoredDirectories {
            open_directory: Some(existing.path().join("gone")),
            save_directory: Some(existing.path().to_path_buf()),
        };
        let prefs = DirectoryPreferences::resolve(stored, default_dir.path());

        assert_eq!(prefs.open_directory, default_dir.path());
        assert_eq!(prefs.save_directory, existing.path());
    }

    #[test]
    fn set_and_get() {
        let mut prefs = DirectoryPreferences::uniform("/docs");
        prefs.set(DirectoryField::Save, "/exports");
        assert_eq!(prefs.get(DirectoryField::Open), Path::new("/docs"));
        assert_eq!(prefs.get(DirectoryField::Save), Path::new("/exports"));
    }
}
