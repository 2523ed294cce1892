//! JSON preferences store adapter

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::application::ports::PreferencesStore;
use crate::domain::error::PreferencesError;
use crate::domain::preferences::{DirectoryPreferences, StoredDirectories};
use crate::infrastructure::config::app_config_dir;

/// File name of the preferences document inside the config directory
pub const PREFERENCES_FILE_NAME: &str = "preferences.json";

/// Directory preferences kept as a small JSON object on disk
pub struct JsonPreferencesStore {
    path: PathBuf,
}

impl JsonPreferencesStore {
    /// Create a store at the per-user default location
    pub fn new() -> Self {
        Self {
            path: app_config_dir().join(PREFERENCES_FILE_NAME),
        }
    }

    /// Create with custom path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for JsonPreferencesStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferencesStore for JsonPreferencesStore {
    fn load(&self) -> Result<StoredDirectories, PreferencesError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(StoredDirectories::from_json(&content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(StoredDirectories::default()),
            Err(e) => Err(PreferencesError::ReadError(e.to_string())),
        }
    }

    fn save(&self, prefs: &DirectoryPreferences) -> Result<(), PreferencesError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| PreferencesError::WriteError(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(prefs)
            .map_err(|e| PreferencesError::WriteError(e.to_string()))?;

        fs::write(&self.path, content).map_err(|e| PreferencesError::WriteError(e.to_string()))
    }

    fn path(&self) -> Option<PathBuf> {
        Some(self.path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::PreferencesService;
    use crate::domain::preferences::DirectoryField;

    #[test]
    fn default_path_is_per_user() {
        let store = JsonPreferencesStore::new();
        let path = store.path().unwrap();
        assert!(path.to_string_lossy().contains("memory-chunker"));
        assert!(path.ends_with(PREFERENCES_FILE_NAME));
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonPreferencesStore::with_path(dir.path().join("none.json"));
        assert_eq!(store.load().unwrap(), StoredDirectories::default());
    }

    #[test]
    fn save_writes_camel_case_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(PREFERENCES_FILE_NAME);
        let store = JsonPreferencesStore::with_path(&path);

        store
            .save(&DirectoryPreferences {
                open_directory: PathBuf::from("/open"),
                save_directory: PathBuf::from("/save"),
            })
            .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["openDirectory"], "/open");
        assert_eq!(json["saveDirectory"], "/save");
    }

    #[test]
    fn corrupt_file_means_no_preferences() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PREFERENCES_FILE_NAME);
        fs::write(&path, "{ this is not json").unwrap();

        let store = JsonPreferencesStore::with_path(&path);
        assert_eq!(store.load().unwrap(), StoredDirectories::default());
    }

    #[test]
    fn stale_directory_falls_back_for_that_field_only() {
        let dir = tempfile::tempdir().unwrap();
        let docs = tempfile::tempdir().unwrap();
        let kept = tempfile::tempdir().unwrap();
        let path = dir.path().join(PREFERENCES_FILE_NAME);
        let content = serde_json::json!({
            "openDirectory": dir.path().join("deleted-long-ago"),
            "saveDirectory": kept.path(),
        });
        fs::write(&path, content.to_string()).unwrap();

        let service =
            PreferencesService::load(JsonPreferencesStore::with_path(&path), docs.path());

        assert_eq!(service.directory(DirectoryField::Open), docs.path());
        assert_eq!(service.directory(DirectoryField::Save), kept.path());
    }

    #[test]
    fn updates_survive_reload() {
        let dir = tempfile::tempdir().unwrap();
        let docs = tempfile::tempdir().unwrap();
        let chosen = tempfile::tempdir().unwrap();
        let path = dir.path().join(PREFERENCES_FILE_NAME);

        let service =
            PreferencesService::load(JsonPreferencesStore::with_path(&path), docs.path());
        service.update(DirectoryField::Save, chosen.path());

        let reloaded =
            PreferencesService::load(JsonPreferencesStore::with_path(&path), docs.path());
        assert_eq!(reloaded.directory(DirectoryField::Save), chosen.path());
        assert_eq!(reloaded.directory(DirectoryField::Open), docs.path());
    }
}
