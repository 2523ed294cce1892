//! Directory preferences service
//!
//! Single owner of the in-memory [`DirectoryPreferences`]. Every mutation is
//! written through to the store before the lock is released; write failures
//! are logged and swallowed because remembered directories are a convenience.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use crate::domain::preferences::{DirectoryField, DirectoryPreferences, StoredDirectories};

use super::ports::PreferencesStore;

/// Owned, persisted directory preferences
pub struct PreferencesService<S: PreferencesStore> {
    store: S,
    default_dir: PathBuf,
    current: Mutex<DirectoryPreferences>,
}

impl<S: PreferencesStore> PreferencesService<S> {
    /// Load preferences from `store`, substituting `default_dir` for
    /// anything missing, unreadable or no longer on disk.
    pub fn load(store: S, default_dir: impl Into<PathBuf>) -> Self {
        let default_dir = default_dir.into();
        let stored = store.load().unwrap_or_else(|e| {
            warn!(error = %e, "ignoring unreadable directory preferences");
            StoredDirectories::default()
        });
        let current = DirectoryPreferences::resolve(stored, &default_dir);
        debug!(
            open = %current.open_directory.display(),
            save = %current.save_directory.display(),
            "loaded directory preferences"
        );

        Self {
            store,
            default_dir,
            current: Mutex::new(current),
        }
    }

    /// Current values, with vanished directories replaced by the default
    pub fn get(&self) -> DirectoryPreferences {
        self.lock().existing_or(&self.default_dir)
    }

    /// Current value of one field, resolved the same way as [`get`](Self::get)
    pub fn directory(&self, field: DirectoryField) -> PathBuf {
        self.get().get(field).to_path_buf()
    }

    /// Set one field and persist both
    pub fn update(&self, field: DirectoryField, dir: impl Into<PathBuf>) {
        let mut current = self.lock();
        current.set(field, dir);
        debug!(%field, dir = %current.get(field).display(), "directory preference updated");
        self.persist(&current);
    }

    /// Remember the directory containing `path`
    pub fn update_from_file(&self, field: DirectoryField, path: &Path) {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.update(field, parent);
        }
    }

    /// The documents-style fallback directory
    pub fn default_dir(&self) -> &Path {
        &self.default_dir
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist(&self, prefs: &DirectoryPreferences) {
        if let Err(e) = self.store.save(prefs) {
            warn!(error = %e, "failed to save directory preferences");
        }
    }

    fn lock(&self) -> MutexGuard<'_, DirectoryPreferences> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
