//! Preferences storage port interface

use std::path::PathBuf;

use crate::domain::error::PreferencesError;
use crate::domain::preferences::{DirectoryPreferences, StoredDirectories};

/// Port for directory preference persistence
///
/// Synchronous on purpose: writes happen inside the preferences lock so
/// two requests never interleave on the file.
pub trait PreferencesStore: Send + Sync {
    /// Read whatever is stored. A missing file is an empty result.
    fn load(&self) -> Result<StoredDirectories, PreferencesError>;

    /// Replace the stored values with both fields of `prefs`.
    fn save(&self, prefs: &DirectoryPreferences) -> Result<(), PreferencesError>;

    /// Location of the backing file, if any
    fn path(&self) -> Option<PathBuf>;
}
