//! JSON settings file.

use super::{Settings, SettingsStore, StorageError, StorageResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings kept in a single JSON file.
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    /// Use the file at `path`. Parent directories are created on first save.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Settings file in the default location.
    ///
    /// On Linux: `~/.config/inkwheel/settings.json`
    /// On Windows: `%APPDATA%\inkwheel\settings.json`
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine config directory".to_string()))?;
        Ok(Self::new(base.join("inkwheel").join("settings.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> StorageResult<Settings> {
        if !self.path.exists() {
            return Err(StorageError::NotFound(self.path.display().to_string()));
        }
        let json = fs::read_to_string(&self.path).map_err(|e| {
            StorageError::Io(format!("Failed to read {}: {}", self.path.display(), e))
        })?;
        Settings::from_json(&json).map_err(|e| {
            StorageError::Serialization(format!("Failed to parse {}: {}", self.path.display(), e))
        })
    }

    fn save(&self, settings: &Settings) -> StorageResult<()> {
        let json = settings
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                StorageError::Io(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }
        fs::write(&self.path, json).map_err(|e| {
            StorageError::Io(format!("Failed to write {}: {}", self.path.display(), e))
        })?;
        log::debug!("Saved settings to {}", self.path.display());
        Ok(())
    }
}
