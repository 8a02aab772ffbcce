//! In-memory settings store.

use super::{Settings, SettingsStore, StorageError, StorageResult};
use std::sync::RwLock;

/// Settings held in memory, for tests and sessions that should not persist.
#[derive(Default)]
pub struct MemorySettingsStore {
    settings: RwLock<Option<Settings>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `settings`.
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings: RwLock::new(Some(settings)),
        }
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> StorageResult<Settings> {
        let settings = self
            .settings
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        settings
            .clone()
            .ok_or_else(|| StorageError::NotFound("memory".to_string()))
    }

    fn save(&self, settings: &Settings) -> StorageResult<()> {
        let mut stored = self
            .settings
            .write()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        *stored = Some(settings.clone());
        Ok(())
    }
}
