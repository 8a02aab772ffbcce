//! Settings persistence.

mod file;
mod memory;

pub use file::FileSettingsStore;
pub use memory::MemorySettingsStore;

use crate::color::Color;
use crate::shapes::DEFAULT_THICKNESS;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Settings not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// User settings that survive between sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Saved palette colors. Validated by `Palette::from_saved` on load.
    #[serde(default)]
    pub palette: Option<Vec<Color>>,
    #[serde(default = "default_thickness")]
    pub thickness: f64,
}

fn default_thickness() -> f64 {
    DEFAULT_THICKNESS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            palette: None,
            thickness: DEFAULT_THICKNESS,
        }
    }
}

impl Settings {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// A place where settings are kept.
pub trait SettingsStore: Send + Sync {
    /// Load the stored settings.
    fn load(&self) -> StorageResult<Settings>;

    /// Replace the stored settings.
    fn save(&self, settings: &Settings) -> StorageResult<()>;

    /// Replace only the palette, keeping every other stored setting. A
    /// missing or unreadable file is overwritten from defaults.
    fn save_palette(&self, palette: &[Color]) -> StorageResult<()> {
        let mut settings = self.load_or(Settings::default());
        settings.palette = Some(palette.to_vec());
        self.save(&settings)
    }

    /// Load, falling back to `fallback` when nothing usable is stored.
    fn load_or(&self, fallback: Settings) -> Settings {
        match self.load() {
            Ok(settings) => settings,
            Err(StorageError::NotFound(_)) => {
                log::info!("No saved settings, using defaults");
                fallback
            }
            Err(e) => {
                log::warn!("Failed to load settings, using defaults: {}", e);
                fallback
            }
        }
    }
}
