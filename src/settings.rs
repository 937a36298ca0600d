//! Game settings and preferences
//!
//! Read from a JSON file next to the game. Missing fields take defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::platform::Assets;

/// Settings file failures
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("could not read settings file")]
    Io(#[from] std::io::Error),

    #[error("invalid settings file")]
    Parse(#[from] serde_json::Error),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed run seed; a clock-derived seed is used when absent
    pub seed: Option<u64>,

    // === Debug ===
    /// Outline bounding ellipses
    pub debug_bounds: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,

    // === Headless run ===
    /// Frames to simulate
    pub frames: u32,
    /// Milliseconds per simulated frame
    pub frame_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            debug_bounds: false,
            master_volume: 0.8,
            music_volume: 0.7,
            frames: 3600,
            frame_ms: 16,
        }
    }
}

impl Settings {
    /// Default settings file name
    pub const FILE_NAME: &'static str = "fishy.json";

    /// Parse settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a file
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from a file, falling back to defaults on any failure
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                Self::default()
            }
            Err(err) => {
                log::warn!("Ignoring settings at {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    /// Save settings to a file
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Effective sound effect volume (0.0 - 1.0)
    pub fn effective_effects_volume(&self) -> f32 {
        self.master_volume.clamp(0.0, 1.0)
    }

    /// Effective music volume (0.0 - 1.0)
    pub fn effective_music_volume(&self) -> f32 {
        (self.master_volume * self.music_volume).clamp(0.0, 1.0)
    }

    /// Push the volume settings to the host's audio
    pub fn apply_audio(&self, assets: &mut dyn Assets) {
        assets.set_volume(self.effective_effects_volume(), self.effective_music_volume());
    }
}
