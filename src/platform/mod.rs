//! Platform abstraction layer
//!
//! The host framework owns images and audio. The simulation reaches them
//! through `Assets`:
//! - Sprite loading by filesystem path
//! - Sound cue playback
//!
//! `Headless` runs the simulation without either, for tests and the demo
//! binary.

use serde::{Deserialize, Serialize};

use crate::audio::{AudioEvent, SoundCue};

/// Opaque handle to an image owned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpriteHandle(pub u32);

/// Sprite loading failures
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    #[error("sprite loading is disabled")]
    Disabled,

    #[error("sprite not found: {0}")]
    NotFound(String),
}

/// Image and sound services supplied by the host
pub trait Assets {
    /// Whether sprites should be loaded at all (false without a graphics context)
    fn loads_sprites(&self) -> bool {
        true
    }

    fn load_sprite(&mut self, path: &str) -> Result<SpriteHandle, AssetError>;

    fn play(&mut self, cue: SoundCue);

    fn stop(&mut self, cue: SoundCue);

    /// Set playback volumes (0.0 - 1.0); `music` applies to looping cues
    fn set_volume(&mut self, _effects: f32, _music: f32) {}
}

/// Load a sprite, logging and swallowing any failure
///
/// The entity keeps working without an image when this returns `None`.
pub fn load_sprite_or_log(assets: &mut dyn Assets, path: &str) -> Option<SpriteHandle> {
    if !assets.loads_sprites() {
        return None;
    }
    match assets.load_sprite(path) {
        Ok(handle) => Some(handle),
        Err(err) => {
            log::warn!("Failed to load sprite {}: {}", path, err);
            None
        }
    }
}

/// Host without graphics or audio output
///
/// Records audio requests so callers can inspect them.
#[derive(Debug, Clone)]
pub struct Headless {
    sprite_paths: Option<Vec<String>>,
    /// Every play/stop request, oldest first
    pub audio_log: Vec<AudioEvent>,
    pub effects_volume: f32,
    pub music_volume: f32,
}

impl Default for Headless {
    fn default() -> Self {
        Self {
            sprite_paths: None,
            audio_log: Vec::new(),
            effects_volume: 1.0,
            music_volume: 1.0,
        }
    }
}

impl Headless {
    /// Headless host that loads no sprites
    pub fn new() -> Self {
        Self::default()
    }

    /// Headless host that resolves the given sprite paths and fails the rest
    pub fn with_sprites(paths: &[&str]) -> Self {
        Self {
            sprite_paths: Some(paths.iter().map(|p| p.to_string()).collect()),
            ..Self::default()
        }
    }

    /// Cues started and not stopped since
    pub fn playing(&self) -> Vec<SoundCue> {
        let mut playing = Vec::new();
        for event in &self.audio_log {
            match *event {
                AudioEvent::Play(cue) if cue.is_looping() && !playing.contains(&cue) => {
                    playing.push(cue)
                }
                AudioEvent::Stop(cue) => playing.retain(|c| *c != cue),
                _ => {}
            }
        }
        playing
    }

    /// Number of times `event` was requested
    pub fn count(&self, event: AudioEvent) -> usize {
        self.audio_log.iter().filter(|e| **e == event).count()
    }
}

impl Assets for Headless {
    fn loads_sprites(&self) -> bool {
        self.sprite_paths.is_some()
    }

    fn load_sprite(&mut self, path: &str) -> Result<SpriteHandle, AssetError> {
        let paths = self.sprite_paths.as_ref().ok_or(AssetError::Disabled)?;
        paths
            .iter()
            .position(|p| p == path)
            .map(|i| SpriteHandle(i as u32))
            .ok_or_else(|| AssetError::NotFound(path.to_string()))
    }

    fn play(&mut self, cue: SoundCue) {
        log::trace!("play {}", cue.as_str());
        self.audio_log.push(AudioEvent::Play(cue));
    }

    fn stop(&mut self, cue: SoundCue) {
        log::trace!("stop {}", cue.as_str());
        self.audio_log.push(AudioEvent::Stop(cue));
    }

    fn set_volume(&mut self, effects: f32, music: f32) {
        self.effects_volume = effects.clamp(0.0, 1.0);
        self.music_volume = music.clamp(0.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_skips_sprites() {
        let mut assets = Headless::new();
        assert_eq!(load_sprite_or_log(&mut assets, "resources/whale.png"), None);
        assert_eq!(assets.load_sprite("resources/whale.png"), Err(AssetError::Disabled));
    }

    #[test]
    fn test_missing_sprite_is_swallowed() {
        let mut assets = Headless::with_sprites(&["resources/poison.png"]);
        assert_eq!(
            load_sprite_or_log(&mut assets, "resources/poison.png"),
            Some(SpriteHandle(0))
        );
        assert_eq!(load_sprite_or_log(&mut assets, "resources/missing.png"), None);
    }

    #[test]
    fn test_playing_tracks_looping_cues() {
        let mut assets = Headless::new();
        assets.play(SoundCue::BigOpponent);
        assets.play(SoundCue::Bite);
        assert_eq!(assets.playing(), vec![SoundCue::BigOpponent]);
        assets.stop(SoundCue::BigOpponent);
        assert!(assets.playing().is_empty());
        assert_eq!(assets.count(AudioEvent::Play(SoundCue::Bite)), 1);
    }
}
