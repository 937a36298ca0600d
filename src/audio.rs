//! Named sound cues
//!
//! Playback itself belongs to the host framework; the simulation only names
//! which cue starts or stops.

use serde::{Deserialize, Serialize};

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    /// Ambient whale music, loops while a whale is alive
    BigOpponent,
    /// Player eats an opponent
    Bite,
    /// Player picks up a power-up
    Powerup,
    /// Player gets eaten
    GameOver,
}

impl SoundCue {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::BigOpponent => "big-opponent",
            SoundCue::Bite => "bite",
            SoundCue::Powerup => "powerup",
            SoundCue::GameOver => "game-over",
        }
    }

    /// Whether the cue loops until stopped
    pub fn is_looping(&self) -> bool {
        matches!(self, SoundCue::BigOpponent)
    }
}

/// A start or stop request recorded by headless hosts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioEvent {
    Play(SoundCue),
    Stop(SoundCue),
}
