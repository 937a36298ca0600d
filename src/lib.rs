//! Fishy - a small 2D arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entity geometry, motion, collisions, game state)
//! - `renderer`: Draw-command seam the external 2D framework implements
//! - `platform`: Sprite/sound seam and a headless implementation
//! - `audio`: Named sound cues
//! - `settings`: JSON settings file

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (source units, one unit per pixel)
    pub const PLAYFIELD_WIDTH: f32 = 615.0;
    pub const PLAYFIELD_HEIGHT: f32 = 515.0;

    /// Smallest width/height an entity may have; smaller values are clamped
    pub const MIN_DIMENSION: f32 = 1.0;
    /// Boundary samples per ellipse for overlap tests
    pub const ELLIPSE_SEGMENTS: usize = 32;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 290.0;
    pub const PLAYER_START_Y: f32 = 240.0;
    pub const PLAYER_START_SIZE: f32 = 32.0;
    /// Steering acceleration per frame
    pub const PLAYER_ACCELERATION: f32 = 0.4;
    /// Per-axis speed cap per frame (before speed boost)
    pub const PLAYER_MAX_SPEED: f32 = 4.0;
    /// Velocity retained each frame without steering input
    pub const PLAYER_DRAG: f32 = 0.9;
    /// Speed cap multiplier while boosted
    pub const SPEED_BOOST_FACTOR: f32 = 2.0;
    /// Dimension growth after eating an opponent
    pub const GROWTH_PER_MEAL: f32 = 2.0;

    /// Opponent speed range (units per frame, inclusive)
    pub const MIN_SPAWN_SPEED: u32 = 1;
    pub const MAX_SPAWN_SPEED: u32 = 4;
    /// Linear opponent size relative to the player
    pub const OPPONENT_MIN_SCALE: f32 = 0.5;
    pub const OPPONENT_MAX_SCALE: f32 = 1.6;
    pub const OPPONENT_MIN_SIZE: f32 = 10.0;

    /// Spawn schedule
    pub const SPAWN_INTERVAL_MS: u32 = 900;
    /// One spawn in this many becomes a whale (when none is alive)
    pub const WHALE_CHANCE: u32 = 40;
    pub const POWERUP_INTERVAL_MS: u32 = 4000;
}

/// Clamp both components of `v` to `[-n, n]`
#[inline]
pub fn limit(v: Vec2, n: f32) -> Vec2 {
    let n = n.abs();
    Vec2::new(v.x.clamp(-n, n), v.y.clamp(-n, n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_clamps_each_axis() {
        let v = limit(Vec2::new(10.0, -7.5), 4.0);
        assert_eq!(v, Vec2::new(4.0, -4.0));

        let v = limit(Vec2::new(1.0, -2.0), 4.0);
        assert_eq!(v, Vec2::new(1.0, -2.0));
    }
}
