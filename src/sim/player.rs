//! The player's fish

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Facing};
use crate::consts::*;
use crate::limit;
use crate::platform::{Assets, SpriteHandle, load_sprite_or_log};

pub const PLAYER_SPRITE: &str = "resources/player.png";

/// Timed status effects on the player (ms remaining)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffects {
    poisoned_ms: u32,
    speed_boost_ms: u32,
}

impl StatusEffects {
    /// Poison for `duration_ms`, replacing any remaining poison time
    pub fn poison(&mut self, duration_ms: u32) {
        self.poisoned_ms = duration_ms;
    }

    /// Boost speed for `duration_ms`, replacing any remaining boost time
    pub fn speed_up(&mut self, duration_ms: u32) {
        self.speed_boost_ms = duration_ms;
    }

    pub fn poisoned_ms(&self) -> u32 {
        self.poisoned_ms
    }

    pub fn speed_boost_ms(&self) -> u32 {
        self.speed_boost_ms
    }

    pub fn is_poisoned(&self) -> bool {
        self.poisoned_ms > 0
    }

    pub fn is_speed_boosted(&self) -> bool {
        self.speed_boost_ms > 0
    }

    /// Count timers down
    pub fn tick(&mut self, elapsed_ms: u32) {
        self.poisoned_ms = self.poisoned_ms.saturating_sub(elapsed_ms);
        self.speed_boost_ms = self.speed_boost_ms.saturating_sub(elapsed_ms);
    }
}

/// The player entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub status: StatusEffects,
    pub facing: Facing,
    #[serde(skip)]
    pub sprite: Option<SpriteHandle>,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            body: Body::at(
                Vec2::splat(PLAYER_START_SIZE),
                Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            ),
            status: StatusEffects::default(),
            facing: Facing::Left,
            sprite: None,
        }
    }
}

impl Player {
    pub fn new(assets: &mut dyn Assets) -> Self {
        Self {
            sprite: load_sprite_or_log(assets, PLAYER_SPRITE),
            ..Self::default()
        }
    }

    pub fn size(&self) -> f32 {
        self.body.size()
    }

    /// Current per-axis speed cap
    pub fn max_speed(&self) -> f32 {
        if self.status.is_speed_boosted() {
            PLAYER_MAX_SPEED * SPEED_BOOST_FACTOR
        } else {
            PLAYER_MAX_SPEED
        }
    }

    /// Steer toward `direction` (each axis in [-1, 1]) and move one frame
    pub fn update(&mut self, direction: Vec2, elapsed_ms: u32) {
        self.status.tick(elapsed_ms);

        let direction = limit(direction, 1.0);
        let mut velocity = self.body.velocity();
        if direction == Vec2::ZERO {
            velocity *= PLAYER_DRAG;
        } else {
            velocity += direction * PLAYER_ACCELERATION;
        }
        velocity = limit(velocity, self.max_speed());
        self.body.set_velocity(velocity);

        let size = self.body.dimensions();
        let max = Vec2::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT) - size;
        let position = (self.body.position() + velocity).clamp(Vec2::ZERO, max.max(Vec2::ZERO));
        self.body.set_position(position);

        if velocity.x > 0.0 {
            self.facing = Facing::Right;
        } else if velocity.x < 0.0 {
            self.facing = Facing::Left;
        }
    }

    /// Grow after a meal, keeping the sprite centred
    pub fn grow(&mut self, amount: f32) {
        let center = self.body.center();
        let dimensions = self.body.dimensions() + Vec2::splat(amount);
        self.body.set_dimensions(dimensions);
        self.body.set_position(center - dimensions / 2.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_is_capped() {
        let mut player = Player::default();
        for _ in 0..100 {
            player.update(Vec2::new(1.0, 0.0), 16);
        }
        assert_eq!(player.body.velocity().x, PLAYER_MAX_SPEED);
        assert_eq!(player.facing, Facing::Right);
    }

    #[test]
    fn test_speed_boost_raises_cap_until_expiry() {
        let mut player = Player::default();
        player.status.speed_up(100);
        player.body.set_position(Vec2::new(0.0, 100.0));
        for _ in 0..30 {
            player.update(Vec2::new(1.0, 0.0), 1);
        }
        assert!(player.body.velocity().x > PLAYER_MAX_SPEED);

        player.update(Vec2::new(1.0, 0.0), 1000);
        assert!(!player.status.is_speed_boosted());
        assert_eq!(player.body.velocity().x, PLAYER_MAX_SPEED);
    }

    #[test]
    fn test_stays_inside_playfield() {
        let mut player = Player::default();
        for _ in 0..500 {
            player.update(Vec2::new(-1.0, -1.0), 16);
        }
        assert_eq!(player.body.position(), Vec2::ZERO);
    }

    #[test]
    fn test_grow_keeps_center() {
        let mut player = Player::default();
        let center = player.body.center();
        player.grow(4.0);
        assert_eq!(player.body.dimensions(), Vec2::splat(PLAYER_START_SIZE + 4.0));
        assert_eq!(player.body.center(), center);
    }

    #[test]
    fn test_status_timers_floor_at_zero() {
        let mut status = StatusEffects::default();
        status.poison(500);
        status.tick(300);
        assert_eq!(status.poisoned_ms(), 200);
        status.tick(300);
        assert_eq!(status.poisoned_ms(), 0);
        assert!(!status.is_poisoned());
    }
}
