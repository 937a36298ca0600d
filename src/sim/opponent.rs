//! Opponent fish and their motion policies
//!
//! An opponent is one flat record; `Motion` selects how it moves and when it
//! is done:
//! - `Linear`: constant drift across the playfield, destroyed past the far edge
//! - `Whale`: huge, rare, tracks the player for a while and expires on a timer

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Facing, UpdateResult};
use super::indicator::Indicator;
use crate::audio::SoundCue;
use crate::consts::*;
use crate::platform::{Assets, SpriteHandle, load_sprite_or_log};

pub const OPPONENT_SPRITE: &str = "resources/opponent.png";
pub const WHALE_SPRITE: &str = "resources/whale.png";

/// Whale height; width is `WHALE_SIZE * WHALE_ASPECT`
pub const WHALE_SIZE: f32 = 350.0;
pub const WHALE_ASPECT: f32 = 1.15;
pub const WHALE_SPEED: f32 = 1.0;
pub const WHALE_START_X: f32 = 930.0;
/// Whale lifetime (ms)
pub const WHALE_TIME_TO_LIVE_MS: u32 = 25_000;
/// Above this TTL the whale follows the player and its arrow is shown
pub const INDICATOR_REMOVED_AT: u32 = 20_500;
/// Below this TTL the arrow accelerates off screen
pub const INDICATOR_MOVES_AT: u32 = 21_000;
pub const INDICATOR_DEPART_ACCELERATION: f32 = 2.0;

/// Whale-specific state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Whale {
    time_to_live_ms: u32,
    pub indicator: Indicator,
    /// Ambient cue started and not yet stopped
    cue_playing: bool,
}

impl Whale {
    pub fn time_to_live_ms(&self) -> u32 {
        self.time_to_live_ms
    }

    /// Whether the warning arrow should be drawn
    pub fn indicator_visible(&self) -> bool {
        self.time_to_live_ms > INDICATOR_REMOVED_AT
    }

    fn update(&mut self, elapsed_ms: u32, body: &mut Body, player: &Body) {
        self.indicator.update(player);
        body.translate(body.velocity());

        self.time_to_live_ms = self.time_to_live_ms.saturating_sub(elapsed_ms);

        if self.time_to_live_ms > INDICATOR_REMOVED_AT {
            body.set_y(player.position().y - WHALE_SIZE / 2.0);
        }
        if self.time_to_live_ms < INDICATOR_MOVES_AT {
            self.indicator.depart(INDICATOR_DEPART_ACCELERATION);
        }
    }
}

/// Motion policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Motion {
    Linear,
    Whale(Box<Whale>),
}

/// An opponent fish
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Opponent {
    pub id: u32,
    pub body: Body,
    pub facing: Facing,
    #[serde(skip)]
    pub sprite: Option<SpriteHandle>,
    motion: Motion,
    alive: bool,
}

impl Opponent {
    /// Linear opponent with an explicit start state
    pub fn linear(
        id: u32,
        dimensions: Vec2,
        position: Vec2,
        velocity: Vec2,
        acceleration: Vec2,
    ) -> Self {
        Self {
            id,
            body: Body::new(dimensions, position, velocity, acceleration),
            facing: Facing::from_velocity(velocity.x),
            sprite: None,
            motion: Motion::Linear,
            alive: true,
        }
    }

    /// Linear opponent entering from a random side
    pub fn spawn_linear<R: Rng + ?Sized>(
        id: u32,
        rng: &mut R,
        player_size: f32,
        assets: &mut dyn Assets,
    ) -> Self {
        let spawns_left = rng.random_bool(0.5);
        let scale = rng.random_range(OPPONENT_MIN_SCALE..=OPPONENT_MAX_SCALE);
        let size = (player_size * scale).max(OPPONENT_MIN_SIZE);
        let speed = rng.random_range(MIN_SPAWN_SPEED..=MAX_SPAWN_SPEED) as f32;
        let y = rng.random_range(0.0..(PLAYFIELD_HEIGHT - size).max(1.0));

        let (x, vx) = if spawns_left {
            (-size, speed)
        } else {
            (PLAYFIELD_WIDTH, -speed)
        };

        let mut opponent = Self::linear(
            id,
            Vec2::splat(size),
            Vec2::new(x, y),
            Vec2::new(vx, 0.0),
            Vec2::ZERO,
        );
        opponent.sprite = load_sprite_or_log(assets, OPPONENT_SPRITE);
        log::debug!(
            "Spawned opponent {} size {:.1} at {} moving {:+}",
            id,
            size,
            opponent.body.position(),
            vx
        );
        opponent
    }

    /// Whale entering from the right at the player's height
    pub fn whale(id: u32, player: &Body, assets: &mut dyn Assets) -> Self {
        let dimensions = Vec2::new(WHALE_SIZE * WHALE_ASPECT, WHALE_SIZE);
        let position = Vec2::new(WHALE_START_X, player.position().y - WHALE_SIZE / 2.0);
        let velocity = Vec2::new(-WHALE_SPEED, 0.0);

        let whale = Whale {
            time_to_live_ms: WHALE_TIME_TO_LIVE_MS,
            indicator: Indicator::new(player, assets),
            cue_playing: true,
        };
        let sprite = load_sprite_or_log(assets, WHALE_SPRITE);
        assets.play(SoundCue::BigOpponent);
        log::info!("Whale {} incoming at y={:.0}", id, position.y);

        Self {
            id,
            body: Body::new(dimensions, position, velocity, Vec2::ZERO),
            facing: Facing::Left,
            sprite,
            motion: Motion::Whale(Box::new(whale)),
            alive: true,
        }
    }

    /// Whale state, if this opponent is one
    pub fn as_whale(&self) -> Option<&Whale> {
        match &self.motion {
            Motion::Whale(whale) => Some(whale.as_ref()),
            Motion::Linear => None,
        }
    }

    pub fn is_whale(&self) -> bool {
        self.as_whale().is_some()
    }

    pub fn size(&self) -> f32 {
        self.body.size()
    }

    pub fn intersects(&self, other: &Body) -> bool {
        self.body.intersects(other)
    }

    /// Advance one frame
    ///
    /// Linear displacement is per frame and ignores `elapsed_ms`; the whale
    /// timer counts `elapsed_ms` down. Once `Destroyed` is returned, later
    /// calls do nothing and keep returning `Destroyed`.
    pub fn update(&mut self, elapsed_ms: u32, player: &Body) -> UpdateResult {
        if !self.alive {
            return UpdateResult::Destroyed;
        }

        let finished = match &mut self.motion {
            Motion::Linear => {
                self.body.integrate();
                past_far_edge(&self.body)
            }
            Motion::Whale(whale) => {
                whale.update(elapsed_ms, &mut self.body, player);
                whale.time_to_live_ms == 0
            }
        };

        if finished {
            self.alive = false;
            UpdateResult::Destroyed
        } else {
            UpdateResult::Alive
        }
    }

    /// Whether the opponent is done and should be removed
    pub fn is_off_screen(&self) -> bool {
        match &self.motion {
            Motion::Linear => !self.alive,
            Motion::Whale(whale) => whale.time_to_live_ms == 0,
        }
    }

    /// Destroy the opponent, stopping any ambient cue it owns
    ///
    /// Returns false if it was already destroyed. Safe to call repeatedly.
    pub fn destroy(&mut self, assets: &mut dyn Assets) -> bool {
        let was_alive = self.alive;
        self.alive = false;
        if let Motion::Whale(whale) = &mut self.motion {
            whale.time_to_live_ms = 0;
            if whale.cue_playing {
                assets.stop(SoundCue::BigOpponent);
                whale.cue_playing = false;
            }
        }
        was_alive
    }
}

fn past_far_edge(body: &Body) -> bool {
    let x = body.position().x;
    let size = body.size();
    if body.velocity().x >= 0.0 {
        x > PLAYFIELD_WIDTH + size
    } else {
        x < -size
    }
}
