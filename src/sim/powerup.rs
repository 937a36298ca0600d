//! Power-ups drifting across the playfield
//!
//! Power-ups spawn well outside a random edge, drift across, and apply a timed
//! status effect to the player on contact.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Facing, UpdateResult};
use super::player::StatusEffects;
use crate::consts::*;
use crate::platform::{Assets, SpriteHandle, load_sprite_or_log};

/// Spawn offset past the edge, in multiples of the power-up width
pub const SPAWN_OFFSET_FACTOR: f32 = 5.0;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    /// Blinds the player for a while
    Poison,
    /// Raises the player's top speed for a while
    Speedup,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 2] = [PowerupKind::Poison, PowerupKind::Speedup];

    /// Relative spawn weight
    pub fn chance(&self) -> u32 {
        match self {
            PowerupKind::Poison => 30,
            PowerupKind::Speedup => 100,
        }
    }

    /// Effect duration (ms)
    pub fn duration_ms(&self) -> u32 {
        match self {
            PowerupKind::Poison => 10_000,
            PowerupKind::Speedup => 5_000,
        }
    }

    pub fn dimensions(&self) -> Vec2 {
        match self {
            PowerupKind::Poison => Vec2::splat(32.0),
            PowerupKind::Speedup => Vec2::splat(16.0),
        }
    }

    pub fn sprite_path(&self) -> &'static str {
        match self {
            PowerupKind::Poison => "resources/poison.png",
            PowerupKind::Speedup => "resources/Speedup-fish.png",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerupKind::Poison => "Poison",
            PowerupKind::Speedup => "Speedup",
        }
    }

    /// Pick a kind with probability proportional to its chance
    pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> PowerupKind {
        let total: u32 = Self::ALL.iter().map(|k| k.chance()).sum();
        let mut roll = rng.random_range(0..total);
        for kind in Self::ALL {
            if roll < kind.chance() {
                return kind;
            }
            roll -= kind.chance();
        }
        PowerupKind::Speedup
    }

    /// Apply this kind's status to the player, replacing any running timer
    pub fn apply_effect(&self, status: &mut StatusEffects) {
        match self {
            PowerupKind::Poison => status.poison(self.duration_ms()),
            PowerupKind::Speedup => status.speed_up(self.duration_ms()),
        }
    }
}

/// A power-up entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Powerup {
    pub id: u32,
    pub kind: PowerupKind,
    pub body: Body,
    pub facing: Facing,
    #[serde(skip)]
    pub sprite: Option<SpriteHandle>,
}

impl Powerup {
    pub fn new(id: u32, kind: PowerupKind, position: Vec2, velocity: Vec2) -> Self {
        Self {
            id,
            kind,
            body: Body::new(kind.dimensions(), position, velocity, Vec2::ZERO),
            facing: Facing::from_velocity(velocity.x),
            sprite: None,
        }
    }

    /// Spawn outside a random edge, drifting inward
    pub fn spawn<R: Rng + ?Sized>(
        id: u32,
        kind: PowerupKind,
        rng: &mut R,
        assets: &mut dyn Assets,
    ) -> Self {
        let spawns_left = rng.random_bool(0.5);
        let velocity = random_velocity(rng, spawns_left);
        let position = random_position(rng, spawns_left, kind.dimensions());

        let mut powerup = Self::new(id, kind, position, velocity);
        powerup.sprite = load_sprite_or_log(assets, kind.sprite_path());
        log::debug!("Spawned {} {} at {}", kind.as_str(), id, position);
        powerup
    }

    pub fn chance(&self) -> u32 {
        self.kind.chance()
    }

    pub fn intersects(&self, other: &Body) -> bool {
        self.body.intersects(other)
    }

    pub fn apply_effect(&self, status: &mut StatusEffects) {
        self.kind.apply_effect(status);
    }

    /// Drift one frame; `Destroyed` once past the opposite spawn offset
    pub fn update(&mut self) -> UpdateResult {
        self.body.integrate();
        if self.is_off_screen() {
            UpdateResult::Destroyed
        } else {
            UpdateResult::Alive
        }
    }

    pub fn is_off_screen(&self) -> bool {
        let offset = margin(self.body.dimensions()) * SPAWN_OFFSET_FACTOR;
        let x = self.body.position().x;
        if self.body.velocity().x >= 0.0 {
            x > PLAYFIELD_WIDTH + offset
        } else {
            x < -offset
        }
    }
}

fn margin(dimensions: Vec2) -> f32 {
    dimensions.x.round()
}

fn random_position<R: Rng + ?Sized>(rng: &mut R, spawns_left: bool, dimensions: Vec2) -> Vec2 {
    let min = margin(dimensions) as i32;
    let max = PLAYFIELD_HEIGHT as i32 - min;
    let span = (max - min).abs().max(1);
    let y = rng.random_range(0..span) + min;
    let offset = min as f32 * SPAWN_OFFSET_FACTOR;
    let x = if spawns_left {
        -offset
    } else {
        PLAYFIELD_WIDTH + offset
    };
    Vec2::new(x, y as f32)
}

fn random_velocity<R: Rng + ?Sized>(rng: &mut R, spawns_left: bool) -> Vec2 {
    let speed = rng.random_range(MIN_SPAWN_SPEED..=MAX_SPAWN_SPEED) as f32;
    Vec2::new(if spawns_left { speed } else { -speed }, 0.0)
}
