//! Warning arrow announcing an incoming whale
//!
//! The arrow follows the player's height with a fixed lag: every frame the
//! player's Y goes into a delay line and the arrow takes whatever falls out.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::delay_line::DelayLine;
use super::entity::Body;
use crate::platform::{Assets, SpriteHandle, load_sprite_or_log};

/// Frames the arrow trails the player by
pub const LAG_BY_FRAMES: usize = 15;
pub const INDICATOR_START_X: f32 = 580.0;
pub const INDICATOR_SIZE: Vec2 = Vec2::new(115.0, 100.0);
pub const INDICATOR_SPRITE: &str = "resources/whale.png";

/// A whale's lagging warning arrow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Indicator {
    pub body: Body,
    history: DelayLine<f32>,
    #[serde(skip)]
    pub sprite: Option<SpriteHandle>,
}

impl Indicator {
    /// Create an arrow level with the tracked body
    pub fn new(tracked: &Body, assets: &mut dyn Assets) -> Self {
        let position = Vec2::new(INDICATOR_START_X, target_y(tracked));
        Self {
            body: Body::at(INDICATOR_SIZE, position),
            history: DelayLine::new(LAG_BY_FRAMES),
            sprite: load_sprite_or_log(assets, INDICATOR_SPRITE),
        }
    }

    /// Record the tracked body's height and move the arrow
    pub fn update(&mut self, tracked: &Body) {
        if let Some(y) = self.history.push(target_y(tracked)) {
            self.body.set_y(y);
        }
        let velocity = self.body.velocity() + self.body.acceleration();
        self.body.set_velocity(velocity);
        self.body.translate(Vec2::new(velocity.x, 0.0));
    }

    /// Start sliding the arrow off screen
    pub fn depart(&mut self, acceleration_x: f32) {
        let acceleration = self.body.acceleration();
        self.body
            .set_acceleration(Vec2::new(acceleration_x, acceleration.y));
    }

    /// Samples waiting in the delay line
    pub fn pending_samples(&self) -> usize {
        self.history.len()
    }
}

fn target_y(tracked: &Body) -> f32 {
    tracked.position().y - INDICATOR_SIZE.y / 2.0
}
