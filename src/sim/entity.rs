//! Shared geometry and motion state for every game object
//!
//! A `Body` owns the vectors an entity moves with and the bounding ellipse
//! derived from them. The vectors are private: every mutation goes through a
//! method that recomputes the ellipse before returning, so a collision test
//! can never see stale bounds.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ellipse::Ellipse;
use crate::consts::MIN_DIMENSION;

/// Result of advancing an entity by one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateResult {
    /// Entity is still live
    Alive,
    /// Entity left the playfield or expired; the owner should remove it
    Destroyed,
}

impl UpdateResult {
    pub fn is_destroyed(self) -> bool {
        self == UpdateResult::Destroyed
    }
}

/// Which way a sprite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Left,
    Right,
}

impl Facing {
    /// Facing that matches a horizontal velocity
    pub fn from_velocity(vx: f32) -> Self {
        if vx > 0.0 { Facing::Right } else { Facing::Left }
    }
}

/// Position, motion and collision shape of an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    position: Vec2,
    velocity: Vec2,
    acceleration: Vec2,
    dimensions: Vec2,
    bounds: Ellipse,
}

impl Body {
    pub fn new(dimensions: Vec2, position: Vec2, velocity: Vec2, acceleration: Vec2) -> Self {
        let dimensions = sanitize_dimensions(dimensions);
        Self {
            position,
            velocity,
            acceleration,
            dimensions,
            bounds: Ellipse::inscribed(position, dimensions),
        }
    }

    /// A body at rest
    pub fn at(dimensions: Vec2, position: Vec2) -> Self {
        Self::new(dimensions, position, Vec2::ZERO, Vec2::ZERO)
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    #[inline]
    pub fn acceleration(&self) -> Vec2 {
        self.acceleration
    }

    #[inline]
    pub fn dimensions(&self) -> Vec2 {
        self.dimensions
    }

    /// Current bounding ellipse
    #[inline]
    pub fn bounds(&self) -> &Ellipse {
        &self.bounds
    }

    /// Center of the sprite rectangle
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.bounds.center
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.update_bounds();
    }

    pub fn set_x(&mut self, x: f32) {
        self.set_position(Vec2::new(x, self.position.y));
    }

    pub fn set_y(&mut self, y: f32) {
        self.set_position(Vec2::new(self.position.x, y));
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.set_position(self.position + delta);
    }

    pub fn set_dimensions(&mut self, dimensions: Vec2) {
        self.dimensions = sanitize_dimensions(dimensions);
        self.update_bounds();
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub fn set_acceleration(&mut self, acceleration: Vec2) {
        self.acceleration = acceleration;
    }

    /// Apply acceleration to velocity, then velocity to position
    pub fn integrate(&mut self) {
        self.velocity += self.acceleration;
        self.translate(self.velocity);
    }

    /// Average of width and height
    pub fn size(&self) -> f32 {
        (self.dimensions.x + self.dimensions.y) / 2.0
    }

    /// Check whether the bounding ellipses of two bodies overlap
    pub fn intersects(&self, other: &Body) -> bool {
        self.bounds.intersects(&other.bounds)
    }

    fn update_bounds(&mut self) {
        self.bounds = Ellipse::inscribed(self.position, self.dimensions);
    }
}

fn sanitize_dimensions(dimensions: Vec2) -> Vec2 {
    let clamped = dimensions.max(Vec2::splat(MIN_DIMENSION));
    if clamped != dimensions {
        log::debug!("Clamped degenerate dimensions {} to {}", dimensions, clamped);
    }
    clamped
}
