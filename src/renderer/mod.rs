//! Rendering seam
//!
//! The host's 2D framework implements `Canvas`. `render` walks the state after
//! the frame's logic pass and issues draw calls. `CommandBuffer` records them
//! for headless runs and tests.

use glam::Vec2;
use serde::Serialize;

use crate::platform::SpriteHandle;
use crate::sim::{Body, Ellipse, Facing, GameState};

/// Opacity of the poison overlay
pub const POISON_OVERLAY_OPACITY: f32 = 0.6;

/// Drawing surface supplied by the host
pub trait Canvas {
    /// Draw a sprite scaled to `dimensions`, flipped horizontally when facing right
    fn draw_sprite(&mut self, sprite: SpriteHandle, position: Vec2, dimensions: Vec2, facing: Facing);

    /// Outline a bounding ellipse (debug view)
    fn draw_ellipse(&mut self, ellipse: &Ellipse);

    /// Darken the whole playfield
    fn draw_overlay(&mut self, _opacity: f32) {}
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    Sprite {
        sprite: SpriteHandle,
        position: Vec2,
        dimensions: Vec2,
        facing: Facing,
    },
    Ellipse(Ellipse),
    Overlay(f32),
}

/// Canvas that records draw calls in order
#[derive(Debug, Clone, Default)]
pub struct CommandBuffer {
    pub commands: Vec<DrawCommand>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn sprite_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Sprite { .. }))
            .count()
    }
}

impl Canvas for CommandBuffer {
    fn draw_sprite(&mut self, sprite: SpriteHandle, position: Vec2, dimensions: Vec2, facing: Facing) {
        self.commands.push(DrawCommand::Sprite {
            sprite,
            position,
            dimensions,
            facing,
        });
    }

    fn draw_ellipse(&mut self, ellipse: &Ellipse) {
        self.commands.push(DrawCommand::Ellipse(*ellipse));
    }

    fn draw_overlay(&mut self, opacity: f32) {
        self.commands.push(DrawCommand::Overlay(opacity));
    }
}

/// Draw one entity; entities whose sprite failed to load draw nothing but
/// their debug bounds
fn draw_entity(
    canvas: &mut dyn Canvas,
    sprite: Option<SpriteHandle>,
    body: &Body,
    facing: Facing,
    debug_bounds: bool,
) {
    if let Some(sprite) = sprite {
        canvas.draw_sprite(sprite, body.position(), body.dimensions(), facing);
    }
    if debug_bounds {
        canvas.draw_ellipse(body.bounds());
    }
}

/// Draw the current frame
pub fn render(state: &GameState, canvas: &mut dyn Canvas, debug_bounds: bool) {
    for powerup in &state.powerups {
        draw_entity(canvas, powerup.sprite, &powerup.body, powerup.facing, debug_bounds);
    }

    for opponent in state.opponents.iter() {
        if opponent.is_off_screen() {
            continue;
        }
        draw_entity(canvas, opponent.sprite, &opponent.body, opponent.facing, debug_bounds);
        if let Some(whale) = opponent.as_whale() {
            if whale.indicator_visible() {
                let indicator = &whale.indicator;
                draw_entity(canvas, indicator.sprite, &indicator.body, Facing::Left, debug_bounds);
            }
        }
    }

    let player = &state.player;
    draw_entity(canvas, player.sprite, &player.body, player.facing, debug_bounds);

    if player.status.is_poisoned() {
        canvas.draw_overlay(POISON_OVERLAY_OPACITY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Headless;
    use crate::sim::{Opponent, PowerupKind, Powerup};

    const SPRITES: &[&str] = &[
        "resources/player.png",
        "resources/opponent.png",
        "resources/whale.png",
        "resources/poison.png",
    ];

    #[test]
    fn test_render_draws_every_loaded_entity() {
        let mut assets = Headless::with_sprites(SPRITES);
        let mut state = GameState::new(1, &mut assets);
        let id = state.ids.next_id();
        state
            .opponents
            .spawn(Opponent::spawn_linear(id, &mut state.rng, 32.0, &mut assets));
        let id = state.ids.next_id();
        state
            .powerups
            .push(Powerup::spawn(id, PowerupKind::Poison, &mut state.rng, &mut assets));

        let mut canvas = CommandBuffer::new();
        render(&state, &mut canvas, false);
        assert_eq!(canvas.sprite_count(), 3);
        assert!(matches!(canvas.commands.last(), Some(DrawCommand::Sprite { .. })));
    }

    #[test]
    fn test_missing_sprite_still_renders_bounds() {
        // Speedup sprite is not registered
        let mut assets = Headless::with_sprites(SPRITES);
        let mut state = GameState::new(1, &mut assets);
        let id = state.ids.next_id();
        state
            .powerups
            .push(Powerup::spawn(id, PowerupKind::Speedup, &mut state.rng, &mut assets));
        assert!(state.powerups[0].sprite.is_none());

        let mut canvas = CommandBuffer::new();
        render(&state, &mut canvas, true);
        // Player sprite plus two ellipses
        assert_eq!(canvas.sprite_count(), 1);
        assert_eq!(canvas.commands.len(), 3);
    }

    #[test]
    fn test_whale_indicator_drawn_while_warning() {
        let mut assets = Headless::with_sprites(SPRITES);
        let mut state = GameState::new(1, &mut assets);
        let id = state.ids.next_id();
        let whale = Opponent::whale(id, &state.player.body, &mut assets);
        state.opponents.spawn(whale);

        let mut canvas = CommandBuffer::new();
        render(&state, &mut canvas, false);
        // Whale, arrow, player
        assert_eq!(canvas.sprite_count(), 3);

        state.opponents.update(5000, &state.player.body, &mut assets);
        canvas.clear();
        render(&state, &mut canvas, false);
        assert_eq!(canvas.sprite_count(), 2);
    }

    #[test]
    fn test_poison_overlay() {
        let mut assets = Headless::new();
        let mut state = GameState::new(1, &mut assets);
        state.player.status.poison(10_000);

        let mut canvas = CommandBuffer::new();
        render(&state, &mut canvas, false);
        assert_eq!(
            canvas.commands,
            vec![DrawCommand::Overlay(POISON_OVERLAY_OPACITY)]
        );
    }
}
