//! Per-frame simulation tick
//!
//! One call advances every live entity, then resolves player collisions.
//! Rendering happens afterwards, from the updated state.

use glam::Vec2;

use super::powerup::{Powerup, PowerupKind};
use super::state::{GameEvent, GamePhase, GameState};
use crate::audio::SoundCue;
use crate::consts::*;
use crate::platform::Assets;

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Steering direction, each axis in [-1, 1]
    pub steer: Vec2,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the game by one frame of `elapsed_ms`
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    elapsed_ms: u32,
    assets: &mut dyn Assets,
) -> Vec<GameEvent> {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return Vec::new();
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            GamePhase::GameOver => {}
        }
    }

    if state.phase != GamePhase::Playing {
        return Vec::new();
    }

    let mut events = Vec::new();
    state.frame += 1;
    state.elapsed_ms += u64::from(elapsed_ms);

    state.player.update(input.steer, elapsed_ms);

    // --- OPPONENTS ---
    let spawned = state.opponents.spawn_due(
        elapsed_ms,
        &mut state.rng,
        &state.player.body,
        assets,
        &mut state.ids,
    );
    for id in spawned {
        if state.opponents.get(id).is_some_and(|o| o.is_whale()) {
            events.push(GameEvent::WhaleIncoming { id });
        }
    }
    state.opponents.update(elapsed_ms, &state.player.body, assets);

    // --- POWER-UPS ---
    state.powerup_timer_ms = state.powerup_timer_ms.saturating_add(elapsed_ms);
    while state.powerup_timer_ms >= POWERUP_INTERVAL_MS {
        state.powerup_timer_ms -= POWERUP_INTERVAL_MS;
        let kind = PowerupKind::pick(&mut state.rng);
        let id = state.ids.next_id();
        state
            .powerups
            .push(Powerup::spawn(id, kind, &mut state.rng, assets));
    }
    state.powerups.retain_mut(|p| !p.update().is_destroyed());

    // --- COLLISIONS ---
    let player_body = &state.player.body;
    let (collected, remaining): (Vec<_>, Vec<_>) = state
        .powerups
        .drain(..)
        .partition(|p| p.intersects(player_body));
    state.powerups = remaining;
    for powerup in collected {
        powerup.apply_effect(&mut state.player.status);
        assets.play(SoundCue::Powerup);
        log::debug!("Collected {} {}", powerup.kind.as_str(), powerup.id);
        events.push(GameEvent::PowerupCollected {
            id: powerup.id,
            kind: powerup.kind,
        });
    }

    let touching: Vec<(u32, f32)> = state
        .opponents
        .iter()
        .filter(|o| o.intersects(&state.player.body))
        .map(|o| (o.id, o.size()))
        .collect();
    for (id, size) in touching {
        if state.player.size() > size {
            state.opponents.destroy(id, assets);
            state.player.grow(GROWTH_PER_MEAL);
            state.score += 1;
            assets.play(SoundCue::Bite);
            events.push(GameEvent::OpponentEaten { id, size });
        } else {
            log::info!(
                "Player eaten by {} after {} frames, score {}",
                id,
                state.frame,
                state.score
            );
            state.phase = GamePhase::GameOver;
            // Stops any whale cue
            state.opponents.clear(assets);
            assets.play(SoundCue::GameOver);
            events.push(GameEvent::PlayerEaten { by: id });
            break;
        }
    }

    for event in &events {
        if let GameEvent::WhaleIncoming { id } = event {
            log::info!("Whale {} incoming at frame {}", id, state.frame);
        }
    }

    events
}
