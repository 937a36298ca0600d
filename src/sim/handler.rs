//! Ownership of the live opponent set
//!
//! The handler is the only thing that adds or removes opponents. Opponents
//! report `UpdateResult::Destroyed` instead of removing themselves; the
//! handler drops them at the end of the same update.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Body, UpdateResult};
use super::opponent::Opponent;
use super::state::IdAllocator;
use crate::consts::{SPAWN_INTERVAL_MS, WHALE_CHANCE};
use crate::platform::Assets;

/// Live opponents, sorted by id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpponentHandler {
    opponents: Vec<Opponent>,
    /// Time accumulated toward the next spawn (ms)
    spawn_timer_ms: u32,
}

impl OpponentHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a new opponent
    pub fn spawn(&mut self, opponent: Opponent) {
        self.opponents.push(opponent);
        self.opponents.sort_by_key(|o| o.id);
    }

    /// Spawn on schedule: one opponent per `SPAWN_INTERVAL_MS`, occasionally
    /// a whale when none is alive
    ///
    /// Returns the ids spawned.
    pub fn spawn_due<R: Rng + ?Sized>(
        &mut self,
        elapsed_ms: u32,
        rng: &mut R,
        player: &Body,
        assets: &mut dyn Assets,
        ids: &mut IdAllocator,
    ) -> Vec<u32> {
        let mut spawned = Vec::new();
        self.spawn_timer_ms = self.spawn_timer_ms.saturating_add(elapsed_ms);
        while self.spawn_timer_ms >= SPAWN_INTERVAL_MS {
            self.spawn_timer_ms -= SPAWN_INTERVAL_MS;
            let id = ids.next_id();
            let opponent = if !self.has_whale() && rng.random_range(0..WHALE_CHANCE) == 0 {
                Opponent::whale(id, player, assets)
            } else {
                Opponent::spawn_linear(id, rng, player.size(), assets)
            };
            self.spawn(opponent);
            spawned.push(id);
        }
        spawned
    }

    /// Advance every opponent one frame and drop the ones that finished
    ///
    /// Returns the ids removed this frame.
    pub fn update(&mut self, elapsed_ms: u32, player: &Body, assets: &mut dyn Assets) -> Vec<u32> {
        let mut removed = Vec::new();
        for opponent in &mut self.opponents {
            if opponent.update(elapsed_ms, player) == UpdateResult::Destroyed {
                // Releases whale audio on natural expiry
                opponent.destroy(assets);
                removed.push(opponent.id);
            }
        }
        self.retain_live();
        for id in &removed {
            log::debug!("Removed opponent {}", id);
        }
        removed
    }

    /// Destroy and remove an opponent now
    ///
    /// Returns false if no live opponent has this id; calling twice is harmless.
    pub fn destroy(&mut self, id: u32, assets: &mut dyn Assets) -> bool {
        let destroyed = self
            .opponents
            .iter_mut()
            .find(|o| o.id == id)
            .is_some_and(|o| o.destroy(assets));
        self.retain_live();
        destroyed
    }

    /// Destroy everything (end of run)
    pub fn clear(&mut self, assets: &mut dyn Assets) {
        for opponent in &mut self.opponents {
            opponent.destroy(assets);
        }
        self.opponents.clear();
        self.spawn_timer_ms = 0;
    }

    pub fn get(&self, id: u32) -> Option<&Opponent> {
        self.opponents.iter().find(|o| o.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Opponent> {
        self.opponents.iter()
    }

    pub fn len(&self) -> usize {
        self.opponents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.opponents.is_empty()
    }

    pub fn has_whale(&self) -> bool {
        self.opponents.iter().any(|o| o.is_whale())
    }

    fn retain_live(&mut self) {
        self.opponents.retain(|o| !o.is_off_screen());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioEvent, SoundCue};
    use crate::consts::PLAYFIELD_WIDTH;
    use crate::platform::Headless;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn player() -> Body {
        Body::at(Vec2::splat(32.0), Vec2::new(300.0, 200.0))
    }

    fn linear(id: u32, x: f32, vx: f32) -> Opponent {
        Opponent::linear(id, Vec2::splat(10.0), Vec2::new(x, 50.0), Vec2::new(vx, 0.0), Vec2::ZERO)
    }

    #[test]
    fn test_update_removes_finished_opponents() {
        let mut assets = Headless::new();
        let mut handler = OpponentHandler::new();
        handler.spawn(linear(2, PLAYFIELD_WIDTH + 10.0, 1.0));
        handler.spawn(linear(1, 100.0, 1.0));

        let removed = handler.update(16, &player(), &mut assets);
        assert_eq!(removed, vec![2]);
        assert_eq!(handler.len(), 1);
        assert!(handler.get(1).is_some());
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let mut assets = Headless::new();
        let mut handler = OpponentHandler::new();
        handler.spawn(linear(1, 100.0, 1.0));

        assert!(handler.destroy(1, &mut assets));
        assert!(!handler.destroy(1, &mut assets));
        assert!(!handler.destroy(99, &mut assets));
        assert!(handler.is_empty());
    }

    #[test]
    fn test_expired_whale_stops_its_cue() {
        let mut assets = Headless::new();
        let mut handler = OpponentHandler::new();
        handler.spawn(Opponent::whale(1, &player(), &mut assets));
        assert!(handler.has_whale());

        let removed = handler.update(30_000, &player(), &mut assets);
        assert_eq!(removed, vec![1]);
        assert!(!handler.has_whale());
        assert_eq!(assets.count(AudioEvent::Stop(SoundCue::BigOpponent)), 1);
    }

    #[test]
    fn test_spawn_schedule() {
        let mut assets = Headless::new();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut handler = OpponentHandler::new();
        let mut ids = IdAllocator::default();

        handler.spawn_due(SPAWN_INTERVAL_MS - 1, &mut rng, &player(), &mut assets, &mut ids);
        assert!(handler.is_empty());

        let spawned = handler.spawn_due(1, &mut rng, &player(), &mut assets, &mut ids);
        assert_eq!(spawned, vec![1]);
        assert_eq!(handler.len(), 1);

        handler.spawn_due(SPAWN_INTERVAL_MS * 3, &mut rng, &player(), &mut assets, &mut ids);
        assert_eq!(handler.len(), 4);

        let ids: Vec<u32> = handler.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_at_most_one_whale() {
        let mut assets = Headless::new();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut handler = OpponentHandler::new();
        let mut ids = IdAllocator::default();
        handler.spawn_due(SPAWN_INTERVAL_MS * 400, &mut rng, &player(), &mut assets, &mut ids);
        assert!(handler.iter().filter(|o| o.is_whale()).count() <= 1);
    }
}
