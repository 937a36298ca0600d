//! Game state and core simulation types

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::handler::OpponentHandler;
use super::player::Player;
use super::powerup::{Powerup, PowerupKind};
use crate::platform::Assets;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Player was eaten
    GameOver,
}

/// Something gameplay-relevant that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A whale spawned and its warning arrow is up
    WhaleIncoming { id: u32 },
    /// Player ate a smaller opponent
    OpponentEaten { id: u32, size: f32 },
    /// Player touched a power-up
    PowerupCollected { id: u32, kind: PowerupKind },
    /// Player touched an opponent at least its own size
    PlayerEaten { by: u32 },
}

/// Monotonic entity id source shared by every entity kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdAllocator {
    next: u32,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdAllocator {
    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub player: Player,
    pub opponents: OpponentHandler,
    /// Active power-ups (sorted by id)
    pub powerups: Vec<Powerup>,
    pub ids: IdAllocator,
    /// Time accumulated toward the next power-up (ms)
    pub powerup_timer_ms: u32,
    /// Opponents eaten
    pub score: u32,
    /// Frames simulated while playing
    pub frame: u64,
    /// Game time simulated while playing (ms)
    pub elapsed_ms: u64,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, assets: &mut dyn Assets) -> Self {
        log::info!("New run with seed {}", seed);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            player: Player::new(assets),
            opponents: OpponentHandler::new(),
            powerups: Vec::new(),
            ids: IdAllocator::default(),
            powerup_timer_ms: 0,
            score: 0,
            frame: 0,
            elapsed_ms: 0,
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

/// Serializable view of a run, for logs and tooling
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub seed: u64,
    pub phase: GamePhase,
    pub frame: u64,
    pub elapsed_ms: u64,
    pub score: u32,
    pub player: &'a Player,
    pub opponents: Vec<&'a super::opponent::Opponent>,
    pub powerups: &'a [Powerup],
}

impl<'a> From<&'a GameState> for Snapshot<'a> {
    fn from(state: &'a GameState) -> Self {
        Self {
            seed: state.seed,
            phase: state.phase,
            frame: state.frame,
            elapsed_ms: state.elapsed_ms,
            score: state.score,
            player: &state.player,
            opponents: state.opponents.iter().collect(),
            powerups: &state.powerups,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Headless;

    #[test]
    fn test_ids_are_unique_and_ordered() {
        let mut ids = IdAllocator::default();
        assert_eq!(ids.next_id(), 1);
        assert_eq!(ids.next_id(), 2);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut assets = Headless::new();
        let state = GameState::new(5, &mut assets);
        let json = serde_json::to_string(&Snapshot::from(&state)).unwrap();
        assert!(json.contains("\"seed\":5"));
        assert!(json.contains("\"phase\":\"Playing\""));
    }
}
