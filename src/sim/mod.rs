//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Frame-count motion, millisecond timers
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - Sprites and sound reached only through `platform::Assets`

pub mod delay_line;
pub mod ellipse;
pub mod entity;
pub mod handler;
pub mod indicator;
pub mod opponent;
pub mod player;
pub mod powerup;
pub mod state;
pub mod tick;

pub use delay_line::DelayLine;
pub use ellipse::Ellipse;
pub use entity::{Body, Facing, UpdateResult};
pub use handler::OpponentHandler;
pub use indicator::{Indicator, LAG_BY_FRAMES};
pub use opponent::{Motion, Opponent, Whale, INDICATOR_MOVES_AT, INDICATOR_REMOVED_AT, WHALE_TIME_TO_LIVE_MS};
pub use player::{Player, StatusEffects};
pub use powerup::{Powerup, PowerupKind};
pub use state::{GameEvent, GamePhase, GameState, IdAllocator, Snapshot};
pub use tick::{TickInput, tick};
