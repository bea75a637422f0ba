#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use gesture::*;
pub use snapshot::*;
pub use tile::*;
pub use types::*;

mod board;
mod engine;
mod error;
mod generator;
mod gesture;
mod snapshot;
mod tile;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Start over right away once no move is left, instead of waiting for an explicit reset.
    pub auto_restart: bool,
    pub gesture: GestureThresholds,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            auto_restart: true,
            gesture: GestureThresholds::default(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpawnOutcome {
    Spawned { coords: Coord2, tile: Tile },
    BoardFull,
}

impl SpawnOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Spawned { .. } => true,
            Self::BoardFull => false,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// Gesture did not qualify as a swipe.
    Ignored,
    NoChange,
    Moved,
    /// The move left no legal follow-up, `final_score` is the score of the finished board.
    GameOver { final_score: u64 },
}

impl MoveOutcome {
    pub const fn has_update(self) -> bool {
        use MoveOutcome::*;
        match self {
            Ignored => false,
            NoChange => false,
            Moved => true,
            GameOver { .. } => true,
        }
    }
}
