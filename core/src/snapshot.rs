use serde::{Deserialize, Serialize};

use crate::*;

/// Everything a renderer needs after a processed input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// `rows[y][x]`, zero for empty cells.
    pub rows: Rows,
    pub score: u64,
    pub state: EngineState,
    pub move_count: u32,
}

impl Snapshot {
    pub fn from_engine<S: TileSpawner>(engine: &PlayEngine<S>) -> Self {
        Self {
            rows: engine.board().to_rows(),
            score: engine.score(),
            state: engine.state(),
            move_count: engine.move_count(),
        }
    }

    pub fn to_board(&self) -> Result<Board> {
        Board::from_rows(self.rows)
    }
}
