use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Value held by a single board cell, zero meaning the cell is empty.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Tile(u32);

impl Tile {
    pub const EMPTY: Tile = Tile(0);
    pub const TWO: Tile = Tile(2);
    pub const FOUR: Tile = Tile(4);
    /// Largest value a tile can hold, two of these never merge.
    pub const MAX: Tile = Tile(1 << 31);

    /// Accepts zero or a positive power of two, `1` is not a tile.
    pub const fn new(value: u32) -> Result<Self> {
        if value == 0 || (value.is_power_of_two() && value > 1) {
            Ok(Self(value))
        } else {
            Err(GameError::InvalidTile(value))
        }
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Result of merging two equal tiles, `None` past [`Tile::MAX`].
    pub(crate) const fn doubled(self) -> Option<Self> {
        match self.0.checked_mul(2) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }
}

impl TryFrom<u32> for Tile {
    type Error = GameError;

    fn try_from(value: u32) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Tile> for u32 {
    fn from(tile: Tile) -> Self {
        tile.0
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.pad(".")
        } else {
            fmt::Display::fmt(&self.0, f)
        }
    }
}
