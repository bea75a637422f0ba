use crate::*;
pub use random::*;

mod random;

/// Source of new tiles.
pub trait TileSpawner {
    /// Picks one of the `free` cells and the tile to put there. `free` is never empty.
    fn spawn(&mut self, free: &[Coord2]) -> (Coord2, Tile);
}

