use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Chance of a new tile being a 4 rather than a 2, as `(numerator, denominator)`.
pub const FOUR_CHANCE: (u32, u32) = (1, 4);

/// Uniformly random cell, value 2 or 4 weighted by [`FOUR_CHANCE`], reproducible from a seed.
#[derive(Clone, Debug)]
pub struct RandomSpawner {
    seed: u64,
    rng: SmallRng,
}

impl RandomSpawner {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl TileSpawner for RandomSpawner {
    fn spawn(&mut self, free: &[Coord2]) -> (Coord2, Tile) {
        let coords = free[self.rng.random_range(0..free.len())];
        let (numerator, denominator) = FOUR_CHANCE;
        let tile = if self.rng.random_ratio(numerator, denominator) {
            Tile::FOUR
        } else {
            Tile::TWO
        };
        (coords, tile)
    }
}
