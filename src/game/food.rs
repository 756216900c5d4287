use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};

use super::geometry::Grid;
use super::state::Cell;

/// Picks food cells uniformly at random among the free cells of a grid
#[derive(Debug, Clone)]
pub struct FoodSpawner<R = StdRng> {
    rng: R,
    /// Re-roll budget before falling back to scanning the free cells
    max_attempts: Option<usize>,
}

impl FoodSpawner<StdRng> {
    /// Seeded spawners repeat the same food sequence for the same moves
    pub fn new(seed: Option<u64>, max_attempts: Option<usize>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(rng, max_attempts)
    }
}

impl<R: Rng> FoodSpawner<R> {
    pub fn with_rng(rng: R, max_attempts: Option<usize>) -> Self {
        Self { rng, max_attempts }
    }

    /// Spawn food at a random cell that is not in `occupied`.
    ///
    /// Returns `None` only when every cell of the grid is occupied.
    pub fn spawn(&mut self, grid: &Grid, occupied: &HashSet<Cell>) -> Option<Cell> {
        let n = grid.cell_count();
        if n <= 0 {
            return None;
        }
        let mut attempts = 0usize;

        while self.max_attempts.map_or(true, |max| attempts < max) {
            attempts += 1;
            let cell = Cell::new(self.rng.gen_range(0..n), self.rng.gen_range(0..n));
            if !occupied.contains(&cell) {
                return Some(cell);
            }
        }

        grid.cells()
            .filter(|cell| !occupied.contains(cell))
            .choose(&mut self.rng)
    }
}
