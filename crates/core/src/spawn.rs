//! Tile spawning
//!
//! A new tile goes into one empty cell picked uniformly over all empty cells,
//! with a value picked 50/50 from [`SPAWN_VALUES`]. `TileSpawner` wraps a
//! seeded `StdRng` so a whole game can be replayed from its seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::Board;
use crate::types::SPAWN_VALUES;

/// Place one random tile. A board with no empty cell is returned unchanged.
pub fn spawn_random_tile<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Board {
    let empty = board.empty_cells();
    if empty.is_empty() {
        return *board;
    }

    let pos = empty[rng.gen_range(0..empty.len())];
    let value = SPAWN_VALUES[rng.gen_range(0..SPAWN_VALUES.len())];
    board.with_tile(pos, value)
}

/// Seeded source of spawned tiles for one controller.
#[derive(Debug, Clone)]
pub struct TileSpawner {
    rng: StdRng,
    seed: u64,
}

impl TileSpawner {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed this spawner was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn spawn(&mut self, board: &Board) -> Board {
        spawn_random_tile(board, &mut self.rng)
    }

    /// Empty board plus `count` spawned tiles
    pub fn fresh_board(&mut self, count: usize) -> Board {
        let mut board = Board::new();
        for _ in 0..count {
            board = self.spawn(&board);
        }
        board
    }
}

impl Default for TileSpawner {
    fn default() -> Self {
        Self::new(1)
    }
}
