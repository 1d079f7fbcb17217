//! Board module - the 4x4 tile grid
//!
//! Each cell holds 0 (empty) or a power of two from 2 up to [`MAX_TILE`]. The board is a small
//! `Copy` value: moves build a new board instead of mutating the committed one,
//! so "did anything change" is a plain equality check.
//! Coordinates: (row, col) where both range 0..3, row 0 at the top.

use arrayvec::ArrayVec;
use thiserror::Error;

use crate::types::{Pos, CELL_COUNT, GRID_SIZE};

/// Row-major cell storage
pub type Grid = [[u32; GRID_SIZE]; GRID_SIZE];

/// Rejected input when building a board from raw rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("cell ({row}, {col}) holds {value}, expected 0 or a power of two >= 2")]
    InvalidTile { row: usize, col: usize, value: u32 },
}

/// The game board - 4 rows x 4 columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: Grid,
}

/// Largest tile a `u32` cell can hold. Tiles at this value no longer merge.
pub const MAX_TILE: u32 = 1 << 31;

/// True for 0 and for powers of two in `2..=MAX_TILE`.
#[inline]
pub fn is_valid_tile(value: u32) -> bool {
    value == 0 || (value >= 2 && value.is_power_of_two())
}

/// True if two neighbouring tiles combine into one.
#[inline]
pub fn can_merge(a: u32, b: u32) -> bool {
    a != 0 && a == b && a < MAX_TILE
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [[0; GRID_SIZE]; GRID_SIZE],
        }
    }

    /// Build a board from rows, checking every cell.
    pub fn from_rows(rows: Grid) -> Result<Self, BoardError> {
        for (row, line) in rows.iter().enumerate() {
            for (col, &value) in line.iter().enumerate() {
                if !is_valid_tile(value) {
                    return Err(BoardError::InvalidTile { row, col, value });
                }
            }
        }
        Ok(Self { cells: rows })
    }

    /// Build a board without validation. Only engine transforms use this;
    /// they preserve the tile invariant by construction.
    pub(crate) fn from_rows_unchecked(rows: Grid) -> Self {
        Self { cells: rows }
    }

    pub fn rows(&self) -> &Grid {
        &self.cells
    }

    pub fn row(&self, row: usize) -> [u32; GRID_SIZE] {
        self.cells[row]
    }

    /// Get the tile at `pos`. Returns None if out of bounds.
    pub fn get(&self, pos: Pos) -> Option<u32> {
        self.cells
            .get(pos.row as usize)
            .and_then(|r| r.get(pos.col as usize))
            .copied()
    }

    /// Return a copy of this board with `value` written at `pos`.
    ///
    /// Out-of-bounds positions and invalid values leave the board unchanged.
    pub fn with_tile(mut self, pos: Pos, value: u32) -> Self {
        if is_valid_tile(value) && (pos.row as usize) < GRID_SIZE && (pos.col as usize) < GRID_SIZE
        {
            self.cells[pos.row as usize][pos.col as usize] = value;
        }
        self
    }

    /// All empty cells in row-major order (stack-only, no allocation)
    pub fn empty_cells(&self) -> ArrayVec<Pos, CELL_COUNT> {
        let mut out = ArrayVec::new();
        for (r, line) in self.cells.iter().enumerate() {
            for (c, &v) in line.iter().enumerate() {
                if v == 0 {
                    out.push(Pos::new(r as u8, c as u8));
                }
            }
        }
        out
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&v| v == 0).count()
    }

    /// Number of non-empty cells
    pub fn tile_count(&self) -> usize {
        CELL_COUNT - self.empty_count()
    }

    /// Sum of all tile values
    pub fn sum(&self) -> u64 {
        self.cells.iter().flatten().map(|&v| v as u64).sum()
    }

    pub fn max_tile(&self) -> u32 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Check the tile invariant on every cell
    pub fn is_well_formed(&self) -> bool {
        self.cells.iter().flatten().all(|&v| is_valid_tile(v))
    }
}

/// Swap rows and columns
pub fn transpose(board: &Board) -> Board {
    let mut out = [[0; GRID_SIZE]; GRID_SIZE];
    for (r, line) in board.cells.iter().enumerate() {
        for (c, &v) in line.iter().enumerate() {
            out[c][r] = v;
        }
    }
    Board::from_rows_unchecked(out)
}

/// Mirror every row left-to-right
pub fn reverse_rows(board: &Board) -> Board {
    let mut out = board.cells;
    for line in out.iter_mut() {
        line.reverse();
    }
    Board::from_rows_unchecked(out)
}

/// True iff every cell holds a tile.
///
/// This is the game-over rule: a full board ends the game even when a merge
/// would still be possible.
pub fn is_board_full(board: &Board) -> bool {
    board.cells.iter().flatten().all(|&v| v != 0)
}

/// True iff some cell is at or above `target`.
pub fn has_winning_tile(board: &Board, target: u32) -> bool {
    board.cells.iter().flatten().any(|&v| v >= target)
}

/// True iff at least one direction would change the board.
///
/// Informational only; the controller ends the game on a full board
/// regardless of this.
pub fn has_legal_move(board: &Board) -> bool {
    if !is_board_full(board) {
        return true;
    }
    let g = &board.cells;
    for r in 0..GRID_SIZE {
        for c in 0..GRID_SIZE {
            if c + 1 < GRID_SIZE && can_merge(g[r][c], g[r][c + 1]) {
                return true;
            }
            if r + 1 < GRID_SIZE && can_merge(g[r][c], g[r + 1][c]) {
                return true;
            }
        }
    }
    false
}
