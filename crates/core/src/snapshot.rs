use crate::animation::interpolate;
use crate::board::Grid;
use crate::moves::{Anchors, Displacements};
use crate::types::{Phase, Pos, GRID_SIZE};

/// Animation state sampled at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSnapshot {
    pub displacements: Displacements,
    /// Merge partners that wait in place for a sliding tile
    pub anchors: Anchors,
    /// Linear progress in `[0, 1]`
    pub progress: f32,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub board: Grid,
    pub score: u32,
    pub best_score: u32,
    pub moves: u32,
    pub phase: Phase,
    pub elapsed_ms: u64,
    pub animations_enabled: bool,
    pub animation: Option<AnimationSnapshot>,
    /// Whether any direction would still change the board
    pub can_move: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn tile(&self, pos: Pos) -> u32 {
        self.board[pos.row as usize][pos.col as usize]
    }

    fn running(&self) -> Option<&AnimationSnapshot> {
        self.animation.as_ref().filter(|a| a.progress < 1.0)
    }

    pub fn is_animating(&self) -> bool {
        self.running().is_some()
    }

    /// True if the committed tile at `pos` should stay hidden this frame
    /// because a sliding tile is still on its way there.
    pub fn hides(&self, pos: Pos) -> bool {
        self.running()
            .map(|a| a.displacements.iter().any(|d| d.destination == pos))
            .unwrap_or(false)
    }

    /// Value to draw under a hidden cell while its merge partner slides in.
    ///
    /// The partner never moved, so it still shows its pre-merge value.
    pub fn anchor_value(&self, pos: Pos) -> Option<u32> {
        self.running()
            .filter(|a| a.anchors.contains(&pos))
            .map(|_| self.tile(pos) / 2)
    }

    /// Interpolated `(row, col, value)` of each sliding tile.
    pub fn sliding_tiles(&self) -> impl Iterator<Item = (f32, f32, u32)> + '_ {
        self.running().into_iter().flat_map(|a| {
            a.displacements.iter().map(move |d| {
                let (r, c) = interpolate(d, a.progress);
                (r, c, d.value)
            })
        })
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0; GRID_SIZE]; GRID_SIZE],
            score: 0,
            best_score: 0,
            moves: 0,
            phase: Phase::Home,
            elapsed_ms: 0,
            animations_enabled: true,
            animation: None,
            can_move: true,
        }
    }
}
