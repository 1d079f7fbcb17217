//! Line resolution - the atomic slide-and-merge primitive
//!
//! Every move reduces to resolving four lines toward index 0. A tile produced
//! by a merge is never merged again in the same move, so `[2, 2, 2, 2]` becomes
//! `[4, 4, 0, 0]` and `[2, 2, 2, 0]` becomes `[4, 2, 0, 0]`.

use arrayvec::ArrayVec;

use crate::board::can_merge;
use crate::types::GRID_SIZE;

/// One line of the board, index 0 is the slide target
pub type Line = [u32; GRID_SIZE];

/// Result of resolving one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineResolution {
    /// Tiles after sliding and merging, zero-padded on the right
    pub line: Line,
    /// Sum of every merged value produced (saturating)
    pub score: u32,
    /// `(from, to)` index pairs for tiles that moved
    pub shifts: ArrayVec<(usize, usize), GRID_SIZE>,
    /// Indices of merges whose first tile never moved
    pub anchors: ArrayVec<usize, 2>,
}

/// Slide toward index 0 and merge adjacent equal tiles once.
///
/// Shifts are recorded for each tile written to a new index and for the
/// surviving half of each merge (second tile's index -> first tile's slot).
/// Tiles that neither move nor merge are omitted.
pub fn resolve_line(src: Line) -> LineResolution {
    let mut line = [0; GRID_SIZE];
    let mut score = 0u32;
    let mut shifts = ArrayVec::new();
    let mut anchors = ArrayVec::new();

    let mut pos = 0usize;
    // Value written at `pos - 1` that may still absorb an equal tile.
    let mut eligible: Option<u32> = None;
    // Source index of the tile written at `pos - 1`.
    let mut last_src = 0usize;

    for (j, &value) in src.iter().enumerate() {
        if value == 0 {
            continue;
        }

        match eligible {
            Some(prev) if can_merge(prev, value) => {
                let merged = prev * 2;
                line[pos - 1] = merged;
                score = score.saturating_add(merged);
                shifts.push((j, pos - 1));
                if last_src == pos - 1 {
                    anchors.push(pos - 1);
                }
                eligible = None;
            }
            _ => {
                line[pos] = value;
                if j != pos {
                    shifts.push((j, pos));
                }
                eligible = Some(value);
                last_src = j;
                pos += 1;
            }
        }
    }

    LineResolution {
        line,
        score,
        shifts,
        anchors,
    }
}
