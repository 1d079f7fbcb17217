//! Board moves - one generic slide over four orientations
//!
//! A move rotates the board into a "slide left" frame, resolves each row with
//! [`resolve_line`], then rotates back. Shift coordinates go through the same
//! mapping so every [`Displacement`] is reported in board coordinates.

use arrayvec::ArrayVec;

use crate::board::{reverse_rows, transpose, Board};
use crate::line::resolve_line;
use crate::types::{Direction, Displacement, Pos, CELL_COUNT, GRID_SIZE};

/// Displacements for one move; at most one per tile.
pub type Displacements = ArrayVec<Displacement, CELL_COUNT>;

/// Cells where a merge landed on a tile that did not move; at most two per line.
pub type Anchors = ArrayVec<Pos, { 2 * GRID_SIZE }>;

/// Board, score and animation data for a move that changed the board.
///
/// `board` is the pre-spawn result; the controller adds the random tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    pub board: Board,
    pub score_gained: u32,
    pub displacements: Displacements,
    pub anchors: Anchors,
}

/// Outcome of a move attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Nothing would change: no spawn, no score, no animation
    NoOp,
    Moved(MoveResult),
}

impl MoveOutcome {
    pub fn is_noop(&self) -> bool {
        matches!(self, MoveOutcome::NoOp)
    }
}

/// Maps a direction onto the slide-left frame and back.
#[derive(Clone, Copy)]
struct Orientation {
    to_frame: fn(&Board) -> Board,
    from_frame: fn(&Board) -> Board,
    /// Frame (row, col) to board position
    frame_to_board: fn(usize, usize) -> Pos,
}

const LAST: usize = GRID_SIZE - 1;

fn identity(board: &Board) -> Board {
    *board
}

fn transpose_then_reverse(board: &Board) -> Board {
    reverse_rows(&transpose(board))
}

fn reverse_then_transpose(board: &Board) -> Board {
    transpose(&reverse_rows(board))
}

fn orientation(direction: Direction) -> Orientation {
    match direction {
        Direction::Left => Orientation {
            to_frame: identity,
            from_frame: identity,
            frame_to_board: |r, c| Pos::new(r as u8, c as u8),
        },
        Direction::Right => Orientation {
            to_frame: reverse_rows,
            from_frame: reverse_rows,
            frame_to_board: |r, c| Pos::new(r as u8, (LAST - c) as u8),
        },
        Direction::Up => Orientation {
            to_frame: transpose,
            from_frame: transpose,
            frame_to_board: |r, c| Pos::new(c as u8, r as u8),
        },
        Direction::Down => Orientation {
            to_frame: transpose_then_reverse,
            from_frame: reverse_then_transpose,
            frame_to_board: |r, c| Pos::new((LAST - c) as u8, r as u8),
        },
    }
}

/// Slide and merge every tile toward `direction`.
///
/// Pure: never spawns a tile and never touches any RNG.
pub fn move_board(board: &Board, direction: Direction) -> MoveOutcome {
    debug_assert!(board.is_well_formed(), "malformed board: {:?}", board);

    let o = orientation(direction);
    let frame = (o.to_frame)(board);

    let mut rows = [[0; GRID_SIZE]; GRID_SIZE];
    let mut score_gained = 0u32;
    let mut displacements = Displacements::new();
    let mut anchors = Anchors::new();

    for (r, out_row) in rows.iter_mut().enumerate() {
        let resolved = resolve_line(frame.row(r));
        *out_row = resolved.line;
        score_gained = score_gained.saturating_add(resolved.score);
        for &(from, to) in resolved.shifts.iter() {
            displacements.push(Displacement {
                origin: (o.frame_to_board)(r, from),
                destination: (o.frame_to_board)(r, to),
                value: resolved.line[to],
            });
        }
        for &at in resolved.anchors.iter() {
            anchors.push((o.frame_to_board)(r, at));
        }
    }

    let moved = (o.from_frame)(&Board::from_rows_unchecked(rows));
    if moved == *board {
        return MoveOutcome::NoOp;
    }

    MoveOutcome::Moved(MoveResult {
        board: moved,
        score_gained,
        displacements,
        anchors,
    })
}
