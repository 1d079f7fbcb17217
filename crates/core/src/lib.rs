//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the 2048 rules, the controller state machine and the
//! animation bookkeeping. It has **no dependencies** on terminals, audio or any
//! other I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical tile spawns
//! - **Testable**: Time is passed in as `now_ms`, never read from a global clock
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//! - **Allocation-free**: Boards are `Copy`, move results live in `ArrayVec`s
//!
//! # Module Structure
//!
//! - [`board`]: 4x4 grid, transforms and terminal predicates
//! - [`line`]: the slide-and-merge primitive for a single line
//! - [`moves`]: direction dispatch and displacement mapping
//! - [`spawn`]: uniform random tile placement
//! - [`animation`]: slide progress and interpolation
//! - [`game_state`]: phases, scoring, timer and input handling
//! - [`clock`]: monotonic time sources
//!
//! # Game Rules
//!
//! - **Slide**: every tile moves as far as it can in the chosen direction
//! - **Merge**: two equal neighbours combine once per move; the merged value is scored
//! - **Spawn**: after any move that changed the board, one tile (2 or 4, 50/50)
//!   appears in a uniformly chosen empty cell
//! - **Game over**: the board is full, or a tile reached 2048
//!
//! # Example
//!
//! ```
//! use tui_2048_core::GameState;
//! use tui_2048_types::{Direction, GameAction, Phase};
//!
//! let mut game = GameState::new(12345);
//! game.apply_action(GameAction::Confirm, 0);
//! assert_eq!(game.phase(), Phase::Playing);
//! assert_eq!(game.board().tile_count(), 2);
//!
//! game.apply_action(GameAction::Move(Direction::Left), 16);
//! assert!(game.score() % 4 == 0);
//! ```

pub mod animation;
pub mod board;
pub mod clock;
pub mod game_state;
pub mod line;
pub mod moves;
pub mod snapshot;
pub mod spawn;

pub use tui_2048_types as types;

// Re-export commonly used types for convenience
pub use animation::{interpolate, Animation};
pub use board::{
    can_merge, has_legal_move, has_winning_tile, is_board_full, Board, BoardError, Grid, MAX_TILE,
};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use game_state::{Cues, GameSettings, GameState};
pub use line::{resolve_line, LineResolution};
pub use moves::{move_board, Anchors, Displacements, MoveOutcome, MoveResult};
pub use snapshot::{AnimationSnapshot, GameSnapshot};
pub use spawn::{spawn_random_tile, TileSpawner};
