//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, audio cues).
//!
//! # Grid Dimensions
//!
//! The board is always a 4x4 grid:
//!
//! - **Rows**: 4 (indexed 0-3, top to bottom)
//! - **Columns**: 4 (indexed 0-3, left to right)
//!
//! # Game Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `GRID_SIZE` | 4 | Rows and columns of the board |
//! | `WIN_TILE` | 2048 | A tile at or above this value ends the game |
//! | `TICK_MS` | 16 | Input poll / render interval (~60 FPS) |
//! | `DEFAULT_ANIMATION_MS` | 120 | Slide animation duration |
//! | `MAX_ANIMATION_MS` | 1000 | Upper bound accepted from configuration |
//!
//! # Examples
//!
//! ```
//! use tui_2048_types::{Direction, GameAction, Pos, GRID_SIZE};
//!
//! let action = GameAction::Move(Direction::Up);
//! assert_eq!(action.as_str(), "moveUp");
//!
//! let p = Pos::new(3, 1);
//! assert_eq!(p.index(), 13);
//! assert_eq!(GRID_SIZE, 4);
//! ```

/// Board side length (4 rows, 4 columns)
pub const GRID_SIZE: usize = 4;

/// Number of cells on the board
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Tile value that ends the game as a win
pub const WIN_TILE: u32 = 2048;

/// Fixed loop interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Default slide animation duration in milliseconds
pub const DEFAULT_ANIMATION_MS: u32 = 120;

/// Largest animation duration accepted from configuration
pub const MAX_ANIMATION_MS: u32 = 1000;

/// Values a freshly spawned tile can take (picked 50/50)
pub const SPAWN_VALUES: [u32; 2] = [2, 4];

/// Number of tiles placed on an empty board when a game starts
pub const INITIAL_TILES: usize = 2;

/// A cell coordinate on the board.
///
/// `row` grows downward and `col` grows to the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Row-major flat index (`row * GRID_SIZE + col`)
    pub fn index(&self) -> usize {
        self.row as usize * GRID_SIZE + self.col as usize
    }

    /// Inverse of [`Pos::index`]
    pub fn from_index(idx: usize) -> Self {
        debug_assert!(idx < CELL_COUNT);
        Self {
            row: (idx / GRID_SIZE) as u8,
            col: (idx % GRID_SIZE) as u8,
        }
    }
}

/// One tile's slide during a move, recorded for animation only.
///
/// `value` is the tile value sitting at `destination` once the move is
/// committed (the merged value when the tile took part in a merge).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Displacement {
    pub origin: Pos,
    pub destination: Pos,
    pub value: u32,
}

/// The four slide directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in a fixed order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Top-level mode of the game controller. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Title screen
    Home,
    /// Help screen reached from Home
    Instructions,
    /// A game is in progress
    Playing,
    /// The board filled up or a winning tile appeared
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Home => "home",
            Phase::Instructions => "instructions",
            Phase::Playing => "playing",
            Phase::GameOver => "gameOver",
        }
    }
}

/// Discrete input events consumed by the controller
///
/// These are produced by the terminal key map and by scripted input in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Stop the control loop
    Quit,
    /// Enter / Space: start a game, leave the instructions or game-over screen
    Confirm,
    /// Slide every tile in a direction
    Move(Direction),
    /// Open the instructions from the home screen (or close them)
    ToggleInstructions,
    /// Turn slide animations on or off
    ToggleAnimations,
    /// Abandon the current game and return to the home screen
    Reset,
}

impl GameAction {
    /// camelCase name used in log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Quit => "quit",
            GameAction::Confirm => "confirm",
            GameAction::Move(Direction::Up) => "moveUp",
            GameAction::Move(Direction::Down) => "moveDown",
            GameAction::Move(Direction::Left) => "moveLeft",
            GameAction::Move(Direction::Right) => "moveRight",
            GameAction::ToggleInstructions => "toggleInstructions",
            GameAction::ToggleAnimations => "toggleAnimations",
            GameAction::Reset => "reset",
        }
    }
}

/// Sound cues emitted by the controller on state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// A new game begins (or the game-over screen is dismissed)
    Start,
    /// A move changed the board
    Move,
    /// The game entered the game-over phase
    GameOver,
}

impl Cue {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cue::Start => "start",
            Cue::Move => "move",
            Cue::GameOver => "gameOver",
        }
    }
}
