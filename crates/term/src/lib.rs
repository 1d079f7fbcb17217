//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids widget toolkits and renders into a simple framebuffer that is
//! flushed to the terminal as a diff against the previous frame.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Draw sliding tiles at fractional positions during an animation
//! - Allow precise control over aspect ratio (e.g. 8x4 chars per tile)

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_2048_core as core;
pub use tui_2048_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{tile_colors, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, CaptureRenderer, Renderer, TerminalRenderer};
