//! Terminal input module (engine-facing).
//!
//! This crate is independent of the game rules. It maps `crossterm` key events
//! into [`crate::types::GameAction`] and exposes an [`InputSource`] that the
//! control loop drains once per frame. A scripted source replays canned input
//! for tests.

pub mod map;
pub mod source;

pub use tui_2048_types as types;

pub use map::{handle_key_event, should_quit};
pub use source::{CrosstermInput, InputSource, ScriptedInput};
