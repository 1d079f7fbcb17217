//! Terminal 2048 (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `tui_2048::{core,input,term,audio,types}` and owns the
//! application layer: configuration, logging setup and the control loop.

pub use tui_2048_audio as audio;
pub use tui_2048_core as core;
pub use tui_2048_input as input;
pub use tui_2048_term as term;
pub use tui_2048_types as types;

pub mod app;
pub mod config;
pub mod logging;
