//! Command-line and environment configuration.

use std::path::PathBuf;

use clap::Parser;

use crate::core::GameSettings;
use crate::types::{DEFAULT_ANIMATION_MS, MAX_ANIMATION_MS, WIN_TILE};

#[derive(Parser, Debug, Clone)]
#[command(name = "tui-2048", version, about = "Slide tiles, merge equal numbers, reach 2048")]
pub struct Config {
    /// RNG seed for tile spawns (random when absent).
    #[arg(long, env = "TUI_2048_SEED")]
    pub seed: Option<u64>,

    /// Start with slide animations turned off.
    #[arg(long)]
    pub no_animations: bool,

    /// Slide animation length in milliseconds (at most 1000).
    #[arg(long, env = "TUI_2048_ANIMATION_MS", default_value_t = DEFAULT_ANIMATION_MS)]
    pub animation_ms: u32,

    /// Disable all sound.
    #[arg(long, env = "TUI_2048_MUTE")]
    pub mute: bool,

    /// Write logs to this file. Nothing is logged otherwise.
    #[arg(long, env = "TUI_2048_LOG_PATH")]
    pub log_file: Option<PathBuf>,

    /// Log filter directive, e.g. `debug` or `tui_2048_core=trace`.
    #[arg(long, env = "TUI_2048_LOG", default_value = "info")]
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            no_animations: false,
            animation_ms: DEFAULT_ANIMATION_MS,
            mute: false,
            log_file: None,
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Controller settings; draws a fresh seed when none was given.
    pub fn game_settings(&self) -> GameSettings {
        GameSettings {
            seed: self.seed.unwrap_or_else(rand::random),
            animations_enabled: !self.no_animations,
            animation_ms: self.animation_ms.min(MAX_ANIMATION_MS),
            win_tile: WIN_TILE,
        }
    }
}
