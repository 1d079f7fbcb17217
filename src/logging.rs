//! Tracing setup.
//!
//! Stdout belongs to the terminal UI, so logs only go to a file and only
//! when one is configured.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Install the global subscriber. Returns the log path when logging is on.
pub fn init(config: &Config) -> Result<Option<PathBuf>> {
    let Some(path) = config.log_file.clone() else {
        return Ok(None);
    };

    let filter = EnvFilter::try_new(&config.log_filter)
        .with_context(|| format!("invalid log filter {:?}", config.log_filter))?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|err| anyhow!(err))?;

    Ok(Some(path))
}
