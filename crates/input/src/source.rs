//! Input sources drained by the control loop.

use std::collections::VecDeque;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use crate::map::handle_key_event;
use crate::types::GameAction;

/// A lazy stream of discrete game actions.
pub trait InputSource {
    /// Wait up to `timeout` for input, then append every pending action to
    /// `out` in arrival order. Returns without blocking further once the
    /// pending events are drained.
    fn poll(&mut self, timeout: Duration, out: &mut Vec<GameAction>) -> Result<()>;
}

/// Reads key presses from the terminal.
///
/// Key repeat and release events are ignored: one press is one action.
#[derive(Debug, Default)]
pub struct CrosstermInput;

impl CrosstermInput {
    pub fn new() -> Self {
        Self
    }
}

impl InputSource for CrosstermInput {
    fn poll(&mut self, timeout: Duration, out: &mut Vec<GameAction>) -> Result<()> {
        if !event::poll(timeout)? {
            return Ok(());
        }

        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(action) = handle_key_event(key) {
                        out.push(action);
                    }
                }
            }
            if !event::poll(Duration::ZERO)? {
                break;
            }
        }
        Ok(())
    }
}

/// Replays canned batches, one batch per `poll`.
///
/// Once the script runs out it yields [`GameAction::Quit`] so a loop driven
/// by it always terminates.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    batches: VecDeque<Vec<GameAction>>,
    polls: usize,
}

impl ScriptedInput {
    pub fn new<I>(batches: I) -> Self
    where
        I: IntoIterator<Item = Vec<GameAction>>,
    {
        Self {
            batches: batches.into_iter().collect(),
            polls: 0,
        }
    }

    /// Number of `poll` calls made so far
    pub fn polls(&self) -> usize {
        self.polls
    }

    pub fn is_exhausted(&self) -> bool {
        self.batches.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _timeout: Duration, out: &mut Vec<GameAction>) -> Result<()> {
        self.polls += 1;
        match self.batches.pop_front() {
            Some(batch) => out.extend(batch),
            None => out.push(GameAction::Quit),
        }
        Ok(())
    }
}
