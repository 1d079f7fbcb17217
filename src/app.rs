//! Application context and the control loop.
//!
//! [`App`] owns everything a running game needs: the controller and its four
//! collaborators. Each pass of [`App::run`] waits up to one tick for input,
//! applies the pending actions in arrival order, lets the controller expire a
//! finished animation and draws exactly one frame.

use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info};

use crate::audio::AudioSink;
use crate::core::{Clock, GameSnapshot, GameState};
use crate::input::InputSource;
use crate::term::Renderer;
use crate::types::{GameAction, TICK_MS};

pub struct App<R, A, I, C> {
    game: GameState,
    renderer: R,
    audio: A,
    input: I,
    clock: C,
    actions: Vec<GameAction>,
    snapshot: GameSnapshot,
    frames: u64,
}

impl<R, A, I, C> App<R, A, I, C>
where
    R: Renderer,
    A: AudioSink,
    I: InputSource,
    C: Clock,
{
    pub fn new(game: GameState, renderer: R, audio: A, input: I, clock: C) -> Self {
        Self {
            game,
            renderer,
            audio,
            input,
            clock,
            actions: Vec::with_capacity(8),
            snapshot: GameSnapshot::default(),
            frames: 0,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    /// Frames drawn so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run until the controller reports a quit request.
    pub fn run(&mut self) -> Result<()> {
        info!(seed = self.game.seed(), "session started");
        self.audio.start_music();

        let result = self.run_loop();

        self.audio.stop_music();
        info!(
            frames = self.frames,
            best_score = self.game.best_score(),
            "session ended"
        );
        result
    }

    fn run_loop(&mut self) -> Result<()> {
        let tick = Duration::from_millis(TICK_MS as u64);
        self.draw()?;

        while !self.game.quit_requested() {
            self.step(tick)?;
        }
        Ok(())
    }

    /// One pass: input, update, render.
    pub fn step(&mut self, timeout: Duration) -> Result<()> {
        self.actions.clear();
        self.input.poll(timeout, &mut self.actions)?;

        for &action in &self.actions {
            let now = self.clock.now_ms();
            for cue in self.game.apply_action(action, now) {
                debug!(cue = cue.as_str(), "cue");
                self.audio.play(cue);
            }
            if self.game.quit_requested() {
                return Ok(());
            }
        }

        self.game.update(self.clock.now_ms());
        self.draw()
    }

    fn draw(&mut self) -> Result<()> {
        self.game
            .snapshot_into(self.clock.now_ms(), &mut self.snapshot);
        self.renderer.draw(&self.snapshot)?;
        self.frames += 1;
        Ok(())
    }
}
