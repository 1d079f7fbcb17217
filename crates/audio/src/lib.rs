//! Sound cues and background music.
//!
//! The game only ever talks to an [`AudioSink`]. Sinks are fire-and-forget:
//! playback failures are logged and never reach the caller.

use std::io::{self, Write};

use tracing::warn;

pub use tui_2048_types as types;

use types::Cue;

#[cfg(feature = "rodio")]
mod synth;

#[cfg(feature = "rodio")]
pub use synth::RodioAudio;

/// Output for sound cues and the looping background track.
pub trait AudioSink {
    fn play(&mut self, cue: Cue);
    fn start_music(&mut self);
    fn stop_music(&mut self);
}

impl<A: AudioSink + ?Sized> AudioSink for Box<A> {
    fn play(&mut self, cue: Cue) {
        (**self).play(cue)
    }

    fn start_music(&mut self) {
        (**self).start_music()
    }

    fn stop_music(&mut self) {
        (**self).stop_music()
    }
}

/// Muted output.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: Cue) {}
    fn start_music(&mut self) {}
    fn stop_music(&mut self) {}
}

/// Rings the terminal bell when a game ends. No music.
pub struct BellAudio<W: Write = io::Stdout> {
    out: W,
}

impl BellAudio {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for BellAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> BellAudio<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> AudioSink for BellAudio<W> {
    fn play(&mut self, cue: Cue) {
        if cue != Cue::GameOver {
            return;
        }
        if let Err(err) = self.out.write_all(b"\x07").and_then(|_| self.out.flush()) {
            warn!(%err, "terminal bell failed");
        }
    }

    fn start_music(&mut self) {}
    fn stop_music(&mut self) {}
}

/// Remembers every cue and the music state.
#[derive(Debug, Default, Clone)]
pub struct RecordingAudio {
    cues: Vec<Cue>,
    music_playing: bool,
    music_starts: usize,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    pub fn music_playing(&self) -> bool {
        self.music_playing
    }

    pub fn music_starts(&self) -> usize {
        self.music_starts
    }
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, cue: Cue) {
        self.cues.push(cue);
    }

    fn start_music(&mut self) {
        if !self.music_playing {
            self.music_starts += 1;
        }
        self.music_playing = true;
    }

    fn stop_music(&mut self) {
        self.music_playing = false;
    }
}
