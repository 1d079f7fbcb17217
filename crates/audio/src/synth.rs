//! Synthesized tones played through the default output device.

use std::f32::consts::TAU;

use anyhow::{Context, Result};
use rodio::{buffer::SamplesBuffer, OutputStream, OutputStreamHandle, Sink, Source};
use tracing::{debug, warn};

use crate::types::Cue;
use crate::AudioSink;

const SAMPLE_RATE: u32 = 44_100;
const MUSIC_VOLUME: f32 = 0.25;

/// One looping bar of the background track: (frequency Hz, seconds).
const ARPEGGIO: [(f32, f32); 8] = [
    (261.63, 0.18),
    (329.63, 0.18),
    (392.00, 0.18),
    (523.25, 0.18),
    (392.00, 0.18),
    (329.63, 0.18),
    (293.66, 0.18),
    (349.23, 0.18),
];

pub struct RodioAudio {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    music: Option<Sink>,
}

impl RodioAudio {
    /// Open the default output device.
    pub fn try_new() -> Result<Self> {
        let (stream, handle) =
            OutputStream::try_default().context("no audio output device")?;
        Ok(Self {
            _stream: stream,
            handle,
            music: None,
        })
    }

    fn play_samples(&self, samples: Vec<f32>) {
        match Sink::try_new(&self.handle) {
            Ok(sink) => {
                sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples));
                sink.detach();
            }
            Err(err) => warn!(%err, "cannot open audio sink"),
        }
    }
}

impl AudioSink for RodioAudio {
    fn play(&mut self, cue: Cue) {
        let samples = match cue {
            Cue::Start => sweep(440.0, 880.0, 0.15, 0.2),
            Cue::Move => tone(660.0, 0.04, 0.1),
            Cue::GameOver => sweep(440.0, 110.0, 0.6, 0.25),
        };
        self.play_samples(samples);
    }

    fn start_music(&mut self) {
        if self.music.is_some() {
            return;
        }
        let sink = match Sink::try_new(&self.handle) {
            Ok(sink) => sink,
            Err(err) => {
                warn!(%err, "cannot start music");
                return;
            }
        };
        let bar: Vec<f32> = ARPEGGIO
            .iter()
            .flat_map(|&(freq, secs)| tone(freq, secs, 0.12))
            .collect();
        sink.set_volume(MUSIC_VOLUME);
        sink.append(SamplesBuffer::new(1, SAMPLE_RATE, bar).repeat_infinite());
        debug!("music started");
        self.music = Some(sink);
    }

    fn stop_music(&mut self) {
        if let Some(sink) = self.music.take() {
            sink.stop();
            debug!("music stopped");
        }
    }
}

/// Sine tone with a linear fade-out.
fn tone(freq: f32, secs: f32, amp: f32) -> Vec<f32> {
    sweep(freq, freq, secs, amp)
}

/// Sine glide from `from` to `to` Hz.
fn sweep(from: f32, to: f32, secs: f32, amp: f32) -> Vec<f32> {
    let n = (SAMPLE_RATE as f32 * secs) as usize;
    let mut phase = 0.0f32;
    (0..n)
        .map(|i| {
            let t = i as f32 / n as f32;
            let freq = from + (to - from) * t;
            phase = (phase + TAU * freq / SAMPLE_RATE as f32) % TAU;
            phase.sin() * amp * (1.0 - t)
        })
        .collect()
}
