//! Renderers: turn a `GameSnapshot` into pixels on some surface.
//!
//! `TerminalRenderer` owns the real terminal. It renders each snapshot into a
//! reusable framebuffer, diffs it against the previous frame and only writes
//! the changed runs. `CaptureRenderer` renders into memory for tests.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::game_view::{GameView, Viewport};

/// Draws one frame per call. Holds no game state of its own.
pub trait Renderer {
    fn draw(&mut self, snap: &GameSnapshot) -> Result<()>;
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn draw(&mut self, snap: &GameSnapshot) -> Result<()> {
        (**self).draw(snap)
    }
}

/// Viewport used when the terminal size cannot be queried.
const FALLBACK_VIEWPORT: (u16, u16) = (80, 24);

pub struct TerminalRenderer {
    stdout: io::Stdout,
    view: GameView,
    /// Frame being built
    next: FrameBuffer,
    /// Frame currently on screen; None forces a full redraw
    shown: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new(view: GameView) -> Self {
        Self {
            stdout: io::stdout(),
            view,
            next: FrameBuffer::new(0, 0),
            shown: None,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        let same_size = self
            .shown
            .as_ref()
            .map(|p| p.width() == self.next.width() && p.height() == self.next.height())
            .unwrap_or(false);

        self.buf.clear();
        if same_size {
            if let Some(prev) = self.shown.as_ref() {
                encode_diff_into(prev, &self.next, &mut self.buf)?;
            }
        } else {
            encode_full_into(&self.next, &mut self.buf)?;
            self.shown = Some(FrameBuffer::new(self.next.width(), self.next.height()));
        }
        self.flush_buf()?;

        // The frame just written becomes the diff base; the old one is reused
        // as the next scratch buffer.
        if let Some(prev) = self.shown.as_mut() {
            std::mem::swap(prev, &mut self.next);
        }
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Renderer for TerminalRenderer {
    fn draw(&mut self, snap: &GameSnapshot) -> Result<()> {
        let (w, h) = terminal::size().unwrap_or(FALLBACK_VIEWPORT);
        self.view
            .render_into(snap, Viewport::new(w, h), &mut self.next);
        self.present()
    }
}

/// Renders into memory at a fixed viewport. Keeps the latest frame.
pub struct CaptureRenderer {
    view: GameView,
    viewport: Viewport,
    frame: FrameBuffer,
    frames: usize,
    last: Option<GameSnapshot>,
}

impl CaptureRenderer {
    pub fn new(view: GameView, viewport: Viewport) -> Self {
        Self {
            view,
            viewport,
            frame: FrameBuffer::new(viewport.width, viewport.height),
            frames: 0,
            last: None,
        }
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Number of frames drawn so far
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn last_snapshot(&self) -> Option<&GameSnapshot> {
        self.last.as_ref()
    }
}

impl Renderer for CaptureRenderer {
    fn draw(&mut self, snap: &GameSnapshot) -> Result<()> {
        self.view.render_into(snap, self.viewport, &mut self.frame);
        self.frames += 1;
        self.last = Some(snap.clone());
        Ok(())
    }
}

/// Encode a full-frame redraw into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;

    let mut style: Option<CellStyle> = None;
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for x in 0..fb.width() {
            let cell = fb.get(x, y).unwrap_or_default();
            queue_cell(out, &mut style, cell.ch, cell.style)?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode only the runs of cells that differ between `prev` and `next`.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut style: Option<CellStyle> = None;

    for (x, y, len) in changed_runs(prev, next) {
        out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            let cell = next.get(x + dx, y).unwrap_or_default();
            queue_cell(out, &mut style, cell.ch, cell.style)?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn queue_cell(out: &mut Vec<u8>, current: &mut Option<CellStyle>, ch: char, style: CellStyle) -> Result<()> {
    if *current != Some(style) {
        out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
        out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
        out.queue(SetAttribute(Attribute::Reset))?;
        if style.bold {
            out.queue(SetAttribute(Attribute::Bold))?;
        }
        if style.dim {
            out.queue(SetAttribute(Attribute::Dim))?;
        }
        *current = Some(style);
    }
    out.queue(Print(ch))?;
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// `(x, y, len)` of each horizontal run of changed cells.
///
/// A size mismatch marks every row as changed.
fn changed_runs(prev: &FrameBuffer, next: &FrameBuffer) -> Vec<(u16, u16, u16)> {
    let (w, h) = (next.width(), next.height());
    if prev.width() != w || prev.height() != h {
        return (0..h).map(|y| (0, y, w)).collect();
    }

    let mut runs = Vec::new();
    for y in 0..h {
        let mut x = 0;
        while x < w {
            if prev.get(x, y) == next.get(x, y) {
                x += 1;
                continue;
            }
            let start = x;
            while x < w && prev.get(x, y) != next.get(x, y) {
                x += 1;
            }
            runs.push((start, y, x - start));
        }
    }
    runs
}
