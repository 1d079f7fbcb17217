//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Phase, Pos, GRID_SIZE};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const BACKGROUND: Rgb = Rgb::new(187, 173, 160);
const EMPTY_TILE: Rgb = Rgb::new(205, 193, 180);
const DARK_TEXT: Rgb = Rgb::new(119, 110, 101);
const LIGHT_TEXT: Rgb = Rgb::new(249, 246, 242);
const BIG_TILE: Rgb = Rgb::new(60, 58, 50);

const INSTRUCTIONS: [&str; 9] = [
    "HOW TO PLAY",
    "",
    "Arrows / WASD / hjkl  slide all tiles",
    "Equal tiles that touch merge into one",
    "Reach 2048, or fill the board, to end the game",
    "",
    "t  toggle animations    r  back to menu",
    "q  quit",
    "Enter  back",
];

/// A lightweight terminal renderer for the 2048 board.
pub struct GameView {
    /// Tile pitch in terminal columns (including the gutter).
    cell_w: u16,
    /// Tile pitch in terminal rows (including the gutter).
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 8x4 keeps tiles roughly square with typical glyph aspect ratios.
        Self {
            cell_w: 8,
            cell_h: 4,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(2),
            cell_h: cell_h.max(2),
        }
    }

    /// Outer size of the bordered board, `(width, height)`.
    pub fn frame_size(&self) -> (u16, u16) {
        let inner_w = GRID_SIZE as u16 * self.cell_w + 1;
        let inner_h = GRID_SIZE as u16 * self.cell_h + 1;
        (inner_w + 2, inner_h + 2)
    }

    /// Top-left corner of the board frame for `viewport`.
    pub fn frame_origin(&self, viewport: Viewport) -> (u16, u16) {
        let (frame_w, frame_h) = self.frame_size();
        (
            viewport.width.saturating_sub(frame_w) / 2,
            viewport.height.saturating_sub(frame_h) / 2,
        )
    }

    /// Render the current snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        match snap.phase {
            Phase::Home => self.draw_home(fb, snap, viewport),
            Phase::Instructions => self.draw_instructions(fb, viewport),
            Phase::Playing | Phase::GameOver => {
                let (start_x, start_y) = self.frame_origin(viewport);
                self.draw_board(fb, snap, start_x, start_y);
                self.draw_side_panel(fb, snap, viewport, start_x, start_y);
                if snap.phase == Phase::GameOver {
                    self.draw_game_over(fb, snap, start_x, start_y);
                }
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_home(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport) {
        let title = CellStyle::new(tile_colors(2048).0, Rgb::new(0, 0, 0)).bold();
        let text = CellStyle::default();
        let dim = text.dim();

        let mid = viewport.height / 2;
        let top = mid.saturating_sub(3);
        fb.put_str_centered(0, viewport.width, top, "2 0 4 8", title);
        fb.put_str_centered(0, viewport.width, top + 2, "Enter  start a new game", text);
        fb.put_str_centered(0, viewport.width, top + 3, "i  instructions", text);
        fb.put_str_centered(0, viewport.width, top + 4, "q  quit", text);

        let anim = if snap.animations_enabled {
            "animations: on  (t)"
        } else {
            "animations: off (t)"
        };
        fb.put_str_centered(0, viewport.width, top + 6, anim, dim);

        if snap.best_score > 0 {
            let label = "best ";
            let digits = count_digits(snap.best_score);
            let x = viewport.width.saturating_sub(label.len() as u16 + digits) / 2;
            fb.put_str(x, top + 7, label, dim);
            fb.put_u32(x + label.len() as u16, top + 7, snap.best_score, dim);
        }
    }

    fn draw_instructions(&self, fb: &mut FrameBuffer, viewport: Viewport) {
        let heading = CellStyle::default().bold();
        let text = CellStyle::default();
        let top = (viewport.height / 2).saturating_sub(INSTRUCTIONS.len() as u16 / 2);
        for (i, line) in INSTRUCTIONS.iter().enumerate() {
            let style = if i == 0 { heading } else { text };
            fb.put_str_centered(0, viewport.width, top + i as u16, line, style);
        }
    }

    fn draw_board(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, start_x: u16, start_y: u16) {
        let (frame_w, frame_h) = self.frame_size();
        let bg = CellStyle::new(BACKGROUND, BACKGROUND);
        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        fb.fill_rect(start_x + 1, start_y + 1, frame_w - 2, frame_h - 2, ' ', bg);
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        // Committed tiles; a cell a slide is still heading for shows its
        // waiting merge partner or nothing.
        for r in 0..GRID_SIZE {
            for c in 0..GRID_SIZE {
                let pos = Pos::new(r as u8, c as u8);
                let value = snap.tile(pos);
                let (row, col) = (r as f32, c as f32);
                let shown = if snap.hides(pos) {
                    snap.anchor_value(pos).unwrap_or(0)
                } else {
                    value
                };
                self.draw_tile(fb, start_x, start_y, row, col, shown);
            }
        }

        for (row, col, value) in snap.sliding_tiles() {
            self.draw_tile(fb, start_x, start_y, row, col, value);
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    /// Draw a tile at a (possibly fractional) board position. `value == 0`
    /// draws an empty slot.
    fn draw_tile(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        row: f32,
        col: f32,
        value: u32,
    ) {
        let px = start_x + 2 + (col * self.cell_w as f32).round() as u16;
        let py = start_y + 2 + (row * self.cell_h as f32).round() as u16;
        let w = self.cell_w - 1;
        let h = self.cell_h - 1;

        if value == 0 {
            fb.fill_rect(px, py, w, h, ' ', CellStyle::new(EMPTY_TILE, EMPTY_TILE));
            return;
        }

        let (bg, fg) = tile_colors(value);
        let style = CellStyle::new(fg, bg).bold();
        fb.fill_rect(px, py, w, h, ' ', style);

        let digits = count_digits(value);
        let tx = px + w.saturating_sub(digits) / 2;
        let ty = py + (h - 1) / 2;
        fb.put_u32(tx, ty, value, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
    ) {
        let (frame_w, _) = self.frame_size();
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0)).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(panel_x, y + 1, snap.score, value);
        y += 3;

        fb.put_str(panel_x, y, "BEST", label);
        fb.put_u32(panel_x, y + 1, snap.best_score, value);
        y += 3;

        fb.put_str(panel_x, y, "TIME", label);
        self.put_clock(fb, panel_x, y + 1, snap.elapsed_ms, value);
        y += 3;

        fb.put_str(panel_x, y, "MOVES", label);
        fb.put_u32(panel_x, y + 1, snap.moves, value);
        y += 3;

        fb.put_str(panel_x, y, "ANIM", label);
        let anim = if snap.animations_enabled { "on" } else { "off" };
        fb.put_str(panel_x, y + 1, anim, value);
        y += 3;

        if snap.phase == Phase::Playing && !snap.can_move {
            fb.put_str(panel_x, y, "no moves left", value.dim());
        }
    }

    /// `m:ss`, minutes uncapped.
    fn put_clock(&self, fb: &mut FrameBuffer, x: u16, y: u16, elapsed_ms: u64, style: CellStyle) {
        let total_secs = elapsed_ms / 1000;
        let mins = (total_secs / 60).min(u32::MAX as u64) as u32;
        let secs = (total_secs % 60) as u32;

        fb.put_u32(x, y, mins, style);
        let x = x + count_digits(mins);
        fb.put_char(x, y, ':', style);
        if secs < 10 {
            fb.put_char(x + 1, y, '0', style);
            fb.put_u32(x + 2, y, secs, style);
        } else {
            fb.put_u32(x + 1, y, secs, style);
        }
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, start_x: u16, start_y: u16) {
        let (frame_w, frame_h) = self.frame_size();
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        let mid_y = start_y.saturating_add(frame_h / 2);

        fb.put_str_centered(start_x, frame_w, mid_y.saturating_sub(1), " GAME OVER ", style);

        let label = " score ";
        let w = label.len() as u16 + count_digits(snap.score) + 1;
        let x = start_x + frame_w.saturating_sub(w) / 2;
        fb.fill_rect(x, mid_y, w, 1, ' ', style);
        fb.put_str(x, mid_y, label, style);
        fb.put_u32(x + label.len() as u16, mid_y, snap.score, style);

        fb.put_str_centered(start_x, frame_w, mid_y + 1, " Enter: menu ", style);
    }
}

/// `(background, foreground)` for a tile value.
pub fn tile_colors(value: u32) -> (Rgb, Rgb) {
    let bg = match value {
        2 => Rgb::new(238, 228, 218),
        4 => Rgb::new(237, 224, 200),
        8 => Rgb::new(242, 177, 121),
        16 => Rgb::new(245, 149, 99),
        32 => Rgb::new(246, 124, 95),
        64 => Rgb::new(246, 94, 59),
        128 => Rgb::new(237, 207, 114),
        256 => Rgb::new(237, 204, 97),
        512 => Rgb::new(237, 200, 80),
        1024 => Rgb::new(237, 197, 63),
        2048 => Rgb::new(237, 194, 46),
        _ => BIG_TILE,
    };
    let fg = if value <= 4 { DARK_TEXT } else { LIGHT_TEXT };
    (bg, fg)
}

fn count_digits(mut n: u32) -> u16 {
    let mut d = 1;
    while n >= 10 {
        n /= 10;
        d += 1;
    }
    d
}
