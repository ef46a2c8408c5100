//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). The two hidden buffer rows at the top of the
//! grid are never drawn; the frame shows rows 2..22 only.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Coord, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, HIDDEN_ROWS, VISIBLE_HEIGHT};

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Where the board frame landed inside the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLayout {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

/// A lightweight terminal view of the game.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Frame position for a viewport
    pub fn layout(&self, viewport: Viewport) -> FrameLayout {
        let width = (BOARD_WIDTH as u16) * self.cell_w + 2;
        let height = (VISIBLE_HEIGHT as u16) * self.cell_h + 2;
        let x = viewport.width.saturating_sub(width) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(height) / 2,
            AnchorY::Top => 0,
        };
        FrameLayout {
            x,
            y,
            width,
            height,
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let frame = self.layout(viewport);
        let inner_w = frame.width - 2;
        let inner_h = frame.height - 2;

        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            inner_w,
            inner_h,
            ' ',
            CellStyle::new(Rgb::new(80, 80, 90), PLAY_BG),
        );
        draw_border(fb, &frame, CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG));

        for y in HIDDEN_ROWS..BOARD_HEIGHT {
            for x in 0..BOARD_WIDTH {
                match snap.board[y as usize][x as usize] {
                    Some(kind) => self.draw_block(fb, &frame, (x as i8, y as i8), kind),
                    None => self.fill_cell(
                        fb,
                        &frame,
                        (x as i8, y as i8),
                        '·',
                        CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim(),
                    ),
                }
            }
        }

        if let Some(ghost) = snap.ghost_cells() {
            let style = CellStyle::new(Rgb::new(140, 140, 140), PLAY_BG).dim();
            for coord in ghost {
                self.fill_cell(fb, &frame, coord, '░', style);
            }
        }

        if let Some(active) = snap.active {
            for coord in active.cells {
                self.draw_block(fb, &frame, coord, active.kind);
            }
        }

        self.draw_side_panel(fb, snap, viewport, &frame);

        if snap.game_over {
            draw_overlay_text(fb, &frame, "GAME OVER");
        } else if snap.paused() {
            draw_overlay_text(fb, &frame, "PAUSED");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: &FrameLayout, coord: Coord, kind: PieceKind) {
        let style = CellStyle::new(kind.color().into(), PLAY_BG).bold();
        self.fill_cell(fb, frame, coord, '█', style);
    }

    /// Paint one grid cell; cells in the hidden rows or off the grid are skipped
    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        frame: &FrameLayout,
        (x, y): Coord,
        ch: char,
        style: CellStyle,
    ) {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < HIDDEN_ROWS as i8 || y >= BOARD_HEIGHT as i8 {
            return;
        }
        let px = frame.x + 1 + (x as u16) * self.cell_w;
        let py = frame.y + 1 + ((y - HIDDEN_ROWS as i8) as u16) * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: &FrameLayout,
    ) {
        let panel_x = frame.x.saturating_add(frame.width).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 8 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = frame.y;
        for (title, number) in [
            ("SCORE", snap.score),
            ("COMBO", snap.combo),
            ("DELAY", snap.clock.delay_ms),
        ] {
            fb.put_str(panel_x, y, title, label);
            fb.put_u32(panel_x, y + 1, number, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "HOLD", label);
        let hold_style = if snap.can_hold { value } else { value.dim() };
        fb.put_str(panel_x, y + 1, snap.hold.map(|k| k.as_str()).unwrap_or("-"), hold_style);
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "NEXT", label);
        for (i, kind) in snap.next_queue.iter().enumerate() {
            let row = y + 1 + i as u16;
            if row >= viewport.height {
                break;
            }
            let style = CellStyle::new(kind.color().into(), PANEL_BG).bold();
            fb.put_str(panel_x, row, kind.as_str(), style);
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, frame: &FrameLayout, style: CellStyle) {
    let FrameLayout { x, y, width: w, height: h } = *frame;
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

fn draw_overlay_text(fb: &mut FrameBuffer, frame: &FrameLayout, text: &str) {
    let mid_y = frame.y.saturating_add(frame.height / 2);
    let text_w = text.chars().count() as u16;
    let x = frame.x.saturating_add(frame.width.saturating_sub(text_w) / 2);
    let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
    fb.put_str(x, mid_y, text, style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Game;

    #[test]
    fn test_frame_covers_visible_rows_only() {
        let view = GameView::default();
        let frame = view.layout(Viewport::new(80, 30));
        assert_eq!(frame.width, 22);
        assert_eq!(frame.height, 22);
        assert_eq!(frame.x, 29);
        assert_eq!(frame.y, 4);
    }

    #[test]
    fn test_small_viewport_does_not_panic() {
        let snap = Game::with_seed(1).snapshot();
        let fb = GameView::default().render(&snap, Viewport::new(5, 3));
        assert_eq!(fb.width(), 5);
    }
}
