//! Where preview, board and tray sit on the canvas
//!
//! Drawing and hit-testing both read the same [`ScreenLayout`], so a piece
//! is always dropped where it looks like it is being dropped.

use jigsaw_core::geometry::{GridLayout, Rect};
use jigsaw_core::{Surface, TARGET_HEIGHT, TARGET_WIDTH};

/// Pointer travel before a press turns into a drag, in logical pixels
pub const DRAG_SLOP: f64 = 4.0;

/// Height of the title strip
pub const HEADER_HEIGHT: f64 = 56.0;

const MARGIN: f64 = 24.0;
const BOARD_GAP: f64 = 2.0;
const TRAY_GAP: f64 = 8.0;
/// Preview and tray widths relative to the board
const PREVIEW_SCALE: f64 = 0.5;
const TRAY_SCALE: f64 = 0.75;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenLayout {
    pub preview: Rect,
    pub board: GridLayout,
    pub tray: GridLayout,
}

impl ScreenLayout {
    /// Lay out the three panels left to right on a `width × height` canvas
    pub fn compute(width: u32, height: u32) -> Self {
        let ratio = TARGET_WIDTH as f64 / TARGET_HEIGHT as f64;
        let avail_w = (width as f64 - MARGIN * 4.0).max(1.0);
        let avail_h = (height as f64 - HEADER_HEIGHT - MARGIN * 2.0).max(1.0);

        let board_w = (avail_h * ratio).min((avail_w - 2.0 * TRAY_GAP).max(1.0) / (1.0 + PREVIEW_SCALE + TRAY_SCALE));
        let board_h = board_w / ratio;
        let top = HEADER_HEIGHT + MARGIN;

        let preview = Rect::new(MARGIN, top, board_w * PREVIEW_SCALE, board_h * PREVIEW_SCALE);

        let board_x = preview.x + preview.width + MARGIN;
        let cell_w = (board_w - 2.0 * BOARD_GAP) / 3.0;
        let cell_h = (board_h - 2.0 * BOARD_GAP) / 3.0;
        let board = GridLayout::square(board_x, top, cell_w, cell_h, BOARD_GAP);

        let tray_x = board_x + board.width() + MARGIN;
        let tray = GridLayout::square(tray_x, top, cell_w * TRAY_SCALE, cell_h * TRAY_SCALE, TRAY_GAP);

        Self { preview, board, tray }
    }

    pub fn surface(&self) -> Surface {
        Surface::new(self.board, self.tray, DRAG_SLOP)
    }

    /// Size of a piece while it follows the pointer
    pub fn drag_size(&self) -> (f64, f64) {
        (self.tray.cell_width, self.tray.cell_height)
    }
}
