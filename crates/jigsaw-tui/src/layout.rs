//! Terminal-cell layout
//!
//! Positions are in terminal cells. Mouse events land at the center of the
//! cell they report, so any move to a neighbouring cell clears the slop.

use jigsaw_core::{GridLayout, Surface};

/// Board slot size in cells; two pixels per row keeps the 520×940 ratio
pub const SLOT_SIZE: (u16, u16) = (10, 9);
pub const TRAY_CELL_SIZE: (u16, u16) = (6, 5);
pub const PREVIEW_SIZE: (u16, u16) = (15, 14);

/// Space between cells; cursor outlines are drawn in it
pub const GAP: u16 = 1;
pub const DRAG_SLOP: f64 = 0.5;

const HEADER_ROWS: u16 = 3;
const PANEL_GAP: u16 = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenLayout {
    pub preview: (u16, u16),
    pub board: GridLayout,
    pub tray: GridLayout,
    pub info: (u16, u16),
    pub controls_y: u16,
}

impl ScreenLayout {
    pub fn compute(term_width: u16, term_height: u16) -> Self {
        let board_width = grid_extent(SLOT_SIZE.0);
        let board_height = grid_extent(SLOT_SIZE.1);
        let tray_width = grid_extent(TRAY_CELL_SIZE.0);
        let total_width = PREVIEW_SIZE.0 + PANEL_GAP + board_width + PANEL_GAP + tray_width;

        let start_x = if term_width > total_width + 2 {
            (term_width - total_width) / 2
        } else {
            1
        };
        let start_y = if term_height > board_height + HEADER_ROWS + 6 {
            HEADER_ROWS
        } else {
            1
        };

        let board_x = start_x + PREVIEW_SIZE.0 + PANEL_GAP;
        let tray_x = board_x + board_width + PANEL_GAP;

        Self {
            preview: (start_x, start_y),
            board: square(board_x, start_y, SLOT_SIZE),
            tray: square(tray_x, start_y, TRAY_CELL_SIZE),
            info: (tray_x, start_y + grid_extent(TRAY_CELL_SIZE.1) + 2),
            controls_y: start_y + board_height + 2,
        }
    }

    pub fn surface(&self) -> Surface {
        Surface::new(self.board, self.tray, DRAG_SLOP)
    }

    /// Top-left terminal cell of board slot `slot`
    pub fn slot_origin(&self, slot: usize) -> Option<(u16, u16)> {
        cell_origin(&self.board, slot)
    }

    pub fn tray_origin(&self, index: usize) -> Option<(u16, u16)> {
        cell_origin(&self.tray, index)
    }
}

/// Where a mouse event at (`column`, `row`) lands in surface coordinates
pub fn mouse_point(column: u16, row: u16) -> (f64, f64) {
    (column as f64 + 0.5, row as f64 + 0.5)
}

fn grid_extent(cell: u16) -> u16 {
    cell * 3 + GAP * 2
}

fn square(x: u16, y: u16, (width, height): (u16, u16)) -> GridLayout {
    GridLayout::square(x as f64, y as f64, width as f64, height as f64, GAP as f64)
}

fn cell_origin(grid: &GridLayout, index: usize) -> Option<(u16, u16)> {
    grid.cell_rect(index).map(|rect| (rect.x as u16, rect.y as u16))
}
