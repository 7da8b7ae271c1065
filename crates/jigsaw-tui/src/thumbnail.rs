//! Half-block thumbnails
//!
//! Each terminal cell shows two stacked pixels: the upper one as the
//! foreground of `▀`, the lower one as the background.

use crossterm::style::Color;
use image::imageops::{self, FilterType};
use jigsaw_core::{EncodedImage, PieceId, ProcessedImage, PuzzleError, PIECE_COUNT};

pub const UPPER_HALF: char = '▀';

#[derive(Debug, Clone, PartialEq)]
pub struct Thumbnail {
    cols: u16,
    rows: u16,
    /// (upper, lower) per cell, row-major
    cells: Vec<(Color, Color)>,
}

impl Thumbnail {
    /// Scale `image` to `cols × rows` terminal cells
    pub fn from_image(image: &EncodedImage, cols: u16, rows: u16) -> Result<Self, PuzzleError> {
        if cols == 0 || rows == 0 {
            return Err(PuzzleError::Dimensions);
        }
        let pixels = image.decode()?;
        let scaled = imageops::resize(&pixels, cols as u32, rows as u32 * 2, FilterType::Triangle);

        let mut cells = Vec::with_capacity(cols as usize * rows as usize);
        for row in 0..rows as u32 {
            for col in 0..cols as u32 {
                let upper = scaled.get_pixel(col, row * 2);
                let lower = scaled.get_pixel(col, row * 2 + 1);
                cells.push((to_color(upper.0), to_color(lower.0)));
            }
        }
        Ok(Self { cols, rows, cells })
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Colors of the cell at (`col`, `row`)
    pub fn cell(&self, col: u16, row: u16) -> Option<(Color, Color)> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells.get(row as usize * self.cols as usize + col as usize).copied()
    }
}

fn to_color([r, g, b, _]: [u8; 4]) -> Color {
    Color::Rgb { r, g, b }
}

/// Thumbnails for one upload, pre-scaled to every size the screen uses
#[derive(Debug, Clone)]
pub struct Thumbnails {
    pub preview: Thumbnail,
    board: Vec<Thumbnail>,
    tray: Vec<Thumbnail>,
}

impl Thumbnails {
    pub fn build(
        processed: &ProcessedImage,
        preview_size: (u16, u16),
        board_size: (u16, u16),
        tray_size: (u16, u16),
    ) -> Result<Self, PuzzleError> {
        let preview = Thumbnail::from_image(&processed.preview, preview_size.0, preview_size.1)?;
        let mut board = Vec::with_capacity(PIECE_COUNT);
        let mut tray = Vec::with_capacity(PIECE_COUNT);
        for piece in &processed.pieces {
            board.push(Thumbnail::from_image(piece.image(), board_size.0, board_size.1)?);
            tray.push(Thumbnail::from_image(piece.image(), tray_size.0, tray_size.1)?);
        }
        Ok(Self { preview, board, tray })
    }

    /// Piece at board-slot size
    pub fn board(&self, id: PieceId) -> Option<&Thumbnail> {
        self.board.get(id.index())
    }

    /// Piece at tray-cell size
    pub fn tray(&self, id: PieceId) -> Option<&Thumbnail> {
        self.tray.get(id.index())
    }
}
