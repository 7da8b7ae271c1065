//! Core engine for the picture puzzle game
//!
//! An uploaded image is cropped to a fixed portrait ratio and cut into a
//! 3×3 grid of pieces. The player moves pieces between an unordered tray and
//! a nine-slot board until every piece sits in its home slot.
//!
//! Front ends (browser canvas, terminal) drive everything through
//! [`Orchestrator`], which funnels pointer, touch and keyboard gestures into
//! the single [`GameSession::move_piece`] operation.

mod board;
mod error;
pub mod geometry;
mod orchestrator;
mod payload;
mod piece;
mod processor;
mod session;
mod shuffle;
mod tray;
mod view;

pub use board::{check_completion, Board};
pub use error::PuzzleError;
pub use geometry::{GridLayout, PixelRect, Rect};
pub use orchestrator::{DragOrigin, DragState, GestureEffect, InputDevice, Orchestrator, Surface, Target};
pub use payload::{DragPayload, DRAG_PAYLOAD_MIME};
pub use piece::{EncodedImage, GridPos, PieceId, PuzzlePiece};
pub use processor::{ImageProcessor, ProcessedImage, ProcessorConfig};
pub use session::{Destination, GameSession, MoveOutcome, SessionSummary};
pub use tray::Tray;
pub use view::TrayView;

/// Pieces per board edge
pub const GRID_SIZE: usize = 3;

/// Total number of pieces (and board slots)
pub const PIECE_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Width of the cropped puzzle canvas in pixels
pub const TARGET_WIDTH: u32 = 520;

/// Height of the cropped puzzle canvas in pixels
pub const TARGET_HEIGHT: u32 = 940;
