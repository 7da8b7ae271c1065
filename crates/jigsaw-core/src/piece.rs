use crate::error::PuzzleError;
use crate::{GRID_SIZE, PIECE_COUNT};
use image::{ImageFormat, RgbaImage};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Identifier of a piece: `row * 3 + column` of its home cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PieceId(u8);

impl PieceId {
    /// Create an id, or `None` when `index` is not a board slot
    pub fn new(index: usize) -> Option<Self> {
        (index < PIECE_COUNT).then_some(Self(index as u8))
    }

    /// All ids in row-major order
    pub fn all() -> impl Iterator<Item = PieceId> {
        (0..PIECE_COUNT as u8).map(PieceId)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Home cell of this piece
    pub fn home(self) -> GridPos {
        GridPos::new(self.index() % GRID_SIZE, self.index() / GRID_SIZE)
    }
}

impl TryFrom<u8> for PieceId {
    type Error = PuzzleError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        PieceId::new(value as usize)
            .ok_or_else(|| PuzzleError::MalformedMove(format!("piece id {} out of range", value)))
    }
}

impl From<PieceId> for u8 {
    fn from(id: PieceId) -> Self {
        id.0
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A cell of the 3×3 grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub column: usize,
    pub row: usize,
}

impl GridPos {
    pub const fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }

    /// Cell addressed by a row-major slot index
    pub fn from_slot(slot: usize) -> Option<Self> {
        (slot < PIECE_COUNT).then_some(Self::new(slot % GRID_SIZE, slot / GRID_SIZE))
    }

    /// Row-major slot index of this cell
    pub fn slot(&self) -> usize {
        self.row * GRID_SIZE + self.column
    }
}

/// A PNG-encoded raster, cheap to clone
#[derive(Clone, PartialEq, Eq)]
pub struct EncodedImage {
    bytes: Arc<[u8]>,
    width: u32,
    height: u32,
}

impl EncodedImage {
    pub const MIME: &'static str = "image/png";

    /// Wrap already-encoded PNG bytes of the given size
    pub fn from_png(bytes: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            bytes: bytes.into(),
            width,
            height,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Decode back into RGBA pixels
    pub fn decode(&self) -> Result<RgbaImage, PuzzleError> {
        image::load_from_memory_with_format(&self.bytes, ImageFormat::Png)
            .map(|image| image.to_rgba8())
            .map_err(|err| PuzzleError::Decode(err.to_string()))
    }
}

impl fmt::Debug for EncodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// One slice of the puzzle image together with its home cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzlePiece {
    id: PieceId,
    correct: GridPos,
    image: EncodedImage,
}

impl PuzzlePiece {
    pub fn new(id: PieceId, image: EncodedImage) -> Self {
        Self {
            id,
            correct: id.home(),
            image,
        }
    }

    pub fn id(&self) -> PieceId {
        self.id
    }

    pub fn correct(&self) -> GridPos {
        self.correct
    }

    pub fn correct_column(&self) -> usize {
        self.correct.column
    }

    pub fn correct_row(&self) -> usize {
        self.correct.row
    }

    pub fn image(&self) -> &EncodedImage {
        &self.image
    }

    /// Whether `slot` is this piece's home
    pub fn belongs_at(&self, slot: usize) -> bool {
        self.correct.column == slot % GRID_SIZE && self.correct.row == slot / GRID_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_id_range() {
        assert!(PieceId::new(0).is_some());
        assert!(PieceId::new(8).is_some());
        assert!(PieceId::new(9).is_none());
        assert_eq!(PieceId::all().count(), PIECE_COUNT);
    }

    #[test]
    fn test_piece_id_matches_home() {
        for id in PieceId::all() {
            let home = id.home();
            assert_eq!(id.index(), home.row * 3 + home.column);
            assert_eq!(home.slot(), id.index());
        }
        assert_eq!(PieceId::new(5).unwrap().home(), GridPos::new(2, 1));
    }

    #[test]
    fn test_grid_pos_from_slot() {
        assert_eq!(GridPos::from_slot(7), Some(GridPos::new(1, 2)));
        assert_eq!(GridPos::from_slot(9), None);
    }

    #[test]
    fn test_piece_id_serde_rejects_out_of_range() {
        let id: PieceId = serde_json::from_str("4").unwrap();
        assert_eq!(id.index(), 4);
        assert!(serde_json::from_str::<PieceId>("9").is_err());
        assert!(serde_json::from_str::<PieceId>("-1").is_err());
    }

    #[test]
    fn test_belongs_at() {
        let piece = PuzzlePiece::new(PieceId::new(3).unwrap(), EncodedImage::from_png(Vec::new(), 0, 0));
        assert_eq!(piece.correct_column(), 0);
        assert_eq!(piece.correct_row(), 1);
        assert!(piece.belongs_at(3));
        assert!(!piece.belongs_at(1));
    }
}
