use crate::piece::{PieceId, PuzzlePiece};

/// Pieces not currently on the board
///
/// The collection is unordered as far as the game is concerned; display
/// order lives in [`crate::TrayView`]. `revision` changes exactly when the
/// contents change, which is what the view keys its shuffle on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tray {
    pieces: Vec<PuzzlePiece>,
    revision: u64,
}

impl Tray {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn contains(&self, id: PieceId) -> bool {
        self.pieces.iter().any(|piece| piece.id() == id)
    }

    pub fn get(&self, id: PieceId) -> Option<&PuzzlePiece> {
        self.pieces.iter().find(|piece| piece.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PuzzlePiece> {
        self.pieces.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = PieceId> + '_ {
        self.pieces.iter().map(PuzzlePiece::id)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Add `piece` unless a piece with the same id is already here
    pub(crate) fn insert(&mut self, piece: PuzzlePiece) -> bool {
        if self.contains(piece.id()) {
            return false;
        }
        self.pieces.push(piece);
        self.bump();
        true
    }

    pub(crate) fn remove(&mut self, id: PieceId) -> Option<PuzzlePiece> {
        let index = self.pieces.iter().position(|piece| piece.id() == id)?;
        self.bump();
        Some(self.pieces.remove(index))
    }

    /// Replace the whole collection, dropping duplicate ids
    pub(crate) fn replace_all(&mut self, pieces: Vec<PuzzlePiece>) {
        self.pieces.clear();
        for piece in pieces {
            if !self.contains(piece.id()) {
                self.pieces.push(piece);
            }
        }
        self.bump();
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::EncodedImage;

    fn piece(id: usize) -> PuzzlePiece {
        PuzzlePiece::new(PieceId::new(id).unwrap(), EncodedImage::from_png(Vec::new(), 0, 0))
    }

    #[test]
    fn test_insert_dedupes_by_id() {
        let mut tray = Tray::new();
        assert!(tray.insert(piece(1)));
        let revision = tray.revision();
        assert!(!tray.insert(piece(1)));
        assert_eq!(tray.len(), 1);
        assert_eq!(tray.revision(), revision);
    }

    #[test]
    fn test_remove_missing_keeps_revision() {
        let mut tray = Tray::new();
        tray.insert(piece(2));
        let revision = tray.revision();
        assert!(tray.remove(PieceId::new(5).unwrap()).is_none());
        assert_eq!(tray.revision(), revision);
        assert!(tray.remove(PieceId::new(2).unwrap()).is_some());
        assert_ne!(tray.revision(), revision);
        assert!(tray.is_empty());
    }

    #[test]
    fn test_replace_all_drops_duplicates() {
        let mut tray = Tray::new();
        tray.replace_all(vec![piece(0), piece(1), piece(0)]);
        assert_eq!(tray.len(), 2);
        assert!(tray.contains(PieceId::new(1).unwrap()));
    }
}
