use crate::piece::{PieceId, PuzzlePiece};
use crate::PIECE_COUNT;

/// The nine target slots, row-major
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    slots: [Option<PuzzlePiece>; PIECE_COUNT],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Piece in `slot`, if any. Out-of-range slots are empty.
    pub fn get(&self, slot: usize) -> Option<&PuzzlePiece> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    pub fn slots(&self) -> &[Option<PuzzlePiece>] {
        &self.slots
    }

    /// Slot currently holding `id`
    pub fn position_of(&self, id: PieceId) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|piece| piece.id() == id))
    }

    pub fn placed_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.placed_count() == 0
    }

    /// Number of pieces already sitting in their home slot
    pub fn correct_count(&self) -> usize {
        self.slots
            .iter()
            .enumerate()
            .filter(|(slot, piece)| piece.as_ref().is_some_and(|p| p.belongs_at(*slot)))
            .count()
    }

    pub fn is_complete(&self) -> bool {
        check_completion(self)
    }

    pub(crate) fn take(&mut self, slot: usize) -> Option<PuzzlePiece> {
        self.slots.get_mut(slot).and_then(Option::take)
    }

    /// Put `piece` into `slot`, handing back the previous occupant
    pub(crate) fn put(&mut self, slot: usize, piece: PuzzlePiece) -> Option<PuzzlePiece> {
        self.slots[slot].replace(piece)
    }

    pub(crate) fn clear(&mut self) {
        self.slots = Default::default();
    }
}

/// Whether every slot holds the piece whose home is that slot
pub fn check_completion(board: &Board) -> bool {
    board
        .slots
        .iter()
        .enumerate()
        .all(|(slot, piece)| piece.as_ref().is_some_and(|p| p.belongs_at(slot)))
}
