use crate::board::{check_completion, Board};
use crate::error::PuzzleError;
use crate::piece::{EncodedImage, PieceId, PuzzlePiece};
use crate::processor::{ImageProcessor, ProcessedImage};
use crate::tray::Tray;
use crate::PIECE_COUNT;
use serde::{Deserialize, Serialize};

/// Where a piece is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    /// A board slot, row-major 0..9
    Slot(usize),
    /// Back to the pool of unplaced pieces
    Tray,
}

/// Result of a placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveOutcome {
    /// The board is solved after this move
    pub completed: bool,
    /// Piece pushed out of the destination slot into the tray
    pub displaced: Option<PieceId>,
}

/// Serializable snapshot of a session, without image data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub image_uploaded: bool,
    pub started: bool,
    pub complete: bool,
    pub board: Vec<Option<PieceId>>,
    pub tray: Vec<PieceId>,
}

/// Authoritative game state: uploaded image, tray, board and started flag
///
/// Every piece id lives in exactly one of `tray` and `board` once an image
/// has been processed.
#[derive(Debug, Clone, Default)]
pub struct GameSession {
    image_uploaded: bool,
    preview: Option<EncodedImage>,
    tray: Tray,
    board: Board,
    started: bool,
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process `bytes` and, on success, seed preview and tray
    ///
    /// On failure nothing changes.
    pub fn upload_image(&mut self, processor: &ImageProcessor, bytes: &[u8]) -> Result<(), PuzzleError> {
        let processed = processor.process(bytes)?;
        self.apply_processed(processed);
        Ok(())
    }

    /// Commit a processed image: all pieces to the tray, board emptied
    pub fn apply_processed(&mut self, processed: ProcessedImage) {
        self.image_uploaded = true;
        self.preview = Some(processed.preview);
        self.board.clear();
        self.tray.replace_all(processed.pieces);
        tracing::debug!(pieces = self.tray.len(), "seeded tray from upload");
    }

    /// Whether the start control should be enabled
    pub fn can_start(&self) -> bool {
        self.image_uploaded
    }

    /// Enter play. Callers gate this on [`GameSession::can_start`].
    pub fn start_game(&mut self) {
        self.started = true;
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn preview(&self) -> Option<&EncodedImage> {
        self.preview.as_ref()
    }

    pub fn tray(&self) -> &Tray {
        &self.tray
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn is_complete(&self) -> bool {
        check_completion(&self.board)
    }

    /// Look a piece up wherever it currently is
    pub fn piece(&self, id: PieceId) -> Option<&PuzzlePiece> {
        self.tray
            .get(id)
            .or_else(|| self.board.position_of(id).and_then(|slot| self.board.get(slot)))
    }

    /// Current location of a piece
    pub fn locate(&self, id: PieceId) -> Option<Destination> {
        if self.tray.contains(id) {
            return Some(Destination::Tray);
        }
        self.board.position_of(id).map(Destination::Slot)
    }

    /// Move a piece to a board slot or back to the tray
    ///
    /// Placing into an occupied slot displaces the occupant into the tray.
    /// Placing a piece onto the slot it already occupies changes nothing.
    /// Every placement checks completion before returning; moves to the tray
    /// never complete the puzzle.
    pub fn move_piece(&mut self, id: PieceId, destination: Destination) -> Result<MoveOutcome, PuzzleError> {
        match destination {
            Destination::Slot(slot) => self.place(id, slot),
            Destination::Tray => {
                self.return_to_tray(id)?;
                Ok(MoveOutcome::default())
            }
        }
    }

    fn place(&mut self, id: PieceId, slot: usize) -> Result<MoveOutcome, PuzzleError> {
        if slot >= PIECE_COUNT {
            return Err(PuzzleError::MalformedMove(format!("slot {} is outside the board", slot)));
        }

        if self.board.get(slot).map(PuzzlePiece::id) == Some(id) {
            return Ok(MoveOutcome {
                completed: check_completion(&self.board),
                displaced: None,
            });
        }

        let piece = match self.tray.remove(id) {
            Some(piece) => piece,
            None => self
                .board
                .position_of(id)
                .and_then(|from| self.board.take(from))
                .ok_or_else(|| Self::unknown_piece(id))?,
        };

        let displaced = self.board.put(slot, piece).map(|previous| {
            let previous_id = previous.id();
            self.tray.insert(previous);
            previous_id
        });

        let completed = check_completion(&self.board);
        tracing::debug!(piece = %id, slot, ?displaced, completed, "placed piece");

        Ok(MoveOutcome { completed, displaced })
    }

    fn return_to_tray(&mut self, id: PieceId) -> Result<(), PuzzleError> {
        if let Some(piece) = self.board.position_of(id).and_then(|slot| self.board.take(slot)) {
            self.tray.insert(piece);
            tracing::debug!(piece = %id, "returned piece to tray");
            return Ok(());
        }
        if self.tray.contains(id) {
            Ok(())
        } else {
            Err(Self::unknown_piece(id))
        }
    }

    /// Take whatever sits in `slot` back to the tray (click to unplace)
    ///
    /// Removal cannot complete the puzzle, so no completion check runs.
    pub fn remove_from_slot(&mut self, slot: usize) -> Result<Option<PieceId>, PuzzleError> {
        if slot >= PIECE_COUNT {
            return Err(PuzzleError::MalformedMove(format!("slot {} is outside the board", slot)));
        }
        let Some(piece) = self.board.take(slot) else {
            return Ok(None);
        };
        let id = piece.id();
        self.tray.insert(piece);
        tracing::debug!(piece = %id, slot, "unplaced piece");
        Ok(Some(id))
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            image_uploaded: self.image_uploaded,
            started: self.started,
            complete: self.is_complete(),
            board: self.board.slots().iter().map(|slot| slot.as_ref().map(PuzzlePiece::id)).collect(),
            tray: self.tray.ids().collect(),
        }
    }

    fn unknown_piece(id: PieceId) -> PuzzleError {
        PuzzleError::MalformedMove(format!("piece {} is not in play", id))
    }
}
