//! Gesture handling
//!
//! Pointer, touch and keyboard input all end in [`GameSession::move_piece`].
//! The adapters here only decide *which* piece and *which* destination; the
//! session decides what that means for board and tray.

use crate::error::PuzzleError;
use crate::geometry::GridLayout;
use crate::payload::DragPayload;
use crate::piece::PieceId;
use crate::processor::{ImageProcessor, ProcessedImage};
use crate::session::{Destination, GameSession, MoveOutcome};
use crate::view::TrayView;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputDevice {
    Pointer,
    Touch,
    Keyboard,
}

/// Where a dragged piece was picked up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragOrigin {
    Tray,
    Slot(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Pointer pressed on a piece but not yet moved past the slop radius
    Pending {
        piece: PieceId,
        origin: DragOrigin,
        start_x: f64,
        start_y: f64,
    },
    Dragging {
        piece: PieceId,
        origin: DragOrigin,
        device: InputDevice,
        x: f64,
        y: f64,
    },
}

/// Screen geometry a front end hands to the gesture adapters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub board: GridLayout,
    pub tray: GridLayout,
    /// Distance a pressed pointer must travel before a press becomes a drag
    pub slop: f64,
}

/// What sits under a point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Slot(usize),
    TrayCell(usize),
    Outside,
}

impl Surface {
    pub fn new(board: GridLayout, tray: GridLayout, slop: f64) -> Self {
        Self { board, tray, slop }
    }

    pub fn target_at(&self, x: f64, y: f64) -> Target {
        if let Some(slot) = self.board.hit_test(x, y) {
            Target::Slot(slot)
        } else if let Some(cell) = self.tray.hit_test(x, y) {
            Target::TrayCell(cell)
        } else {
            Target::Outside
        }
    }

    fn in_tray_area(&self, x: f64, y: f64) -> bool {
        self.tray.bounds().contains(x, y)
    }
}

/// Visible result of a gesture, for the front end to react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEffect {
    None,
    Lifted(PieceId),
    Placed {
        piece: PieceId,
        slot: usize,
        outcome: MoveOutcome,
    },
    Returned(PieceId),
    Unplaced {
        piece: PieceId,
        slot: usize,
    },
    /// The gesture named something invalid; nothing changed
    Rejected,
}

impl GestureEffect {
    /// Whether the front end should announce a solved puzzle
    pub fn completed(&self) -> bool {
        matches!(self, GestureEffect::Placed { outcome, .. } if outcome.completed)
    }
}

/// Owns the session and translates gestures into moves
#[derive(Debug, Clone, Default)]
pub struct Orchestrator {
    session: GameSession,
    tray_view: TrayView,
    drag: DragState,
    highlight: Option<usize>,
}

impl Orchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tray_view(tray_view: TrayView) -> Self {
        Self {
            tray_view,
            ..Self::default()
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Board slot under the dragged piece, if any
    pub fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    pub fn dragged_piece(&self) -> Option<PieceId> {
        match self.drag {
            DragState::Dragging { piece, .. } => Some(piece),
            _ => None,
        }
    }

    pub fn drag_position(&self) -> Option<(f64, f64)> {
        match self.drag {
            DragState::Dragging { x, y, .. } => Some((x, y)),
            _ => None,
        }
    }

    /// Tray piece ids in display order
    pub fn tray_order(&mut self) -> &[PieceId] {
        self.tray_view.order(self.session.tray())
    }

    pub fn upload_image(&mut self, processor: &ImageProcessor, bytes: &[u8]) -> Result<(), PuzzleError> {
        self.session.upload_image(processor, bytes)?;
        self.reset_gesture();
        Ok(())
    }

    pub fn apply_processed(&mut self, processed: ProcessedImage) {
        self.session.apply_processed(processed);
        self.reset_gesture();
    }

    pub fn start_game(&mut self) {
        self.session.start_game();
    }

    /// The canonical move; every adapter below ends here
    pub fn move_piece(&mut self, piece: PieceId, destination: Destination) -> Result<MoveOutcome, PuzzleError> {
        self.session.move_piece(piece, destination)
    }

    /// Piece shown at `target`
    pub fn piece_at(&mut self, target: Target) -> Option<PieceId> {
        match target {
            Target::Slot(slot) => self.session.board().get(slot).map(|piece| piece.id()),
            Target::TrayCell(cell) => self.tray_view.piece_at(self.session.tray(), cell),
            Target::Outside => None,
        }
    }

    /// Where the held piece came from, and which device holds it
    pub fn drag_source(&self) -> Option<(DragOrigin, InputDevice)> {
        match self.drag {
            DragState::Dragging { origin, device, .. } => Some((origin, device)),
            _ => None,
        }
    }

    /// Pick a piece up
    ///
    /// A piece lifted off the board goes back to the tray straight away, so
    /// the drop only ever has to place it.
    pub fn begin_drag(&mut self, piece: PieceId, device: InputDevice, x: f64, y: f64) -> GestureEffect {
        self.reset_gesture();

        let origin = match self.session.locate(piece) {
            Some(Destination::Tray) => DragOrigin::Tray,
            Some(Destination::Slot(slot)) => DragOrigin::Slot(slot),
            None => {
                tracing::warn!(%piece, "drag started on a piece that is not in play");
                return GestureEffect::Rejected;
            }
        };

        if let DragOrigin::Slot(_) = origin {
            if let Err(err) = self.session.move_piece(piece, Destination::Tray) {
                tracing::warn!(%err, "could not detach piece");
                return GestureEffect::Rejected;
            }
        }

        tracing::debug!(%piece, ?origin, ?device, "drag started");
        self.drag = DragState::Dragging {
            piece,
            origin,
            device,
            x,
            y,
        };
        GestureEffect::Lifted(piece)
    }

    pub fn drag_to(&mut self, x: f64, y: f64) {
        if let DragState::Dragging { x: dx, y: dy, .. } = &mut self.drag {
            *dx = x;
            *dy = y;
        }
    }

    /// Dragged piece is over board slot `slot`
    pub fn drag_over(&mut self, slot: Option<usize>) {
        if self.dragged_piece().is_some() {
            self.highlight = slot;
        }
    }

    pub fn drag_leave(&mut self) {
        self.highlight = None;
    }

    /// Finish the current drag onto `slot`, or into the tray for `None`
    pub fn drop_at(&mut self, slot: Option<usize>) -> GestureEffect {
        let DragState::Dragging {
            piece, origin, device, ..
        } = std::mem::take(&mut self.drag)
        else {
            return GestureEffect::None;
        };
        self.highlight = None;
        tracing::debug!(%piece, ?origin, ?device, ?slot, "drag dropped");

        match slot {
            Some(slot) => self.place(piece, slot),
            None => self.return_to_tray(piece),
        }
    }

    /// Abandon the drag. A piece lifted from the board stays in the tray.
    pub fn cancel_drag(&mut self) -> GestureEffect {
        let effect = match self.drag {
            DragState::Dragging { piece, origin, device, .. } => {
                tracing::debug!(%piece, ?origin, ?device, "drag cancelled");
                GestureEffect::Returned(piece)
            }
            _ => GestureEffect::None,
        };
        self.reset_gesture();
        effect
    }

    pub fn pointer_down(&mut self, surface: &Surface, x: f64, y: f64) -> GestureEffect {
        if !self.session.is_started() {
            return GestureEffect::None;
        }
        let target = surface.target_at(x, y);
        let origin = match target {
            Target::Slot(slot) => DragOrigin::Slot(slot),
            Target::TrayCell(_) => DragOrigin::Tray,
            Target::Outside => return GestureEffect::None,
        };
        let Some(piece) = self.piece_at(target) else {
            return GestureEffect::None;
        };
        self.reset_gesture();
        self.drag = DragState::Pending {
            piece,
            origin,
            start_x: x,
            start_y: y,
        };
        GestureEffect::None
    }

    pub fn pointer_move(&mut self, surface: &Surface, x: f64, y: f64) -> GestureEffect {
        match self.drag {
            DragState::Pending {
                piece, start_x, start_y, ..
            } => {
                let distance = (x - start_x).hypot(y - start_y);
                if distance <= surface.slop {
                    return GestureEffect::None;
                }
                let effect = self.begin_drag(piece, InputDevice::Pointer, x, y);
                self.drag_over(surface.board.hit_test(x, y));
                effect
            }
            DragState::Dragging { .. } => {
                self.drag_to(x, y);
                self.drag_over(surface.board.hit_test(x, y));
                GestureEffect::None
            }
            DragState::Idle => GestureEffect::None,
        }
    }

    /// Release the pointer: a drop after a drag, a click otherwise
    pub fn pointer_up(&mut self, surface: &Surface, x: f64, y: f64) -> GestureEffect {
        match self.drag {
            DragState::Pending { origin, .. } => {
                self.reset_gesture();
                match origin {
                    DragOrigin::Slot(slot) => self.unplace(slot),
                    DragOrigin::Tray => GestureEffect::None,
                }
            }
            DragState::Dragging { .. } => {
                self.drag_to(x, y);
                self.drop_at(surface.board.hit_test(x, y))
            }
            DragState::Idle => GestureEffect::None,
        }
    }

    /// Touch has no click-to-unplace: touching any piece starts a drag
    pub fn touch_start(&mut self, surface: &Surface, x: f64, y: f64) -> GestureEffect {
        if !self.session.is_started() {
            return GestureEffect::None;
        }
        match self.piece_at(surface.target_at(x, y)) {
            Some(piece) => self.begin_drag(piece, InputDevice::Touch, x, y),
            None => GestureEffect::None,
        }
    }

    pub fn touch_move(&mut self, surface: &Surface, x: f64, y: f64) -> GestureEffect {
        if self.dragged_piece().is_some() {
            self.drag_to(x, y);
            self.drag_over(surface.board.hit_test(x, y));
        }
        GestureEffect::None
    }

    /// Release at the position of the lifted finger
    pub fn touch_end(&mut self, surface: &Surface, x: f64, y: f64) -> GestureEffect {
        if self.dragged_piece().is_none() {
            return GestureEffect::None;
        }
        self.drag_to(x, y);
        self.drop_at(surface.board.hit_test(x, y))
    }

    /// Handle a drop that carries a serialized [`DragPayload`]
    ///
    /// Over a board slot the piece is placed, over the tray it is returned,
    /// anywhere else nothing happens.
    pub fn drop_payload(&mut self, surface: &Surface, x: f64, y: f64, raw: &str) -> GestureEffect {
        if !self.session.is_started() {
            return GestureEffect::None;
        }
        let payload = match DragPayload::decode(raw) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(%err, "ignoring drop");
                return GestureEffect::Rejected;
            }
        };
        self.reset_gesture();

        if let Some(slot) = surface.board.hit_test(x, y) {
            self.place(payload.piece_id, slot)
        } else if surface.in_tray_area(x, y) {
            self.return_to_tray(payload.piece_id)
        } else {
            GestureEffect::None
        }
    }

    fn place(&mut self, piece: PieceId, slot: usize) -> GestureEffect {
        match self.session.move_piece(piece, Destination::Slot(slot)) {
            Ok(outcome) => GestureEffect::Placed { piece, slot, outcome },
            Err(err) => {
                tracing::warn!(%err, "placement rejected");
                GestureEffect::Rejected
            }
        }
    }

    fn return_to_tray(&mut self, piece: PieceId) -> GestureEffect {
        match self.session.move_piece(piece, Destination::Tray) {
            Ok(_) => GestureEffect::Returned(piece),
            Err(err) => {
                tracing::warn!(%err, "return to tray rejected");
                GestureEffect::Rejected
            }
        }
    }

    /// Send whatever sits in `slot` back to the tray
    pub fn unplace(&mut self, slot: usize) -> GestureEffect {
        match self.session.remove_from_slot(slot) {
            Ok(Some(piece)) => GestureEffect::Unplaced { piece, slot },
            Ok(None) => GestureEffect::None,
            Err(err) => {
                tracing::warn!(%err, "unplace rejected");
                GestureEffect::Rejected
            }
        }
    }

    fn reset_gesture(&mut self) {
        self.drag = DragState::Idle;
        self.highlight = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::{EncodedImage, PuzzlePiece};

    fn id(index: usize) -> PieceId {
        PieceId::new(index).unwrap()
    }

    fn surface() -> Surface {
        // board cells 10×10 at the origin, tray below it
        Surface::new(
            GridLayout::square(0.0, 0.0, 10.0, 10.0, 0.0),
            GridLayout::square(0.0, 100.0, 10.0, 10.0, 0.0),
            4.0,
        )
    }

    fn uploaded() -> Orchestrator {
        let mut orchestrator = Orchestrator::with_tray_view(TrayView::with_seed(1));
        orchestrator.apply_processed(ProcessedImage {
            preview: EncodedImage::from_png(Vec::new(), 0, 0),
            pieces: PieceId::all()
                .map(|id| PuzzlePiece::new(id, EncodedImage::from_png(Vec::new(), 0, 0)))
                .collect(),
        });
        orchestrator
    }

    fn started() -> Orchestrator {
        let mut orchestrator = uploaded();
        orchestrator.start_game();
        orchestrator
    }

    fn slot_center(slot: usize) -> (f64, f64) {
        surface().board.cell_rect(slot).unwrap().center()
    }

    #[test]
    fn test_gestures_ignored_before_start() {
        let mut orchestrator = Orchestrator::new();
        assert_eq!(orchestrator.pointer_down(&surface(), 5.0, 105.0), GestureEffect::None);
        assert_eq!(orchestrator.drag_state(), DragState::Idle);
    }

    #[test]
    fn test_payload_drop_ignored_before_start() {
        let mut orchestrator = uploaded();
        let (x, y) = slot_center(0);
        let raw = DragPayload::new(id(0)).encode();
        assert_eq!(orchestrator.drop_payload(&surface(), x, y, &raw), GestureEffect::None);
        assert!(orchestrator.session().board().is_empty());
        assert_eq!(orchestrator.session().tray().len(), 9);

        orchestrator.start_game();
        assert!(matches!(
            orchestrator.drop_payload(&surface(), x, y, &raw),
            GestureEffect::Placed { slot: 0, .. }
        ));
    }

    #[test]
    fn test_drag_source_tracks_origin_and_device() {
        let mut orchestrator = started();
        assert_eq!(orchestrator.drag_source(), None);
        orchestrator.move_piece(id(6), Destination::Slot(2)).unwrap();

        let (x, y) = slot_center(2);
        assert_eq!(orchestrator.touch_start(&surface(), x, y), GestureEffect::Lifted(id(6)));
        assert_eq!(orchestrator.drag_source(), Some((DragOrigin::Slot(2), InputDevice::Touch)));

        orchestrator.cancel_drag();
        assert_eq!(orchestrator.drag_source(), None);

        orchestrator.begin_drag(id(1), InputDevice::Keyboard, 0.0, 0.0);
        assert_eq!(orchestrator.drag_source(), Some((DragOrigin::Tray, InputDevice::Keyboard)));
    }

    #[test]
    fn test_small_pointer_motion_stays_pending() {
        let mut orchestrator = started();
        orchestrator.pointer_down(&surface(), 5.0, 105.0);
        orchestrator.pointer_move(&surface(), 7.0, 107.0);
        assert!(matches!(orchestrator.drag_state(), DragState::Pending { .. }));
        assert_eq!(orchestrator.pointer_up(&surface(), 7.0, 107.0), GestureEffect::None);
        assert_eq!(orchestrator.session().tray().len(), 9);
    }

    #[test]
    fn test_pointer_drag_places_piece() {
        let mut orchestrator = started();
        let piece = orchestrator.tray_order()[0];
        let (x, y) = slot_center(4);

        orchestrator.pointer_down(&surface(), 5.0, 105.0);
        assert_eq!(orchestrator.pointer_move(&surface(), x, y), GestureEffect::Lifted(piece));
        assert_eq!(orchestrator.highlight(), Some(4));

        let effect = orchestrator.pointer_up(&surface(), x, y);
        assert!(matches!(effect, GestureEffect::Placed { slot: 4, .. }));
        assert_eq!(orchestrator.session().board().get(4).map(|p| p.id()), Some(piece));
        assert_eq!(orchestrator.highlight(), None);
        assert_eq!(orchestrator.drag_state(), DragState::Idle);
    }

    #[test]
    fn test_click_on_board_unplaces() {
        let mut orchestrator = started();
        orchestrator.move_piece(id(3), Destination::Slot(0)).unwrap();
        let (x, y) = slot_center(0);
        orchestrator.pointer_down(&surface(), x, y);
        let effect = orchestrator.pointer_up(&surface(), x, y);
        assert_eq!(effect, GestureEffect::Unplaced { piece: id(3), slot: 0 });
        assert!(orchestrator.session().board().is_empty());
    }

    #[test]
    fn test_touch_tap_on_board_keeps_piece() {
        let mut orchestrator = started();
        orchestrator.move_piece(id(3), Destination::Slot(0)).unwrap();
        let (x, y) = slot_center(0);
        orchestrator.touch_start(&surface(), x, y);
        assert!(orchestrator.session().board().is_empty());
        let effect = orchestrator.touch_end(&surface(), x, y);
        assert!(matches!(effect, GestureEffect::Placed { piece, slot: 0, .. } if piece == id(3)));
    }

    #[test]
    fn test_drop_outside_board_returns_to_tray() {
        let mut orchestrator = started();
        orchestrator.move_piece(id(2), Destination::Slot(2)).unwrap();
        let (x, y) = slot_center(2);
        orchestrator.touch_start(&surface(), x, y);
        assert_eq!(orchestrator.touch_end(&surface(), 500.0, 500.0), GestureEffect::Returned(id(2)));
        assert!(orchestrator.session().tray().contains(id(2)));
    }

    #[test]
    fn test_cancel_keeps_detached_piece_in_tray() {
        let mut orchestrator = started();
        orchestrator.move_piece(id(8), Destination::Slot(8)).unwrap();
        orchestrator.begin_drag(id(8), InputDevice::Keyboard, 0.0, 0.0);
        orchestrator.drag_over(Some(1));
        assert_eq!(orchestrator.cancel_drag(), GestureEffect::Returned(id(8)));
        assert_eq!(orchestrator.highlight(), None);
        assert!(orchestrator.session().tray().contains(id(8)));
    }

    #[test]
    fn test_drop_without_drag_does_nothing() {
        let mut orchestrator = started();
        assert_eq!(orchestrator.drop_at(Some(0)), GestureEffect::None);
        assert!(orchestrator.session().board().is_empty());
    }

    #[test]
    fn test_drag_over_requires_active_drag() {
        let mut orchestrator = started();
        orchestrator.drag_over(Some(3));
        assert_eq!(orchestrator.highlight(), None);
    }

    #[test]
    fn test_malformed_payload_is_rejected() {
        let mut orchestrator = started();
        let (x, y) = slot_center(0);
        let before = orchestrator.session().summary();
        assert_eq!(orchestrator.drop_payload(&surface(), x, y, "{oops"), GestureEffect::Rejected);
        assert_eq!(orchestrator.drop_payload(&surface(), x, y, r#"{"piece_id":42}"#), GestureEffect::Rejected);
        assert_eq!(orchestrator.session().summary(), before);
    }

    #[test]
    fn test_payload_drop_on_slot_and_tray() {
        let mut orchestrator = started();
        let (x, y) = slot_center(6);
        let raw = DragPayload::new(id(6)).encode();
        let effect = orchestrator.drop_payload(&surface(), x, y, &raw);
        assert!(matches!(effect, GestureEffect::Placed { slot: 6, .. }));

        let effect = orchestrator.drop_payload(&surface(), 5.0, 105.0, &raw);
        assert_eq!(effect, GestureEffect::Returned(id(6)));
        assert!(orchestrator.session().board().is_empty());

        assert_eq!(orchestrator.drop_payload(&surface(), 500.0, 5.0, &raw), GestureEffect::None);
    }

    #[test]
    fn test_completed_effect() {
        let placed = GestureEffect::Placed {
            piece: id(0),
            slot: 0,
            outcome: MoveOutcome {
                completed: true,
                displaced: None,
            },
        };
        assert!(placed.completed());
        assert!(!GestureEffect::Returned(id(0)).completed());
    }
}
