use crate::piece::{PieceId, PuzzlePiece};
use crate::shuffle::{shuffle, SimpleRng};
use crate::tray::Tray;

/// Randomized display order for the tray
///
/// The order is recomputed only when the tray's revision changes, so
/// unrelated redraws keep pieces where the player last saw them. The view
/// never touches the tray itself.
#[derive(Debug, Clone)]
pub struct TrayView {
    rng: SimpleRng,
    revision: Option<u64>,
    order: Vec<PieceId>,
}

impl Default for TrayView {
    fn default() -> Self {
        Self::new()
    }
}

impl TrayView {
    pub fn new() -> Self {
        Self::from_rng(SimpleRng::new())
    }

    /// Deterministic ordering for tests and replays
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(SimpleRng::with_seed(seed))
    }

    fn from_rng(rng: SimpleRng) -> Self {
        Self {
            rng,
            revision: None,
            order: Vec::new(),
        }
    }

    /// Display order of the tray's piece ids
    pub fn order(&mut self, tray: &Tray) -> &[PieceId] {
        if self.revision != Some(tray.revision()) {
            let mut ids: Vec<PieceId> = tray.ids().collect();
            shuffle(&mut ids, &mut self.rng);
            self.order = ids;
            self.revision = Some(tray.revision());
        }
        &self.order
    }

    /// Tray pieces in display order
    pub fn pieces<'a>(&mut self, tray: &'a Tray) -> Vec<&'a PuzzlePiece> {
        self.order(tray).iter().filter_map(|id| tray.get(*id)).collect()
    }

    /// Piece shown in display cell `index`
    pub fn piece_at(&mut self, tray: &Tray, index: usize) -> Option<PieceId> {
        self.order(tray).get(index).copied()
    }

    /// Force a reshuffle on the next call
    pub fn invalidate(&mut self) {
        self.revision = None;
    }
}
