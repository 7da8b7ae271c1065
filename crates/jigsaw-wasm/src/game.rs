//! Game state for the canvas front end

use jigsaw_core::{
    Destination, GestureEffect, ImageProcessor, MoveOutcome, Orchestrator, PieceId, ProcessedImage, PuzzleError,
    SessionSummary, Surface,
};
use serde::{Deserialize, Serialize};

/// Ticks a status message stays visible (~3 seconds at 30fps)
const MESSAGE_TICKS: u32 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreenState {
    /// Waiting for an image
    Upload,
    /// Image processed, start not pressed yet
    Ready,
    Playing,
}

/// Snapshot handed to the host page as JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializableState {
    pub screen: ScreenState,
    pub session: SessionSummary,
    pub dragging: Option<PieceId>,
    pub highlight: Option<usize>,
    pub message: Option<String>,
}

pub struct GameState {
    orchestrator: Orchestrator,
    processor: ImageProcessor,
    screen: ScreenState,
    message: Option<String>,
    message_timer: u32,
    /// Animation frame counter
    frame: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self::with_orchestrator(Orchestrator::new())
    }

    pub fn with_orchestrator(orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator,
            processor: ImageProcessor::default(),
            screen: ScreenState::Upload,
            message: None,
            message_timer: 0,
            frame: 0,
        }
    }

    /// Replace the current puzzle with a new upload
    ///
    /// A failed decode keeps whatever was loaded before.
    pub fn upload(&mut self, bytes: &[u8]) -> Result<(), PuzzleError> {
        let processed = self.process(bytes)?;
        self.commit(processed);
        Ok(())
    }

    /// Decode and slice without touching the current puzzle
    pub fn process(&mut self, bytes: &[u8]) -> Result<ProcessedImage, PuzzleError> {
        let result = self.processor.process(bytes);
        if result.is_err() {
            self.show_message("Could not read that image");
        }
        result
    }

    /// Swap in a processed image
    pub fn commit(&mut self, processed: ProcessedImage) {
        self.orchestrator.apply_processed(processed);
        if self.screen == ScreenState::Upload {
            self.screen = ScreenState::Ready;
        }
        self.show_message("Image loaded");
    }

    pub fn can_start(&self) -> bool {
        self.orchestrator.session().can_start()
    }

    /// Enter play; ignored until an image is loaded
    pub fn start_game(&mut self) -> bool {
        if !self.can_start() {
            self.show_message("Upload an image first");
            return false;
        }
        self.orchestrator.start_game();
        self.screen = ScreenState::Playing;
        true
    }

    pub fn is_started(&self) -> bool {
        self.orchestrator.session().is_started()
    }

    pub fn is_complete(&self) -> bool {
        self.orchestrator.session().is_complete()
    }

    pub fn pointer_down(&mut self, surface: &Surface, x: f64, y: f64) -> GestureEffect {
        let effect = self.orchestrator.pointer_down(surface, x, y);
        self.apply(effect)
    }

    pub fn pointer_move(&mut self, surface: &Surface, x: f64, y: f64) -> GestureEffect {
        let effect = self.orchestrator.pointer_move(surface, x, y);
        self.apply(effect)
    }

    pub fn pointer_up(&mut self, surface: &Surface, x: f64, y: f64) -> GestureEffect {
        let effect = self.orchestrator.pointer_up(surface, x, y);
        self.apply(effect)
    }

    pub fn touch_start(&mut self, surface: &Surface, x: f64, y: f64) -> GestureEffect {
        let effect = self.orchestrator.touch_start(surface, x, y);
        self.apply(effect)
    }

    pub fn touch_move(&mut self, surface: &Surface, x: f64, y: f64) -> GestureEffect {
        let effect = self.orchestrator.touch_move(surface, x, y);
        self.apply(effect)
    }

    pub fn touch_end(&mut self, surface: &Surface, x: f64, y: f64) -> GestureEffect {
        let effect = self.orchestrator.touch_end(surface, x, y);
        self.apply(effect)
    }

    pub fn cancel_drag(&mut self) -> GestureEffect {
        let effect = self.orchestrator.cancel_drag();
        self.apply(effect)
    }

    pub fn drop_payload(&mut self, surface: &Surface, x: f64, y: f64, raw: &str) -> GestureEffect {
        let effect = self.orchestrator.drop_payload(surface, x, y, raw);
        self.apply(effect)
    }

    /// Direct placement, for hosts that do their own hit-testing
    pub fn move_piece(&mut self, piece: PieceId, destination: Destination) -> Result<MoveOutcome, PuzzleError> {
        let outcome = self.orchestrator.move_piece(piece, destination)?;
        if outcome.completed {
            self.show_message("Puzzle complete!");
        }
        Ok(outcome)
    }

    /// Handle keyboard input, returns true if the key was used
    pub fn handle_key(&mut self, key: &str) -> bool {
        match (self.screen, key) {
            (ScreenState::Ready, "Enter" | " " | "s") => self.start_game(),
            (ScreenState::Playing, "Escape") => {
                self.cancel_drag();
                true
            }
            _ => false,
        }
    }

    fn apply(&mut self, effect: GestureEffect) -> GestureEffect {
        match effect {
            GestureEffect::Rejected => self.show_message("That move is not possible"),
            effect if effect.completed() => self.show_message("Puzzle complete!"),
            _ => {}
        }
        effect
    }

    /// Update timers (called each frame)
    pub fn tick(&mut self) {
        self.frame = self.frame.wrapping_add(1);

        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }
    }

    pub fn show_message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
        self.message_timer = MESSAGE_TICKS;
    }

    pub fn to_serializable(&self) -> SerializableState {
        SerializableState {
            screen: self.screen,
            session: self.orchestrator.session().summary(),
            dragging: self.orchestrator.dragged_piece(),
            highlight: self.orchestrator.highlight(),
            message: self.message.clone(),
        }
    }

    // Getters
    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    /// Tray order needs `&mut` because the view memoizes its shuffle
    pub fn tray_order(&mut self) -> Vec<PieceId> {
        self.orchestrator.tray_order().to_vec()
    }

    pub fn screen(&self) -> ScreenState {
        self.screen
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }
}
