use crate::celebration::WinScreen;
use crate::layout::{mouse_point, ScreenLayout};
use crate::theme::{Theme, ThemeName};
use crate::thumbnail::Thumbnails;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use jigsaw_core::{DragOrigin, GestureEffect, InputDevice, Orchestrator, PieceId, ProcessedImage, Target, TrayView};
use std::time::Duration;

/// Result of handling a key press
pub enum AppAction {
    Continue,
    Quit,
}

/// Current screen state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    /// Image loaded, waiting for the player to start
    Ready,
    Playing,
    /// Win celebration screen
    Win,
}

/// Which grid the keyboard cursor is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Tray,
    Board,
}

/// The main application state
pub struct App {
    pub orchestrator: Orchestrator,
    /// Kept so a restart does not need to decode the file again
    processed: ProcessedImage,
    pub thumbnails: Thumbnails,
    pub theme_name: ThemeName,
    pub theme: Theme,
    pub screen_state: ScreenState,
    pub focus: Focus,
    pub board_cursor: usize,
    pub tray_cursor: usize,
    /// Message to display
    pub message: Option<String>,
    message_timer: u32,
    pub win_screen: WinScreen,
    pub layout: ScreenLayout,
}

impl App {
    pub fn new(processed: ProcessedImage, thumbnails: Thumbnails, theme_name: ThemeName, seed: Option<u64>) -> Self {
        let tray_view = match seed {
            Some(seed) => TrayView::with_seed(seed),
            None => TrayView::new(),
        };
        let mut orchestrator = Orchestrator::with_tray_view(tray_view);
        orchestrator.apply_processed(processed.clone());

        Self {
            orchestrator,
            processed,
            thumbnails,
            theme_name,
            theme: Theme::from_name(theme_name),
            screen_state: ScreenState::Ready,
            focus: Focus::Tray,
            board_cursor: 0,
            tray_cursor: 0,
            message: None,
            message_timer: 0,
            win_screen: WinScreen::new(),
            layout: ScreenLayout::compute(80, 24),
        }
    }

    /// Get the tick rate based on current screen
    pub fn get_tick_rate(&self) -> Duration {
        match self.screen_state {
            ScreenState::Win => Duration::from_millis(33), // 30 FPS for confetti
            ScreenState::Ready | ScreenState::Playing => Duration::from_millis(100),
        }
    }

    /// Update animations and timers (called every tick)
    pub fn tick(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }

        if self.screen_state == ScreenState::Win {
            self.win_screen.update();
        }
    }

    /// Show a temporary message
    pub fn show_message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
        self.message_timer = 30; // ~3 seconds at 100ms poll
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.layout = ScreenLayout::compute(width, height);
        self.win_screen.resize(width, height);
    }

    /// Tray pieces in the order they are drawn
    pub fn tray_order(&mut self) -> Vec<PieceId> {
        self.orchestrator.tray_order().to_vec()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match self.screen_state {
            ScreenState::Ready => self.handle_ready_key(key),
            ScreenState::Playing => self.handle_game_key(key),
            ScreenState::Win => self.handle_win_key(key),
        }
    }

    fn handle_ready_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('s') => self.start(),
            KeyCode::Char('t') => self.cycle_theme(),
            _ => {}
        }
        AppAction::Continue
    }

    fn handle_win_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('r') => self.restart(),
            KeyCode::Esc => {
                // Back to the finished board
                self.screen_state = ScreenState::Playing;
            }
            _ => {}
        }
        AppAction::Continue
    }

    fn handle_game_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,

            // Navigation
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1, 0),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1, 0),
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(0, -1),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(0, 1),
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    Focus::Tray => Focus::Board,
                    Focus::Board => Focus::Tray,
                };
                self.sync_highlight();
            }

            KeyCode::Enter | KeyCode::Char(' ') => self.pick_or_drop(),
            KeyCode::Esc => {
                if let GestureEffect::Returned(_) = self.orchestrator.cancel_drag() {
                    self.show_message("Piece returned to the tray");
                }
            }
            KeyCode::Backspace | KeyCode::Delete | KeyCode::Char('x') => {
                if self.focus == Focus::Board {
                    let effect = self.orchestrator.unplace(self.board_cursor);
                    self.apply(effect);
                }
            }

            KeyCode::Char('r') => self.restart(),
            KeyCode::Char('t') => self.cycle_theme(),
            _ => {}
        }
        AppAction::Continue
    }

    pub fn handle_mouse(&mut self, event: MouseEvent) {
        if self.screen_state != ScreenState::Playing {
            return;
        }
        let surface = self.layout.surface();
        let (x, y) = mouse_point(event.column, event.row);
        let effect = match event.kind {
            MouseEventKind::Down(MouseButton::Left) => self.orchestrator.pointer_down(&surface, x, y),
            MouseEventKind::Drag(MouseButton::Left) => self.orchestrator.pointer_move(&surface, x, y),
            MouseEventKind::Up(MouseButton::Left) => self.orchestrator.pointer_up(&surface, x, y),
            _ => return,
        };
        self.apply(effect);
    }

    fn start(&mut self) {
        self.orchestrator.start_game();
        self.screen_state = ScreenState::Playing;
        self.focus = Focus::Tray;
        self.show_message("Drag pieces onto the board, or use Enter to pick up and drop");
    }

    /// Put every piece back in the tray and play again
    fn restart(&mut self) {
        self.orchestrator.cancel_drag();
        self.orchestrator.apply_processed(self.processed.clone());
        self.orchestrator.start_game();
        self.board_cursor = 0;
        self.tray_cursor = 0;
        self.focus = Focus::Tray;
        self.screen_state = ScreenState::Playing;
        self.show_message("Pieces shuffled back into the tray");
    }

    fn cycle_theme(&mut self) {
        self.theme_name = self.theme_name.next();
        self.theme = Theme::from_name(self.theme_name);
    }

    /// Info panel caption for the held piece
    pub fn holding_label(&self) -> Option<String> {
        match self.orchestrator.drag_source()? {
            (DragOrigin::Slot(slot), _) => Some(format!("Holding (slot {}):", slot + 1)),
            (DragOrigin::Tray, _) => Some("Holding:".to_string()),
        }
    }

    fn pick_or_drop(&mut self) {
        if self.orchestrator.dragged_piece().is_some() {
            let slot = match self.focus {
                Focus::Board => Some(self.board_cursor),
                Focus::Tray => None,
            };
            let effect = self.orchestrator.drop_at(slot);
            self.apply(effect);
            return;
        }

        let (target, rect) = match self.focus {
            Focus::Board => (Target::Slot(self.board_cursor), self.layout.board.cell_rect(self.board_cursor)),
            Focus::Tray => (Target::TrayCell(self.tray_cursor), self.layout.tray.cell_rect(self.tray_cursor)),
        };
        let Some(piece) = self.orchestrator.piece_at(target) else {
            return;
        };
        let (x, y) = rect.map(|r| r.center()).unwrap_or_default();
        let effect = self.orchestrator.begin_drag(piece, InputDevice::Keyboard, x, y);
        self.apply(effect);
        if self.focus == Focus::Tray {
            // Held pieces are dropped on the board
            self.focus = Focus::Board;
        }
        self.sync_highlight();
    }

    fn move_cursor(&mut self, row_delta: i32, col_delta: i32) {
        let cursor = match self.focus {
            Focus::Board => &mut self.board_cursor,
            Focus::Tray => &mut self.tray_cursor,
        };
        let row = (*cursor / 3) as i32 + row_delta;
        let col = (*cursor % 3) as i32 + col_delta;
        *cursor = (row.clamp(0, 2) * 3 + col.clamp(0, 2)) as usize;
        self.sync_highlight();
    }

    /// Keyboard drags highlight the slot under the board cursor
    fn sync_highlight(&mut self) {
        if self.orchestrator.dragged_piece().is_none() {
            return;
        }
        match self.focus {
            Focus::Board => {
                let slot = self.board_cursor;
                if let Some((x, y)) = self.layout.board.cell_rect(slot).map(|r| r.center()) {
                    self.orchestrator.drag_to(x, y);
                }
                self.orchestrator.drag_over(Some(slot));
            }
            Focus::Tray => self.orchestrator.drag_leave(),
        }
    }

    fn apply(&mut self, effect: GestureEffect) {
        match effect {
            GestureEffect::Rejected => self.show_message("That move is not possible"),
            GestureEffect::Placed { outcome, .. } if outcome.completed => {
                tracing::info!("puzzle completed");
                self.screen_state = ScreenState::Win;
                self.win_screen.reset();
            }
            GestureEffect::Placed { outcome, .. } if outcome.displaced.is_some() => {
                self.show_message("Swapped piece went back to the tray")
            }
            _ => {}
        }
    }
}
