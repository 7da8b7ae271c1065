//! Tests for the canvas front end's state and layout

#[cfg(test)]
mod tests {
    use crate::game::{GameState, ScreenState};
    use crate::layout::{ScreenLayout, DRAG_SLOP};
    use crate::theme::Theme;
    use crate::JigsawGame;
    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
    use jigsaw_core::{Destination, DragPayload, GestureEffect, Orchestrator, PieceId, TrayView, PIECE_COUNT};
    use std::io::Cursor;
    use wasm_bindgen_test::*;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_fn(width, height, |x, y| Rgba([(x % 256) as u8, (y % 256) as u8, 90, 255]));
        let mut bytes = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(image)
            .write_to(&mut bytes, ImageFormat::Png)
            .unwrap();
        bytes.into_inner()
    }

    fn playing() -> GameState {
        let mut state = GameState::with_orchestrator(Orchestrator::with_tray_view(TrayView::with_seed(4)));
        state.upload(&png(260, 470)).unwrap();
        assert!(state.start_game());
        state
    }

    fn id(index: usize) -> PieceId {
        PieceId::new(index).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_game_state_new() {
        let state = GameState::new();
        assert_eq!(state.screen(), ScreenState::Upload);
        assert!(!state.can_start());
        assert!(!state.is_started());
        assert!(!state.is_complete());
    }

    #[wasm_bindgen_test]
    fn test_start_requires_image() {
        let mut state = GameState::new();
        assert!(!state.start_game());
        assert_eq!(state.screen(), ScreenState::Upload);
        assert_eq!(state.message(), Some("Upload an image first"));
    }

    #[wasm_bindgen_test]
    fn test_upload_then_start() {
        let mut state = GameState::new();
        state.upload(&png(1000, 500)).unwrap();
        assert_eq!(state.screen(), ScreenState::Ready);
        assert!(state.can_start());
        assert!(state.handle_key("Enter"));
        assert_eq!(state.screen(), ScreenState::Playing);
        assert_eq!(state.tray_order().len(), PIECE_COUNT);
    }

    #[wasm_bindgen_test]
    fn test_bad_upload_keeps_previous_puzzle() {
        let mut state = playing();
        state.move_piece(id(0), Destination::Slot(0)).unwrap();
        assert!(state.upload(b"not an image").is_err());
        assert_eq!(state.screen(), ScreenState::Playing);
        assert_eq!(state.orchestrator().session().board().placed_count(), 1);
    }

    #[wasm_bindgen_test]
    fn test_processed_image_waits_for_commit() {
        let mut state = playing();
        state.move_piece(id(0), Destination::Slot(0)).unwrap();

        let processed = state.process(&png(400, 400)).unwrap();
        assert_eq!(state.screen(), ScreenState::Playing);
        assert_eq!(state.orchestrator().session().board().placed_count(), 1);

        state.commit(processed);
        assert_eq!(state.orchestrator().session().board().placed_count(), 0);
        assert_eq!(state.orchestrator().session().tray().len(), PIECE_COUNT);
        assert_eq!(state.message(), Some("Image loaded"));
    }

    #[wasm_bindgen_test]
    fn test_failed_process_leaves_upload_screen() {
        let mut state = GameState::new();
        assert!(state.process(b"GIF89a").is_err());
        assert_eq!(state.screen(), ScreenState::Upload);
        assert!(!state.can_start());
        assert_eq!(state.message(), Some("Could not read that image"));
    }

    #[wasm_bindgen_test]
    fn test_mime_types_exposed_to_host() {
        assert_eq!(JigsawGame::drag_payload_mime(), "application/json");
        assert_eq!(JigsawGame::image_mime(), "image/png");
    }

    #[wasm_bindgen_test]
    fn test_pointer_drag_through_layout() {
        let mut state = playing();
        let layout = ScreenLayout::compute(1100, 760);
        let surface = layout.surface();

        let (sx, sy) = layout.tray.cell_rect(0).unwrap().center();
        let (ex, ey) = layout.board.cell_rect(4).unwrap().center();
        let piece = state.tray_order()[0];

        state.pointer_down(&surface, sx, sy);
        assert_eq!(state.pointer_move(&surface, ex, ey), GestureEffect::Lifted(piece));
        assert_eq!(state.orchestrator().highlight(), Some(4));
        let effect = state.pointer_up(&surface, ex, ey);
        assert!(matches!(effect, GestureEffect::Placed { slot: 4, .. }));
        assert_eq!(state.orchestrator().session().board().get(4).map(|p| p.id()), Some(piece));
    }

    #[wasm_bindgen_test]
    fn test_solving_sets_message() {
        let mut state = playing();
        for index in 0..PIECE_COUNT - 1 {
            let outcome = state.move_piece(id(index), Destination::Slot(index)).unwrap();
            assert!(!outcome.completed);
        }
        let layout = ScreenLayout::compute(1100, 760);
        let (x, y) = layout.board.cell_rect(8).unwrap().center();
        let effect = state.drop_payload(&layout.surface(), x, y, &DragPayload::new(id(8)).encode());
        assert!(effect.completed());
        assert!(state.is_complete());
        assert_eq!(state.message(), Some("Puzzle complete!"));
    }

    #[wasm_bindgen_test]
    fn test_rejected_drop_sets_message() {
        let mut state = playing();
        let layout = ScreenLayout::compute(1100, 760);
        let (x, y) = layout.board.cell_rect(0).unwrap().center();
        assert_eq!(state.drop_payload(&layout.surface(), x, y, "{}"), GestureEffect::Rejected);
        assert_eq!(state.message(), Some("That move is not possible"));
    }

    #[wasm_bindgen_test]
    fn test_message_expires() {
        let mut state = GameState::new();
        state.start_game();
        assert!(state.message().is_some());
        for _ in 0..90 {
            state.tick();
        }
        assert!(state.message().is_none());
    }

    #[wasm_bindgen_test]
    fn test_escape_cancels_drag() {
        let mut state = playing();
        let layout = ScreenLayout::compute(1100, 760);
        let surface = layout.surface();
        let (x, y) = layout.tray.cell_rect(0).unwrap().center();
        state.touch_start(&surface, x, y);
        assert!(state.orchestrator().dragged_piece().is_some());
        assert!(state.handle_key("Escape"));
        assert!(state.orchestrator().dragged_piece().is_none());
        assert_eq!(state.orchestrator().session().tray().len(), PIECE_COUNT);
    }

    #[wasm_bindgen_test]
    fn test_state_json() {
        let mut state = playing();
        state.move_piece(id(3), Destination::Slot(0)).unwrap();
        let json = serde_json::to_value(state.to_serializable()).unwrap();
        assert_eq!(json["screen"], "Playing");
        assert_eq!(json["session"]["board"][0], 3);
        assert!(json["dragging"].is_null());
    }

    #[wasm_bindgen_test]
    fn test_layout_panels_do_not_overlap() {
        for (width, height) in [(1100, 760), (640, 480), (1920, 1080)] {
            let layout = ScreenLayout::compute(width, height);
            let board = layout.board.bounds();
            let tray = layout.tray.bounds();
            assert!(layout.preview.x + layout.preview.width <= board.x);
            assert!(board.x + board.width <= tray.x);
            assert!(tray.x + tray.width <= width as f64);
            assert!(board.y + board.height <= height as f64);
        }
    }

    #[wasm_bindgen_test]
    fn test_layout_surface_uses_slop() {
        let layout = ScreenLayout::compute(1100, 760);
        assert_eq!(layout.surface().slop, DRAG_SLOP);
        assert_eq!(layout.board.cell_count(), PIECE_COUNT);
    }

    #[wasm_bindgen_test]
    fn test_theme_by_name() {
        assert_eq!(Theme::by_name("light").background, Theme::light().background);
        assert_eq!(Theme::by_name("high-contrast").background, Theme::high_contrast().background);
        assert_eq!(Theme::by_name("nope").background, Theme::dark().background);
    }
}
