use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use jigsaw_core::{
    Destination, DragPayload, GameSession, GestureEffect, GridLayout, ImageProcessor, Orchestrator, PieceId,
    PuzzleError, Surface, TrayView, PIECE_COUNT, TARGET_HEIGHT, TARGET_WIDTH,
};
use std::io::Cursor;

fn png(image: RgbaImage) -> Vec<u8> {
    let mut bytes = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(image).write_to(&mut bytes, ImageFormat::Png).unwrap();
    bytes.into_inner()
}

/// Red ramps left to right, green ramps top to bottom
fn gradient(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([
            (x * 255 / (width - 1)) as u8,
            (y * 255 / (height - 1)) as u8,
            0,
            255,
        ])
    })
}

fn id(index: usize) -> PieceId {
    PieceId::new(index).unwrap()
}

fn uploaded_session() -> GameSession {
    let mut session = GameSession::new();
    session
        .upload_image(&ImageProcessor::default(), &png(gradient(1000, 500)))
        .unwrap();
    session
}

fn surface() -> Surface {
    Surface::new(
        GridLayout::square(0.0, 0.0, 52.0, 94.0, 2.0),
        GridLayout::square(200.0, 0.0, 30.0, 54.0, 4.0),
        4.0,
    )
}

#[test]
fn wide_upload_seeds_tray() {
    let session = uploaded_session();
    assert!(session.can_start());
    assert!(!session.is_started());
    assert_eq!(session.tray().len(), PIECE_COUNT);
    assert!(session.board().is_empty());

    let preview = session.preview().unwrap();
    assert_eq!((preview.width(), preview.height()), (TARGET_WIDTH, TARGET_HEIGHT));

    let mut ids: Vec<PieceId> = session.tray().ids().collect();
    ids.sort();
    assert_eq!(ids, PieceId::all().collect::<Vec<_>>());
    for piece in session.tray().iter() {
        assert_eq!(piece.id().index(), piece.correct_row() * 3 + piece.correct_column());
    }
}

#[test]
fn crop_keeps_the_center_of_a_wide_image() {
    let processed = ImageProcessor::default()
        .process(&png(gradient(1000, 500)))
        .unwrap();
    let preview = processed.preview.decode().unwrap();

    // The crop spans source columns 362..639, so red never reaches either end
    let left = preview.get_pixel(0, TARGET_HEIGHT / 2)[0];
    let middle = preview.get_pixel(TARGET_WIDTH / 2, TARGET_HEIGHT / 2)[0];
    let right = preview.get_pixel(TARGET_WIDTH - 1, TARGET_HEIGHT / 2)[0];
    assert!((85..=100).contains(&left), "left edge red {}", left);
    assert!((120..=135).contains(&middle), "center red {}", middle);
    assert!((155..=170).contains(&right), "right edge red {}", right);

    // Full height is kept, so green covers the whole ramp
    assert!(preview.get_pixel(TARGET_WIDTH / 2, 0)[1] < 5);
    assert!(preview.get_pixel(TARGET_WIDTH / 2, TARGET_HEIGHT - 1)[1] > 250);
}

#[test]
fn pieces_tile_the_preview() {
    let processed = ImageProcessor::default()
        .process(&png(gradient(520, 940)))
        .unwrap();
    let widths: Vec<u32> = processed.pieces[..3].iter().map(|p| p.image().width()).collect();
    let heights: Vec<u32> = processed.pieces.iter().step_by(3).map(|p| p.image().height()).collect();
    assert_eq!(widths, vec![173, 174, 173]);
    assert_eq!(heights, vec![313, 314, 313]);
    assert_eq!(widths.iter().sum::<u32>(), TARGET_WIDTH);
    assert_eq!(heights.iter().sum::<u32>(), TARGET_HEIGHT);

    let preview = processed.preview.decode().unwrap();
    let bottom_right = processed.pieces[8].image().decode().unwrap();
    assert_eq!(
        bottom_right.get_pixel(0, 0),
        preview.get_pixel(347, 627),
        "piece 8 starts at the last boundary"
    );
}

#[test]
fn jpeg_upload_is_accepted() {
    let mut session = GameSession::new();
    let mut bytes = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(gradient(300, 300)).to_rgb8())
        .write_to(&mut bytes, ImageFormat::Jpeg)
        .unwrap();
    let bytes = bytes.into_inner();
    session.upload_image(&ImageProcessor::default(), &bytes).unwrap();
    assert_eq!(session.tray().len(), PIECE_COUNT);
}

#[test]
fn undecodable_upload_changes_nothing() {
    let mut session = uploaded_session();
    session.move_piece(id(1), Destination::Slot(1)).unwrap();
    let before = session.summary();

    let err = session
        .upload_image(&ImageProcessor::default(), b"definitely not an image")
        .unwrap_err();
    assert!(matches!(err, PuzzleError::Decode(_)));
    assert_eq!(session.summary(), before);

    let mut fresh = GameSession::new();
    assert!(fresh.upload_image(&ImageProcessor::default(), &[]).is_err());
    assert!(!fresh.can_start());
}

#[test]
fn completion_fires_only_on_the_last_piece() {
    let mut session = uploaded_session();
    session.start_game();

    let outcome = session.move_piece(id(4), Destination::Slot(4)).unwrap();
    assert!(!outcome.completed);

    let rest = [0, 1, 2, 3, 5, 6, 7, 8];
    for (n, index) in rest.iter().enumerate() {
        let outcome = session.move_piece(id(*index), Destination::Slot(*index)).unwrap();
        assert_eq!(outcome.completed, n == rest.len() - 1);
    }
    assert!(session.is_complete());
}

#[test]
fn wrong_slot_does_not_complete() {
    let mut session = uploaded_session();
    let outcome = session.move_piece(id(0), Destination::Slot(8)).unwrap();
    assert!(!outcome.completed);
    assert_eq!(session.board().get(8).map(|p| p.id()), Some(id(0)));
    assert_eq!(session.tray().len(), 8);
    assert!(!session.tray().contains(id(0)));
}

#[test]
fn board_drag_onto_occupied_slot_recovers_occupant() {
    let mut orchestrator = Orchestrator::with_tray_view(TrayView::with_seed(7));
    orchestrator
        .upload_image(&ImageProcessor::default(), &png(gradient(640, 480)))
        .unwrap();
    orchestrator.start_game();
    orchestrator.move_piece(id(0), Destination::Slot(0)).unwrap();
    orchestrator.move_piece(id(1), Destination::Slot(1)).unwrap();

    let (x0, y0) = surface().board.cell_rect(0).unwrap().center();
    let (x1, y1) = surface().board.cell_rect(1).unwrap().center();
    orchestrator.pointer_down(&surface(), x0, y0);
    assert_eq!(orchestrator.pointer_move(&surface(), x1, y1), GestureEffect::Lifted(id(0)));
    assert!(orchestrator.session().tray().contains(id(0)));

    let effect = orchestrator.pointer_up(&surface(), x1, y1);
    match effect {
        GestureEffect::Placed { piece, slot, outcome } => {
            assert_eq!((piece, slot), (id(0), 1));
            assert_eq!(outcome.displaced, Some(id(1)));
        }
        other => panic!("unexpected effect {:?}", other),
    }

    let session = orchestrator.session();
    assert!(session.board().get(0).is_none());
    assert!(session.tray().contains(id(1)));
    assert_eq!(session.tray().len() + session.board().placed_count(), PIECE_COUNT);
}

#[test]
fn pointer_and_touch_drags_agree() {
    let run = |use_touch: bool| {
        let mut orchestrator = Orchestrator::with_tray_view(TrayView::with_seed(21));
        orchestrator
            .upload_image(&ImageProcessor::default(), &png(gradient(200, 400)))
            .unwrap();
        orchestrator.start_game();

        let surface = surface();
        let paths = [(0usize, 4usize), (2, 7), (0, 0)];
        for (cell, slot) in paths {
            let (sx, sy) = surface.tray.cell_rect(cell).unwrap().center();
            let (ex, ey) = surface.board.cell_rect(slot).unwrap().center();
            if use_touch {
                orchestrator.touch_start(&surface, sx, sy);
                orchestrator.touch_move(&surface, ex, ey);
                orchestrator.touch_end(&surface, ex, ey);
            } else {
                orchestrator.pointer_down(&surface, sx, sy);
                orchestrator.pointer_move(&surface, ex, ey);
                orchestrator.pointer_up(&surface, ex, ey);
            }
        }
        orchestrator.session().summary()
    };

    let pointer = run(false);
    let touch = run(true);
    assert_eq!(pointer.board, touch.board);
    let (mut a, mut b) = (pointer.tray, touch.tray);
    a.sort();
    b.sort();
    assert_eq!(a, b);
    assert_eq!(pointer.board.iter().flatten().count(), 3);
}

#[test]
fn malformed_drops_leave_state_alone() {
    let mut orchestrator = Orchestrator::new();
    orchestrator
        .upload_image(&ImageProcessor::default(), &png(gradient(100, 100)))
        .unwrap();
    orchestrator.start_game();
    let before = orchestrator.session().summary();

    let (x, y) = surface().board.cell_rect(3).unwrap().center();
    for raw in ["", "null", "42", r#"{"piece_id":-3}"#, r#"{"piece_id":9}"#] {
        assert_eq!(orchestrator.drop_payload(&surface(), x, y, raw), GestureEffect::Rejected);
    }
    assert_eq!(orchestrator.session().summary(), before);

    let effect = orchestrator.drop_payload(&surface(), x, y, &DragPayload::new(id(3)).encode());
    assert!(matches!(effect, GestureEffect::Placed { slot: 3, .. }));
}

#[test]
fn summary_serializes() {
    let mut session = uploaded_session();
    session.move_piece(id(2), Destination::Slot(0)).unwrap();
    let json = serde_json::to_value(session.summary()).unwrap();
    assert_eq!(json["image_uploaded"], true);
    assert_eq!(json["board"][0], 2);
    assert!(json["board"][1].is_null());
    assert_eq!(json["tray"].as_array().unwrap().len(), 8);
}
