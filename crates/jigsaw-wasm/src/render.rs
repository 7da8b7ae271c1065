//! Canvas rendering for the picture puzzle

use crate::game::{GameState, ScreenState};
use crate::layout::{ScreenLayout, HEADER_HEIGHT};
use crate::sprites::SpriteCache;
use crate::theme::Theme;
use jigsaw_core::geometry::Rect;
use jigsaw_core::PIECE_COUNT;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const FONT: &str = "'JetBrains Mono', 'Fira Code', 'Consolas', monospace";

/// Render the complete game to canvas
pub fn render_game(
    ctx: &CanvasRenderingContext2d,
    state: &mut GameState,
    sprites: &SpriteCache,
    theme: &Theme,
    layout: &ScreenLayout,
    width: u32,
    height: u32,
) {
    ctx.set_fill_style_str(&theme.background.as_css());
    ctx.fill_rect(0.0, 0.0, width as f64, height as f64);

    render_header(ctx, state, theme, width);
    render_preview(ctx, sprites, theme, &layout.preview);

    match state.screen() {
        ScreenState::Upload => render_prompt(ctx, theme, layout, "Choose an image to begin"),
        ScreenState::Ready => {
            render_board(ctx, state, sprites, theme, layout);
            render_prompt(ctx, theme, layout, "Press Start (or Enter) to play");
        }
        ScreenState::Playing => {
            render_board(ctx, state, sprites, theme, layout);
            render_tray(ctx, state, sprites, theme, layout);
            render_dragged(ctx, state, sprites, layout);
            if state.is_complete() {
                render_win_banner(ctx, state, theme, width, height);
            }
        }
    }

    if let Some(msg) = state.message() {
        render_message(ctx, theme, msg, width, height);
    }
}

fn render_header(ctx: &CanvasRenderingContext2d, state: &GameState, theme: &Theme, width: u32) {
    ctx.set_text_align("left");
    ctx.set_text_baseline("middle");
    ctx.set_font(&format!("bold 22px {}", FONT));
    ctx.set_fill_style_str(&theme.title_text.as_css());
    let _ = ctx.fill_text("Picture Puzzle", 24.0, HEADER_HEIGHT / 2.0);

    let board = state.orchestrator().session().board();
    let status = match state.screen() {
        ScreenState::Upload => "no image".to_string(),
        ScreenState::Ready => "ready".to_string(),
        ScreenState::Playing => format!("{}/{} placed", board.placed_count(), PIECE_COUNT),
    };
    ctx.set_text_align("right");
    ctx.set_font(&format!("16px {}", FONT));
    ctx.set_fill_style_str(&theme.info_text.as_css());
    let _ = ctx.fill_text(&status, width as f64 - 24.0, HEADER_HEIGHT / 2.0);
}

fn render_preview(ctx: &CanvasRenderingContext2d, sprites: &SpriteCache, theme: &Theme, rect: &Rect) {
    ctx.set_fill_style_str(&theme.panel_bg.as_css());
    ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
    if let Some(preview) = sprites.preview() {
        draw_sprite(ctx, preview, rect);
    }
    ctx.set_stroke_style_str(&theme.slot_border.as_css());
    ctx.set_line_width(1.0);
    ctx.stroke_rect(rect.x, rect.y, rect.width, rect.height);
}

fn render_board(
    ctx: &CanvasRenderingContext2d,
    state: &GameState,
    sprites: &SpriteCache,
    theme: &Theme,
    layout: &ScreenLayout,
) {
    let orchestrator = state.orchestrator();
    let board = orchestrator.session().board();

    for slot in 0..PIECE_COUNT {
        let Some(rect) = layout.board.cell_rect(slot) else {
            continue;
        };
        ctx.set_fill_style_str(&theme.slot_bg.as_css());
        ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);

        if let Some(sprite) = board.get(slot).and_then(|piece| sprites.piece(piece.id())) {
            draw_sprite(ctx, sprite, &rect);
        }

        if orchestrator.highlight() == Some(slot) {
            ctx.set_stroke_style_str(&theme.highlight.as_css());
            ctx.set_line_width(3.0);
            ctx.stroke_rect(rect.x + 1.5, rect.y + 1.5, rect.width - 3.0, rect.height - 3.0);
        } else {
            ctx.set_stroke_style_str(&theme.slot_border.as_css());
            ctx.set_line_width(1.0);
            ctx.stroke_rect(rect.x, rect.y, rect.width, rect.height);
        }
    }
}

fn render_tray(
    ctx: &CanvasRenderingContext2d,
    state: &mut GameState,
    sprites: &SpriteCache,
    theme: &Theme,
    layout: &ScreenLayout,
) {
    let order = state.tray_order();
    let dragged = state.orchestrator().dragged_piece();

    for cell in 0..layout.tray.cell_count() {
        let Some(rect) = layout.tray.cell_rect(cell) else {
            continue;
        };
        ctx.set_fill_style_str(&theme.tray_cell_bg.as_css());
        ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);

        let Some(&id) = order.get(cell) else {
            continue;
        };
        if let Some(sprite) = sprites.piece(id) {
            // The lifted piece leaves a ghost behind
            let alpha = if dragged == Some(id) { 0.25 } else { 1.0 };
            ctx.set_global_alpha(alpha);
            draw_sprite(ctx, sprite, &rect);
            ctx.set_global_alpha(1.0);
        }
    }
}

fn render_dragged(ctx: &CanvasRenderingContext2d, state: &GameState, sprites: &SpriteCache, layout: &ScreenLayout) {
    let orchestrator = state.orchestrator();
    let (Some(id), Some((x, y))) = (orchestrator.dragged_piece(), orchestrator.drag_position()) else {
        return;
    };
    let Some(sprite) = sprites.piece(id) else {
        return;
    };
    let (w, h) = layout.drag_size();
    ctx.set_global_alpha(0.5);
    draw_sprite(ctx, sprite, &Rect::new(x - w / 2.0, y - h / 2.0, w, h));
    ctx.set_global_alpha(1.0);
}

fn render_prompt(ctx: &CanvasRenderingContext2d, theme: &Theme, layout: &ScreenLayout, text: &str) {
    let bounds = layout.board.bounds();
    let (cx, cy) = bounds.center();
    ctx.set_fill_style_str(&theme.background.as_css_alpha(0.7));
    ctx.fill_rect(bounds.x, cy - 30.0, bounds.width, 60.0);
    ctx.set_font(&format!("18px {}", FONT));
    ctx.set_fill_style_str(&theme.info_text.as_css());
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    let _ = ctx.fill_text(text, cx, cy);
}

fn render_win_banner(ctx: &CanvasRenderingContext2d, state: &GameState, theme: &Theme, width: u32, height: u32) {
    let w = width as f64;
    let h = height as f64;
    // Slow pulse so the banner reads as live
    let pulse = 0.75 + 0.25 * (state.frame() as f64 / 12.0).sin();

    ctx.set_fill_style_str(&theme.background.as_css_alpha(0.8));
    ctx.fill_rect(0.0, h / 2.0 - 50.0, w, 100.0);
    ctx.set_font(&format!("bold 40px {}", FONT));
    ctx.set_fill_style_str(&theme.win_color.as_css_alpha(pulse));
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    let _ = ctx.fill_text("PUZZLE COMPLETE", w / 2.0, h / 2.0);
}

fn render_message(ctx: &CanvasRenderingContext2d, theme: &Theme, message: &str, width: u32, height: u32) {
    let font_size = 18.0;
    let msg_y = height as f64 - 30.0;

    ctx.set_font(&format!("{}px {}", font_size, FONT));
    ctx.set_fill_style_str(&theme.background.as_css_alpha(0.8));
    let metrics = ctx.measure_text(message).ok();
    let msg_width = metrics.map(|m| m.width()).unwrap_or(200.0) + 40.0;
    ctx.fill_rect(
        (width as f64 - msg_width) / 2.0,
        msg_y - font_size,
        msg_width,
        font_size * 2.0,
    );

    ctx.set_fill_style_str(&theme.message_text.as_css());
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    let _ = ctx.fill_text(message, width as f64 / 2.0, msg_y);
}

fn draw_sprite(ctx: &CanvasRenderingContext2d, sprite: &HtmlCanvasElement, rect: &Rect) {
    let _ = ctx.draw_image_with_html_canvas_element_and_dw_and_dh(sprite, rect.x, rect.y, rect.width, rect.height);
}
