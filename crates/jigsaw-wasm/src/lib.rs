//! WebAssembly picture puzzle drawn on a canvas
//!
//! The host page owns the file picker and the DOM event wiring. It awaits
//! `file.arrayBuffer()`, hands the bytes to [`JigsawGame::upload_image`] and
//! forwards pointer, touch and drop events with their client coordinates.

use jigsaw_core::{Destination, DragPayload, EncodedImage, GestureEffect, PieceId, DRAG_PAYLOAD_MIME};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, KeyboardEvent, TouchEvent};

mod game;
mod layout;
mod render;
mod sprites;
mod theme;

// WASM tests require wasm-pack test to run
#[cfg(all(test, target_arch = "wasm32"))]
mod tests;

pub use game::GameState;
pub use layout::ScreenLayout;
pub use theme::Theme;

use sprites::SpriteCache;

// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

/// The main WASM game controller
#[wasm_bindgen]
pub struct JigsawGame {
    state: GameState,
    sprites: SpriteCache,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    theme: Theme,
    layout: ScreenLayout,
    width: u32,
    height: u32,
    dpr: f64, // Device pixel ratio for crisp rendering
}

#[wasm_bindgen]
impl JigsawGame {
    /// Create a new game attached to a canvas element
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<JigsawGame, JsValue> {
        let document = web_sys::window()
            .ok_or("No window")?
            .document()
            .ok_or("No document")?;

        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or("Canvas not found")?
            .dyn_into::<HtmlCanvasElement>()?;

        let ctx = canvas
            .get_context("2d")?
            .ok_or("Failed to get 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let mut game = JigsawGame {
            state: GameState::new(),
            sprites: SpriteCache::default(),
            canvas,
            ctx,
            theme: Theme::dark(),
            layout: ScreenLayout::compute(1100, 760),
            width: 1100,
            height: 760,
            dpr: 1.0,
        };
        game.resize(1100, 760);
        Ok(game)
    }

    /// Load an uploaded image; on error the previous puzzle stays
    ///
    /// Sprites are built before the session is touched, so a canvas failure
    /// leaves the old pieces and their sprites in place.
    #[wasm_bindgen]
    pub fn upload_image(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        let processed = match self.state.process(bytes) {
            Ok(processed) => processed,
            Err(err) => {
                warn(&format!("upload rejected: {}", err));
                self.render();
                return Err(JsValue::from_str(&err.to_string()));
            }
        };

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("No document")?;
        let sprites = match SpriteCache::build(&document, &processed) {
            Ok(sprites) => sprites,
            Err(err) => {
                warn("could not build piece sprites");
                self.state.show_message("Could not read that image");
                self.render();
                return Err(err);
            }
        };

        self.state.commit(processed);
        self.sprites = sprites;
        web_sys::console::log_1(&JsValue::from_str("puzzle image loaded"));
        self.render();
        Ok(())
    }

    /// MIME type to use for `dataTransfer.setData` with [`Self::drag_payload`]
    #[wasm_bindgen]
    pub fn drag_payload_mime() -> String {
        DRAG_PAYLOAD_MIME.to_string()
    }

    /// MIME type of the bytes returned by `preview_png` and `piece_png`
    #[wasm_bindgen]
    pub fn image_mime() -> String {
        EncodedImage::MIME.to_string()
    }

    /// Whether the start button should be enabled
    #[wasm_bindgen]
    pub fn can_start(&self) -> bool {
        self.state.can_start()
    }

    #[wasm_bindgen]
    pub fn start_game(&mut self) -> bool {
        let started = self.state.start_game();
        self.render();
        started
    }

    #[wasm_bindgen]
    pub fn is_started(&self) -> bool {
        self.state.is_started()
    }

    /// PNG bytes of the cropped preview
    #[wasm_bindgen]
    pub fn preview_png(&self) -> Option<Vec<u8>> {
        self.state
            .orchestrator()
            .session()
            .preview()
            .map(|image| image.bytes().to_vec())
    }

    /// PNG bytes of one piece
    #[wasm_bindgen]
    pub fn piece_png(&self, piece_id: u8) -> Option<Vec<u8>> {
        let id = PieceId::try_from(piece_id).ok()?;
        self.state
            .orchestrator()
            .session()
            .piece(id)
            .map(|piece| piece.image().bytes().to_vec())
    }

    #[wasm_bindgen]
    pub fn pointer_down(&mut self, client_x: f64, client_y: f64) {
        let (x, y) = self.to_canvas(client_x, client_y);
        let surface = self.layout.surface();
        self.state.pointer_down(&surface, x, y);
        self.render();
    }

    #[wasm_bindgen]
    pub fn pointer_move(&mut self, client_x: f64, client_y: f64) {
        let (x, y) = self.to_canvas(client_x, client_y);
        let surface = self.layout.surface();
        self.state.pointer_move(&surface, x, y);
        self.render();
    }

    /// Returns true when this release completed the puzzle
    #[wasm_bindgen]
    pub fn pointer_up(&mut self, client_x: f64, client_y: f64) -> bool {
        let (x, y) = self.to_canvas(client_x, client_y);
        let surface = self.layout.surface();
        let effect = self.state.pointer_up(&surface, x, y);
        self.finish(effect)
    }

    #[wasm_bindgen]
    pub fn touch_start(&mut self, event: &TouchEvent) {
        let Some((x, y)) = self.touch_point(event) else {
            return;
        };
        let surface = self.layout.surface();
        if let GestureEffect::Lifted(_) = self.state.touch_start(&surface, x, y) {
            // Keep the page from scrolling under the finger
            event.prevent_default();
        }
        self.render();
    }

    #[wasm_bindgen]
    pub fn touch_move(&mut self, event: &TouchEvent) {
        let Some((x, y)) = self.touch_point(event) else {
            return;
        };
        if self.state.orchestrator().dragged_piece().is_some() {
            event.prevent_default();
        }
        let surface = self.layout.surface();
        self.state.touch_move(&surface, x, y);
        self.render();
    }

    /// Resolves the drop from `changedTouches[0]`
    #[wasm_bindgen]
    pub fn touch_end(&mut self, event: &TouchEvent) -> bool {
        let Some((x, y)) = self.touch_point(event) else {
            let effect = self.state.cancel_drag();
            return self.finish(effect);
        };
        let surface = self.layout.surface();
        let effect = self.state.touch_end(&surface, x, y);
        self.finish(effect)
    }

    /// Handle an HTML5 drop carrying a JSON payload
    #[wasm_bindgen]
    pub fn drop_payload(&mut self, client_x: f64, client_y: f64, payload: &str) -> bool {
        let (x, y) = self.to_canvas(client_x, client_y);
        let surface = self.layout.surface();
        let effect = self.state.drop_payload(&surface, x, y, payload);
        if effect == GestureEffect::Rejected {
            warn("drop ignored: malformed payload");
        }
        self.finish(effect)
    }

    /// JSON to put in `dataTransfer` for a drag of `piece_id`
    #[wasm_bindgen]
    pub fn drag_payload(&self, piece_id: u8) -> Option<String> {
        PieceId::try_from(piece_id)
            .ok()
            .map(|id| DragPayload::new(id).encode())
    }

    /// Place a piece directly; returns true if that completed the puzzle
    #[wasm_bindgen]
    pub fn move_piece(&mut self, piece_id: u8, slot: usize) -> Result<bool, JsValue> {
        let id = PieceId::try_from(piece_id).map_err(|err| JsValue::from_str(&err.to_string()))?;
        let outcome = self
            .state
            .move_piece(id, Destination::Slot(slot))
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        if outcome.completed {
            self.notify_complete();
        }
        self.render();
        Ok(outcome.completed)
    }

    #[wasm_bindgen]
    pub fn move_to_tray(&mut self, piece_id: u8) -> Result<(), JsValue> {
        let id = PieceId::try_from(piece_id).map_err(|err| JsValue::from_str(&err.to_string()))?;
        self.state
            .move_piece(id, Destination::Tray)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        self.render();
        Ok(())
    }

    /// Handle keyboard input
    #[wasm_bindgen]
    pub fn handle_key(&mut self, event: &KeyboardEvent) -> bool {
        let handled = self.state.handle_key(&event.key());
        self.render();
        handled
    }

    /// Update game state (call from requestAnimationFrame)
    #[wasm_bindgen]
    pub fn tick(&mut self) {
        self.state.tick();
        self.render();
    }

    #[wasm_bindgen]
    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    /// Set the color theme
    #[wasm_bindgen]
    pub fn set_theme(&mut self, theme_name: &str) {
        self.theme = Theme::by_name(theme_name);
        self.render();
    }

    /// Get current game state as JSON
    #[wasm_bindgen]
    pub fn get_state_json(&self) -> String {
        serde_json::to_string(&self.state.to_serializable()).unwrap_or_default()
    }

    /// Resize the game canvas
    #[wasm_bindgen]
    pub fn resize(&mut self, width: u32, height: u32) {
        // Minimum sizes
        let width = width.max(640);
        let height = height.max(480);

        self.width = width;
        self.height = height;

        // Update dpr in case it changed (e.g., moving to different monitor)
        self.dpr = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0);

        // Set actual canvas resolution (scaled by dpr for crisp rendering)
        self.canvas.set_width((width as f64 * self.dpr) as u32);
        self.canvas.set_height((height as f64 * self.dpr) as u32);

        // Set CSS display size (logical pixels)
        let html_element: &HtmlElement = self.canvas.as_ref();
        let style = html_element.style();
        let _ = style.set_property("width", &format!("{}px", width));
        let _ = style.set_property("height", &format!("{}px", height));

        let _ = self.ctx.reset_transform();
        let _ = self.ctx.scale(self.dpr, self.dpr);

        self.layout = ScreenLayout::compute(width, height);
        self.render();
    }

    #[wasm_bindgen]
    pub fn get_width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen]
    pub fn get_height(&self) -> u32 {
        self.height
    }

    /// Map client coordinates to logical canvas coordinates
    fn to_canvas(&self, client_x: f64, client_y: f64) -> (f64, f64) {
        let rect = self.canvas.get_bounding_client_rect();
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return (client_x, client_y);
        }
        let x = (client_x - rect.left()) * self.width as f64 / rect.width();
        let y = (client_y - rect.top()) * self.height as f64 / rect.height();
        (x, y)
    }

    fn touch_point(&self, event: &TouchEvent) -> Option<(f64, f64)> {
        let touch = event.changed_touches().item(0)?;
        Some(self.to_canvas(touch.client_x() as f64, touch.client_y() as f64))
    }

    fn finish(&mut self, effect: GestureEffect) -> bool {
        let completed = effect.completed();
        if completed {
            self.notify_complete();
        }
        self.render();
        completed
    }

    fn notify_complete(&mut self) {
        // Draw the solved board before the alert blocks the page
        self.render();
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message("Puzzle complete!");
        }
    }

    /// Render the game to canvas
    fn render(&mut self) {
        render::render_game(
            &self.ctx,
            &mut self.state,
            &self.sprites,
            &self.theme,
            &self.layout,
            self.width,
            self.height,
        );
    }
}
