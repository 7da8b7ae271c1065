//! Offscreen canvases holding decoded piece images
//!
//! Pieces never change after an upload, so each one is decoded once and
//! blitted with `drawImage` from then on.

use jigsaw_core::{EncodedImage, PieceId, ProcessedImage, PIECE_COUNT};
use wasm_bindgen::{Clamped, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, ImageData};

#[derive(Default)]
pub struct SpriteCache {
    preview: Option<HtmlCanvasElement>,
    pieces: Vec<Option<HtmlCanvasElement>>,
}

impl SpriteCache {
    /// Decode the preview and every piece of a freshly processed image
    pub fn build(document: &Document, processed: &ProcessedImage) -> Result<Self, JsValue> {
        let preview = Some(rasterize(document, &processed.preview)?);

        let mut pieces = vec![None; PIECE_COUNT];
        for piece in &processed.pieces {
            if let Some(sprite) = pieces.get_mut(piece.id().index()) {
                *sprite = Some(rasterize(document, piece.image())?);
            }
        }

        Ok(Self { preview, pieces })
    }

    pub fn preview(&self) -> Option<&HtmlCanvasElement> {
        self.preview.as_ref()
    }

    pub fn piece(&self, id: PieceId) -> Option<&HtmlCanvasElement> {
        self.pieces.get(id.index()).and_then(Option::as_ref)
    }
}

fn rasterize(document: &Document, image: &EncodedImage) -> Result<HtmlCanvasElement, JsValue> {
    let pixels = image.decode().map_err(|err| JsValue::from_str(&err.to_string()))?;

    let canvas = document.create_element("canvas")?.dyn_into::<HtmlCanvasElement>()?;
    canvas.set_width(pixels.width());
    canvas.set_height(pixels.height());

    let ctx = canvas
        .get_context("2d")?
        .ok_or("Failed to get 2d context")?
        .dyn_into::<CanvasRenderingContext2d>()?;
    let data = ImageData::new_with_u8_clamped_array_and_sh(Clamped(pixels.as_raw().as_slice()), pixels.width(), pixels.height())?;
    ctx.put_image_data(&data, 0.0, 0.0)?;

    Ok(canvas)
}
