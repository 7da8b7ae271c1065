use crate::error::PuzzleError;
use crate::geometry;
use crate::piece::{EncodedImage, PieceId, PuzzlePiece};
use crate::{PIECE_COUNT, TARGET_HEIGHT, TARGET_WIDTH};
use image::codecs::png::PngEncoder;
use image::imageops::{self, FilterType};
use image::{ExtendedColorType, ImageEncoder, RgbaImage};

/// Configuration for the image processor
#[derive(Debug, Clone, Copy)]
pub struct ProcessorConfig {
    /// Width of the cropped canvas
    pub target_width: u32,
    /// Height of the cropped canvas
    pub target_height: u32,
    /// Resampling filter used when scaling the crop onto the canvas
    pub filter: FilterType,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            target_width: TARGET_WIDTH,
            target_height: TARGET_HEIGHT,
            filter: FilterType::Triangle,
        }
    }
}

/// Output of one upload: the full preview plus nine row-major pieces
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    pub preview: EncodedImage,
    pub pieces: Vec<PuzzlePiece>,
}

/// Turns raw image bytes into a preview and a set of puzzle pieces
#[derive(Debug, Clone, Default)]
pub struct ImageProcessor {
    config: ProcessorConfig,
}

impl ImageProcessor {
    pub fn new(config: ProcessorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Decode, crop, resample and slice an uploaded image
    ///
    /// Pure with respect to the caller's state: nothing is returned unless
    /// every step succeeds.
    pub fn process(&self, bytes: &[u8]) -> Result<ProcessedImage, PuzzleError> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|err| PuzzleError::Decode(err.to_string()))?
            .to_rgba8();
        let canvas = self.crop_and_resize(&decoded)?;
        let preview = encode_png(&canvas)?;

        let mut pieces = Vec::with_capacity(PIECE_COUNT);
        for id in PieceId::all() {
            let home = id.home();
            let cell = geometry::cell_bounds(home.column, home.row, canvas.width(), canvas.height());
            let slice = imageops::crop_imm(&canvas, cell.x, cell.y, cell.width, cell.height).to_image();
            pieces.push(PuzzlePiece::new(id, encode_png(&slice)?));
        }

        tracing::debug!(
            source_width = decoded.width(),
            source_height = decoded.height(),
            pieces = pieces.len(),
            "processed puzzle image"
        );

        Ok(ProcessedImage { preview, pieces })
    }

    /// Crop `source` to the target ratio and scale it to the target size
    pub fn crop_and_resize(&self, source: &RgbaImage) -> Result<RgbaImage, PuzzleError> {
        let (width, height) = source.dimensions();
        let (target_width, target_height) = (self.config.target_width, self.config.target_height);
        if width == 0 || height == 0 || target_width == 0 || target_height == 0 {
            return Err(PuzzleError::Dimensions);
        }

        let region = geometry::crop_region(width, height, target_width, target_height).to_pixels(width, height);
        let cropped = imageops::crop_imm(source, region.x, region.y, region.width, region.height).to_image();
        Ok(imageops::resize(&cropped, target_width, target_height, self.config.filter))
    }
}

fn encode_png(image: &RgbaImage) -> Result<EncodedImage, PuzzleError> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes)
        .write_image(image.as_raw(), image.width(), image.height(), ExtendedColorType::Rgba8)
        .map_err(|err| PuzzleError::Encode(err.to_string()))?;
    Ok(EncodedImage::from_png(bytes, image.width(), image.height()))
}
