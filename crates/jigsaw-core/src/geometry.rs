//! Crop, tiling and hit-test geometry
//!
//! Everything here is pure arithmetic so the image processor, the canvas
//! renderer and the terminal renderer agree on where things are.

use crate::GRID_SIZE;

/// Axis-aligned rectangle in fractional units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Half-open containment: the right and bottom edges are outside
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Snap to whole pixels inside a `bounds_width × bounds_height` raster
    ///
    /// Bounds must be non-zero. The result is at least one pixel on each axis.
    pub fn to_pixels(&self, bounds_width: u32, bounds_height: u32) -> PixelRect {
        let x = (self.x.max(0.0).round() as u32).min(bounds_width.saturating_sub(1));
        let y = (self.y.max(0.0).round() as u32).min(bounds_height.saturating_sub(1));
        let width = (self.width.round() as u32).clamp(1, bounds_width - x);
        let height = (self.height.round() as u32).clamp(1, bounds_height - y);
        PixelRect { x, y, width, height }
    }
}

/// Rectangle on the pixel grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

/// Centered region of a source image that matches the target aspect ratio
///
/// A source wider than the target keeps its full height and is trimmed
/// left and right; otherwise it keeps its full width and is trimmed top and
/// bottom. The region never letterboxes.
pub fn crop_region(src_width: u32, src_height: u32, target_width: u32, target_height: u32) -> Rect {
    let target_ratio = target_width as f64 / target_height as f64;
    let src_w = src_width as f64;
    let src_h = src_height as f64;

    if src_w / src_h > target_ratio {
        let height = src_h;
        let width = height * target_ratio;
        Rect::new((src_w - width) / 2.0, 0.0, width, height)
    } else {
        let width = src_w;
        let height = width / target_ratio;
        Rect::new(0.0, (src_h - height) / 2.0, width, height)
    }
}

/// Boundary `k` of `extent` split into [`GRID_SIZE`] near-equal spans
fn boundary(k: usize, extent: u32) -> u32 {
    (k as f64 * extent as f64 / GRID_SIZE as f64).round() as u32
}

/// Pixel bounds of grid cell (`column`, `row`) on a `width × height` canvas
///
/// Adjacent cells share an edge, so the nine cells tile the canvas exactly.
pub fn cell_bounds(column: usize, row: usize, width: u32, height: u32) -> PixelRect {
    let x0 = boundary(column, width);
    let x1 = boundary(column + 1, width);
    let y0 = boundary(row, height);
    let y1 = boundary(row + 1, height);
    PixelRect {
        x: x0,
        y: y0,
        width: x1 - x0,
        height: y1 - y0,
    }
}

/// A grid of equally sized cells separated by gaps
///
/// Used for both the board and the tray. Cells are numbered row-major.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub x: f64,
    pub y: f64,
    pub cell_width: f64,
    pub cell_height: f64,
    pub gap: f64,
    pub columns: usize,
    pub rows: usize,
}

impl GridLayout {
    /// A 3×3 grid
    pub fn square(x: f64, y: f64, cell_width: f64, cell_height: f64, gap: f64) -> Self {
        Self {
            x,
            y,
            cell_width,
            cell_height,
            gap,
            columns: GRID_SIZE,
            rows: GRID_SIZE,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.columns * self.rows
    }

    pub fn width(&self) -> f64 {
        self.columns as f64 * self.cell_width + self.columns.saturating_sub(1) as f64 * self.gap
    }

    pub fn height(&self) -> f64 {
        self.rows as f64 * self.cell_height + self.rows.saturating_sub(1) as f64 * self.gap
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width(), self.height())
    }

    pub fn cell_rect(&self, index: usize) -> Option<Rect> {
        if index >= self.cell_count() {
            return None;
        }
        let column = index % self.columns;
        let row = index / self.columns;
        Some(Rect::new(
            self.x + column as f64 * (self.cell_width + self.gap),
            self.y + row as f64 * (self.cell_height + self.gap),
            self.cell_width,
            self.cell_height,
        ))
    }

    /// Cell under a point, `None` outside the grid or inside a gap
    pub fn hit_test(&self, px: f64, py: f64) -> Option<usize> {
        let column = Self::axis_hit(px - self.x, self.cell_width, self.gap, self.columns)?;
        let row = Self::axis_hit(py - self.y, self.cell_height, self.gap, self.rows)?;
        Some(row * self.columns + column)
    }

    fn axis_hit(offset: f64, cell: f64, gap: f64, count: usize) -> Option<usize> {
        // NaN fails every comparison, so reject it explicitly
        if !offset.is_finite() || offset < 0.0 || cell <= 0.0 {
            return None;
        }
        let stride = cell + gap;
        let index = (offset / stride).floor() as usize;
        if index >= count || offset - index as f64 * stride >= cell {
            return None;
        }
        Some(index)
    }
}
