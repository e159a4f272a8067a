//! Drawing backends.
//!
//! A [`Device`] is the pixel-owning target a canvas draws into. The
//! canvas resolves transform, clip, and paint, then hands device-space
//! geometry to one of these backends: [`RasterDevice`] rasterizes into a
//! [`Bitmap`], [`NullDevice`] swallows everything (measurement and
//! testing). A GPU backend would implement the same trait.
//!
//! Every drawing call answers with a [`DrawStatus`] so callers can tell
//! "drawn exactly" from "intentionally approximated" from "not
//! implemented" without inspecting pixels.

use log::debug;

use crate::bitmap::{Bitmap, PixelBuffer};
use crate::color::Color;
use crate::geometry::{Point, Rect};
use crate::paint::Paint;
use crate::path::Path;
use crate::raster::{PathFillMode, Rasterizer};
use crate::text::PositionedGlyph;

// ============================================================================
// DrawStatus
// ============================================================================

/// Outcome of a drawing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawStatus {
    /// Pixels written, geometry honored exactly (up to rasterization).
    Drawn,
    /// Pixels written via a documented approximation (bounding-box path
    /// fill).
    Approximated,
    /// Nothing written: geometry was empty after transform and clip.
    Skipped,
    /// The backend does not implement this operation; nothing written.
    Unsupported,
}

// ============================================================================
// Device trait
// ============================================================================

/// Drawing backend contract.
///
/// Geometry is in device space; `clip` is the resolved clip rectangle
/// (already intersected down the canvas's clip stack). Backends clamp to
/// it and to their own extent.
pub trait Device {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Full device extent as a rect, the base of every clip stack.
    fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width() as f64, self.height() as f64)
    }

    /// Overwrite every pixel, ignoring clip (whole-surface reset).
    fn clear(&mut self, color: Color);

    fn draw_rect(&mut self, rect: &Rect, paint: &Paint, clip: &Rect) -> DrawStatus;
    fn draw_line(&mut self, a: &Point, b: &Point, paint: &Paint, clip: &Rect) -> DrawStatus;
    fn draw_path(&mut self, path: &Path, paint: &Paint, clip: &Rect) -> DrawStatus;
    fn draw_glyphs(&mut self, glyphs: &[PositionedGlyph], paint: &Paint, clip: &Rect)
        -> DrawStatus;

    /// Rounded rectangles are not yet supported by any backend; the
    /// default keeps that explicit instead of degrading silently.
    fn draw_round_rect(&mut self, _rect: &Rect, _rx: f64, _ry: f64, _paint: &Paint, _clip: &Rect) -> DrawStatus {
        DrawStatus::Unsupported
    }

    /// Ovals are not yet supported by any backend.
    fn draw_oval(&mut self, _rect: &Rect, _paint: &Paint, _clip: &Rect) -> DrawStatus {
        DrawStatus::Unsupported
    }

    /// Complete any pending work. The raster backend writes pixels
    /// synchronously, so its flush is a no-op.
    fn flush(&mut self) {}
}

// ============================================================================
// RasterDevice
// ============================================================================

/// CPU rasterizing backend over an owned [`Bitmap`].
pub struct RasterDevice {
    bitmap: Bitmap,
    fill_mode: PathFillMode,
}

impl RasterDevice {
    pub fn new(bitmap: Bitmap) -> Self {
        Self {
            bitmap,
            fill_mode: PathFillMode::default(),
        }
    }

    /// Select how path interiors are filled (bounding-box compatibility
    /// vs. scanline).
    pub fn set_path_fill_mode(&mut self, mode: PathFillMode) {
        self.fill_mode = mode;
    }

    pub fn path_fill_mode(&self) -> PathFillMode {
        self.fill_mode
    }

    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    pub fn bitmap_mut(&mut self) -> &mut Bitmap {
        &mut self.bitmap
    }

    pub fn into_bitmap(self) -> Bitmap {
        self.bitmap
    }
}

impl Device for RasterDevice {
    fn width(&self) -> u32 {
        self.bitmap.width()
    }

    fn height(&self) -> u32 {
        self.bitmap.height()
    }

    fn clear(&mut self, color: Color) {
        self.bitmap.clear(color);
    }

    fn draw_rect(&mut self, rect: &Rect, paint: &Paint, clip: &Rect) -> DrawStatus {
        let mut raster = Rasterizer::new(&mut self.bitmap, clip);
        raster.draw_rect(rect, paint);
        DrawStatus::Drawn
    }

    fn draw_line(&mut self, a: &Point, b: &Point, paint: &Paint, clip: &Rect) -> DrawStatus {
        let mut raster = Rasterizer::new(&mut self.bitmap, clip);
        raster.draw_line(a, b, paint);
        DrawStatus::Drawn
    }

    fn draw_path(&mut self, path: &Path, paint: &Paint, clip: &Rect) -> DrawStatus {
        let mode = self.fill_mode;
        let mut raster = Rasterizer::new(&mut self.bitmap, clip);
        if raster.draw_path(path, paint, mode) {
            debug!("draw_path used bounding-box approximation");
            DrawStatus::Approximated
        } else {
            DrawStatus::Drawn
        }
    }

    fn draw_glyphs(
        &mut self,
        glyphs: &[PositionedGlyph],
        paint: &Paint,
        clip: &Rect,
    ) -> DrawStatus {
        if glyphs.is_empty() {
            return DrawStatus::Skipped;
        }
        let mut raster = Rasterizer::new(&mut self.bitmap, clip);
        for glyph in glyphs {
            raster.fill_rect(&glyph.bounds, paint);
        }
        // Placeholder boxes, not real outlines.
        DrawStatus::Approximated
    }
}

// ============================================================================
// NullDevice
// ============================================================================

/// Backend that accepts every call and writes nothing. Useful for
/// measurement passes and for tests that only care about canvas state.
pub struct NullDevice {
    width: u32,
    height: u32,
}

impl NullDevice {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Device for NullDevice {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self, _color: Color) {}

    fn draw_rect(&mut self, _rect: &Rect, _paint: &Paint, _clip: &Rect) -> DrawStatus {
        DrawStatus::Drawn
    }

    fn draw_line(&mut self, _a: &Point, _b: &Point, _paint: &Paint, _clip: &Rect) -> DrawStatus {
        DrawStatus::Drawn
    }

    fn draw_path(&mut self, _path: &Path, _paint: &Paint, _clip: &Rect) -> DrawStatus {
        DrawStatus::Drawn
    }

    fn draw_glyphs(
        &mut self,
        _glyphs: &[PositionedGlyph],
        _paint: &Paint,
        _clip: &Rect,
    ) -> DrawStatus {
        DrawStatus::Drawn
    }
}

// ============================================================================
// Tests
// ============================================================================
