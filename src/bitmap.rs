//! Pixel buffer collaborator: the [`PixelBuffer`] contract the rasterizer
//! draws through, and [`Bitmap`], the concrete ARGB32 store.
//!
//! The rasterizer guarantees it never reads or writes out of bounds, so
//! the contract does not require re-validation; `Bitmap` still
//! debug-asserts to catch violations during development.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::color::Color;
use crate::error::{CanvasError, Result};

// ============================================================================
// PixelBuffer trait
// ============================================================================

/// Bounds-checked pixel store the rasterizer blends into.
///
/// Coordinates passed to `get_pixel`/`set_pixel` must satisfy
/// `x < width()` and `y < height()`; out-of-range access is a contract
/// violation by the caller.
pub trait PixelBuffer {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn get_pixel(&self, x: u32, y: u32) -> Color;
    fn set_pixel(&mut self, x: u32, y: u32, color: Color);
}

// ============================================================================
// Bitmap — ARGB32 row-major store
// ============================================================================

/// In-memory ARGB32 pixel buffer.
///
/// Pixels are stored row-major as packed 32-bit words with alpha in the
/// high byte (see [`Color::to_argb`]). Every read and write path in the
/// crate goes through this one layout.
#[derive(Debug, Clone)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
    generation_id: Option<u32>,
}

impl Bitmap {
    /// Allocate a buffer cleared to transparent black.
    ///
    /// Zero dimensions are a construction error, not a runtime
    /// condition.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(CanvasError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
            generation_id: None,
        })
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height, "pixel ({x},{y}) out of bounds");
        y as usize * self.width as usize + x as usize
    }

    /// Overwrite every pixel with `color` (no blending).
    pub fn clear(&mut self, color: Color) {
        let argb = color.to_argb();
        self.pixels.fill(argb);
    }

    /// Export row-major bytes, 4 per pixel, most significant byte first
    /// within each ARGB32 word (alpha, red, green, blue).
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for argb in &self.pixels {
            out.extend_from_slice(&argb.to_be_bytes());
        }
        out
    }

    /// Assign a unique generation id from `generator`. Callers that track
    /// bitmap identity across mutations own the generator; there is no
    /// process-wide counter.
    pub fn assign_id(&mut self, generator: &IdGenerator) {
        self.generation_id = Some(generator.next());
    }

    pub fn generation_id(&self) -> Option<u32> {
        self.generation_id
    }
}

impl PixelBuffer for Bitmap {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn get_pixel(&self, x: u32, y: u32) -> Color {
        Color::from_argb(self.pixels[self.index(x, y)])
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        let i = self.index(x, y);
        self.pixels[i] = color.to_argb();
    }
}

// ============================================================================
// IdGenerator
// ============================================================================

/// Monotonic id source with instance lifecycle.
///
/// Owned by whichever registry or cache needs unique ids; ids are unique
/// per generator instance, not per process.
#[derive(Debug, Default)]
pub struct IdGenerator {
    next: AtomicU32,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> u32 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

// ============================================================================
// Tests
// ============================================================================
