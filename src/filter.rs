//! Color filter collaborator.
//!
//! A color filter is a pluggable `Color -> Color` transform the canvas
//! applies at one well-defined point: after paint-color resolution
//! (color with paint alpha applied) and before blending. The filter's
//! output is passed through unmodified.

use crate::color::Color;

/// Per-color transform applied before compositing.
pub trait ColorFilter {
    fn filter(&self, color: Color) -> Color;
}

/// Any `Fn(Color) -> Color` is a color filter.
impl<F> ColorFilter for F
where
    F: Fn(Color) -> Color,
{
    fn filter(&self, color: Color) -> Color {
        self(color)
    }
}

/// Filter that multiplies every channel against a tint color.
pub struct TintFilter {
    pub tint: Color,
}

impl ColorFilter for TintFilter {
    fn filter(&self, color: Color) -> Color {
        let mul = |a: u8, b: u8| ((a as u32 * b as u32) / 255) as u8;
        Color {
            r: mul(color.r, self.tint.r),
            g: mul(color.g, self.tint.g),
            b: mul(color.b, self.tint.b),
            a: mul(color.a, self.tint.a),
        }
    }
}
