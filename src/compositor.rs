//! Color compositing: alpha application, blend-mode math, and
//! coverage-based blending.
//!
//! Blend-mode math runs in a normalized premultiplied f64 working space
//! and converts back to 8-bit straight-alpha channels at the end.
//! Coverage blending (used by the anti-aliased line rasterizer) is a
//! separate compositing step from blend-mode compositing and must not be
//! folded into it.

use crate::color::Color;
use crate::paint::BlendMode;

/// Scale a color's alpha channel by `alpha / 255` (truncating integer
/// math). RGB channels are untouched; this is alpha application, not
/// premultiplication.
#[inline]
pub fn apply_alpha(color: Color, alpha: u8) -> Color {
    Color {
        a: ((color.a as u32 * alpha as u32) / 255) as u8,
        ..color
    }
}

/// Premultiplied f64 working-space color.
#[derive(Debug, Clone, Copy)]
struct Premul {
    r: f64,
    g: f64,
    b: f64,
    a: f64,
}

impl Premul {
    #[inline]
    fn from_color(c: &Color) -> Self {
        let a = c.a as f64 / 255.0;
        Self {
            r: c.r as f64 / 255.0 * a,
            g: c.g as f64 / 255.0 * a,
            b: c.b as f64 / 255.0 * a,
            a,
        }
    }

    /// Back to straight-alpha 8-bit. Zero alpha is defined as transparent
    /// black so no undefined channels leak out of a division by zero.
    #[inline]
    fn to_color(self) -> Color {
        if self.a <= 0.0 {
            return Color::TRANSPARENT;
        }
        let clamp = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color {
            r: clamp(self.r / self.a),
            g: clamp(self.g / self.a),
            b: clamp(self.b / self.a),
            a: clamp(self.a),
        }
    }
}

/// Combine a source color with the destination pixel under `mode`.
///
/// Implemented modes: `Clear`, `Src`, `Dst`, `SrcOver`, `DstOver`,
/// `Plus`. Every other mode returns the source color unchanged — a
/// deliberate fallback so an unsupported mode renders predictably
/// instead of corrupting pixel data.
pub fn blend(src: Color, dst: Color, mode: BlendMode) -> Color {
    match mode {
        BlendMode::Clear => Color::TRANSPARENT,
        BlendMode::Src => src,
        BlendMode::Dst => dst,
        BlendMode::SrcOver => {
            let s = Premul::from_color(&src);
            let d = Premul::from_color(&dst);
            let inv_sa = 1.0 - s.a;
            Premul {
                r: s.r + d.r * inv_sa,
                g: s.g + d.g * inv_sa,
                b: s.b + d.b * inv_sa,
                a: s.a + d.a * inv_sa,
            }
            .to_color()
        }
        BlendMode::DstOver => {
            let s = Premul::from_color(&src);
            let d = Premul::from_color(&dst);
            let inv_da = 1.0 - d.a;
            Premul {
                r: d.r + s.r * inv_da,
                g: d.g + s.g * inv_da,
                b: d.b + s.b * inv_da,
                a: d.a + s.a * inv_da,
            }
            .to_color()
        }
        BlendMode::Plus => {
            let s = Premul::from_color(&src);
            let d = Premul::from_color(&dst);
            Premul {
                r: (s.r + d.r).min(1.0),
                g: (s.g + d.g).min(1.0),
                b: (s.b + d.b).min(1.0),
                a: (s.a + d.a).min(1.0),
            }
            .to_color()
        }
        // Unimplemented modes pass the source through.
        _ => src,
    }
}

/// Interpolate between source and destination by an anti-aliasing
/// coverage value in 0..=255.
///
/// `result = src * cover/255 + dst * (1 - cover/255)` per channel. This
/// is the edge-coverage compositing step; it is not an alpha multiply
/// into [`blend`].
#[inline]
pub fn coverage_blend(src: Color, dst: Color, cover: u8) -> Color {
    let c = cover as u32;
    let inv = 255 - c;
    let mix = |s: u8, d: u8| ((s as u32 * c + d as u32 * inv) / 255) as u8;
    Color {
        r: mix(src.r, dst.r),
        g: mix(src.g, dst.g),
        b: mix(src.b, dst.b),
        a: mix(src.a, dst.a),
    }
}

// ============================================================================
// Tests
// ============================================================================
