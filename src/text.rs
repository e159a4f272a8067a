//! Text layout collaborator.
//!
//! Real shaping, hinting, and glyph outlines live outside this crate. A
//! [`TextLayout`] implementation hands back glyph boxes already
//! positioned in the caller's coordinate space, and the canvas treats
//! each box as an opaque fillable rectangle.

use crate::geometry::{Point, Rect};

/// Minimal font description the layout collaborator needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    /// Em size in user-space units.
    pub size: f64,
}

impl Default for Font {
    fn default() -> Self {
        Self { size: 12.0 }
    }
}

/// One positioned glyph: an opaque box in the caller's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionedGlyph {
    pub bounds: Rect,
}

/// Lays out text into pre-positioned glyph boxes.
pub trait TextLayout {
    fn layout(&self, text: &str, font: &Font, origin: Point) -> Vec<PositionedGlyph>;
}

/// Fixed-advance placeholder layout: one box per non-whitespace
/// character, advancing by 60% of the em size. The canvas fills these
/// boxes as rectangles; real outlines are a different collaborator's
/// job.
#[derive(Debug, Default)]
pub struct BoxTextLayout;

impl TextLayout for BoxTextLayout {
    fn layout(&self, text: &str, font: &Font, origin: Point) -> Vec<PositionedGlyph> {
        let advance = font.size * 0.6;
        let mut out = Vec::new();
        for (i, ch) in text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let left = origin.x + i as f64 * advance;
            // Origin sits on the baseline; boxes extend one em above it.
            out.push(PositionedGlyph {
                bounds: Rect::new(left, origin.y - font.size, left + advance * 0.9, origin.y),
            });
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_layout_one_box_per_visible_char() {
        let glyphs = BoxTextLayout.layout("ab c", &Font::default(), Point::new(0.0, 20.0));
        assert_eq!(glyphs.len(), 3);
    }

    #[test]
    fn test_box_layout_advances_monotonically() {
        let glyphs = BoxTextLayout.layout("abc", &Font { size: 10.0 }, Point::new(5.0, 30.0));
        assert!(glyphs[0].bounds.left < glyphs[1].bounds.left);
        assert!(glyphs[1].bounds.left < glyphs[2].bounds.left);
        // Boxes sit above the baseline.
        assert_eq!(glyphs[0].bounds.bottom, 30.0);
        assert_eq!(glyphs[0].bounds.top, 20.0);
    }

    #[test]
    fn test_box_layout_empty_text() {
        assert!(BoxTextLayout
            .layout("", &Font::default(), Point::new(0.0, 0.0))
            .is_empty());
    }
}
