//! Paint: the style/color/blend configuration attached to a drawing call.

use crate::color::Color;

// ============================================================================
// Style enums
// ============================================================================

/// Whether geometry is filled, stroked, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    #[default]
    Fill,
    Stroke,
    FillAndStroke,
}

/// Stroke end-cap shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokeCap {
    #[default]
    Butt,
    Round,
    Square,
}

/// Stroke corner join shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokeJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Porter-Duff-style compositing operation.
///
/// The compositor implements `Clear`, `Src`, `Dst`, `SrcOver`, `DstOver`,
/// and `Plus`; every other mode deliberately falls back to passing the
/// source color through (see `compositor::blend`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    Clear,
    Src,
    Dst,
    #[default]
    SrcOver,
    DstOver,
    SrcIn,
    DstIn,
    SrcOut,
    DstOut,
    SrcAtop,
    DstAtop,
    Xor,
    Plus,
    Multiply,
    Screen,
    Darken,
    Lighten,
}

// ============================================================================
// Paint
// ============================================================================

/// Drawing configuration: color, alpha, style, stroke geometry, blend
/// mode, and anti-aliasing.
///
/// Paints are copied, never shared: a draw call that needs a
/// style-restricted variant (splitting `FillAndStroke` into a fill pass
/// and a stroke pass) clones and adjusts its own copy.
#[derive(Debug, Clone, PartialEq)]
pub struct Paint {
    pub color: Color,
    /// Extra opacity 0-255, multiplied into the color's own alpha at
    /// resolution time.
    pub alpha: u8,
    pub style: Style,
    pub stroke_width: f64,
    pub stroke_cap: StrokeCap,
    pub stroke_join: StrokeJoin,
    pub blend_mode: BlendMode,
    pub anti_alias: bool,
}

impl Paint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of this paint restricted to the given style.
    pub fn with_style(&self, style: Style) -> Paint {
        let mut p = self.clone();
        p.style = style;
        p
    }

    pub fn set_color(&mut self, color: Color) -> &mut Self {
        self.color = color;
        self
    }

    pub fn set_alpha(&mut self, alpha: u8) -> &mut Self {
        self.alpha = alpha;
        self
    }

    pub fn set_style(&mut self, style: Style) -> &mut Self {
        self.style = style;
        self
    }

    pub fn set_stroke_width(&mut self, width: f64) -> &mut Self {
        self.stroke_width = width;
        self
    }

    pub fn set_blend_mode(&mut self, mode: BlendMode) -> &mut Self {
        self.blend_mode = mode;
        self
    }

    pub fn set_anti_alias(&mut self, aa: bool) -> &mut Self {
        self.anti_alias = aa;
        self
    }
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            alpha: 255,
            style: Style::Fill,
            stroke_width: 1.0,
            stroke_cap: StrokeCap::Butt,
            stroke_join: StrokeJoin::Miter,
            blend_mode: BlendMode::SrcOver,
            anti_alias: false,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
