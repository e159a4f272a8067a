//! Color value type and ARGB32 packing.
//!
//! Channels are `u8`, so the [0, 255] range precondition is enforced by
//! the type rather than a runtime check. All arithmetic returns new
//! values.
//!
//! The one packed layout used everywhere in this crate is ARGB32: alpha
//! in the high byte of a 32-bit word (`A<<24 | R<<16 | G<<8 | B`), rows
//! exported most-significant byte first.

/// RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);
    pub const BLACK: Color = Color::new(0, 0, 0, 255);
    pub const WHITE: Color = Color::new(255, 255, 255, 255);
    pub const RED: Color = Color::new(255, 0, 0, 255);
    pub const GREEN: Color = Color::new(0, 255, 0, 255);
    pub const BLUE: Color = Color::new(0, 0, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Unpack from an ARGB32 word (alpha in the high byte).
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    /// Pack into an ARGB32 word (alpha in the high byte).
    pub const fn to_argb(&self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Same color with a replaced alpha channel.
    pub const fn with_alpha(&self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Color with RGB channels premultiplied by alpha (truncating
    /// integer math). Alpha is unchanged.
    pub fn premultiplied(&self) -> Self {
        let a = self.a as u32;
        Self {
            r: ((self.r as u32 * a) / 255) as u8,
            g: ((self.g as u32 * a) / 255) as u8,
            b: ((self.b as u32 * a) / 255) as u8,
            a: self.a,
        }
    }

    /// Channel-wise linear interpolation from `self` toward `other`.
    ///
    /// Panics if `t` is outside [0, 1].
    pub fn lerp(&self, other: &Color, t: f64) -> Self {
        assert!((0.0..=1.0).contains(&t), "lerp factor {t} outside [0, 1]");
        let mix = |a: u8, b: u8| -> u8 { (a as f64 + (b as f64 - a as f64) * t).round() as u8 };
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
