//! 3x3 affine transformation matrix with value semantics.
//!
//! Components:
//!
//! ```text
//!   | scale_x  skew_x   trans_x |
//!   | skew_y   scale_y  trans_y |
//!   | persp0   persp1   persp2  |
//! ```
//!
//! The perspective row stays `[0, 0, 1]` for every matrix this crate
//! constructs; the fields exist so the storage layout matches the full
//! 3x3 form.
//!
//! All composition returns a **new** matrix. The canvas save/restore stack
//! pushes copies of `Matrix2D`, so an operation on one stack frame can
//! never alias into another — the class of bug a shared mutable matrix
//! invites is impossible by construction.

use crate::geometry::{Point, Rect};

/// 2D affine transformation matrix (3x3, value type).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix2D {
    pub scale_x: f64,
    pub skew_x: f64,
    pub trans_x: f64,
    pub skew_y: f64,
    pub scale_y: f64,
    pub trans_y: f64,
    pub persp0: f64,
    pub persp1: f64,
    pub persp2: f64,
}

impl Matrix2D {
    /// Identity matrix.
    pub fn identity() -> Self {
        Self {
            scale_x: 1.0,
            skew_x: 0.0,
            trans_x: 0.0,
            skew_y: 0.0,
            scale_y: 1.0,
            trans_y: 0.0,
            persp0: 0.0,
            persp1: 0.0,
            persp2: 1.0,
        }
    }

    /// Translation matrix.
    pub fn translation(dx: f64, dy: f64) -> Self {
        let mut m = Self::identity();
        m.trans_x = dx;
        m.trans_y = dy;
        m
    }

    /// Non-uniform scaling matrix.
    pub fn scaling(sx: f64, sy: f64) -> Self {
        let mut m = Self::identity();
        m.scale_x = sx;
        m.scale_y = sy;
        m
    }

    /// Rotation matrix for an angle in radians.
    pub fn rotation(radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        let mut m = Self::identity();
        m.scale_x = cos;
        m.skew_x = -sin;
        m.skew_y = sin;
        m.scale_y = cos;
        m
    }

    /// Returns `true` if this is exactly the identity matrix.
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Matrix product `self * other` as a new value.
    ///
    /// Points transform as column vectors (`device = M * p`), so
    /// `a.concat(b)` applies `b` first, then `a` — the post-multiply
    /// composition the canvas uses for its transform ops.
    pub fn concat(&self, other: &Matrix2D) -> Matrix2D {
        let a = self;
        let b = other;
        Matrix2D {
            scale_x: a.scale_x * b.scale_x + a.skew_x * b.skew_y + a.trans_x * b.persp0,
            skew_x: a.scale_x * b.skew_x + a.skew_x * b.scale_y + a.trans_x * b.persp1,
            trans_x: a.scale_x * b.trans_x + a.skew_x * b.trans_y + a.trans_x * b.persp2,
            skew_y: a.skew_y * b.scale_x + a.scale_y * b.skew_y + a.trans_y * b.persp0,
            scale_y: a.skew_y * b.skew_x + a.scale_y * b.scale_y + a.trans_y * b.persp1,
            trans_y: a.skew_y * b.trans_x + a.scale_y * b.trans_y + a.trans_y * b.persp2,
            persp0: a.persp0 * b.scale_x + a.persp1 * b.skew_y + a.persp2 * b.persp0,
            persp1: a.persp0 * b.skew_x + a.persp1 * b.scale_y + a.persp2 * b.persp1,
            persp2: a.persp0 * b.trans_x + a.persp1 * b.trans_y + a.persp2 * b.persp2,
        }
    }

    /// `self` followed by a translation in local space.
    pub fn translated(&self, dx: f64, dy: f64) -> Matrix2D {
        self.concat(&Matrix2D::translation(dx, dy))
    }

    /// `self` followed by a scale in local space.
    pub fn scaled(&self, sx: f64, sy: f64) -> Matrix2D {
        self.concat(&Matrix2D::scaling(sx, sy))
    }

    /// `self` followed by a rotation (radians) in local space.
    pub fn rotated(&self, radians: f64) -> Matrix2D {
        self.concat(&Matrix2D::rotation(radians))
    }

    /// Map a single point through the matrix.
    #[inline]
    pub fn map_point(&self, p: &Point) -> Point {
        Point {
            x: p.x * self.scale_x + p.y * self.skew_x + self.trans_x,
            y: p.x * self.skew_y + p.y * self.scale_y + self.trans_y,
        }
    }

    /// Map a rectangle through the matrix.
    ///
    /// Transforms all four corners and returns their axis-aligned bounding
    /// box. Mapping only two corners goes wrong as soon as the rotation is
    /// non-zero, so all four are always taken.
    pub fn map_rect(&self, r: &Rect) -> Rect {
        let corners = [
            self.map_point(&Point::new(r.left, r.top)),
            self.map_point(&Point::new(r.right, r.top)),
            self.map_point(&Point::new(r.right, r.bottom)),
            self.map_point(&Point::new(r.left, r.bottom)),
        ];
        let mut out = Rect::new(corners[0].x, corners[0].y, corners[0].x, corners[0].y);
        for c in &corners[1..] {
            out.left = out.left.min(c.x);
            out.top = out.top.min(c.y);
            out.right = out.right.max(c.x);
            out.bottom = out.bottom.max(c.y);
        }
        out
    }
}

impl Default for Matrix2D {
    fn default() -> Self {
        Self::identity()
    }
}

// ============================================================================
// Tests
// ============================================================================
