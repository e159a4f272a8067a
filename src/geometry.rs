//! Geometry value types: points and rectangles.
//!
//! `Rect` uses floating-point `left/top/right/bottom` edges. A rect is
//! *empty* iff `left >= right || top >= bottom`; empty rects carry no area
//! and short-circuit drawing and clipping throughout the crate.

// ============================================================================
// Point
// ============================================================================

/// A 2D point. Plain value type, freely copyable, no identity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

// ============================================================================
// Rect
// ============================================================================

/// An axis-aligned rectangle bounded by `[left, right) x [top, bottom)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle anchored at the origin.
    pub fn from_wh(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// The canonical empty rectangle.
    pub fn empty() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// A rect is empty iff it has no area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    #[inline]
    pub fn center_x(&self) -> f64 {
        (self.left + self.right) / 2.0
    }

    #[inline]
    pub fn center_y(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }

    /// Shrink (or grow, with negative deltas) in place around the center.
    pub fn inset(&mut self, dx: f64, dy: f64) {
        self.left += dx;
        self.top += dy;
        self.right -= dx;
        self.bottom -= dy;
    }

    /// Translate in place.
    pub fn offset(&mut self, dx: f64, dy: f64) {
        self.left += dx;
        self.top += dy;
        self.right += dx;
        self.bottom += dy;
    }

    /// Returns `true` if `(x, y)` lies inside the rect.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    /// Intersection of two rectangles as a new value.
    ///
    /// Commutative and idempotent. Disjoint inputs produce an empty rect
    /// (callers check with [`Rect::is_empty`]).
    pub fn intersect(a: &Rect, b: &Rect) -> Rect {
        Rect {
            left: a.left.max(b.left),
            top: a.top.max(b.top),
            right: a.right.min(b.right),
            bottom: a.bottom.min(b.bottom),
        }
    }

    /// Bounding box of two rectangles.
    pub fn union(a: &Rect, b: &Rect) -> Rect {
        if a.is_empty() {
            return *b;
        }
        if b.is_empty() {
            return *a;
        }
        Rect {
            left: a.left.min(b.left),
            top: a.top.min(b.top),
            right: a.right.max(b.right),
            bottom: a.bottom.max(b.bottom),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
