//! Vector path recorder.
//!
//! A [`Path`] records an ordered verb sequence (`Move`, `Line`, `Quad`,
//! `Conic`, `Cubic`, `Close`) with a parallel point list (1 point for
//! Move/Line, 2 for Quad/Conic, 3 for Cubic) and an ordered conic-weight
//! list carrying one weight per `Conic` verb.
//!
//! The recorder owns its storage; `Clone` deep-copies verbs, points, and
//! weights, so a cloned path never aliases the original.

use crate::geometry::{Point, Rect};
use crate::matrix::Matrix2D;

// ============================================================================
// Verbs and fill types
// ============================================================================

/// A single path command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Move,
    Line,
    Quad,
    Conic,
    Cubic,
    Close,
}

impl Verb {
    /// Number of points recorded alongside this verb.
    pub fn point_count(&self) -> usize {
        match self {
            Verb::Move | Verb::Line => 1,
            Verb::Quad | Verb::Conic => 2,
            Verb::Cubic => 3,
            Verb::Close => 0,
        }
    }
}

/// Polygon fill rule. Stored and queryable; the scanline rasterizer honors
/// `Winding` and `EvenOdd`, and rasterizes the inverse variants as their
/// non-inverse counterparts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillType {
    #[default]
    Winding,
    EvenOdd,
    InverseWinding,
    InverseEvenOdd,
}

impl FillType {
    /// Collapses the inverse variants onto their base rule.
    pub fn base_rule(&self) -> FillType {
        match self {
            FillType::Winding | FillType::InverseWinding => FillType::Winding,
            FillType::EvenOdd | FillType::InverseEvenOdd => FillType::EvenOdd,
        }
    }

    pub fn is_inverse(&self) -> bool {
        matches!(self, FillType::InverseWinding | FillType::InverseEvenOdd)
    }
}

// ============================================================================
// Path
// ============================================================================

/// A recorded sequence of path verbs with their points and conic weights.
///
/// Invariant: `conic_weights.len()` equals the number of `Conic` verbs,
/// in verb order.
#[derive(Debug, Clone, Default)]
pub struct Path {
    verbs: Vec<Verb>,
    points: Vec<Point>,
    conic_weights: Vec<f64>,
    fill_type: FillType,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fill_type(&self) -> FillType {
        self.fill_type
    }

    pub fn set_fill_type(&mut self, fill_type: FillType) {
        self.fill_type = fill_type;
    }

    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    pub fn verbs(&self) -> &[Verb] {
        &self.verbs
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn conic_weights(&self) -> &[f64] {
        &self.conic_weights
    }

    /// Remove all recorded geometry, keeping the fill type.
    pub fn reset(&mut self) {
        self.verbs.clear();
        self.points.clear();
        self.conic_weights.clear();
    }

    // ========================================================================
    // Builder operations
    // ========================================================================

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.verbs.push(Verb::Move);
        self.points.push(Point::new(x, y));
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        self.verbs.push(Verb::Line);
        self.points.push(Point::new(x, y));
    }

    pub fn quad_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.verbs.push(Verb::Quad);
        self.points.push(Point::new(x1, y1));
        self.points.push(Point::new(x2, y2));
    }

    pub fn cubic_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) {
        self.verbs.push(Verb::Cubic);
        self.points.push(Point::new(x1, y1));
        self.points.push(Point::new(x2, y2));
        self.points.push(Point::new(x3, y3));
    }

    /// Append a conic (rational quadratic) segment.
    ///
    /// With no current point (empty path, or immediately after a `Close`)
    /// an implicit `move_to(0, 0)` is inserted first. A weight of exactly
    /// 1.0 is stored as a plain `Quad`. A non-finite or non-positive
    /// weight degrades to two straight `Line` segments through the given
    /// points rather than recording a malformed curve.
    pub fn conic_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, weight: f64) {
        if self.verbs.is_empty() || *self.verbs.last().unwrap() == Verb::Close {
            self.move_to(0.0, 0.0);
        }
        if weight == 1.0 {
            self.quad_to(x1, y1, x2, y2);
        } else if weight.is_finite() && weight > 0.0 {
            self.verbs.push(Verb::Conic);
            self.points.push(Point::new(x1, y1));
            self.points.push(Point::new(x2, y2));
            self.conic_weights.push(weight);
        } else {
            self.line_to(x1, y1);
            self.line_to(x2, y2);
        }
    }

    pub fn close(&mut self) {
        self.verbs.push(Verb::Close);
    }

    /// Append an axis-aligned rectangle as a closed subpath.
    pub fn add_rect(&mut self, r: &Rect) {
        self.move_to(r.left, r.top);
        self.line_to(r.right, r.top);
        self.line_to(r.right, r.bottom);
        self.line_to(r.left, r.bottom);
        self.close();
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Bounding box of every recorded point.
    ///
    /// For `Quad`, `Conic`, and `Cubic` segments the control points are
    /// included as-is, which over-estimates the true curve extent. This is
    /// an approximation, not a tight bound.
    pub fn bounds(&self) -> Rect {
        if self.points.is_empty() {
            return Rect::empty();
        }
        let first = self.points[0];
        let mut r = Rect::new(first.x, first.y, first.x, first.y);
        for p in &self.points[1..] {
            r.left = r.left.min(p.x);
            r.top = r.top.min(p.y);
            r.right = r.right.max(p.x);
            r.bottom = r.bottom.max(p.y);
        }
        r
    }

    /// Apply `matrix` to every point in place.
    ///
    /// Conic weights are unchanged: affine maps preserve the rational
    /// parameterization.
    pub fn transform(&mut self, matrix: &Matrix2D) {
        for p in &mut self.points {
            *p = matrix.map_point(p);
        }
    }

    /// Iterate `(verb, points-for-verb, conic-weight)` triples in order.
    pub fn segments(&self) -> SegmentIter<'_> {
        SegmentIter {
            path: self,
            verb_idx: 0,
            point_idx: 0,
            weight_idx: 0,
        }
    }
}

/// One verb with its point slice and, for `Conic`, its weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment<'a> {
    pub verb: Verb,
    pub points: &'a [Point],
    pub weight: Option<f64>,
}

/// Iterator over a path's segments. See [`Path::segments`].
pub struct SegmentIter<'a> {
    path: &'a Path,
    verb_idx: usize,
    point_idx: usize,
    weight_idx: usize,
}

impl<'a> Iterator for SegmentIter<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Segment<'a>> {
        let verb = *self.path.verbs.get(self.verb_idx)?;
        self.verb_idx += 1;
        let n = verb.point_count();
        let points = &self.path.points[self.point_idx..self.point_idx + n];
        self.point_idx += n;
        let weight = if verb == Verb::Conic {
            let w = self.path.conic_weights[self.weight_idx];
            self.weight_idx += 1;
            Some(w)
        } else {
            None
        };
        Some(Segment {
            verb,
            points,
            weight,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
