//! Bezier and conic curve evaluation and flattening.
//!
//! Curves are lowered to polylines by evaluating the explicit Bernstein
//! polynomial at a fixed number of parameter steps. Eight segments is the
//! baseline everywhere in the crate; it trades smoothness for a bounded,
//! predictable amount of work per curve.

use crate::geometry::Point;

/// Segment count used when flattening curves.
pub const CURVE_SEGMENTS: u32 = 8;

/// Evaluate a quadratic Bezier at parameter `t`.
#[inline]
pub fn eval_quad(p0: &Point, p1: &Point, p2: &Point, t: f64) -> Point {
    let u = 1.0 - t;
    let b0 = u * u;
    let b1 = 2.0 * u * t;
    let b2 = t * t;
    Point {
        x: b0 * p0.x + b1 * p1.x + b2 * p2.x,
        y: b0 * p0.y + b1 * p1.y + b2 * p2.y,
    }
}

/// Evaluate a cubic Bezier at parameter `t`.
#[inline]
pub fn eval_cubic(p0: &Point, p1: &Point, p2: &Point, p3: &Point, t: f64) -> Point {
    let u = 1.0 - t;
    let b0 = u * u * u;
    let b1 = 3.0 * u * u * t;
    let b2 = 3.0 * u * t * t;
    let b3 = t * t * t;
    Point {
        x: b0 * p0.x + b1 * p1.x + b2 * p2.x + b3 * p3.x,
        y: b0 * p0.y + b1 * p1.y + b2 * p2.y + b3 * p3.y,
    }
}

/// Evaluate a conic (rational quadratic Bezier) at parameter `t`.
///
/// `P(t) = [(1-t)^2 P0 + 2(1-t)t w P1 + t^2 P2] / [(1-t)^2 + 2(1-t)t w + t^2]`
///
/// Returns `None` when the denominator is not positive (degenerate
/// weight); callers skip that step instead of producing NaN coordinates.
#[inline]
pub fn eval_conic(p0: &Point, p1: &Point, p2: &Point, weight: f64, t: f64) -> Option<Point> {
    let u = 1.0 - t;
    let b0 = u * u;
    let b1 = 2.0 * u * t * weight;
    let b2 = t * t;
    let denom = b0 + b1 + b2;
    if denom <= 0.0 {
        return None;
    }
    Some(Point {
        x: (b0 * p0.x + b1 * p1.x + b2 * p2.x) / denom,
        y: (b0 * p0.y + b1 * p1.y + b2 * p2.y) / denom,
    })
}

/// Flatten a quadratic Bezier into [`CURVE_SEGMENTS`] chord endpoints,
/// evaluated at `t = i/segments` for `i = 1..=segments` (the start point
/// is the caller's current point and is not repeated).
pub fn flatten_quad(p0: &Point, p1: &Point, p2: &Point) -> Vec<Point> {
    (1..=CURVE_SEGMENTS)
        .map(|i| eval_quad(p0, p1, p2, i as f64 / CURVE_SEGMENTS as f64))
        .collect()
}

/// Flatten a cubic Bezier. Same stepping contract as [`flatten_quad`].
pub fn flatten_cubic(p0: &Point, p1: &Point, p2: &Point, p3: &Point) -> Vec<Point> {
    (1..=CURVE_SEGMENTS)
        .map(|i| eval_cubic(p0, p1, p2, p3, i as f64 / CURVE_SEGMENTS as f64))
        .collect()
}

/// Flatten a conic. Steps with a non-positive denominator are skipped,
/// so the result may hold fewer than [`CURVE_SEGMENTS`] points for
/// degenerate weights.
pub fn flatten_conic(p0: &Point, p1: &Point, p2: &Point, weight: f64) -> Vec<Point> {
    (1..=CURVE_SEGMENTS)
        .filter_map(|i| eval_conic(p0, p1, p2, weight, i as f64 / CURVE_SEGMENTS as f64))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_near(p: &Point, x: f64, y: f64) {
        assert!((p.x - x).abs() < 1e-9 && (p.y - y).abs() < 1e-9, "{p:?} vs ({x},{y})");
    }

    #[test]
    fn test_eval_quad_endpoints() {
        let p0 = Point::new(0.0, 0.0);
        let p1 = Point::new(10.0, 0.0);
        let p2 = Point::new(10.0, 10.0);
        assert_near(&eval_quad(&p0, &p1, &p2, 0.0), 0.0, 0.0);
        assert_near(&eval_quad(&p0, &p1, &p2, 1.0), 10.0, 10.0);
    }

    #[test]
    fn test_eval_cubic_endpoints_and_midpoint() {
        let p0 = Point::new(0.0, 0.0);
        let p1 = Point::new(0.0, 10.0);
        let p2 = Point::new(10.0, 10.0);
        let p3 = Point::new(10.0, 0.0);
        assert_near(&eval_cubic(&p0, &p1, &p2, &p3, 0.0), 0.0, 0.0);
        assert_near(&eval_cubic(&p0, &p1, &p2, &p3, 1.0), 10.0, 0.0);
        // Symmetric control polygon: midpoint sits on the axis of symmetry.
        let mid = eval_cubic(&p0, &p1, &p2, &p3, 0.5);
        assert_near(&mid, 5.0, 7.5);
    }

    #[test]
    fn test_eval_conic_weight_one_matches_quad() {
        let p0 = Point::new(0.0, 0.0);
        let p1 = Point::new(10.0, 0.0);
        let p2 = Point::new(10.0, 10.0);
        for i in 0..=8 {
            let t = i as f64 / 8.0;
            let c = eval_conic(&p0, &p1, &p2, 1.0, t).unwrap();
            let q = eval_quad(&p0, &p1, &p2, t);
            assert_near(&c, q.x, q.y);
        }
    }

    #[test]
    fn test_eval_conic_degenerate_denominator() {
        let p = Point::new(0.0, 0.0);
        // At t=0.5 the denominator is 0.5 + 0.5*w; w = -1 zeroes it out.
        assert!(eval_conic(&p, &p, &p, -1.0, 0.5).is_none());
    }

    #[test]
    fn test_flatten_quad_produces_eight_segments() {
        let p0 = Point::new(0.0, 0.0);
        let p1 = Point::new(10.0, 0.0);
        let p2 = Point::new(10.0, 10.0);
        let pts = flatten_quad(&p0, &p1, &p2);
        assert_eq!(pts.len(), 8);
        assert_near(&pts[7], 10.0, 10.0);
    }

    #[test]
    fn test_flatten_quad_monotonically_approaches_endpoint() {
        let p0 = Point::new(0.0, 0.0);
        let p1 = Point::new(10.0, 0.0);
        let p2 = Point::new(10.0, 10.0);
        let end = Point::new(10.0, 10.0);
        let pts = flatten_quad(&p0, &p1, &p2);
        let mut last = p0.distance_to(&end);
        for p in &pts {
            let d = p.distance_to(&end);
            assert!(d <= last, "distance to endpoint must not increase");
            last = d;
        }
        assert_eq!(last, 0.0);
    }

    #[test]
    fn test_flatten_cubic_reaches_endpoint() {
        let p0 = Point::new(0.0, 0.0);
        let p1 = Point::new(3.0, 9.0);
        let p2 = Point::new(6.0, 9.0);
        let p3 = Point::new(9.0, 0.0);
        let pts = flatten_cubic(&p0, &p1, &p2, &p3);
        assert_eq!(pts.len(), 8);
        assert_near(&pts[7], 9.0, 0.0);
    }

    #[test]
    fn test_flatten_conic_skips_degenerate_steps() {
        let p0 = Point::new(0.0, 0.0);
        let p1 = Point::new(5.0, 5.0);
        let p2 = Point::new(10.0, 0.0);
        // Strongly negative weight makes some denominators non-positive.
        let pts = flatten_conic(&p0, &p1, &p2, -3.0);
        assert!(pts.len() < CURVE_SEGMENTS as usize);
        for p in &pts {
            assert!(p.x.is_finite() && p.y.is_finite());
        }
    }

    #[test]
    fn test_flatten_conic_low_weight_flattens_toward_chord() {
        let p0 = Point::new(0.0, 0.0);
        let p1 = Point::new(5.0, 10.0);
        let p2 = Point::new(10.0, 0.0);
        let near_zero = flatten_conic(&p0, &p1, &p2, 0.01);
        let heavy = flatten_conic(&p0, &p1, &p2, 4.0);
        // A small weight pulls the midpoint toward the chord, a heavy one
        // toward the control point.
        assert!(near_zero[3].y < heavy[3].y);
    }
}
