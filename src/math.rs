//! Scalar math helpers shared by the geometry and rasterizer layers.

pub const PI: f64 = std::f64::consts::PI;

/// Round a double to the nearest integer (round half away from zero).
#[inline]
pub fn iround(v: f64) -> i32 {
    if v < 0.0 {
        (v - 0.5) as i32
    } else {
        (v + 0.5) as i32
    }
}

/// Floor a double toward negative infinity as an `i32`.
#[inline]
pub fn ifloor(v: f64) -> i32 {
    let i = v as i32;
    i - (i as f64 > v) as i32
}

/// Ceiling of a double as an `i32`.
#[inline]
pub fn iceil(v: f64) -> i32 {
    v.ceil() as i32
}

/// Convert degrees to radians.
#[inline]
pub fn deg2rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Convert radians to degrees.
#[inline]
pub fn rad2deg(rad: f64) -> f64 {
    rad * 180.0 / PI
}

/// Clamp `v` to `[lo, hi]`.
#[inline]
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    if v < lo {
        lo
    } else if v > hi {
        hi
    } else {
        v
    }
}

/// Linear interpolation between `a` and `b` by `t` in [0, 1].
///
/// Panics if `t` is outside [0, 1] — an out-of-range factor is a
/// programmer error, not a runtime condition.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    assert!((0.0..=1.0).contains(&t), "lerp factor {t} outside [0, 1]");
    a + (b - a) * t
}

/// Squared distance between two coordinate pairs.
#[inline]
pub fn calc_sq_distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let dx = x2 - x1;
    let dy = y2 - y1;
    dx * dx + dy * dy
}
