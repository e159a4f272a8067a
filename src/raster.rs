//! Scan-conversion of device-space geometry into a pixel buffer.
//!
//! The rasterizer owns no state beyond a borrowed [`PixelBuffer`] and an
//! integer clip window. Geometry arrives already mapped to device space;
//! every write is clamped to the clip window, so partially-offscreen
//! shapes clip silently instead of failing.
//!
//! Three pixel pipelines live here:
//!
//! - solid spans and Bresenham lines blended through the paint's blend
//!   mode (`compositor::blend`),
//! - anti-aliased lines blended through distance-derived coverage
//!   (`compositor::coverage_blend`, a separate compositing step),
//! - path lowering: curves flatten to polylines (`curves`), fills run
//!   either as the bounding-box compatibility mode or as a pixel-center
//!   scanline fill honoring the path's fill rule.

use log::trace;

use crate::bitmap::PixelBuffer;
use crate::color::Color;
use crate::compositor::{apply_alpha, blend, coverage_blend};
use crate::curves::{flatten_conic, flatten_cubic, flatten_quad};
use crate::geometry::{Point, Rect};
use crate::math::{iceil, ifloor, iround};
use crate::paint::{BlendMode, Paint, Style};
use crate::path::{FillType, Path, Verb};

// ============================================================================
// Path fill mode
// ============================================================================

/// How `fill_path` rasterizes a path interior.
///
/// `BoundingBox` is the reference compatibility behavior: it fills the
/// path's bounding rectangle, not the true interior. `Scanline` is the
/// pixel-center crossing fill honoring the path's fill rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathFillMode {
    #[default]
    BoundingBox,
    Scanline,
}

// ============================================================================
// Rasterizer
// ============================================================================

/// Rasterizes device-space geometry into a borrowed pixel buffer,
/// clamped to an integer clip window.
pub struct Rasterizer<'a> {
    buf: &'a mut dyn PixelBuffer,
    // Half-open pixel bounds: x in [clip_left, clip_right).
    clip_left: i32,
    clip_top: i32,
    clip_right: i32,
    clip_bottom: i32,
}

impl<'a> Rasterizer<'a> {
    /// Wrap `buf`, clamping `clip` to the buffer extent.
    pub fn new(buf: &'a mut dyn PixelBuffer, clip: &Rect) -> Self {
        let w = buf.width() as i32;
        let h = buf.height() as i32;
        Self {
            clip_left: ifloor(clip.left).max(0),
            clip_top: ifloor(clip.top).max(0),
            clip_right: iceil(clip.right).min(w),
            clip_bottom: iceil(clip.bottom).min(h),
            buf,
        }
    }

    #[inline]
    fn in_clip(&self, x: i32, y: i32) -> bool {
        x >= self.clip_left && x < self.clip_right && y >= self.clip_top && y < self.clip_bottom
    }

    /// Blend one pixel through the blend-mode pipeline, skipping anything
    /// outside the clip window.
    #[inline]
    fn blend_pixel(&mut self, x: i32, y: i32, src: Color, mode: BlendMode) {
        if !self.in_clip(x, y) {
            return;
        }
        let (ux, uy) = (x as u32, y as u32);
        let dst = self.buf.get_pixel(ux, uy);
        self.buf.set_pixel(ux, uy, blend(src, dst, mode));
    }

    /// Blend one pixel through the coverage pipeline. Zero coverage is a
    /// skip, not a write.
    #[inline]
    fn coverage_pixel(&mut self, x: i32, y: i32, src: Color, cover: u8) {
        if cover == 0 || !self.in_clip(x, y) {
            return;
        }
        let (ux, uy) = (x as u32, y as u32);
        let dst = self.buf.get_pixel(ux, uy);
        self.buf.set_pixel(ux, uy, coverage_blend(src, dst, cover));
    }

    /// The paint's color with its extra alpha applied.
    #[inline]
    fn resolve_color(paint: &Paint) -> Color {
        apply_alpha(paint.color, paint.alpha)
    }

    // ========================================================================
    // Rectangles
    // ========================================================================

    /// Draw a rectangle with the paint's style dispatch: `Fill` covers
    /// the interior, `Stroke` draws the four border edges through the
    /// line rasterizer, `FillAndStroke` runs both as independent
    /// sub-calls on style-restricted paint copies.
    pub fn draw_rect(&mut self, rect: &Rect, paint: &Paint) {
        if rect.is_empty() {
            return;
        }
        match paint.style {
            Style::Fill => self.fill_rect(rect, paint),
            Style::Stroke => self.stroke_rect(rect, paint),
            Style::FillAndStroke => {
                self.fill_rect(rect, &paint.with_style(Style::Fill));
                self.stroke_rect(rect, &paint.with_style(Style::Stroke));
            }
        }
    }

    /// Fill integer pixels in `[left, right) x [top, bottom)`, clamped to
    /// the clip window, blending each through the paint's blend mode.
    pub fn fill_rect(&mut self, rect: &Rect, paint: &Paint) {
        let src = Self::resolve_color(paint);
        let x0 = ifloor(rect.left).max(self.clip_left);
        let y0 = ifloor(rect.top).max(self.clip_top);
        let x1 = iceil(rect.right).min(self.clip_right);
        let y1 = iceil(rect.bottom).min(self.clip_bottom);
        for y in y0..y1 {
            for x in x0..x1 {
                let dst = self.buf.get_pixel(x as u32, y as u32);
                self.buf
                    .set_pixel(x as u32, y as u32, blend(src, dst, paint.blend_mode));
            }
        }
    }

    /// Stroke the four border edges using the line rasterizer.
    ///
    /// The anti-aliased line renderer thickens to `stroke_width` by
    /// itself; only the one-pixel Bresenham path needs the parallel
    /// offset emulation.
    pub fn stroke_rect(&mut self, rect: &Rect, paint: &Paint) {
        let thickness = if paint.anti_alias {
            1
        } else {
            iround(paint.stroke_width).max(1)
        };
        // Offsets centered on the edge: 0, -1, 1, -2, 2, ...
        for i in 0..thickness {
            let step = if i % 2 == 0 { i / 2 } else { -(i / 2 + 1) };
            let o = step as f64;
            let l = rect.left;
            let t = rect.top;
            let r = rect.right;
            let b = rect.bottom;
            self.draw_line(&Point::new(l, t + o), &Point::new(r, t + o), paint);
            self.draw_line(&Point::new(l, b + o), &Point::new(r, b + o), paint);
            self.draw_line(&Point::new(l + o, t), &Point::new(l + o, b), paint);
            self.draw_line(&Point::new(r + o, t), &Point::new(r + o, b), paint);
        }
    }

    // ========================================================================
    // Lines
    // ========================================================================

    /// Draw a line segment, dispatching to the anti-aliased coverage
    /// renderer when the paint requests it and to Bresenham otherwise.
    pub fn draw_line(&mut self, a: &Point, b: &Point, paint: &Paint) {
        if paint.anti_alias {
            self.line_aa(a, b, paint);
        } else {
            self.line_bresenham(a, b, paint);
        }
    }

    /// Aliased Bresenham line walk with the integer error accumulator.
    ///
    /// Endpoints are canonicalized before stepping so drawing A->B and
    /// B->A touches exactly the same pixel set.
    fn line_bresenham(&mut self, a: &Point, b: &Point, paint: &Paint) {
        let src = Self::resolve_color(paint);
        // Pre-clip so a segment with huge coordinates never steps
        // through millions of invisible pixels.
        let Some((ca, cb)) = self.clip_segment(a, b) else {
            return;
        };
        // Truncation toward zero matches the reference coordinate policy.
        let (mut x1, mut y1) = (ca.x as i32, ca.y as i32);
        let (mut x2, mut y2) = (cb.x as i32, cb.y as i32);
        if (x2, y2) < (x1, y1) {
            std::mem::swap(&mut x1, &mut x2);
            std::mem::swap(&mut y1, &mut y2);
        }

        let dx = (x2 - x1).abs();
        let dy = (y2 - y1).abs();
        let sx = if x1 < x2 { 1 } else { -1 };
        let sy = if y1 < y2 { 1 } else { -1 };
        let mut err = dx - dy;
        let (mut x, mut y) = (x1, y1);

        loop {
            self.blend_pixel(x, y, src, paint.blend_mode);
            if x == x2 && y == y2 {
                break;
            }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Liang-Barsky parametric clip of a segment against the clip
    /// window, padded one pixel so boundary truncation keeps its edge
    /// pixels. `None` means the segment is entirely outside (or carries
    /// non-finite coordinates).
    fn clip_segment(&self, a: &Point, b: &Point) -> Option<(Point, Point)> {
        if !(a.x.is_finite() && a.y.is_finite() && b.x.is_finite() && b.y.is_finite()) {
            return None;
        }
        let x_min = self.clip_left as f64 - 1.0;
        let y_min = self.clip_top as f64 - 1.0;
        let x_max = self.clip_right as f64 + 1.0;
        let y_max = self.clip_bottom as f64 + 1.0;
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let mut t0 = 0.0f64;
        let mut t1 = 1.0f64;
        let edges = [
            (-dx, a.x - x_min),
            (dx, x_max - a.x),
            (-dy, a.y - y_min),
            (dy, y_max - a.y),
        ];
        for (p, q) in edges {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
            } else {
                let r = q / p;
                if p < 0.0 {
                    if r > t1 {
                        return None;
                    }
                    if r > t0 {
                        t0 = r;
                    }
                } else {
                    if r < t0 {
                        return None;
                    }
                    if r < t1 {
                        t1 = r;
                    }
                }
            }
        }
        Some((
            Point::new(a.x + t0 * dx, a.y + t0 * dy),
            Point::new(a.x + t1 * dx, a.y + t1 * dy),
        ))
    }

    /// Anti-aliased line: perpendicular distance from each candidate
    /// pixel center to the segment, mapped through a one-pixel coverage
    /// ramp around the stroke half-width.
    fn line_aa(&mut self, a: &Point, b: &Point, paint: &Paint) {
        let src = Self::resolve_color(paint);
        let half = (paint.stroke_width.max(1.0)) / 2.0;
        let inner = half - 0.5;
        let outer = half + 0.5;

        let pad = outer + 1.0;
        let x0 = ifloor(a.x.min(b.x) - pad).max(self.clip_left);
        let y0 = ifloor(a.y.min(b.y) - pad).max(self.clip_top);
        let x1 = iceil(a.x.max(b.x) + pad).min(self.clip_right);
        let y1 = iceil(a.y.max(b.y) + pad).min(self.clip_bottom);

        let vx = b.x - a.x;
        let vy = b.y - a.y;
        let len_sq = vx * vx + vy * vy;

        for y in y0..y1 {
            for x in x0..x1 {
                let px = x as f64 + 0.5;
                let py = y as f64 + 0.5;
                // Clamped projection onto the segment; a zero-length
                // segment degrades to the distance to its single point.
                let t = if len_sq > 0.0 {
                    (((px - a.x) * vx + (py - a.y) * vy) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let cx = a.x + t * vx;
                let cy = a.y + t * vy;
                let dist = ((px - cx) * (px - cx) + (py - cy) * (py - cy)).sqrt();

                let cover = if dist <= inner {
                    255u8
                } else if dist >= outer {
                    0u8
                } else {
                    ((outer - dist) / (outer - inner) * 255.0).round() as u8
                };
                self.coverage_pixel(x, y, src, cover);
            }
        }
    }

    // ========================================================================
    // Paths
    // ========================================================================

    /// Draw a path with the paint's style dispatch; returns whether the
    /// fill was approximated (bounding-box mode).
    pub fn draw_path(&mut self, path: &Path, paint: &Paint, mode: PathFillMode) -> bool {
        let mut approximated = false;
        match paint.style {
            Style::Fill => approximated = self.fill_path(path, paint, mode),
            Style::Stroke => self.stroke_path(path, paint),
            Style::FillAndStroke => {
                approximated = self.fill_path(path, &paint.with_style(Style::Fill), mode);
                self.stroke_path(path, &paint.with_style(Style::Stroke));
            }
        }
        approximated
    }

    /// Fill a path interior. Returns `true` when the result is the
    /// bounding-box approximation rather than the true interior.
    pub fn fill_path(&mut self, path: &Path, paint: &Paint, mode: PathFillMode) -> bool {
        if path.is_empty() {
            return false;
        }
        match mode {
            PathFillMode::BoundingBox => {
                trace!("fill_path: bounding-box compatibility fill");
                self.fill_rect(&path.bounds(), paint);
                true
            }
            PathFillMode::Scanline => {
                self.fill_path_scanline(path, paint);
                false
            }
        }
    }

    /// Pixel-center scanline fill over the flattened outline, honoring
    /// the path's fill rule (inverse variants rasterize as their base
    /// rule).
    fn fill_path_scanline(&mut self, path: &Path, paint: &Paint) {
        let subpaths = flatten_path(path);
        let even_odd = path.fill_type().base_rule() == FillType::EvenOdd;
        let src = Self::resolve_color(paint);

        let bounds = path.bounds();
        let y0 = ifloor(bounds.top).max(self.clip_top);
        let y1 = iceil(bounds.bottom).min(self.clip_bottom);

        // (crossing x, winding direction) pairs, reused per scanline.
        let mut crossings: Vec<(f64, i32)> = Vec::new();
        for y in y0..y1 {
            let yc = y as f64 + 0.5;
            crossings.clear();
            for poly in &subpaths {
                if poly.len() < 2 {
                    continue;
                }
                for i in 0..poly.len() {
                    let p = poly[i];
                    let q = poly[(i + 1) % poly.len()];
                    if p.y == q.y {
                        continue;
                    }
                    let (lo, hi, dir) = if p.y < q.y { (p, q, 1) } else { (q, p, -1) };
                    // Half-open span so a vertex shared by two edges is
                    // counted exactly once.
                    if yc >= lo.y && yc < hi.y {
                        let x = lo.x + (yc - lo.y) * (hi.x - lo.x) / (hi.y - lo.y);
                        // Non-finite vertices produce no crossing; the
                        // rest of the outline still fills.
                        if x.is_finite() {
                            crossings.push((x, dir));
                        }
                    }
                }
            }
            if crossings.is_empty() {
                continue;
            }
            crossings.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());

            let mut winding = 0i32;
            let mut parity = false;
            for i in 0..crossings.len() {
                winding += crossings[i].1;
                parity = !parity;
                let inside = if even_odd { parity } else { winding != 0 };
                if !inside || i + 1 >= crossings.len() {
                    continue;
                }
                let span_start = crossings[i].0;
                let span_end = crossings[i + 1].0;
                let xa = ifloor(span_start).max(self.clip_left);
                let xb = iceil(span_end).min(self.clip_right);
                for x in xa..xb {
                    let xc = x as f64 + 0.5;
                    if xc >= span_start && xc < span_end {
                        self.blend_pixel(x, y, src, paint.blend_mode);
                    }
                }
            }
        }
    }

    /// Stroke a path: lines draw directly, curves flatten into chord
    /// chains. `Close` only resets the current point — the closing
    /// segment back to the subpath start is not drawn (reference
    /// behavior, kept deliberately).
    pub fn stroke_path(&mut self, path: &Path, paint: &Paint) {
        let mut current = Point::default();
        for seg in path.segments() {
            match seg.verb {
                Verb::Move => current = seg.points[0],
                Verb::Line => {
                    self.draw_line(&current, &seg.points[0], paint);
                    current = seg.points[0];
                }
                Verb::Quad => {
                    current = self.stroke_chain(current, &flatten_quad(&current, &seg.points[0], &seg.points[1]), paint);
                }
                Verb::Conic => {
                    let w = seg.weight.unwrap_or(1.0);
                    current = self.stroke_chain(current, &flatten_conic(&current, &seg.points[0], &seg.points[1], w), paint);
                }
                Verb::Cubic => {
                    current = self.stroke_chain(
                        current,
                        &flatten_cubic(&current, &seg.points[0], &seg.points[1], &seg.points[2]),
                        paint,
                    );
                }
                Verb::Close => {}
            }
        }
    }

    fn stroke_chain(&mut self, start: Point, chords: &[Point], paint: &Paint) -> Point {
        let mut prev = start;
        for p in chords {
            self.draw_line(&prev, p, paint);
            prev = *p;
        }
        prev
    }
}

/// Flatten every subpath to a polygon outline for filling. Curves lower
/// through the fixed-step flatteners; subpaths are closed implicitly.
fn flatten_path(path: &Path) -> Vec<Vec<Point>> {
    let mut polys: Vec<Vec<Point>> = Vec::new();
    let mut current: Vec<Point> = Vec::new();
    let mut pos = Point::default();
    for seg in path.segments() {
        match seg.verb {
            Verb::Move => {
                if current.len() > 1 {
                    polys.push(std::mem::take(&mut current));
                } else {
                    current.clear();
                }
                pos = seg.points[0];
                current.push(pos);
            }
            Verb::Line => {
                pos = seg.points[0];
                current.push(pos);
            }
            Verb::Quad => {
                for p in flatten_quad(&pos, &seg.points[0], &seg.points[1]) {
                    current.push(p);
                }
                pos = *current.last().unwrap();
            }
            Verb::Conic => {
                let w = seg.weight.unwrap_or(1.0);
                for p in flatten_conic(&pos, &seg.points[0], &seg.points[1], w) {
                    current.push(p);
                }
                pos = *current.last().unwrap();
            }
            Verb::Cubic => {
                for p in flatten_cubic(&pos, &seg.points[0], &seg.points[1], &seg.points[2]) {
                    current.push(p);
                }
                pos = *current.last().unwrap();
            }
            Verb::Close => {
                if current.len() > 1 {
                    polys.push(std::mem::take(&mut current));
                } else {
                    current.clear();
                }
            }
        }
    }
    if current.len() > 1 {
        polys.push(current);
    }
    polys
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::Bitmap;

    fn canvas_buf(w: u32, h: u32) -> Bitmap {
        Bitmap::new(w, h).unwrap()
    }

    fn full_clip(b: &Bitmap) -> Rect {
        Rect::new(0.0, 0.0, b.width() as f64, b.height() as f64)
    }

    fn red_fill() -> Paint {
        let mut p = Paint::new();
        p.set_color(Color::RED);
        p
    }

    fn count_colored(b: &Bitmap, c: Color) -> usize {
        let mut n = 0;
        for y in 0..b.height() {
            for x in 0..b.width() {
                if b.get_pixel(x, y) == c {
                    n += 1;
                }
            }
        }
        n
    }

    #[test]
    fn test_fill_rect_covers_half_open_range() {
        let mut buf = canvas_buf(20, 20);
        let clip = full_clip(&buf);
        let mut r = Rasterizer::new(&mut buf, &clip);
        r.fill_rect(&Rect::new(2.0, 3.0, 6.0, 7.0), &red_fill());
        assert_eq!(buf.get_pixel(2, 3), Color::RED);
        assert_eq!(buf.get_pixel(5, 6), Color::RED);
        // Right/bottom edges are exclusive.
        assert_eq!(buf.get_pixel(6, 3), Color::TRANSPARENT);
        assert_eq!(buf.get_pixel(2, 7), Color::TRANSPARENT);
        assert_eq!(count_colored(&buf, Color::RED), 16);
    }

    #[test]
    fn test_fill_rect_clamps_to_clip() {
        let mut buf = canvas_buf(20, 20);
        let clip = Rect::new(5.0, 5.0, 10.0, 10.0);
        let mut r = Rasterizer::new(&mut buf, &clip);
        r.fill_rect(&Rect::new(0.0, 0.0, 20.0, 20.0), &red_fill());
        assert_eq!(count_colored(&buf, Color::RED), 25);
        assert_eq!(buf.get_pixel(5, 5), Color::RED);
        assert_eq!(buf.get_pixel(9, 9), Color::RED);
        assert_eq!(buf.get_pixel(4, 5), Color::TRANSPARENT);
        assert_eq!(buf.get_pixel(10, 10), Color::TRANSPARENT);
    }

    #[test]
    fn test_fill_rect_offscreen_is_silent() {
        let mut buf = canvas_buf(10, 10);
        let clip = full_clip(&buf);
        let mut r = Rasterizer::new(&mut buf, &clip);
        r.fill_rect(&Rect::new(-100.0, -100.0, -50.0, -50.0), &red_fill());
        r.fill_rect(&Rect::new(50.0, 50.0, 100.0, 100.0), &red_fill());
        assert_eq!(count_colored(&buf, Color::RED), 0);
    }

    #[test]
    fn test_draw_rect_fill_and_stroke_runs_both() {
        let mut buf = canvas_buf(20, 20);
        let clip = full_clip(&buf);
        let mut r = Rasterizer::new(&mut buf, &clip);
        let mut paint = Paint::new();
        paint.set_style(Style::FillAndStroke);
        paint.set_color(Color::GREEN);
        r.draw_rect(&Rect::new(4.0, 4.0, 12.0, 12.0), &paint);
        // Interior filled and border stroked.
        assert_eq!(buf.get_pixel(8, 8), Color::GREEN);
        assert_eq!(buf.get_pixel(4, 4), Color::GREEN);
    }

    #[test]
    fn test_draw_rect_empty_is_noop() {
        let mut buf = canvas_buf(10, 10);
        let clip = full_clip(&buf);
        let mut r = Rasterizer::new(&mut buf, &clip);
        r.draw_rect(&Rect::new(5.0, 5.0, 5.0, 9.0), &red_fill());
        assert_eq!(count_colored(&buf, Color::RED), 0);
    }

    #[test]
    fn test_bresenham_horizontal_line() {
        let mut buf = canvas_buf(20, 20);
        let clip = full_clip(&buf);
        let mut r = Rasterizer::new(&mut buf, &clip);
        r.draw_line(&Point::new(2.0, 5.0), &Point::new(10.0, 5.0), &red_fill());
        for x in 2..=10 {
            assert_eq!(buf.get_pixel(x, 5), Color::RED);
        }
        assert_eq!(count_colored(&buf, Color::RED), 9);
    }

    #[test]
    fn test_bresenham_pixel_set_is_endpoint_order_independent() {
        let endpoints = [
            (Point::new(1.0, 2.0), Point::new(17.0, 11.0)),
            (Point::new(3.0, 15.0), Point::new(12.0, 4.0)),
            (Point::new(0.0, 0.0), Point::new(19.0, 19.0)),
        ];
        for (a, b) in endpoints {
            let mut fwd = canvas_buf(20, 20);
            let mut rev = canvas_buf(20, 20);
            let clip = full_clip(&fwd);
            Rasterizer::new(&mut fwd, &clip).draw_line(&a, &b, &red_fill());
            Rasterizer::new(&mut rev, &clip).draw_line(&b, &a, &red_fill());
            for y in 0..20 {
                for x in 0..20 {
                    assert_eq!(
                        fwd.get_pixel(x, y),
                        rev.get_pixel(x, y),
                        "pixel ({x},{y}) differs for {a:?}->{b:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_bresenham_clips_offscreen_portion() {
        let mut buf = canvas_buf(10, 10);
        let clip = full_clip(&buf);
        let mut r = Rasterizer::new(&mut buf, &clip);
        r.draw_line(&Point::new(-5.0, 5.0), &Point::new(5.0, 5.0), &red_fill());
        assert_eq!(buf.get_pixel(0, 5), Color::RED);
        assert_eq!(buf.get_pixel(5, 5), Color::RED);
    }

    fn count_coverage(buf: &Bitmap) -> (usize, usize) {
        let mut full = 0;
        let mut partial = 0;
        for y in 0..buf.height() {
            for x in 0..buf.width() {
                let p = buf.get_pixel(x, y);
                if p == Color::RED {
                    full += 1;
                } else if p.r > 0 {
                    partial += 1;
                }
            }
        }
        (full, partial)
    }

    #[test]
    fn test_aa_line_writes_partial_coverage() {
        let mut buf = canvas_buf(20, 20);
        let clip = full_clip(&buf);
        let mut r = Rasterizer::new(&mut buf, &clip);
        let mut paint = red_fill();
        paint.set_anti_alias(true).set_stroke_width(3.0);
        // Width 3: the ramp has a solid core (dist <= 1.0) plus a one
        // pixel feather on each side.
        r.draw_line(&Point::new(2.0, 2.0), &Point::new(16.0, 9.0), &paint);
        let (full, partial) = count_coverage(&buf);
        assert!(full > 0, "core pixels reach full coverage");
        assert!(partial > 0, "edge pixels get partial coverage");
    }

    #[test]
    fn test_aa_hairline_diagonal_is_all_partial() {
        let mut buf = canvas_buf(20, 20);
        let clip = full_clip(&buf);
        let mut r = Rasterizer::new(&mut buf, &clip);
        let mut paint = red_fill();
        paint.set_anti_alias(true);
        // Width 1 collapses the solid core to the segment itself; no
        // pixel center on this diagonal sits exactly on it, so every
        // touched pixel is a ramp pixel.
        r.draw_line(&Point::new(2.0, 2.0), &Point::new(16.0, 9.0), &paint);
        let (full, partial) = count_coverage(&buf);
        assert_eq!(full, 0);
        assert!(partial > 0);
    }

    #[test]
    fn test_aa_line_zero_coverage_pixels_untouched() {
        let mut buf = canvas_buf(20, 20);
        buf.clear(Color::BLUE);
        let clip = full_clip(&buf);
        let mut r = Rasterizer::new(&mut buf, &clip);
        let mut paint = red_fill();
        paint.set_anti_alias(true);
        r.draw_line(&Point::new(2.0, 2.0), &Point::new(10.0, 2.0), &paint);
        // Far from the segment nothing is written at all.
        assert_eq!(buf.get_pixel(15, 15), Color::BLUE);
        assert_eq!(buf.get_pixel(2, 10), Color::BLUE);
    }

    #[test]
    fn test_aa_zero_length_line_degrades_to_point() {
        let mut buf = canvas_buf(10, 10);
        let clip = full_clip(&buf);
        let mut r = Rasterizer::new(&mut buf, &clip);
        let mut paint = red_fill();
        paint.set_anti_alias(true);
        r.draw_line(&Point::new(5.0, 5.0), &Point::new(5.0, 5.0), &paint);
        // The pixel containing the point takes some coverage; nothing is NaN.
        let near = buf.get_pixel(4, 4);
        let far = buf.get_pixel(9, 9);
        assert!(near.r > 0);
        assert_eq!(far, Color::TRANSPARENT);
    }

    #[test]
    fn test_bresenham_huge_coordinates_are_preclipped() {
        let mut buf = canvas_buf(20, 20);
        let clip = full_clip(&buf);
        let mut r = Rasterizer::new(&mut buf, &clip);
        // Terminates in bounded time and still covers the visible span.
        r.draw_line(&Point::new(-1.0e9, 5.0), &Point::new(1.0e9, 5.0), &red_fill());
        for x in 0..20 {
            assert_eq!(buf.get_pixel(x, 5), Color::RED);
        }

        let mut diag = canvas_buf(20, 20);
        Rasterizer::new(&mut diag, &clip).draw_line(
            &Point::new(-1.0e9, -1.0e9),
            &Point::new(1.0e9, 1.0e9),
            &red_fill(),
        );
        assert_eq!(diag.get_pixel(10, 10), Color::RED);
    }

    #[test]
    fn test_bresenham_non_finite_endpoint_is_noop() {
        let mut buf = canvas_buf(10, 10);
        let clip = full_clip(&buf);
        let mut r = Rasterizer::new(&mut buf, &clip);
        r.draw_line(&Point::new(f64::NAN, 2.0), &Point::new(8.0, 2.0), &red_fill());
        assert_eq!(count_colored(&buf, Color::RED), 0);
    }

    #[test]
    fn test_aa_stroke_rect_band_is_not_double_widened() {
        let mut buf = canvas_buf(20, 20);
        let clip = full_clip(&buf);
        let mut r = Rasterizer::new(&mut buf, &clip);
        let mut paint = red_fill();
        paint
            .set_style(Style::Stroke)
            .set_anti_alias(true)
            .set_stroke_width(4.0);
        r.draw_rect(&Rect::new(4.0, 4.0, 12.0, 12.0), &paint);
        // Width 4 around the top edge at y=4 reaches pixel centers
        // within 2.5 of it: rows 2..=5, nothing beyond.
        let mut rows = Vec::new();
        for y in 0..9 {
            if buf.get_pixel(8, y).r > 0 {
                rows.push(y);
            }
        }
        assert_eq!(rows, vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_fill_path_bounding_box_fills_bbox() {
        let mut buf = canvas_buf(20, 20);
        let clip = full_clip(&buf);
        let mut r = Rasterizer::new(&mut buf, &clip);
        let mut path = Path::new();
        path.move_to(2.0, 2.0);
        path.line_to(10.0, 2.0);
        path.line_to(2.0, 10.0);
        path.close();
        let approx = r.fill_path(&path, &red_fill(), PathFillMode::BoundingBox);
        assert!(approx);
        // Bounding box, not the triangle: the far corner is filled too.
        assert_eq!(buf.get_pixel(9, 9), Color::RED);
    }

    #[test]
    fn test_fill_path_scanline_triangle() {
        let mut buf = canvas_buf(20, 20);
        let clip = full_clip(&buf);
        let mut r = Rasterizer::new(&mut buf, &clip);
        let mut path = Path::new();
        path.move_to(2.0, 2.0);
        path.line_to(12.0, 2.0);
        path.line_to(2.0, 12.0);
        path.close();
        let approx = r.fill_path(&path, &red_fill(), PathFillMode::Scanline);
        assert!(!approx);
        // Inside the triangle.
        assert_eq!(buf.get_pixel(3, 3), Color::RED);
        // Outside the hypotenuse but inside the bounding box.
        assert_eq!(buf.get_pixel(11, 11), Color::TRANSPARENT);
    }

    #[test]
    fn test_fill_path_scanline_even_odd_hole() {
        let mut buf = canvas_buf(30, 30);
        let clip = full_clip(&buf);
        let mut r = Rasterizer::new(&mut buf, &clip);
        let mut path = Path::new();
        path.add_rect(&Rect::new(2.0, 2.0, 26.0, 26.0));
        path.add_rect(&Rect::new(10.0, 10.0, 18.0, 18.0));
        path.set_fill_type(FillType::EvenOdd);
        r.fill_path(&path, &red_fill(), PathFillMode::Scanline);
        // Ring filled, hole empty.
        assert_eq!(buf.get_pixel(5, 14), Color::RED);
        assert_eq!(buf.get_pixel(14, 14), Color::TRANSPARENT);
    }

    #[test]
    fn test_fill_path_scanline_winding_keeps_overlap() {
        let mut buf = canvas_buf(30, 30);
        let clip = full_clip(&buf);
        let mut r = Rasterizer::new(&mut buf, &clip);
        let mut path = Path::new();
        // Two same-direction rects: winding keeps the overlap filled.
        path.add_rect(&Rect::new(2.0, 2.0, 26.0, 26.0));
        path.add_rect(&Rect::new(10.0, 10.0, 18.0, 18.0));
        r.fill_path(&path, &red_fill(), PathFillMode::Scanline);
        assert_eq!(buf.get_pixel(14, 14), Color::RED);
    }

    #[test]
    fn test_fill_path_scanline_skips_non_finite_vertices() {
        let mut buf = canvas_buf(20, 20);
        let clip = full_clip(&buf);
        let mut r = Rasterizer::new(&mut buf, &clip);
        let mut path = Path::new();
        path.move_to(2.0, 2.0);
        path.line_to(f64::NAN, 10.0);
        path.line_to(12.0, 2.0);
        path.close();
        // Completes without panicking; edges touching the bad vertex
        // contribute no crossings, so nothing is written.
        let approx = r.fill_path(&path, &red_fill(), PathFillMode::Scanline);
        assert!(!approx);
        assert_eq!(count_colored(&buf, Color::RED), 0);
    }

    #[test]
    fn test_stroke_path_close_draws_no_closing_segment() {
        let mut buf = canvas_buf(20, 20);
        let clip = full_clip(&buf);
        let mut r = Rasterizer::new(&mut buf, &clip);
        let mut path = Path::new();
        path.move_to(2.0, 2.0);
        path.line_to(15.0, 2.0);
        path.line_to(15.0, 15.0);
        path.close();
        let mut paint = red_fill();
        paint.set_style(Style::Stroke);
        r.stroke_path(&path, &paint);
        assert_eq!(buf.get_pixel(10, 2), Color::RED);
        assert_eq!(buf.get_pixel(15, 10), Color::RED);
        // The closing edge from (15,15) back to (2,2) is not drawn.
        assert_eq!(buf.get_pixel(8, 8), Color::TRANSPARENT);
    }

    #[test]
    fn test_stroke_path_flattens_curves() {
        let mut buf = canvas_buf(20, 20);
        let clip = full_clip(&buf);
        let mut r = Rasterizer::new(&mut buf, &clip);
        let mut path = Path::new();
        path.move_to(2.0, 16.0);
        path.quad_to(10.0, -12.0, 18.0, 16.0);
        let mut paint = red_fill();
        paint.set_style(Style::Stroke);
        r.stroke_path(&path, &paint);
        // The arc passes well above the chord midpoint.
        let mut touched_upper_half = false;
        for y in 0..8 {
            for x in 0..20 {
                if buf.get_pixel(x, y) == Color::RED {
                    touched_upper_half = true;
                }
            }
        }
        assert!(touched_upper_half);
    }

    #[test]
    fn test_blend_mode_flows_through_fill() {
        let mut buf = canvas_buf(4, 4);
        buf.clear(Color::new(0, 0, 255, 255));
        let clip = full_clip(&buf);
        let mut r = Rasterizer::new(&mut buf, &clip);
        let mut paint = Paint::new();
        paint.set_color(Color::new(255, 0, 0, 255));
        paint.set_blend_mode(BlendMode::Dst);
        r.fill_rect(&Rect::new(0.0, 0.0, 4.0, 4.0), &paint);
        // Dst mode keeps the destination untouched.
        assert_eq!(buf.get_pixel(1, 1), Color::new(0, 0, 255, 255));
    }

    #[test]
    fn test_paint_alpha_resolves_before_blending() {
        let mut buf = canvas_buf(4, 4);
        buf.clear(Color::BLACK);
        let clip = full_clip(&buf);
        let mut r = Rasterizer::new(&mut buf, &clip);
        let mut paint = Paint::new();
        paint.set_color(Color::WHITE).set_alpha(128);
        r.fill_rect(&Rect::new(0.0, 0.0, 4.0, 4.0), &paint);
        let p = buf.get_pixel(0, 0);
        assert!((p.r as i32 - 128).abs() <= 1, "half-alpha white over black");
    }
}
