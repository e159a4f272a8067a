//! Canvas: the stateful drawing surface.
//!
//! A canvas keeps two parallel stacks — transform and clip — always the
//! same depth, with an implicit base frame covering the full device
//! bounds. `save` pushes copies (never aliases; `Matrix2D` and `Rect`
//! are value types), `restore` pops but never below the base frame.
//!
//! Every drawing entry point follows the same discipline, in order:
//! map the input geometry's bounds through the current transform,
//! intersect against the current clip, return [`DrawStatus::Skipped`]
//! without touching the device if the result is empty, and otherwise
//! delegate to the device with the resolved paint. An explicit paint
//! argument overrides the canvas's current paint.

use log::{debug, trace};

use crate::color::Color;
use crate::compositor::apply_alpha;
use crate::device::{Device, DrawStatus};
use crate::filter::ColorFilter;
use crate::geometry::{Point, Rect};
use crate::math::deg2rad;
use crate::matrix::Matrix2D;
use crate::paint::Paint;
use crate::path::Path;
use crate::text::{BoxTextLayout, Font, PositionedGlyph, TextLayout};

/// One save/restore frame: transform and clip, copied on push.
#[derive(Debug, Clone, Copy)]
struct CanvasState {
    transform: Matrix2D,
    clip: Rect,
}

/// Stateful drawing surface over a [`Device`] backend.
pub struct Canvas<D: Device> {
    device: D,
    stack: Vec<CanvasState>,
    paint: Paint,
    color_filter: Option<Box<dyn ColorFilter>>,
    text_layout: Box<dyn TextLayout>,
}

impl<D: Device> Canvas<D> {
    /// Canvas at depth 1: identity transform, clip = full device bounds.
    pub fn new(device: D) -> Self {
        let base = CanvasState {
            transform: Matrix2D::identity(),
            clip: device.bounds(),
        };
        Self {
            device,
            stack: vec![base],
            paint: Paint::new(),
            color_filter: None,
            text_layout: Box::new(BoxTextLayout),
        }
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    pub fn into_device(self) -> D {
        self.device
    }

    // ========================================================================
    // State stack
    // ========================================================================

    /// Current stack depth (always >= 1).
    pub fn save_count(&self) -> usize {
        self.stack.len()
    }

    /// Push a copy of the current transform and clip.
    pub fn save(&mut self) {
        let top = *self.top();
        self.stack.push(top);
        trace!("save -> depth {}", self.stack.len());
    }

    /// Pop to the previous frame. At the base frame this is a no-op; the
    /// base is never removed.
    pub fn restore(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
        trace!("restore -> depth {}", self.stack.len());
    }

    #[inline]
    fn top(&self) -> &CanvasState {
        self.stack.last().unwrap()
    }

    #[inline]
    fn top_mut(&mut self) -> &mut CanvasState {
        self.stack.last_mut().unwrap()
    }

    /// Current total transform (top of stack).
    pub fn total_matrix(&self) -> Matrix2D {
        self.top().transform
    }

    /// Current clip in device coordinates.
    pub fn clip_bounds(&self) -> Rect {
        self.top().clip
    }

    // ========================================================================
    // Transform ops (post-multiply: new ops act in local space)
    // ========================================================================

    pub fn translate(&mut self, dx: f64, dy: f64) {
        let top = self.top_mut();
        top.transform = top.transform.translated(dx, dy);
    }

    pub fn scale(&mut self, sx: f64, sy: f64) {
        let top = self.top_mut();
        top.transform = top.transform.scaled(sx, sy);
    }

    /// Rotate the local coordinate space by `degrees`.
    pub fn rotate(&mut self, degrees: f64) {
        let top = self.top_mut();
        top.transform = top.transform.rotated(deg2rad(degrees));
    }

    /// Post-multiply an arbitrary matrix into the current transform.
    pub fn concat(&mut self, matrix: &Matrix2D) {
        let top = self.top_mut();
        top.transform = top.transform.concat(matrix);
    }

    /// Intersect the current clip with `rect` (mapped through the
    /// current transform). The clip only ever shrinks within a
    /// save/restore scope.
    pub fn clip_rect(&mut self, rect: &Rect) {
        let device_rect = self.top().transform.map_rect(rect);
        let top = self.top_mut();
        top.clip = Rect::intersect(&top.clip, &device_rect);
        if top.clip.is_empty() {
            debug!("clip_rect produced an empty clip; draws will skip");
        }
    }

    // ========================================================================
    // Paint and collaborators
    // ========================================================================

    /// The canvas's current paint, used when a draw call passes no
    /// explicit paint.
    pub fn set_paint(&mut self, paint: Paint) {
        self.paint = paint;
    }

    pub fn paint(&self) -> &Paint {
        &self.paint
    }

    /// Install (or clear) the color filter applied after paint-color
    /// resolution and before blending.
    pub fn set_color_filter(&mut self, filter: Option<Box<dyn ColorFilter>>) {
        self.color_filter = filter;
    }

    /// Replace the text layout collaborator.
    pub fn set_text_layout(&mut self, layout: Box<dyn TextLayout>) {
        self.text_layout = layout;
    }

    /// Resolved paint: explicit argument over current paint, extra alpha
    /// folded into the color, color filter applied.
    fn resolve_paint(&self, explicit: Option<&Paint>) -> Paint {
        let mut p = explicit.unwrap_or(&self.paint).clone();
        let mut color = apply_alpha(p.color, p.alpha);
        if let Some(filter) = &self.color_filter {
            color = filter.filter(color);
        }
        p.color = color;
        p.alpha = 255;
        p
    }

    // ========================================================================
    // Drawing entry points
    // ========================================================================

    /// Overwrite the whole surface, ignoring transform and clip.
    pub fn clear(&mut self, color: Color) {
        self.device.clear(color);
    }

    pub fn draw_rect(&mut self, rect: &Rect, paint: Option<&Paint>) -> DrawStatus {
        if rect.is_empty() {
            return DrawStatus::Skipped;
        }
        let mapped = self.top().transform.map_rect(rect);
        let visible = Rect::intersect(&mapped, &self.top().clip);
        if visible.is_empty() {
            debug!("draw_rect skipped: empty after transform+clip");
            return DrawStatus::Skipped;
        }
        let resolved = self.resolve_paint(paint);
        let clip = self.top().clip;
        self.device.draw_rect(&mapped, &resolved, &clip)
    }

    pub fn draw_line(&mut self, a: &Point, b: &Point, paint: Option<&Paint>) -> DrawStatus {
        let da = self.top().transform.map_point(a);
        let db = self.top().transform.map_point(b);
        if da == db {
            // Zero-length line: degenerate geometry, not an error.
            return DrawStatus::Skipped;
        }
        // The segment bbox can be zero-width/height for axis-aligned
        // lines; pad by the stroke reach before the clip test.
        let resolved = self.resolve_paint(paint);
        let pad = resolved.stroke_width.max(1.0);
        let mut bounds = Rect::new(
            da.x.min(db.x),
            da.y.min(db.y),
            da.x.max(db.x),
            da.y.max(db.y),
        );
        bounds.inset(-pad, -pad);
        if Rect::intersect(&bounds, &self.top().clip).is_empty() {
            debug!("draw_line skipped: outside clip");
            return DrawStatus::Skipped;
        }
        let clip = self.top().clip;
        self.device.draw_line(&da, &db, &resolved, &clip)
    }

    pub fn draw_path(&mut self, path: &Path, paint: Option<&Paint>) -> DrawStatus {
        if path.is_empty() {
            return DrawStatus::Skipped;
        }
        let mut device_path = path.clone();
        device_path.transform(&self.top().transform);
        let visible = Rect::intersect(&device_path.bounds(), &self.top().clip);
        if visible.is_empty() {
            debug!("draw_path skipped: empty after transform+clip");
            return DrawStatus::Skipped;
        }
        let resolved = self.resolve_paint(paint);
        let clip = self.top().clip;
        self.device.draw_path(&device_path, &resolved, &clip)
    }

    /// Lay out `text` via the text collaborator and fill the positioned
    /// glyph boxes. Glyph outlines are out of scope; boxes are opaque
    /// fillable rectangles.
    pub fn draw_text(
        &mut self,
        text: &str,
        origin: &Point,
        font: &Font,
        paint: Option<&Paint>,
    ) -> DrawStatus {
        let glyphs = self.text_layout.layout(text, font, *origin);
        let transform = self.top().transform;
        let clip = self.top().clip;
        let mapped: Vec<PositionedGlyph> = glyphs
            .iter()
            .map(|g| PositionedGlyph {
                bounds: transform.map_rect(&g.bounds),
            })
            .filter(|g| !Rect::intersect(&g.bounds, &clip).is_empty())
            .collect();
        if mapped.is_empty() {
            return DrawStatus::Skipped;
        }
        let resolved = self.resolve_paint(paint);
        self.device.draw_glyphs(&mapped, &resolved, &clip)
    }

    pub fn draw_round_rect(
        &mut self,
        rect: &Rect,
        rx: f64,
        ry: f64,
        paint: Option<&Paint>,
    ) -> DrawStatus {
        if rect.is_empty() {
            return DrawStatus::Skipped;
        }
        let mapped = self.top().transform.map_rect(rect);
        if Rect::intersect(&mapped, &self.top().clip).is_empty() {
            return DrawStatus::Skipped;
        }
        let resolved = self.resolve_paint(paint);
        let clip = self.top().clip;
        self.device.draw_round_rect(&mapped, rx, ry, &resolved, &clip)
    }

    pub fn draw_oval(&mut self, rect: &Rect, paint: Option<&Paint>) -> DrawStatus {
        if rect.is_empty() {
            return DrawStatus::Skipped;
        }
        let mapped = self.top().transform.map_rect(rect);
        if Rect::intersect(&mapped, &self.top().clip).is_empty() {
            return DrawStatus::Skipped;
        }
        let resolved = self.resolve_paint(paint);
        let clip = self.top().clip;
        self.device.draw_oval(&mapped, &resolved, &clip)
    }

    /// Flush the backend. Raster backends are synchronous, so this is a
    /// pass-through.
    pub fn flush(&mut self) {
        self.device.flush();
    }
}

// ============================================================================
// Tests
// ============================================================================
