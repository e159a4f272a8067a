//! # softcanvas
//!
//! CPU 2D vector graphics: a stateful canvas over pluggable drawing
//! backends, rendering into in-memory ARGB bitmaps.
//!
//! The crate is organized around a three-layer pipeline:
//!
//! 1. **Canvas** — transform/clip save-restore stacks, paint resolution,
//!    and culling. Draw calls that end up empty after transform and clip
//!    never reach the backend.
//! 2. **Device** — the backend seam. [`device::RasterDevice`] rasterizes
//!    into a [`bitmap::Bitmap`]; [`device::NullDevice`] measures.
//! 3. **Rasterizer** — clip-bounded pixel production: rect fill/stroke,
//!    Bresenham and anti-aliased lines, fixed-step curve flattening, and
//!    scanline or bounding-box path fill, all composited through a
//!    premultiplied Porter-Duff blender.
//!
//! ```
//! use softcanvas::bitmap::Bitmap;
//! use softcanvas::canvas::Canvas;
//! use softcanvas::color::Color;
//! use softcanvas::device::RasterDevice;
//! use softcanvas::geometry::Rect;
//! use softcanvas::paint::Paint;
//!
//! let mut canvas = Canvas::new(RasterDevice::new(Bitmap::new(64, 64).unwrap()));
//! let mut paint = Paint::new();
//! paint.set_color(Color::RED);
//! canvas.clip_rect(&Rect::new(8.0, 8.0, 56.0, 56.0));
//! canvas.draw_rect(&Rect::new(0.0, 0.0, 64.0, 64.0), Some(&paint));
//! ```

// Foundation types and math
pub mod color;
pub mod error;
pub mod geometry;
pub mod math;
pub mod matrix;

// Geometry sources
pub mod curves;
pub mod path;

// Pixel production
pub mod bitmap;
pub mod compositor;
pub mod paint;
pub mod raster;

// Surface layer
pub mod canvas;
pub mod device;
pub mod filter;
pub mod text;

pub use canvas::Canvas;
pub use color::Color;
pub use device::{Device, DrawStatus, NullDevice, RasterDevice};
pub use error::{CanvasError, Result};
pub use geometry::{Point, Rect};
pub use paint::{BlendMode, Paint, Style};
pub use path::{FillType, Path};
