//! Error types.
//!
//! Only construction-time precondition violations cross the public API
//! as errors; everything the rasterizer can encounter at draw time
//! (offscreen geometry, empty clips, degenerate curves) is handled
//! locally as a clamp, a skip, or a defined fallback.

use thiserror::Error;

/// Result alias for fallible softcanvas operations.
pub type Result<T> = std::result::Result<T, CanvasError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CanvasError {
    /// A pixel buffer was constructed with a zero dimension.
    #[error("invalid bitmap dimensions {width}x{height}: both must be positive")]
    InvalidDimensions { width: u32, height: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = CanvasError::InvalidDimensions {
            width: 0,
            height: 10,
        };
        assert_eq!(
            e.to_string(),
            "invalid bitmap dimensions 0x10: both must be positive"
        );
    }
}
