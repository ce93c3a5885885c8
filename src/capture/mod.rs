//! Screen capture domain, public API.
//!
//! This module owns display enumeration and raster acquisition.
//! The OS side sits behind `ScreenSource`; everything else here is
//! pure composition over the rasters it returns.

mod compose;
mod screenshot;

pub use compose::{capture_all, capture_display, fallback_canvas, FALLBACK_HEIGHT, FALLBACK_WIDTH};
pub use screenshot::XcapSource;

use crate::geometry::Rect;
use image::RgbaImage;

/// Enumerates physical displays and grabs their pixels.
///
/// Display indices are `0..count()`; index 0 is the display the app
/// opens on. Bounds are absolute screen coordinates and may be negative
/// for displays placed left of or above the primary.
pub trait ScreenSource {
    fn count(&self) -> usize;

    fn bounds(&self, index: usize) -> Result<Rect, CaptureError>;

    /// Raw capture of one display, origin at `(0,0)`.
    fn capture(&self, index: usize) -> Result<RgbaImage, CaptureError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("No active displays found")]
    NoDisplays,

    #[error("Failed to enumerate displays: {0}")]
    MonitorEnumeration(String),

    #[error("Display {index} not found ({count} attached)")]
    NoSuchDisplay { index: usize, count: usize },

    #[error("Screen capture failed: {0}")]
    CaptureFailed(String),
}
