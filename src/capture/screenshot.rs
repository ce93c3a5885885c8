//! Display capture using the `xcap` crate.
//!
//! This is the infrastructure layer: it talks to the OS.
//! Monitors are re-enumerated on every call so a display plugged in
//! while the app is open shows up on the next switch.

use super::{CaptureError, ScreenSource};
use crate::geometry::Rect;
use image::RgbaImage;
use xcap::Monitor;

/// `ScreenSource` backed by `xcap::Monitor`.
#[derive(Debug, Default, Clone, Copy)]
pub struct XcapSource;

impl XcapSource {
    fn monitor(&self, index: usize) -> Result<Monitor, CaptureError> {
        let monitors =
            Monitor::all().map_err(|e| CaptureError::MonitorEnumeration(e.to_string()))?;
        let count = monitors.len();
        monitors
            .into_iter()
            .nth(index)
            .ok_or(CaptureError::NoSuchDisplay { index, count })
    }
}

impl ScreenSource for XcapSource {
    fn count(&self) -> usize {
        match Monitor::all() {
            Ok(monitors) => monitors.len(),
            Err(e) => {
                log::error!("Failed to enumerate displays: {}", e);
                0
            }
        }
    }

    fn bounds(&self, index: usize) -> Result<Rect, CaptureError> {
        let monitor = self.monitor(index)?;
        let geometry_err = |e: xcap::XCapError| CaptureError::MonitorEnumeration(e.to_string());

        let x = monitor.x().map_err(geometry_err)?;
        let y = monitor.y().map_err(geometry_err)?;
        let width = monitor.width().map_err(geometry_err)?;
        let height = monitor.height().map_err(geometry_err)?;

        Ok(Rect::new(x, y, x + width as i32, y + height as i32))
    }

    fn capture(&self, index: usize) -> Result<RgbaImage, CaptureError> {
        self.monitor(index)?
            .capture_image()
            .map_err(|e| CaptureError::CaptureFailed(e.to_string()))
    }
}
