//! Canvas composition, the functional core of the capture domain.
//!
//! Turns per-display rasters into one canvas with origin `(0,0)`.
//! Failures never propagate: the UI must stay usable even when a
//! display driver refuses to hand over pixels.

use super::ScreenSource;
use crate::geometry::Rect;
use image::imageops::{self, FilterType};
use image::RgbaImage;
use std::time::Instant;

pub const FALLBACK_WIDTH: u32 = 800;
pub const FALLBACK_HEIGHT: u32 = 600;

/// Blank raster shown when nothing could be captured.
pub fn fallback_canvas() -> RgbaImage {
    RgbaImage::new(FALLBACK_WIDTH, FALLBACK_HEIGHT)
}

/// Captures display `index` translated to `(0,0)`.
///
/// The result is always `bounds(index).size()`; on any failure the error
/// is logged and an 800×600 blank raster is returned instead.
pub fn capture_display(source: &dyn ScreenSource, index: usize) -> RgbaImage {
    let start = Instant::now();

    let captured = source
        .bounds(index)
        .and_then(|bounds| source.capture(index).map(|shot| (bounds, shot)));

    match captured {
        Ok((bounds, shot)) => {
            let canvas = fit_to_bounds(shot, &bounds);
            log::info!(
                "Captured display {} ({}x{}) in {}ms",
                index,
                canvas.width(),
                canvas.height(),
                start.elapsed().as_millis()
            );
            canvas
        }
        Err(e) => {
            log::error!(
                "Failed to capture display {}: {}; showing a blank {}x{} canvas",
                index,
                e,
                FALLBACK_WIDTH,
                FALLBACK_HEIGHT
            );
            fallback_canvas()
        }
    }
}

/// Captures every display and stitches them into one canvas covering
/// the union of their bounds.
///
/// Each display lands at `bounds.min - union.min` with source-copy
/// semantics. A display that fails to capture leaves its region black.
pub fn capture_all(source: &dyn ScreenSource) -> RgbaImage {
    let start = Instant::now();

    let displays: Vec<(usize, Rect)> = (0..source.count())
        .filter_map(|i| match source.bounds(i) {
            Ok(bounds) => Some((i, bounds)),
            Err(e) => {
                log::error!("Skipping display {}: {}", i, e);
                None
            }
        })
        .collect();

    let Some(union) = Rect::union_all(displays.iter().map(|(_, b)| b)) else {
        log::error!("No displays to compose, showing a blank canvas");
        return fallback_canvas();
    };

    let mut canvas = RgbaImage::new(union.width() as u32, union.height() as u32);

    for (i, bounds) in &displays {
        match source.capture(*i) {
            Ok(shot) => {
                let shot = fit_to_bounds(shot, bounds);
                imageops::replace(
                    &mut canvas,
                    &shot,
                    i64::from(bounds.x0 - union.x0),
                    i64::from(bounds.y0 - union.y0),
                );
            }
            Err(e) => {
                log::error!(
                    "Failed to capture display {}: {}; its region stays black",
                    i,
                    e
                );
            }
        }
    }

    log::info!(
        "Composed {} display(s) into {}x{} canvas in {}ms",
        displays.len(),
        canvas.width(),
        canvas.height(),
        start.elapsed().as_millis()
    );

    canvas
}

/// Largest per-axis size mismatch treated as rounding rather than scaling.
const ROUNDING_SLACK: u32 = 1;

/// Forces a raw capture to the size its display reports.
///
/// Scaled (HiDPI) captures come back in physical pixels while bounds are
/// logical; those are resampled so the whole display stays visible.
/// Off-by-one rounding is clipped or zero-padded from the top-left.
fn fit_to_bounds(shot: RgbaImage, bounds: &Rect) -> RgbaImage {
    let width = bounds.width().max(0) as u32;
    let height = bounds.height().max(0) as u32;
    if shot.dimensions() == (width, height) {
        return shot;
    }

    let rounding_only = shot.width().abs_diff(width) <= ROUNDING_SLACK
        && shot.height().abs_diff(height) <= ROUNDING_SLACK;

    if rounding_only {
        log::debug!(
            "Capture is {}x{} but display reports {}x{}, padding to bounds",
            shot.width(),
            shot.height(),
            width,
            height
        );
        let mut fitted = RgbaImage::new(width, height);
        imageops::replace(&mut fitted, &shot, 0, 0);
        return fitted;
    }

    log::info!(
        "Scaling {}x{} capture to {}x{} display bounds",
        shot.width(),
        shot.height(),
        width,
        height
    );
    imageops::resize(&shot, width, height, FilterType::Triangle)
}
