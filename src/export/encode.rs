//! Pure PNG encoding, the functional core of the export domain.
//!
//! Takes pixel data in, returns PNG bytes out. Nothing here touches
//! the filesystem, so a failed encode never leaves a partial file.

use super::ExportError;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, RgbaImage, SubImage};

/// Encodes a canvas view as an 8-bit RGBA, non-interlaced PNG.
pub fn encode_png(view: &SubImage<&RgbaImage>) -> Result<Vec<u8>, ExportError> {
    let cropped = view.to_image();
    let (width, height) = cropped.dimensions();
    if width == 0 || height == 0 {
        return Err(ExportError::Encode(format!(
            "selection has zero width or height ({}x{})",
            width, height
        )));
    }

    let mut png_bytes: Vec<u8> = Vec::new();
    PngEncoder::new_with_quality(&mut png_bytes, CompressionType::Default, FilterType::Adaptive)
        .write_image(cropped.as_raw(), width, height, ExtendedColorType::Rgba8)
        .map_err(|e| ExportError::Encode(e.to_string()))?;

    Ok(png_bytes)
}
