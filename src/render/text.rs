//! Bitmap HUD text using the `font8x8` basic glyph set.

use super::blend_pixel;
use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{Rgba, RgbaImage};

/// Horizontal advance per character, in pixels.
pub const GLYPH_ADVANCE: i32 = 8;

/// Draws `text` with its top-left corner at `(x, y)`, clipped to `frame`.
///
/// Characters outside the basic Latin block render as `?`.
pub fn draw_text(frame: &mut RgbaImage, text: &str, x: i32, y: i32, color: Rgba<u8>) {
    let (fw, fh) = (frame.width() as i32, frame.height() as i32);
    let mut cursor_x = x;

    for ch in text.chars() {
        let glyph = BASIC_FONTS.get(ch).or_else(|| BASIC_FONTS.get('?'));
        let Some(glyph) = glyph else {
            cursor_x += GLYPH_ADVANCE;
            continue;
        };

        for (row_idx, row) in glyph.iter().enumerate() {
            let py = y + row_idx as i32;
            if py < 0 || py >= fh {
                continue;
            }
            for col_idx in 0..8 {
                if (*row >> col_idx) & 1 == 0 {
                    continue;
                }
                let px = cursor_x + col_idx;
                if px < 0 || px >= fw {
                    continue;
                }
                blend_pixel(frame.get_pixel_mut(px as u32, py as u32), color);
            }
        }
        cursor_x += GLYPH_ADVANCE;
    }
}

/// Text with a one-pixel dark drop shadow, readable on any background.
pub fn draw_text_shadowed(frame: &mut RgbaImage, text: &str, x: i32, y: i32, color: Rgba<u8>) {
    draw_text(frame, text, x + 1, y + 1, Rgba([0, 0, 0, 180]));
    draw_text(frame, text, x, y, color);
}
