//! Software overlay renderer.
//!
//! Draws one frame into an RGBA buffer the size of the canvas:
//! background, hole overlay around the selection, selection border,
//! Save/Cancel buttons and HUD text. The host only has to blit the
//! result.

mod text;

pub use text::{draw_text, draw_text_shadowed, GLYPH_ADVANCE};

use crate::geometry::Rect;
use crate::ui::{App, ButtonBar, ButtonKind};
use image::{Pixel, Rgba, RgbaImage};

pub const OVERLAY_ALPHA: u8 = 100;
pub const BORDER_COLOR: Rgba<u8> = Rgba([255, 255, 255, 220]);
pub const BORDER_THICKNESS: i32 = 2;

pub const BUTTON_FILL: Rgba<u8> = Rgba([40, 40, 40, 220]);
pub const BUTTON_FILL_HOVER: Rgba<u8> = Rgba([60, 60, 60, 255]);
pub const BUTTON_BORDER: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const BUTTON_LABEL_DX: i32 = 10;
pub const BUTTON_LABEL_DY: i32 = 8;

pub const HUD_X: i32 = 16;
pub const HUD_STATUS_Y: i32 = 16;
pub const HUD_SAVED_Y: i32 = 36;
pub const HUD_MODE_Y: i32 = 56;
pub const HUD_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Renders the current app state into `frame`.
///
/// `frame` is reallocated only when the canvas size changed since the
/// previous call.
pub fn draw(app: &App, frame: &mut RgbaImage) {
    let canvas = app.canvas();
    let (w, h) = canvas.size();
    if frame.dimensions() != (w, h) {
        *frame = RgbaImage::new(w, h);
    }

    copy_region(frame, canvas.image(), canvas.bounds());

    if let Some(sel) = app.selection().current_rect() {
        dim(frame, OVERLAY_ALPHA);
        copy_region(frame, canvas.image(), sel.intersect(&canvas.bounds()));
        stroke_rect(frame, sel, BORDER_THICKNESS, BORDER_COLOR);
    }

    if app.selection().is_locked() {
        draw_buttons(frame, app.buttons(), app.hovered_button());
    }

    draw_hud(frame, app);
}

fn draw_buttons(frame: &mut RgbaImage, buttons: &ButtonBar, hovered: Option<ButtonKind>) {
    for button in buttons.iter() {
        let fill = if hovered == Some(button.kind) {
            BUTTON_FILL_HOVER
        } else {
            BUTTON_FILL
        };
        fill_rect(frame, button.rect, fill);
        stroke_rect(frame, button.rect, BORDER_THICKNESS, BUTTON_BORDER);
        draw_text(
            frame,
            button.label,
            button.rect.x0 + BUTTON_LABEL_DX,
            button.rect.y0 + BUTTON_LABEL_DY,
            HUD_COLOR,
        );
    }
}

fn draw_hud(frame: &mut RgbaImage, app: &App) {
    if !app.hud_message().is_empty() {
        draw_text_shadowed(frame, app.hud_message(), HUD_X, HUD_STATUS_Y, HUD_COLOR);
    }

    if let Some(path) = app.saved_path() {
        let line = format!("Saved at: {}", path.display());
        draw_text_shadowed(frame, &line, HUD_X, HUD_SAVED_Y, HUD_COLOR);
    }

    let mode_line = format!(
        "Mode: {} | Display {}/{}",
        app.mode().label(),
        app.display_index() + 1,
        app.display_count()
    );
    draw_text_shadowed(frame, &mode_line, HUD_X, HUD_MODE_Y, HUD_COLOR);
}

/// Source-over blend of `src` onto `dst`.
pub(crate) fn blend_pixel(dst: &mut Rgba<u8>, src: Rgba<u8>) {
    dst.blend(&src);
}

/// Copies `rect` from `src` to the same position in `dst`, row by row.
fn copy_region(dst: &mut RgbaImage, src: &RgbaImage, rect: Rect) {
    let clip = rect
        .intersect(&Rect::from_size(dst.width(), dst.height()))
        .intersect(&Rect::from_size(src.width(), src.height()));
    if clip.is_empty() {
        return;
    }

    let src_stride = src.width() as usize * 4;
    let dst_stride = dst.width() as usize * 4;
    let x_off = clip.x0 as usize * 4;
    let len = clip.width() as usize * 4;

    let src_raw = src.as_raw();
    let dst_raw: &mut [u8] = dst;
    for y in clip.y0 as usize..clip.y1 as usize {
        let s = y * src_stride + x_off;
        let d = y * dst_stride + x_off;
        dst_raw[d..d + len].copy_from_slice(&src_raw[s..s + len]);
    }
}

/// Blends black at `alpha` over the whole frame.
fn dim(frame: &mut RgbaImage, alpha: u8) {
    let keep = 255 - u32::from(alpha);
    let raw: &mut [u8] = frame;
    for px in raw.chunks_exact_mut(4) {
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * keep + 127) / 255) as u8;
        }
        px[3] = (u32::from(alpha) + (u32::from(px[3]) * keep + 127) / 255) as u8;
    }
}

fn fill_rect(frame: &mut RgbaImage, rect: Rect, color: Rgba<u8>) {
    let clip = rect.intersect(&Rect::from_size(frame.width(), frame.height()));
    for y in clip.y0..clip.y1 {
        for x in clip.x0..clip.x1 {
            blend_pixel(frame.get_pixel_mut(x as u32, y as u32), color);
        }
    }
}

/// Draws a border of `thickness` pixels along the inside of `rect`.
fn stroke_rect(frame: &mut RgbaImage, rect: Rect, thickness: i32, color: Rgba<u8>) {
    let Rect { x0, y0, x1, y1 } = rect;
    fill_rect(frame, Rect::new(x0, y0, x1, y0 + thickness), color);
    fill_rect(frame, Rect::new(x0, y1 - thickness, x1, y1), color);
    fill_rect(frame, Rect::new(x0, y0, x0 + thickness, y1), color);
    fill_rect(frame, Rect::new(x1 - thickness, y0, x1, y1), color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::{CaptureError, ScreenSource};
    use crate::ui::FrameInput;
    use std::path::PathBuf;

    const BG: Rgba<u8> = Rgba([200, 100, 50, 255]);

    struct OneDisplay;

    impl ScreenSource for OneDisplay {
        fn count(&self) -> usize {
            1
        }

        fn bounds(&self, _index: usize) -> Result<Rect, CaptureError> {
            Ok(Rect::from_size(400, 300))
        }

        fn capture(&self, _index: usize) -> Result<RgbaImage, CaptureError> {
            Ok(RgbaImage::from_pixel(400, 300, BG))
        }
    }

    fn app() -> App {
        let mut app = App::new(Box::new(OneDisplay), PathBuf::from("unused")).unwrap();
        app.set_hud_message("");
        app
    }

    fn near(a: Rgba<u8>, b: [u8; 4]) -> bool {
        a.0.iter().zip(b).all(|(x, y)| x.abs_diff(y) <= 1)
    }

    #[test]
    fn idle_frame_is_the_canvas() {
        let app = app();
        let mut frame = RgbaImage::new(1, 1);
        draw(&app, &mut frame);
        assert_eq!(frame.dimensions(), (400, 300));
        assert_eq!(*frame.get_pixel(399, 299), BG);
        assert_eq!(*frame.get_pixel(200, 150), BG);
    }

    #[test]
    fn dragging_dims_outside_and_keeps_hole_bright() {
        let mut app = app();
        app.tick(&FrameInput::press_at(100, 100));
        app.tick(&FrameInput::hold_at(200, 180));

        let mut frame = RgbaImage::new(400, 300);
        draw(&app, &mut frame);

        // 200 * 155 / 255 ≈ 122
        assert!(near(*frame.get_pixel(300, 250), [122, 61, 30, 255]));
        assert_eq!(*frame.get_pixel(150, 140), BG);
        // Border blends near-white over the bright selection.
        let edge = frame.get_pixel(100, 140);
        assert!(edge.0[0] > 240 && edge.0[2] > 220, "border pixel {:?}", edge);
        let inner_edge = frame.get_pixel(199, 179);
        assert!(inner_edge.0[2] > 220);
        assert_eq!(*frame.get_pixel(102, 140), BG);
    }

    #[test]
    fn locked_selection_draws_buttons_with_hover() {
        let mut app = app();
        app.selection_mut().lock(Rect::new(100, 50, 300, 150));
        let save = app.buttons().save.rect;
        let cancel = app.buttons().cancel.rect;
        app.tick(&FrameInput::idle_at(save.x0 + 3, save.y0 + 3));

        let mut frame = RgbaImage::new(400, 300);
        draw(&app, &mut frame);

        let hovered = *frame.get_pixel((save.x0 + 3) as u32, (save.y0 + 3) as u32);
        assert!(near(hovered, [60, 60, 60, 255]), "hovered body {:?}", hovered);

        let body = *frame.get_pixel((cancel.x0 + 3) as u32, (cancel.y0 + 3) as u32);
        assert!(body.0[0] < 80 && body.0[0] > 30, "cancel body {:?}", body);
        assert!(!near(body, [60, 60, 60, 255]));

        let border = *frame.get_pixel(save.x0 as u32, (save.y0 + 10) as u32);
        assert!(near(border, [255, 255, 255, 255]));
    }

    #[test]
    fn buttons_hidden_while_dragging() {
        let mut app = app();
        app.tick(&FrameInput::press_at(100, 50));
        app.tick(&FrameInput::hold_at(300, 150));
        let save = app.buttons().save.rect;

        let mut frame = RgbaImage::new(400, 300);
        draw(&app, &mut frame);
        let px = *frame.get_pixel((save.x0 + 3) as u32, (save.y0 + 3) as u32);
        assert!(near(px, [122, 61, 30, 255]));
    }

    #[test]
    fn hud_lines_land_at_fixed_rows() {
        let mut app = app();
        app.set_hud_message("hello");
        let mut frame = RgbaImage::new(400, 300);
        draw(&app, &mut frame);

        let row_changed = |y0: u32| {
            (y0..y0 + 9).any(|y| (16..200).any(|x| *frame.get_pixel(x, y) != BG))
        };
        assert!(row_changed(16));
        assert!(!row_changed(36), "no saved path yet");
        assert!(row_changed(56));
    }

    #[test]
    fn dim_is_source_over_black() {
        let mut frame = RgbaImage::from_pixel(2, 1, Rgba([255, 0, 10, 255]));
        frame.put_pixel(1, 0, Rgba([0, 0, 0, 0]));
        dim(&mut frame, 100);
        assert_eq!(*frame.get_pixel(0, 0), Rgba([155, 0, 6, 255]));
        assert_eq!(*frame.get_pixel(1, 0), Rgba([0, 0, 0, 100]));
    }
}
