//! Desktop window host built on `minifb`.
//!
//! Runs the single-threaded frame loop: sample input, tick the app,
//! render, present. Frames where nothing visible changed skip the
//! software render and only pump window events. The framebuffer is
//! stretched to whatever size the user gives the window, so pointer
//! positions are scaled back into canvas pixels before the app sees
//! them.

use crate::render;
use crate::ui::{App, ButtonEdges, Flow, FrameInput, Key};
use image::RgbaImage;
use minifb::{KeyRepeat, MouseButton, MouseMode, ScaleMode, Window, WindowOptions};

pub const MAX_INITIAL_WIDTH: usize = 1600;
pub const MAX_INITIAL_HEIGHT: usize = 900;
pub const TARGET_FPS: usize = 60;

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("Failed to open window: {0}")]
    WindowCreate(String),

    #[error("Failed to present frame: {0}")]
    Present(String),
}

/// Initial window size: the canvas, capped at 1600×900.
pub fn initial_window_size(canvas_width: usize, canvas_height: usize) -> (usize, usize) {
    (
        canvas_width.min(MAX_INITIAL_WIDTH),
        canvas_height.min(MAX_INITIAL_HEIGHT),
    )
}

/// Maps a window-space position onto a canvas stretched across the window.
pub fn window_to_canvas(
    pos: (f32, f32),
    window: (usize, usize),
    canvas: (usize, usize),
) -> (i32, i32) {
    let scale = |p: f32, win: usize, logical: usize| -> i32 {
        if win == 0 {
            return p as i32;
        }
        (p * logical as f32 / win as f32).floor() as i32
    };
    (
        scale(pos.0, window.0, canvas.0),
        scale(pos.1, window.1, canvas.1),
    )
}

/// Packs an RGBA frame into minifb's `0RGB` words.
pub fn pack_0rgb(frame: &RgbaImage, out: &mut Vec<u32>) {
    out.clear();
    out.extend(frame.pixels().map(|p| {
        let [r, g, b, _] = p.0;
        (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
    }));
}

/// Opens the window and drives `app` until it asks to exit or the
/// window is closed.
pub fn run(mut app: App) -> Result<(), HostError> {
    let (cw, ch) = app.layout(0, 0);
    let (ww, wh) = initial_window_size(cw, ch);

    let mut window = Window::new(
        app.title(),
        ww,
        wh,
        WindowOptions {
            resize: true,
            scale_mode: ScaleMode::Stretch,
            ..WindowOptions::default()
        },
    )
    .map_err(|e| HostError::WindowCreate(e.to_string()))?;
    window.set_target_fps(TARGET_FPS);

    log::info!("Window opened at {}x{} for a {}x{} canvas", ww, wh, cw, ch);

    let mut edges = ButtonEdges::default();
    let mut frame = RgbaImage::new(0, 0);
    let mut buffer: Vec<u32> = Vec::new();
    let mut title = app.title().to_string();

    while window.is_open() {
        let canvas_size = app.layout(ww, wh);
        let input = sample_input(&window, &mut edges, canvas_size);

        if app.tick(&input) == Flow::Exit {
            break;
        }

        if app.title() != title {
            title = app.title().to_string();
            window.set_title(&title);
        }

        if !app.take_redraw() {
            window.update();
            continue;
        }

        render::draw(&app, &mut frame);
        pack_0rgb(&frame, &mut buffer);

        let (lw, lh) = app.layout(ww, wh);
        window
            .update_with_buffer(&buffer, lw, lh)
            .map_err(|e| HostError::Present(e.to_string()))?;
    }

    log::info!("Frame loop finished");
    Ok(())
}

fn sample_input(window: &Window, edges: &mut ButtonEdges, canvas: (usize, usize)) -> FrameInput {
    let pos = window.get_mouse_pos(MouseMode::Clamp).unwrap_or((0.0, 0.0));
    let (x, y) = window_to_canvas(pos, window.get_size(), canvas);
    let down = window.get_mouse_down(MouseButton::Left);

    let mut input = FrameInput::idle_at(x, y);
    input.pointer = edges.sample(x, y, down);

    let bindings = [
        (minifb::Key::Escape, Key::Escape),
        (minifb::Key::Enter, Key::Enter),
        (minifb::Key::NumPadEnter, Key::Enter),
        (minifb::Key::A, Key::ToggleAll),
        (minifb::Key::Q, Key::PrevDisplay),
        (minifb::Key::E, Key::NextDisplay),
    ];
    for (host_key, key) in bindings {
        if window.is_key_pressed(host_key, KeyRepeat::No) {
            input = input.with_key(key);
        }
    }
    input
}
