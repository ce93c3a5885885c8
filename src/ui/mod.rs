//! UI controller: turns per-frame input into selection, capture and
//! export actions.
//!
//! The controller is host-agnostic: the host feeds it a `FrameInput`
//! once per frame and reads back the canvas, HUD and title to present.

mod buttons;
mod input;

pub use buttons::{
    Button, ButtonBar, ButtonKind, BUTTON_GAP, BUTTON_HEIGHT, BUTTON_PADDING, BUTTON_WIDTH,
};
pub use input::{ButtonEdges, FrameInput, Key, PointerInput};

use crate::canvas::Canvas;
use crate::capture::{capture_all, capture_display, CaptureError, ScreenSource};
use crate::export;
use crate::selection::{clamp_to, Selection, SelectionState};
use image::RgbaImage;
use std::path::{Path, PathBuf};

pub const MSG_WELCOME: &str =
    "Drag to select | Esc: quit | Q/E: switch display | A: toggle all displays";
pub const MSG_READY: &str = "Selection ready - Save/Enter or Cancel/Esc";
pub const MSG_CANCELLED: &str = "Selection cancelled";
pub const MSG_SAVED: &str = "Image saved!";
pub const MSG_DISPLAY_CHANGED: &str =
    "Display changed. Drag to select | Esc: quit | Q/E: switch display | A: toggle all displays";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Single,
    All,
}

impl Mode {
    /// Short name for the HUD mode line.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Single => "single",
            Mode::All => "all",
        }
    }

    fn title_label(self) -> &'static str {
        match self {
            Mode::Single => "single display",
            Mode::All => "all displays",
        }
    }
}

/// What the host should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Window title for `mode`, with the embedded build suffix.
pub fn window_title(mode: Mode) -> String {
    format!(
        "Snip - Selection ({}){}",
        mode.title_label(),
        crate::build_suffix()
    )
}

/// Application state for one snipping session.
pub struct App {
    source: Box<dyn ScreenSource>,
    canvas: Canvas,
    mode: Mode,
    display_index: usize,
    display_count: usize,
    selection: Selection,
    buttons: ButtonBar,
    saved_path: Option<PathBuf>,
    hud_message: String,
    output_dir: PathBuf,
    pointer: (i32, i32),
    pressed_button: Option<ButtonKind>,
    title: String,
    /// Something visible changed since the host last presented a frame.
    dirty: bool,
}

impl App {
    /// Captures display 0 and starts in single-display mode.
    ///
    /// Fails with `NoDisplays` when the source reports no displays.
    pub fn new(source: Box<dyn ScreenSource>, output_dir: PathBuf) -> Result<Self, CaptureError> {
        let display_count = source.count();
        if display_count == 0 {
            return Err(CaptureError::NoDisplays);
        }

        let raster = capture_display(&*source, 0);
        log::info!(
            "Found {} display(s); starting on display 1 ({}x{})",
            display_count,
            raster.width(),
            raster.height()
        );

        Ok(Self::with_canvas(source, raster, display_count, output_dir))
    }

    /// Builds the app around an already captured raster.
    pub fn with_canvas(
        source: Box<dyn ScreenSource>,
        raster: RgbaImage,
        display_count: usize,
        output_dir: PathBuf,
    ) -> Self {
        let (w, h) = raster.dimensions();
        Self {
            source,
            canvas: Canvas::new(raster),
            mode: Mode::Single,
            display_index: 0,
            display_count: display_count.max(1),
            selection: Selection::new(),
            buttons: ButtonBar::layout(w, h),
            saved_path: None,
            hud_message: MSG_WELCOME.to_string(),
            output_dir,
            pointer: (0, 0),
            pressed_button: None,
            title: window_title(Mode::Single),
            dirty: true,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn display_index(&self) -> usize {
        self.display_index
    }

    pub fn display_count(&self) -> usize {
        self.display_count
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[cfg(test)]
    pub(crate) fn selection_mut(&mut self) -> &mut Selection {
        self.dirty = true;
        &mut self.selection
    }

    pub fn buttons(&self) -> &ButtonBar {
        &self.buttons
    }

    pub fn saved_path(&self) -> Option<&Path> {
        self.saved_path.as_deref()
    }

    pub fn hud_message(&self) -> &str {
        &self.hud_message
    }

    #[cfg(test)]
    pub(crate) fn set_hud_message(&mut self, message: impl Into<String>) {
        self.set_status(message);
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Last pointer position, clamped to the canvas.
    pub fn pointer(&self) -> (i32, i32) {
        self.pointer
    }

    /// Button under the pointer while a selection is locked.
    pub fn hovered_button(&self) -> Option<ButtonKind> {
        if !self.selection.is_locked() {
            return None;
        }
        self.buttons.hit_test(self.pointer.0, self.pointer.1)
    }

    /// Logical size requested from the host, whatever the window size.
    pub fn layout(&self, _outside_width: usize, _outside_height: usize) -> (usize, usize) {
        let (w, h) = self.canvas.size();
        (w as usize, h as usize)
    }

    /// Returns whether the frame needs redrawing and resets the flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Advances one frame.
    pub fn tick(&mut self, input: &FrameInput) -> Flow {
        let before = (self.pointer, self.selection.clone());
        let flow = self.step(input);
        if before != (self.pointer, self.selection.clone()) {
            self.dirty = true;
        }
        flow
    }

    fn step(&mut self, input: &FrameInput) -> Flow {
        let (x, y) = clamp_to(&self.canvas.bounds(), input.pointer.x, input.pointer.y);
        self.pointer = (x, y);

        if input.just_pressed(Key::ToggleAll) {
            self.toggle_mode();
            return Flow::Continue;
        }

        if self.mode == Mode::Single && !self.selection.is_dragging() {
            if input.just_pressed(Key::PrevDisplay) {
                let n = self.display_count;
                self.switch_display((self.display_index + n - 1) % n);
                return Flow::Continue;
            }
            if input.just_pressed(Key::NextDisplay) {
                self.switch_display(self.display_index + 1);
                return Flow::Continue;
            }
        }

        if input.just_pressed(Key::Escape) {
            if self.selection.state() == SelectionState::Idle {
                log::info!("Escape with no selection, exiting");
                return Flow::Exit;
            }
            self.cancel_selection();
            return Flow::Continue;
        }

        match self.selection.state() {
            SelectionState::Idle => {
                if input.pointer.pressed {
                    self.selection.begin(x, y);
                    if self.saved_path.take().is_some() {
                        self.dirty = true;
                    }
                }
            }
            SelectionState::Dragging => {
                if input.pointer.held {
                    self.selection.drag_to(x, y);
                } else {
                    self.finish_drag(x, y);
                }
            }
            SelectionState::Locked => {
                if input.just_pressed(Key::Enter) {
                    self.save_selection();
                } else {
                    self.handle_button_click(&input.pointer, x, y);
                }
            }
        }

        Flow::Continue
    }

    fn finish_drag(&mut self, x: i32, y: i32) {
        match self.selection.release(x, y) {
            Ok(rect) => {
                log::info!(
                    "Selection locked: {}x{} at {},{}",
                    rect.width(),
                    rect.height(),
                    rect.x0,
                    rect.y0
                );
                self.pressed_button = None;
                self.set_status(MSG_READY);
            }
            Err(e) => {
                log::debug!("{}", e);
                self.set_status(e.to_string());
            }
        }
    }

    /// A click counts only when press and release land on the same button.
    fn handle_button_click(&mut self, pointer: &PointerInput, x: i32, y: i32) {
        if pointer.pressed {
            self.pressed_button = self.buttons.hit_test(x, y);
        }
        if !pointer.released {
            return;
        }

        let pressed = self.pressed_button.take();
        let released = self.buttons.hit_test(x, y);
        match (pressed, released) {
            (Some(ButtonKind::Save), Some(ButtonKind::Save)) => self.save_selection(),
            (Some(ButtonKind::Cancel), Some(ButtonKind::Cancel)) => self.cancel_selection(),
            _ => {}
        }
    }

    /// Writes the locked selection to the output directory.
    ///
    /// No-op without a locked selection. On failure the selection is
    /// kept so the user can retry or cancel.
    pub fn save_selection(&mut self) {
        let Some(rect) = self.selection.locked_rect() else {
            return;
        };

        let view = self.canvas.view(rect);
        match export::save_png(&view, &self.output_dir, &chrono::Local::now()) {
            Ok(path) => {
                self.saved_path = Some(path);
                self.set_status(MSG_SAVED);
                self.clear_selection();
            }
            Err(e) => {
                log::error!("Save failed: {}", e);
                self.set_status(e.to_string());
            }
        }
    }

    pub fn cancel_selection(&mut self) {
        self.clear_selection();
        self.set_status(MSG_CANCELLED);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.pressed_button = None;
        self.dirty = true;
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.hud_message = message.into();
        self.dirty = true;
    }

    /// Flips between one display and all displays, recapturing the canvas.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            Mode::Single => Mode::All,
            Mode::All => Mode::Single,
        };
        self.clear_selection();
        self.saved_path = None;

        let raster = match self.mode {
            Mode::All => capture_all(&*self.source),
            Mode::Single => capture_display(&*self.source, self.display_index),
        };
        self.replace_canvas(raster);
        self.title = window_title(self.mode);

        log::info!("Switched to {} mode", self.mode.title_label());
    }

    /// Recaptures display `index mod N`. Ignored in all-displays mode.
    pub fn switch_display(&mut self, index: usize) {
        if self.mode != Mode::Single {
            log::debug!("Display switch ignored in all-displays mode");
            return;
        }

        self.display_index = index % self.display_count;
        self.clear_selection();
        self.saved_path = None;
        self.set_status(MSG_DISPLAY_CHANGED);

        let raster = capture_display(&*self.source, self.display_index);
        self.replace_canvas(raster);

        log::info!(
            "Switched to display {}/{}",
            self.display_index + 1,
            self.display_count
        );
    }

    fn replace_canvas(&mut self, raster: RgbaImage) {
        self.canvas.replace(raster);
        let (w, h) = self.canvas.size();
        self.buttons = ButtonBar::layout(w, h);
        self.dirty = true;
    }
}
