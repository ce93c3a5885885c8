//! Save / Cancel buttons shown under a locked selection.

use crate::geometry::Rect;

pub const BUTTON_WIDTH: i32 = 120;
pub const BUTTON_HEIGHT: i32 = 32;
pub const BUTTON_PADDING: i32 = 16;
pub const BUTTON_GAP: i32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Save,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub kind: ButtonKind,
    pub rect: Rect,
    pub label: &'static str,
}

/// Both buttons, anchored to the bottom-left corner of the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonBar {
    pub save: Button,
    pub cancel: Button,
}

impl ButtonBar {
    /// Positions the buttons for a `width` × `height` canvas.
    pub fn layout(_width: u32, height: u32) -> Self {
        let h = height as i32;
        let top = h - BUTTON_PADDING - BUTTON_HEIGHT;
        let bottom = h - BUTTON_PADDING;

        let save_x = BUTTON_PADDING;
        let cancel_x = save_x + BUTTON_WIDTH + BUTTON_GAP;

        Self {
            save: Button {
                kind: ButtonKind::Save,
                rect: Rect::new(save_x, top, save_x + BUTTON_WIDTH, bottom),
                label: "Save (Enter)",
            },
            cancel: Button {
                kind: ButtonKind::Cancel,
                rect: Rect::new(cancel_x, top, cancel_x + BUTTON_WIDTH, bottom),
                label: "Cancel (Esc)",
            },
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Button> {
        [&self.save, &self.cancel].into_iter()
    }

    /// Button under `(x, y)`, if any.
    pub fn hit_test(&self, x: i32, y: i32) -> Option<ButtonKind> {
        self.iter().find(|b| b.rect.contains(x, y)).map(|b| b.kind)
    }
}
