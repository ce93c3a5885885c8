//! Drag-to-select state machine.
//!
//! `Idle` → press → `Dragging` → release → `Locked` (or back to `Idle`
//! when the rectangle is under the minimum size). A locked selection
//! waits for the controller to save or cancel it.

use crate::geometry::Rect;

/// Smallest accepted width and height, in canvas pixels.
pub const MIN_SELECTION: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    Dragging,
    Locked,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Selection too small ({width}x{height}). Try again.")]
pub struct SelectionTooSmall {
    pub width: i32,
    pub height: i32,
}

/// Drag anchor, live pointer and, once locked, the normalized rectangle.
/// All coordinates are canvas-local.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    state: SelectionState,
    start: (i32, i32),
    cur: (i32, i32),
    rect: Rect,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state == SelectionState::Dragging
    }

    pub fn is_locked(&self) -> bool {
        self.state == SelectionState::Locked
    }

    pub fn start(&self) -> (i32, i32) {
        self.start
    }

    pub fn cursor(&self) -> (i32, i32) {
        self.cur
    }

    /// Starts a drag at `(x, y)`. Ignored unless idle.
    pub fn begin(&mut self, x: i32, y: i32) {
        if self.state != SelectionState::Idle {
            return;
        }
        self.state = SelectionState::Dragging;
        self.start = (x, y);
        self.cur = (x, y);
        self.rect = Rect::default();
    }

    /// Follows the pointer while dragging.
    pub fn drag_to(&mut self, x: i32, y: i32) {
        if self.is_dragging() {
            self.cur = (x, y);
        }
    }

    /// Ends the drag at `(x, y)`.
    ///
    /// Locks and returns the normalized rectangle when it is at least
    /// `MIN_SELECTION` on both axes; otherwise the selection is cleared.
    pub fn release(&mut self, x: i32, y: i32) -> Result<Rect, SelectionTooSmall> {
        self.cur = (x, y);
        let rect = Rect::normalize(self.start.0, self.start.1, x, y);

        if rect.width() < MIN_SELECTION || rect.height() < MIN_SELECTION {
            self.clear();
            return Err(SelectionTooSmall {
                width: rect.width(),
                height: rect.height(),
            });
        }

        self.rect = rect;
        self.state = SelectionState::Locked;
        Ok(rect)
    }

    /// Rectangle to highlight: the live drag or the locked selection.
    pub fn current_rect(&self) -> Option<Rect> {
        match self.state {
            SelectionState::Idle => None,
            SelectionState::Dragging => Some(Rect::normalize(
                self.start.0,
                self.start.1,
                self.cur.0,
                self.cur.1,
            )),
            SelectionState::Locked => Some(self.rect),
        }
    }

    pub fn locked_rect(&self) -> Option<Rect> {
        self.is_locked().then_some(self.rect)
    }

    /// Locks `rect` directly, bypassing the drag.
    #[cfg(test)]
    pub(crate) fn lock(&mut self, rect: Rect) {
        self.start = (rect.x0, rect.y0);
        self.cur = (rect.x1, rect.y1);
        self.rect = rect;
        self.state = SelectionState::Locked;
    }

    /// Back to `Idle` with every coordinate zeroed.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Clamps a pointer position into `[x0, x1] × [y0, y1]`.
///
/// The far edge is inclusive so a drag to the border selects the last
/// row and column.
pub fn clamp_to(bounds: &Rect, x: i32, y: i32) -> (i32, i32) {
    (x.clamp(bounds.x0, bounds.x1), y.clamp(bounds.y0, bounds.y1))
}
