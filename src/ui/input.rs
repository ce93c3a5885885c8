//! Per-frame input snapshot handed from the host to the controller.

/// Keys the controller reacts to. Only the just-pressed edge matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    /// `A`: toggle between one display and all displays.
    ToggleAll,
    /// `Q`: previous display.
    PrevDisplay,
    /// `E`: next display.
    NextDisplay,
}

const KEY_COUNT: usize = 5;

impl Key {
    fn slot(self) -> usize {
        self as usize
    }
}

/// Pointer position in canvas pixels plus left-button edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerInput {
    pub x: i32,
    pub y: i32,
    /// Went down this frame.
    pub pressed: bool,
    /// Is down this frame (includes the press frame).
    pub held: bool,
    /// Went up this frame.
    pub released: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub pointer: PointerInput,
    keys: [bool; KEY_COUNT],
}

impl FrameInput {
    /// Pointer resting at `(x, y)` with the button up.
    pub fn idle_at(x: i32, y: i32) -> Self {
        Self {
            pointer: PointerInput {
                x,
                y,
                ..PointerInput::default()
            },
            ..Self::default()
        }
    }

    pub fn press_at(x: i32, y: i32) -> Self {
        let mut input = Self::idle_at(x, y);
        input.pointer.pressed = true;
        input.pointer.held = true;
        input
    }

    pub fn hold_at(x: i32, y: i32) -> Self {
        let mut input = Self::idle_at(x, y);
        input.pointer.held = true;
        input
    }

    pub fn release_at(x: i32, y: i32) -> Self {
        let mut input = Self::idle_at(x, y);
        input.pointer.released = true;
        input
    }

    pub fn with_key(mut self, key: Key) -> Self {
        self.keys[key.slot()] = true;
        self
    }

    pub fn just_pressed(&self, key: Key) -> bool {
        self.keys[key.slot()]
    }
}

/// Derives press/release edges from a level-triggered button.
#[derive(Debug, Default)]
pub struct ButtonEdges {
    was_down: bool,
}

impl ButtonEdges {
    pub fn sample(&mut self, x: i32, y: i32, down: bool) -> PointerInput {
        let pointer = PointerInput {
            x,
            y,
            pressed: down && !self.was_down,
            held: down,
            released: !down && self.was_down,
        };
        self.was_down = down;
        pointer
    }
}
