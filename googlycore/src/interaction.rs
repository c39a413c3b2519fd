//! Press / release handling.

/// Press state of the widget. Touch and mouse both land here.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PressState {
    pressed: bool,
}

impl PressState {
    /// Pointer-down or touch-start on the widget.
    pub fn press(&mut self) {
        self.pressed = true;
    }

    /// Pointer-up, touch-end, or the pointer leaving the widget.
    pub fn release(&mut self) {
        self.pressed = false;
    }

    /// Sync with the latest observed button state.
    pub fn set(&mut self, down: bool) {
        if down {
            self.press();
        } else {
            self.release();
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}
