//! Global pointer tracking.

use egui::Pos2;
use std::time::Duration;

/// Last known pointer state. Coordinates are kept after the pointer leaves
/// but are ignored downstream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    pub pos: Pos2,
    pub inside_viewport: bool,
    /// `None` until the pointer has moved at least once.
    pub last_move: Option<Duration>,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            pos: Pos2::ZERO,
            inside_viewport: false,
            last_move: None,
        }
    }
}

impl PointerState {
    /// How long the pointer has been inside and still. `None` when it is
    /// outside or has never moved.
    pub fn idle_for(&self, now: Duration) -> Option<Duration> {
        if !self.inside_viewport {
            return None;
        }
        self.last_move.map(|t| now.saturating_sub(t))
    }
}

/// Single writer for [`PointerState`]. Fed by viewport-wide move/leave
/// notifications, read once per frame via [`snapshot`](Self::snapshot).
#[derive(Debug, Default)]
pub struct PointerTracker {
    state: PointerState,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_move(&mut self, pos: Pos2, now: Duration) {
        self.state = PointerState {
            pos,
            inside_viewport: true,
            last_move: Some(now),
        };
    }

    pub fn on_leave(&mut self) {
        self.state.inside_viewport = false;
    }

    pub fn snapshot(&self) -> PointerState {
        self.state
    }
}
