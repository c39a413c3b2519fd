//! Fixed eye geometry in logical units.
//!
//! Everything is laid out in a 200 × 120 view box; the widget scales it to
//! whatever pixel rect it is given each frame.

use egui::{Pos2, Rect, Vec2};
use std::time::Duration;

/// Size of the logical coordinate space.
pub const VIEW_SIZE: Vec2 = Vec2::new(200.0, 120.0);

/// Furthest the pupil may travel from the eye center.
pub const MAX_OFFSET: f32 = 18.0;

/// Pupil radius while moving fast.
pub const PUPIL_MIN: f32 = 8.0;
/// Pupil radius at rest.
pub const PUPIL_MAX: f32 = 14.0;

/// How strongly speed constricts the pupil.
pub const SPEED_CONSTRICTION: f32 = 2.0;

/// Downward gaze bias once the pointer has gone still.
pub const IDLE_DRIFT_Y: f32 = 10.0;
/// Horizontal gaze is scaled by this while idle.
pub const IDLE_X_SCALE: f32 = 0.5;
/// How long the pointer must sit still before the eyes get bored.
pub const IDLE_AFTER: Duration = Duration::from_millis(1500);

/// Pupil radius smoothing, slower than position.
pub const PUPIL_SMOOTHING: f32 = 0.1;

/// Scale applied to the whole widget while pressed.
pub const PRESSED_SCALE: f32 = 0.94;

/// Sclera outline stroke width in logical units.
pub const SCLERA_STROKE: f32 = 3.0;

/// Which eye.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    /// Eye center in logical units.
    pub fn center(self) -> Pos2 {
        match self {
            Side::Left => Pos2::new(60.0, 60.0),
            Side::Right => Pos2::new(140.0, 60.0),
        }
    }

    /// Positional smoothing factor. The eyes deliberately lag by different
    /// amounts so they never move in lockstep.
    pub fn smoothing(self) -> f32 {
        match self {
            Side::Left => 0.16,
            Side::Right => 0.12,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// Outline shape of the eye.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScleraShape {
    Open,
    Blink,
    Squint,
}

impl ScleraShape {
    /// Pick the active shape. Squint always wins over blink.
    pub fn select(blinking: bool, pressed: bool) -> Self {
        if pressed {
            ScleraShape::Squint
        } else if blinking {
            ScleraShape::Blink
        } else {
            ScleraShape::Open
        }
    }

    /// Horizontal and vertical radii in logical units.
    pub fn radii(self) -> Vec2 {
        match self {
            ScleraShape::Open => Vec2::new(38.0, 38.0),
            ScleraShape::Blink => Vec2::new(38.0, 3.0),
            ScleraShape::Squint => Vec2::new(38.0, 16.0),
        }
    }
}

/// Mapping between logical units and a rect on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub origin: Pos2,
    pub scale: Vec2,
}

impl ViewTransform {
    /// Fit the view box into `rect`. `None` when the rect has no area.
    pub fn fit(rect: Rect) -> Option<Self> {
        let size = rect.size();
        if !(size.x > 0.0 && size.y > 0.0) {
            return None;
        }
        Some(Self {
            origin: rect.min,
            scale: size / VIEW_SIZE,
        })
    }

    pub fn to_screen(&self, p: Pos2) -> Pos2 {
        self.origin + p.to_vec2() * self.scale
    }

    /// Convert a screen-space vector to logical units.
    pub fn to_logical(&self, v: Vec2) -> Vec2 {
        v / self.scale
    }

    pub fn scale_vec(&self, v: Vec2) -> Vec2 {
        v * self.scale
    }

    /// Scale a scalar length. Uses the smaller axis so circles stay inside
    /// the box when the rect is slightly off-aspect.
    pub fn scale_len(&self, len: f32) -> f32 {
        len * self.scale.min_elem()
    }
}

/// Height of a widget `size` units wide.
pub fn height_for(size: f32) -> f32 {
    // multiply first so whole sizes stay exact
    size * VIEW_SIZE.y / VIEW_SIZE.x
}
