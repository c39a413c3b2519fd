//! Per-frame eye physics.
//!
//! Each refresh computes a target gaze for both eyes from the pointer, eases
//! the current gaze toward it, and derives a pupil size from how fast the
//! gaze is moving.

use crate::geometry::{
    ScleraShape, Side, ViewTransform, IDLE_AFTER, IDLE_DRIFT_Y, IDLE_X_SCALE, MAX_OFFSET,
    PRESSED_SCALE, PUPIL_MAX, PUPIL_MIN, PUPIL_SMOOTHING, SPEED_CONSTRICTION, VIEW_SIZE,
};
use crate::pointer::PointerState;
use egui::{Pos2, Rect, Vec2};
use std::time::Duration;

/// What the frame loop should do after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Eyes were updated.
    Rendered,
    /// No container yet. Try again next refresh.
    NotReady,
    /// Container has no area. Wait for the host to resize or remount.
    Suspended,
    /// Torn down.
    Cancelled,
}

/// Current rendered state of one eye.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyePhysics {
    pub offset: Vec2,
    pub pupil_radius: f32,
}

impl Default for EyePhysics {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            pupil_radius: PUPIL_MAX,
        }
    }
}

impl EyePhysics {
    /// Ease toward `target` with positional factor `t`.
    pub fn step(&mut self, target: Vec2, t: f32) {
        let speed = (target - self.offset).length();
        self.offset = lerp_vec(self.offset, target, t);
        self.pupil_radius = lerp(self.pupil_radius, pupil_target(speed), PUPIL_SMOOTHING);
    }
}

/// Everything the animation step reads for one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput {
    pub now: Duration,
    /// Widget rect in screen space, `None` until laid out.
    pub container: Option<Rect>,
    pub pointer: PointerState,
    pub blinking: bool,
    pub pressed: bool,
}

/// Geometry for one eye in screen space, ready to paint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyeRender {
    pub side: Side,
    pub center: Pos2,
    pub sclera_radii: Vec2,
    pub pupil_center: Pos2,
    pub pupil_radius: f32,
    pub pupil_visible: bool,
    pub shape: ScleraShape,
}

/// Owns both eyes' physics and runs the per-frame update.
#[derive(Debug, Default)]
pub struct EyeAnimator {
    eyes: [EyePhysics; 2],
    render: Option<[EyeRender; 2]>,
}

impl EyeAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eye(&self, side: Side) -> &EyePhysics {
        &self.eyes[side.index()]
    }

    /// Geometry from the last rendered frame.
    pub fn render(&self) -> Option<&[EyeRender; 2]> {
        self.render.as_ref()
    }

    pub fn step(&mut self, input: &FrameInput) -> FrameOutcome {
        let Some(container) = input.container else {
            return FrameOutcome::NotReady;
        };
        let Some(transform) = ViewTransform::fit(container) else {
            return FrameOutcome::Suspended;
        };

        // shrink toward the center while pressed
        let shown = if input.pressed {
            transform_about_center(container, PRESSED_SCALE)
        } else {
            transform
        };
        let shape = ScleraShape::select(input.blinking, input.pressed);
        let idle = input
            .pointer
            .idle_for(input.now)
            .is_some_and(|d| d >= IDLE_AFTER);

        let mut render = [EyeRender::placeholder(Side::Left), EyeRender::placeholder(Side::Right)];
        for side in Side::BOTH {
            let target = target_offset(side, &transform, &input.pointer, idle);
            let eye = &mut self.eyes[side.index()];
            eye.step(target, side.smoothing());

            render[side.index()] = EyeRender {
                side,
                center: shown.to_screen(side.center()),
                sclera_radii: shown.scale_vec(shape.radii()),
                pupil_center: shown.to_screen(side.center() + eye.offset),
                pupil_radius: shown.scale_len(eye.pupil_radius),
                pupil_visible: !input.blinking,
                shape,
            };
        }
        self.render = Some(render);
        FrameOutcome::Rendered
    }
}

impl EyeRender {
    fn placeholder(side: Side) -> Self {
        Self {
            side,
            center: Pos2::ZERO,
            sclera_radii: Vec2::ZERO,
            pupil_center: Pos2::ZERO,
            pupil_radius: 0.0,
            pupil_visible: false,
            shape: ScleraShape::Open,
        }
    }
}

fn transform_about_center(rect: Rect, factor: f32) -> ViewTransform {
    let shrunk = Rect::from_center_size(rect.center(), rect.size() * factor);
    ViewTransform {
        origin: shrunk.min,
        scale: shrunk.size() / VIEW_SIZE,
    }
}

/// Where one eye wants to look, in logical units relative to its center.
pub fn target_offset(
    side: Side,
    transform: &ViewTransform,
    pointer: &PointerState,
    idle: bool,
) -> Vec2 {
    if !pointer.inside_viewport {
        return Vec2::ZERO;
    }
    let raw = transform.to_logical(pointer.pos - transform.to_screen(side.center()));
    let mut target = clamp_magnitude(raw, MAX_OFFSET);
    if idle {
        target.x *= IDLE_X_SCALE;
        target.y += IDLE_DRIFT_Y;
    }
    clamp_magnitude(target, MAX_OFFSET)
}

/// Pupil radius for a given gaze speed. Faster means smaller.
pub fn pupil_target(speed: f32) -> f32 {
    (PUPIL_MAX - speed * SPEED_CONSTRICTION).clamp(PUPIL_MIN, PUPIL_MAX)
}

/// Scale `v` down so its length is at most `max`. Zero stays zero.
pub fn clamp_magnitude(v: Vec2, max: f32) -> Vec2 {
    let len = v.length();
    if !len.is_finite() {
        return Vec2::ZERO;
    }
    if len <= max {
        return v;
    }
    v * (max / len)
}

/// Linear interpolation between two values
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

pub fn lerp_vec(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    Vec2::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> Rect {
        Rect::from_min_size(Pos2::ZERO, VIEW_SIZE)
    }

    fn inside(pos: Pos2, last_move: Duration) -> PointerState {
        PointerState {
            pos,
            inside_viewport: true,
            last_move: Some(last_move),
        }
    }

    fn input(now: Duration, pointer: PointerState) -> FrameInput {
        FrameInput {
            now,
            container: Some(rect()),
            pointer,
            blinking: false,
            pressed: false,
        }
    }

    #[test]
    fn test_clamp_magnitude_bounds() {
        let samples = [
            Vec2::ZERO,
            Vec2::new(1.0, 0.0),
            Vec2::new(-500.0, 3.0),
            Vec2::new(1e9, -1e9),
            Vec2::new(f32::MIN_POSITIVE, 0.0),
            Vec2::new(17.9, 0.1),
        ];
        for v in samples {
            let c = clamp_magnitude(v, MAX_OFFSET);
            assert!(c.length() <= MAX_OFFSET + 1e-4, "{v:?} -> {c:?}");
        }
        assert_eq!(clamp_magnitude(Vec2::ZERO, MAX_OFFSET), Vec2::ZERO);
        assert_eq!(clamp_magnitude(Vec2::new(3.0, 4.0), MAX_OFFSET), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_target_never_exceeds_max_over_grid() {
        let t = ViewTransform::fit(Rect::from_min_size(Pos2::new(300.0, 200.0), Vec2::new(120.0, 72.0)))
            .unwrap();
        for gx in -10..=10 {
            for gy in -10..=10 {
                let pos = Pos2::new(360.0 + gx as f32 * 97.0, 236.0 + gy as f32 * 53.0);
                for idle in [false, true] {
                    for side in Side::BOTH {
                        let target = target_offset(side, &t, &inside(pos, Duration::ZERO), idle);
                        assert!(target.length() <= MAX_OFFSET + 1e-4);
                    }
                }
            }
        }
    }

    #[test]
    fn test_outside_viewport_targets_center() {
        let t = ViewTransform::fit(rect()).unwrap();
        let pointer = PointerState {
            pos: Pos2::new(500.0, 500.0),
            inside_viewport: false,
            last_move: Some(Duration::ZERO),
        };
        assert_eq!(target_offset(Side::Left, &t, &pointer, false), Vec2::ZERO);
    }

    #[test]
    fn test_raw_vector_uses_inverse_scale() {
        // 2x scale: a 10px move is 5 logical units
        let t = ViewTransform::fit(Rect::from_min_size(Pos2::ZERO, VIEW_SIZE * 2.0)).unwrap();
        let eye = t.to_screen(Side::Right.center());
        let pointer = inside(eye + Vec2::new(10.0, 0.0), Duration::ZERO);
        assert_eq!(target_offset(Side::Right, &t, &pointer, false), Vec2::new(5.0, 0.0));
    }

    #[test]
    fn test_idle_biases_down() {
        let t = ViewTransform::fit(rect()).unwrap();
        let eye = t.to_screen(Side::Left.center());
        let pointer = inside(eye + Vec2::new(4.0, -12.0), Duration::ZERO);
        let awake = target_offset(Side::Left, &t, &pointer, false);
        let bored = target_offset(Side::Left, &t, &pointer, true);
        assert_eq!(bored.y, awake.y + IDLE_DRIFT_Y);
        assert_eq!(bored.x, awake.x * IDLE_X_SCALE);
    }

    #[test]
    fn test_idle_biases_right_eye_down() {
        let t = ViewTransform::fit(rect()).unwrap();
        let eye = t.to_screen(Side::Right.center());
        let pointer = inside(eye + Vec2::new(-6.0, -8.0), Duration::ZERO);
        let awake = target_offset(Side::Right, &t, &pointer, false);
        let bored = target_offset(Side::Right, &t, &pointer, true);
        assert_eq!(awake, Vec2::new(-6.0, -8.0));
        assert_eq!(bored, Vec2::new(-3.0, 2.0));
    }

    #[test]
    fn test_idle_below_eye_stays_at_max() {
        // already looking straight down at the limit, the bias has no room
        let t = ViewTransform::fit(rect()).unwrap();
        let eye = t.to_screen(Side::Left.center());
        let pointer = inside(eye + Vec2::new(0.0, 100.0), Duration::ZERO);
        let awake = target_offset(Side::Left, &t, &pointer, false);
        let bored = target_offset(Side::Left, &t, &pointer, true);
        assert_eq!(awake, Vec2::new(0.0, MAX_OFFSET));
        assert_eq!(bored, Vec2::new(0.0, MAX_OFFSET));
    }

    #[test]
    fn test_idle_kicks_in_after_threshold() {
        let mut anim = EyeAnimator::new();
        let eye_pos = Side::Left.center();
        let pointer = inside(eye_pos, Duration::ZERO);
        anim.step(&input(Duration::from_millis(1499), pointer));
        assert_eq!(anim.eye(Side::Left).offset, Vec2::ZERO);
        anim.step(&input(Duration::from_millis(1500), pointer));
        assert!(anim.eye(Side::Left).offset.y > 0.0);
    }

    #[test]
    fn test_smoothing_strictly_between() {
        let mut eye = EyePhysics::default();
        let target = Vec2::new(10.0, -6.0);
        let mut prev = eye.offset;
        for _ in 0..20 {
            eye.step(target, Side::Right.smoothing());
            let next = eye.offset;
            assert!(next.x > prev.x && next.x < target.x);
            assert!(next.y < prev.y && next.y > target.y);
            prev = next;
        }

        let mut still = EyePhysics {
            offset: target,
            pupil_radius: PUPIL_MAX,
        };
        still.step(target, Side::Left.smoothing());
        assert_eq!(still.offset, target);
    }

    #[test]
    fn test_pupil_target_bounds() {
        assert_eq!(pupil_target(0.0), PUPIL_MAX);
        assert_eq!(pupil_target(1e6), PUPIL_MIN);
        assert_eq!(pupil_target(1.0), PUPIL_MAX - 2.0);
        for i in 0..1000 {
            let r = pupil_target(i as f32 * 0.05);
            assert!((PUPIL_MIN..=PUPIL_MAX).contains(&r));
        }
    }

    #[test]
    fn test_pupil_dilates_back_when_still() {
        let mut eye = EyePhysics {
            offset: Vec2::new(-MAX_OFFSET, 0.0),
            pupil_radius: PUPIL_MIN,
        };
        for _ in 0..400 {
            eye.step(Vec2::ZERO, Side::Left.smoothing());
            assert!((PUPIL_MIN..=PUPIL_MAX).contains(&eye.pupil_radius));
        }
        assert!((eye.pupil_radius - PUPIL_MAX).abs() < 1e-3);
    }

    #[test]
    fn test_speed_uses_pre_update_offset() {
        let mut eye = EyePhysics::default();
        eye.step(Vec2::new(MAX_OFFSET, 0.0), 0.16);
        // speed 18 -> target radius clamps to PUPIL_MIN
        let expected = lerp(PUPIL_MAX, PUPIL_MIN, PUPIL_SMOOTHING);
        assert!((eye.pupil_radius - expected).abs() < 1e-5);
    }

    #[test]
    fn test_missing_container_not_ready() {
        let mut anim = EyeAnimator::new();
        let mut frame = input(Duration::ZERO, PointerState::default());
        frame.container = None;
        assert_eq!(anim.step(&frame), FrameOutcome::NotReady);
        assert!(anim.render().is_none());
    }

    #[test]
    fn test_zero_container_suspends() {
        let mut anim = EyeAnimator::new();
        let mut frame = input(Duration::ZERO, PointerState::default());
        frame.container = Some(Rect::from_min_size(Pos2::new(5.0, 5.0), Vec2::ZERO));
        assert_eq!(anim.step(&frame), FrameOutcome::Suspended);
    }

    #[test]
    fn test_never_moved_stays_centered() {
        let mut anim = EyeAnimator::new();
        for i in 0..100 {
            anim.step(&input(Duration::from_millis(i * 16), PointerState::default()));
        }
        for side in Side::BOTH {
            assert_eq!(anim.eye(side).offset, Vec2::ZERO);
            assert_eq!(anim.eye(side).pupil_radius, PUPIL_MAX);
        }
    }

    #[test]
    fn test_asymmetric_smoothing() {
        let mut anim = EyeAnimator::new();
        // far to the right so both eyes clamp to the same target
        let pointer = inside(Pos2::new(10_000.0, 60.0), Duration::ZERO);
        anim.step(&input(Duration::from_millis(16), pointer));
        let left = anim.eye(Side::Left).offset.x;
        let right = anim.eye(Side::Right).offset.x;
        assert!(left > right);
    }

    #[test]
    fn test_render_tracks_blink_and_press() {
        let mut anim = EyeAnimator::new();
        let mut frame = input(Duration::ZERO, PointerState::default());
        frame.blinking = true;
        anim.step(&frame);
        let eyes = anim.render().unwrap();
        assert!(eyes.iter().all(|e| !e.pupil_visible && e.shape == ScleraShape::Blink));

        frame.pressed = true;
        anim.step(&frame);
        let eyes = anim.render().unwrap();
        assert!(eyes.iter().all(|e| e.shape == ScleraShape::Squint));
        // pressed shrinks the eyes toward the widget center
        let left = eyes[0].center;
        assert!(left.x > Side::Left.center().x);
        let expected = ScleraShape::Squint.radii() * PRESSED_SCALE;
        assert!((eyes[0].sclera_radii - expected).length() < 1e-3);
    }

    #[test]
    fn test_scale_recomputed_each_frame() {
        let mut anim = EyeAnimator::new();
        let mut frame = input(Duration::ZERO, PointerState::default());
        anim.step(&frame);
        assert_eq!(anim.render().unwrap()[1].center, Pos2::new(140.0, 60.0));
        frame.container = Some(Rect::from_min_size(Pos2::ZERO, VIEW_SIZE * 0.5));
        anim.step(&frame);
        assert_eq!(anim.render().unwrap()[1].center, Pos2::new(70.0, 30.0));
    }
}
