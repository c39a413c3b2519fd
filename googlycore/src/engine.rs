//! The eyes without a toolkit.
//!
//! `EyesEngine` wires the pointer tracker, press state, blink scheduler and
//! animator together. The egui widget feeds it events and a rect; tests feed
//! it the same things from a [`ManualClock`](crate::clock::ManualClock).

use crate::animation::{EyeAnimator, EyePhysics, EyeRender, FrameInput, FrameOutcome};
use crate::blink::{BlinkEvent, BlinkScheduler};
use crate::frame_loop::CancelToken;
use crate::geometry::{ScleraShape, Side};
use crate::interaction::PressState;
use crate::pointer::{PointerState, PointerTracker};
use egui::{Pos2, Rect};
use rand::rngs::StdRng;
use rand::Rng;
use std::time::Duration;

pub struct EyesEngine<R = StdRng> {
    pointer: PointerTracker,
    press: PressState,
    blink: BlinkScheduler<R>,
    animator: EyeAnimator,
    token: CancelToken,
    last_blink_events: Vec<BlinkEvent>,
}

impl EyesEngine<StdRng> {
    pub fn new(mounted_at: Duration) -> Self {
        Self::from_scheduler(BlinkScheduler::new(mounted_at))
    }
}

impl<R: Rng> EyesEngine<R> {
    pub fn with_rng(mounted_at: Duration, rng: R) -> Self {
        Self::from_scheduler(BlinkScheduler::with_rng(mounted_at, rng))
    }

    fn from_scheduler(blink: BlinkScheduler<R>) -> Self {
        Self {
            pointer: PointerTracker::new(),
            press: PressState::default(),
            blink,
            animator: EyeAnimator::new(),
            token: CancelToken::new(),
            last_blink_events: Vec::new(),
        }
    }

    /// Share an existing token, e.g. the one the frame loop watches.
    pub fn with_token(mut self, token: CancelToken) -> Self {
        self.token = token;
        self
    }

    pub fn token(&self) -> &CancelToken {
        &self.token
    }

    pub fn pointer_moved(&mut self, pos: Pos2, now: Duration) {
        self.pointer.on_move(pos, now);
    }

    pub fn pointer_left(&mut self) {
        self.pointer.on_leave();
    }

    pub fn press(&mut self) {
        self.press.press();
    }

    pub fn release(&mut self) {
        self.press.release();
    }

    pub fn set_pressed(&mut self, down: bool) {
        self.press.set(down);
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer.snapshot()
    }

    pub fn is_pressed(&self) -> bool {
        self.press.is_pressed()
    }

    pub fn is_blinking(&self) -> bool {
        self.blink.is_blinking()
    }

    /// Outline the eyes show right now.
    pub fn shape(&self) -> ScleraShape {
        ScleraShape::select(self.is_blinking(), self.is_pressed())
    }

    pub fn eye(&self, side: Side) -> &EyePhysics {
        self.animator.eye(side)
    }

    /// Geometry of the last rendered frame.
    pub fn eyes(&self) -> Option<&[EyeRender; 2]> {
        self.animator.render()
    }

    /// Blink transitions that happened during the last frame.
    pub fn blink_events(&self) -> &[BlinkEvent] {
        &self.last_blink_events
    }

    /// One display refresh. Blink timers advance first so the step sees
    /// this frame's blink state.
    pub fn frame(&mut self, now: Duration, container: Option<Rect>) -> FrameOutcome {
        if self.token.is_cancelled() {
            self.last_blink_events.clear();
            return FrameOutcome::Cancelled;
        }
        let pressed = self.press.is_pressed();
        self.last_blink_events = self.blink.tick(now, pressed);

        let input = FrameInput {
            now,
            container,
            pointer: self.pointer.snapshot(),
            blinking: self.blink.is_blinking(),
            pressed,
        };
        self.animator.step(&input)
    }

    /// Cancel blink timers and the frame loop. Later frames do nothing.
    pub fn teardown(&mut self) {
        if self.token.is_cancelled() && self.blink.is_cancelled() {
            return;
        }
        self.blink.cancel();
        self.token.cancel();
        tracing::debug!("googly eyes torn down");
    }

    pub fn is_torn_down(&self) -> bool {
        self.token.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::VIEW_SIZE;
    use rand::SeedableRng;

    fn engine() -> EyesEngine {
        EyesEngine::with_rng(Duration::ZERO, StdRng::seed_from_u64(7))
    }

    fn rect() -> Option<Rect> {
        Some(Rect::from_min_size(Pos2::ZERO, VIEW_SIZE))
    }

    #[test]
    fn test_frame_blinks_at_startup() {
        let mut e = engine();
        assert_eq!(e.frame(Duration::from_millis(2990), rect()), FrameOutcome::Rendered);
        assert!(!e.is_blinking());
        e.frame(Duration::from_millis(3000), rect());
        assert!(e.is_blinking());
        assert_eq!(e.blink_events(), &[BlinkEvent::Closed { at: Duration::from_millis(3000) }]);
        assert!(e.eyes().unwrap().iter().all(|eye| !eye.pupil_visible));
    }

    #[test]
    fn test_teardown_cancels() {
        let mut e = engine();
        let token = e.token().clone();
        e.teardown();
        assert!(token.is_cancelled());
        assert!(e.is_torn_down());
        assert_eq!(e.frame(Duration::from_secs(4), rect()), FrameOutcome::Cancelled);
        assert!(!e.is_blinking());
        assert!(e.eyes().is_none());
    }

    #[test]
    fn test_external_token_tears_down() {
        let token = CancelToken::new();
        let mut e = engine().with_token(token.clone());
        token.cancel();
        assert_eq!(e.frame(Duration::ZERO, rect()), FrameOutcome::Cancelled);
    }

    #[test]
    fn test_press_selects_squint() {
        let mut e = engine();
        e.press();
        assert_eq!(e.shape(), ScleraShape::Squint);
        e.release();
        assert_eq!(e.shape(), ScleraShape::Open);
    }
}
