//! Per-refresh scheduling for the eyes.
//!
//! egui only runs a frame when something asks for one. The eyes need a
//! frame on every display refresh while they are alive, so `FrameLoop`
//! sits between the widget and egui's repaint scheduler and decides,
//! frame by frame, whether to ask for the next one:
//!
//! 1. **Rendered / NotReady**: ask again after the frame interval.
//! 2. **Suspended**: the widget has no area. Do *not* ask; egui wakes us
//!    on the next input or resize event.
//! 3. **Cancelled**: torn down. Never ask again.
//!
//! Teardown goes through a [`CancelToken`] shared with whoever owns the
//! widget, so stopping the loop does not require access to the loop itself.

use crate::animation::FrameOutcome;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Roughly one 60 Hz display refresh.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Shared "stop" flag. Clones observe the same cancellation.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Drives one repaint per refresh until cancelled.
///
/// Call [`begin_frame`](Self::begin_frame) before stepping the eyes and
/// [`end_frame`](Self::end_frame) with the step's outcome.
pub struct FrameLoop {
    interval: Duration,
    token: CancelToken,
    /// Frame counter (0 = first frame).
    frame: u64,
    last_outcome: Option<FrameOutcome>,
    /// Whether the current frame was triggered by pointer or key input.
    had_input: bool,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new(CancelToken::new())
    }
}

impl FrameLoop {
    pub fn new(token: CancelToken) -> Self {
        Self {
            interval: DEFAULT_FRAME_INTERVAL,
            token,
            frame: 0,
            last_outcome: None,
            had_input: false,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn token(&self) -> &CancelToken {
        &self.token
    }

    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Frames completed so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn last_outcome(&self) -> Option<FrameOutcome> {
        self.last_outcome
    }

    /// Whether input arrived this frame.
    pub fn woken_by_input(&self) -> bool {
        self.had_input
    }

    /// Note whether this frame carries input and report if the step should
    /// run. `false` once cancelled; the caller should skip the step entirely.
    pub fn begin_frame(&mut self, ctx: &egui::Context) -> bool {
        self.had_input = ctx.input(|i| {
            !i.events.is_empty()
                || i.pointer.any_pressed()
                || i.pointer.any_released()
                || i.pointer.is_moving()
        });
        if !self.is_running() {
            return false;
        }
        if self.had_input && self.last_outcome == Some(FrameOutcome::Suspended) {
            tracing::debug!(frame = self.frame, "input while suspended, frame loop resuming");
        }
        true
    }

    /// How long until the next frame should run, or `None` to stay asleep.
    pub fn next_wake(&self, outcome: FrameOutcome) -> Option<Duration> {
        if self.token.is_cancelled() {
            return None;
        }
        match outcome {
            FrameOutcome::Rendered | FrameOutcome::NotReady => Some(self.interval),
            FrameOutcome::Suspended | FrameOutcome::Cancelled => None,
        }
    }

    /// Record the outcome and schedule the next repaint if one is due.
    pub fn end_frame(&mut self, ctx: &egui::Context, outcome: FrameOutcome) {
        self.frame += 1;
        if outcome == FrameOutcome::Suspended && self.last_outcome != Some(outcome) {
            tracing::debug!(frame = self.frame, "eyes have no area, frame loop suspended");
        }
        self.last_outcome = Some(outcome);
        if let Some(after) = self.next_wake(outcome) {
            ctx.request_repaint_after(after);
        }
        // else: no scheduled repaint, egui sleeps until next input.
    }
}
