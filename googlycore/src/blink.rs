//! Blink scheduling.
//!
//! Two states, two one-shot timers. The close timer fires after a random
//! delay and the open timer fires a fixed time later. Each deadline is
//! chained from the previous *scheduled* instant rather than from the frame
//! that noticed it, so a blink lasts exactly [`BLINK_CLOSED_FOR`] of
//! simulated time no matter how coarse the frames are.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;
use std::time::Duration;

/// Delay from mount to the first possible blink.
pub const BLINK_STARTUP: Duration = Duration::from_millis(3000);

/// How long the eyes stay shut.
pub const BLINK_CLOSED_FOR: Duration = Duration::from_millis(180);

/// Random gap between opening and the next closing, in milliseconds.
pub const BLINK_INTERVAL_MS: Range<u64> = 2000..6000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkPhase {
    Open,
    Closed,
}

/// A transition reported by [`BlinkScheduler::tick`]. `at` is the
/// scheduled instant, which may be slightly before the tick's `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkEvent {
    Closed { at: Duration },
    Opened { at: Duration },
    /// A closing came due while pressed and was dropped.
    Skipped { at: Duration },
}

/// One-shot deadline that can be disarmed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timer {
    deadline: Option<Duration>,
}

impl Timer {
    pub fn arm(&mut self, at: Duration) {
        self.deadline = Some(at);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// If due at `now`, disarm and return the deadline.
    pub fn fire(&mut self, now: Duration) -> Option<Duration> {
        match self.deadline {
            Some(at) if at <= now => {
                self.deadline = None;
                Some(at)
            }
            _ => None,
        }
    }
}

pub struct BlinkScheduler<R = StdRng> {
    phase: BlinkPhase,
    close_timer: Timer,
    open_timer: Timer,
    rng: R,
}

impl BlinkScheduler<StdRng> {
    pub fn new(mounted_at: Duration) -> Self {
        Self::with_rng(mounted_at, StdRng::from_entropy())
    }
}

impl<R: Rng> BlinkScheduler<R> {
    /// Start open with the first closing armed after [`BLINK_STARTUP`].
    pub fn with_rng(mounted_at: Duration, rng: R) -> Self {
        let mut close_timer = Timer::default();
        close_timer.arm(mounted_at + BLINK_STARTUP);
        Self {
            phase: BlinkPhase::Open,
            close_timer,
            open_timer: Timer::default(),
            rng,
        }
    }

    pub fn phase(&self) -> BlinkPhase {
        self.phase
    }

    pub fn is_blinking(&self) -> bool {
        self.phase == BlinkPhase::Closed
    }

    /// When the next closing is due, if one is armed.
    pub fn next_close(&self) -> Option<Duration> {
        self.close_timer.deadline()
    }

    /// When the eyes reopen, if currently closed.
    pub fn next_open(&self) -> Option<Duration> {
        self.open_timer.deadline()
    }

    /// Both timers disarmed by [`cancel`](Self::cancel).
    pub fn is_cancelled(&self) -> bool {
        !self.close_timer.is_armed() && !self.open_timer.is_armed()
    }

    fn random_gap(&mut self) -> Duration {
        Duration::from_millis(self.rng.gen_range(BLINK_INTERVAL_MS))
    }

    /// Run every transition due at or before `now`.
    ///
    /// `pressed` is the press state at this tick. A closing that comes due
    /// while pressed is skipped and the next one is drawn fresh from the
    /// skipped deadline.
    pub fn tick(&mut self, now: Duration, pressed: bool) -> Vec<BlinkEvent> {
        let mut events = Vec::new();
        loop {
            match self.phase {
                BlinkPhase::Open => {
                    let Some(at) = self.close_timer.fire(now) else { break };
                    let gap = self.random_gap();
                    if pressed {
                        self.close_timer.arm(at + gap);
                        tracing::trace!(?at, ?gap, "blink skipped while pressed");
                        events.push(BlinkEvent::Skipped { at });
                    } else {
                        self.phase = BlinkPhase::Closed;
                        self.open_timer.arm(at + BLINK_CLOSED_FOR);
                        tracing::trace!(?at, "blink closed");
                        events.push(BlinkEvent::Closed { at });
                    }
                }
                BlinkPhase::Closed => {
                    let Some(at) = self.open_timer.fire(now) else { break };
                    self.phase = BlinkPhase::Open;
                    let gap = self.random_gap();
                    self.close_timer.arm(at + gap);
                    tracing::trace!(?at, ?gap, "blink opened");
                    events.push(BlinkEvent::Opened { at });
                }
            }
        }
        events
    }

    /// Disarm both timers and leave the eyes open. Nothing fires afterwards.
    pub fn cancel(&mut self) {
        self.close_timer.cancel();
        self.open_timer.cancel();
        self.phase = BlinkPhase::Open;
    }
}
