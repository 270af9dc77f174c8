//! Scheduling primitives for a single-threaded simulation.
//!
//! The host calls `update(dt_ms)` once per animation frame. Games turn that
//! elapsed time into discrete steps with these primitives:
//!
//! - `FixedStep`: recurring fixed-period cadence (Snake movement, 60 Hz physics)
//! - `Delay`: one-shot timer (opponent "thinking", Match-3 swap revert)
//! - `RunState`: lifecycle gate; a game that is not `Running` does not tick
//!
//! Pausing is just not advancing; cancellation is dropping or `cancel()`ing
//! the timer, so a stopped game never mutates state again.

use serde::{Deserialize, Serialize};

/// Duration of one animation frame at 60 Hz, in milliseconds.
pub const FRAME_MS: f64 = 1000.0 / 60.0;

/// Default upper bound on steps produced by a single `advance` call. Time
/// beyond the cap is discarded.
pub const MAX_STEPS_PER_UPDATE: u32 = 240;

/// Fixed-period step accumulator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FixedStep {
    period_ms: f64,
    accumulated_ms: f64,
    max_steps: u32,
}

impl FixedStep {
    /// Create a cadence with the given period.
    ///
    /// # Panics
    ///
    /// Panics if the period is not positive.
    #[must_use]
    pub fn new(period_ms: f64) -> Self {
        assert!(period_ms > 0.0, "Step period must be positive");
        Self {
            period_ms,
            accumulated_ms: 0.0,
            max_steps: MAX_STEPS_PER_UPDATE,
        }
    }

    /// Limit how many steps one `advance` may produce after a stall.
    #[must_use]
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    /// Cadence of one step per animation frame.
    #[must_use]
    pub fn per_frame() -> Self {
        Self::new(FRAME_MS)
    }

    #[must_use]
    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }

    /// Change the period, keeping accumulated time.
    pub fn set_period(&mut self, period_ms: f64) {
        if period_ms > 0.0 {
            self.period_ms = period_ms;
        }
    }

    /// Add elapsed time and return how many whole steps are due.
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        if dt_ms.is_nan() || dt_ms <= 0.0 {
            return 0;
        }
        self.accumulated_ms += dt_ms;
        let mut steps = 0;
        while self.accumulated_ms >= self.period_ms && steps < self.max_steps {
            self.accumulated_ms -= self.period_ms;
            steps += 1;
        }
        if steps == self.max_steps {
            self.accumulated_ms = 0.0;
        }
        steps
    }

    /// Drop any partially accumulated time.
    pub fn reset(&mut self) {
        self.accumulated_ms = 0.0;
    }
}

/// One-shot timer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Delay {
    remaining_ms: Option<f64>,
}

impl Delay {
    /// An idle timer.
    #[must_use]
    pub const fn idle() -> Self {
        Self { remaining_ms: None }
    }

    /// Arm (or re-arm) the timer.
    pub fn arm(&mut self, ms: f64) {
        self.remaining_ms = Some(ms.max(0.0));
    }

    /// Disarm without firing.
    pub fn cancel(&mut self) {
        self.remaining_ms = None;
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.remaining_ms.is_some()
    }

    /// Advance the timer. Returns true exactly once, when it expires.
    pub fn tick(&mut self, dt_ms: f64) -> bool {
        match self.remaining_ms {
            Some(remaining) => {
                let left = remaining - dt_ms.max(0.0);
                if left <= 0.0 {
                    self.remaining_ms = None;
                    true
                } else {
                    self.remaining_ms = Some(left);
                    false
                }
            }
            None => false,
        }
    }
}

/// Lifecycle of a mounted game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunState {
    /// Created or reset; waiting for start.
    #[default]
    Ready,
    /// Ticking and accepting input.
    Running,
    /// Suspended; neither ticks nor accepts gameplay input.
    Paused,
    /// Terminal. Only reset leaves this state.
    Over,
}

impl RunState {
    #[must_use]
    pub fn is_running(self) -> bool {
        self == RunState::Running
    }

    #[must_use]
    pub fn is_over(self) -> bool {
        self == RunState::Over
    }

    /// Transition for the start button. `Over` restarts are handled by the game.
    #[must_use]
    pub fn started(self) -> Self {
        match self {
            RunState::Ready | RunState::Paused => RunState::Running,
            other => other,
        }
    }

    /// Transition for the pause button.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            RunState::Running => RunState::Paused,
            RunState::Paused => RunState::Running,
            other => other,
        }
    }
}
