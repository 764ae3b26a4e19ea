//! Synthetic estimation progress.
//!
//! The gateway provides no progress callback, so a decelerating schedule
//! is advanced on a fixed tick purely for user feedback: large steps below
//! 60, small steps to 90, a creep above that, hard-capped at 98 while the
//! estimate is still pending. The value never reaches 100 before the real
//! result arrives; it snaps to 100 only when the session enters Ready.

use std::time::Duration;

/// Cadence at which [`EstimationProgress::advance`] is driven.
pub const PROGRESS_TICK: Duration = Duration::from_millis(100);

/// Cap while the estimate is still pending.
const PENDING_CAP: f64 = 98.0;

/// Monotone synthetic progress value in `[0, 100]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EstimationProgress {
    value: f64,
}

impl EstimationProgress {
    /// Starts a fresh progress run at 0.
    pub fn start() -> Self {
        Self { value: 0.0 }
    }

    /// Current value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Advances one tick along the decelerating schedule and returns the
    /// new value. Never exceeds the pending cap of 98.
    pub fn advance(&mut self) -> f64 {
        let increment = if self.value < 60.0 {
            12.0
        } else if self.value < 90.0 {
            2.0
        } else {
            0.5
        };
        self.value = (self.value + increment).min(PENDING_CAP);
        self.value
    }

    /// Snaps to 100 for the final render when the real result arrives.
    pub fn finish(&mut self) -> f64 {
        self.value = 100.0;
        self.value
    }
}
