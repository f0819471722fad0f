//! Pulse animation on the winning segment.

use std::f64::consts::TAU;

use crate::rotation::progress;

/// Peak overlay alpha of the pulse.
pub const PULSE_PEAK_ALPHA: f64 = 0.35;

/// A running highlight on one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightState {
    /// Index of the highlighted segment.
    pub index: usize,
    /// Timestamp (ms) the pulse started.
    pub started_at_ms: u64,
    /// Length of the pulse in milliseconds.
    pub duration_ms: u64,
}

impl HighlightState {
    /// Start a highlight on `index` at `now_ms`.
    pub fn new(index: usize, now_ms: u64, duration_ms: u64) -> Self {
        Self {
            index,
            started_at_ms: now_ms,
            duration_ms,
        }
    }

    /// Linear progress of the pulse at `now_ms`, in `[0, 1]`.
    pub fn progress(&self, now_ms: u64) -> f64 {
        progress(now_ms.saturating_sub(self.started_at_ms), self.duration_ms)
    }

    /// Whether the pulse has run its full duration.
    pub fn is_finished(&self, now_ms: u64) -> bool {
        self.progress(now_ms) >= 1.0
    }

    /// Overlay alpha at `now_ms`: one full sine period over the duration,
    /// swinging between 0 and [`PULSE_PEAK_ALPHA`].
    pub fn alpha(&self, now_ms: u64) -> f64 {
        let pulse = (self.progress(now_ms) * TAU).sin();
        PULSE_PEAK_ALPHA * (0.5 + 0.5 * pulse)
    }

    /// Whether the highlighted index still exists on a wheel of
    /// `option_count` options.
    pub fn is_valid_for(&self, option_count: usize) -> bool {
        self.index < option_count
    }
}
