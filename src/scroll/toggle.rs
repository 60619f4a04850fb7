//! Toggled playback: a fixed-duration tween started by crossing a trigger line.
//!
//! Unlike [`Scrub`](crate::scroll::scrub::Scrub), progress is driven by time, not by the scroll
//! offset. Crossing the trigger start forward plays the tween to `1`; returning above the start
//! plays it back to `0`. Scrolling further in either direction changes nothing.

/// Time-driven playback of one reveal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Toggle {
    duration_secs: f64,
    current: f64,
    target: f64,
}

impl Toggle {
    /// Playback lasting `duration_secs` in each direction; `0` (or a non-finite value) flips
    /// instantly.
    pub fn new(duration_secs: f64) -> Self {
        let duration_secs = if duration_secs.is_finite() {
            duration_secs.max(0.0)
        } else {
            0.0
        };
        Self {
            duration_secs,
            current: 0.0,
            target: 0.0,
        }
    }

    /// Configured duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    /// Play forward (`true`) or reverse (`false`). Returns `true` when the direction changed.
    pub fn set_active(&mut self, on: bool) -> bool {
        let target = if on { 1.0 } else { 0.0 };
        let changed = self.target != target;
        self.target = target;
        if self.duration_secs == 0.0 {
            self.current = target;
        }
        changed
    }

    /// Return `true` once played forward and not reversed since.
    pub fn is_active(&self) -> bool {
        self.target == 1.0
    }

    /// Advance by `dt_secs` and return the playback position in `[0, 1]`.
    pub fn advance(&mut self, dt_secs: f64) -> f64 {
        if self.duration_secs == 0.0 {
            self.current = self.target;
            return self.current;
        }
        let dt = if dt_secs.is_finite() {
            dt_secs.max(0.0)
        } else {
            0.0
        };
        let step = dt / self.duration_secs;
        self.current = if self.target > self.current {
            (self.current + step).min(self.target)
        } else {
            (self.current - step).max(self.target)
        };
        self.current
    }

    /// Force the position and direction to `value`.
    pub fn jump(&mut self, value: f64) {
        self.current = value;
        self.target = value;
    }

    /// Stop in place.
    pub fn cancel(&mut self) {
        self.target = self.current;
    }

    /// Current playback position.
    pub fn current(&self) -> f64 {
        self.current
    }

    /// True while playing in either direction.
    pub fn is_animating(&self) -> bool {
        self.current != self.target
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/toggle.rs"]
mod tests;
