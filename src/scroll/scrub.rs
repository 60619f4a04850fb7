//! Scrub smoothing: visual progress trails the raw scroll progress.
//!
//! The visual value approaches its target exponentially with time constant `lag / 4`, so after
//! `lag` seconds less than 2% of the gap remains. Once the gap is below [`SETTLE_EPS`] the value
//! lands exactly on the target, which keeps rest states (progress `0` / `1`) exact.

/// Gap under which the smoothed value snaps onto its target.
pub const SETTLE_EPS: f64 = 1e-4;

/// Progress smoother for one timeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scrub {
    lag_secs: f64,
    current: f64,
    target: f64,
}

impl Scrub {
    /// Smoother trailing by roughly `lag_secs`; `0` (or a non-finite value) disables smoothing.
    pub fn new(lag_secs: f64) -> Self {
        let lag_secs = if lag_secs.is_finite() {
            lag_secs.max(0.0)
        } else {
            0.0
        };
        Self {
            lag_secs,
            current: 0.0,
            target: 0.0,
        }
    }

    /// Smoother that always reports its target.
    pub fn immediate() -> Self {
        Self::new(0.0)
    }

    /// Configured lag in seconds.
    pub fn lag_secs(&self) -> f64 {
        self.lag_secs
    }

    /// Update the value to chase.
    pub fn set_target(&mut self, target: f64) {
        self.target = target;
        if self.lag_secs == 0.0 {
            self.current = target;
        }
    }

    /// Advance by `dt_secs` and return the smoothed value.
    pub fn advance(&mut self, dt_secs: f64) -> f64 {
        if self.lag_secs == 0.0 {
            self.current = self.target;
            return self.current;
        }
        let dt = if dt_secs.is_finite() {
            dt_secs.max(0.0)
        } else {
            0.0
        };
        let tau = self.lag_secs / 4.0;
        let k = 1.0 - (-dt / tau).exp();
        self.current += (self.target - self.current) * k;
        if (self.target - self.current).abs() < SETTLE_EPS {
            self.current = self.target;
        }
        self.current
    }

    /// Force both the smoothed value and the target to `value`.
    pub fn jump(&mut self, value: f64) {
        self.current = value;
        self.target = value;
    }

    /// Drop any in-flight catch-up; the value stays where it is.
    pub fn cancel(&mut self) {
        self.target = self.current;
    }

    /// Current smoothed value.
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Value being chased.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// True while the smoothed value has not reached its target.
    pub fn is_animating(&self) -> bool {
        self.current != self.target
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/scrub.rs"]
mod tests;
