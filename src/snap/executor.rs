//! Corrective scroll: the effectful half of snapping.
//!
//! [`CorrectiveScroll`] is a pure tween from the rest offset to the snap target; the
//! [`SnapExecutor`] steps it with host frame time and writes offsets into a [`ScrollSink`].

use crate::{animation::ease::Ease, config::DurationRange};

/// Host scroll container.
pub trait ScrollSink {
    /// Move the container to `offset` scroll units.
    fn scroll_to(&mut self, offset: f64);
}

impl<F: FnMut(f64)> ScrollSink for F {
    fn scroll_to(&mut self, offset: f64) {
        self(offset)
    }
}

/// Sink that records every command.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordingSink {
    /// Offsets in command order.
    pub offsets: Vec<f64>,
}

impl RecordingSink {
    /// Last commanded offset.
    pub fn last(&self) -> Option<f64> {
        self.offsets.last().copied()
    }
}

impl ScrollSink for RecordingSink {
    fn scroll_to(&mut self, offset: f64) {
        self.offsets.push(offset);
    }
}

/// Eased scroll from `from` to `to` over `duration_secs`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CorrectiveScroll {
    /// Start offset in scroll units.
    pub from: f64,
    /// Target offset in scroll units.
    pub to: f64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Curve.
    pub ease: Ease,
}

impl CorrectiveScroll {
    /// Plan a correction whose duration follows [`CorrectiveScroll::duration_for`].
    pub fn plan(from: f64, to: f64, viewport_height: f64, range: DurationRange, ease: Ease) -> Self {
        Self {
            from,
            to,
            duration_secs: Self::duration_for((to - from).abs(), viewport_height, range),
            ease,
        }
    }

    /// Duration proportional to distance: one viewport height or more takes `range.max`.
    pub fn duration_for(distance: f64, viewport_height: f64, range: DurationRange) -> f64 {
        if !viewport_height.is_finite() || viewport_height <= 0.0 {
            return range.max;
        }
        range.clamp(distance.abs() / viewport_height * range.max)
    }

    /// Offset after `elapsed_secs`; lands exactly on `to` once finished.
    pub fn sample(&self, elapsed_secs: f64) -> f64 {
        if self.is_finished(elapsed_secs) {
            return self.to;
        }
        let t = (elapsed_secs / self.duration_secs).max(0.0);
        self.from + (self.to - self.from) * self.ease.apply(t)
    }

    /// Return `true` once `elapsed_secs` reaches the duration.
    pub fn is_finished(&self, elapsed_secs: f64) -> bool {
        self.duration_secs <= 0.0 || elapsed_secs >= self.duration_secs
    }
}

/// Drives at most one corrective scroll at a time.
#[derive(Clone, Debug, Default)]
pub struct SnapExecutor {
    active: Option<CorrectiveScroll>,
    elapsed: f64,
}

impl SnapExecutor {
    /// Idle executor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin `scroll`, replacing any correction in flight.
    pub fn start(&mut self, scroll: CorrectiveScroll) {
        if self.active.is_some() {
            tracing::debug!("corrective scroll replaced");
        }
        self.active = Some(scroll);
        self.elapsed = 0.0;
    }

    /// Advance by `dt_secs` and write the new offset into `sink`.
    ///
    /// Returns the written offset, or `None` when idle. The executor goes idle after writing the
    /// final offset.
    pub fn step(&mut self, dt_secs: f64, sink: &mut dyn ScrollSink) -> Option<f64> {
        let scroll = self.active?;
        if dt_secs.is_finite() && dt_secs > 0.0 {
            self.elapsed += dt_secs;
        }
        let offset = scroll.sample(self.elapsed);
        sink.scroll_to(offset);
        if scroll.is_finished(self.elapsed) {
            self.active = None;
        }
        Some(offset)
    }

    /// Abort the correction in flight. Returns `false` when idle.
    pub fn cancel(&mut self) -> bool {
        self.elapsed = 0.0;
        self.active.take().is_some()
    }

    /// Correction in flight.
    pub fn active(&self) -> Option<&CorrectiveScroll> {
        self.active.as_ref()
    }

    /// Return `true` while a correction is in flight.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/snap/executor.rs"]
mod tests;
