//! Timed intros: timelines played once over wall-clock seconds after a section mounts.
//!
//! Steps are laid out like a sequence with negative offsets: each step starts where the
//! timeline currently ends, pulled back by its `overlap_secs`. The result is stored as a
//! [`PhaseSpec`] over `[0, 1]` of the total duration so it evaluates like any scroll timeline.

use crate::{
    animation::ease::Ease,
    animation::phase::{Phase, PhaseBounds, PhaseEntry, PhaseSpec, TimelineFrame},
    foundation::core::{TargetId, VisualState},
    foundation::error::{ScrollpinError, ScrollpinResult},
};

const INTRO_BOUNDS: PhaseBounds = PhaseBounds {
    entrance_end: 1.0,
    exit_start: 1.0,
};

/// One tween of an intro.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IntroStep {
    /// Animated element.
    pub target: TargetId,
    /// State when the intro starts.
    pub from: VisualState,
    /// State when the step ends.
    #[serde(default)]
    pub to: VisualState,
    /// Length of the step.
    pub duration_secs: f64,
    /// How far the step starts before the timeline's current end.
    #[serde(default)]
    pub overlap_secs: f64,
    /// Curve of the step.
    #[serde(default)]
    pub ease: Ease,
}

impl IntroStep {
    /// Step from `from` to rest lasting `duration_secs`, eased with `OutCubic`.
    pub fn new(target: impl Into<TargetId>, from: VisualState, duration_secs: f64) -> Self {
        Self {
            target: target.into(),
            from,
            to: VisualState::REST,
            duration_secs,
            overlap_secs: 0.0,
            ease: Ease::OutCubic,
        }
    }

    /// Start `secs` before the current end of the timeline.
    pub fn overlapping(mut self, secs: f64) -> Self {
        self.overlap_secs = secs;
        self
    }
}

/// Laid-out intro timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Intro {
    spec: PhaseSpec,
    duration_secs: f64,
}

impl Intro {
    /// Lay out `steps` in order.
    pub fn sequence(steps: impl IntoIterator<Item = IntroStep>) -> ScrollpinResult<Self> {
        let mut placed = Vec::new();
        let mut end = 0.0_f64;
        for step in steps {
            let ok = |v: f64| v.is_finite() && v >= 0.0;
            if !ok(step.duration_secs) || !ok(step.overlap_secs) {
                return Err(ScrollpinError::timeline(format!(
                    "intro step for '{}' needs finite, non-negative duration and overlap",
                    step.target.as_str()
                )));
            }
            let start = (end - step.overlap_secs).max(0.0);
            end = end.max(start + step.duration_secs);
            placed.push((start, step));
        }

        let entries = placed.into_iter().map(|(start, step)| {
            let (s, e) = if end > 0.0 {
                (start / end, ((start + step.duration_secs) / end).min(1.0))
            } else {
                (0.0, 0.0)
            };
            PhaseEntry {
                target: step.target,
                phase: Phase::Entrance,
                start: s,
                end: e,
                from: step.from,
                to: step.to,
                ease: step.ease,
            }
        });
        let spec = PhaseSpec::new().with_all(entries);
        spec.validate(INTRO_BOUNDS)?;
        Ok(Self {
            spec,
            duration_secs: end,
        })
    }

    /// Total length in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    /// Timeline over `[0, 1]` of the total duration.
    pub fn spec(&self) -> &PhaseSpec {
        &self.spec
    }

    /// State of every target `elapsed_secs` after the intro started.
    pub fn sample(&self, elapsed_secs: f64) -> TimelineFrame {
        let p = if self.duration_secs > 0.0 {
            elapsed_secs / self.duration_secs
        } else {
            1.0
        };
        self.spec.evaluate(p)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/intro.rs"]
mod tests;
