use std::collections::BTreeMap;

use crate::{
    animation::ease::Ease,
    foundation::core::{TargetId, Vec2, VisualState},
    foundation::error::{ScrollpinError, ScrollpinResult},
};

// Touching entries (a.end == b.start) are legal; tolerate float noise from stagger arithmetic.
const FRACTION_EPS: f64 = 1e-9;

/// Interpolation contract for animated value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for VisualState {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            translate: <Vec2 as Lerp>::lerp(&a.translate, &b.translate, t),
            offset_px: <Vec2 as Lerp>::lerp(&a.offset_px, &b.offset_px, t),
            scale: <f64 as Lerp>::lerp(&a.scale, &b.scale, t),
            rotation_deg: <f64 as Lerp>::lerp(&a.rotation_deg, &b.rotation_deg, t),
            opacity: <f64 as Lerp>::lerp(&a.opacity, &b.opacity, t).clamp(0.0, 1.0),
        }
    }
}

/// Which authored phase an entry belongs to. Settle is the implicit gap between the two.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Element moves from off-screen into its resting state.
    Entrance,
    /// Element leaves its resting state.
    Exit,
}

/// Phase active at a given local progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivePhase {
    /// `[0, entrance_end)`.
    Entrance,
    /// `[entrance_end, exit_start)`; a no-op hold.
    Settle,
    /// `[exit_start, 1]`.
    Exit,
}

/// Shared progress-axis split between entrance, settle and exit.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PhaseBounds {
    /// Fraction at which entrances must have finished.
    pub entrance_end: f64,
    /// Fraction before which no exit may start.
    pub exit_start: f64,
}

impl Default for PhaseBounds {
    fn default() -> Self {
        Self {
            entrance_end: 0.30,
            exit_start: 0.70,
        }
    }
}

impl PhaseBounds {
    /// Create validated bounds with `0 <= entrance_end <= exit_start <= 1`.
    pub fn new(entrance_end: f64, exit_start: f64) -> ScrollpinResult<Self> {
        let ok = entrance_end.is_finite()
            && exit_start.is_finite()
            && (0.0..=1.0).contains(&entrance_end)
            && (0.0..=1.0).contains(&exit_start)
            && entrance_end <= exit_start;
        if !ok {
            return Err(ScrollpinError::timeline(
                "phase bounds must satisfy 0 <= entrance_end <= exit_start <= 1",
            ));
        }
        Ok(Self {
            entrance_end,
            exit_start,
        })
    }

    /// Classify a local progress value.
    pub fn active(self, progress: f64) -> ActivePhase {
        if progress < self.entrance_end {
            ActivePhase::Entrance
        } else if progress < self.exit_start {
            ActivePhase::Settle
        } else {
            ActivePhase::Exit
        }
    }
}

/// One keyframe transition of one target over `[start, end]` of local progress.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PhaseEntry {
    /// Animated element.
    pub target: TargetId,
    /// Phase the entry is authored for.
    pub phase: Phase,
    /// Start fraction in `[0, 1]`.
    pub start: f64,
    /// End fraction in `[start, 1]`.
    pub end: f64,
    /// State at and before `start`.
    pub from: VisualState,
    /// State at and after `end`.
    pub to: VisualState,
    /// Curve applied to the entry-local sub-fraction.
    #[serde(default)]
    pub ease: Ease,
}

impl PhaseEntry {
    /// Sample the entry, holding the nearest endpoint outside `[start, end]`.
    pub fn sample(&self, progress: f64) -> VisualState {
        if progress <= self.start {
            return if self.end <= self.start {
                self.to
            } else {
                self.from
            };
        }
        if progress >= self.end {
            return self.to;
        }
        let t = (progress - self.start) / (self.end - self.start);
        VisualState::lerp(&self.from, &self.to, self.ease.apply(t))
    }

    fn validate(&self, bounds: PhaseBounds) -> ScrollpinResult<()> {
        let in_unit = |v: f64| v.is_finite() && (0.0..=1.0).contains(&v);
        if !in_unit(self.start) || !in_unit(self.end) {
            return Err(ScrollpinError::timeline(format!(
                "entry for '{}' has fractions outside [0, 1]",
                self.target.as_str()
            )));
        }
        if self.start > self.end {
            return Err(ScrollpinError::timeline(format!(
                "entry for '{}' has start > end",
                self.target.as_str()
            )));
        }
        match self.phase {
            Phase::Entrance if self.end > bounds.entrance_end + FRACTION_EPS => {
                Err(ScrollpinError::timeline(format!(
                    "entrance for '{}' ends at {} past entrance_end {}",
                    self.target.as_str(),
                    self.end,
                    bounds.entrance_end
                )))
            }
            Phase::Exit if self.start < bounds.exit_start - FRACTION_EPS => {
                Err(ScrollpinError::timeline(format!(
                    "exit for '{}' starts at {} before exit_start {}",
                    self.target.as_str(),
                    self.start,
                    bounds.exit_start
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Declarative timeline of one section: every entry of every animated target.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PhaseSpec {
    /// Entries in authoring order.
    pub entries: Vec<PhaseEntry>,
}

impl PhaseSpec {
    /// Empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one entry.
    pub fn with(mut self, entry: PhaseEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Append several entries.
    pub fn with_all(mut self, entries: impl IntoIterator<Item = PhaseEntry>) -> Self {
        self.entries.extend(entries);
        self
    }

    /// Return `true` when no entry is authored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct targets referenced by the timeline, sorted.
    pub fn targets(&self) -> Vec<&TargetId> {
        let mut out: Vec<&TargetId> = self.entries.iter().map(|e| &e.target).collect();
        out.sort();
        out.dedup();
        out
    }

    /// Check fractions, phase placement and per-target write conflicts.
    pub fn validate(&self, bounds: PhaseBounds) -> ScrollpinResult<()> {
        for entry in &self.entries {
            entry.validate(bounds)?;
        }
        for (target, entries) in self.by_target() {
            for w in entries.windows(2) {
                if w[1].start < w[0].end - FRACTION_EPS {
                    return Err(ScrollpinError::timeline(format!(
                        "entries for '{}' overlap: [{}, {}] and [{}, {}]",
                        target.as_str(),
                        w[0].start,
                        w[0].end,
                        w[1].start,
                        w[1].end
                    )));
                }
            }
        }
        Ok(())
    }

    /// Evaluate every target at `progress`. See [`evaluate`].
    pub fn evaluate(&self, progress: f64) -> TimelineFrame {
        evaluate(self, progress)
    }

    fn by_target(&self) -> BTreeMap<&TargetId, Vec<&PhaseEntry>> {
        let mut map: BTreeMap<&TargetId, Vec<&PhaseEntry>> = BTreeMap::new();
        for entry in &self.entries {
            map.entry(&entry.target).or_default().push(entry);
        }
        for entries in map.values_mut() {
            entries.sort_by(|a, b| a.start.total_cmp(&b.start).then(a.end.total_cmp(&b.end)));
        }
        map
    }
}

/// Visual state of every target of a timeline at one progress value.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct TimelineFrame {
    /// Progress the frame was evaluated at, clamped to `[0, 1]`.
    pub progress: f64,
    /// State per target.
    pub states: BTreeMap<TargetId, VisualState>,
}

impl TimelineFrame {
    /// State of `target`, if the timeline animates it.
    pub fn get(&self, target: &str) -> Option<&VisualState> {
        self.states.get(&TargetId::new(target))
    }
}

/// Pure timeline evaluation.
///
/// Per target: before its first entry the first `from` holds, inside an entry the eased
/// interpolation applies, and between or after entries the previous `to` holds.
pub fn evaluate(spec: &PhaseSpec, progress: f64) -> TimelineFrame {
    let p = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };

    let mut states = BTreeMap::new();
    for (target, entries) in spec.by_target() {
        let idx = entries.partition_point(|e| e.start <= p);
        let state = if idx == 0 {
            entries[0].from
        } else {
            entries[idx - 1].sample(p)
        };
        states.insert(target.clone(), state);
    }

    TimelineFrame {
        progress: p,
        states,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/phase.rs"]
mod tests;
