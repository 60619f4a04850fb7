use crate::{
    animation::ease::Ease, config::DurationRange, foundation::core::NormalizedRange,
};

/// Index of the range whose center is nearest to `value`, if `value` lies within the buffered
/// bounds of any range. Ties keep the earliest range.
pub fn nearest_range(ranges: &[NormalizedRange], buffer: f64, value: f64) -> Option<usize> {
    if !value.is_finite() || !ranges.iter().any(|r| r.contains_buffered(value, buffer)) {
        return None;
    }
    let mut best = 0;
    for (i, r) in ranges.iter().enumerate().skip(1) {
        if (r.center - value).abs() < (ranges[best].center - value).abs() {
            best = i;
        }
    }
    Some(best)
}

/// Global snap decision: the nearest pinned center when `value` is inside a buffered range,
/// otherwise `value` itself (free scroll).
pub fn snap_to(ranges: &[NormalizedRange], buffer: f64, value: f64) -> f64 {
    nearest_range(ranges, buffer, value).map_or(value, |i| ranges[i].center)
}

/// Outcome of one snap evaluation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SnapDecision {
    /// Normalized rest position the decision was made for.
    pub value: f64,
    /// Normalized position to settle at.
    pub target: f64,
    /// Index of the chosen range in the policy snapshot; `None` for free scroll.
    pub range: Option<usize>,
}

impl SnapDecision {
    /// True when the decision moves the viewport.
    pub fn is_correction(&self) -> bool {
        self.target != self.value
    }
}

/// Snap policy installed on the page: a frozen range snapshot plus corrective-scroll tuning.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SnapPolicy {
    ranges: Vec<NormalizedRange>,
    buffer: f64,
    duration: DurationRange,
    ease: Ease,
}

impl SnapPolicy {
    /// Policy over `ranges` (expected sorted by start).
    pub fn new(
        ranges: Vec<NormalizedRange>,
        buffer: f64,
        duration: DurationRange,
        ease: Ease,
    ) -> Self {
        Self {
            ranges,
            buffer,
            duration,
            ease,
        }
    }

    /// Policy that never snaps.
    pub fn identity(duration: DurationRange, ease: Ease) -> Self {
        Self::new(Vec::new(), 0.0, duration, ease)
    }

    /// Ranges the policy snaps into.
    pub fn ranges(&self) -> &[NormalizedRange] {
        &self.ranges
    }

    /// Membership tolerance.
    pub fn buffer(&self) -> f64 {
        self.buffer
    }

    /// Corrective scroll duration bounds.
    pub fn duration(&self) -> DurationRange {
        self.duration
    }

    /// Corrective scroll curve.
    pub fn ease(&self) -> Ease {
        self.ease
    }

    /// True when no range exists and every input maps to itself.
    pub fn is_identity(&self) -> bool {
        self.ranges.is_empty()
    }

    /// The snap function. See [`snap_to`].
    pub fn snap_to(&self, value: f64) -> f64 {
        snap_to(&self.ranges, self.buffer, value)
    }

    /// [`SnapPolicy::snap_to`] with the chosen range reported.
    pub fn decide(&self, value: f64) -> SnapDecision {
        let range = nearest_range(&self.ranges, self.buffer, value);
        SnapDecision {
            value,
            target: range.map_or(value, |i| self.ranges[i].center),
            range,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/snap/policy.rs"]
mod tests;
