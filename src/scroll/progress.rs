use crate::foundation::core::ScrollInterval;

/// Where a scroll offset lies relative to an interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// `offset < start`.
    Before,
    /// `start <= offset <= end`.
    Inside,
    /// `offset > end`.
    After,
}

impl Side {
    /// Classify `offset` against `interval`.
    pub fn of(offset: f64, interval: ScrollInterval) -> Self {
        if offset < interval.start {
            Self::Before
        } else if offset > interval.end {
            Self::After
        } else {
            Self::Inside
        }
    }
}

/// Map an absolute scroll offset to local progress in `[0, 1]`.
///
/// A zero-length interval is a configuration error and maps to a constant `0.0`; so does a
/// non-finite offset.
pub fn local_progress(offset: f64, interval: ScrollInterval) -> f64 {
    let len = interval.end - interval.start;
    if !offset.is_finite() || len <= 0.0 {
        return 0.0;
    }
    ((offset - interval.start) / len).clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/progress.rs"]
mod tests;
