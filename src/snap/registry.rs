//! Range Registry: the discoverable set of scroll intervals published by mounted sections.
//!
//! Sections register through a registry handle passed to them at mount time, so several
//! independent registries (one per page, or one per test) can coexist.

use crate::{
    config::ScrollConfig,
    foundation::core::{NormalizedRange, ScrollInterval},
    snap::policy::SnapPolicy,
};

/// Role of a registered interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeKind {
    /// Pinned interval; takes part in snapping.
    Pinned,
    /// Reveal interval of a flow section; never snaps.
    Reveal,
}

/// Handle returned by [`RangeRegistry::register`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct RangeToken(u64);

#[derive(Clone, Debug)]
struct Registered {
    token: RangeToken,
    interval: ScrollInterval,
    kind: RangeKind,
    snaps: bool,
}

/// Registry of live intervals in registration order.
#[derive(Debug, Default)]
pub struct RangeRegistry {
    next: u64,
    entries: Vec<Registered>,
}

impl RangeRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish an interval.
    pub fn register(&mut self, interval: ScrollInterval, kind: RangeKind) -> RangeToken {
        let token = RangeToken(self.next);
        self.next += 1;
        if kind == RangeKind::Pinned && interval.is_empty() {
            tracing::warn!(
                start = interval.start,
                "zero-length pinned interval registered; it will not snap"
            );
        }
        tracing::debug!(?token, ?kind, start = interval.start, end = interval.end, "register range");
        self.entries.push(Registered {
            token,
            interval,
            kind,
            snaps: kind == RangeKind::Pinned,
        });
        token
    }

    /// Withdraw an interval. Returns `false` when the token is unknown or already withdrawn.
    pub fn unregister(&mut self, token: RangeToken) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.token != token);
        let removed = self.entries.len() != before;
        tracing::debug!(?token, removed, "unregister range");
        removed
    }

    /// Keep `token` registered but drop it from every future snapshot.
    pub fn exclude_from_snapping(&mut self, token: RangeToken) -> bool {
        match self.entries.iter_mut().find(|e| e.token == token) {
            Some(e) => {
                e.snaps = false;
                true
            }
            None => false,
        }
    }

    /// Interval published under `token`.
    pub fn get(&self, token: RangeToken) -> Option<ScrollInterval> {
        self.entries
            .iter()
            .find(|e| e.token == token)
            .map(|e| e.interval)
    }

    /// Number of live registrations of any kind.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of live pinned registrations.
    pub fn pinned_len(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.kind == RangeKind::Pinned)
            .count()
    }

    /// Snap-eligible pinned intervals normalized by `max_scroll`, sorted by start.
    ///
    /// Equal starts keep registration order. Zero-length intervals are skipped. Empty when
    /// `max_scroll` is not positive.
    pub fn snapshot(&self, max_scroll: f64) -> Vec<NormalizedRange> {
        let mut intervals: Vec<ScrollInterval> = self
            .entries
            .iter()
            .filter(|e| e.kind == RangeKind::Pinned && e.snaps && !e.interval.is_empty())
            .map(|e| e.interval)
            .collect();
        intervals.sort_by(|a, b| a.start.total_cmp(&b.start));
        intervals
            .into_iter()
            .filter_map(|i| NormalizedRange::from_interval(i, max_scroll))
            .collect()
    }

    /// Aggregate the snapshot into a snap policy.
    ///
    /// `None` when the page cannot scroll or no pinned range exists; the page then stays in
    /// free scroll.
    #[tracing::instrument(skip(self, config), fields(registered = self.entries.len()))]
    pub fn compute_ranges(&self, max_scroll: f64, config: &ScrollConfig) -> Option<SnapPolicy> {
        let ranges = self.snapshot(max_scroll);
        if ranges.is_empty() {
            tracing::debug!("no snap ranges; free scroll");
            return None;
        }
        tracing::debug!(ranges = ranges.len(), "snap ranges aggregated");
        Some(SnapPolicy::new(
            ranges,
            config.snap_buffer,
            config.snap_duration,
            config.snap_ease,
        ))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/snap/registry.rs"]
mod tests;
