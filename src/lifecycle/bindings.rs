use std::collections::BTreeMap;

/// What a binding keeps alive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingKind {
    /// Scroll subscription of one mounted section.
    SectionScroll,
    /// Pending settling timer of the readiness barrier.
    SettleTimer,
    /// The installed page-wide snap policy.
    SnapPolicy,
    /// Corrective scroll in flight.
    CorrectiveScroll,
}

/// Handle of one live binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct BindingId(u64);

/// Ledger of live bindings. Every acquired binding is released exactly once.
#[derive(Debug, Default)]
pub struct Bindings {
    next: u64,
    live: BTreeMap<BindingId, BindingKind>,
    released: u64,
}

impl Bindings {
    /// Empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new live binding.
    pub fn acquire(&mut self, kind: BindingKind) -> BindingId {
        let id = BindingId(self.next);
        self.next += 1;
        self.live.insert(id, kind);
        tracing::trace!(?id, ?kind, "binding acquired");
        id
    }

    /// Release `id`. A second release of the same id is refused and returns `false`.
    pub fn release(&mut self, id: BindingId) -> bool {
        match self.live.remove(&id) {
            Some(kind) => {
                self.released += 1;
                tracing::trace!(?id, ?kind, "binding released");
                true
            }
            None => {
                tracing::warn!(?id, "binding released twice or never acquired");
                false
            }
        }
    }

    /// Release every live binding; returns how many were released.
    pub fn release_all(&mut self) -> usize {
        let n = self.live.len();
        self.released += n as u64;
        self.live.clear();
        n
    }

    /// Return `true` while `id` is live.
    pub fn is_live(&self, id: BindingId) -> bool {
        self.live.contains_key(&id)
    }

    /// Number of live bindings.
    pub fn live(&self) -> usize {
        self.live.len()
    }

    /// Number of live bindings of `kind`.
    pub fn live_of(&self, kind: BindingKind) -> usize {
        self.live.values().filter(|k| **k == kind).count()
    }

    /// Number of releases so far.
    pub fn released(&self) -> u64 {
        self.released
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lifecycle/bindings.rs"]
mod tests;
