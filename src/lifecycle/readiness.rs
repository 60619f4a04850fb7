//! Readiness barrier gating range aggregation.
//!
//! The barrier opens when the expected number of pinned sections has registered, when the host
//! declares that every section is mounted, or when the settling delay runs out, whichever comes
//! first. Time is supplied by the caller, so the barrier is deterministic under test.

use std::time::Duration;

/// Why the barrier opened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadyReason {
    /// The expected section count registered.
    AllRegistered,
    /// The host declared that every section is mounted.
    Declared,
    /// The settling delay elapsed first.
    TimedOut,
}

/// Barrier state observed by [`ReadinessBarrier::poll`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Readiness {
    /// Still waiting.
    Waiting,
    /// Open; aggregation may run.
    Ready(ReadyReason),
    /// Cancelled before opening; aggregation must never run.
    Cancelled,
}

/// One-shot barrier with a bounded wait.
#[derive(Clone, Debug)]
pub struct ReadinessBarrier {
    expected: Option<usize>,
    armed_at: Duration,
    timeout: Duration,
    declared: bool,
    state: Readiness,
}

impl ReadinessBarrier {
    /// Barrier armed at `now`, waiting for `expected` registrations or `timeout`.
    pub fn new(expected: Option<usize>, now: Duration, timeout: Duration) -> Self {
        Self {
            expected,
            armed_at: now,
            timeout,
            declared: false,
            state: Readiness::Waiting,
        }
    }

    /// Check the barrier with `registered` pinned sections at time `now`.
    ///
    /// Once the barrier opened or was cancelled the result no longer changes.
    pub fn poll(&mut self, registered: usize, now: Duration) -> Readiness {
        if self.state != Readiness::Waiting {
            return self.state;
        }
        let reason = if self.expected.is_some_and(|n| registered >= n) {
            Some(ReadyReason::AllRegistered)
        } else if self.declared {
            Some(ReadyReason::Declared)
        } else if now.saturating_sub(self.armed_at) >= self.timeout {
            Some(ReadyReason::TimedOut)
        } else {
            None
        };
        if let Some(reason) = reason {
            tracing::debug!(?reason, registered, "readiness barrier opened");
            self.state = Readiness::Ready(reason);
        }
        self.state
    }

    /// Host signal: every section is mounted.
    pub fn declare_all(&mut self) {
        self.declared = true;
    }

    /// Cancel a pending barrier. Returns `false` (and changes nothing) once it opened.
    pub fn cancel(&mut self) -> bool {
        match self.state {
            Readiness::Waiting => {
                self.state = Readiness::Cancelled;
                true
            }
            Readiness::Ready(_) | Readiness::Cancelled => false,
        }
    }

    /// Return `true` while waiting.
    pub fn is_pending(&self) -> bool {
        self.state == Readiness::Waiting
    }

    /// Time left before the timeout at `now`.
    pub fn remaining(&self, now: Duration) -> Duration {
        self.timeout
            .saturating_sub(now.saturating_sub(self.armed_at))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lifecycle/readiness.rs"]
mod tests;
