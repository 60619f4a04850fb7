//! Tunables and page description.
//!
//! [`ScrollConfig`] carries every behavioral constant; all fields have serde defaults so a JSON
//! file only needs to name what it overrides. [`PageLayout`] describes the host page: viewport and
//! the ordered list of sections.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use crate::{
    animation::ease::Ease,
    animation::phase::{Phase, PhaseBounds, PhaseEntry, PhaseSpec},
    animation::presets::Preset,
    foundation::core::{SectionId, TargetId, Viewport, VisualState},
    foundation::error::{ScrollpinError, ScrollpinResult},
    scroll::trigger::TriggerSpec,
};

/// Closed duration range in seconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DurationRange {
    /// Lower bound in seconds.
    pub min: f64,
    /// Upper bound in seconds.
    pub max: f64,
}

impl DurationRange {
    /// Clamp `secs` into the range. Reversed bounds are reordered.
    pub fn clamp(self, secs: f64) -> f64 {
        let (lo, hi) = (self.min.min(self.max), self.min.max(self.max));
        if secs.is_nan() {
            return lo;
        }
        secs.max(lo).min(hi)
    }
}

/// What happens to a pinned section that mounts after ranges were aggregated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LateMountPolicy {
    /// The section animates but never snaps for the rest of the mount cycle.
    #[default]
    Exclude,
    /// The snap policy is rebuilt to include the late section.
    Reaggregate,
}

fn default_pin_distance_vh() -> f64 {
    1.3
}

fn default_entrance_end() -> f64 {
    0.30
}

fn default_exit_start() -> f64 {
    0.70
}

fn default_stagger_step() -> f64 {
    0.03
}

fn default_snap_buffer() -> f64 {
    0.02
}

fn default_snap_duration() -> DurationRange {
    DurationRange {
        min: 0.15,
        max: 0.35,
    }
}

fn default_snap_ease() -> Ease {
    Ease::OutCubic
}

fn default_settle_delay_ms() -> u64 {
    500
}

fn default_scrub_lag_secs() -> f64 {
    0.6
}

fn default_reveal_scrub_lag_secs() -> f64 {
    0.5
}

/// Behavioral constants of the coordinator.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollConfig {
    /// Reserved pin distance as a multiple of viewport height. `0` pins nothing: sections keep
    /// progress `0` and never snap.
    #[serde(default = "default_pin_distance_vh")]
    pub pin_distance_vh: f64,
    /// Local progress at which entrances end.
    #[serde(default = "default_entrance_end")]
    pub entrance_end: f64,
    /// Local progress at which exits may begin.
    #[serde(default = "default_exit_start")]
    pub exit_start: f64,
    /// Per-index delta of staggered tiles.
    #[serde(default = "default_stagger_step")]
    pub stagger_step: f64,
    /// Outward tolerance of snap membership, in normalized units.
    #[serde(default = "default_snap_buffer")]
    pub snap_buffer: f64,
    /// Bounds of the corrective scroll duration.
    #[serde(default = "default_snap_duration")]
    pub snap_duration: DurationRange,
    /// Curve of the corrective scroll.
    #[serde(default = "default_snap_ease")]
    pub snap_ease: Ease,
    /// Upper bound on the wait for sections to register before ranges are aggregated.
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
    /// Scrub lag of pinned timelines.
    #[serde(default = "default_scrub_lag_secs")]
    pub scrub_lag_secs: f64,
    /// Scrub lag of reveal timelines.
    #[serde(default = "default_reveal_scrub_lag_secs")]
    pub reveal_scrub_lag_secs: f64,
    /// Handling of pinned sections mounting after aggregation.
    #[serde(default)]
    pub late_mount: LateMountPolicy,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            pin_distance_vh: default_pin_distance_vh(),
            entrance_end: default_entrance_end(),
            exit_start: default_exit_start(),
            stagger_step: default_stagger_step(),
            snap_buffer: default_snap_buffer(),
            snap_duration: default_snap_duration(),
            snap_ease: default_snap_ease(),
            settle_delay_ms: default_settle_delay_ms(),
            scrub_lag_secs: default_scrub_lag_secs(),
            reveal_scrub_lag_secs: default_reveal_scrub_lag_secs(),
            late_mount: LateMountPolicy::default(),
        }
    }
}

impl ScrollConfig {
    /// Configuration with scrub smoothing disabled; visual progress equals scroll progress.
    pub fn unsmoothed() -> Self {
        Self {
            scrub_lag_secs: 0.0,
            reveal_scrub_lag_secs: 0.0,
            ..Self::default()
        }
    }

    /// Entrance/exit split of the shared progress axis.
    pub fn bounds(&self) -> PhaseBounds {
        PhaseBounds {
            entrance_end: self.entrance_end,
            exit_start: self.exit_start,
        }
    }

    /// Settling delay as a [`Duration`].
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Reject values that would make the coordinator misbehave.
    pub fn validate(&self) -> ScrollpinResult<()> {
        fn non_negative(name: &str, v: f64) -> ScrollpinResult<()> {
            if !v.is_finite() || v < 0.0 {
                return Err(ScrollpinError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
            Ok(())
        }

        non_negative("pin_distance_vh", self.pin_distance_vh)?;
        PhaseBounds::new(self.entrance_end, self.exit_start)
            .map_err(|e| ScrollpinError::validation(e.to_string()))?;
        non_negative("stagger_step", self.stagger_step)?;
        non_negative("snap_buffer", self.snap_buffer)?;
        non_negative("snap_duration.min", self.snap_duration.min)?;
        non_negative("snap_duration.max", self.snap_duration.max)?;
        if self.snap_duration.min > self.snap_duration.max {
            return Err(ScrollpinError::validation(
                "snap_duration.min must be <= snap_duration.max",
            ));
        }
        non_negative("scrub_lag_secs", self.scrub_lag_secs)?;
        non_negative("reveal_scrub_lag_secs", self.reveal_scrub_lag_secs)?;
        Ok(())
    }
}

/// Layout role of a section.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// Held in the viewport for its reserved distance while its timeline plays.
    Pinned,
    /// Scrolls normally; may carry reveal animations.
    #[default]
    Flow,
}

/// How a reveal's progress follows the scroll.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RevealPlayback {
    /// Progress tracks the interval, trailing by `lag_secs`. Unset uses
    /// [`ScrollConfig::reveal_scrub_lag_secs`]; `0` follows the scroll exactly.
    Scrub {
        /// Scrub lag in seconds.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lag_secs: Option<f64>,
    },
    /// Plays over `duration_secs` once the scroll passes the trigger start and plays back when
    /// the scroll returns above it.
    Toggle {
        /// Length of the tween in each direction.
        duration_secs: f64,
    },
}

impl Default for RevealPlayback {
    fn default() -> Self {
        Self::Scrub { lag_secs: None }
    }
}

impl RevealPlayback {
    /// Scrub lag, or toggle duration, must be finite and `>= 0`.
    pub fn validate(&self) -> ScrollpinResult<()> {
        let (name, v) = match *self {
            Self::Scrub { lag_secs: None } => return Ok(()),
            Self::Scrub { lag_secs: Some(v) } => ("lag_secs", v),
            Self::Toggle { duration_secs } => ("duration_secs", duration_secs),
        };
        if !v.is_finite() || v < 0.0 {
            return Err(ScrollpinError::validation(format!(
                "reveal {name} must be finite and >= 0"
            )));
        }
        Ok(())
    }
}

/// Scroll-linked reveal on a flow section.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RevealLayout {
    /// Animated element.
    pub target: TargetId,
    /// Interval anchors.
    pub trigger: TriggerSpec,
    /// State at the trigger start.
    pub from: VisualState,
    /// State at the trigger end.
    #[serde(default)]
    pub to: VisualState,
    /// Curve of the reveal.
    #[serde(default = "default_snap_ease")]
    pub ease: Ease,
    /// Scrubbed or toggled playback.
    #[serde(default)]
    pub playback: RevealPlayback,
}

impl RevealLayout {
    /// Single-entry timeline spanning the whole reveal interval.
    pub fn spec(&self) -> PhaseSpec {
        PhaseSpec::new().with(PhaseEntry {
            target: self.target.clone(),
            phase: Phase::Entrance,
            start: 0.0,
            end: 1.0,
            from: self.from,
            to: self.to,
            ease: self.ease,
        })
    }
}

/// One section of the page, in document order.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SectionLayout {
    /// Section id.
    pub id: SectionId,
    /// Content height in scroll units.
    pub height: f64,
    /// Layout role.
    #[serde(default)]
    pub kind: SectionKind,
    /// Timeline of a pinned section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<Preset>,
    /// Reveal animations of a flow section.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reveals: Vec<RevealLayout>,
}

/// Host page description.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PageLayout {
    /// Viewport size.
    pub viewport: Viewport,
    /// Sections in document order.
    pub sections: Vec<SectionLayout>,
    /// Overrides of the behavioral constants.
    #[serde(default)]
    pub config: ScrollConfig,
}

impl PageLayout {
    /// Parse a page layout from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ScrollpinResult<Self> {
        let layout: Self = serde_json::from_reader(r)
            .map_err(|e| ScrollpinError::serde(format!("parse page layout JSON: {e}")))?;
        layout.validate()?;
        Ok(layout)
    }

    /// Parse a page layout from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ScrollpinResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ScrollpinError::validation(format!("open page layout JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check viewport, section heights, id uniqueness and the config.
    pub fn validate(&self) -> ScrollpinResult<()> {
        Viewport::new(self.viewport.width, self.viewport.height)?;
        self.config.validate()?;
        let mut seen = std::collections::BTreeSet::new();
        for s in &self.sections {
            if !seen.insert(&s.id) {
                return Err(ScrollpinError::validation(format!(
                    "duplicate section id '{}'",
                    s.id
                )));
            }
            if !s.height.is_finite() || s.height < 0.0 {
                return Err(ScrollpinError::validation(format!(
                    "section '{}' height must be finite and >= 0",
                    s.id
                )));
            }
            for r in &s.reveals {
                r.playback.validate().map_err(|e| {
                    ScrollpinError::validation(format!("section '{}': {e}", s.id))
                })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
