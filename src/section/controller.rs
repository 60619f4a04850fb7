//! Per-section scroll controller.
//!
//! A pinned section owns one track bound to its reserved interval; a flow section owns one
//! track per reveal. Each track publishes its interval to the page's [`RangeRegistry`] on
//! mount, maps scroll offsets to local progress, drives playback with a [`Scrub`] or a
//! [`Toggle`] and evaluates its timeline. A section may also carry a timed [`Intro`] that plays
//! once per mount.

use std::collections::BTreeMap;

use crate::{
    animation::intro::Intro,
    animation::phase::{ActivePhase, PhaseBounds, PhaseSpec, TimelineFrame},
    config::{RevealPlayback, ScrollConfig, SectionKind, SectionLayout},
    foundation::core::{ScrollInterval, SectionId, TargetId, Viewport, VisualState},
    foundation::error::{ScrollpinError, ScrollpinResult},
    scroll::progress::{Side, local_progress},
    scroll::scrub::Scrub,
    scroll::toggle::Toggle,
    scroll::trigger::TriggerSpec,
    snap::registry::{RangeKind, RangeRegistry, RangeToken},
};

const REVEAL_BOUNDS: PhaseBounds = PhaseBounds {
    entrance_end: 1.0,
    exit_start: 1.0,
};

/// Mount state of a controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerState {
    /// Never mounted.
    Unmounted,
    /// Intervals published; scroll events are processed.
    Mounted,
    /// Unmounted after a mount; scroll events are ignored until the next mount.
    Torn,
}

#[derive(Clone, Copy, Debug)]
enum Drive {
    Scrub(Scrub),
    Toggle(Toggle),
}

impl Drive {
    fn follow(&mut self, raw: f64, offset: f64, interval: ScrollInterval) {
        match self {
            Self::Scrub(s) => s.set_target(raw),
            Self::Toggle(t) => {
                if offset.is_finite() && t.set_active(offset > interval.start) {
                    tracing::trace!(forward = t.is_active(), "toggle reveal flipped");
                }
            }
        }
    }

    fn advance(&mut self, dt_secs: f64) {
        match self {
            Self::Scrub(s) => {
                s.advance(dt_secs);
            }
            Self::Toggle(t) => {
                t.advance(dt_secs);
            }
        }
    }

    fn jump(&mut self, value: f64) {
        match self {
            Self::Scrub(s) => s.jump(value),
            Self::Toggle(t) => t.jump(value),
        }
    }

    fn cancel(&mut self) {
        match self {
            Self::Scrub(s) => s.cancel(),
            Self::Toggle(t) => t.cancel(),
        }
    }

    fn current(&self) -> f64 {
        match self {
            Self::Scrub(s) => s.current(),
            Self::Toggle(t) => t.current(),
        }
    }

    fn is_animating(&self) -> bool {
        match self {
            Self::Scrub(s) => s.is_animating(),
            Self::Toggle(t) => t.is_animating(),
        }
    }
}

#[derive(Debug)]
struct Track {
    trigger: TriggerSpec,
    kind: RangeKind,
    spec: PhaseSpec,
    bounds: PhaseBounds,
    drive: Drive,
    interval: Option<ScrollInterval>,
    token: Option<RangeToken>,
    raw: f64,
    last_offset: Option<f64>,
    // Set by a leave-back reset; cleared when the scroll re-enters the interval.
    at_rest: bool,
}

impl Track {
    fn new(
        trigger: TriggerSpec,
        kind: RangeKind,
        spec: PhaseSpec,
        bounds: PhaseBounds,
        drive: Drive,
    ) -> Self {
        Self {
            trigger,
            kind,
            spec,
            bounds,
            drive,
            interval: None,
            token: None,
            raw: 0.0,
            last_offset: None,
            at_rest: false,
        }
    }

    fn reset(&mut self) {
        self.drive.jump(0.0);
        self.raw = 0.0;
        self.last_offset = None;
        self.at_rest = false;
    }

    fn evaluate(&self) -> TimelineFrame {
        if self.at_rest {
            self.spec.evaluate(self.bounds.entrance_end)
        } else {
            self.spec.evaluate(self.drive.current())
        }
    }
}

#[derive(Debug)]
struct IntroPlayback {
    intro: Intro,
    elapsed: f64,
}

impl IntroPlayback {
    fn is_playing(&self) -> bool {
        self.elapsed < self.intro.duration_secs()
    }
}

/// Output of one controller for one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SectionFrame {
    /// Section id.
    pub id: SectionId,
    /// Raw local progress of the primary track.
    pub progress: f64,
    /// Smoothed progress the timeline was evaluated at.
    pub visual_progress: f64,
    /// Position of the scroll offset relative to the primary interval.
    pub side: Side,
    /// Return `true` while the section is held in the viewport.
    pub pinned: bool,
    /// Timeline phase at `visual_progress`; pinned sections only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<ActivePhase>,
    /// Translation keeping a pinned section fixed: `offset - start` inside the interval, the
    /// whole reserved distance after it.
    pub pin_offset: f64,
    /// State of every animated element.
    pub states: BTreeMap<TargetId, VisualState>,
}

impl SectionFrame {
    /// State of `target`, if the section animates it.
    pub fn get(&self, target: &str) -> Option<&VisualState> {
        self.states.get(&TargetId::new(target))
    }
}

/// Scroll controller of one section.
#[derive(Debug)]
pub struct SectionController {
    id: SectionId,
    kind: SectionKind,
    tracks: Vec<Track>,
    intro: Option<IntroPlayback>,
    reset_on_leave_back: bool,
    state: ControllerState,
}

impl SectionController {
    /// Pinned section playing `spec` over its reserved distance.
    pub fn pinned(id: SectionId, spec: PhaseSpec, config: &ScrollConfig) -> ScrollpinResult<Self> {
        let bounds = config.bounds();
        spec.validate(bounds)?;
        Ok(Self {
            id,
            kind: SectionKind::Pinned,
            tracks: vec![Track::new(
                TriggerSpec::pinned(config.pin_distance_vh),
                RangeKind::Pinned,
                spec,
                bounds,
                Drive::Scrub(Scrub::new(config.scrub_lag_secs)),
            )],
            intro: None,
            reset_on_leave_back: false,
            state: ControllerState::Unmounted,
        })
    }

    /// Flow section with one track per `(trigger, timeline, playback)` reveal.
    pub fn flow(
        id: SectionId,
        reveals: impl IntoIterator<Item = (TriggerSpec, PhaseSpec, RevealPlayback)>,
        config: &ScrollConfig,
    ) -> ScrollpinResult<Self> {
        let mut tracks = Vec::new();
        let mut seen = std::collections::BTreeSet::new();
        for (trigger, spec, playback) in reveals {
            playback.validate()?;
            spec.validate(REVEAL_BOUNDS)?;
            for target in spec.targets() {
                if !seen.insert(target.clone()) {
                    return Err(ScrollpinError::timeline(format!(
                        "section '{id}' animates '{}' from more than one reveal",
                        target.as_str()
                    )));
                }
            }
            tracks.push(Track::new(
                trigger,
                RangeKind::Reveal,
                spec,
                REVEAL_BOUNDS,
                match playback {
                    RevealPlayback::Scrub { lag_secs } => Drive::Scrub(Scrub::new(
                        lag_secs.unwrap_or(config.reveal_scrub_lag_secs),
                    )),
                    RevealPlayback::Toggle { duration_secs } => {
                        Drive::Toggle(Toggle::new(duration_secs))
                    }
                },
            ));
        }
        Ok(Self {
            id,
            kind: SectionKind::Flow,
            tracks,
            intro: None,
            reset_on_leave_back: false,
            state: ControllerState::Unmounted,
        })
    }

    /// Build from a page layout entry.
    ///
    /// A pinned section without a preset pins with an empty timeline.
    pub fn from_layout(layout: &SectionLayout, config: &ScrollConfig) -> ScrollpinResult<Self> {
        match layout.kind {
            SectionKind::Pinned => {
                if !layout.reveals.is_empty() {
                    tracing::warn!(section = %layout.id, "reveals on a pinned section are ignored");
                }
                let Some(preset) = &layout.preset else {
                    return Self::pinned(layout.id.clone(), PhaseSpec::new(), config);
                };
                let spec = preset.build(config.bounds(), config.stagger_step)?;
                let section = Self::pinned(layout.id.clone(), spec, config)?;
                Ok(match preset.intro()? {
                    Some(intro) => section.with_intro(intro),
                    None => section,
                })
            }
            SectionKind::Flow => {
                if layout.preset.is_some() {
                    return Err(ScrollpinError::validation(format!(
                        "flow section '{}' cannot carry a pinned preset",
                        layout.id
                    )));
                }
                Self::flow(
                    layout.id.clone(),
                    layout
                        .reveals
                        .iter()
                        .map(|r| (r.trigger, r.spec(), r.playback)),
                    config,
                )
            }
        }
    }

    /// On scrolling back above the interval, drop the timeline to progress `0` and render every
    /// element at its settled state until the scroll enters the interval again.
    pub fn with_leave_back_reset(mut self, on: bool) -> Self {
        self.reset_on_leave_back = on;
        self
    }

    /// Play `intro` over wall-clock time after each mount. While it plays, its targets take
    /// their state from the intro instead of the scroll timeline.
    pub fn with_intro(mut self, intro: Intro) -> Self {
        self.intro = Some(IntroPlayback {
            intro,
            elapsed: 0.0,
        });
        self
    }

    /// Return `true` while the timed intro is running.
    pub fn is_intro_playing(&self) -> bool {
        self.is_mounted() && self.intro.as_ref().is_some_and(IntroPlayback::is_playing)
    }

    /// Section id.
    pub fn id(&self) -> &SectionId {
        &self.id
    }

    /// Layout role.
    pub fn kind(&self) -> SectionKind {
        self.kind
    }

    /// Mount state.
    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Return `true` while mounted.
    pub fn is_mounted(&self) -> bool {
        self.state == ControllerState::Mounted
    }

    /// Published interval of the pinned track.
    pub fn pin_interval(&self) -> Option<ScrollInterval> {
        match self.kind {
            SectionKind::Pinned => self.tracks.first().and_then(|t| t.interval),
            SectionKind::Flow => None,
        }
    }

    /// Registry token of the pinned track.
    pub fn pin_token(&self) -> Option<RangeToken> {
        match self.kind {
            SectionKind::Pinned => self.tracks.first().and_then(|t| t.token),
            SectionKind::Flow => None,
        }
    }

    /// Resolve every track against the section's position and publish the intervals.
    ///
    /// Returns `Ok(false)` when already mounted. On error nothing stays registered.
    pub fn mount(
        &mut self,
        registry: &mut RangeRegistry,
        top: f64,
        height: f64,
        viewport: Viewport,
    ) -> ScrollpinResult<bool> {
        if self.is_mounted() {
            return Ok(false);
        }
        let intervals = self
            .tracks
            .iter()
            .map(|t| t.trigger.resolve(top, height, viewport))
            .collect::<ScrollpinResult<Vec<_>>>()
            .map_err(|e| {
                ScrollpinError::validation(format!("section '{}' trigger: {e}", self.id))
            })?;

        for (track, interval) in self.tracks.iter_mut().zip(intervals) {
            if interval.is_empty() {
                tracing::warn!(section = %self.id, "zero-length interval; progress stays at 0");
            }
            track.reset();
            track.interval = Some(interval);
            track.token = Some(registry.register(interval, track.kind));
        }
        if let Some(intro) = &mut self.intro {
            intro.elapsed = 0.0;
        }
        self.state = ControllerState::Mounted;
        tracing::debug!(section = %self.id, tracks = self.tracks.len(), "section mounted");
        Ok(true)
    }

    /// Withdraw every interval and drop in-flight smoothing. Returns `false` when not mounted.
    pub fn unmount(&mut self, registry: &mut RangeRegistry) -> bool {
        if !self.is_mounted() {
            return false;
        }
        for track in &mut self.tracks {
            if let Some(token) = track.token.take() {
                registry.unregister(token);
            }
            track.interval = None;
            track.drive.cancel();
        }
        self.state = ControllerState::Torn;
        tracing::debug!(section = %self.id, "section unmounted");
        true
    }

    /// Feed a scroll offset. `None` when not mounted.
    pub fn on_scroll(&mut self, offset: f64) -> Option<SectionFrame> {
        if !self.is_mounted() {
            return None;
        }
        let reset = self.reset_on_leave_back;
        for track in &mut self.tracks {
            let Some(interval) = track.interval else {
                continue;
            };
            let left_back = track
                .last_offset
                .is_some_and(|prev| prev > interval.start && offset <= interval.start);
            track.raw = local_progress(offset, interval);
            if reset && left_back {
                track.drive.jump(0.0);
                track.at_rest = true;
            } else if track.at_rest && offset > interval.start {
                track.at_rest = false;
            }
            track.drive.follow(track.raw, offset, interval);
            if offset.is_finite() {
                track.last_offset = Some(offset);
            }
        }
        self.frame()
    }

    /// Advance scrub smoothing, toggled reveals and the intro by `dt_secs`. `None` when not
    /// mounted.
    pub fn advance(&mut self, dt_secs: f64) -> Option<SectionFrame> {
        if !self.is_mounted() {
            return None;
        }
        for track in &mut self.tracks {
            track.drive.advance(dt_secs);
        }
        if let Some(intro) = &mut self.intro
            && dt_secs.is_finite()
        {
            intro.elapsed += dt_secs.max(0.0);
        }
        self.frame()
    }

    /// Return `true` while any track's visual progress trails its target or the intro runs.
    pub fn is_animating(&self) -> bool {
        self.is_mounted()
            && (self.tracks.iter().any(|t| t.drive.is_animating()) || self.is_intro_playing())
    }

    /// Current output without consuming input. `None` when not mounted.
    pub fn frame(&self) -> Option<SectionFrame> {
        if !self.is_mounted() {
            return None;
        }
        let mut states = BTreeMap::new();
        for track in &self.tracks {
            let TimelineFrame { states: s, .. } = track.evaluate();
            states.extend(s);
        }
        if let Some(intro) = self.intro.as_ref().filter(|i| i.is_playing()) {
            states.extend(intro.intro.sample(intro.elapsed).states);
        }

        let primary = self.tracks.first();
        let progress = primary.map_or(0.0, |t| t.raw);
        let visual_progress = primary.map_or(0.0, |t| t.drive.current());
        let interval = primary.and_then(|t| t.interval);
        let offset = primary.and_then(|t| t.last_offset);
        let side = match (offset, interval) {
            (Some(o), Some(i)) => Side::of(o, i),
            _ => Side::Before,
        };

        let (pinned, phase, pin_offset) = match (self.kind, interval) {
            (SectionKind::Pinned, Some(i)) => {
                let pin_offset = match side {
                    Side::Before => 0.0,
                    Side::Inside => offset.map_or(0.0, |o| o - i.start),
                    Side::After => i.len(),
                };
                let bounds = primary.map_or_else(PhaseBounds::default, |t| t.bounds);
                (
                    side == Side::Inside,
                    Some(bounds.active(visual_progress)),
                    pin_offset,
                )
            }
            _ => (false, None, 0.0),
        };

        Some(SectionFrame {
            id: self.id.clone(),
            progress,
            visual_progress,
            side,
            pinned,
            phase,
            pin_offset,
            states,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/section/controller.rs"]
mod tests;
