//! Page orchestrator.
//!
//! [`Page`] owns the sections, the page's [`RangeRegistry`] and the binding ledger. It arms the
//! readiness barrier on mount, installs the single snap policy once the barrier opens, routes
//! scroll offsets to every mounted section before consulting the snap policy, and drives the
//! corrective scroll. Unmounting releases every binding, pending settling timer included.

use std::time::Duration;

use crate::{
    config::{LateMountPolicy, PageLayout, ScrollConfig, SectionKind, SectionLayout},
    foundation::core::{SectionId, Viewport},
    foundation::error::{ScrollpinError, ScrollpinResult},
    layout::solver::{PageGeometry, resolve_sections},
    lifecycle::bindings::{BindingId, BindingKind, Bindings},
    lifecycle::readiness::{Readiness, ReadinessBarrier},
    section::controller::{SectionController, SectionFrame},
    snap::executor::{CorrectiveScroll, ScrollSink, SnapExecutor},
    snap::policy::{SnapDecision, SnapPolicy},
    snap::registry::RangeRegistry,
};

/// Corrections shorter than this, in scroll units, are skipped.
const MIN_CORRECTION: f64 = 0.5;

/// Mount cycle of the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageState {
    /// Not mounted yet.
    Unmounted,
    /// Mounted; waiting on the readiness barrier.
    Settling,
    /// Ranges aggregated; a snap policy is installed unless the page is free scroll.
    Ready,
    /// Unmounted; every binding released.
    Torn,
}

/// Output of one page frame.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct FrameOutput {
    /// Scroll offset of the frame.
    pub offset: f64,
    /// `offset` normalized by the page's scrollable distance.
    pub normalized: f64,
    /// Frames of every mounted section, in document order.
    pub sections: Vec<SectionFrame>,
    /// Snap decision for `normalized`; `None` while no policy is installed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snap: Option<SnapDecision>,
}

impl FrameOutput {
    /// Frame of section `id`.
    pub fn section(&self, id: &str) -> Option<&SectionFrame> {
        self.sections.iter().find(|s| s.id.as_str() == id)
    }
}

#[derive(Debug)]
struct Slot {
    height: f64,
    kind: SectionKind,
    controller: SectionController,
    binding: Option<BindingId>,
}

#[derive(Debug)]
struct InstalledSnap {
    policy: SnapPolicy,
    binding: BindingId,
}

/// Scroll coordinator of one page.
#[derive(Debug)]
pub struct Page {
    config: ScrollConfig,
    viewport: Viewport,
    slots: Vec<Slot>,
    geometry: PageGeometry,
    registry: RangeRegistry,
    bindings: Bindings,
    expected: Option<Option<usize>>,
    barrier: Option<ReadinessBarrier>,
    timer: Option<BindingId>,
    snap: Option<InstalledSnap>,
    state: PageState,
    offset: f64,
    executor: SnapExecutor,
    corrective: Option<BindingId>,
}

impl Page {
    /// Empty page.
    pub fn new(config: ScrollConfig, viewport: Viewport) -> ScrollpinResult<Self> {
        config.validate()?;
        let viewport = Viewport::new(viewport.width, viewport.height)?;
        let geometry = resolve_sections(std::iter::empty(), viewport, &config)?;
        Ok(Self {
            config,
            viewport,
            slots: Vec::new(),
            geometry,
            registry: RangeRegistry::new(),
            bindings: Bindings::new(),
            expected: None,
            barrier: None,
            timer: None,
            snap: None,
            state: PageState::Unmounted,
            offset: 0.0,
            executor: SnapExecutor::new(),
            corrective: None,
        })
    }

    /// Page with every section of `layout`.
    pub fn from_layout(layout: &PageLayout) -> ScrollpinResult<Self> {
        layout.validate()?;
        let mut page = Self::new(layout.config.clone(), layout.viewport)?;
        for section in &layout.sections {
            page.add_section(section)?;
        }
        Ok(page)
    }

    /// Append a section below the existing ones. Only allowed before the page mounts.
    ///
    /// The first section of the page resets to its rest state when scrolled back above it.
    pub fn add_section(&mut self, layout: &SectionLayout) -> ScrollpinResult<()> {
        if self.state != PageState::Unmounted {
            return Err(ScrollpinError::registry(format!(
                "section '{}' added after the page mounted",
                layout.id
            )));
        }
        if self.slot_index(&layout.id).is_some() {
            return Err(ScrollpinError::registry(format!(
                "duplicate section id '{}'",
                layout.id
            )));
        }
        if !layout.height.is_finite() || layout.height < 0.0 {
            return Err(ScrollpinError::validation(format!(
                "section '{}' height must be finite and >= 0",
                layout.id
            )));
        }
        let controller = SectionController::from_layout(layout, &self.config)?
            .with_leave_back_reset(self.slots.is_empty());
        self.slots.push(Slot {
            height: layout.height,
            kind: layout.kind,
            controller,
            binding: None,
        });
        self.geometry = resolve_sections(
            self.slots
                .iter()
                .map(|s| (s.controller.id().clone(), s.height, s.kind)),
            self.viewport,
            &self.config,
        )?;
        Ok(())
    }

    /// Override how many pinned registrations open the readiness barrier.
    ///
    /// Defaults to the number of pinned sections on the page; `None` waits for
    /// [`Page::declare_all`] or the settling delay. Applies from the next [`Page::mount`].
    pub fn set_expected(&mut self, expected: Option<usize>) {
        self.expected = Some(expected);
    }

    /// Mount the page at `now` and arm the readiness barrier.
    ///
    /// Returns `false` when the page is already mounted; a pending barrier is never duplicated.
    #[tracing::instrument(skip(self), fields(sections = self.slots.len()))]
    pub fn mount(&mut self, now: Duration) -> bool {
        match self.state {
            PageState::Settling | PageState::Ready => {
                tracing::debug!(state = ?self.state, "page already mounted");
                return false;
            }
            PageState::Unmounted | PageState::Torn => {}
        }
        let expected = self.expected.unwrap_or(Some(self.pinned_count()));
        self.barrier = Some(ReadinessBarrier::new(
            expected,
            now,
            self.config.settle_delay(),
        ));
        self.timer = Some(self.bindings.acquire(BindingKind::SettleTimer));
        self.state = PageState::Settling;
        tracing::debug!(?expected, "page mounted; settling");
        true
    }

    /// Mount section `id` at its resolved position and publish its intervals.
    ///
    /// Returns `Ok(false)` when already mounted. A pinned section mounting after ranges were
    /// aggregated follows [`ScrollConfig::late_mount`].
    pub fn mount_section(&mut self, id: &SectionId) -> ScrollpinResult<bool> {
        if self.state == PageState::Torn {
            return Err(ScrollpinError::registry(format!(
                "section '{id}' mounted on an unmounted page"
            )));
        }
        let idx = self
            .slot_index(id)
            .ok_or_else(|| ScrollpinError::registry(format!("unknown section '{id}'")))?;
        let top = self.geometry.sections[idx].top;
        let slot = &mut self.slots[idx];
        if !slot
            .controller
            .mount(&mut self.registry, top, slot.height, self.viewport)?
        {
            return Ok(false);
        }
        slot.binding = Some(self.bindings.acquire(BindingKind::SectionScroll));
        slot.controller.on_scroll(self.offset);

        if self.state == PageState::Ready && slot.kind == SectionKind::Pinned {
            match self.config.late_mount {
                LateMountPolicy::Exclude => {
                    if let Some(token) = slot.controller.pin_token() {
                        self.registry.exclude_from_snapping(token);
                    }
                    tracing::warn!(section = %id, "pinned section mounted after aggregation; excluded from snapping");
                }
                LateMountPolicy::Reaggregate => {
                    tracing::debug!(section = %id, "late pinned section; re-aggregating");
                    self.install();
                }
            }
        }
        Ok(true)
    }

    /// Mount every section in document order. Sections whose triggers fail to resolve stay
    /// unmounted and are logged. Returns how many sections mounted.
    pub fn mount_sections(&mut self) -> usize {
        let ids: Vec<SectionId> = self
            .slots
            .iter()
            .map(|s| s.controller.id().clone())
            .collect();
        let mut mounted = 0;
        for id in ids {
            match self.mount_section(&id) {
                Ok(true) => mounted += 1,
                Ok(false) => {}
                Err(e) => tracing::warn!(section = %id, error = %e, "section left unmounted"),
            }
        }
        mounted
    }

    /// Unmount section `id`, withdrawing its intervals and releasing its binding.
    ///
    /// When ranges were already aggregated the snap policy is rebuilt without it.
    pub fn unmount_section(&mut self, id: &SectionId) -> bool {
        let Some(idx) = self.slot_index(id) else {
            return false;
        };
        let slot = &mut self.slots[idx];
        if !slot.controller.unmount(&mut self.registry) {
            return false;
        }
        if let Some(binding) = slot.binding.take() {
            self.bindings.release(binding);
        }
        if self.state == PageState::Ready && slot.kind == SectionKind::Pinned {
            self.install();
        }
        true
    }

    /// Host signal: every section is mounted.
    pub fn declare_all(&mut self) {
        if let Some(barrier) = &mut self.barrier {
            barrier.declare_all();
        }
    }

    /// Check the readiness barrier at `now`; aggregates ranges and installs the snap policy the
    /// first time it opens.
    #[tracing::instrument(skip(self))]
    pub fn poll(&mut self, now: Duration) -> Readiness {
        let registered = self.registry.pinned_len();
        let Some(barrier) = &mut self.barrier else {
            return match self.state {
                PageState::Torn => Readiness::Cancelled,
                _ => Readiness::Waiting,
            };
        };
        let readiness = barrier.poll(registered, now);
        if self.state == PageState::Settling
            && let Readiness::Ready(_) = readiness
        {
            if let Some(timer) = self.timer.take() {
                self.bindings.release(timer);
            }
            self.state = PageState::Ready;
            self.install();
        }
        readiness
    }

    /// Route a scroll offset to every mounted section, then consult the snap policy.
    pub fn on_scroll(&mut self, offset: f64) -> FrameOutput {
        if self.state == PageState::Torn {
            return FrameOutput::default();
        }
        self.offset = offset;
        let sections = self
            .slots
            .iter_mut()
            .filter_map(|s| s.controller.on_scroll(offset))
            .collect();
        self.output(sections)
    }

    /// Scrolling came to rest at `offset`. Starts and returns a corrective scroll when the snap
    /// policy moves the rest position.
    #[tracing::instrument(skip(self))]
    pub fn on_scroll_end(&mut self, offset: f64) -> Option<CorrectiveScroll> {
        let frame = self.on_scroll(offset);
        let decision = frame.snap.filter(SnapDecision::is_correction)?;
        let target = decision.target * self.geometry.max_scroll;
        if (target - offset).abs() < MIN_CORRECTION {
            return None;
        }
        let scroll = CorrectiveScroll::plan(
            offset,
            target,
            self.viewport.height,
            self.config.snap_duration,
            self.config.snap_ease,
        );
        tracing::debug!(from = scroll.from, to = scroll.to, duration = scroll.duration_secs, "snap");
        self.executor.start(scroll);
        if self.corrective.is_none() {
            self.corrective = Some(self.bindings.acquire(BindingKind::CorrectiveScroll));
        }
        Some(scroll)
    }

    /// User input took over the scroll; abort any corrective scroll in flight.
    pub fn interrupt(&mut self) -> bool {
        let cancelled = self.executor.cancel();
        self.release_corrective();
        cancelled
    }

    /// Advance frame time by `dt_secs`: step the corrective scroll (writing into `sink`) and the
    /// scrub smoothing of every section.
    pub fn advance(&mut self, dt_secs: f64, sink: &mut dyn ScrollSink) -> FrameOutput {
        if self.state == PageState::Torn {
            return FrameOutput::default();
        }
        if let Some(offset) = self.executor.step(dt_secs, sink) {
            self.offset = offset;
            for slot in &mut self.slots {
                slot.controller.on_scroll(offset);
            }
            if !self.executor.is_active() {
                self.release_corrective();
            }
        }
        let sections = self
            .slots
            .iter_mut()
            .filter_map(|s| s.controller.advance(dt_secs))
            .collect();
        self.output(sections)
    }

    /// Unmount the page: cancel the settling timer, stop any correction, remove the snap policy
    /// and unmount every section. Returns `false` when there was nothing to tear down.
    pub fn unmount(&mut self) -> bool {
        if self.state == PageState::Torn {
            return false;
        }
        let was_mounted = self.state != PageState::Unmounted;
        if let Some(barrier) = &mut self.barrier
            && barrier.cancel()
        {
            tracing::debug!("settling timer cancelled before firing");
        }
        if let Some(timer) = self.timer.take() {
            self.bindings.release(timer);
        }
        self.interrupt();
        self.uninstall();

        let mut sections = 0;
        for slot in &mut self.slots {
            if slot.controller.unmount(&mut self.registry) {
                sections += 1;
            }
            if let Some(binding) = slot.binding.take() {
                self.bindings.release(binding);
            }
        }
        if self.bindings.live() != 0 {
            tracing::warn!(live = self.bindings.live(), "bindings outlived page teardown");
            self.bindings.release_all();
        }
        self.state = PageState::Torn;
        tracing::debug!(sections, "page unmounted");
        was_mounted || sections > 0
    }

    /// Mount cycle state.
    pub fn state(&self) -> PageState {
        self.state
    }

    /// Installed snap policy.
    pub fn policy(&self) -> Option<&SnapPolicy> {
        self.snap.as_ref().map(|s| &s.policy)
    }

    /// Resolved page geometry.
    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Live bindings.
    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// The page's range registry.
    pub fn registry(&self) -> &RangeRegistry {
        &self.registry
    }

    /// Controller of section `id`.
    pub fn section(&self, id: &SectionId) -> Option<&SectionController> {
        self.slot_index(id).map(|i| &self.slots[i].controller)
    }

    /// Last scroll offset seen.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Behavioral constants.
    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    /// Corrective scroll in flight.
    pub fn corrective(&self) -> Option<&CorrectiveScroll> {
        self.executor.active()
    }

    /// Return `true` while a corrective scroll runs or any section's smoothing trails the scroll.
    pub fn is_animating(&self) -> bool {
        self.executor.is_active() || self.slots.iter().any(|s| s.controller.is_animating())
    }

    /// Normalize an absolute offset by the scrollable distance; `0` on a page that cannot scroll.
    pub fn normalize(&self, offset: f64) -> f64 {
        if self.geometry.max_scroll > 0.0 {
            offset / self.geometry.max_scroll
        } else {
            0.0
        }
    }

    fn output(&self, sections: Vec<SectionFrame>) -> FrameOutput {
        let normalized = self.normalize(self.offset);
        FrameOutput {
            offset: self.offset,
            normalized,
            sections,
            snap: self.policy().map(|p| p.decide(normalized)),
        }
    }

    // The previous policy is always torn down before a new one installs.
    fn install(&mut self) {
        self.uninstall();
        let Some(policy) = self
            .registry
            .compute_ranges(self.geometry.max_scroll, &self.config)
        else {
            return;
        };
        let binding = self.bindings.acquire(BindingKind::SnapPolicy);
        tracing::debug!(ranges = policy.ranges().len(), "snap policy installed");
        self.snap = Some(InstalledSnap { policy, binding });
    }

    fn uninstall(&mut self) {
        if let Some(old) = self.snap.take() {
            self.bindings.release(old.binding);
        }
    }

    fn release_corrective(&mut self) {
        if let Some(binding) = self.corrective.take() {
            self.bindings.release(binding);
        }
    }

    fn slot_index(&self, id: &SectionId) -> Option<usize> {
        self.slots.iter().position(|s| s.controller.id() == id)
    }

    fn pinned_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| s.kind == SectionKind::Pinned)
            .count()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lifecycle/page.rs"]
mod tests;
