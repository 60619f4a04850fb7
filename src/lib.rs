//! Scrollpin coordinates scroll-linked animation for long single-page scroll experiences.
//!
//! Pages are built from sections stacked top to bottom. Pinned sections hold in the viewport
//! for a reserved scroll distance while a declarative timeline plays; a page-wide snap policy
//! keeps the rest position out of the middle of those timelines.
//!
//! - Describe the page as a [`PageLayout`] (or add [`SectionLayout`]s by hand)
//! - Drive a [`Page`] with mount/unmount events, scroll offsets and frame time
//! - Render the per-element [`VisualState`]s of each [`SectionFrame`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod config;
pub(crate) mod layout;
pub(crate) mod lifecycle;
pub(crate) mod scroll;
pub(crate) mod section;
pub(crate) mod snap;

pub use crate::foundation::core::{
    Affine, NormalizedRange, Point, ScrollInterval, SectionId, TargetId, Vec2, Viewport,
    VisualState,
};
pub use crate::foundation::error::{ScrollpinError, ScrollpinResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::intro::{Intro, IntroStep};
pub use crate::animation::ops::{StaggerItem, entrance, exit, stagger};
pub use crate::animation::phase::{
    ActivePhase, Lerp, Phase, PhaseBounds, PhaseEntry, PhaseSpec, TimelineFrame, evaluate,
};
pub use crate::animation::presets::Preset;
pub use crate::config::{
    DurationRange, LateMountPolicy, PageLayout, RevealLayout, RevealPlayback, ScrollConfig,
    SectionKind, SectionLayout,
};
pub use crate::layout::solver::{PageGeometry, SectionGeometry, resolve_page, resolve_sections};
pub use crate::lifecycle::bindings::{BindingId, BindingKind, Bindings};
pub use crate::lifecycle::page::{FrameOutput, Page, PageState};
pub use crate::lifecycle::readiness::{ReadinessBarrier, Readiness, ReadyReason};
pub use crate::scroll::progress::{Side, local_progress};
pub use crate::scroll::scrub::Scrub;
pub use crate::scroll::toggle::Toggle;
pub use crate::scroll::trigger::{Edge, TriggerAnchor, TriggerEnd, TriggerSpec};
pub use crate::section::controller::{ControllerState, SectionController, SectionFrame};
pub use crate::snap::executor::{CorrectiveScroll, RecordingSink, ScrollSink, SnapExecutor};
pub use crate::snap::policy::{SnapDecision, SnapPolicy, nearest_range, snap_to};
pub use crate::snap::registry::{RangeKind, RangeRegistry, RangeToken};
