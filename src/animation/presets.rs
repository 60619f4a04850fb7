//! Timelines of the page's pinned section integrations.
//!
//! Every pinned section shares one shape: cards slide in from the sides during the entrance,
//! hold through the settle gap, and slide out while the background dims during the exit. The
//! presets differ only in which elements they animate.

use crate::{
    animation::intro::{Intro, IntroStep},
    animation::ops::{StaggerItem, entrance, exit, stagger},
    animation::phase::{PhaseBounds, PhaseEntry, PhaseSpec},
    foundation::core::{TargetId, VisualState},
    foundation::error::ScrollpinResult,
};

/// Entrance start of the secondary (right-hand) panel.
pub const PANEL_ENTRANCE_START: f64 = 0.06;
/// First staggered tile start.
pub const TILE_STAGGER_BASE: f64 = 0.05;
/// First staggered row start.
pub const ROW_STAGGER_BASE: f64 = 0.14;
/// Row stagger delta.
pub const ROW_STAGGER_STEP: f64 = 0.04;

/// Named section timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Preset {
    /// Headline block that only exits; the page's first section.
    Hero {
        /// Play the timed load intro after mount.
        #[serde(default)]
        intro: bool,
    },
    /// Left card plus right panel, with optional staggered rows inside the panel.
    SplitCard {
        /// Number of staggered rows.
        #[serde(default)]
        rows: usize,
    },
    /// Left card plus a stack of rotated tiles entering from the right.
    Filmstrip {
        /// Resting rotation of each tile, in degrees.
        angles: Vec<f64>,
    },
    /// Caller-authored timeline.
    Custom {
        /// The timeline.
        spec: PhaseSpec,
    },
}

impl Preset {
    /// Build and validate the timeline for `bounds`.
    ///
    /// `tile_step` is the stagger delta used by [`Preset::Filmstrip`].
    pub fn build(&self, bounds: PhaseBounds, tile_step: f64) -> ScrollpinResult<PhaseSpec> {
        let spec = match self {
            Self::Hero { .. } => hero(bounds),
            Self::SplitCard { rows } => split_card(bounds, *rows)?,
            Self::Filmstrip { angles } => filmstrip(bounds, angles, tile_step)?,
            Self::Custom { spec } => spec.clone(),
        };
        spec.validate(bounds)?;
        Ok(spec)
    }

    /// Timed intro played after mount, if the preset has one.
    pub fn intro(&self) -> ScrollpinResult<Option<Intro>> {
        match self {
            Self::Hero { intro: true } => hero_intro().map(Some),
            _ => Ok(None),
        }
    }
}

fn background_exit(bounds: PhaseBounds, scale: f64) -> PhaseEntry {
    exit(
        "bg",
        bounds,
        VisualState::REST,
        VisualState::REST.with_scale(scale).with_opacity(0.35),
    )
}

fn left_card(bounds: PhaseBounds) -> [PhaseEntry; 2] {
    [
        entrance(
            "card",
            0.0,
            bounds,
            VisualState::REST
                .with_x(-55.0)
                .with_opacity(0.0)
                .with_scale(0.96),
            VisualState::REST,
        ),
        exit(
            "card",
            bounds,
            VisualState::REST,
            VisualState::REST.with_x(-18.0).with_opacity(0.0),
        ),
    ]
}

fn hero(bounds: PhaseBounds) -> PhaseSpec {
    let text = ["headline", "subheadline", "cta"].map(|t| {
        exit(
            t,
            bounds,
            VisualState::REST,
            VisualState::REST.with_x(-18.0).with_opacity(0.0),
        )
    });
    PhaseSpec::new()
        .with_all(text)
        .with(background_exit(bounds, 1.06))
}

fn hero_intro() -> ScrollpinResult<Intro> {
    Intro::sequence([
        IntroStep::new(
            "bg",
            VisualState::REST.with_opacity(0.0).with_scale(1.08),
            1.2,
        ),
        IntroStep::new(
            "headline",
            VisualState::REST.with_y_px(40.0).with_opacity(0.0),
            0.8,
        )
        .overlapping(0.8),
        IntroStep::new(
            "subheadline",
            VisualState::REST.with_y_px(24.0).with_opacity(0.0),
            0.6,
        )
        .overlapping(0.5),
        IntroStep::new(
            "cta",
            VisualState::REST
                .with_y_px(18.0)
                .with_opacity(0.0)
                .with_scale(0.98),
            0.5,
        )
        .overlapping(0.3),
    ])
}

fn split_card(bounds: PhaseBounds, rows: usize) -> ScrollpinResult<PhaseSpec> {
    let row_items = (0..rows)
        .map(|i| StaggerItem {
            target: TargetId::new(format!("row.{i}")),
            from: VisualState::REST.with_y_px(18.0).with_opacity(0.0),
            rest: VisualState::REST,
        })
        .collect();

    Ok(PhaseSpec::new()
        .with_all(left_card(bounds))
        .with(entrance(
            "panel",
            PANEL_ENTRANCE_START,
            bounds,
            VisualState::REST
                .with_x(55.0)
                .with_opacity(0.0)
                .with_scale(0.98),
            VisualState::REST,
        ))
        .with_all(stagger(row_items, ROW_STAGGER_BASE, ROW_STAGGER_STEP, bounds)?)
        .with(exit(
            "panel",
            bounds,
            VisualState::REST,
            VisualState::REST.with_x(18.0).with_opacity(0.0),
        ))
        .with(background_exit(bounds, 1.05)))
}

fn filmstrip(bounds: PhaseBounds, angles: &[f64], step: f64) -> ScrollpinResult<PhaseSpec> {
    let tiles: Vec<StaggerItem> = angles
        .iter()
        .enumerate()
        .map(|(i, &angle)| StaggerItem {
            target: TargetId::new(format!("tile.{i}")),
            from: VisualState::REST
                .with_x(60.0)
                .with_opacity(0.0)
                .with_rotation(angle + 18.0),
            rest: VisualState::REST.with_rotation(angle),
        })
        .collect();

    let tile_exits: Vec<_> = tiles
        .iter()
        .map(|t| {
            exit(
                t.target.clone(),
                bounds,
                t.rest,
                t.rest.with_x(18.0).with_opacity(0.0),
            )
        })
        .collect();

    Ok(PhaseSpec::new()
        .with_all(left_card(bounds))
        .with_all(stagger(tiles, TILE_STAGGER_BASE, step, bounds)?)
        .with_all(tile_exits)
        .with(background_exit(bounds, 1.05)))
}

#[cfg(test)]
#[path = "../../tests/unit/animation/presets.rs"]
mod tests;
