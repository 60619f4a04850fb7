use crate::{
    animation::ease::Ease,
    animation::phase::{Phase, PhaseBounds, PhaseEntry},
    foundation::core::{TargetId, VisualState},
    foundation::error::{ScrollpinError, ScrollpinResult},
};

/// Scrubbed entrance from `from` to `rest`, starting at `start` and ending at `entrance_end`.
pub fn entrance(
    target: impl Into<TargetId>,
    start: f64,
    bounds: PhaseBounds,
    from: VisualState,
    rest: VisualState,
) -> PhaseEntry {
    PhaseEntry {
        target: target.into(),
        phase: Phase::Entrance,
        start,
        end: bounds.entrance_end,
        from,
        to: rest,
        ease: Ease::Linear,
    }
}

/// Accelerating exit from `rest` to `to` over `[exit_start, 1]`.
pub fn exit(
    target: impl Into<TargetId>,
    bounds: PhaseBounds,
    rest: VisualState,
    to: VisualState,
) -> PhaseEntry {
    PhaseEntry {
        target: target.into(),
        phase: Phase::Exit,
        start: bounds.exit_start,
        end: 1.0,
        from: rest,
        to,
        ease: Ease::InCubic,
    }
}

/// One element of a staggered entrance.
#[derive(Clone, Debug)]
pub struct StaggerItem {
    /// Animated element.
    pub target: TargetId,
    /// Off-screen state.
    pub from: VisualState,
    /// Settled state.
    pub rest: VisualState,
}

/// Staggered entrances of identical shape.
///
/// Element `i` starts at `base_start + i * step`; every element spans the same distance, chosen so
/// the last one lands exactly on `entrance_end`.
pub fn stagger(
    items: Vec<StaggerItem>,
    base_start: f64,
    step: f64,
    bounds: PhaseBounds,
) -> ScrollpinResult<Vec<PhaseEntry>> {
    if items.is_empty() {
        return Ok(Vec::new());
    }
    if !(step.is_finite() && step >= 0.0) {
        return Err(ScrollpinError::timeline("stagger step must be finite and >= 0"));
    }

    let last_start = base_start + (items.len() - 1) as f64 * step;
    let span = bounds.entrance_end - last_start;
    if span < 0.0 {
        return Err(ScrollpinError::timeline(format!(
            "{} staggered elements starting at {base_start} (+{step}) overrun entrance_end {}",
            items.len(),
            bounds.entrance_end
        )));
    }

    Ok(items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            let start = base_start + i as f64 * step;
            PhaseEntry {
                target: item.target,
                phase: Phase::Entrance,
                start,
                end: (start + span).min(bounds.entrance_end),
                from: item.from,
                to: item.rest,
                ease: Ease::Linear,
            }
        })
        .collect())
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ops.rs"]
mod tests;
