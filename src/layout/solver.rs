use crate::{
    config::{PageLayout, ScrollConfig, SectionKind},
    foundation::core::{ScrollInterval, SectionId, Viewport},
    foundation::error::ScrollpinResult,
    scroll::trigger::TriggerSpec,
};

/// Resolved position of one section in document space.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SectionGeometry {
    /// Section id.
    pub id: SectionId,
    /// Document offset of the section's top edge, pin spacers of earlier sections included.
    pub top: f64,
    /// Content height.
    pub height: f64,
    /// Layout role.
    pub kind: SectionKind,
    /// Pinned interval; `None` for flow sections.
    pub pin: Option<ScrollInterval>,
}

/// Whole-page geometry.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PageGeometry {
    /// Sections in document order.
    pub sections: Vec<SectionGeometry>,
    /// Document height including pin spacers.
    pub document_height: f64,
    /// Total scrollable distance, `max(0, document_height - viewport.height)`.
    pub max_scroll: f64,
}

impl PageGeometry {
    /// Geometry of section `id`.
    pub fn section(&self, id: &SectionId) -> Option<&SectionGeometry> {
        self.sections.iter().find(|s| &s.id == id)
    }
}

/// Stack sections top to bottom.
///
/// A pinned section keeps its place in the document for its reserved distance, so every later
/// section is pushed down by that distance (the pin spacer).
pub fn resolve_page(layout: &PageLayout) -> ScrollpinResult<PageGeometry> {
    resolve_sections(
        layout
            .sections
            .iter()
            .map(|s| (s.id.clone(), s.height, s.kind)),
        layout.viewport,
        &layout.config,
    )
}

/// [`resolve_page`] over bare `(id, height, kind)` triples.
pub fn resolve_sections(
    sections: impl IntoIterator<Item = (SectionId, f64, SectionKind)>,
    viewport: Viewport,
    config: &ScrollConfig,
) -> ScrollpinResult<PageGeometry> {
    let trigger = TriggerSpec::pinned(config.pin_distance_vh);
    let mut y = 0.0;
    let mut out = Vec::new();
    for (id, height, kind) in sections {
        let top = y;
        let pin = match kind {
            SectionKind::Pinned => Some(trigger.resolve(top, height, viewport)?),
            SectionKind::Flow => None,
        };
        y += height + pin.map_or(0.0, ScrollInterval::len);
        out.push(SectionGeometry {
            id,
            top,
            height,
            kind,
            pin,
        });
    }

    Ok(PageGeometry {
        sections: out,
        document_height: y,
        max_scroll: (y - viewport.height).max(0.0),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/layout/solver.rs"]
mod tests;
