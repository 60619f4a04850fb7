use crate::foundation::error::{ScrollpinError, ScrollpinResult};

pub use kurbo::{Affine, Point, Vec2};

/// Stable identifier of a section on the page.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct SectionId(pub String);

impl SectionId {
    /// Build an id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of one animated element inside a section (card, background, tile #2, ...).
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct TargetId(pub String);

impl TargetId {
    /// Build an id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TargetId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Host viewport size in scroll units (CSS pixels).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Viewport width.
    pub width: f64,
    /// Viewport height.
    pub height: f64,
}

impl Viewport {
    /// Create a validated viewport with finite, positive dimensions.
    pub fn new(width: f64, height: f64) -> ScrollpinResult<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(ScrollpinError::validation(
                "Viewport dimensions must be finite and > 0",
            ));
        }
        Ok(Self { width, height })
    }
}

/// Absolute scroll-offset bounds `[start, end]` during which a section is pinned.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollInterval {
    /// Offset at which pinning begins.
    pub start: f64,
    /// Offset at which pinning ends, `end >= start`.
    pub end: f64,
}

impl ScrollInterval {
    /// Create a validated interval with `start <= end`.
    pub fn new(start: f64, end: f64) -> ScrollpinResult<Self> {
        if !(start.is_finite() && end.is_finite()) {
            return Err(ScrollpinError::validation(
                "ScrollInterval bounds must be finite",
            ));
        }
        if start > end {
            return Err(ScrollpinError::validation(
                "ScrollInterval start must be <= end",
            ));
        }
        Ok(Self { start, end })
    }

    /// Interval starting at `top` and spanning `distance` scroll units.
    pub fn from_reserved(top: f64, distance: f64) -> ScrollpinResult<Self> {
        if distance < 0.0 {
            return Err(ScrollpinError::validation(
                "reserved scroll distance must be >= 0",
            ));
        }
        Self::new(top, top + distance)
    }

    /// Scroll distance covered by the interval.
    pub fn len(self) -> f64 {
        self.end - self.start
    }

    /// Return `true` for a zero-distance interval.
    pub fn is_empty(self) -> bool {
        self.end == self.start
    }

    /// Return `true` when `offset` is inside `[start, end]`.
    pub fn contains(self, offset: f64) -> bool {
        self.start <= offset && offset <= self.end
    }
}

/// A [`ScrollInterval`] divided by the page's total scrollable distance.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NormalizedRange {
    /// Normalized start in `[0, 1]`.
    pub start: f64,
    /// Normalized end in `[0, 1]`.
    pub end: f64,
    /// Resting snap point, `start + (end - start) * 0.5`.
    pub center: f64,
}

impl NormalizedRange {
    /// Build a range directly from normalized bounds.
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            center: start + (end - start) * 0.5,
        }
    }

    /// Normalize an absolute interval. Returns `None` when `max_scroll` is not positive.
    ///
    /// Bounds past the end of the page are clamped to `1.0` before the center is taken.
    pub fn from_interval(interval: ScrollInterval, max_scroll: f64) -> Option<Self> {
        if !max_scroll.is_finite() || max_scroll <= 0.0 {
            return None;
        }
        let start = (interval.start / max_scroll).clamp(0.0, 1.0);
        let end = (interval.end / max_scroll).clamp(start, 1.0);
        Some(Self::new(start, end))
    }

    /// Membership test with an outward tolerance on both bounds.
    pub fn contains_buffered(self, value: f64, buffer: f64) -> bool {
        value >= self.start - buffer && value <= self.end + buffer
    }
}

/// Visual state of one animated element.
///
/// Translation is expressed in viewport percent (`x` of width, `y` of height) so timelines stay
/// resolution independent, plus an absolute pixel nudge for small offsets such as row slides.
/// [`VisualState::to_affine`] resolves both to scroll units.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VisualState {
    /// Offset in viewport percent.
    pub translate: Vec2,
    /// Additional offset in pixels.
    #[serde(default)]
    pub offset_px: Vec2,
    /// Uniform scale, `1.0` at rest.
    pub scale: f64,
    /// Rotation in degrees.
    pub rotation_deg: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
}

impl Default for VisualState {
    fn default() -> Self {
        Self::REST
    }
}

impl VisualState {
    /// Fully visible, untransformed.
    pub const REST: Self = Self {
        translate: Vec2::ZERO,
        offset_px: Vec2::ZERO,
        scale: 1.0,
        rotation_deg: 0.0,
        opacity: 1.0,
    };

    /// Copy with horizontal offset in viewport-width percent.
    pub const fn with_x(mut self, vw: f64) -> Self {
        self.translate.x = vw;
        self
    }

    /// Copy with vertical offset in viewport-height percent.
    pub const fn with_y(mut self, vh: f64) -> Self {
        self.translate.y = vh;
        self
    }

    /// Copy with vertical pixel offset.
    pub const fn with_y_px(mut self, px: f64) -> Self {
        self.offset_px.y = px;
        self
    }

    /// Copy with scale.
    pub const fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Copy with rotation in degrees.
    pub const fn with_rotation(mut self, deg: f64) -> Self {
        self.rotation_deg = deg;
        self
    }

    /// Copy with opacity.
    pub const fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Translation resolved to scroll units for `viewport`.
    pub fn translate_px(self, viewport: Viewport) -> Vec2 {
        Vec2::new(
            self.translate.x * viewport.width / 100.0 + self.offset_px.x,
            self.translate.y * viewport.height / 100.0 + self.offset_px.y,
        )
    }

    /// Resolve into an affine transform pivoting around `pivot`.
    pub fn to_affine(self, viewport: Viewport, pivot: Point) -> Affine {
        let t_translate = Affine::translate(self.translate_px(viewport));
        let t_pivot = Affine::translate(pivot.to_vec2());
        let t_unpivot = Affine::translate(-pivot.to_vec2());
        let t_rotate = Affine::rotate(self.rotation_deg.to_radians());
        let t_scale = Affine::scale(self.scale);

        // T(translate) * T(pivot) * R(rot) * S(scale) * T(-pivot)
        t_translate * t_pivot * t_rotate * t_scale * t_unpivot
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
