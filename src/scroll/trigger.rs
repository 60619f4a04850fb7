//! Trigger anchors: where a scroll-linked interval starts and ends.
//!
//! An anchor pairs a line on the element with a line on the viewport, written `"<element>
//! <viewport>"`, e.g. `"top 80%"` means "when the element's top edge meets the line 80% down the
//! viewport". Each side accepts `top`, `center`, `bottom` or a percentage. An end may instead be
//! relative to the start, `"+=130%"`, measured in viewport heights.

use std::fmt;
use std::str::FromStr;

use crate::foundation::core::{ScrollInterval, Viewport};
use crate::foundation::error::{ScrollpinError, ScrollpinResult};

/// A horizontal line on a box, as a fraction of its height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Edge {
    /// `0%`.
    Top,
    /// `50%`.
    Center,
    /// `100%`.
    Bottom,
    /// Arbitrary percentage.
    Percent(f64),
}

impl Edge {
    /// Fraction of the box height.
    pub fn fraction(self) -> f64 {
        match self {
            Self::Top => 0.0,
            Self::Center => 0.5,
            Self::Bottom => 1.0,
            Self::Percent(p) => p / 100.0,
        }
    }
}

impl FromStr for Edge {
    type Err = ScrollpinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(Self::Top),
            "center" => Ok(Self::Center),
            "bottom" => Ok(Self::Bottom),
            other => {
                let pct = other
                    .strip_suffix('%')
                    .and_then(|v| v.trim().parse::<f64>().ok())
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| {
                        ScrollpinError::validation(format!("unknown trigger edge '{other}'"))
                    })?;
                Ok(Self::Percent(pct))
            }
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Top => f.write_str("top"),
            Self::Center => f.write_str("center"),
            Self::Bottom => f.write_str("bottom"),
            Self::Percent(p) => write!(f, "{p}%"),
        }
    }
}

/// Element line meeting viewport line.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TriggerAnchor {
    /// Line on the element.
    pub element: Edge,
    /// Line on the viewport.
    pub viewport: Edge,
}

impl TriggerAnchor {
    /// `"top top"`: the element's top reaches the viewport's top.
    pub const TOP_TOP: Self = Self {
        element: Edge::Top,
        viewport: Edge::Top,
    };

    /// `"bottom top"`: the element's bottom reaches the viewport's top.
    pub const BOTTOM_TOP: Self = Self {
        element: Edge::Bottom,
        viewport: Edge::Top,
    };

    /// Absolute scroll offset at which the two lines meet.
    pub fn resolve(self, element_top: f64, element_height: f64, viewport_height: f64) -> f64 {
        element_top + self.element.fraction() * element_height
            - self.viewport.fraction() * viewport_height
    }
}

impl FromStr for TriggerAnchor {
    type Err = ScrollpinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(element), Some(viewport), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(ScrollpinError::validation(format!(
                "trigger anchor '{s}' must be '<element> <viewport>'"
            )));
        };
        Ok(Self {
            element: element.parse()?,
            viewport: viewport.parse()?,
        })
    }
}

impl TryFrom<String> for TriggerAnchor {
    type Error = ScrollpinError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TriggerAnchor> for String {
    fn from(value: TriggerAnchor) -> Self {
        value.to_string()
    }
}

impl fmt::Display for TriggerAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.element, self.viewport)
    }
}

/// End of a trigger interval.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TriggerEnd {
    /// Absolute anchor, like the start.
    Anchor(TriggerAnchor),
    /// Distance after the start, in percent of viewport height (`"+=130%"`).
    Relative(f64),
}

impl Default for TriggerEnd {
    fn default() -> Self {
        Self::Anchor(TriggerAnchor::BOTTOM_TOP)
    }
}

impl FromStr for TriggerEnd {
    type Err = ScrollpinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some(rest) = s.trim().strip_prefix("+=") else {
            return s.parse().map(Self::Anchor);
        };
        let pct = rest
            .strip_suffix('%')
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite() && *v >= 0.0)
            .ok_or_else(|| {
                ScrollpinError::validation(format!("relative trigger end '{s}' must be '+=N%'"))
            })?;
        Ok(Self::Relative(pct))
    }
}

impl TryFrom<String> for TriggerEnd {
    type Error = ScrollpinError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TriggerEnd> for String {
    fn from(value: TriggerEnd) -> Self {
        value.to_string()
    }
}

impl fmt::Display for TriggerEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anchor(a) => a.fmt(f),
            Self::Relative(p) => write!(f, "+={p}%"),
        }
    }
}

/// Start/end pair describing one scroll-linked interval.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TriggerSpec {
    /// Where the interval starts.
    pub start: TriggerAnchor,
    /// Where the interval ends; `"bottom top"` when omitted.
    #[serde(default)]
    pub end: TriggerEnd,
}

impl TriggerSpec {
    /// Pinned trigger: starts at `"top top"` and reserves `distance_vh` viewport heights.
    pub fn pinned(distance_vh: f64) -> Self {
        Self {
            start: TriggerAnchor::TOP_TOP,
            end: TriggerEnd::Relative(distance_vh * 100.0),
        }
    }

    /// Resolve to an absolute interval for an element at `element_top` of `element_height`.
    pub fn resolve(
        self,
        element_top: f64,
        element_height: f64,
        viewport: Viewport,
    ) -> ScrollpinResult<ScrollInterval> {
        let start = self
            .start
            .resolve(element_top, element_height, viewport.height);
        let end = match self.end {
            TriggerEnd::Anchor(a) => a.resolve(element_top, element_height, viewport.height),
            TriggerEnd::Relative(pct) => start + pct / 100.0 * viewport.height,
        };
        ScrollInterval::new(start, end)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/trigger.rs"]
mod tests;
