use std::fmt;
use std::str::FromStr;

use crate::math::saturate;
use crate::page::{Anchor, PageLayout};

/// Relative position along an element or the viewport: 0 = top, 1 = bottom
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge(pub f32);

impl Edge {
    pub const TOP: Edge = Edge(0.0);
    pub const CENTER: Edge = Edge(0.5);
    pub const BOTTOM: Edge = Edge(1.0);
}

impl FromStr for Edge {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Edge::TOP),
            "center" => Ok(Edge::CENTER),
            "bottom" => Ok(Edge::BOTTOM),
            _ => {
                let pct = s
                    .strip_suffix('%')
                    .and_then(|v| v.parse::<f32>().ok())
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| format!("invalid edge '{}'", s))?;
                Ok(Edge(pct / 100.0))
            }
        }
    }
}

/// Trigger marker: fires when `element` edge meets `viewport` edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub element: Edge,
    pub viewport: Edge,
}

impl Marker {
    pub const fn new(element: Edge, viewport: Edge) -> Self {
        Self { element, viewport }
    }

    pub const TOP_TOP: Marker = Marker::new(Edge::TOP, Edge::TOP);
    pub const BOTTOM_TOP: Marker = Marker::new(Edge::BOTTOM, Edge::TOP);
    pub const TOP_CENTER: Marker = Marker::new(Edge::TOP, Edge::CENTER);
    pub const BOTTOM_CENTER: Marker = Marker::new(Edge::BOTTOM, Edge::CENTER);
    pub const BOTTOM_BOTTOM: Marker = Marker::new(Edge::BOTTOM, Edge::BOTTOM);
}

impl FromStr for Marker {
    type Err = String;

    /// Parses `"<element edge> <viewport edge>"`, e.g. `"top center"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(element), Some(viewport), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(format!("marker '{}' must have two edges", s));
        };
        Ok(Marker::new(element.parse()?, viewport.parse()?))
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = |e: Edge| match e.0 {
            v if v == 0.0 => "top".to_string(),
            v if v == 0.5 => "center".to_string(),
            v if v == 1.0 => "bottom".to_string(),
            v => format!("{}%", v * 100.0),
        };
        write!(f, "{} {}", name(self.element), name(self.viewport))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerMode {
    /// Value follows scroll progress through the region
    Scrub,
    /// Snap to the end value once the start marker is passed, revert when scrolled back
    Toggle,
}

/// Declarative scroll trigger: an anchor element, start/end markers and a mode
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollTrigger {
    pub anchor: Anchor,
    pub start: Marker,
    pub end: Marker,
    pub mode: TriggerMode,
}

impl ScrollTrigger {
    pub fn scrub(anchor: Anchor, start: Marker, end: Marker) -> Self {
        Self {
            anchor,
            start,
            end,
            mode: TriggerMode::Scrub,
        }
    }

    pub fn toggle(anchor: Anchor, at: Marker) -> Self {
        Self {
            anchor,
            start: at,
            end: at,
            mode: TriggerMode::Toggle,
        }
    }
}

/// Scroll offsets (document pixels) at which a trigger starts and ends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSpan {
    pub start: f32,
    pub end: f32,
}

impl ScrollSpan {
    /// Linear progress through the span, clamped to [0, 1]
    pub fn progress(&self, offset: f32) -> f32 {
        let length = self.end - self.start;
        if length <= 0.0 {
            if offset >= self.start {
                1.0
            } else {
                0.0
            }
        } else {
            saturate((offset - self.start) / length)
        }
    }
}

/// Scroll offset at which `marker` fires for `anchor`; `None` if the anchor
/// is not in `layout`
pub(crate) fn marker_offset(
    layout: &PageLayout,
    anchor: &Anchor,
    marker: Marker,
    viewport_height: f32,
) -> Option<f32> {
    let bounds = layout.bounds(anchor, viewport_height)?;
    Some(bounds.top + marker.element.0 * bounds.height() - marker.viewport.0 * viewport_height)
}

/// Boolean latch for toggle triggers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToggleLatch {
    engaged: bool,
}

impl ToggleLatch {
    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// Engage on reaching `point` moving forward, release when falling back below it.
    /// Returns true on a state transition.
    pub fn update(&mut self, offset: f32, point: f32) -> bool {
        let past = offset >= point;
        match (self.engaged, past) {
            (false, true) | (true, false) => {
                self.engaged = past;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_markers() {
        assert_eq!("top center".parse::<Marker>(), Ok(Marker::TOP_CENTER));
        assert_eq!("bottom bottom".parse::<Marker>(), Ok(Marker::BOTTOM_BOTTOM));
        assert_eq!(
            "top 80%".parse::<Marker>(),
            Ok(Marker::new(Edge::TOP, Edge(0.8)))
        );
        assert!("top".parse::<Marker>().is_err());
        assert!("top center bottom".parse::<Marker>().is_err());
        assert!("middle center".parse::<Marker>().is_err());
    }

    #[test]
    fn test_parse_rejects_non_finite_percentages() {
        assert!("nan%".parse::<Edge>().is_err());
        assert!("inf%".parse::<Edge>().is_err());
        assert!("top -inf%".parse::<Marker>().is_err());
        // positions outside the element are fine
        assert_eq!("-10%".parse::<Edge>(), Ok(Edge(-0.1)));
    }

    #[test]
    fn test_marker_display() {
        assert_eq!(Marker::BOTTOM_CENTER.to_string(), "bottom center");
        assert_eq!(Marker::new(Edge(0.25), Edge::TOP).to_string(), "25% top");
    }

    #[test]
    fn test_span_progress() {
        let span = ScrollSpan { start: 100.0, end: 300.0 };
        assert_eq!(span.progress(0.0), 0.0);
        assert_eq!(span.progress(100.0), 0.0);
        assert_eq!(span.progress(200.0), 0.5);
        assert_eq!(span.progress(300.0), 1.0);
        assert_eq!(span.progress(900.0), 1.0);
    }

    #[test]
    fn test_zero_length_span_is_a_step() {
        let span = ScrollSpan { start: 50.0, end: 50.0 };
        assert_eq!(span.progress(49.9), 0.0);
        assert_eq!(span.progress(50.0), 1.0);
    }

    #[test]
    fn test_marker_offset_against_block() {
        let layout = PageLayout::default();
        let anchor = Anchor::block("section1");
        // section1 spans 800..1600 for an 800px viewport
        assert_eq!(marker_offset(&layout, &anchor, Marker::TOP_CENTER, 800.0), Some(400.0));
        assert_eq!(marker_offset(&layout, &anchor, Marker::BOTTOM_CENTER, 800.0), Some(1200.0));
        assert_eq!(marker_offset(&layout, &Anchor::block("gone"), Marker::TOP_TOP, 800.0), None);
    }

    #[test]
    fn test_marker_offset_against_document() {
        let layout = PageLayout::default();
        assert_eq!(
            marker_offset(&layout, &Anchor::Document, Marker::TOP_TOP, 800.0),
            Some(0.0)
        );
        assert_eq!(
            marker_offset(&layout, &Anchor::Document, Marker::BOTTOM_BOTTOM, 800.0),
            Some(layout.max_scroll(800.0))
        );
    }

    #[test]
    fn test_latch_transitions() {
        let mut latch = ToggleLatch::default();
        assert!(!latch.update(10.0, 50.0));
        assert!(!latch.is_engaged());

        assert!(latch.update(50.0, 50.0));
        assert!(latch.is_engaged());
        assert!(!latch.update(80.0, 50.0));

        assert!(latch.update(49.0, 50.0));
        assert!(!latch.is_engaged());
    }
}
