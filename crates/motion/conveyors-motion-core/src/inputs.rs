//! Input contracts for the motion engine.
//!
//! Hosts build one `Inputs` per animation frame: the current viewport (when it
//! changed), the page scroll offset, fresh region geometry, components that
//! unmounted, and pointer hover over marquees.

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;
use crate::ids::{CounterId, MarqueeId, RegionId, ScrollFlagId};

#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Inputs {
    /// New viewport rectangle; the previous one is kept when absent.
    #[serde(default)]
    pub viewport: Option<Rect>,
    /// Vertical page scroll in px; the previous value is kept when absent.
    #[serde(default)]
    pub scroll_y: Option<f64>,
    /// Latest bounding boxes, in the same coordinate space as the viewport.
    #[serde(default)]
    pub measurements: Vec<Measurement>,
    /// Applied before anything else this frame.
    #[serde(default)]
    pub unmount: Vec<Unmount>,
    #[serde(default)]
    pub hover: Vec<HoverUpdate>,
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Measurement {
    pub region: RegionId,
    pub rect: Rect,
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Unmount {
    Region(RegionId),
    Counter(CounterId),
    Marquee(MarqueeId),
    ScrollFlag(ScrollFlagId),
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HoverUpdate {
    pub marquee: MarqueeId,
    pub hovered: bool,
}

impl Inputs {
    pub fn with_viewport(mut self, viewport: Rect) -> Self {
        self.viewport = Some(viewport);
        self
    }

    pub fn scroll_to(mut self, scroll_y: f64) -> Self {
        self.scroll_y = Some(scroll_y);
        self
    }

    pub fn measure(mut self, region: RegionId, rect: Rect) -> Self {
        self.measurements.push(Measurement { region, rect });
        self
    }

    pub fn unmount(mut self, target: Unmount) -> Self {
        self.unmount.push(target);
        self
    }

    pub fn hover(mut self, marquee: MarqueeId, hovered: bool) -> Self {
        self.hover.push(HoverUpdate { marquee, hovered });
        self
    }
}
