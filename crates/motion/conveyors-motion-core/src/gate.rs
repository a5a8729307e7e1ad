//! VisibilityGate: one-shot (or transition-tracking) viewport reveal detection.

use serde::{Deserialize, Serialize};

use crate::config::RevealConfig;
use crate::geometry::Rect;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealState {
    #[default]
    Unseen,
    /// Terminal for the region's lifetime.
    Visible,
}

#[derive(Clone, Debug)]
pub struct VisibilityGate {
    margin_px: f64,
    once: bool,
    state: RevealState,
    last: Option<bool>,
    attached: bool,
}

impl VisibilityGate {
    pub fn new(margin_px: f64, once: bool) -> Self {
        Self {
            margin_px,
            once,
            state: RevealState::Unseen,
            last: None,
            attached: true,
        }
    }

    pub fn from_config(cfg: &RevealConfig) -> Self {
        Self::new(cfg.margin_px, cfg.once)
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn is_once(&self) -> bool {
        self.once
    }

    pub fn margin_px(&self) -> f64 {
        self.margin_px
    }

    /// False once the gate has detached; a detached gate never emits again.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Feed one geometry measurement. Returns an emission when visibility
    /// changed: `Some(true)` the first time the region intersects the
    /// margin-adjusted viewport, and (non-one-shot gates only) later
    /// `Some(false)`/`Some(true)` transitions.
    pub fn measure(&mut self, region: &Rect, viewport: &Rect) -> Option<bool> {
        if !self.attached {
            return None;
        }
        let visible = region.intersects(&viewport.inflate(self.margin_px));
        self.record(visible)
    }

    /// Emit as if the region became visible, regardless of geometry.
    pub fn force_visible(&mut self) -> Option<bool> {
        if !self.attached {
            return None;
        }
        self.record(true)
    }

    /// Detach without firing. Returns whether the gate was still attached.
    pub fn detach(&mut self) -> bool {
        std::mem::replace(&mut self.attached, false)
    }

    fn record(&mut self, visible: bool) -> Option<bool> {
        if self.last == Some(visible) {
            return None;
        }
        let first = self.last.is_none();
        self.last = Some(visible);
        // An off-screen region at mount is the resting state, not a transition.
        if first && !visible {
            return None;
        }
        if visible {
            self.state = RevealState::Visible;
            if self.once {
                self.attached = false;
            }
        }
        Some(visible)
    }
}

/// Lazily replays a sequence of region measurements against a fixed viewport,
/// yielding the gate's emissions. Ends early once a one-shot gate detaches.
pub fn observe<I>(samples: I, viewport: Rect, margin_px: f64, once: bool) -> Observation<I::IntoIter>
where
    I: IntoIterator<Item = Rect>,
{
    Observation {
        gate: VisibilityGate::new(margin_px, once),
        viewport,
        samples: samples.into_iter(),
    }
}

#[derive(Debug)]
pub struct Observation<I> {
    gate: VisibilityGate,
    viewport: Rect,
    samples: I,
}

impl<I> Observation<I> {
    pub fn gate(&self) -> &VisibilityGate {
        &self.gate
    }
}

impl<I: Iterator<Item = Rect>> Iterator for Observation<I> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        while self.gate.is_attached() {
            let region = self.samples.next()?;
            if let Some(emitted) = self.gate.measure(&region, &self.viewport) {
                return Some(emitted);
            }
        }
        None
    }
}
