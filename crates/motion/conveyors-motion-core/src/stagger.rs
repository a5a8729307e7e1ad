//! Staggered entrance transitions for the children of a revealed section.
//!
//! Child `i` starts `delay_children_ms + i * stagger_children_ms` after the
//! reveal, then fades from transparent to opaque while sliding `offset_px`
//! back to its resting position over `item_duration_ms`.

use serde::{Deserialize, Serialize};

use crate::config::StaggerConfig;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntranceFrame {
    pub opacity: f64,
    pub translate_px: f64,
}

impl EntranceFrame {
    pub fn hidden(offset_px: f64) -> Self {
        Self {
            opacity: 0.0,
            translate_px: offset_px,
        }
    }

    pub const SETTLED: EntranceFrame = EntranceFrame {
        opacity: 1.0,
        translate_px: 0.0,
    };
}

#[derive(Clone, Debug)]
pub struct Entrance {
    cfg: StaggerConfig,
    children: usize,
    revealed_at: Option<f64>,
}

impl Entrance {
    pub fn new(children: usize, cfg: StaggerConfig) -> Self {
        Self {
            cfg,
            children,
            revealed_at: None,
        }
    }

    pub fn children(&self) -> usize {
        self.children
    }

    pub fn is_started(&self) -> bool {
        self.revealed_at.is_some()
    }

    /// Start at `now_ms`; later calls are ignored.
    pub fn start(&mut self, now_ms: f64) -> bool {
        if self.revealed_at.is_some() {
            return false;
        }
        self.revealed_at = Some(now_ms);
        true
    }

    pub fn child_delay_ms(&self, index: usize) -> f64 {
        f64::from(self.cfg.delay_children_ms) + index as f64 * f64::from(self.cfg.stagger_children_ms)
    }

    /// Milliseconds after the reveal at which the last child settles.
    pub fn total_duration_ms(&self) -> f64 {
        match self.children {
            0 => 0.0,
            n => self.child_delay_ms(n - 1) + f64::from(self.cfg.item_duration_ms),
        }
    }

    pub fn frame(&self, index: usize, now_ms: f64) -> EntranceFrame {
        let Some(revealed_at) = self.revealed_at else {
            return EntranceFrame::hidden(self.cfg.offset_px);
        };
        let local = now_ms - revealed_at - self.child_delay_ms(index);
        if local <= 0.0 {
            return EntranceFrame::hidden(self.cfg.offset_px);
        }
        let duration = f64::from(self.cfg.item_duration_ms);
        if duration <= 0.0 || local >= duration {
            return EntranceFrame::SETTLED;
        }
        let e = self.cfg.easing.apply(local / duration);
        EntranceFrame {
            opacity: e,
            translate_px: self.cfg.offset_px * (1.0 - e),
        }
    }

    pub fn frames(&self, now_ms: f64) -> Vec<EntranceFrame> {
        (0..self.children).map(|i| self.frame(i, now_ms)).collect()
    }

    pub fn is_settled(&self, now_ms: f64) -> bool {
        match self.revealed_at {
            Some(at) => now_ms - at >= self.total_duration_ms(),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;

    fn linear_cfg() -> StaggerConfig {
        StaggerConfig {
            delay_children_ms: 200,
            stagger_children_ms: 150,
            item_duration_ms: 600,
            offset_px: 20.0,
            easing: Easing::Linear,
        }
    }

    #[test]
    fn children_are_hidden_until_reveal() {
        let e = Entrance::new(3, linear_cfg());
        assert!(e
            .frames(10_000.0)
            .iter()
            .all(|f| *f == EntranceFrame::hidden(20.0)));
        assert!(!e.is_settled(10_000.0));
    }

    #[test]
    fn children_enter_in_stagger_order() {
        let mut e = Entrance::new(3, linear_cfg());
        e.start(1000.0);
        // 200ms delay + 300ms into child 0's 600ms transition.
        let f = e.frames(1500.0);
        assert_eq!(f[0].opacity, 0.5);
        assert_eq!(f[0].translate_px, 10.0);
        // Child 1 started 150ms later.
        assert_eq!(f[1].opacity, 0.25);
        // Child 2 starts at 500ms, not yet.
        assert_eq!(f[2], EntranceFrame::hidden(20.0));
    }

    #[test]
    fn settles_after_last_child() {
        let mut e = Entrance::new(4, linear_cfg());
        assert!(e.start(0.0));
        assert!(!e.start(50.0));
        assert_eq!(e.total_duration_ms(), 200.0 + 3.0 * 150.0 + 600.0);
        assert!(!e.is_settled(1249.0));
        assert!(e.is_settled(1250.0));
        assert!(e.frames(1250.0).iter().all(|f| *f == EntranceFrame::SETTLED));
    }
}
