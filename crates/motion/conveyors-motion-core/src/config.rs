//! Motion configuration: timing presets passed explicitly into the engine.
//!
//! Defaults mirror the production site: sections reveal 100px inside the
//! viewport edge and only once, counters run for two seconds, and the
//! testimonial marquee shows four copies that cycle every forty seconds.

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::error::{MotionError, Result};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub reveal: RevealConfig,
    pub counter: CounterConfig,
    pub marquee: MarqueeConfig,
    pub stagger: StaggerConfig,
    pub scroll: ScrollConfig,
}

/// Viewport-visibility gating.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Grows the viewport test rectangle on every side; negative values shrink it.
    pub margin_px: f64,
    /// Detach after the first visible emission.
    pub once: bool,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            margin_px: -100.0,
            once: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    pub duration_ms: u32,
    pub easing: Easing,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            duration_ms: 2000,
            easing: Easing::EaseOutExpo,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarqueeConfig {
    pub repeat_factor: usize,
    pub cycle_duration_ms: u32,
    pub pause_on_hover: bool,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            repeat_factor: 4,
            cycle_duration_ms: 40_000,
            pause_on_hover: false,
        }
    }
}

/// Entrance orchestration for the children of a revealed section.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaggerConfig {
    pub delay_children_ms: u32,
    pub stagger_children_ms: u32,
    pub item_duration_ms: u32,
    /// Vertical distance each child travels while fading in.
    pub offset_px: f64,
    pub easing: Easing,
}

impl Default for StaggerConfig {
    fn default() -> Self {
        Self {
            delay_children_ms: 200,
            stagger_children_ms: 150,
            item_duration_ms: 600,
            offset_px: 20.0,
            easing: Easing::EaseOutCubic,
        }
    }
}

/// Page-scroll flags such as the header's compact style.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub threshold_px: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self { threshold_px: 50.0 }
    }
}

impl MotionConfig {
    /// Parse a (possibly partial) JSON config; missing fields take defaults.
    pub fn from_json(s: &str) -> Result<Self> {
        let cfg: MotionConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.reveal.margin_px.is_finite() {
            return Err(MotionError::InvalidConfig(
                "reveal.margin_px must be finite".into(),
            ));
        }
        let rf = self.marquee.repeat_factor;
        if rf < 2 || rf % 2 != 0 {
            return Err(MotionError::InvalidRepeatFactor(rf));
        }
        if self.marquee.cycle_duration_ms == 0 {
            return Err(MotionError::InvalidConfig(
                "marquee.cycle_duration_ms must be positive".into(),
            ));
        }
        if !self.stagger.offset_px.is_finite() {
            return Err(MotionError::InvalidConfig(
                "stagger.offset_px must be finite".into(),
            ));
        }
        if !self.scroll.threshold_px.is_finite() {
            return Err(MotionError::InvalidConfig(
                "scroll.threshold_px must be finite".into(),
            ));
        }
        Ok(())
    }
}
