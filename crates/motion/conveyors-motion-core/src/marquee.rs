//! Marquee: an endless, constant-velocity horizontal scroll of repeated cards.
//!
//! The base sequence is rendered `repeat_factor` times and translated from 0%
//! to `-100 / repeat_factor * (repeat_factor / 2)`% of the track width, which
//! is always -50%. With an even repeat factor that end offset sits exactly
//! `repeat_factor / 2` copies in, on a repeat boundary, so the wrap back to 0%
//! is pixel-identical.

use crate::config::MarqueeConfig;
use crate::easing::{lerp, Easing};
use crate::error::{MotionError, Result};

pub const DEFAULT_REPEAT_FACTOR: usize = 4;

#[derive(Clone, Debug, PartialEq)]
pub struct MarqueeTrack<C> {
    base: Vec<C>,
    repeat_factor: usize,
    cycle_duration_ms: u32,
}

/// Build the default four-copy track.
pub fn render<C: Clone>(base: &[C], cycle_duration_ms: u32) -> MarqueeTrack<C> {
    MarqueeTrack {
        base: base.to_vec(),
        repeat_factor: DEFAULT_REPEAT_FACTOR,
        cycle_duration_ms,
    }
}

impl<C> MarqueeTrack<C> {
    pub fn new(base: Vec<C>, repeat_factor: usize, cycle_duration_ms: u32) -> Result<Self> {
        if repeat_factor < 2 || repeat_factor % 2 != 0 {
            return Err(MotionError::InvalidRepeatFactor(repeat_factor));
        }
        Ok(Self {
            base,
            repeat_factor,
            cycle_duration_ms,
        })
    }

    pub fn with_config(base: Vec<C>, cfg: &MarqueeConfig) -> Result<Self> {
        Self::new(base, cfg.repeat_factor, cfg.cycle_duration_ms)
    }

    pub fn base(&self) -> &[C] {
        &self.base
    }

    pub fn repeat_factor(&self) -> usize {
        self.repeat_factor
    }

    pub fn cycle_duration_ms(&self) -> u32 {
        self.cycle_duration_ms
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    pub fn rendered_len(&self) -> usize {
        self.base.len() * self.repeat_factor
    }

    /// The rendered sequence: the base repeated `repeat_factor` times.
    /// Empty when the base is empty.
    pub fn rendered(&self) -> impl Iterator<Item = &C> + '_ {
        self.base.iter().cycle().take(self.rendered_len())
    }

    pub fn get(&self, index: usize) -> Option<&C> {
        if index >= self.rendered_len() {
            return None;
        }
        self.base.get(index % self.base.len())
    }

    /// End-of-cycle translation in percent of the rendered track width.
    pub fn loop_offset_percent(&self) -> f64 {
        let rf = self.repeat_factor as f64;
        -100.0 / rf * (self.repeat_factor / 2) as f64
    }

    /// Rendered index that sits at the left edge when a cycle ends.
    pub fn loop_index(&self) -> usize {
        self.base.len() * (self.repeat_factor / 2)
    }

    /// Whether `index` starts a fresh copy of the base sequence.
    pub fn is_repeat_boundary(&self, index: usize) -> bool {
        !self.base.is_empty() && index <= self.rendered_len() && index % self.base.len() == 0
    }

    /// Linear translation (percent) after `elapsed_ms`, wrapping every cycle.
    pub fn offset_percent_at(&self, elapsed_ms: f64) -> f64 {
        if self.base.is_empty() || self.cycle_duration_ms == 0 || !elapsed_ms.is_finite() {
            return 0.0;
        }
        let cycle = f64::from(self.cycle_duration_ms);
        let phase = elapsed_ms.rem_euclid(cycle) / cycle;
        lerp(0.0, self.loop_offset_percent(), Easing::Linear.apply(phase))
    }
}

/// Convert a percent offset into pixels for a measured track width.
pub fn offset_px(percent: f64, track_width_px: f64) -> f64 {
    percent / 100.0 * track_width_px
}

/// Wall clock for a running marquee, optionally frozen while hovered.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MarqueeClock {
    elapsed_ms: f64,
    cycle_ms: f64,
    pause_on_hover: bool,
    hovered: bool,
}

impl MarqueeClock {
    pub fn new(cycle_duration_ms: u32, pause_on_hover: bool) -> Self {
        Self {
            elapsed_ms: 0.0,
            cycle_ms: f64::from(cycle_duration_ms),
            pause_on_hover,
            hovered: false,
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub fn is_paused(&self) -> bool {
        self.pause_on_hover && self.hovered
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    /// Advance by `dt_ms`; elapsed time is kept within one cycle.
    pub fn advance(&mut self, dt_ms: f64) {
        if self.is_paused() || !(dt_ms > 0.0) || !dt_ms.is_finite() {
            return;
        }
        self.elapsed_ms += dt_ms;
        if self.cycle_ms > 0.0 {
            self.elapsed_ms = self.elapsed_ms.rem_euclid(self.cycle_ms);
        }
    }
}
