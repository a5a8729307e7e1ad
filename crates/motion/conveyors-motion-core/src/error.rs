//! Error type for engine API misuse and configuration loading.
//!
//! Rendering degradations (unparseable counter strings, empty marquees, a host
//! without viewport observation) are absorbed locally and never show up here.

use thiserror::Error;

use crate::ids::{CounterId, MarqueeId, RegionId, ScrollFlagId};

#[derive(Debug, Error)]
pub enum MotionError {
    #[error("unknown region {0:?}")]
    UnknownRegion(RegionId),
    #[error("unknown counter {0:?}")]
    UnknownCounter(CounterId),
    #[error("unknown marquee {0:?}")]
    UnknownMarquee(MarqueeId),
    #[error("unknown scroll flag {0:?}")]
    UnknownScrollFlag(ScrollFlagId),
    #[error("marquee repeat factor must be an even number >= 2, got {0}")]
    InvalidRepeatFactor(usize),
    #[error("invalid motion config: {0}")]
    InvalidConfig(String),
    #[error("viewport observation is unavailable in this host")]
    ObserverUnavailable,
    #[error("motion config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

pub type Result<T, E = MotionError> = std::result::Result<T, E>;
