//! Conveyors Motion Core (host-agnostic)
//!
//! Runtime behaviour behind the marketing site's scroll effects: one-shot
//! viewport reveals, statistic counters that tick up once revealed, staggered
//! section entrances, the seamless testimonial marquee, and page-scroll
//! flags for the fixed header. Hosts (the wasm
//! adapter, or any frame-driven Rust UI) mount components on an [`Engine`]
//! and call [`Engine::update`] from their animation-frame callback.

pub mod config;
pub mod counter;
pub mod easing;
pub mod engine;
pub mod error;
pub mod gate;
pub mod geometry;
pub mod ids;
pub mod inputs;
pub mod marquee;
pub mod observer;
pub mod outputs;
pub mod scroll;
pub mod stagger;

// Re-exports for consumers (adapters)
pub use config::{
    CounterConfig, MarqueeConfig, MotionConfig, RevealConfig, ScrollConfig, StaggerConfig,
};
pub use counter::{group_thousands, AnimatedCounter, CounterPhase, CounterSpec, MAX_TARGET};
pub use easing::Easing;
pub use engine::{Engine, RegionOptions};
pub use error::MotionError;
pub use gate::{RevealState, VisibilityGate};
pub use geometry::Rect;
pub use ids::{CounterId, MarqueeId, RegionId, ScrollFlagId};
pub use inputs::{HoverUpdate, Inputs, Measurement, Unmount};
pub use marquee::{MarqueeClock, MarqueeTrack};
pub use observer::{ManualObserver, Observer, UnavailableObserver};
pub use outputs::{Change, MotionEvent, Outputs};
pub use scroll::ScrollFlag;
pub use stagger::{Entrance, EntranceFrame};
