//! Output contracts from the motion engine.
//!
//! Outputs carry only what changed this frame, plus an ordered list of
//! semantic events. Within one frame a region's `Revealed` event is always
//! recorded before any `CounterStarted` for counters bound to it.

use serde::{Deserialize, Serialize};

use crate::ids::{CounterId, MarqueeId, RegionId, ScrollFlagId};
use crate::stagger::EntranceFrame;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Change {
    Counter {
        counter: CounterId,
        value: u64,
        text: String,
    },
    Entrance {
        region: RegionId,
        child: usize,
        frame: EntranceFrame,
    },
    Marquee {
        marquee: MarqueeId,
        offset_percent: f64,
    },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum MotionEvent {
    Revealed { region: RegionId },
    /// Only emitted by regions mounted with `once: false`.
    Hidden { region: RegionId },
    /// The host could not observe this region; it was revealed immediately.
    ObserverUnavailable { region: RegionId },
    CounterStarted { counter: CounterId, region: RegionId },
    CounterFinished { counter: CounterId, value: u64 },
    EntranceSettled { region: RegionId },
    ScrollFlagChanged { flag: ScrollFlagId, scrolled: bool },
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    pub changes: Vec<Change>,
    pub events: Vec<MotionEvent>,
}

impl Outputs {
    pub fn clear(&mut self) {
        self.changes.clear();
        self.events.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.events.is_empty()
    }

    pub fn counter_text(&self, counter: CounterId) -> Option<&str> {
        self.changes.iter().rev().find_map(|c| match c {
            Change::Counter {
                counter: id, text, ..
            } if *id == counter => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn marquee_offset(&self, marquee: MarqueeId) -> Option<f64> {
        self.changes.iter().rev().find_map(|c| match c {
            Change::Marquee {
                marquee: id,
                offset_percent,
            } if *id == marquee => Some(*offset_percent),
            _ => None,
        })
    }

    pub fn touches_counter(&self, counter: CounterId) -> bool {
        self.changes
            .iter()
            .any(|c| matches!(c, Change::Counter { counter: id, .. } if *id == counter))
            || self.events.iter().any(|e| {
                matches!(e,
                    MotionEvent::CounterStarted { counter: id, .. }
                    | MotionEvent::CounterFinished { counter: id, .. } if *id == counter)
            })
    }
}
