//! Handles returned by the engine's `mount_*` calls.

use serde::{Deserialize, Serialize};

/// A section whose visibility gates its counters and entrance.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct RegionId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct CounterId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct MarqueeId(pub u32);

/// A page-scroll threshold, e.g. the header's "scrolled" styling.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct ScrollFlagId(pub u32);

/// Hands out handles per kind, counting up from zero. Handles are not
/// recycled: after an unmount the old handle resolves to nothing.
#[derive(Default, Debug)]
pub struct IdAllocator {
    regions: u32,
    counters: u32,
    marquees: u32,
    scroll_flags: u32,
}

fn bump(slot: &mut u32) -> u32 {
    let id = *slot;
    *slot = slot.wrapping_add(1);
    id
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc_region(&mut self) -> RegionId {
        RegionId(bump(&mut self.regions))
    }

    pub fn alloc_counter(&mut self) -> CounterId {
        CounterId(bump(&mut self.counters))
    }

    pub fn alloc_marquee(&mut self) -> MarqueeId {
        MarqueeId(bump(&mut self.marquees))
    }

    pub fn alloc_scroll_flag(&mut self) -> ScrollFlagId {
        ScrollFlagId(bump(&mut self.scroll_flags))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_count_independently() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.alloc_region(), RegionId(0));
        assert_eq!(ids.alloc_counter(), CounterId(0));
        assert_eq!(ids.alloc_region(), RegionId(1));
        assert_eq!(ids.alloc_marquee(), MarqueeId(0));
        assert_eq!(ids.alloc_scroll_flag(), ScrollFlagId(0));
        assert_eq!(ids.alloc_counter(), CounterId(1));
    }

    #[test]
    fn handles_serialize_as_bare_numbers() {
        assert_eq!(serde_json::to_string(&RegionId(7)).unwrap(), "7");
        let flag: ScrollFlagId = serde_json::from_str("3").unwrap();
        assert_eq!(flag, ScrollFlagId(3));
    }
}
