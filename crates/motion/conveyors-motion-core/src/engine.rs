//! Engine: owns every mounted gate, counter, entrance and marquee, and steps
//! them once per host frame.
//!
//! Methods:
//! - new, mount_region, mount_counter, mount_entrance, mount_marquee,
//!   mount_scroll_flag, unmount_*, update (unmounts → hover → geometry →
//!   scroll flags → gates → counters → entrances → marquees)

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::config::MotionConfig;
use crate::counter::{AnimatedCounter, CounterPhase, CounterSpec};
use crate::error::{MotionError, Result};
use crate::gate::{RevealState, VisibilityGate};
use crate::geometry::Rect;
use crate::ids::{CounterId, IdAllocator, MarqueeId, RegionId, ScrollFlagId};
use crate::inputs::{Inputs, Unmount};
use crate::marquee::{MarqueeClock, MarqueeTrack};
use crate::observer::{ManualObserver, Observer};
use crate::outputs::{Change, MotionEvent, Outputs};
use crate::scroll::ScrollFlag;
use crate::stagger::{Entrance, EntranceFrame};

/// Per-region overrides of the configured reveal behaviour.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct RegionOptions {
    #[serde(default)]
    pub margin_px: Option<f64>,
    #[serde(default)]
    pub once: Option<bool>,
}

#[derive(Debug)]
struct Region {
    gate: VisibilityGate,
    observing: bool,
    fail_open: bool,
    rect: Option<Rect>,
    counters: Vec<CounterId>,
    entrance: Option<EntranceSlot>,
}

#[derive(Debug)]
struct EntranceSlot {
    entrance: Entrance,
    last: Vec<EntranceFrame>,
    settled: bool,
}

#[derive(Debug)]
struct CounterSlot {
    region: RegionId,
    counter: AnimatedCounter,
}

#[derive(Debug)]
struct MarqueeSlot {
    track: MarqueeTrack<usize>,
    clock: MarqueeClock,
    last_offset: Option<f64>,
}

#[derive(Debug)]
pub struct Engine {
    cfg: MotionConfig,
    ids: IdAllocator,
    observer: Box<dyn Observer>,

    viewport: Option<Rect>,
    scroll_y: Option<f64>,
    now_ms: f64,

    regions: HashMap<RegionId, Region>,
    counters: HashMap<CounterId, CounterSlot>,
    marquees: HashMap<MarqueeId, MarqueeSlot>,
    scroll_flags: HashMap<ScrollFlagId, ScrollFlag>,

    // Per-frame outputs
    outputs: Outputs,
}

fn sorted_keys<K: Copy + Ord, V>(map: &HashMap<K, V>) -> Vec<K> {
    let mut keys: Vec<K> = map.keys().copied().collect();
    keys.sort_unstable();
    keys
}

impl Engine {
    /// Build an engine; `cfg` is validated first.
    pub fn new(cfg: MotionConfig, observer: Box<dyn Observer>) -> Result<Self> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            ids: IdAllocator::new(),
            observer,
            viewport: None,
            scroll_y: None,
            now_ms: 0.0,
            regions: HashMap::new(),
            counters: HashMap::new(),
            marquees: HashMap::new(),
            scroll_flags: HashMap::new(),
            outputs: Outputs::default(),
        })
    }

    /// Engine for hosts that push all geometry through [`Inputs`].
    pub fn with_manual_observer(cfg: MotionConfig) -> Result<Self> {
        Self::new(cfg, Box::new(ManualObserver))
    }

    pub fn config(&self) -> &MotionConfig {
        &self.cfg
    }

    /// Engine clock: the sum of every `dt_ms` passed to [`Engine::update`].
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn outputs(&self) -> &Outputs {
        &self.outputs
    }

    /// Start tracking a region. If the host cannot observe it, the region
    /// fails open and is revealed on the next update. A non-finite margin
    /// override is replaced by the configured margin.
    pub fn mount_region(&mut self, opts: RegionOptions) -> RegionId {
        let id = self.ids.alloc_region();
        let margin_px = match opts.margin_px {
            Some(m) if m.is_finite() => m,
            Some(m) => {
                log::warn!("region {id:?} margin {m} is not finite; using the configured margin");
                self.cfg.reveal.margin_px
            }
            None => self.cfg.reveal.margin_px,
        };
        let once = opts.once.unwrap_or(self.cfg.reveal.once);

        let (observing, fail_open) = match self.observer.observe(id, margin_px) {
            Ok(()) => (true, false),
            Err(err) => {
                log::warn!("region {id:?} cannot be observed ({err}); revealing immediately");
                (false, true)
            }
        };

        self.regions.insert(
            id,
            Region {
                gate: VisibilityGate::new(margin_px, once),
                observing,
                fail_open,
                rect: None,
                counters: Vec::new(),
                entrance: None,
            },
        );
        id
    }

    /// Mount a counter parsed from a display string such as `"2,500+"`.
    pub fn mount_counter(
        &mut self,
        region: RegionId,
        display: &str,
        duration_ms: Option<u32>,
    ) -> Result<CounterId> {
        let duration_ms = duration_ms.unwrap_or(self.cfg.counter.duration_ms);
        self.mount_counter_spec(region, CounterSpec::parse(display, duration_ms))
    }

    pub fn mount_counter_spec(&mut self, region: RegionId, spec: CounterSpec) -> Result<CounterId> {
        let now = self.now_ms;
        let easing = self.cfg.counter.easing;
        let reg = self
            .regions
            .get_mut(&region)
            .ok_or(MotionError::UnknownRegion(region))?;

        let id = self.ids.alloc_counter();
        let mut counter = AnimatedCounter::new(spec.bounded(), easing);
        // Mounted into a section that has already been revealed.
        if reg.gate.state() == RevealState::Visible {
            counter.trigger(now);
        }
        reg.counters.push(id);
        self.counters.insert(id, CounterSlot { region, counter });
        Ok(id)
    }

    /// Attach a staggered entrance for `children` items of a region.
    pub fn mount_entrance(&mut self, region: RegionId, children: usize) -> Result<()> {
        let now = self.now_ms;
        let cfg = self.cfg.stagger;
        let reg = self
            .regions
            .get_mut(&region)
            .ok_or(MotionError::UnknownRegion(region))?;
        let mut entrance = Entrance::new(children, cfg);
        if reg.gate.state() == RevealState::Visible {
            entrance.start(now);
        }
        reg.entrance = Some(EntranceSlot {
            last: entrance.frames(now),
            entrance,
            settled: false,
        });
        Ok(())
    }

    /// Mount a marquee over `card_count` base cards. The rendered sequence
    /// is expressed as base-card indices.
    pub fn mount_marquee(&mut self, card_count: usize, cycle_duration_ms: Option<u32>) -> Result<MarqueeId> {
        let cycle = cycle_duration_ms.unwrap_or(self.cfg.marquee.cycle_duration_ms);
        if cycle == 0 {
            return Err(MotionError::InvalidConfig(
                "marquee cycle duration must be positive".into(),
            ));
        }
        let track = MarqueeTrack::new(
            (0..card_count).collect(),
            self.cfg.marquee.repeat_factor,
            cycle,
        )?;
        let id = self.ids.alloc_marquee();
        self.marquees.insert(
            id,
            MarqueeSlot {
                track,
                clock: MarqueeClock::new(cycle, self.cfg.marquee.pause_on_hover),
                last_offset: None,
            },
        );
        Ok(id)
    }

    /// Unmount a region, its counters and its entrance, releasing the
    /// host observation if it is still held.
    pub fn unmount_region(&mut self, region: RegionId) -> Result<()> {
        let reg = self
            .regions
            .remove(&region)
            .ok_or(MotionError::UnknownRegion(region))?;
        if reg.observing {
            self.observer.unobserve(region);
        }
        for counter in reg.counters {
            self.counters.remove(&counter);
        }
        log::debug!("region {region:?} unmounted");
        Ok(())
    }

    pub fn unmount_counter(&mut self, counter: CounterId) -> Result<()> {
        let slot = self
            .counters
            .remove(&counter)
            .ok_or(MotionError::UnknownCounter(counter))?;
        if let Some(reg) = self.regions.get_mut(&slot.region) {
            reg.counters.retain(|c| *c != counter);
        }
        Ok(())
    }

    pub fn unmount_marquee(&mut self, marquee: MarqueeId) -> Result<()> {
        self.marquees
            .remove(&marquee)
            .map(|_| ())
            .ok_or(MotionError::UnknownMarquee(marquee))
    }

    /// Track whether the page is scrolled past `threshold_px` (the configured
    /// threshold when `None`). Changes are reported as
    /// [`MotionEvent::ScrollFlagChanged`].
    pub fn mount_scroll_flag(&mut self, threshold_px: Option<f64>) -> Result<ScrollFlagId> {
        let threshold = threshold_px.unwrap_or(self.cfg.scroll.threshold_px);
        if !threshold.is_finite() {
            return Err(MotionError::InvalidConfig(format!(
                "scroll threshold must be finite, got {threshold}"
            )));
        }
        let id = self.ids.alloc_scroll_flag();
        self.scroll_flags.insert(id, ScrollFlag::new(threshold));
        Ok(id)
    }

    pub fn unmount_scroll_flag(&mut self, flag: ScrollFlagId) -> Result<()> {
        self.scroll_flags
            .remove(&flag)
            .map(|_| ())
            .ok_or(MotionError::UnknownScrollFlag(flag))
    }

    pub fn is_scrolled(&self, flag: ScrollFlagId) -> Option<bool> {
        self.scroll_flags.get(&flag).map(ScrollFlag::is_scrolled)
    }

    pub fn reveal_state(&self, region: RegionId) -> Option<RevealState> {
        self.regions.get(&region).map(|r| r.gate.state())
    }

    /// Whether the host observation for `region` is still held.
    pub fn is_observing(&self, region: RegionId) -> bool {
        self.regions.get(&region).is_some_and(|r| r.observing)
    }

    pub fn counter_value(&self, counter: CounterId) -> Option<u64> {
        self.counters.get(&counter).map(|c| c.counter.value())
    }

    pub fn counter_text(&self, counter: CounterId) -> Option<String> {
        self.counters.get(&counter).map(|c| c.counter.text())
    }

    pub fn counter_phase(&self, counter: CounterId) -> Option<CounterPhase> {
        self.counters.get(&counter).map(|c| c.counter.phase())
    }

    pub fn entrance_frames(&self, region: RegionId) -> Option<Vec<EntranceFrame>> {
        let reg = self.regions.get(&region)?;
        reg.entrance
            .as_ref()
            .map(|slot| slot.entrance.frames(self.now_ms))
    }

    pub fn marquee_track(&self, marquee: MarqueeId) -> Option<&MarqueeTrack<usize>> {
        self.marquees.get(&marquee).map(|m| &m.track)
    }

    pub fn marquee_offset(&self, marquee: MarqueeId) -> Option<f64> {
        self.marquees
            .get(&marquee)
            .map(|m| m.track.offset_percent_at(m.clock.elapsed_ms()))
    }

    /// Step the engine by `dt_ms` with this frame's inputs.
    pub fn update(&mut self, dt_ms: f64, inputs: Inputs) -> &Outputs {
        self.outputs.clear();
        if dt_ms.is_finite() && dt_ms > 0.0 {
            self.now_ms += dt_ms;
        }

        for target in inputs.unmount {
            let res = match target {
                Unmount::Region(id) => self.unmount_region(id),
                Unmount::Counter(id) => self.unmount_counter(id),
                Unmount::Marquee(id) => self.unmount_marquee(id),
                Unmount::ScrollFlag(id) => self.unmount_scroll_flag(id),
            };
            if let Err(err) = res {
                log::debug!("ignoring unmount: {err}");
            }
        }

        for hover in inputs.hover {
            if let Some(slot) = self.marquees.get_mut(&hover.marquee) {
                slot.clock.set_hovered(hover.hovered);
            }
        }

        if let Some(vp) = inputs.viewport {
            self.viewport = Some(vp);
        }
        if let Some(y) = inputs.scroll_y {
            self.scroll_y = Some(y);
        }
        for m in inputs.measurements {
            if let Some(reg) = self.regions.get_mut(&m.region) {
                reg.rect = Some(m.rect);
            }
        }

        self.step_scroll_flags();
        self.step_gates();
        self.step_counters();
        self.step_entrances();
        self.step_marquees(dt_ms);

        &self.outputs
    }

    fn step_scroll_flags(&mut self) {
        let Some(y) = self.scroll_y else {
            return;
        };
        for id in sorted_keys(&self.scroll_flags) {
            let Some(flag) = self.scroll_flags.get_mut(&id) else {
                continue;
            };
            if let Some(scrolled) = flag.update(y) {
                self.outputs
                    .events
                    .push(MotionEvent::ScrollFlagChanged { flag: id, scrolled });
            }
        }
    }

    fn step_gates(&mut self) {
        let now = self.now_ms;
        for id in sorted_keys(&self.regions) {
            let Some(reg) = self.regions.get_mut(&id) else {
                continue;
            };

            let emission = if reg.fail_open {
                reg.fail_open = false;
                self.outputs
                    .events
                    .push(MotionEvent::ObserverUnavailable { region: id });
                reg.gate.force_visible()
            } else {
                match (self.viewport, reg.rect) {
                    (Some(vp), Some(rect)) => reg.gate.measure(&rect, &vp),
                    _ => None,
                }
            };

            match emission {
                Some(true) => {
                    log::debug!("region {id:?} revealed");
                    self.outputs.events.push(MotionEvent::Revealed { region: id });
                    if reg.observing && !reg.gate.is_attached() {
                        self.observer.unobserve(id);
                        reg.observing = false;
                    }
                    for counter in &reg.counters {
                        if let Some(slot) = self.counters.get_mut(counter) {
                            if slot.counter.trigger(now) {
                                self.outputs.events.push(MotionEvent::CounterStarted {
                                    counter: *counter,
                                    region: id,
                                });
                            }
                        }
                    }
                    if let Some(slot) = reg.entrance.as_mut() {
                        slot.entrance.start(now);
                    }
                }
                Some(false) => {
                    self.outputs.events.push(MotionEvent::Hidden { region: id });
                }
                None => {}
            }
        }
    }

    fn step_counters(&mut self) {
        let now = self.now_ms;
        for id in sorted_keys(&self.counters) {
            let Some(slot) = self.counters.get_mut(&id) else {
                continue;
            };
            let was_running = slot.counter.phase() == CounterPhase::Running;
            if let Some(value) = slot.counter.tick(now) {
                self.outputs.changes.push(Change::Counter {
                    counter: id,
                    value,
                    text: slot.counter.text(),
                });
            }
            if was_running && slot.counter.phase() == CounterPhase::Done {
                self.outputs.events.push(MotionEvent::CounterFinished {
                    counter: id,
                    value: slot.counter.value(),
                });
            }
        }
    }

    fn step_entrances(&mut self) {
        let now = self.now_ms;
        for id in sorted_keys(&self.regions) {
            let Some(slot) = self.regions.get_mut(&id).and_then(|r| r.entrance.as_mut()) else {
                continue;
            };
            if slot.settled || !slot.entrance.is_started() {
                continue;
            }
            let frames = slot.entrance.frames(now);
            for (child, (frame, last)) in frames.iter().zip(slot.last.iter()).enumerate() {
                if frame != last {
                    self.outputs.changes.push(Change::Entrance {
                        region: id,
                        child,
                        frame: *frame,
                    });
                }
            }
            slot.last = frames;
            if slot.entrance.is_settled(now) {
                slot.settled = true;
                self.outputs
                    .events
                    .push(MotionEvent::EntranceSettled { region: id });
            }
        }
    }

    fn step_marquees(&mut self, dt_ms: f64) {
        for id in sorted_keys(&self.marquees) {
            let Some(slot) = self.marquees.get_mut(&id) else {
                continue;
            };
            slot.clock.advance(dt_ms);
            let offset = slot.track.offset_percent_at(slot.clock.elapsed_ms());
            if slot.last_offset != Some(offset) {
                slot.last_offset = Some(offset);
                self.outputs.changes.push(Change::Marquee {
                    marquee: id,
                    offset_percent: offset,
                });
            }
        }
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        for (id, reg) in self.regions.iter_mut() {
            if reg.observing {
                self.observer.unobserve(*id);
                reg.observing = false;
            }
        }
    }
}
