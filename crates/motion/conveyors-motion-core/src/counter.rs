//! AnimatedCounter: a statistic that counts up from zero once its section is revealed.
//!
//! Display strings such as `"2,500+"` are split once into a numeric target and
//! a verbatim suffix. After the trigger, each tick shows
//! `floor(target * ease(elapsed / duration))` with `,` grouping and the
//! suffix appended, settling on exactly the target.

use serde::{Deserialize, Serialize};

use crate::easing::Easing;

/// Largest target a counter accepts: `Number.MAX_SAFE_INTEGER`, so every
/// displayed value survives the trip to a JavaScript host exactly.
pub const MAX_TARGET: u64 = (1 << 53) - 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterSpec {
    pub target_value: u64,
    pub suffix: String,
    pub duration_ms: u32,
}

impl CounterSpec {
    /// Parse a display string. Leading digits (with `,` separators between
    /// digits) form the target; everything after is the suffix. Strings with
    /// no numeric prefix, or one above [`MAX_TARGET`], degrade to target 0
    /// with the whole string as suffix.
    pub fn parse(display: &str, duration_ms: u32) -> Self {
        match split_numeric_prefix(display) {
            Some((target_value, suffix)) => Self {
                target_value,
                suffix: suffix.to_string(),
                duration_ms,
            },
            None => {
                log::warn!("counter display {display:?} has no countable prefix; rendering as text");
                Self {
                    target_value: 0,
                    suffix: display.to_string(),
                    duration_ms,
                }
            }
        }
    }

    /// Degrade a hand-built spec whose target exceeds [`MAX_TARGET`] the same
    /// way `parse` does. Specs already in range are returned unchanged.
    pub fn bounded(self) -> Self {
        if self.target_value <= MAX_TARGET {
            return self;
        }
        let display = self.render(self.target_value);
        log::warn!("counter target {display:?} exceeds {MAX_TARGET}; rendering as text");
        Self {
            target_value: 0,
            suffix: display,
            duration_ms: self.duration_ms,
        }
    }

    /// Render `value` the way this counter displays it.
    pub fn render(&self, value: u64) -> String {
        let mut out = group_thousands(value);
        out.push_str(&self.suffix);
        out
    }
}

fn split_numeric_prefix(s: &str) -> Option<(u64, &str)> {
    let bytes = s.as_bytes();
    let mut value: u64 = 0;
    let mut digits = 0usize;
    let mut end = 0usize;
    let mut i = 0usize;
    while i < bytes.len() {
        let b = bytes[i];
        if b.is_ascii_digit() {
            value = value.checked_mul(10)?.checked_add(u64::from(b - b'0'))?;
            digits += 1;
            i += 1;
            end = i;
        } else if b == b',' && digits > 0 && bytes.get(i + 1).is_some_and(u8::is_ascii_digit) {
            i += 1;
        } else {
            break;
        }
    }
    if digits == 0 || value > MAX_TARGET {
        return None;
    }
    Some((value, &s[end..]))
}

/// `1234567` -> `"1,234,567"`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterPhase {
    Idle,
    Running,
    Done,
}

#[derive(Clone, Debug)]
pub struct AnimatedCounter {
    spec: CounterSpec,
    easing: Easing,
    phase: CounterPhase,
    current: u64,
    started_at: Option<f64>,
}

impl AnimatedCounter {
    pub fn new(spec: CounterSpec, easing: Easing) -> Self {
        Self {
            spec,
            easing,
            phase: CounterPhase::Idle,
            current: 0,
            started_at: None,
        }
    }

    pub fn spec(&self) -> &CounterSpec {
        &self.spec
    }

    pub fn phase(&self) -> CounterPhase {
        self.phase
    }

    pub fn started_at(&self) -> Option<f64> {
        self.started_at
    }

    /// Currently displayed integer.
    pub fn value(&self) -> u64 {
        self.current
    }

    /// Currently displayed text, e.g. `"1,204+"`.
    pub fn text(&self) -> String {
        self.spec.render(self.current)
    }

    /// Start counting at `now_ms`. Only the first call has any effect; the
    /// counter never restarts once running or done.
    pub fn trigger(&mut self, now_ms: f64) -> bool {
        if self.phase != CounterPhase::Idle {
            return false;
        }
        self.phase = CounterPhase::Running;
        self.started_at = Some(now_ms);
        log::debug!("counter started toward {}", self.spec.target_value);
        true
    }

    /// Advance to `now_ms`. Returns the new display value when it changed.
    pub fn tick(&mut self, now_ms: f64) -> Option<u64> {
        let started = match (self.phase, self.started_at) {
            (CounterPhase::Running, Some(started)) => started,
            _ => return None,
        };
        let elapsed = (now_ms - started).max(0.0);
        let target = self.spec.target_value;
        let duration = f64::from(self.spec.duration_ms);

        let next = if elapsed >= duration {
            self.phase = CounterPhase::Done;
            log::debug!("counter settled at {target}");
            target
        } else {
            let progress = self.easing.apply(elapsed / duration);
            let raw = (target as f64 * progress).floor() as u64;
            raw.min(target).max(self.current)
        };

        if next == self.current {
            return None;
        }
        self.current = next;
        Some(next)
    }
}

/// Lazily sample a counter every `frame_ms`.
///
/// Untriggered runs yield `0` forever (callers bound them with `take`).
/// Triggered runs yield from the start sample through the exact target and
/// then end. A non-positive `frame_ms` completes in one step.
pub fn run(spec: CounterSpec, easing: Easing, triggered: bool, frame_ms: f64) -> CounterRun {
    let mut counter = AnimatedCounter::new(spec, easing);
    if triggered {
        counter.trigger(0.0);
    }
    CounterRun {
        counter,
        now: 0.0,
        frame_ms: if frame_ms > 0.0 { frame_ms } else { f64::INFINITY },
        finished: false,
    }
}

#[derive(Clone, Debug)]
pub struct CounterRun {
    counter: AnimatedCounter,
    now: f64,
    frame_ms: f64,
    finished: bool,
}

impl CounterRun {
    pub fn counter(&self) -> &AnimatedCounter {
        &self.counter
    }
}

impl Iterator for CounterRun {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.finished {
            return None;
        }
        match self.counter.phase() {
            CounterPhase::Idle => Some(0),
            CounterPhase::Done => {
                self.finished = true;
                None
            }
            CounterPhase::Running => {
                self.counter.tick(self.now);
                self.now += self.frame_ms;
                Some(self.counter.value())
            }
        }
    }
}
