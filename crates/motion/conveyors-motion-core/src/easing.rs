//! Timing curves shared by counters, entrances and marquees.
//!
//! Every curve maps normalized time `t ∈ [0, 1]` to progress in `[0, 1]`,
//! hits both endpoints exactly and is monotonic non-decreasing. No curve may
//! overshoot 1.0; counters never display a value above their target.

use serde::{Deserialize, Serialize};

/// Linear interpolation of scalars.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    EaseOutCubic,
    EaseOutQuart,
    /// Fast start, long settle; the default for statistic counters.
    #[default]
    EaseOutExpo,
    EaseInOutCubic,
}

impl Easing {
    /// Progress for normalized time `t`. Inputs outside `[0, 1]` (and NaN) are clamped.
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let eased = match self {
            Easing::Linear => t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseOutQuart => 1.0 - (1.0 - t).powi(4),
            Easing::EaseOutExpo => {
                if t >= 1.0 {
                    1.0
                } else {
                    // Renormalized so apply(0) == 0 exactly.
                    let raw = 1.0 - 2f64.powf(-10.0 * t);
                    raw / (1.0 - 2f64.powi(-10))
                }
            }
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        };
        eased.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 5] = [
        Easing::Linear,
        Easing::EaseOutCubic,
        Easing::EaseOutQuart,
        Easing::EaseOutExpo,
        Easing::EaseInOutCubic,
    ];

    #[test]
    fn endpoints_are_exact() {
        for e in ALL {
            assert_eq!(e.apply(0.0), 0.0, "{e:?} at 0");
            assert_eq!(e.apply(1.0), 1.0, "{e:?} at 1");
        }
    }

    #[test]
    fn curves_are_monotonic() {
        for e in ALL {
            let mut prev = 0.0;
            for i in 0..=1000 {
                let v = e.apply(i as f64 / 1000.0);
                assert!(v >= prev, "{e:?} decreased at step {i}: {v} < {prev}");
                prev = v;
            }
        }
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        assert_eq!(Easing::EaseOutCubic.apply(-3.0), 0.0);
        assert_eq!(Easing::EaseOutCubic.apply(7.5), 1.0);
        assert_eq!(Easing::Linear.apply(f64::NAN), 0.0);
    }

    #[test]
    fn serde_names_are_snake_case() {
        let s = serde_json::to_string(&Easing::EaseOutExpo).unwrap();
        assert_eq!(s, "\"ease_out_expo\"");
        let e: Easing = serde_json::from_str("\"ease_in_out_cubic\"").unwrap();
        assert_eq!(e, Easing::EaseInOutCubic);
    }
}
