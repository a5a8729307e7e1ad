//! ScrollFlag: a boolean that is true while the page is scrolled past a threshold.
//!
//! Used for the fixed header, which switches to its compact, opaque style
//! once the page has moved more than 50px. No hysteresis: the flag follows
//! `scroll_y > threshold_px` exactly and only reports changes.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollFlag {
    threshold_px: f64,
    scrolled: bool,
}

impl ScrollFlag {
    /// Starts unscrolled.
    pub fn new(threshold_px: f64) -> Self {
        Self {
            threshold_px,
            scrolled: false,
        }
    }

    pub fn threshold_px(&self) -> f64 {
        self.threshold_px
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    /// Feed the current vertical scroll position. Returns the new value when it flipped.
    /// Non-finite positions are ignored.
    pub fn update(&mut self, scroll_y: f64) -> Option<bool> {
        if !scroll_y.is_finite() {
            return None;
        }
        let scrolled = scroll_y > self.threshold_px;
        if scrolled == self.scrolled {
            return None;
        }
        self.scrolled = scrolled;
        Some(scrolled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flips_strictly_above_threshold() {
        let mut flag = ScrollFlag::new(50.0);
        assert_eq!(flag.update(0.0), None);
        assert_eq!(flag.update(50.0), None);
        assert_eq!(flag.update(50.5), Some(true));
        assert_eq!(flag.update(400.0), None);
        assert!(flag.is_scrolled());
        assert_eq!(flag.update(49.0), Some(false));
        assert_eq!(flag.update(51.0), Some(true));
    }

    #[test]
    fn nan_position_is_ignored() {
        let mut flag = ScrollFlag::new(50.0);
        flag.update(100.0);
        assert_eq!(flag.update(f64::NAN), None);
        assert!(flag.is_scrolled());
    }
}
