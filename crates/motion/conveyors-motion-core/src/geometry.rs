//! Axis-aligned rectangles in CSS pixels.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Grow by `margin` on every side (shrink when negative), `rootMargin`-style.
    /// A rectangle shrunk past zero collapses to an empty one at its center.
    pub fn inflate(&self, margin: f64) -> Rect {
        let width = self.width + 2.0 * margin;
        let height = self.height + 2.0 * margin;
        if width <= 0.0 || height <= 0.0 {
            let cx = self.x + self.width / 2.0;
            let cy = self.y + self.height / 2.0;
            return Rect::new(cx, cy, 0.0, 0.0);
        }
        Rect::new(self.x - margin, self.y - margin, width, height)
    }

    /// Strict overlap test; touching edges and empty rectangles never intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_margin_shrinks_inward() {
        let vp = Rect::new(0.0, 0.0, 1000.0, 800.0).inflate(-100.0);
        assert_eq!(vp, Rect::new(100.0, 100.0, 800.0, 600.0));
    }

    #[test]
    fn over_shrunk_rect_is_empty() {
        let vp = Rect::new(0.0, 0.0, 100.0, 100.0).inflate(-80.0);
        assert!(vp.is_empty());
        assert!(!vp.intersects(&Rect::new(0.0, 0.0, 100.0, 100.0)));
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&Rect::new(9.5, 9.5, 1.0, 1.0)));
    }
}
