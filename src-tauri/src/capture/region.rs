//! Region geometry — turning a pointer drag into a screen rectangle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A rectangle in snapshot (physical screen) pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Normalise a press/release pair into top-left + extents.
    ///
    /// Works for any drag direction. Points left of or above the screen
    /// origin are pulled back to 0.
    pub fn from_drag(start: (i32, i32), end: (i32, i32)) -> Self {
        let (x1, y1) = (start.0.max(0) as u32, start.1.max(0) as u32);
        let (x2, y2) = (end.0.max(0) as u32, end.1.max(0) as u32);
        Self {
            x: x1.min(x2),
            y: y1.min(y2),
            width: x1.abs_diff(x2),
            height: y1.abs_diff(y2),
        }
    }

    /// Map from webview pixels to snapshot pixels.
    ///
    /// The selector page shows the snapshot stretched over its viewport, so
    /// the factors are `snapshot_size / viewport_size` per axis. Edges are
    /// rounded outwards so a selection never loses a partial pixel row.
    pub fn scaled(self, sx: f64, sy: f64) -> Self {
        if !(sx.is_finite() && sy.is_finite() && sx > 0.0 && sy > 0.0) {
            return self;
        }
        let left = (self.x as f64 * sx).floor();
        let top = (self.y as f64 * sy).floor();
        let right = ((self.x + self.width) as f64 * sx).ceil();
        let bottom = ((self.y + self.height) as f64 * sy).ceil();
        Self {
            x: left as u32,
            y: top as u32,
            width: (right - left) as u32,
            height: (bottom - top) as u32,
        }
    }

    /// Trim to a `width` x `height` canvas.
    pub fn clamped_to(self, width: u32, height: u32) -> Self {
        let x = self.x.min(width);
        let y = self.y.min(height);
        Self {
            x,
            y,
            width: self.width.min(width - x),
            height: self.height.min(height - y),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} at {},{}", self.width, self.height, self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_direction_does_not_matter() {
        let expected = Region::new(10, 20, 90, 40);
        assert_eq!(Region::from_drag((10, 20), (100, 60)), expected);
        assert_eq!(Region::from_drag((100, 60), (10, 20)), expected);
        assert_eq!(Region::from_drag((100, 20), (10, 60)), expected);
        assert_eq!(Region::from_drag((10, 60), (100, 20)), expected);
    }

    #[test]
    fn click_without_drag_is_zero_sized() {
        let region = Region::from_drag((42, 7), (42, 7));
        assert_eq!(region, Region::new(42, 7, 0, 0));
        assert!(region.is_empty());
    }

    #[test]
    fn negative_points_clamp_to_origin() {
        assert_eq!(Region::from_drag((-5, -8), (20, 10)), Region::new(0, 0, 20, 10));
    }

    #[test]
    fn scaling_for_hidpi() {
        let region = Region::new(10, 10, 50, 25).scaled(2.0, 2.0);
        assert_eq!(region, Region::new(20, 20, 100, 50));
    }

    #[test]
    fn scaling_rounds_outwards() {
        let region = Region::new(1, 1, 1, 1).scaled(1.5, 1.5);
        assert_eq!(region, Region::new(1, 1, 2, 2));
    }

    #[test]
    fn bad_scale_is_ignored() {
        let region = Region::new(1, 2, 3, 4);
        assert_eq!(region.scaled(0.0, 1.0), region);
        assert_eq!(region.scaled(f64::NAN, 1.0), region);
    }

    #[test]
    fn clamp_trims_overhang() {
        assert_eq!(Region::new(90, 40, 50, 50).clamped_to(100, 60), Region::new(90, 40, 10, 20));
        assert_eq!(Region::new(200, 10, 5, 5).clamped_to(100, 60), Region::new(100, 10, 0, 5));
    }
}
