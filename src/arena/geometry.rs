//! Axis-aligned rectangles.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle given by its top-left corner and size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[must_use]
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// A rectangle of `size` centered on `center`.
    #[must_use]
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size / 2.0,
            size,
        }
    }

    /// Bottom-right corner.
    #[must_use]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }

    /// Strict overlap test. Rectangles that only touch do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }

    /// Smallest move that takes `self` out of `other`, along one axis only.
    ///
    /// Returns `None` without overlap. The axis with the smaller
    /// penetration wins, ties go to y.
    #[must_use]
    pub fn separation(&self, other: &Rect) -> Option<Separation> {
        if !self.overlaps(other) {
            return None;
        }
        let (a_max, b_max) = (self.max(), other.max());
        let left = other.min.x - a_max.x;
        let right = b_max.x - self.min.x;
        let up = other.min.y - a_max.y;
        let down = b_max.y - self.min.y;

        let pick = |a: f32, b: f32| if a.abs() < b.abs() { a } else { b };
        let dx = pick(left, right);
        let dy = pick(up, down);
        Some(if left.abs().min(right.abs()) < up.abs().min(down.abs()) {
            Separation::X(dx)
        } else {
            Separation::Y(dy)
        })
    }
}

/// A single-axis push out of an overlap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Separation {
    X(f32),
    Y(f32),
}

/// Clamp that never panics: `hi` below `lo` yields `lo`.
#[must_use]
pub fn loose_clamp(value: f32, lo: f32, hi: f32) -> f32 {
    value.min(hi).max(lo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_is_strict() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(0.0, 20.0, 1.0, 1.0)));
    }

    #[test]
    fn test_centered() {
        let r = Rect::centered(Vec2::new(50.0, 50.0), Vec2::splat(24.0));
        assert_eq!(r.min, Vec2::new(38.0, 38.0));
        assert_eq!(r.center(), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_separation_picks_shallow_axis() {
        let wall = Rect::new(100.0, 0.0, 60.0, 500.0);
        let player = Rect::new(70.0, 200.0, 40.0, 40.0);
        assert_eq!(player.separation(&wall), Some(Separation::X(-10.0)));

        let floor = Rect::new(0.0, 300.0, 700.0, 60.0);
        let falling = Rect::new(100.0, 345.0, 40.0, 40.0);
        assert_eq!(falling.separation(&floor), Some(Separation::Y(15.0)));

        assert_eq!(player.separation(&floor), None);
    }

    #[test]
    fn test_loose_clamp() {
        assert_eq!(loose_clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(loose_clamp(-5.0, 0.0, 10.0), 0.0);
        assert_eq!(loose_clamp(5.0, 0.0, -10.0), 0.0);
    }
}
