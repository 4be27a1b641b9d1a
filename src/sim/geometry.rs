//! Axis-aligned collision tests
//!
//! The circle test is the cheap four-inequality overlap, which treats the
//! circle as its bounding square, so it over-detects near rectangle corners.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Strict overlap (touching edges do not count)
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// A circle by center and radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Circle vs rectangle overlap, bounding-square approximation
#[inline]
pub fn circle_intersects_rect(circle: &Circle, rect: &Rect) -> bool {
    let Circle { center, radius } = *circle;
    center.x + radius > rect.x
        && center.x - radius < rect.right()
        && center.y + radius > rect.y
        && center.y - radius < rect.bottom()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_inside_rect() {
        let rect = Rect::new(0.0, 0.0, 100.0, 20.0);
        assert!(circle_intersects_rect(&Circle::new(Vec2::new(50.0, 10.0), 8.0), &rect));
    }

    #[test]
    fn test_circle_clear_of_rect() {
        let rect = Rect::new(0.0, 0.0, 100.0, 20.0);
        assert!(!circle_intersects_rect(&Circle::new(Vec2::new(50.0, 40.0), 8.0), &rect));
        // Exactly touching is not an overlap
        assert!(!circle_intersects_rect(&Circle::new(Vec2::new(50.0, 28.0), 8.0), &rect));
    }

    #[test]
    fn test_corner_over_detection() {
        // Center is ~9.9 from the corner, further than the radius, yet the
        // bounding-square test reports a hit.
        let rect = Rect::new(0.0, 0.0, 100.0, 20.0);
        let circle = Circle::new(Vec2::new(107.0, 27.0), 8.0);
        assert!((circle.center - Vec2::new(100.0, 20.0)).length() > circle.radius);
        assert!(circle_intersects_rect(&circle, &rect));
    }

    #[test]
    fn test_rect_overlap_and_center() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert_eq!(a.center(), Vec2::new(5.0, 5.0));
    }
}
