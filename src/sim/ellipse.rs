//! Axis-aligned ellipse geometry for bounding shapes
//!
//! Every entity collides through an ellipse inscribed in its sprite rectangle.
//! Overlap is approximate: boundaries are sampled as polygons, each sample is
//! tested analytically against the other ellipse, and polygon edges are
//! crossed against each other.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::ELLIPSE_SEGMENTS;

/// An axis-aligned ellipse
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    /// Center point
    pub center: Vec2,
    /// Half-width and half-height
    pub radii: Vec2,
}

impl Ellipse {
    pub fn new(center: Vec2, radii: Vec2) -> Self {
        Self { center, radii }
    }

    /// Ellipse inscribed in the rectangle at `top_left` with size `dimensions`
    pub fn inscribed(top_left: Vec2, dimensions: Vec2) -> Self {
        let radii = dimensions / 2.0;
        Self::new(top_left + radii, radii)
    }

    /// Top-left corner of the bounding rectangle
    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.radii
    }

    /// Bottom-right corner of the bounding rectangle
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.radii
    }

    /// Check if a point lies inside or on the ellipse
    pub fn contains_point(&self, point: Vec2) -> bool {
        if self.radii.x <= 0.0 || self.radii.y <= 0.0 {
            return self.min().cmple(point).all() && point.cmple(self.max()).all();
        }
        let d = (point - self.center) / self.radii;
        d.length_squared() <= 1.0
    }

    /// Point on the boundary at parametric angle `theta`
    #[inline]
    pub fn boundary_point(&self, theta: f32) -> Vec2 {
        self.center + Vec2::new(theta.cos(), theta.sin()) * self.radii
    }

    /// Sampled boundary polygon
    pub fn boundary(&self) -> impl Iterator<Item = Vec2> + '_ {
        (0..ELLIPSE_SEGMENTS).map(move |i| {
            let theta = i as f32 / ELLIPSE_SEGMENTS as f32 * std::f32::consts::TAU;
            self.boundary_point(theta)
        })
    }

    /// Check whether the bounding rectangles overlap
    pub fn rect_overlaps(&self, other: &Ellipse) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x <= b_max.x && b_min.x <= a_max.x && a_min.y <= b_max.y && b_min.y <= a_max.y
    }

    /// Check whether two ellipses overlap
    ///
    /// The test treats both operands identically, so `a.intersects(&b)`
    /// always equals `b.intersects(&a)`.
    pub fn intersects(&self, other: &Ellipse) -> bool {
        if !self.rect_overlaps(other) {
            return false;
        }
        if self.contains_point(other.center) || other.contains_point(self.center) {
            return true;
        }
        if self.boundary().any(|p| other.contains_point(p))
            || other.boundary().any(|p| self.contains_point(p))
        {
            return true;
        }

        // Crossing shapes with no vertex inside the other
        let a: Vec<Vec2> = self.boundary().collect();
        let b: Vec<Vec2> = other.boundary().collect();
        edges(&a).any(|(a0, a1)| edges(&b).any(|(b0, b1)| segments_cross(a0, a1, b0, b1)))
    }
}

/// Closed polygon edges
fn edges(polygon: &[Vec2]) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
    polygon
        .iter()
        .zip(polygon.iter().cycle().skip(1))
        .map(|(&p, &q)| (p, q))
}

/// Signed area of the triangle `a`, `b`, `c` (twice)
#[inline]
fn orientation(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b - a).perp_dot(c - a)
}

/// Whether `p`, known to be collinear with `a`-`b`, lies within its box
#[inline]
fn on_segment(a: Vec2, b: Vec2, p: Vec2) -> bool {
    a.min(b).cmple(p).all() && p.cmple(a.max(b)).all()
}

/// Whether segments `a0`-`a1` and `b0`-`b1` touch or cross
fn segments_cross(a0: Vec2, a1: Vec2, b0: Vec2, b1: Vec2) -> bool {
    let d1 = orientation(b0, b1, a0);
    let d2 = orientation(b0, b1, a1);
    let d3 = orientation(a0, a1, b0);
    let d4 = orientation(a0, a1, b1);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && on_segment(b0, b1, a0))
        || (d2 == 0.0 && on_segment(b0, b1, a1))
        || (d3 == 0.0 && on_segment(a0, a1, b0))
        || (d4 == 0.0 && on_segment(a0, a1, b1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_inscribed_radii_are_half_dimensions() {
        let e = Ellipse::inscribed(Vec2::new(10.0, 20.0), Vec2::new(40.0, 30.0));
        assert_eq!(e.radii, Vec2::new(20.0, 15.0));
        assert_eq!(e.center, Vec2::new(30.0, 35.0));
        assert_eq!(e.min(), Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_contains_point() {
        let e = Ellipse::new(Vec2::ZERO, Vec2::new(10.0, 5.0));
        assert!(e.contains_point(Vec2::new(9.9, 0.0)));
        assert!(e.contains_point(Vec2::new(0.0, -4.9)));
        // Inside the rectangle corner but outside the ellipse
        assert!(!e.contains_point(Vec2::new(9.0, 4.5)));
    }

    #[test]
    fn test_overlapping_ellipses() {
        let a = Ellipse::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let b = Ellipse::new(Vec2::new(15.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_rectangle_corners_touch_but_ellipses_do_not() {
        let a = Ellipse::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let b = Ellipse::new(Vec2::new(19.0, 19.0), Vec2::new(10.0, 10.0));
        assert!(a.rect_overlaps(&b));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_crossed_thin_ellipses_intersect() {
        let horizontal = Ellipse::new(Vec2::ZERO, Vec2::new(50.0, 2.0));
        let vertical = Ellipse::new(Vec2::ZERO, Vec2::new(2.0, 50.0));
        assert!(horizontal.intersects(&vertical));
    }

    #[test]
    fn test_offset_crossing_thin_ellipses_intersect() {
        // No center or sampled vertex of either lies inside the other
        let horizontal = Ellipse::new(Vec2::ZERO, Vec2::new(100.0, 1.0));
        let vertical = Ellipse::new(Vec2::new(50.0, 50.0), Vec2::new(1.0, 100.0));
        assert!(horizontal.contains_point(Vec2::new(50.0, 0.0)));
        assert!(vertical.contains_point(Vec2::new(50.0, 0.0)));
        assert!(horizontal.intersects(&vertical));
        assert!(vertical.intersects(&horizontal));
    }

    #[test]
    fn test_segments_cross() {
        let o = Vec2::ZERO;
        assert!(segments_cross(o, Vec2::new(2.0, 2.0), Vec2::new(0.0, 2.0), Vec2::new(2.0, 0.0)));
        assert!(!segments_cross(o, Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0), Vec2::new(1.0, 1.0)));
        // Shared endpoint
        assert!(segments_cross(o, Vec2::new(1.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn test_contained_ellipse_intersects() {
        let outer = Ellipse::new(Vec2::ZERO, Vec2::new(100.0, 80.0));
        let inner = Ellipse::new(Vec2::new(20.0, 10.0), Vec2::new(5.0, 5.0));
        assert!(outer.intersects(&inner));
        assert!(inner.intersects(&outer));
    }

    proptest! {
        #[test]
        fn intersects_is_symmetric(
            ax in -300.0f32..300.0, ay in -300.0f32..300.0,
            arx in 1.0f32..100.0, ary in 1.0f32..100.0,
            bx in -300.0f32..300.0, by in -300.0f32..300.0,
            brx in 1.0f32..100.0, bry in 1.0f32..100.0,
        ) {
            let a = Ellipse::new(Vec2::new(ax, ay), Vec2::new(arx, ary));
            let b = Ellipse::new(Vec2::new(bx, by), Vec2::new(brx, bry));
            prop_assert_eq!(a.intersects(&b), b.intersects(&a));
        }
    }
}
