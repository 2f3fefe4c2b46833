//! ═══════════════════════════════════════════════════════════════════════════════
//! FILE: geometry.rs | src/geometry.rs
//! PURPOSE: Axis-aligned polyline path primitives with holes
//! LAYER: boxen (foundation)
//! ═══════════════════════════════════════════════════════════════════════════════

use crate::constants::{EPS_POINT, EPS_WALL};
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A 2D point in panel-local millimeters.
pub type Point2 = DVec2;

/// An axis-aligned bounding box in 2D.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds2 {
    pub min: Point2,
    pub max: Point2,
}

impl Bounds2 {
    pub fn of_points(points: &[Point2]) -> Self {
        let mut min = points[0];
        let mut max = points[0];
        for p in &points[1..] {
            min = min.min(*p);
            max = max.max(*p);
        }
        Self { min, max }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// True iff `p` lies strictly inside this box, inset by `margin`.
    pub fn strictly_contains(&self, p: Point2, margin: f64) -> bool {
        p.x > self.min.x + margin
            && p.x < self.max.x - margin
            && p.y > self.min.y + margin
            && p.y < self.max.y - margin
    }
}

/// A single closed polyline (outline or hole).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub points: Vec<Point2>,
}

impl Polyline {
    pub fn new(points: Vec<Point2>) -> Self {
        Self { points }
    }

    /// Twice the signed area (shoelace formula). Positive = CCW.
    pub fn signed_area2(&self) -> f64 {
        let n = self.points.len();
        let mut sum = 0.0;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            sum += a.x * b.y - b.x * a.y;
        }
        sum
    }

    pub fn is_ccw(&self) -> bool {
        self.signed_area2() > 0.0
    }

    pub fn is_cw(&self) -> bool {
        self.signed_area2() < 0.0
    }

    /// Reverse winding in place.
    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    pub fn ensure_ccw(&mut self) {
        if !self.is_ccw() {
            self.reverse();
        }
    }

    pub fn ensure_cw(&mut self) {
        if !self.is_cw() {
            self.reverse();
        }
    }

    pub fn bounds(&self) -> Bounds2 {
        Bounds2::of_points(&self.points)
    }

    /// No two consecutive points (including wraparound) closer than `EPS_POINT`.
    pub fn has_no_duplicate_points(&self) -> bool {
        let n = self.points.len();
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            if a.distance(b) <= EPS_POINT {
                return false;
            }
        }
        true
    }

    /// Every segment (including wraparound) is horizontal or vertical.
    pub fn is_axis_aligned(&self) -> bool {
        let n = self.points.len();
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            let dx = (a.x - b.x).abs();
            let dy = (a.y - b.y).abs();
            if dx > EPS_POINT && dy > EPS_POINT {
                return false;
            }
        }
        true
    }
}

/// A panel's 2D shape: outer boundary plus internal holes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub outline: Polyline,
    pub holes: Vec<Polyline>,
}

impl Path {
    pub fn new(outline: Vec<Point2>) -> Self {
        let mut outline = Polyline::new(outline);
        outline.ensure_ccw();
        Self {
            outline,
            holes: Vec::new(),
        }
    }

    pub fn add_hole(&mut self, points: Vec<Point2>) {
        let mut hole = Polyline::new(points);
        hole.ensure_cw();
        self.holes.push(hole);
    }

    /// Aggregate invariant check; see §4.9 of the governing geometry rules.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.outline.points.len() < 3 {
            problems.push("outline has fewer than 3 points".to_string());
        }
        if !self.outline.is_axis_aligned() {
            problems.push("outline has a non-axis-aligned segment".to_string());
        }
        if !self.outline.has_no_duplicate_points() {
            problems.push("outline has consecutive duplicate points".to_string());
        }
        if !self.outline.is_ccw() {
            problems.push("outline is not wound CCW".to_string());
        }

        let outer_bounds = self.outline.bounds();
        for (i, hole) in self.holes.iter().enumerate() {
            if hole.points.len() < 3 {
                problems.push(format!("hole {i} has fewer than 3 points"));
            }
            if !hole.is_axis_aligned() {
                problems.push(format!("hole {i} has a non-axis-aligned segment"));
            }
            if !hole.has_no_duplicate_points() {
                problems.push(format!("hole {i} has consecutive duplicate points"));
            }
            if !hole.is_cw() {
                problems.push(format!("hole {i} is not wound CW"));
            }
            for p in &hole.points {
                if !outer_bounds.strictly_contains(*p, EPS_WALL) {
                    problems.push(format!("hole {i} has a vertex outside the outline bounds"));
                    break;
                }
            }
        }

        problems
    }
}

/// Build the four corners of an axis-aligned rectangle, CCW, starting at
/// the bottom-left corner.
pub fn rect_points(min: Point2, max: Point2) -> Vec<Point2> {
    vec![
        Point2::new(min.x, min.y),
        Point2::new(max.x, min.y),
        Point2::new(max.x, max.y),
        Point2::new(min.x, max.y),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_is_ccw_and_axis_aligned() {
        let pts = rect_points(Point2::new(0.0, 0.0), Point2::new(10.0, 5.0));
        let poly = Polyline::new(pts);
        assert!(poly.is_ccw());
        assert!(poly.is_axis_aligned());
        assert!(poly.has_no_duplicate_points());
    }

    #[test]
    fn path_validate_clean_rect_has_no_problems() {
        let path = Path::new(rect_points(Point2::new(0.0, 0.0), Point2::new(10.0, 5.0)));
        assert!(path.validate().is_empty());
    }

    #[test]
    fn hole_outside_bounds_is_flagged() {
        let mut path = Path::new(rect_points(Point2::new(0.0, 0.0), Point2::new(10.0, 5.0)));
        path.add_hole(rect_points(Point2::new(20.0, 20.0), Point2::new(22.0, 22.0)));
        let problems = path.validate();
        assert!(problems.iter().any(|p| p.contains("outside the outline")));
    }

    #[test]
    fn ensure_cw_reverses_ccw_hole() {
        let mut hole = Polyline::new(rect_points(Point2::new(1.0, 1.0), Point2::new(2.0, 2.0)));
        assert!(hole.is_ccw());
        hole.ensure_cw();
        assert!(hole.is_cw());
    }
}
