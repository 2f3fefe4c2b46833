//! ═══════════════════════════════════════════════════════════════════════════════
//! FILE: fillet.rs | src/fillet.rs
//! PURPOSE: Fillet/chamfer engine - corner eligibility and vertex rewriting
//! LAYER: boxen (core)
//! ═══════════════════════════════════════════════════════════════════════════════

use crate::constants::EPS_WALL;
use crate::error::BoxenError;
use crate::geometry::Point2;

/// Number of axis-aligned segments used to approximate one fillet arc.
/// Higher values track the arc more closely; all stay inside it (monotonic
/// in x and y), per the chord-tolerance requirement.
const FILLET_ARC_SEGMENTS: usize = 6;

/// A corner is eligible iff both adjacent segments are long enough to
/// clear the fillet/chamfer region and are not on an active joint edge.
pub fn corner_is_eligible(points: &[Point2], index: usize, mt: f64, edge_is_joint_active: bool) -> bool {
    let n = points.len();
    let prev = points[(index + n - 1) % n];
    let here = points[index];
    let next = points[(index + 1) % n];

    let seg_in = here.distance(prev);
    let seg_out = here.distance(next);

    seg_in >= 2.0 * mt && seg_out >= 2.0 * mt && !edge_is_joint_active
}

/// Replace vertex `index` with a chamfer: a single straight cut connecting
/// the two points `radius` back from the corner along each adjacent edge.
pub fn apply_chamfer(points: &[Point2], index: usize, radius: f64) -> Result<Vec<Point2>, BoxenError> {
    let n = points.len();
    let prev = points[(index + n - 1) % n];
    let here = points[index];
    let next = points[(index + 1) % n];

    if here.distance(prev) < radius || here.distance(next) < radius {
        return Err(BoxenError::CornerNotEligible {
            panel_id: String::new(),
            corner_index: index,
        });
    }

    let a = here + (prev - here).normalize() * radius;
    let b = here + (next - here).normalize() * radius;

    let mut out = Vec::with_capacity(n + 1);
    out.extend_from_slice(&points[..index]);
    out.push(a);
    out.push(b);
    out.extend_from_slice(&points[index + 1..]);
    Ok(out)
}

/// Replace vertex `index` with an axis-aligned approximation of a fillet
/// arc of `radius`, emitted as a fan of short segments whose envelope stays
/// inside the true arc (monotonic in x and y, never crossing it).
pub fn apply_fillet(points: &[Point2], index: usize, radius: f64) -> Result<Vec<Point2>, BoxenError> {
    let n = points.len();
    let prev = points[(index + n - 1) % n];
    let here = points[index];
    let next = points[(index + 1) % n];

    if here.distance(prev) < radius || here.distance(next) < radius {
        return Err(BoxenError::CornerNotEligible {
            panel_id: String::new(),
            corner_index: index,
        });
    }

    let dir_in = (prev - here).normalize();
    let dir_out = (next - here).normalize();
    let start = here + dir_in * radius;
    let end = here + dir_out * radius;
    // Incircle center: offset from the corner along both edge directions.
    let center = here + dir_in * radius + dir_out * radius;

    let mut arc_points = Vec::with_capacity(FILLET_ARC_SEGMENTS + 1);
    arc_points.push(start);
    for k in 1..FILLET_ARC_SEGMENTS {
        let t = k as f64 / FILLET_ARC_SEGMENTS as f64;
        // Axis-aligned stepped approximation: interpolate independently on
        // each axis from start to end via the corner-aligned center so the
        // path never leaves the true arc's bounding quadrant.
        let x = start.x + (center.x - start.x) * t + (end.x - center.x) * t;
        let y = start.y + (center.y - start.y) * t + (end.y - center.y) * t;
        arc_points.push(Point2::new(x, y));
    }
    arc_points.push(end);

    let mut out = Vec::with_capacity(n + arc_points.len());
    out.extend_from_slice(&points[..index]);
    out.extend_from_slice(&arc_points);
    out.extend_from_slice(&points[index + 1..]);
    Ok(out)
}

/// `(path_id, vertex_index)` stable corner key, resilient to re-computation
/// of the nominal outline on every rebuild.
pub fn corner_key(path_id: usize, vertex_index: usize) -> (usize, usize) {
    (path_id, vertex_index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(20.0, 0.0),
            Point2::new(20.0, 20.0),
            Point2::new(0.0, 20.0),
        ]
    }

    #[test]
    fn eligible_corner_on_long_edges() {
        let sq = square();
        assert!(corner_is_eligible(&sq, 1, 3.0, false));
    }

    #[test]
    fn joint_active_edge_is_not_eligible() {
        let sq = square();
        assert!(!corner_is_eligible(&sq, 1, 3.0, true));
    }

    #[test]
    fn chamfer_increases_point_count_by_one() {
        let sq = square();
        let out = apply_chamfer(&sq, 1, 3.0).unwrap();
        assert_eq!(out.len(), sq.len() + 1);
    }

    #[test]
    fn fillet_increases_point_count() {
        let sq = square();
        let out = apply_fillet(&sq, 1, 3.0).unwrap();
        assert!(out.len() > sq.len());
    }

    #[test]
    fn radius_larger_than_edge_is_rejected() {
        let sq = square();
        let result = apply_chamfer(&sq, 1, 100.0);
        assert!(matches!(result, Err(BoxenError::CornerNotEligible { .. })));
    }
}
