//! ═══════════════════════════════════════════════════════════════════════════════
//! FILE: holes.rs | src/holes.rs
//! PURPOSE: Hole generator - divider slots, cross-lap notches, terminating joints
//! LAYER: boxen (core)
//! ═══════════════════════════════════════════════════════════════════════════════

use crate::constants::EPS_WALL;
use crate::error::BoxenError;
use crate::finger::AssemblyFingerData;
use crate::geometry::Point2;
use crate::material::Axis;

/// The `(start, end)` extents, in edge-local coordinates, of every finger
/// (tab) section of `fd` - these are exactly the spans where a mating slot
/// must be cut, since slot position equals the face panel's own
/// finger-section boundaries (invariant 4).
pub fn finger_slot_spans(fd: &AssemblyFingerData, mt: f64) -> Vec<(f64, f64)> {
    (0..fd.section_count)
        .filter(|&i| fd.section_is_finger(i))
        .map(|i| {
            let (s, e) = fd.section_bounds(i);
            (mt + s, mt + e)
        })
        .collect()
}

/// Build a CW rectangle hole `mt` wide centered on `center`, spanning
/// `span` along the finger axis. `axis_is_x` selects whether `span`/`center`
/// run along local X (slot perpendicular extent along Y) or local Y.
pub fn slot_rect(span: (f64, f64), center: f64, mt: f64, axis_is_x: bool) -> Vec<Point2> {
    let half = mt / 2.0;
    if axis_is_x {
        vec![
            Point2::new(span.0, center - half),
            Point2::new(span.0, center + half),
            Point2::new(span.1, center + half),
            Point2::new(span.1, center - half),
        ]
    } else {
        vec![
            Point2::new(center - half, span.0),
            Point2::new(center + half, span.0),
            Point2::new(center + half, span.1),
            Point2::new(center - half, span.1),
        ]
    }
}

/// Every finger-section slot hole a divider punches through a face panel
/// it pierces, restricted to the divider's effective span on that face.
pub fn divider_slot_holes(
    fd: &AssemblyFingerData,
    mt: f64,
    divider_center: f64,
    effective_span: (f64, f64),
    axis_is_x: bool,
) -> Vec<Vec<Point2>> {
    finger_slot_spans(fd, mt)
        .into_iter()
        .filter(|&(s, e)| s >= effective_span.0 - EPS_WALL && e <= effective_span.1 + EPS_WALL)
        .map(|span| slot_rect(span, divider_center, mt, axis_is_x))
        .collect()
}

/// Which divider axis is notched "from the top" at a crossing: the
/// alphabetically lower axis (`X < Y < Z`).
pub fn notched_from_top(axis_a: Axis, axis_b: Axis) -> (Axis, Axis) {
    if axis_a.priority() < axis_b.priority() {
        (axis_a, axis_b)
    } else {
        (axis_b, axis_a)
    }
}

/// Cut a half-depth notch into a divider's real (possibly fingered) top or
/// bottom edge at the crossing position `intersection`, `mt` wide and half
/// the divider height deep.
///
/// `outline` is the full panel outline as emitted by
/// `build_rect_panel_outline` - typically carrying finger tabs on every
/// edge - and `edge_range` is the `[start, end)` index range that edge's
/// `RectOutline::top`/`::bottom` (or, under an X/Y transpose,
/// `::right`/`::left`) occupies within it. The crossing position is an
/// independent divider coordinate, not tied to this edge's own finger
/// layout, so it may fall over either a finger tab or the gap between two -
/// the notch is spliced into whichever flat run of that edge's own points
/// spans `intersection`, at that run's own height, leaving every other
/// vertex - including the rest of that edge's finger tabs - untouched,
/// rather than assuming the edge is a plain 4-point rectangle.
pub fn apply_cross_lap_notch(
    outline: &[Point2],
    edge_range: (usize, usize),
    edge_y: f64,
    depth: f64,
    intersection: f64,
    mt: f64,
    from_top: bool,
) -> Vec<Point2> {
    let half = mt / 2.0;
    let (x_lo, x_hi) = (intersection - half, intersection + half);
    let notch_y = if from_top { edge_y - depth } else { edge_y + depth };

    let (start, end) = edge_range;
    let edge = &outline[start..end];

    let mut notched_edge = Vec::with_capacity(edge.len() + 4);
    let mut spliced = false;
    for i in 0..edge.len() {
        let a = edge[i];
        notched_edge.push(a);
        if spliced || i + 1 >= edge.len() {
            continue;
        }
        let b = edge[i + 1];
        let run_y = a.y;
        let flat = (a.y - b.y).abs() < EPS_WALL;
        if !flat {
            continue;
        }
        let (seg_lo, seg_hi) = if a.x <= b.x { (a.x, b.x) } else { (b.x, a.x) };
        if seg_lo <= x_lo + EPS_WALL && seg_hi >= x_hi - EPS_WALL {
            if a.x <= b.x {
                notched_edge.push(Point2::new(x_lo, run_y));
                notched_edge.push(Point2::new(x_lo, notch_y));
                notched_edge.push(Point2::new(x_hi, notch_y));
                notched_edge.push(Point2::new(x_hi, run_y));
            } else {
                notched_edge.push(Point2::new(x_hi, run_y));
                notched_edge.push(Point2::new(x_hi, notch_y));
                notched_edge.push(Point2::new(x_lo, notch_y));
                notched_edge.push(Point2::new(x_lo, run_y));
            }
            spliced = true;
        }
    }

    let mut pts = Vec::with_capacity(outline.len() + 4);
    pts.extend_from_slice(&outline[..start]);
    pts.extend(notched_edge);
    pts.extend_from_slice(&outline[end..]);
    pts
}

/// Validate the minimum `2*MT` separation required between cross-lap slot
/// centers sharing one divider.
pub fn validate_cross_lap_separation(
    centers: &[f64],
    mt: f64,
    divider_a: &str,
    divider_b: &str,
) -> Result<(), BoxenError> {
    let mut sorted = centers.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    for w in sorted.windows(2) {
        if (w[1] - w[0]).abs() < 2.0 * mt {
            return Err(BoxenError::CrossLapConflict {
                divider_a: divider_a.to_string(),
                divider_b: divider_b.to_string(),
            });
        }
    }
    Ok(())
}

/// Resolve which divider (if any) a terminating divider edge abuts, by
/// containment of the terminating position within the other divider's
/// along-axis span. This resolves the "meetsDividerId" lookup that must
/// be fully implemented rather than left stubbed.
pub fn find_meeting_divider<'a>(
    terminating_position: f64,
    candidates: &'a [(String, f64, f64)],
) -> Option<&'a str> {
    candidates
        .iter()
        .find(|(_, lo, hi)| terminating_position >= *lo - EPS_WALL && terminating_position <= *hi + EPS_WALL)
        .map(|(id, _, _)| id.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finger::compute_finger_data;
    use crate::material::MaterialConfig;

    #[test]
    fn finger_slot_spans_cover_only_finger_sections() {
        let (fd, _) = compute_finger_data(Axis::X, 100.0, &MaterialConfig::default()).unwrap();
        let spans = finger_slot_spans(&fd, 3.0);
        assert_eq!(spans.len(), fd.section_count.div_ceil(2));
        let first_width = spans[0].1 - spans[0].0;
        for (s, e) in &spans {
            assert!(e > s);
            // Every finger-section slot must share the same width - a
            // regression here means the underlying finger layout dumped its
            // slack into one oversized section instead of distributing it.
            assert!(
                ((e - s) - first_width).abs() < 1e-6,
                "slot spans must be uniform width, got {spans:?}"
            );
        }
    }

    #[test]
    fn cross_lap_notch_preserves_tabs_and_stays_axis_aligned() {
        use crate::material::Gender;
        use crate::panel::{build_rect_panel_outline, EdgeSpec};

        let material = MaterialConfig::default();
        let axis_length = 200.0;
        let (fd_x, _) = compute_finger_data(Axis::X, axis_length, &material).unwrap();
        let male_edge = |fd: &AssemblyFingerData| EdgeSpec {
            gender: Gender::Male,
            extension: 0.0,
            finger_data: Some(fd),
            start_corner_inset: false,
            end_corner_inset: false,
            world_offset: 0.0,
        };
        let none_edge = EdgeSpec::plain(Gender::None);
        let width = axis_length;
        let height = 100.0;
        let outline = build_rect_panel_outline(
            width,
            height,
            material.thickness,
            male_edge(&fd_x),
            none_edge,
            male_edge(&fd_x),
            none_edge,
            None,
        );
        let pre_tab_count = outline.points.len();
        assert!(pre_tab_count > 4, "fixture must actually carry finger tabs");

        let intersection = width / 2.0;
        let notched = apply_cross_lap_notch(
            &outline.points,
            outline.top,
            height,
            height / 2.0,
            intersection,
            material.thickness,
            true,
        );

        // The notch adds exactly 4 vertices; every pre-existing vertex
        // (including the top edge's own finger tabs) is retained.
        assert_eq!(notched.len(), pre_tab_count + 4);

        let poly = crate::geometry::Polyline::new(notched.clone());
        assert!(poly.is_axis_aligned(), "notched outline must stay axis-aligned: {notched:?}");

        // The notch must actually cut to half the divider's height below
        // the top edge's nominal plane, regardless of whether it lands on
        // a finger tab or the gap beside one.
        let cut_depth = height - height / 2.0;
        assert!(notched.iter().any(|p| (p.y - cut_depth).abs() < 1e-6));
    }

    #[test]
    fn notched_from_top_picks_lower_axis() {
        let (top, bottom) = notched_from_top(Axis::Y, Axis::X);
        assert_eq!(top, Axis::X);
        assert_eq!(bottom, Axis::Y);
    }

    #[test]
    fn cross_lap_separation_detects_conflict() {
        let result = validate_cross_lap_separation(&[10.0, 11.0], 3.0, "a", "b");
        assert!(matches!(result, Err(BoxenError::CrossLapConflict { .. })));
    }

    #[test]
    fn cross_lap_separation_allows_wide_gaps() {
        let result = validate_cross_lap_separation(&[10.0, 30.0], 3.0, "a", "b");
        assert!(result.is_ok());
    }

    #[test]
    fn find_meeting_divider_resolves_by_containment() {
        let candidates = vec![
            ("div-a".to_string(), 0.0, 50.0),
            ("div-b".to_string(), 50.0, 120.0),
        ];
        assert_eq!(find_meeting_divider(75.0, &candidates), Some("div-b"));
        assert_eq!(find_meeting_divider(200.0, &candidates), None);
    }
}
