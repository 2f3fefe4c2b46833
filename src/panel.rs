//! ═══════════════════════════════════════════════════════════════════════════════
//! FILE: panel.rs | src/panel.rs
//! PURPOSE: Panel outline builder - face/divider panel geometry from finger data
//! LAYER: boxen (core)
//! ═══════════════════════════════════════════════════════════════════════════════

use crate::constants::EPS_POINT;
use crate::finger::AssemblyFingerData;
use crate::geometry::{Path, Point2};
use crate::material::{EdgePosition, FaceId, FeetConfig, Gender};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The two kinds of panel this engine produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanelKind {
    FacePanel,
    DividerPanel,
    SubAssemblyFace,
    SubAssemblyDivider,
}

/// Where a panel came from, for canonical-key derivation (§4.12).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PanelSource {
    Face { face: FaceId },
    Divider { parent_void_id: String, axis: crate::material::Axis, position: f64 },
    SubAssemblyFace { sub_assembly_id: String, face: FaceId },
    SubAssemblyDivider {
        sub_assembly_id: String,
        parent_void_id: String,
        axis: crate::material::Axis,
        position: f64,
    },
}

impl PanelSource {
    pub fn canonical_key(&self) -> String {
        match self {
            PanelSource::Face { face } => face.canonical_key(),
            PanelSource::Divider { parent_void_id, axis, position } => {
                format!("divider-{parent_void_id}-{axis:?}-{position:.3}").to_lowercase()
            }
            PanelSource::SubAssemblyFace { sub_assembly_id, face } => {
                format!("subasm-{sub_assembly_id}-face-{}", face.slug())
            }
            PanelSource::SubAssemblyDivider {
                sub_assembly_id,
                parent_void_id,
                axis,
                position,
            } => format!(
                "subasm-{sub_assembly_id}-divider-{parent_void_id}-{axis:?}-{position:.3}"
            )
            .to_lowercase(),
        }
    }
}

/// Per-edge configuration stored on a panel: extension amount and any
/// corner fillet/chamfer keyed by stable `(path_id, vertex_index)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CornerKind {
    Fillet,
    Chamfer,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CornerModification {
    pub kind: CornerKind,
    pub radius: f64,
}

/// A derived panel: geometry plus the decorations (extensions, fillets,
/// cutouts) the user has applied, re-applied on every rebuild by key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Panel {
    pub id: String,
    pub kind: PanelKind,
    pub source: PanelSource,
    pub width: f64,
    pub height: f64,
    pub thickness: f64,
    pub path: Path,
    pub position: Point2,
    /// `(path_id, vertex_index)` -> modification, matching §4.5's stable key.
    pub corner_modifications: HashMap<(usize, usize), CornerModification>,
    pub edge_extensions: HashMap<EdgePosition, f64>,
    pub edge_gender: HashMap<EdgePosition, Gender>,
}

impl Panel {
    pub fn canonical_key(&self) -> String {
        self.source.canonical_key()
    }
}

/// Per-edge input to the outline builder.
#[derive(Debug, Clone, Copy)]
pub struct EdgeSpec<'a> {
    pub gender: Gender,
    pub extension: f64,
    pub finger_data: Option<&'a AssemblyFingerData>,
    /// True if this panel loses the corner at the *start* of this edge
    /// (traversal order `[Bottom, Right, Top, Left]`) and must notch in by
    /// `MT` there; symmetric flag for the corner at its end lives on the
    /// next edge's "start" flag.
    pub start_corner_inset: bool,
    pub end_corner_inset: bool,
    /// World-space coordinate of this edge's local zero, along the finger
    /// axis. Face panels sit flush with the outer box origin (`0.0`).
    /// Divider panels whose body starts partway along the shared axis (a
    /// void nested away from the outer shell) use the void's own origin, so
    /// `finger_data`'s shared transition points - always expressed in the
    /// full assembly's world frame - land at the right local offset, and
    /// any section straddling a boundary this panel doesn't reach is
    /// dropped rather than overrunning the body.
    pub world_offset: f64,
}

impl<'a> EdgeSpec<'a> {
    pub fn plain(gender: Gender) -> Self {
        Self {
            gender,
            extension: 0.0,
            finger_data: None,
            start_corner_inset: false,
            end_corner_inset: false,
            world_offset: 0.0,
        }
    }
}

/// A built rectangle outline plus the contiguous `[start, end)` index range
/// each of its four edges occupies within `points`, in emission order
/// (`[Bottom, Right, Top, Left]`). Callers that need to splice additional
/// geometry into one specific edge (e.g. a cross-lap notch) without
/// disturbing that edge's own finger tabs use these ranges instead of
/// assuming fixed corner indices.
#[derive(Debug, Clone)]
pub struct RectOutline {
    pub points: Vec<Point2>,
    pub bottom: (usize, usize),
    pub right: (usize, usize),
    pub top: (usize, usize),
    pub left: (usize, usize),
}

/// Build an axis-aligned panel outline, CCW, starting at the bottom-left
/// corner and walking `[Bottom(L->R), Right(B->T), Top(R->L), Left(T->B)]`.
///
/// This is the mathematically-CCW traversal equivalent to the governing
/// geometry rules' "clockwise, top L->R" description under a y-up frame.
pub fn build_rect_panel_outline(
    width: f64,
    height: f64,
    mt: f64,
    bottom: EdgeSpec,
    right: EdgeSpec,
    top: EdgeSpec,
    left: EdgeSpec,
    feet: Option<&FeetConfig>,
) -> RectOutline {
    let mut pts = Vec::new();

    emit_horizontal_edge(&mut pts, &bottom, 0.0, width, 0.0, mt, true, feet);
    let bottom_end = pts.len();
    emit_vertical_edge(&mut pts, &right, 0.0, height, width, mt, true);
    let right_end = pts.len();
    emit_horizontal_edge(&mut pts, &top, width, 0.0, height, mt, false, None);
    let top_end = pts.len();
    emit_vertical_edge(&mut pts, &left, height, 0.0, 0.0, mt, false);
    let mut left_end = pts.len();

    // The left edge's own closing point can coincide with the bottom edge's
    // opening point (e.g. a plain rectangle, or any pair of edges with no
    // corner inset) - the polyline closes implicitly, so keep it from
    // appearing twice.
    if left_end > 1 && pts[0].distance(pts[left_end - 1]) <= EPS_POINT {
        pts.pop();
        left_end -= 1;
    }

    RectOutline {
        points: pts,
        bottom: (0, bottom_end),
        right: (bottom_end, right_end),
        top: (right_end, top_end),
        left: (top_end, left_end),
    }
}

/// Emit points for an edge running along X at fixed `y`, from `x_from` to
/// `x_to` (either direction), applying finger tabs/notches and corners.
#[allow(clippy::too_many_arguments)]
fn emit_horizontal_edge(
    pts: &mut Vec<Point2>,
    edge: &EdgeSpec,
    x_from: f64,
    x_to: f64,
    y: f64,
    mt: f64,
    forward: bool,
    feet: Option<&FeetConfig>,
) {
    if edge.gender == Gender::None {
        emit_straight_with_extension(pts, x_from, x_to, y, edge, true, feet, mt);
        return;
    }

    let length = (x_to - x_from).abs();
    let dir = if forward { 1.0 } else { -1.0 };

    let start_x = x_from + if edge.start_corner_inset { dir * mt } else { 0.0 };
    let end_x = x_to - if edge.end_corner_inset { dir * mt } else { 0.0 };

    let protrude = if y == 0.0 { -1.0 } else { 1.0 };
    let step = if edge.gender == Gender::Male { protrude * mt } else { -protrude * mt };

    push_dedup(pts, Point2::new(start_x, y));

    if let Some(fd) = edge.finger_data {
        for i in 0..fd.section_count {
            let (s, e) = fd.section_bounds(i);
            let (lo, hi) = if forward { (s, e) } else { (fd.max_joint_length - e, fd.max_joint_length - s) };
            let local_lo = mt + lo - edge.world_offset;
            let local_hi = mt + hi - edge.world_offset;
            if local_lo < -1e-6 || local_hi > length + 1e-6 {
                // This panel's body doesn't reach this section of the
                // shared finger pattern - it terminates against a sibling
                // divider before this point, not an outer face.
                continue;
            }
            let local_a = x_from + dir * local_lo;
            let local_b = x_from + dir * local_hi;
            if fd.section_is_finger(i) {
                // Rise from the baseline into the tab, run along its top,
                // then drop back - a hole section leaves no points at all,
                // so the baseline carries straight across the gap.
                push_dedup(pts, Point2::new(local_a, y));
                pts.push(Point2::new(local_a, y + step));
                pts.push(Point2::new(local_b, y + step));
                push_dedup(pts, Point2::new(local_b, y));
            }
        }
    }

    push_dedup(pts, Point2::new(end_x, y));
}

/// Emit points for an edge running along Y at fixed `x`, from `y_from` to
/// `y_to`.
fn emit_vertical_edge(
    pts: &mut Vec<Point2>,
    edge: &EdgeSpec,
    y_from: f64,
    y_to: f64,
    x: f64,
    mt: f64,
    forward: bool,
) {
    if edge.gender == Gender::None {
        emit_straight_with_extension(pts, y_from, y_to, x, edge, false, None, mt);
        return;
    }

    let dir = if forward { 1.0 } else { -1.0 };
    let start_y = y_from + if edge.start_corner_inset { dir * mt } else { 0.0 };
    let end_y = y_to - if edge.end_corner_inset { dir * mt } else { 0.0 };

    let protrude = if x == 0.0 { -1.0 } else { 1.0 };
    let step = if edge.gender == Gender::Male { protrude * mt } else { -protrude * mt };

    push_dedup(pts, Point2::new(x, start_y));

    let length = (y_to - y_from).abs();
    if let Some(fd) = edge.finger_data {
        for i in 0..fd.section_count {
            let (s, e) = fd.section_bounds(i);
            let (lo, hi) = if forward { (s, e) } else { (fd.max_joint_length - e, fd.max_joint_length - s) };
            let local_lo = mt + lo - edge.world_offset;
            let local_hi = mt + hi - edge.world_offset;
            if local_lo < -1e-6 || local_hi > length + 1e-6 {
                continue;
            }
            let local_a = y_from + dir * local_lo;
            let local_b = y_from + dir * local_hi;
            if fd.section_is_finger(i) {
                push_dedup(pts, Point2::new(x, local_a));
                pts.push(Point2::new(x + step, local_a));
                pts.push(Point2::new(x + step, local_b));
                push_dedup(pts, Point2::new(x, local_b));
            }
        }
    }

    push_dedup(pts, Point2::new(x, end_y));
}

#[allow(clippy::too_many_arguments)]
fn emit_straight_with_extension(
    pts: &mut Vec<Point2>,
    from: f64,
    to: f64,
    fixed: f64,
    edge: &EdgeSpec,
    horizontal: bool,
    feet: Option<&FeetConfig>,
    _mt: f64,
) {
    let outward = if fixed == 0.0 { -1.0 } else { 1.0 };
    let ext = edge.extension * outward;

    if let Some(feet) = feet.filter(|f| f.enabled) {
        // Two foot rectangles extending below the bottom edge, inset from
        // each end by `feet.inset`, separated by `feet.gap`.
        let length = (to - from).abs();
        let dir = if to >= from { 1.0 } else { -1.0 };
        let foot1_start = from + dir * feet.inset;
        let foot1_end = foot1_start + dir * feet.width;
        let center = from + dir * length / 2.0;
        let foot2_start = center + dir * feet.gap / 2.0;
        let foot2_end = foot2_start + dir * feet.width;
        let drop = fixed - feet.height;

        push_xy(pts, horizontal, from, fixed);
        push_xy(pts, horizontal, foot1_start, fixed);
        push_xy(pts, horizontal, foot1_start, drop);
        push_xy(pts, horizontal, foot1_end, drop);
        push_xy(pts, horizontal, foot1_end, fixed);
        push_xy(pts, horizontal, foot2_start, fixed);
        push_xy(pts, horizontal, foot2_start, drop);
        push_xy(pts, horizontal, foot2_end, drop);
        push_xy(pts, horizontal, foot2_end, fixed);
        push_xy(pts, horizontal, to, fixed);
        return;
    }

    if ext.abs() > f64::EPSILON {
        push_xy(pts, horizontal, from, fixed);
        push_xy(pts, horizontal, from, fixed + ext);
        push_xy(pts, horizontal, to, fixed + ext);
        push_xy(pts, horizontal, to, fixed);
    } else {
        push_xy(pts, horizontal, from, fixed);
        push_xy(pts, horizontal, to, fixed);
    }
}

fn push_xy(pts: &mut Vec<Point2>, horizontal: bool, a: f64, b: f64) {
    let p = if horizontal { Point2::new(a, b) } else { Point2::new(b, a) };
    push_dedup(pts, p);
}

/// Push `p` unless it exactly repeats the point already at the end of
/// `pts` - adjacent edges (and adjacent finger sections) frequently compute
/// the same corner from both sides, and a duplicate consecutive point would
/// otherwise fail the outline's no-duplicate-points invariant.
fn push_dedup(pts: &mut Vec<Point2>, p: Point2) {
    if pts.last().map(|last| last.distance(p) > EPS_POINT).unwrap_or(true) {
        pts.push(p);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finger::compute_finger_data;
    use crate::material::{Axis, MaterialConfig};

    #[test]
    fn plain_rectangle_has_four_points() {
        let none_edge = EdgeSpec::plain(Gender::None);
        let outline = build_rect_panel_outline(100.0, 80.0, 3.0, none_edge, none_edge, none_edge, none_edge, None);
        assert_eq!(outline.points.len(), 4);
        let path = Path::new(outline.points);
        assert!(path.validate().is_empty());
    }

    #[test]
    fn male_edge_produces_more_points_than_plain() {
        let material = MaterialConfig::default();
        let (fd, _) = compute_finger_data(Axis::X, 100.0, &material).unwrap();
        let male_edge = EdgeSpec {
            finger_data: Some(&fd),
            ..EdgeSpec::plain(Gender::Male)
        };
        let none_edge = EdgeSpec::plain(Gender::None);
        let outline = build_rect_panel_outline(100.0, 80.0, 3.0, male_edge, none_edge, none_edge, none_edge, None);
        assert!(outline.points.len() > 4);
    }

    #[test]
    fn extension_pushes_outline_outward() {
        let none_edge = EdgeSpec::plain(Gender::None);
        let extended_top = EdgeSpec {
            extension: 20.0,
            ..none_edge
        };
        let outline = build_rect_panel_outline(100.0, 80.0, 3.0, none_edge, none_edge, extended_top, none_edge, None);
        let max_y = outline.points.iter().map(|p| p.y).fold(f64::MIN, f64::max);
        assert!((max_y - 100.0).abs() < 1e-9);
    }
}
