//! ═══════════════════════════════════════════════════════════════════════════════
//! FILE: tree.rs | src/tree.rs
//! PURPOSE: Scene graph - assemblies, voids, subdivisions, and panel derivation
//! LAYER: boxen (core)
//! ═══════════════════════════════════════════════════════════════════════════════

use crate::constants::EPS_WALL;
use crate::cutout::{Cutout, SafeSpace};
use crate::error::{BoxenError, Diagnostics};
use crate::fillet::{apply_chamfer, apply_fillet, corner_is_eligible};
use crate::finger::{compute_finger_data, AssemblyFingerData};
use crate::gender::{adjacent_face, resolve_face_edge_gender};
use crate::geometry::{Bounds2, Path, Point2};
use crate::holes::{divider_slot_holes, find_meeting_divider, notched_from_top};
use crate::material::{
    Axis, AssemblyConfig, EdgePosition, FaceId, FeetConfig, Gender, LidConfig, LidSide,
    MaterialConfig,
};
use crate::panel::{CornerKind, CornerModification, EdgeSpec, Panel, PanelKind, PanelSource, build_rect_panel_outline};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Origin + extents of a 3D region, in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
    pub h: f64,
    pub d: f64,
}

impl Bounds3D {
    pub fn extent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.w,
            Axis::Y => self.h,
            Axis::Z => self.d,
        }
    }

    pub fn origin(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PositionMode {
    Absolute,
    Percentage,
}

/// One axis of subdivision on a void: N dividers at `positions` (absolute,
/// world-local to the void's origin on `axis`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitInfo {
    pub axis: Axis,
    pub positions: Vec<f64>,
    pub mode: PositionMode,
    pub percentages: Vec<f64>,
}

/// A reference to a specific divider panel: the void it splits, the axis
/// and position of the split plane. Used to record which divider bounds a
/// nested void on a given axis, so a further-nested divider that runs into
/// that boundary (rather than an outer face) can be resolved without a
/// tree search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividerRef {
    pub parent_void_id: String,
    pub axis: Axis,
    pub position: f64,
}

impl DividerRef {
    pub fn canonical_key(&self) -> String {
        format!("divider-{}-{:?}-{:.3}", self.parent_void_id, self.axis, self.position).to_lowercase()
    }
}

/// A recursive interior region. Leaf iff `children.is_empty()`,
/// `splits.is_empty()`, and `sub_assembly.is_none()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Void {
    pub id: String,
    pub bounds: Bounds3D,
    pub children: Vec<Void>,
    pub splits: Vec<SplitInfo>,
    pub is_main_interior: bool,
    /// Non-main-interior marker for a lid-inset cap void created along the
    /// assembly axis.
    pub lid_inset_side: Option<LidSide>,
    /// Per axis, which divider (if any) bounds this void on the low/high
    /// side; `None` means an outer face (or, for the assembly axis, a lid
    /// cap) bounds it instead.
    pub axis_bounds: HashMap<Axis, (Option<DividerRef>, Option<DividerRef>)>,
    pub sub_assembly: Option<Box<Assembly>>,
}

impl Void {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty() && self.splits.is_empty() && self.sub_assembly.is_none()
    }

    pub fn find(&self, id: &str) -> Option<&Void> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Void> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(id))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assembly {
    pub id: String,
    pub w: f64,
    pub h: f64,
    pub d: f64,
    pub material: MaterialConfig,
    pub faces_solid: HashMap<FaceId, bool>,
    pub config: AssemblyConfig,
    pub feet: Option<FeetConfig>,
    pub root_void: Void,
    next_id: u64,
    /// Panel id -> per-edge extension amount.
    pub edge_extensions: HashMap<String, HashMap<EdgePosition, f64>>,
    /// Panel id -> corner key -> fillet/chamfer modification.
    pub corner_mods: HashMap<String, HashMap<(usize, usize), CornerModification>>,
    /// Panel id -> user cutouts.
    pub cutouts: HashMap<String, Vec<Cutout>>,
}

impl Assembly {
    pub fn new(
        id: String,
        w: f64,
        h: f64,
        d: f64,
        material: MaterialConfig,
    ) -> Result<Self, BoxenError> {
        let smallest = w.min(h).min(d);
        if material.thickness >= smallest / 2.0 {
            return Err(BoxenError::MaterialInfeasible {
                thickness: material.thickness,
                smallest_dimension: smallest,
            });
        }
        let mt = material.thickness;
        if w <= 2.0 * mt || h <= 2.0 * mt || d <= 2.0 * mt {
            return Err(BoxenError::DimensionsInfeasible {
                detail: format!("dimensions {w}x{h}x{d} do not clear material thickness {mt}"),
            });
        }

        let mut faces_solid = HashMap::new();
        for f in FaceId::ALL {
            faces_solid.insert(f, true);
        }

        let root_void = Void {
            id: format!("{id}-root-void"),
            bounds: Bounds3D {
                x: mt,
                y: mt,
                z: mt,
                w: w - 2.0 * mt,
                h: h - 2.0 * mt,
                d: d - 2.0 * mt,
            },
            children: Vec::new(),
            splits: Vec::new(),
            is_main_interior: true,
            lid_inset_side: None,
            axis_bounds: HashMap::new(),
            sub_assembly: None,
        };

        let mut assembly = Self {
            id,
            w,
            h,
            d,
            material,
            faces_solid,
            config: AssemblyConfig::default(),
            feet: None,
            root_void,
            next_id: 0,
            edge_extensions: HashMap::new(),
            corner_mods: HashMap::new(),
            cutouts: HashMap::new(),
        };
        assembly.rebuild_lid_caps();
        Ok(assembly)
    }

    pub fn is_face_solid(&self, face: FaceId) -> bool {
        *self.faces_solid.get(&face).unwrap_or(&false)
    }

    fn axis_length(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.w,
            Axis::Y => self.h,
            Axis::Z => self.d,
        }
    }

    fn face_local_axes(face: FaceId) -> (Axis, Axis) {
        match face {
            FaceId::Front | FaceId::Back => (Axis::X, Axis::Y),
            FaceId::Left | FaceId::Right => (Axis::Z, Axis::Y),
            FaceId::Top | FaceId::Bottom => (Axis::X, Axis::Z),
        }
    }

    /// The two transverse axes a divider split along `axis` spans.
    fn divider_local_axes(axis: Axis) -> (Axis, Axis) {
        match axis {
            Axis::X => (Axis::Y, Axis::Z),
            Axis::Y => (Axis::X, Axis::Z),
            Axis::Z => (Axis::X, Axis::Y),
        }
    }

    fn edge_world_axis(face: FaceId, edge: EdgePosition) -> Axis {
        let (x_axis, y_axis) = Self::face_local_axes(face);
        match edge {
            EdgePosition::Top | EdgePosition::Bottom => x_axis,
            EdgePosition::Left | EdgePosition::Right => y_axis,
        }
    }

    fn edge_is_inset(&self, face: FaceId, edge: EdgePosition) -> bool {
        use crate::constants::wall_priority;
        wall_priority(face) > wall_priority(adjacent_face(face, edge))
    }

    fn is_wall_panel(&self, face: FaceId) -> bool {
        face.normal_axis() != self.config.assembly_axis
    }

    /// The void that holds ordinary interior subdivisions: `root_void`
    /// itself when there are no lid insets, otherwise the lid-inset-free
    /// child `rebuild_lid_caps` set aside for it.
    pub fn main_interior_void(&self) -> &Void {
        if self.root_void.is_main_interior {
            &self.root_void
        } else {
            self.root_void
                .children
                .iter()
                .find(|c| c.is_main_interior)
                .unwrap_or(&self.root_void)
        }
    }

    fn main_interior_void_mut(&mut self) -> &mut Void {
        if self.root_void.is_main_interior {
            &mut self.root_void
        } else {
            self.root_void
                .children
                .iter_mut()
                .find(|c| c.is_main_interior)
                .expect("rebuild_lid_caps always leaves a main-interior child")
        }
    }

    /// Resolve a caller-facing void id: the literal `"root"` convention
    /// addresses the main interior void regardless of whether lid insets
    /// have split it off from the outer container.
    fn resolve_void_id(&self, void_id: &str) -> String {
        if void_id == "root" {
            self.main_interior_void().id.clone()
        } else {
            void_id.to_string()
        }
    }

    /// Rebuild the root void's structure from `config`'s lid insets: with
    /// no inset on either side the main interior void *is* the root void
    /// (unchanged from this engine's original shape); a positive inset on
    /// either side splits off a cap-void child along the assembly axis,
    /// preserving the main interior's own subdivisions and sub-assembly.
    fn rebuild_lid_caps(&mut self) {
        let mt = self.material.thickness;
        let axis = self.config.assembly_axis;
        let outer = Bounds3D {
            x: mt,
            y: mt,
            z: mt,
            w: self.w - 2.0 * mt,
            h: self.h - 2.0 * mt,
            d: self.d - 2.0 * mt,
        };
        let pos_inset = self.config.lid_positive.inset.max(0.0);
        let neg_inset = self.config.lid_negative.inset.max(0.0);

        let mut main = self.main_interior_void().clone();
        main.is_main_interior = true;
        main.lid_inset_side = None;

        if pos_inset <= 0.0 && neg_inset <= 0.0 {
            main.bounds = outer;
            main.id = format!("{}-root-void", self.id);
            self.root_void = main;
            return;
        }

        let axis_origin = outer.origin(axis);
        let axis_extent = outer.extent(axis);
        let main_origin = axis_origin + neg_inset;
        let main_extent = (axis_extent - pos_inset - neg_inset).max(0.0);

        let mut children = Vec::new();
        if neg_inset > 0.0 {
            children.push(Void {
                id: format!("{}-cap-neg", self.id),
                bounds: set_axis_origin_extent(outer, axis, axis_origin, neg_inset),
                children: Vec::new(),
                splits: Vec::new(),
                is_main_interior: false,
                lid_inset_side: Some(LidSide::Negative),
                axis_bounds: HashMap::new(),
                sub_assembly: None,
            });
        }
        main.bounds = set_axis_origin_extent(outer, axis, main_origin, main_extent);
        main.id = format!("{}-main-void", self.id);
        children.push(main);
        if pos_inset > 0.0 {
            children.push(Void {
                id: format!("{}-cap-pos", self.id),
                bounds: set_axis_origin_extent(outer, axis, main_origin + main_extent, pos_inset),
                children: Vec::new(),
                splits: Vec::new(),
                is_main_interior: false,
                lid_inset_side: Some(LidSide::Positive),
                axis_bounds: HashMap::new(),
                sub_assembly: None,
            });
        }

        self.root_void = Void {
            id: format!("{}-root-void", self.id),
            bounds: outer,
            children,
            splits: Vec::new(),
            is_main_interior: false,
            lid_inset_side: None,
            axis_bounds: HashMap::new(),
            sub_assembly: None,
        };
    }

    /// Derive every panel (face + divider + sub-assembly) plus accumulated
    /// diagnostics.
    pub fn derive_panels(&self) -> (Vec<Panel>, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let mut finger_cache: HashMap<Axis, AssemblyFingerData> = HashMap::new();
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            match compute_finger_data(axis, self.axis_length(axis), &self.material) {
                Ok((fd, warning)) => {
                    if let Some(w) = warning {
                        diagnostics.push_warning(&w);
                    }
                    finger_cache.insert(axis, fd);
                }
                Err(e) => diagnostics.push_error(&e),
            }
        }

        let mut panels = Vec::new();
        let mut face_holes: HashMap<FaceId, Vec<Vec<Point2>>> = HashMap::new();

        // First pass: collect slot holes dividers punch into outer faces.
        self.collect_divider_slot_holes(&self.root_void, &finger_cache, &mut face_holes);

        for face in FaceId::ALL {
            if !self.is_face_solid(face) {
                continue;
            }
            let (x_axis, y_axis) = Self::face_local_axes(face);
            let width = self.axis_length(x_axis);
            let height = self.axis_length(y_axis);
            let mt = self.material.thickness;
            let panel_id = face.canonical_key();

            let mut edges: HashMap<EdgePosition, EdgeSpec> = HashMap::new();
            for edge in EdgePosition::ALL {
                let gender = resolve_face_edge_gender(face, edge, &self.config, |f| {
                    self.is_face_solid(f)
                });
                let axis = Self::edge_world_axis(face, edge);
                let fd = finger_cache.get(&axis);
                let inset = self.edge_is_inset(face, edge);
                let extension = self
                    .edge_extensions
                    .get(&panel_id)
                    .and_then(|m| m.get(&edge))
                    .copied()
                    .unwrap_or(0.0);
                edges.insert(
                    edge,
                    EdgeSpec {
                        gender,
                        extension,
                        finger_data: if gender == Gender::None { None } else { fd },
                        start_corner_inset: inset,
                        end_corner_inset: inset,
                        world_offset: 0.0,
                    },
                );
            }

            let feet = if self.is_wall_panel(face) { self.feet.as_ref() } else { None };

            let outline = build_rect_panel_outline(
                width,
                height,
                mt,
                edges[&EdgePosition::Bottom],
                edges[&EdgePosition::Right],
                edges[&EdgePosition::Top],
                edges[&EdgePosition::Left],
                feet,
            );

            let mut path = Path::new(outline.points);
            for hole in face_holes.remove(&face).unwrap_or_default() {
                path.add_hole(hole);
            }

            let mut gender_map = HashMap::new();
            for (edge, spec) in &edges {
                gender_map.insert(*edge, spec.gender);
            }

            let mut panel = Panel {
                id: panel_id.clone(),
                kind: PanelKind::FacePanel,
                source: PanelSource::Face { face },
                width,
                height,
                thickness: mt,
                path,
                position: Point2::new(0.0, 0.0),
                corner_modifications: self.corner_mods.get(&panel_id).cloned().unwrap_or_default(),
                edge_extensions: self.edge_extensions.get(&panel_id).cloned().unwrap_or_default(),
                edge_gender: gender_map,
            };
            self.finalize_panel(&mut panel, &mut diagnostics);
            panels.push(panel);
        }

        self.derive_void_panels(&self.root_void, &finger_cache, &mut panels, &mut diagnostics);
        self.collect_nested_terminations(&mut panels, &finger_cache);
        self.collect_sub_assembly_panels(&self.root_void, &mut panels, &mut diagnostics);

        (panels, diagnostics)
    }

    /// Apply stored corner fillets/chamfers and user cutouts to an
    /// already-built panel outline, in place, then re-validate.
    fn finalize_panel(&self, panel: &mut Panel, diagnostics: &mut Diagnostics) {
        if let Some(mods) = self.corner_mods.get(&panel.id) {
            let mut keys: Vec<_> = mods.iter().map(|(&k, &v)| (k, v)).collect();
            keys.sort_by(|a, b| b.0.1.cmp(&a.0.1));
            for ((path_id, idx), modi) in keys {
                if path_id != 0 || idx >= panel.path.outline.points.len() {
                    continue;
                }
                let result = match modi.kind {
                    CornerKind::Fillet => apply_fillet(&panel.path.outline.points, idx, modi.radius),
                    CornerKind::Chamfer => apply_chamfer(&panel.path.outline.points, idx, modi.radius),
                };
                match result {
                    Ok(pts) => panel.path.outline.points = pts,
                    Err(e) => diagnostics.push_error(&e),
                }
            }
        }

        if let Some(cutouts) = self.cutouts.get(&panel.id) {
            for cutout in cutouts {
                panel.path.add_hole(cutout.to_polyline().points);
            }
        }

        for problem in panel.path.validate() {
            diagnostics.push_error(&BoxenError::GeometryInvariantViolation { detail: problem });
        }
    }

    /// Walk the void tree collecting, per outer face, every slot hole a
    /// root-level divider punches through it.
    fn collect_divider_slot_holes(
        &self,
        void: &Void,
        finger_cache: &HashMap<Axis, AssemblyFingerData>,
        out: &mut HashMap<FaceId, Vec<Vec<Point2>>>,
    ) {
        if !void.is_main_interior {
            for child in &void.children {
                self.collect_divider_slot_holes(child, finger_cache, out);
            }
            return;
        }
        for split in &void.splits {
            let (pierced_a, pierced_b) = match split.axis {
                Axis::X => (FaceId::Front, FaceId::Back),
                Axis::Y => (FaceId::Left, FaceId::Right),
                Axis::Z => (FaceId::Top, FaceId::Bottom),
            };
            for &position in &split.positions {
                if let Some(fd) = finger_cache.get(&other_axis_for_face(pierced_a, split.axis)) {
                    let mt = self.material.thickness;
                    let span = self.perpendicular_span(split.axis, void);
                    for face in [pierced_a, pierced_b] {
                        if !self.is_face_solid(face) {
                            continue;
                        }
                        // The slot's fixed coordinate sits on whichever local
                        // axis of this face equals the split axis; the slot
                        // then runs (varies) along the other local axis.
                        let axis_is_x = Self::face_local_axes(face).1 == split.axis;
                        let holes =
                            divider_slot_holes(fd, mt, position, span, axis_is_x);
                        out.entry(face).or_default().extend(holes);
                    }
                }
            }
        }
    }

    fn perpendicular_span(&self, split_axis: Axis, void: &Void) -> (f64, f64) {
        let axis_for_span = match split_axis {
            Axis::X => Axis::Y,
            Axis::Y => Axis::Z,
            Axis::Z => Axis::X,
        };
        let origin = void.bounds.origin(axis_for_span);
        (origin, origin + void.bounds.extent(axis_for_span))
    }

    /// Build divider panels for every split in the tree (recursively),
    /// including cross-lap notches for same-level crossing splits. Nested
    /// single-axis dividers terminate against an ancestor divider instead of
    /// an outer face; that is resolved afterward in
    /// `collect_nested_terminations`.
    fn derive_void_panels(
        &self,
        void: &Void,
        finger_cache: &HashMap<Axis, AssemblyFingerData>,
        panels: &mut Vec<Panel>,
        diagnostics: &mut Diagnostics,
    ) {
        if void.splits.len() == 2 {
            // Grid subdivision: two crossing axes at this void, flat children.
            let (top_axis, _bottom_axis) = notched_from_top(void.splits[0].axis, void.splits[1].axis);
            for (i, split) in void.splits.iter().enumerate() {
                let other = &void.splits[1 - i];
                let from_top = split.axis == top_axis;
                for &position in &split.positions {
                    let crossing = other
                        .positions
                        .first()
                        .map(|&p| (other.axis, p - void.bounds.origin(other.axis)));
                    let panel = self.build_divider_panel(
                        void,
                        split.axis,
                        position,
                        finger_cache,
                        crossing,
                        from_top,
                    );
                    if let Some(p) = panel {
                        panels.push(p);
                    }
                }
            }
        } else {
            for split in &void.splits {
                for &position in &split.positions {
                    if let Err(e) = self.validate_position(void, split.axis, position) {
                        diagnostics.push_error(&e);
                        continue;
                    }
                    let panel = self.build_divider_panel(void, split.axis, position, finger_cache, None, false);
                    if let Some(p) = panel {
                        panels.push(p);
                    }
                }
            }
        }

        for child in &void.children {
            self.derive_void_panels(child, finger_cache, panels, diagnostics);
        }
    }

    /// Second pass over already-built divider panels: for any divider whose
    /// void terminates against an ancestor divider (rather than an outer
    /// face) on one of its transverse axes, cut the matching slot holes into
    /// that ancestor panel's path.
    fn collect_nested_terminations(&self, panels: &mut Vec<Panel>, finger_cache: &HashMap<Axis, AssemblyFingerData>) {
        let divider_sources: Vec<(String, String, Axis, f64)> = panels
            .iter()
            .filter(|p| p.kind == PanelKind::DividerPanel)
            .filter_map(|p| match &p.source {
                PanelSource::Divider { parent_void_id, axis, position } => {
                    Some((p.id.clone(), parent_void_id.clone(), *axis, *position))
                }
                _ => None,
            })
            .collect();

        let mt = self.material.thickness;
        let mut pending: Vec<(String, Vec<Point2>)> = Vec::new();

        for (_panel_id, parent_void_id, axis, position) in &divider_sources {
            let Some(void) = self.root_void.find(parent_void_id) else { continue };
            let (x_axis, y_axis) = Self::divider_local_axes(*axis);

            for transverse in [x_axis, y_axis] {
                let Some((low, high)) = void.axis_bounds.get(&transverse) else { continue };
                for bound in [low.as_ref(), high.as_ref()] {
                    let Some(ancestor_ref) = bound else { continue };

                    let candidates: Vec<(String, f64, f64)> = divider_sources
                        .iter()
                        .filter(|(_, pvid, a, _)| *pvid == ancestor_ref.parent_void_id && *a == ancestor_ref.axis)
                        .map(|(id, _, _, pos)| (id.clone(), pos - EPS_WALL, pos + EPS_WALL))
                        .collect();
                    let Some(ancestor_id) = find_meeting_divider(ancestor_ref.position, &candidates) else {
                        continue;
                    };
                    let Some(ancestor_void) = self.root_void.find(&ancestor_ref.parent_void_id) else { continue };

                    // `ancestor_ref.axis` always equals `transverse` - a
                    // divider bounding a void on some axis is exactly the
                    // divider that was split along that axis. Its own
                    // transverse pair is therefore `{axis, other}`; the
                    // shared axis along which the two dividers actually
                    // cross is whichever of those two is not our own axis.
                    let (anc_x, anc_y) = Self::divider_local_axes(ancestor_ref.axis);
                    let shared = if anc_x == *axis { anc_y } else { anc_x };

                    let Some(fd) = finger_cache.get(&shared) else { continue };
                    let span = (
                        void.bounds.origin(shared),
                        void.bounds.origin(shared) + void.bounds.extent(shared),
                    );
                    let axis_is_x = anc_x == shared;
                    let holes_world = divider_slot_holes(fd, mt, *position, span, axis_is_x);

                    let dx = ancestor_void.bounds.origin(anc_x);
                    let dy = ancestor_void.bounds.origin(anc_y);
                    for hole in holes_world {
                        let shifted: Vec<Point2> =
                            hole.into_iter().map(|p| Point2::new(p.x - dx, p.y - dy)).collect();
                        pending.push((ancestor_id.to_string(), shifted));
                    }
                }
            }
        }

        for (ancestor_id, hole) in pending {
            if let Some(panel) = panels.iter_mut().find(|p| p.id == ancestor_id) {
                panel.path.add_hole(hole);
            }
        }
    }

    fn validate_position(&self, void: &Void, axis: Axis, position: f64) -> Result<(), BoxenError> {
        let mt = self.material.thickness;
        let lo = void.bounds.origin(axis) + mt;
        let hi = void.bounds.origin(axis) + void.bounds.extent(axis) - mt;
        if position < lo - EPS_WALL || position > hi + EPS_WALL {
            return Err(BoxenError::PositionOutOfRange {
                void_id: void.id.clone(),
                axis,
                position,
            });
        }
        Ok(())
    }

    fn build_divider_panel(
        &self,
        void: &Void,
        axis: Axis,
        position: f64,
        finger_cache: &HashMap<Axis, AssemblyFingerData>,
        crossing: Option<(Axis, f64)>,
        notch_from_top: bool,
    ) -> Option<Panel> {
        let mt = self.material.thickness;
        let (x_axis, y_axis) = Self::divider_local_axes(axis);
        let width = void.bounds.extent(x_axis);
        let height = void.bounds.extent(y_axis);

        let fd_x = finger_cache.get(&x_axis);
        let fd_y = finger_cache.get(&y_axis);

        let male_edge = |fd: Option<&AssemblyFingerData>, world_offset: f64| EdgeSpec {
            gender: Gender::Male,
            extension: 0.0,
            finger_data: fd,
            start_corner_inset: false,
            end_corner_inset: false,
            world_offset,
        };

        let x_offset = void.bounds.origin(x_axis);
        let y_offset = void.bounds.origin(y_axis);

        let outline = build_rect_panel_outline(
            width,
            height,
            mt,
            male_edge(fd_x, x_offset),
            male_edge(fd_y, y_offset),
            male_edge(fd_x, x_offset),
            male_edge(fd_y, y_offset),
            None,
        );

        let pts = match crossing {
            Some((crossing_axis, intersection)) if crossing_axis == x_axis => {
                // The other divider's plane is fixed along x_axis: it cuts
                // into this panel's bottom/top edge (the one that runs along
                // local X), at the real finger-tab vertex range for that edge.
                let edge_range = if notch_from_top { outline.top } else { outline.bottom };
                let edge_y = if notch_from_top { height } else { 0.0 };
                crate::holes::apply_cross_lap_notch(
                    &outline.points,
                    edge_range,
                    edge_y,
                    height / 2.0,
                    intersection,
                    mt,
                    notch_from_top,
                )
            }
            Some((crossing_axis, intersection)) if crossing_axis == y_axis => {
                // The other divider's span runs along this panel's local Y;
                // transpose, apply the same (X-oriented) notch cut to the
                // real right/left edge (which becomes "top"/"bottom" under
                // the transpose), then transpose back. Swap is an involution
                // so this is exact.
                let transposed: Vec<Point2> =
                    outline.points.iter().map(|p| Point2::new(p.y, p.x)).collect();
                let edge_range = if notch_from_top { outline.right } else { outline.left };
                let edge_y = if notch_from_top { width } else { 0.0 };
                let notched = crate::holes::apply_cross_lap_notch(
                    &transposed,
                    edge_range,
                    edge_y,
                    width / 2.0,
                    intersection,
                    mt,
                    notch_from_top,
                );
                notched.iter().map(|p| Point2::new(p.y, p.x)).collect()
            }
            _ => outline.points,
        };

        let path = Path::new(pts);

        let mut gender_map = HashMap::new();
        gender_map.insert(EdgePosition::Top, Gender::Male);
        gender_map.insert(EdgePosition::Bottom, Gender::Male);
        gender_map.insert(EdgePosition::Left, Gender::Male);
        gender_map.insert(EdgePosition::Right, Gender::Male);

        let source = PanelSource::Divider {
            parent_void_id: void.id.clone(),
            axis,
            position,
        };
        let id = source.canonical_key();

        let mut panel = Panel {
            id,
            kind: PanelKind::DividerPanel,
            source,
            width,
            height,
            thickness: mt,
            path,
            position: Point2::new(0.0, 0.0),
            corner_modifications: HashMap::new(),
            edge_extensions: HashMap::new(),
            edge_gender: gender_map,
        };
        let mut scratch = Diagnostics::new();
        self.finalize_panel(&mut panel, &mut scratch);
        Some(panel)
    }

    /// Recurse through voids whose leaf holds a sub-assembly, deriving its
    /// panels independently and re-tagging them as sub-assembly panels with
    /// canonical ids scoped to the host void.
    fn collect_sub_assembly_panels(&self, void: &Void, panels: &mut Vec<Panel>, diagnostics: &mut Diagnostics) {
        if let Some(sub) = &void.sub_assembly {
            let (sub_panels, sub_diagnostics) = sub.derive_panels();
            diagnostics.merge(sub_diagnostics);
            for mut p in sub_panels {
                let new_source = match p.source.clone() {
                    PanelSource::Face { face } => {
                        PanelSource::SubAssemblyFace { sub_assembly_id: sub.id.clone(), face }
                    }
                    PanelSource::Divider { parent_void_id, axis, position } => PanelSource::SubAssemblyDivider {
                        sub_assembly_id: sub.id.clone(),
                        parent_void_id,
                        axis,
                        position,
                    },
                    other => other,
                };
                p.kind = match p.kind {
                    PanelKind::FacePanel => PanelKind::SubAssemblyFace,
                    PanelKind::DividerPanel => PanelKind::SubAssemblyDivider,
                    other => other,
                };
                p.id = new_source.canonical_key();
                p.source = new_source;
                panels.push(p);
            }
        }
        for child in &void.children {
            self.collect_sub_assembly_panels(child, panels, diagnostics);
        }
    }

    pub fn add_subdivision(&mut self, void_id: &str, axis: Axis, position: f64) -> Result<(), BoxenError> {
        self.add_subdivisions(void_id, axis, &[position])
    }

    pub fn add_subdivisions(&mut self, void_id: &str, axis: Axis, positions: &[f64]) -> Result<(), BoxenError> {
        let void_id = self.resolve_void_id(void_id);
        let mt = self.material.thickness;
        let prefix = self.id.clone();
        let mut counter = self.next_id;

        let target = self
            .root_void
            .find_mut(&void_id)
            .ok_or_else(|| BoxenError::NotALeafVoid { void_id: void_id.clone() })?;
        if !target.is_leaf() {
            return Err(BoxenError::NotALeafVoid { void_id: void_id.clone() });
        }

        let mut sorted = positions.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        for w in sorted.windows(2) {
            if (w[1] - w[0]).abs() < mt {
                return Err(BoxenError::PositionOutOfRange {
                    void_id: void_id.clone(),
                    axis,
                    position: w[1],
                });
            }
        }

        let lo = target.bounds.origin(axis) + mt;
        let hi = target.bounds.origin(axis) + target.bounds.extent(axis) - mt;
        for &p in &sorted {
            if p < lo - EPS_WALL || p > hi + EPS_WALL {
                return Err(BoxenError::PositionOutOfRange {
                    void_id: void_id.clone(),
                    axis,
                    position: p,
                });
            }
        }

        let mut boundaries = vec![target.bounds.origin(axis)];
        boundaries.extend(sorted.iter().copied());
        boundaries.push(target.bounds.origin(axis) + target.bounds.extent(axis));

        let parent_axis_bounds = target.axis_bounds.clone();
        let n = boundaries.len() - 1;
        let mut children = Vec::new();
        for (i, w) in boundaries.windows(2).enumerate() {
            counter += 1;
            let start = if i == 0 { w[0] } else { w[0] + mt };
            let end = w[1];
            let mut bounds = target.bounds;
            bounds = set_axis_origin_extent(bounds, axis, start, end - start);

            let mut axis_bounds = parent_axis_bounds.clone();
            let low_bound = if i == 0 {
                parent_axis_bounds.get(&axis).and_then(|(l, _)| l.clone())
            } else {
                Some(DividerRef { parent_void_id: void_id.clone(), axis, position: sorted[i - 1] })
            };
            let high_bound = if i == n - 1 {
                parent_axis_bounds.get(&axis).and_then(|(_, h)| h.clone())
            } else {
                Some(DividerRef { parent_void_id: void_id.clone(), axis, position: sorted[i] })
            };
            axis_bounds.insert(axis, (low_bound, high_bound));

            children.push(Void {
                id: format!("{prefix}-void-{counter}"),
                bounds,
                children: Vec::new(),
                splits: Vec::new(),
                is_main_interior: false,
                lid_inset_side: None,
                axis_bounds,
                sub_assembly: None,
            });
        }

        let target = self.root_void.find_mut(&void_id).unwrap();
        target.splits.push(SplitInfo {
            axis,
            positions: sorted,
            mode: PositionMode::Absolute,
            percentages: Vec::new(),
        });
        target.children = children;
        self.next_id = counter;
        Ok(())
    }

    /// Same as [`Assembly::add_subdivisions`] but positions are expressed as
    /// fractions (`0.0..=1.0`) of the target void's extent on `axis`,
    /// recomputed to absolute positions whenever the assembly's dimensions
    /// change.
    pub fn add_subdivisions_percentage(
        &mut self,
        void_id: &str,
        axis: Axis,
        percentages: &[f64],
    ) -> Result<(), BoxenError> {
        let void_id = self.resolve_void_id(void_id);
        let target = self
            .root_void
            .find(&void_id)
            .ok_or_else(|| BoxenError::NotALeafVoid { void_id: void_id.clone() })?;
        let origin = target.bounds.origin(axis);
        let extent = target.bounds.extent(axis);
        let positions: Vec<f64> = percentages.iter().map(|p| origin + p * extent).collect();
        self.add_subdivisions(&void_id, axis, &positions)?;
        let target = self.root_void.find_mut(&void_id).unwrap();
        if let Some(split) = target.splits.iter_mut().find(|s| s.axis == axis) {
            split.mode = PositionMode::Percentage;
            split.percentages = percentages.to_vec();
        }
        Ok(())
    }

    pub fn add_grid_subdivision(&mut self, void_id: &str, specs: &[(Axis, Vec<f64>)]) -> Result<(), BoxenError> {
        let void_id = self.resolve_void_id(void_id);
        let target = self
            .root_void
            .find_mut(&void_id)
            .ok_or_else(|| BoxenError::NotALeafVoid { void_id: void_id.clone() })?;
        if !target.is_leaf() {
            return Err(BoxenError::NotALeafVoid { void_id: void_id.clone() });
        }
        for (axis, positions) in specs {
            let lo = target.bounds.origin(*axis) + self.material.thickness;
            let hi = target.bounds.origin(*axis) + target.bounds.extent(*axis) - self.material.thickness;
            for &p in positions {
                if p < lo - EPS_WALL || p > hi + EPS_WALL {
                    return Err(BoxenError::PositionOutOfRange {
                        void_id: void_id.clone(),
                        axis: *axis,
                        position: p,
                    });
                }
            }
        }
        let target = self.root_void.find_mut(&void_id).unwrap();
        for (axis, positions) in specs {
            target.splits.push(SplitInfo {
                axis: *axis,
                positions: positions.clone(),
                mode: PositionMode::Absolute,
                percentages: Vec::new(),
            });
        }
        // Grid mode: children stay flat (none nested further in this engine).
        target.children = Vec::new();
        Ok(())
    }

    pub fn remove_subdivision(&mut self, void_id: &str) -> Result<(), BoxenError> {
        let void_id = self.resolve_void_id(void_id);
        let target = self
            .root_void
            .find_mut(&void_id)
            .ok_or_else(|| BoxenError::NotALeafVoid { void_id: void_id.clone() })?;
        if target.splits.is_empty() {
            return Err(BoxenError::NotALeafVoid { void_id: void_id.clone() });
        }
        target.splits.clear();
        target.children.clear();
        Ok(())
    }

    /// Create a sub-assembly filling `void_id`'s bounds shrunk by
    /// `clearance` on every side, oriented with its own assembly axis set to
    /// `axis`.
    pub fn create_sub_assembly(&mut self, void_id: &str, clearance: f64, axis: Axis) -> Result<(), BoxenError> {
        let void_id = self.resolve_void_id(void_id);
        let prefix = self.id.clone();
        let material = self.material;
        let target = self
            .root_void
            .find_mut(&void_id)
            .ok_or_else(|| BoxenError::NotALeafVoid { void_id: void_id.clone() })?;
        if !target.is_leaf() {
            return Err(BoxenError::NotALeafVoid { void_id: void_id.clone() });
        }
        if clearance < 0.0 {
            return Err(BoxenError::SubAssemblyTooLarge { void_id: void_id.clone() });
        }
        let w = target.bounds.w - 2.0 * clearance;
        let h = target.bounds.h - 2.0 * clearance;
        let d = target.bounds.d - 2.0 * clearance;
        let sub_id = format!("{prefix}-sub-{void_id}");
        let mut sub = Assembly::new(sub_id, w, h, d, material)
            .map_err(|_| BoxenError::SubAssemblyTooLarge { void_id: void_id.clone() })?;
        sub.config.assembly_axis = axis;
        target.sub_assembly = Some(Box::new(sub));
        Ok(())
    }

    /// Remove a void's sub-assembly, if any. Idempotent.
    pub fn remove_sub_assembly(&mut self, void_id: &str) -> Result<(), BoxenError> {
        let void_id = self.resolve_void_id(void_id);
        let target = self
            .root_void
            .find_mut(&void_id)
            .ok_or_else(|| BoxenError::NotALeafVoid { void_id: void_id.clone() })?;
        target.sub_assembly = None;
        Ok(())
    }

    pub fn set_dimensions(&mut self, w: Option<f64>, h: Option<f64>, d: Option<f64>) -> Result<(), BoxenError> {
        let new_w = w.unwrap_or(self.w);
        let new_h = h.unwrap_or(self.h);
        let new_d = d.unwrap_or(self.d);
        if new_w <= 0.0 || new_h <= 0.0 || new_d <= 0.0 {
            return Err(BoxenError::DimensionsInfeasible {
                detail: "dimensions must be positive".to_string(),
            });
        }
        let mt = self.material.thickness;
        if new_w <= 2.0 * mt || new_h <= 2.0 * mt || new_d <= 2.0 * mt {
            return Err(BoxenError::DimensionsInfeasible {
                detail: format!("dimensions {new_w}x{new_h}x{new_d} do not clear material thickness {mt}"),
            });
        }
        self.w = new_w;
        self.h = new_h;
        self.d = new_d;
        self.rebuild_lid_caps();
        rebuild_children_bounds(&mut self.root_void, mt);
        Ok(())
    }

    pub fn set_material(&mut self, material: MaterialConfig) -> Result<(), BoxenError> {
        let smallest = self.w.min(self.h).min(self.d);
        if material.thickness >= smallest / 2.0 {
            return Err(BoxenError::MaterialInfeasible {
                thickness: material.thickness,
                smallest_dimension: smallest,
            });
        }
        self.material = material;
        Ok(())
    }

    pub fn set_face_solid(&mut self, face: FaceId, solid: bool) {
        self.faces_solid.insert(face, solid);
    }

    pub fn set_feet_config(&mut self, feet: FeetConfig) {
        self.feet = Some(feet);
    }

    pub fn set_assembly_axis(&mut self, axis: Axis) {
        self.config.assembly_axis = axis;
        self.rebuild_lid_caps();
    }

    pub fn set_lid_config(&mut self, side: LidSide, config: LidConfig) -> Result<(), BoxenError> {
        if config.inset < 0.0 {
            return Err(BoxenError::DimensionsInfeasible {
                detail: "lid inset must be non-negative".to_string(),
            });
        }
        match side {
            LidSide::Positive => self.config.lid_positive = config,
            LidSide::Negative => self.config.lid_negative = config,
        }
        self.rebuild_lid_caps();
        Ok(())
    }

    /// An edge may be extended only where it currently has no active joint
    /// (`Gender::None`) - a male/female edge's tab layout is load-bearing.
    pub fn set_panel_edge_extension(&mut self, panel_id: &str, edge: EdgePosition, value: f64) -> Result<(), BoxenError> {
        let (panels, _) = self.derive_panels();
        let gender = panels
            .iter()
            .find(|p| p.id == panel_id)
            .and_then(|p| p.edge_gender.get(&edge).copied())
            .unwrap_or(Gender::None);
        if gender != Gender::None {
            return Err(BoxenError::ExtensionNotAllowed { panel_id: panel_id.to_string(), edge });
        }
        self.edge_extensions.entry(panel_id.to_string()).or_default().insert(edge, value);
        Ok(())
    }

    /// Every corner on a just-derived panel's outline, by vertex index, and
    /// whether it is eligible for a fillet/chamfer: long enough adjacent
    /// segments, and not one of the four body corners where two active-joint
    /// edges meet.
    pub fn panel_corner_eligibility(&self, panel: &Panel) -> Vec<bool> {
        let mt = self.material.thickness;
        let pts = &panel.path.outline.points;
        let canonical = [
            (0.0, 0.0),
            (panel.width, 0.0),
            (panel.width, panel.height),
            (0.0, panel.height),
        ];
        let edge_before = [EdgePosition::Left, EdgePosition::Bottom, EdgePosition::Right, EdgePosition::Top];
        let edge_after = [EdgePosition::Bottom, EdgePosition::Right, EdgePosition::Top, EdgePosition::Left];

        pts.iter()
            .map(|p| {
                let mut joint_active = false;
                for (i, &(cx, cy)) in canonical.iter().enumerate() {
                    if (p.x - cx).abs() < 1e-6 && (p.y - cy).abs() < 1e-6 {
                        let a = panel.edge_gender.get(&edge_before[i]).copied().unwrap_or(Gender::None);
                        let b = panel.edge_gender.get(&edge_after[i]).copied().unwrap_or(Gender::None);
                        joint_active = a != Gender::None || b != Gender::None;
                    }
                }
                joint_active
            })
            .enumerate()
            .map(|(i, joint_active)| corner_is_eligible(pts, i, mt, joint_active))
            .collect()
    }

    pub fn set_panel_corner_fillet(
        &mut self,
        panel_id: &str,
        corner_key: (usize, usize),
        radius: f64,
        kind: CornerKind,
    ) -> Result<(), BoxenError> {
        let (panels, _) = self.derive_panels();
        let panel = panels
            .iter()
            .find(|p| p.id == panel_id)
            .ok_or_else(|| BoxenError::CornerNotEligible { panel_id: panel_id.to_string(), corner_index: corner_key.1 })?;
        let eligibility = self.panel_corner_eligibility(panel);
        if corner_key.1 >= eligibility.len() || !eligibility[corner_key.1] {
            return Err(BoxenError::CornerNotEligible { panel_id: panel_id.to_string(), corner_index: corner_key.1 });
        }
        self.corner_mods
            .entry(panel_id.to_string())
            .or_default()
            .insert(corner_key, CornerModification { kind, radius });
        Ok(())
    }

    /// Apply several corner modifications atomically: every entry is
    /// validated against the current derivation before any is stored.
    pub fn set_all_corner_fillets_batch(
        &mut self,
        panel_id: &str,
        entries: &[((usize, usize), f64, CornerKind)],
    ) -> Result<(), BoxenError> {
        let (panels, _) = self.derive_panels();
        let panel = panels
            .iter()
            .find(|p| p.id == panel_id)
            .ok_or_else(|| BoxenError::CornerNotEligible { panel_id: panel_id.to_string(), corner_index: 0 })?;
        let eligibility = self.panel_corner_eligibility(panel);
        for (key, _, _) in entries {
            if key.1 >= eligibility.len() || !eligibility[key.1] {
                return Err(BoxenError::CornerNotEligible { panel_id: panel_id.to_string(), corner_index: key.1 });
            }
        }
        let slot = self.corner_mods.entry(panel_id.to_string()).or_default();
        for (key, radius, kind) in entries {
            slot.insert(*key, CornerModification { kind: *kind, radius: *radius });
        }
        Ok(())
    }

    /// The subset of `panel_id`'s body where a cutout may be placed: shrunk
    /// by `2*MT` on every edge with an active joint, and extended outward
    /// into any extension region (which only needs `MT` clearance from the
    /// original body edge).
    pub fn panel_safe_space(&self, panel: &Panel) -> SafeSpace {
        let mt = self.material.thickness;
        let mut min = Point2::new(0.0, 0.0);
        let mut max = Point2::new(panel.width, panel.height);

        if *panel.edge_gender.get(&EdgePosition::Bottom).unwrap_or(&Gender::None) != Gender::None {
            min.y += 2.0 * mt;
        }
        if *panel.edge_gender.get(&EdgePosition::Top).unwrap_or(&Gender::None) != Gender::None {
            max.y -= 2.0 * mt;
        }
        if *panel.edge_gender.get(&EdgePosition::Left).unwrap_or(&Gender::None) != Gender::None {
            min.x += 2.0 * mt;
        }
        if *panel.edge_gender.get(&EdgePosition::Right).unwrap_or(&Gender::None) != Gender::None {
            max.x -= 2.0 * mt;
        }

        for (edge, &ext) in &panel.edge_extensions {
            if ext <= 0.0 {
                continue;
            }
            match edge {
                EdgePosition::Top => max.y += ext - mt,
                EdgePosition::Bottom => min.y -= ext - mt,
                EdgePosition::Left => min.x -= ext - mt,
                EdgePosition::Right => max.x += ext - mt,
            }
        }

        SafeSpace { regions: vec![Bounds2 { min, max }] }
    }

    pub fn add_cutout(&mut self, panel_id: &str, cutout: Cutout) -> Result<(), BoxenError> {
        let (panels, _) = self.derive_panels();
        let panel = panels
            .iter()
            .find(|p| p.id == panel_id)
            .ok_or_else(|| BoxenError::CutoutOutsideSafeSpace { panel_id: panel_id.to_string() })?;
        let safe_space = self.panel_safe_space(panel);
        let existing = self.cutouts.get(panel_id).cloned().unwrap_or_default();
        crate::cutout::validate_cutout(&cutout, &safe_space, &existing)?;
        self.cutouts.entry(panel_id.to_string()).or_default().push(cutout);
        Ok(())
    }

    pub fn remove_cutout(&mut self, panel_id: &str, cutout_id: &str) {
        if let Some(list) = self.cutouts.get_mut(panel_id) {
            list.retain(|c| c.id != cutout_id);
        }
    }
}

fn other_axis_for_face(face: FaceId, split_axis: Axis) -> Axis {
    let (x, y) = match face {
        FaceId::Front | FaceId::Back => (Axis::X, Axis::Y),
        FaceId::Left | FaceId::Right => (Axis::Z, Axis::Y),
        FaceId::Top | FaceId::Bottom => (Axis::X, Axis::Z),
    };
    if x == split_axis {
        y
    } else {
        x
    }
}

fn set_axis_origin_extent(mut bounds: Bounds3D, axis: Axis, origin: f64, extent: f64) -> Bounds3D {
    match axis {
        Axis::X => {
            bounds.x = origin;
            bounds.w = extent;
        }
        Axis::Y => {
            bounds.y = origin;
            bounds.h = extent;
        }
        Axis::Z => {
            bounds.z = origin;
            bounds.d = extent;
        }
    }
    bounds
}

/// Recompute each split's effective positions (recomputing percentage-mode
/// splits from the void's *current* bounds, clamping absolute-mode ones
/// back into range) and propagate resized bounds down to children, after an
/// ancestor's own bounds changed (e.g. `set_dimensions`).
fn rebuild_children_bounds(void: &mut Void, mt: f64) {
    if void.splits.len() == 1 {
        let axis = void.splits[0].axis;
        let origin = void.bounds.origin(axis);
        let extent = void.bounds.extent(axis);
        let positions = compute_effective_positions(&void.splits[0], origin, extent, mt);
        void.splits[0].positions = positions.clone();

        let mut boundaries = vec![origin];
        boundaries.extend(positions.iter().copied());
        boundaries.push(origin + extent);
        for (i, w) in boundaries.windows(2).enumerate() {
            if let Some(child) = void.children.get_mut(i) {
                let start = if i == 0 { w[0] } else { w[0] + mt };
                child.bounds = set_axis_origin_extent(child.bounds, axis, start, w[1] - start);
            }
        }
    } else if void.splits.len() == 2 {
        let mut new_splits = void.splits.clone();
        for split in new_splits.iter_mut() {
            let origin = void.bounds.origin(split.axis);
            let extent = void.bounds.extent(split.axis);
            split.positions = compute_effective_positions(split, origin, extent, mt);
        }
        void.splits = new_splits;
    }

    for child in void.children.iter_mut() {
        rebuild_children_bounds(child, mt);
    }
}

fn compute_effective_positions(split: &SplitInfo, origin: f64, extent: f64, mt: f64) -> Vec<f64> {
    match split.mode {
        PositionMode::Percentage => split.percentages.iter().map(|p| origin + p * extent).collect(),
        PositionMode::Absolute => {
            let lo = origin + mt;
            let hi = origin + extent - mt;
            split.positions.iter().map(|&p| p.clamp(lo.min(hi), hi.max(lo))).collect()
        }
    }
}

/// Root container. Owns top-level assemblies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    pub assemblies: Vec<Assembly>,
    next_id: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_assembly(&mut self, w: f64, h: f64, d: f64, material: MaterialConfig) -> Result<&mut Assembly, BoxenError> {
        self.next_id += 1;
        let id = format!("assembly-{}", self.next_id);
        let assembly = Assembly::new(id, w, h, d, material)?;
        self.assemblies.clear();
        self.assemblies.push(assembly);
        Ok(&mut self.assemblies[0])
    }

    pub fn main_assembly(&self) -> Option<&Assembly> {
        self.assemblies.first()
    }

    pub fn main_assembly_mut(&mut self) -> Option<&mut Assembly> {
        self.assemblies.first_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::MaterialConfig;

    fn material() -> MaterialConfig {
        MaterialConfig {
            thickness: 3.0,
            finger_width: 12.8,
            finger_gap: 0.12,
        }
    }

    #[test]
    fn new_assembly_has_six_solid_faces_by_default() {
        let asm = Assembly::new("a".to_string(), 100.0, 80.0, 60.0, material()).unwrap();
        for f in FaceId::ALL {
            assert!(asm.is_face_solid(f));
        }
    }

    #[test]
    fn infeasible_material_is_rejected() {
        let material = MaterialConfig {
            thickness: 50.0,
            ..material()
        };
        let result = Assembly::new("a".to_string(), 100.0, 80.0, 60.0, material);
        assert!(matches!(result, Err(BoxenError::MaterialInfeasible { .. })));
    }

    #[test]
    fn scenario_s1_produces_six_face_panels() {
        let asm = Assembly::new("a".to_string(), 100.0, 80.0, 60.0, material()).unwrap();
        let (panels, diagnostics) = asm.derive_panels();
        assert_eq!(panels.len(), 6);
        assert!(diagnostics.is_clean());
        let front = panels.iter().find(|p| p.id == "face-front").unwrap();
        assert!((front.width - 100.0).abs() < 1e-9);
        assert!((front.height - 80.0).abs() < 1e-9);
    }

    #[test]
    fn scenario_s2_adds_a_divider_and_slot_holes() {
        let mut asm = Assembly::new("a".to_string(), 100.0, 80.0, 60.0, material()).unwrap();
        let root_id = asm.root_void.id.clone();
        asm.add_subdivision(&root_id, Axis::X, 50.0).unwrap();
        let (panels, _diag) = asm.derive_panels();
        assert_eq!(panels.len(), 7);
        let front = panels.iter().find(|p| p.id == "face-front").unwrap();
        assert!(!front.path.holes.is_empty());
    }

    #[test]
    fn add_subdivision_on_non_leaf_void_fails() {
        let mut asm = Assembly::new("a".to_string(), 100.0, 80.0, 60.0, material()).unwrap();
        let root_id = asm.root_void.id.clone();
        asm.add_subdivision(&root_id, Axis::X, 50.0).unwrap();
        let result = asm.add_subdivision(&root_id, Axis::Y, 40.0);
        assert!(matches!(result, Err(BoxenError::NotALeafVoid { .. })));
    }

    #[test]
    fn scenario_s3_nested_divider_terminates_against_ancestor() {
        // Root split along X gives two children; the left one is further
        // split along Z. The Z-divider's edge along X must terminate
        // against the X-divider, which should pick up matching slot holes,
        // with no cross-lap notch on the Z-divider itself.
        let mut asm = Assembly::new("a".to_string(), 200.0, 80.0, 120.0, material()).unwrap();
        let root_id = asm.root_void.id.clone();
        asm.add_subdivision(&root_id, Axis::X, 100.0).unwrap();
        let left_id = asm.root_void.children[0].id.clone();
        asm.add_subdivision(&left_id, Axis::Z, 60.0).unwrap();

        let (panels, diagnostics) = asm.derive_panels();
        assert!(diagnostics.is_clean());

        let x_divider = panels
            .iter()
            .find(|p| matches!(&p.source, PanelSource::Divider { axis: Axis::X, .. }))
            .expect("x divider panel exists");
        assert!(!x_divider.path.holes.is_empty(), "ancestor divider should gain slot holes");

        let z_divider = panels
            .iter()
            .find(|p| matches!(&p.source, PanelSource::Divider { axis: Axis::Z, .. }))
            .expect("z divider panel exists");
        assert!(z_divider.edge_gender.values().all(|&g| g == Gender::Male));
    }

    #[test]
    fn set_dimensions_rejects_non_positive() {
        let mut asm = Assembly::new("a".to_string(), 100.0, 80.0, 60.0, material()).unwrap();
        let result = asm.set_dimensions(Some(-5.0), None, None);
        assert!(matches!(result, Err(BoxenError::DimensionsInfeasible { .. })));
    }

    #[test]
    fn percentage_subdivision_recomputes_on_resize() {
        let mut asm = Assembly::new("a".to_string(), 100.0, 80.0, 60.0, material()).unwrap();
        let root_id = asm.root_void.id.clone();
        asm.add_subdivisions_percentage(&root_id, Axis::X, &[0.5]).unwrap();
        let before = asm.root_void.children[0].bounds.w;
        asm.set_dimensions(Some(200.0), None, None).unwrap();
        let after = asm.root_void.children[0].bounds.w;
        assert!(after > before);
    }

    #[test]
    fn lid_inset_creates_cap_voids() {
        let mut asm = Assembly::new("a".to_string(), 100.0, 80.0, 60.0, material()).unwrap();
        asm.set_lid_config(LidSide::Positive, LidConfig { inset: 5.0, ..LidConfig::default() }).unwrap();
        assert!(!asm.root_void.is_main_interior);
        assert_eq!(asm.root_void.children.len(), 2);
        assert!(asm.root_void.children.iter().any(|c| c.lid_inset_side == Some(LidSide::Positive)));
    }

    #[test]
    fn sub_assembly_creation_and_removal() {
        let mut asm = Assembly::new("a".to_string(), 100.0, 80.0, 60.0, material()).unwrap();
        let root_id = asm.root_void.id.clone();
        asm.create_sub_assembly(&root_id, 5.0, Axis::Y).unwrap();
        assert!(asm.root_void.sub_assembly.is_some());
        let (panels, _) = asm.derive_panels();
        assert!(panels.iter().any(|p| p.kind == PanelKind::SubAssemblyFace));
        asm.remove_sub_assembly(&root_id).unwrap();
        assert!(asm.root_void.sub_assembly.is_none());
    }

    #[test]
    fn edge_extension_rejected_on_male_edge() {
        let asm = Assembly::new("a".to_string(), 100.0, 80.0, 60.0, material()).unwrap();
        let mut asm = asm;
        let result = asm.set_panel_edge_extension("face-front", EdgePosition::Top, 10.0);
        assert!(matches!(result, Err(BoxenError::ExtensionNotAllowed { .. })));
    }
}
