//! ═══════════════════════════════════════════════════════════════════════════════
//! FILE: snapshot.rs | src/snapshot.rs
//! PURPOSE: Immutable value-copy view of scene state - the sole reader-facing output
//! LAYER: boxen (core)
//! ═══════════════════════════════════════════════════════════════════════════════
//!
//! Every node's derived fields (panels, finger data, joints) are recomputed
//! fresh into the snapshot rather than cached on the node itself - there is
//! no `_cachedPanels` to invalidate. Renderers, exporters, and validators
//! consume this tree and nothing else; they never reach back into
//! [`crate::tree::Scene`] directly.

use crate::error::Diagnostics;
use crate::geometry::Point2;
use crate::joint::{discover_face_constraints, validate_joint};
use crate::material::{AssemblyConfig, Axis, EdgePosition, FaceId, FeetConfig, Gender, MaterialConfig};
use crate::panel::{CornerModification, PanelKind, PanelSource};
use crate::tree::{Bounds3D, Scene};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelSnapshot {
    pub id: String,
    pub kind: PanelKind,
    pub source: PanelSource,
    pub width: f64,
    pub height: f64,
    pub thickness: f64,
    pub outline: Vec<Point2>,
    pub holes: Vec<Vec<Point2>>,
    pub edge_gender: HashMap<EdgePosition, Gender>,
    pub edge_extensions: HashMap<EdgePosition, f64>,
    pub corner_modifications: HashMap<(usize, usize), CornerModification>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoidSnapshot {
    pub id: String,
    pub bounds: Bounds3D,
    pub is_main_interior: bool,
    pub children: Vec<VoidSnapshot>,
    pub has_sub_assembly: bool,
}

fn void_snapshot(void: &crate::tree::Void) -> VoidSnapshot {
    VoidSnapshot {
        id: void.id.clone(),
        bounds: void.bounds,
        is_main_interior: void.is_main_interior,
        children: void.children.iter().map(void_snapshot).collect(),
        has_sub_assembly: void.sub_assembly.is_some(),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssemblySnapshot {
    pub id: String,
    pub w: f64,
    pub h: f64,
    pub d: f64,
    pub material: MaterialConfig,
    pub config: AssemblyConfig,
    pub feet: Option<FeetConfig>,
    pub faces_solid: HashMap<FaceId, bool>,
    pub panels: Vec<PanelSnapshot>,
    pub void_tree: VoidSnapshot,
    pub joint_alignment_errors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub assemblies: Vec<AssemblySnapshot>,
    pub diagnostics: Diagnostics,
}

impl SceneSnapshot {
    /// Recompute the entire snapshot from live scene state. Cheap enough to
    /// call after every dispatch: panel derivation is linear in panel count,
    /// with no incremental bookkeeping to keep correct.
    pub fn from_scene(scene: &Scene) -> Self {
        let mut diagnostics = Diagnostics::new();
        let assemblies = scene
            .assemblies
            .iter()
            .map(|assembly| {
                let (panels, panel_diagnostics) = assembly.derive_panels();
                diagnostics.merge(panel_diagnostics);

                let mut alignment_errors = Vec::new();
                let constraints = discover_face_constraints(|f| assembly.is_face_solid(f));
                for axis in [Axis::X, Axis::Y, Axis::Z] {
                    let length = match axis {
                        Axis::X => assembly.w,
                        Axis::Y => assembly.h,
                        Axis::Z => assembly.d,
                    };
                    let Ok((fd, _)) = crate::finger::compute_finger_data(axis, length, &assembly.material) else {
                        continue;
                    };
                    for constraint in constraints.iter().filter(|c| c.axis == axis) {
                        if let Err(e) = validate_joint(constraint, &fd, &fd) {
                            alignment_errors.push(format!("{e:?}"));
                        }
                    }
                }

                let panel_snapshots = panels
                    .into_iter()
                    .map(|p| PanelSnapshot {
                        id: p.id,
                        kind: p.kind,
                        source: p.source,
                        width: p.width,
                        height: p.height,
                        thickness: p.thickness,
                        outline: p.path.outline.points,
                        holes: p.path.holes.into_iter().map(|h| h.points).collect(),
                        edge_gender: p.edge_gender,
                        edge_extensions: p.edge_extensions,
                        corner_modifications: p.corner_modifications,
                    })
                    .collect();

                AssemblySnapshot {
                    id: assembly.id.clone(),
                    w: assembly.w,
                    h: assembly.h,
                    d: assembly.d,
                    material: assembly.material,
                    config: assembly.config,
                    feet: assembly.feet,
                    faces_solid: assembly.faces_solid.clone(),
                    panels: panel_snapshots,
                    void_tree: void_snapshot(&assembly.root_void),
                    joint_alignment_errors: alignment_errors,
                }
            })
            .collect();

        Self { assemblies, diagnostics }
    }

    pub fn main_assembly(&self) -> Option<&AssemblySnapshot> {
        self.assemblies.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Assembly;

    #[test]
    fn snapshot_mirrors_derived_panels() {
        let mut scene = Scene::new();
        scene.create_assembly(100.0, 80.0, 60.0, MaterialConfig::default()).unwrap();
        let snapshot = SceneSnapshot::from_scene(&scene);
        assert_eq!(snapshot.assemblies.len(), 1);
        assert_eq!(snapshot.main_assembly().unwrap().panels.len(), 6);
        assert!(snapshot.diagnostics.is_clean());
    }

    #[test]
    fn void_snapshot_reflects_subdivisions() {
        let mut assembly = Assembly::new("a".to_string(), 100.0, 80.0, 60.0, MaterialConfig::default()).unwrap();
        let root_id = assembly.root_void.id.clone();
        assembly.add_subdivision(&root_id, Axis::X, 50.0).unwrap();
        let mut scene = Scene::new();
        scene.assemblies.push(assembly);
        let snapshot = SceneSnapshot::from_scene(&scene);
        assert_eq!(snapshot.main_assembly().unwrap().void_tree.children.len(), 2);
    }
}
