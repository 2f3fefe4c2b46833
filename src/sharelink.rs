//! ═══════════════════════════════════════════════════════════════════════════════
//! FILE: sharelink.rs | src/sharelink.rs
//! PURPOSE: Share-link codec - ProjectState serde round-trip keyed by canonical ids
//! LAYER: boxen (core)
//! ═══════════════════════════════════════════════════════════════════════════════
//!
//! Runtime void/panel ids are opaque and regenerate on every rebuild; a
//! share link instead carries structural provenance (split axis/position
//! paths, canonical panel keys) and rebinds it to freshly generated ids on
//! load, per the canonical-key convention used throughout derivation.

use crate::cutout::Cutout;
use crate::error::BoxenError;
use crate::material::{Axis, EdgePosition, FaceId, FeetConfig, MaterialConfig};
use crate::panel::CornerModification;
use crate::tree::{Assembly, PositionMode, Void};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Structural mirror of one [`crate::tree::SplitInfo`], carried without the
/// runtime void id it was created against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitSpec {
    pub axis: Axis,
    pub positions: Vec<f64>,
    pub mode: PositionMode,
    pub percentages: Vec<f64>,
}

/// Structural mirror of a [`Void`]: enough to replay `add_subdivisions` /
/// `add_grid_subdivision` calls that reconstruct an equivalent tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoidSpec {
    pub splits: Vec<SplitSpec>,
    pub children: Vec<VoidSpec>,
    pub sub_assembly: Option<Box<ProjectState>>,
}

fn void_to_spec(void: &Void) -> VoidSpec {
    VoidSpec {
        splits: void
            .splits
            .iter()
            .map(|s| SplitSpec {
                axis: s.axis,
                positions: s.positions.clone(),
                mode: s.mode,
                percentages: s.percentages.clone(),
            })
            .collect(),
        children: void.children.iter().map(void_to_spec).collect(),
        sub_assembly: void.sub_assembly.as_ref().map(|a| Box::new(assembly_to_project_state(a))),
    }
}

/// Every panel-keyed decoration attached by canonical key, so they survive
/// a round-trip even though the panels themselves are rebuilt from scratch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PanelOperations {
    pub edge_extensions: HashMap<String, HashMap<EdgePosition, f64>>,
    pub corner_mods: HashMap<String, HashMap<(usize, usize), CornerModification>>,
    pub cutouts: HashMap<String, Vec<Cutout>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectState {
    pub w: f64,
    pub h: f64,
    pub d: f64,
    pub material: MaterialConfig,
    pub config: crate::material::AssemblyConfig,
    pub feet: Option<FeetConfig>,
    pub faces_solid: HashMap<FaceId, bool>,
    pub root_void: VoidSpec,
    pub panel_operations: PanelOperations,
}

pub fn assembly_to_project_state(assembly: &Assembly) -> ProjectState {
    ProjectState {
        w: assembly.w,
        h: assembly.h,
        d: assembly.d,
        material: assembly.material,
        config: assembly.config,
        feet: assembly.feet,
        faces_solid: assembly.faces_solid.clone(),
        root_void: void_to_spec(&assembly.root_void),
        panel_operations: PanelOperations {
            edge_extensions: assembly.edge_extensions.clone(),
            corner_mods: assembly.corner_mods.clone(),
            cutouts: assembly.cutouts.clone(),
        },
    }
}

/// Serialize an assembly's share-link payload to JSON.
pub fn to_json(assembly: &Assembly) -> Result<String, BoxenError> {
    serde_json::to_string(&assembly_to_project_state(assembly)).map_err(|e| BoxenError::GeometryInvariantViolation {
        detail: format!("share-link serialization failed: {e}"),
    })
}

/// Rebuild an assembly from a share-link JSON payload, rebinding panel
/// decorations to the freshly generated panel canonical keys.
pub fn from_json(json: &str, id: String) -> Result<Assembly, BoxenError> {
    let state: ProjectState =
        serde_json::from_str(json).map_err(|e| BoxenError::GeometryInvariantViolation {
            detail: format!("share-link deserialization failed: {e}"),
        })?;
    from_project_state(&state, id)
}

pub fn from_project_state(state: &ProjectState, id: String) -> Result<Assembly, BoxenError> {
    let mut assembly = Assembly::new(id, state.w, state.h, state.d, state.material)?;
    assembly.config = state.config;
    assembly.feet = state.feet;
    assembly.faces_solid = state.faces_solid.clone();

    let root_id = assembly.root_void.id.clone();
    apply_void_spec(&mut assembly, &root_id, &state.root_void)?;

    assembly.edge_extensions = state.panel_operations.edge_extensions.clone();
    assembly.corner_mods = state.panel_operations.corner_mods.clone();
    assembly.cutouts = state.panel_operations.cutouts.clone();

    Ok(assembly)
}

fn apply_void_spec(assembly: &mut Assembly, void_id: &str, spec: &VoidSpec) -> Result<(), BoxenError> {
    match spec.splits.len() {
        0 => {
            if let Some(sub_state) = &spec.sub_assembly {
                let sub_id = format!("{void_id}-sub");
                let sub = from_project_state(sub_state, sub_id)?;
                if let Some(void) = assembly.root_void.find_mut(void_id) {
                    void.sub_assembly = Some(Box::new(sub));
                }
            }
            return Ok(());
        }
        1 => {
            let split = &spec.splits[0];
            match split.mode {
                PositionMode::Absolute => {
                    assembly.add_subdivisions(void_id, split.axis, &split.positions)?;
                }
                PositionMode::Percentage => {
                    assembly.add_subdivisions_percentage(void_id, split.axis, &split.percentages)?;
                }
            }
        }
        _ => {
            let grid_specs: Vec<(Axis, Vec<f64>)> =
                spec.splits.iter().map(|s| (s.axis, s.positions.clone())).collect();
            assembly.add_grid_subdivision(void_id, &grid_specs)?;
        }
    }

    let child_ids = assembly
        .root_void
        .find(void_id)
        .map(|v| v.children.iter().map(|c| c.id.clone()).collect::<Vec<_>>())
        .unwrap_or_default();

    for (child_id, child_spec) in child_ids.iter().zip(spec.children.iter()) {
        apply_void_spec(assembly, child_id, child_spec)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_preserves_dimensions_and_subdivisions() {
        let mut assembly = Assembly::new("a".to_string(), 100.0, 80.0, 60.0, MaterialConfig::default()).unwrap();
        let root_id = assembly.root_void.id.clone();
        assembly.add_subdivision(&root_id, Axis::X, 50.0).unwrap();

        let json = to_json(&assembly).unwrap();
        let rebuilt = from_json(&json, "a2".to_string()).unwrap();

        assert_eq!(rebuilt.w, 100.0);
        assert_eq!(rebuilt.h, 80.0);
        assert_eq!(rebuilt.d, 60.0);
        assert_eq!(rebuilt.root_void.children.len(), 2);
    }

    #[test]
    fn roundtrip_preserves_edge_extensions_by_canonical_key() {
        let mut assembly = Assembly::new("a".to_string(), 100.0, 80.0, 60.0, MaterialConfig::default()).unwrap();
        assembly.set_face_solid(FaceId::Top, false);
        assembly.set_panel_edge_extension("face-front", EdgePosition::Top, 20.0).unwrap();

        let json = to_json(&assembly).unwrap();
        let rebuilt = from_json(&json, "a2".to_string()).unwrap();

        let ext = rebuilt
            .edge_extensions
            .get("face-front")
            .and_then(|m| m.get(&EdgePosition::Top))
            .copied();
        assert_eq!(ext, Some(20.0));
    }
}
