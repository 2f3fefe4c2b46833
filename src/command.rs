//! ═══════════════════════════════════════════════════════════════════════════════
//! FILE: command.rs | src/command.rs
//! PURPOSE: Command/event layer - single-writer dispatch, preview, undo/redo
//! LAYER: boxen (core)
//! ═══════════════════════════════════════════════════════════════════════════════

use crate::cutout::Cutout;
use crate::error::BoxenError;
use crate::material::{Axis, EdgePosition, FaceId, FeetConfig, LidConfig, LidSide, MaterialConfig};
use crate::panel::CornerKind;
use crate::tree::Scene;

/// Every mutation the engine accepts, replayed verbatim by [`Workspace::undo`]
/// and by the template replayer.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    CreateAssembly { w: f64, h: f64, d: f64, material: MaterialConfig },
    SetDimensions { w: Option<f64>, h: Option<f64>, d: Option<f64> },
    SetMaterial { material: MaterialConfig },
    SetFaceSolid { face: FaceId, solid: bool },
    SetFeetConfig { feet: FeetConfig },
    AddSubdivision { void_id: String, axis: Axis, position: f64 },
    AddSubdivisions { void_id: String, axis: Axis, positions: Vec<f64> },
    AddSubdivisionsPercentage { void_id: String, axis: Axis, percentages: Vec<f64> },
    AddGridSubdivision { void_id: String, specs: Vec<(Axis, Vec<f64>)> },
    RemoveSubdivision { void_id: String },
    SetAssemblyAxis { axis: Axis },
    SetLidConfig { side: LidSide, config: LidConfig },
    CreateSubAssembly { void_id: String, clearance: f64, axis: Axis },
    RemoveSubAssembly { void_id: String },
    SetPanelEdgeExtension { panel_id: String, edge: EdgePosition, value: f64 },
    SetPanelCornerFillet { panel_id: String, corner_key: (usize, usize), radius: f64, kind: CornerKind },
    SetAllCornerFilletsBatch { panel_id: String, entries: Vec<((usize, usize), f64, CornerKind)> },
    AddCutout { panel_id: String, cutout: Cutout },
    RemoveCutout { panel_id: String, cutout_id: String },
}

/// One applied action plus the scene snapshot (serialized) it produced,
/// so `undo` can restore prior state without re-deriving from scratch.
struct HistoryEntry {
    action: Action,
    scene_before: Scene,
}

/// Owns the live [`Scene`] plus its undo stack and an optional preview
/// overlay. All mutation flows through [`Workspace::dispatch`] - this is the
/// engine's single writer.
pub struct Workspace {
    scene: Scene,
    history: Vec<HistoryEntry>,
    redo_stack: Vec<HistoryEntry>,
    preview: Option<Scene>,
    on_snapshot_changed: Option<Box<dyn FnMut(&Scene)>>,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            history: Vec::new(),
            redo_stack: Vec::new(),
            preview: None,
            on_snapshot_changed: None,
        }
    }

    pub fn on_snapshot_changed(&mut self, callback: impl FnMut(&Scene) + 'static) {
        self.on_snapshot_changed = Some(Box::new(callback));
    }

    pub fn scene(&self) -> &Scene {
        self.preview.as_ref().unwrap_or(&self.scene)
    }

    /// Apply `action` to the committed scene, pushing it onto the undo stack
    /// and clearing any pending redo history. Fails synchronously, without
    /// mutating state, on a precondition violation.
    pub fn dispatch(&mut self, action: Action) -> Result<(), BoxenError> {
        let scene_before = self.scene.clone();
        apply(&mut self.scene, &action)?;
        self.history.push(HistoryEntry { action, scene_before });
        self.redo_stack.clear();
        self.notify();
        Ok(())
    }

    /// Begin a preview overlay: `action` is applied to a scratch copy of the
    /// scene, visible via [`Workspace::scene`], without touching undo history.
    pub fn start_preview(&mut self, action: Action) -> Result<(), BoxenError> {
        let mut preview = self.scene.clone();
        apply(&mut preview, &action)?;
        self.preview = Some(preview);
        self.notify();
        Ok(())
    }

    /// Fold the current preview into committed state, as if it had been
    /// dispatched directly.
    pub fn commit_preview(&mut self, action: Action) -> Result<(), BoxenError> {
        self.preview = None;
        self.dispatch(action)
    }

    /// Drop the preview overlay, reverting to committed state.
    pub fn discard_preview(&mut self) {
        self.preview = None;
        self.notify();
    }

    pub fn undo(&mut self) -> bool {
        let Some(entry) = self.history.pop() else {
            return false;
        };
        let reverted = std::mem::replace(&mut self.scene, entry.scene_before.clone());
        self.redo_stack.push(HistoryEntry {
            action: entry.action,
            scene_before: reverted,
        });
        self.notify();
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(entry) = self.redo_stack.pop() else {
            return false;
        };
        let mut scene = entry.scene_before.clone();
        if apply(&mut scene, &entry.action).is_err() {
            self.redo_stack.push(entry);
            return false;
        }
        self.history.push(HistoryEntry {
            action: entry.action,
            scene_before: entry.scene_before,
        });
        self.scene = scene;
        self.notify();
        true
    }

    fn notify(&mut self) {
        if let Some(cb) = self.on_snapshot_changed.as_mut() {
            cb(self.scene());
        }
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

fn apply(scene: &mut Scene, action: &Action) -> Result<(), BoxenError> {
    match action {
        Action::CreateAssembly { w, h, d, material } => {
            scene.create_assembly(*w, *h, *d, *material)?;
            Ok(())
        }
        Action::SetDimensions { w, h, d } => with_main(scene, |a| a.set_dimensions(*w, *h, *d)),
        Action::SetMaterial { material } => with_main(scene, |a| a.set_material(*material)),
        Action::SetFaceSolid { face, solid } => with_main(scene, |a| {
            a.set_face_solid(*face, *solid);
            Ok(())
        }),
        Action::SetFeetConfig { feet } => with_main(scene, |a| {
            a.set_feet_config(*feet);
            Ok(())
        }),
        Action::AddSubdivision { void_id, axis, position } => {
            with_main(scene, |a| a.add_subdivision(void_id, *axis, *position))
        }
        Action::AddSubdivisions { void_id, axis, positions } => {
            with_main(scene, |a| a.add_subdivisions(void_id, *axis, positions))
        }
        Action::AddSubdivisionsPercentage { void_id, axis, percentages } => {
            with_main(scene, |a| a.add_subdivisions_percentage(void_id, *axis, percentages))
        }
        Action::AddGridSubdivision { void_id, specs } => {
            with_main(scene, |a| a.add_grid_subdivision(void_id, specs))
        }
        Action::RemoveSubdivision { void_id } => with_main(scene, |a| a.remove_subdivision(void_id)),
        Action::SetAssemblyAxis { axis } => with_main(scene, |a| {
            a.set_assembly_axis(*axis);
            Ok(())
        }),
        Action::SetLidConfig { side, config } => with_main(scene, |a| a.set_lid_config(*side, *config)),
        Action::CreateSubAssembly { void_id, clearance, axis } => {
            with_main(scene, |a| a.create_sub_assembly(void_id, *clearance, *axis))
        }
        Action::RemoveSubAssembly { void_id } => with_main(scene, |a| a.remove_sub_assembly(void_id)),
        Action::SetPanelEdgeExtension { panel_id, edge, value } => {
            with_main(scene, |a| a.set_panel_edge_extension(panel_id, *edge, *value))
        }
        Action::SetPanelCornerFillet { panel_id, corner_key, radius, kind } => {
            with_main(scene, |a| a.set_panel_corner_fillet(panel_id, *corner_key, *radius, *kind))
        }
        Action::SetAllCornerFilletsBatch { panel_id, entries } => {
            with_main(scene, |a| a.set_all_corner_fillets_batch(panel_id, entries))
        }
        Action::AddCutout { panel_id, cutout } => {
            with_main(scene, |a| a.add_cutout(panel_id, cutout.clone()))
        }
        Action::RemoveCutout { panel_id, cutout_id } => with_main(scene, |a| {
            a.remove_cutout(panel_id, cutout_id);
            Ok(())
        }),
    }
}

fn with_main(
    scene: &mut Scene,
    f: impl FnOnce(&mut crate::tree::Assembly) -> Result<(), BoxenError>,
) -> Result<(), BoxenError> {
    let assembly = scene
        .main_assembly_mut()
        .ok_or_else(|| BoxenError::DimensionsInfeasible {
            detail: "no assembly exists yet".to_string(),
        })?;
    f(assembly)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn material() -> MaterialConfig {
        MaterialConfig::default()
    }

    #[test]
    fn dispatch_create_then_subdivide() {
        let mut ws = Workspace::new();
        ws.dispatch(Action::CreateAssembly { w: 100.0, h: 80.0, d: 60.0, material: material() })
            .unwrap();
        let root_id = ws.scene().main_assembly().unwrap().root_void.id.clone();
        ws.dispatch(Action::AddSubdivision { void_id: root_id, axis: Axis::X, position: 50.0 })
            .unwrap();
        assert_eq!(ws.scene().main_assembly().unwrap().root_void.children.len(), 2);
    }

    #[test]
    fn undo_reverts_last_action() {
        let mut ws = Workspace::new();
        ws.dispatch(Action::CreateAssembly { w: 100.0, h: 80.0, d: 60.0, material: material() })
            .unwrap();
        let root_id = ws.scene().main_assembly().unwrap().root_void.id.clone();
        ws.dispatch(Action::AddSubdivision { void_id: root_id, axis: Axis::X, position: 50.0 })
            .unwrap();
        assert!(ws.undo());
        assert!(ws.scene().main_assembly().unwrap().root_void.children.is_empty());
    }

    #[test]
    fn redo_reapplies_undone_action() {
        let mut ws = Workspace::new();
        ws.dispatch(Action::CreateAssembly { w: 100.0, h: 80.0, d: 60.0, material: material() })
            .unwrap();
        let root_id = ws.scene().main_assembly().unwrap().root_void.id.clone();
        ws.dispatch(Action::AddSubdivision { void_id: root_id, axis: Axis::X, position: 50.0 })
            .unwrap();
        ws.undo();
        assert!(ws.redo());
        assert_eq!(ws.scene().main_assembly().unwrap().root_void.children.len(), 2);
    }

    #[test]
    fn preview_does_not_touch_committed_scene_until_committed() {
        let mut ws = Workspace::new();
        ws.dispatch(Action::CreateAssembly { w: 100.0, h: 80.0, d: 60.0, material: material() })
            .unwrap();
        let root_id = ws.scene().main_assembly().unwrap().root_void.id.clone();
        ws.start_preview(Action::AddSubdivision { void_id: root_id.clone(), axis: Axis::X, position: 50.0 })
            .unwrap();
        assert_eq!(ws.scene().main_assembly().unwrap().root_void.children.len(), 2);
        ws.discard_preview();
        assert!(ws.scene().main_assembly().unwrap().root_void.children.is_empty());
    }
}
