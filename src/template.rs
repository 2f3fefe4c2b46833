//! ═══════════════════════════════════════════════════════════════════════════════
//! FILE: template.rs | src/template.rs
//! PURPOSE: Template replayer - parameterized action-sequence instantiation
//! LAYER: boxen (core)
//! ═══════════════════════════════════════════════════════════════════════════════

use crate::command::{Action, Workspace};
use crate::error::BoxenError;
use crate::material::{Axis, MaterialConfig};
use serde::{Deserialize, Serialize};

/// How to compute subdivision positions for a templated axis: presently
/// only even spacing is supported, matching §4.11's `positionFormula`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PositionFormula {
    EqualSpacing,
}

/// Marks one template step as parameterizable by a leaf-void count on one
/// axis, applied independently to every leaf void current at that point in
/// the sequence (supporting multi-level templates).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubdivisionConfig {
    pub axis: Axis,
    pub default_count: usize,
    pub formula: PositionFormula,
    pub variable_name: Option<String>,
}

/// Marks a step as a single grid subdivision on the root void, parameterized
/// by an independent count per axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSubdivisionConfig {
    pub axes: Vec<(Axis, usize, Option<String>)>,
}

/// One step of a template's action sequence. Exactly one of
/// `subdivision_config` / `grid_subdivision_config` may be set; when neither
/// is, `action` is a placeholder-resolved action dispatched verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateStep {
    pub action: Action,
    pub subdivision_config: Option<SubdivisionConfig>,
    pub grid_subdivision_config: Option<GridSubdivisionConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub initial_w: f64,
    pub initial_h: f64,
    pub initial_d: f64,
    pub initial_material: MaterialConfig,
    pub steps: Vec<TemplateStep>,
}

impl Template {
    /// Every count variable a caller may override, derived from the
    /// template's steps: `width`/`height`/`depth` are always implicit.
    pub fn variable_names(&self) -> Vec<String> {
        self.steps
            .iter()
            .filter_map(|s| s.subdivision_config.as_ref())
            .filter_map(|c| c.variable_name.clone())
            .collect()
    }
}

/// User-supplied overrides when instantiating a template.
#[derive(Debug, Clone, Default)]
pub struct Instantiation {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub depth: Option<f64>,
    /// Overrides keyed by `SubdivisionConfig::variable_name`, falling back
    /// to `default_count` when absent.
    pub subdivision_counts: std::collections::HashMap<String, usize>,
}

/// Replay `template` into a fresh [`Workspace`], substituting `inputs`.
pub fn instantiate(template: &Template, inputs: &Instantiation) -> Result<Workspace, BoxenError> {
    let mut workspace = Workspace::new();
    let w = inputs.width.unwrap_or(template.initial_w);
    let h = inputs.height.unwrap_or(template.initial_h);
    let d = inputs.depth.unwrap_or(template.initial_d);
    workspace.dispatch(Action::CreateAssembly { w, h, d, material: template.initial_material })?;

    for step in &template.steps {
        if let Some(grid) = &step.grid_subdivision_config {
            let root_id = "root".to_string();
            let mut specs = Vec::new();
            for (axis, default_count, var) in &grid.axes {
                let count = var
                    .as_ref()
                    .and_then(|v| inputs.subdivision_counts.get(v))
                    .copied()
                    .unwrap_or(*default_count);
                let extent = axis_extent(workspace.scene(), *axis);
                specs.push((*axis, equal_spacing_positions(extent, count)));
            }
            workspace.dispatch(Action::AddGridSubdivision { void_id: root_id, specs })?;
            continue;
        }

        if let Some(cfg) = &step.subdivision_config {
            let count = cfg
                .variable_name
                .as_ref()
                .and_then(|v| inputs.subdivision_counts.get(v))
                .copied()
                .unwrap_or(cfg.default_count);

            let leaf_ids = leaf_void_ids(workspace.scene());
            for void_id in leaf_ids {
                let extent = void_axis_extent(workspace.scene(), &void_id, cfg.axis);
                let positions = equal_spacing_positions(extent, count)
                    .into_iter()
                    .map(|p| void_axis_origin(workspace.scene(), &void_id, cfg.axis) + p)
                    .collect();
                workspace.dispatch(Action::AddSubdivisions { void_id, axis: cfg.axis, positions })?;
            }
            continue;
        }

        workspace.dispatch(resolve_placeholders(step.action.clone()))?;
    }

    Ok(workspace)
}

/// Placeholder resolution is a no-op on this action model: void ids already
/// accept the `"root"` convention directly, and there is exactly one
/// assembly per scene, so `$assembly` needs no substitution either.
fn resolve_placeholders(action: Action) -> Action {
    action
}

fn axis_extent(scene: &crate::tree::Scene, axis: Axis) -> f64 {
    let Some(assembly) = scene.main_assembly() else { return 0.0 };
    match axis {
        Axis::X => assembly.w,
        Axis::Y => assembly.h,
        Axis::Z => assembly.d,
    }
}

fn void_axis_extent(scene: &crate::tree::Scene, void_id: &str, axis: Axis) -> f64 {
    scene
        .main_assembly()
        .and_then(|a| a.root_void.find(void_id))
        .map(|v| v.bounds.extent(axis))
        .unwrap_or(0.0)
}

fn void_axis_origin(scene: &crate::tree::Scene, void_id: &str, axis: Axis) -> f64 {
    scene
        .main_assembly()
        .and_then(|a| a.root_void.find(void_id))
        .map(|v| v.bounds.origin(axis))
        .unwrap_or(0.0)
}

fn leaf_void_ids(scene: &crate::tree::Scene) -> Vec<String> {
    fn walk(void: &crate::tree::Void, out: &mut Vec<String>) {
        if void.is_leaf() {
            out.push(void.id.clone());
        }
        for child in &void.children {
            walk(child, out);
        }
    }
    let mut out = Vec::new();
    if let Some(assembly) = scene.main_assembly() {
        walk(&assembly.root_void, &mut out);
    }
    out
}

/// `count` evenly spaced positions (local, relative to a void's own start)
/// within `[0, extent]`, excluding the endpoints.
fn equal_spacing_positions(extent: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    let step = extent / (count as f64 + 1.0);
    (1..=count).map(|i| i as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variable_names_collects_named_subdivision_configs() {
        let template = Template {
            initial_w: 100.0,
            initial_h: 80.0,
            initial_d: 60.0,
            initial_material: MaterialConfig::default(),
            steps: vec![TemplateStep {
                action: Action::AddSubdivision { void_id: "root".to_string(), axis: Axis::X, position: 50.0 },
                subdivision_config: Some(SubdivisionConfig {
                    axis: Axis::X,
                    default_count: 1,
                    formula: PositionFormula::EqualSpacing,
                    variable_name: Some("compartments".to_string()),
                }),
                grid_subdivision_config: None,
            }],
        };
        assert_eq!(template.variable_names(), vec!["compartments".to_string()]);
    }

    #[test]
    fn instantiate_applies_default_count_subdivisions() {
        let template = Template {
            initial_w: 100.0,
            initial_h: 80.0,
            initial_d: 60.0,
            initial_material: MaterialConfig::default(),
            steps: vec![TemplateStep {
                action: Action::AddSubdivision { void_id: "root".to_string(), axis: Axis::X, position: 50.0 },
                subdivision_config: Some(SubdivisionConfig {
                    axis: Axis::X,
                    default_count: 2,
                    formula: PositionFormula::EqualSpacing,
                    variable_name: Some("compartments".to_string()),
                }),
                grid_subdivision_config: None,
            }],
        };
        let workspace = instantiate(&template, &Instantiation::default()).unwrap();
        let root = &workspace.scene().main_assembly().unwrap().root_void;
        assert_eq!(root.children.len(), 3);
    }

    #[test]
    fn instantiate_honors_count_override() {
        let template = Template {
            initial_w: 120.0,
            initial_h: 80.0,
            initial_d: 60.0,
            initial_material: MaterialConfig::default(),
            steps: vec![TemplateStep {
                action: Action::AddSubdivision { void_id: "root".to_string(), axis: Axis::X, position: 40.0 },
                subdivision_config: Some(SubdivisionConfig {
                    axis: Axis::X,
                    default_count: 1,
                    formula: PositionFormula::EqualSpacing,
                    variable_name: Some("compartments".to_string()),
                }),
                grid_subdivision_config: None,
            }],
        };
        let mut inputs = Instantiation::default();
        inputs.subdivision_counts.insert("compartments".to_string(), 3);
        let workspace = instantiate(&template, &inputs).unwrap();
        let root = &workspace.scene().main_assembly().unwrap().root_void;
        assert_eq!(root.children.len(), 4);
    }
}
