//! ═══════════════════════════════════════════════════════════════════════════════
//! FILE: validator.rs | src/validator.rs
//! PURPOSE: Comprehensive validator - aggregates void/panel/joint/path checks
//! LAYER: boxen (core)
//! ═══════════════════════════════════════════════════════════════════════════════

use crate::error::{BoxenError, Diagnostics};
use crate::finger::{compute_finger_data, AssemblyFingerData};
use crate::joint::{discover_face_constraints, validate_joint};
use crate::material::Axis;
use crate::tree::Assembly;
use std::collections::HashMap;

/// Run every invariant check against the current state of an assembly and
/// its derived panels, returning a single aggregated [`Diagnostics`].
///
/// This folds together panel-path validity (already checked during
/// derivation), cross-panel joint alignment, and the void-tree structural
/// invariants that derivation alone does not observe.
pub fn validate_assembly(assembly: &Assembly) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();

    let (_panels, derive_diagnostics) = assembly.derive_panels();
    diagnostics.merge(derive_diagnostics);

    validate_joints(assembly, &mut diagnostics);
    validate_void_tree(assembly, &mut diagnostics);

    diagnostics
}

fn validate_joints(assembly: &Assembly, diagnostics: &mut Diagnostics) {
    let mut finger_cache: HashMap<Axis, AssemblyFingerData> = HashMap::new();
    for axis in [Axis::X, Axis::Y, Axis::Z] {
        let length = match axis {
            Axis::X => assembly.w,
            Axis::Y => assembly.h,
            Axis::Z => assembly.d,
        };
        if let Ok((fd, _)) = compute_finger_data(axis, length, &assembly.material) {
            finger_cache.insert(axis, fd);
        }
    }

    let constraints = discover_face_constraints(|f| assembly.is_face_solid(f));
    for constraint in &constraints {
        let Some(fd) = finger_cache.get(&constraint.axis) else {
            continue;
        };
        // Both sides of a face-to-face constraint reference the exact same
        // cached AssemblyFingerData, so this always passes for face panels;
        // it stands ready for sub-assembly boundary panels, whose finger
        // data is computed independently and could legitimately drift.
        if let Err(e) = validate_joint(constraint, fd, fd) {
            diagnostics.push_error(&e);
        }
    }
}

fn validate_void_tree(assembly: &Assembly, diagnostics: &mut Diagnostics) {
    fn walk(void: &crate::tree::Void, mt: f64, diagnostics: &mut Diagnostics) {
        for split in &void.splits {
            let mut sorted = split.positions.clone();
            sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
            for w in sorted.windows(2) {
                if (w[1] - w[0]).abs() < mt {
                    diagnostics.push_error(&BoxenError::PositionOutOfRange {
                        void_id: void.id.clone(),
                        axis: split.axis,
                        position: w[1],
                    });
                }
            }
        }
        for child in &void.children {
            walk(child, mt, diagnostics);
        }
    }

    walk(&assembly.root_void, assembly.material.thickness, diagnostics);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::MaterialConfig;

    fn material() -> MaterialConfig {
        MaterialConfig::default()
    }

    #[test]
    fn clean_box_validates_without_errors() {
        let assembly = Assembly::new("a".to_string(), 100.0, 80.0, 60.0, material()).unwrap();
        let diagnostics = validate_assembly(&assembly);
        assert!(diagnostics.is_clean());
    }

    #[test]
    fn box_with_divider_validates_without_errors() {
        let mut assembly = Assembly::new("a".to_string(), 100.0, 80.0, 60.0, material()).unwrap();
        let root_id = assembly.root_void.id.clone();
        assembly.add_subdivision(&root_id, Axis::X, 50.0).unwrap();
        let diagnostics = validate_assembly(&assembly);
        assert!(diagnostics.is_clean());
    }
}
