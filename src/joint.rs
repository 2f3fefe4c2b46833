//! ═══════════════════════════════════════════════════════════════════════════════
//! FILE: joint.rs | src/joint.rs
//! PURPOSE: Joint validator - mating edge pair discovery and alignment checks
//! LAYER: boxen (core)
//! ═══════════════════════════════════════════════════════════════════════════════

use crate::constants::EPS_ALIGN;
use crate::error::BoxenError;
use crate::finger::AssemblyFingerData;
use crate::material::Axis;

/// A constraint between two panels that must share the same finger-point
/// layout on the axis they mate along.
#[derive(Debug, Clone, PartialEq)]
pub struct JointConstraint {
    pub panel_a: String,
    pub panel_b: String,
    pub axis: Axis,
}

/// Since every edge on a given assembly axis derives its finger layout from
/// the single shared [`AssemblyFingerData`] computed for that axis, two
/// mating panels are aligned by construction whenever they reference the
/// *same* data (same axis, same assembly). This check exists to catch the
/// only way that guarantee could be violated in practice: a caller building
/// panel outlines against a stale or mismatched finger-data snapshot.
pub fn validate_joint(
    constraint: &JointConstraint,
    fd_a: &AssemblyFingerData,
    fd_b: &AssemblyFingerData,
) -> Result<(), BoxenError> {
    if fd_a.axis != fd_b.axis {
        return Err(BoxenError::JointAlignmentError {
            panel_a: constraint.panel_a.clone(),
            panel_b: constraint.panel_b.clone(),
            distance: f64::INFINITY,
        });
    }

    if (fd_a.max_joint_length - fd_b.max_joint_length).abs() > EPS_ALIGN {
        return Err(BoxenError::JointAlignmentError {
            panel_a: constraint.panel_a.clone(),
            panel_b: constraint.panel_b.clone(),
            distance: (fd_a.max_joint_length - fd_b.max_joint_length).abs(),
        });
    }

    for (pa, pb) in fd_a.points.iter().zip(fd_b.points.iter()) {
        let distance = (pa - pb).abs();
        if distance > EPS_ALIGN {
            return Err(BoxenError::JointAlignmentError {
                panel_a: constraint.panel_a.clone(),
                panel_b: constraint.panel_b.clone(),
                distance,
            });
        }
    }

    Ok(())
}

/// Discover every mating pair among the six outer faces: for each axis,
/// every pair of solid faces that is not itself perpendicular to that axis
/// shares the axis's finger data on the edge where they meet.
pub fn discover_face_constraints(solid: impl Fn(crate::material::FaceId) -> bool) -> Vec<JointConstraint> {
    use crate::gender::adjacent_face;
    use crate::material::{EdgePosition, FaceId};

    let mut seen = std::collections::HashSet::new();
    let mut constraints = Vec::new();

    for face in FaceId::ALL {
        if !solid(face) {
            continue;
        }
        for edge in EdgePosition::ALL {
            let other = adjacent_face(face, edge);
            if other == face || !solid(other) {
                continue;
            }
            let key = {
                let mut pair = [face.slug(), other.slug()];
                pair.sort_unstable();
                (pair[0], pair[1])
            };
            if !seen.insert(key) {
                continue;
            }
            let axis = match edge {
                EdgePosition::Top | EdgePosition::Bottom => match face {
                    FaceId::Front | FaceId::Back => Axis::X,
                    FaceId::Left | FaceId::Right => Axis::Z,
                    FaceId::Top | FaceId::Bottom => Axis::X,
                },
                EdgePosition::Left | EdgePosition::Right => match face {
                    FaceId::Front | FaceId::Back => Axis::Y,
                    FaceId::Left | FaceId::Right => Axis::Y,
                    FaceId::Top | FaceId::Bottom => Axis::Z,
                },
            };
            constraints.push(JointConstraint {
                panel_a: face.canonical_key(),
                panel_b: other.canonical_key(),
                axis,
            });
        }
    }

    constraints
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finger::compute_finger_data;
    use crate::material::MaterialConfig;

    #[test]
    fn identical_axis_data_passes() {
        let material = MaterialConfig::default();
        let (fd, _) = compute_finger_data(Axis::X, 100.0, &material).unwrap();
        let constraint = JointConstraint {
            panel_a: "face-front".to_string(),
            panel_b: "face-top".to_string(),
            axis: Axis::X,
        };
        assert!(validate_joint(&constraint, &fd, &fd).is_ok());
    }

    #[test]
    fn mismatched_axis_data_fails() {
        let material = MaterialConfig::default();
        let (fd_x, _) = compute_finger_data(Axis::X, 100.0, &material).unwrap();
        let (fd_y, _) = compute_finger_data(Axis::Y, 80.0, &material).unwrap();
        let constraint = JointConstraint {
            panel_a: "face-front".to_string(),
            panel_b: "face-left".to_string(),
            axis: Axis::X,
        };
        assert!(matches!(
            validate_joint(&constraint, &fd_x, &fd_y),
            Err(BoxenError::JointAlignmentError { .. })
        ));
    }

    #[test]
    fn discover_face_constraints_finds_twelve_edges_on_a_full_box() {
        let constraints = discover_face_constraints(|_| true);
        assert_eq!(constraints.len(), 12);
    }

    #[test]
    fn open_face_drops_its_constraints() {
        let constraints = discover_face_constraints(|f| f != crate::material::FaceId::Top);
        assert_eq!(constraints.len(), 8);
    }
}
