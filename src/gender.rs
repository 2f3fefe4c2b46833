//! ═══════════════════════════════════════════════════════════════════════════════
//! FILE: gender.rs | src/gender.rs
//! PURPOSE: Gender resolver - per (panel, edge) male/female/none decision
//! LAYER: boxen (core)
//! ═══════════════════════════════════════════════════════════════════════════════

use crate::constants::wall_priority;
use crate::material::{AssemblyConfig, EdgePosition, FaceId, Gender, LidSide, TabDirection};

/// The face on the opposite side of a panel-local edge, for a given face panel.
///
/// Front/Back edges run along X (left/right) and Y (top/bottom); Left/Right
/// edges run along Z (front/back, folded onto left/right slots) and Y;
/// Top/Bottom edges run along X and Z.
pub fn adjacent_face(face: FaceId, edge: EdgePosition) -> FaceId {
    use EdgePosition::*;
    use FaceId::*;
    match face {
        Front | Back => match edge {
            Top => Top,
            Bottom => Bottom,
            Left => Left,
            Right => Right,
        },
        Left | Right => match edge {
            Top => Top,
            Bottom => Bottom,
            Left => Back,
            Right => Front,
        },
        Top | Bottom => match edge {
            Top => Back,
            Bottom => Front,
            Left => Left,
            Right => Right,
        },
    }
}

/// Which `LidSide` a face occupies for a given assembly axis, or `None` if
/// the face isn't a lid face under that axis.
pub fn lid_side_for_face(face: FaceId, assembly_axis: crate::material::Axis) -> Option<LidSide> {
    use crate::material::Axis;
    if face.normal_axis() != assembly_axis {
        return None;
    }
    let side = match (assembly_axis, face) {
        (Axis::X, FaceId::Right) => LidSide::Positive,
        (Axis::X, FaceId::Left) => LidSide::Negative,
        (Axis::Y, FaceId::Top) => LidSide::Positive,
        (Axis::Y, FaceId::Bottom) => LidSide::Negative,
        (Axis::Z, FaceId::Back) => LidSide::Positive,
        (Axis::Z, FaceId::Front) => LidSide::Negative,
        _ => return None,
    };
    Some(side)
}

fn lid_config_for_side(assembly: &AssemblyConfig, side: LidSide) -> crate::material::LidConfig {
    match side {
        LidSide::Positive => assembly.lid_positive,
        LidSide::Negative => assembly.lid_negative,
    }
}

fn lid_self_gender(tab_direction: TabDirection) -> Gender {
    match tab_direction {
        TabDirection::TabsOut => Gender::Male,
        TabDirection::TabsIn => Gender::Female,
    }
}

fn opposite(gender: Gender) -> Gender {
    match gender {
        Gender::Male => Gender::Female,
        Gender::Female => Gender::Male,
        Gender::None => Gender::None,
    }
}

/// Resolve the gender of one edge of one face panel.
///
/// `is_solid` reports whether a given face is currently a solid panel
/// (an open face yields `Gender::None` on any edge that meets it).
pub fn resolve_face_edge_gender(
    face: FaceId,
    edge: EdgePosition,
    assembly: &AssemblyConfig,
    is_solid: impl Fn(FaceId) -> bool,
) -> Gender {
    let adjacent = adjacent_face(face, edge);
    if !is_solid(adjacent) {
        return Gender::None;
    }

    if let Some(side) = lid_side_for_face(face, assembly.assembly_axis) {
        let cfg = lid_config_for_side(assembly, side);
        return lid_self_gender(cfg.tab_direction);
    }

    if let Some(side) = lid_side_for_face(adjacent, assembly.assembly_axis) {
        let cfg = lid_config_for_side(assembly, side);
        return opposite(lid_self_gender(cfg.tab_direction));
    }

    if wall_priority(face) < wall_priority(adjacent) {
        Gender::Male
    } else {
        Gender::Female
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Axis;

    fn all_solid(_face: FaceId) -> bool {
        true
    }

    #[test]
    fn front_vs_left_front_wins_priority() {
        let assembly = AssemblyConfig {
            assembly_axis: Axis::Y,
            ..Default::default()
        };
        let g = resolve_face_edge_gender(FaceId::Front, EdgePosition::Left, &assembly, all_solid);
        assert_eq!(g, Gender::Male);
        let g2 = resolve_face_edge_gender(FaceId::Left, EdgePosition::Right, &assembly, all_solid);
        assert_eq!(g2, Gender::Female);
    }

    #[test]
    fn open_adjacent_face_is_none() {
        let assembly = AssemblyConfig::default();
        let g = resolve_face_edge_gender(FaceId::Front, EdgePosition::Top, &assembly, |f| {
            f != FaceId::Top
        });
        assert_eq!(g, Gender::None);
    }

    #[test]
    fn lid_tabs_out_is_male_on_its_own_edges() {
        let assembly = AssemblyConfig {
            assembly_axis: Axis::Y,
            ..Default::default()
        };
        let g = resolve_face_edge_gender(FaceId::Top, EdgePosition::Left, &assembly, all_solid);
        assert_eq!(g, Gender::Male);
    }

    #[test]
    fn wall_against_lid_is_opposite_of_lid_rule() {
        let assembly = AssemblyConfig {
            assembly_axis: Axis::Y,
            ..Default::default()
        };
        // Front's top edge meets Top, a lid face with tabs-out (male); the
        // wall's edge must be the complementary female.
        let g = resolve_face_edge_gender(FaceId::Front, EdgePosition::Top, &assembly, all_solid);
        assert_eq!(g, Gender::Female);
    }
}
