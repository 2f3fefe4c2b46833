//! ═══════════════════════════════════════════════════════════════════════════════
//! FILE: constants.rs | src/constants.rs
//! PURPOSE: Tolerances and priority tables shared across the geometry engine
//! LAYER: boxen (foundation)
//! ═══════════════════════════════════════════════════════════════════════════════

use crate::material::FaceId;

/// Minimum distance below which two points are considered coincident.
pub const EPS_POINT: f64 = 0.001;

/// Minimum clearance enforced around joint regions, slots, and cutouts.
pub const EPS_WALL: f64 = 0.01;

/// Maximum world-space drift tolerated between mating edge anchors.
pub const EPS_ALIGN: f64 = 0.01;

/// Wall priority used by the gender resolver and corner-ownership rules.
///
/// Lower value wins the shared corner (its body occupies the corner volume);
/// the higher-priority wall is inset by `MT` at that corner.
pub fn wall_priority(face: FaceId) -> u8 {
    match face {
        FaceId::Front => 1,
        FaceId::Back => 2,
        FaceId::Left => 3,
        FaceId::Right => 4,
        FaceId::Top => 5,
        FaceId::Bottom => 6,
    }
}
