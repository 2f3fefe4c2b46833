//! ═══════════════════════════════════════════════════════════════════════════════
//! FILE: material.rs | src/material.rs
//! PURPOSE: Scalar enums and configuration structs shared across the engine
//! LAYER: boxen (foundation)
//! ═══════════════════════════════════════════════════════════════════════════════

use serde::{Deserialize, Serialize};

/// A world axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Alphabetical priority used by cross-lap notch direction (`X < Y < Z`).
    pub fn priority(self) -> u8 {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// One of the six outer faces of an assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaceId {
    Front,
    Back,
    Left,
    Right,
    Top,
    Bottom,
}

impl FaceId {
    pub const ALL: [FaceId; 6] = [
        FaceId::Front,
        FaceId::Back,
        FaceId::Left,
        FaceId::Right,
        FaceId::Top,
        FaceId::Bottom,
    ];

    /// World axis that this face's plane is perpendicular to.
    pub fn normal_axis(self) -> Axis {
        match self {
            FaceId::Front | FaceId::Back => Axis::Z,
            FaceId::Left | FaceId::Right => Axis::X,
            FaceId::Top | FaceId::Bottom => Axis::Y,
        }
    }

    pub fn canonical_key(self) -> String {
        format!("face-{}", self.slug())
    }

    pub fn slug(self) -> &'static str {
        match self {
            FaceId::Front => "front",
            FaceId::Back => "back",
            FaceId::Left => "left",
            FaceId::Right => "right",
            FaceId::Top => "top",
            FaceId::Bottom => "bottom",
        }
    }
}

/// Panel-local edge position (independent of world orientation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgePosition {
    Top,
    Bottom,
    Left,
    Right,
}

impl EdgePosition {
    pub const ALL: [EdgePosition; 4] = [
        EdgePosition::Top,
        EdgePosition::Right,
        EdgePosition::Bottom,
        EdgePosition::Left,
    ];
}

/// Finger-joint polarity for a panel edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    None,
}

/// Which pair of faces along `assemblyAxis` is being configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LidSide {
    Positive,
    Negative,
}

/// Whether a lid's tabs point outward (male) or inward (female).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TabDirection {
    TabsOut,
    TabsIn,
}

/// Finger-joint material parameters, shared by every panel in an assembly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialConfig {
    /// Sheet thickness.
    pub thickness: f64,
    /// Nominal finger width.
    pub finger_width: f64,
    /// Gap-to-finger ratio (gap width = `finger_gap * finger_width`).
    pub finger_gap: f64,
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            thickness: 3.0,
            finger_width: 12.8,
            finger_gap: 0.12,
        }
    }
}

/// Per-lid configuration (inset + tab direction).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LidConfig {
    pub tab_direction: TabDirection,
    pub inset: f64,
}

impl Default for LidConfig {
    fn default() -> Self {
        Self {
            tab_direction: TabDirection::TabsOut,
            inset: 0.0,
        }
    }
}

/// Per-assembly configuration: which axis is "up" plus lid behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssemblyConfig {
    pub assembly_axis: Axis,
    pub lid_positive: LidConfig,
    pub lid_negative: LidConfig,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            assembly_axis: Axis::Y,
            lid_positive: LidConfig::default(),
            lid_negative: LidConfig::default(),
        }
    }
}

/// Optional feet extending below wall panels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeetConfig {
    pub enabled: bool,
    pub height: f64,
    pub width: f64,
    pub inset: f64,
    pub gap: f64,
}

impl Default for FeetConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            height: 10.0,
            width: 15.0,
            inset: 5.0,
            gap: 20.0,
        }
    }
}
