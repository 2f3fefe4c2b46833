//! ═══════════════════════════════════════════════════════════════════════════════
//! FILE: error.rs | src/error.rs
//! PURPOSE: Error and diagnostic types for the geometry engine
//! LAYER: boxen (foundation)
//! ═══════════════════════════════════════════════════════════════════════════════

use crate::material::{Axis, EdgePosition};
use serde::{Deserialize, Serialize};

/// Precondition and derivation failures.
///
/// Precondition errors are returned synchronously from `dispatch` without
/// mutating state. Derivation-time errors are aggregated into a snapshot's
/// [`Diagnostics`] instead of being thrown.
#[derive(Debug, Clone, PartialEq)]
pub enum BoxenError {
    DimensionsInfeasible { detail: String },
    MaterialInfeasible { thickness: f64, smallest_dimension: f64 },
    PositionOutOfRange { void_id: String, axis: Axis, position: f64 },
    NotALeafVoid { void_id: String },
    SubAssemblyTooLarge { void_id: String },
    ExtensionNotAllowed { panel_id: String, edge: EdgePosition },
    CornerNotEligible { panel_id: String, corner_index: usize },
    CutoutOutsideSafeSpace { panel_id: String },
    CrossLapConflict { divider_a: String, divider_b: String },
    JointAlignmentError { panel_a: String, panel_b: String, distance: f64 },
    GeometryInvariantViolation { detail: String },
}

/// Non-fatal observations recorded instead of silently altering behavior.
#[derive(Debug, Clone, PartialEq)]
pub enum BoxenWarning {
    FingerWidthClamped { axis: Axis, requested: f64, used: f64 },
    ExtensionCornerOverlap { panel_id: String, edge: EdgePosition },
    LongExtensionUnfingered { panel_id: String, edge: EdgePosition },
}

/// Aggregated `{errors, warnings}` attached to every snapshot.
///
/// This is the engine's substitute for a logging framework: derivation-time
/// problems accumulate here as structured data rather than being logged or
/// thrown, so collaborators can render, filter, or assert on them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Diagnostics {
    pub errors: Vec<DiagnosticError>,
    pub warnings: Vec<DiagnosticWarning>,
}

/// Serializable mirror of [`BoxenError`] for snapshot transport.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosticError {
    pub kind: String,
    pub detail: String,
}

/// Serializable mirror of [`BoxenWarning`] for snapshot transport.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosticWarning {
    pub kind: String,
    pub detail: String,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_error(&mut self, err: &BoxenError) {
        self.errors.push(DiagnosticError {
            kind: error_kind(err).to_string(),
            detail: format!("{:?}", err),
        });
    }

    pub fn push_warning(&mut self, warn: &BoxenWarning) {
        self.warnings.push(DiagnosticWarning {
            kind: warning_kind(warn).to_string(),
            detail: format!("{:?}", warn),
        });
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn merge(&mut self, other: Diagnostics) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

fn error_kind(err: &BoxenError) -> &'static str {
    match err {
        BoxenError::DimensionsInfeasible { .. } => "DimensionsInfeasible",
        BoxenError::MaterialInfeasible { .. } => "MaterialInfeasible",
        BoxenError::PositionOutOfRange { .. } => "PositionOutOfRange",
        BoxenError::NotALeafVoid { .. } => "NotALeafVoid",
        BoxenError::SubAssemblyTooLarge { .. } => "SubAssemblyTooLarge",
        BoxenError::ExtensionNotAllowed { .. } => "ExtensionNotAllowed",
        BoxenError::CornerNotEligible { .. } => "CornerNotEligible",
        BoxenError::CutoutOutsideSafeSpace { .. } => "CutoutOutsideSafeSpace",
        BoxenError::CrossLapConflict { .. } => "CrossLapConflict",
        BoxenError::JointAlignmentError { .. } => "JointAlignmentError",
        BoxenError::GeometryInvariantViolation { .. } => "GeometryInvariantViolation",
    }
}

fn warning_kind(warn: &BoxenWarning) -> &'static str {
    match warn {
        BoxenWarning::FingerWidthClamped { .. } => "FingerWidthClamped",
        BoxenWarning::ExtensionCornerOverlap { .. } => "ExtensionCornerOverlap",
        BoxenWarning::LongExtensionUnfingered { .. } => "LongExtensionUnfingered",
    }
}
