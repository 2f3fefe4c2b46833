//! ═══════════════════════════════════════════════════════════════════════════════
//! FILE: finger.rs | src/finger.rs
//! PURPOSE: Finger-point computer - shared tab/slot transition points per axis
//! LAYER: boxen (core)
//! ═══════════════════════════════════════════════════════════════════════════════

use crate::error::{BoxenError, BoxenWarning};
use crate::material::{Axis, MaterialConfig};
use serde::{Deserialize, Serialize};

/// Shared finger/hole transition points for one axis of an assembly.
///
/// Every edge running along this axis, on every mating panel, derives its
/// tab/slot layout from the same `AssemblyFingerData` - this is what
/// guarantees alignment without pairwise negotiation between panels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssemblyFingerData {
    pub axis: Axis,
    /// Internal transition positions, strictly increasing, within
    /// `[inner_offset, max_joint_length - inner_offset]`.
    pub points: Vec<f64>,
    pub inner_offset: f64,
    pub max_joint_length: f64,
    /// Effective finger width actually used (may differ from the nominal
    /// `MaterialConfig::finger_width` - see [`BoxenWarning::FingerWidthClamped`]).
    pub effective_finger_width: f64,
    pub gap_width: f64,
    pub section_count: usize,
}

impl AssemblyFingerData {
    /// Section `i` is a finger (tab) section when even, a hole section when odd.
    pub fn section_is_finger(&self, index: usize) -> bool {
        index % 2 == 0
    }

    /// Start/end (local, along-axis) of section `index`.
    pub fn section_bounds(&self, index: usize) -> (f64, f64) {
        let start = if index == 0 {
            self.inner_offset
        } else {
            self.points[index - 1]
        };
        let end = if index + 1 >= self.section_count {
            self.max_joint_length - self.inner_offset
        } else {
            self.points[index]
        };
        (start, end)
    }
}

/// Compute the shared finger-point layout for one axis.
///
/// See the governing geometry rules §4.1: picks the odd section count `N`
/// whose effective finger width is closest to the nominal `finger_width`,
/// clamping down when even `N = 3` does not fit.
pub fn compute_finger_data(
    axis: Axis,
    axis_length: f64,
    material: &MaterialConfig,
) -> Result<(AssemblyFingerData, Option<BoxenWarning>), BoxenError> {
    let mt = material.thickness;
    let fw = material.finger_width;
    let fg = material.finger_gap;

    let max_joint_length = axis_length - 2.0 * mt;
    if max_joint_length <= 0.0 {
        return Err(BoxenError::DimensionsInfeasible {
            detail: format!(
                "axis length {axis_length} leaves no joint region after material thickness {mt}"
            ),
        });
    }

    // A section count of `n` (odd) alternates finger, hole, finger, ...,
    // finger - `(n+1)/2` finger sections at width `fw` and `(n-1)/2` hole
    // sections at the narrower gap width `fg*fw`. `nominal_span` is the
    // total span those sections cover at the *nominal* finger width, used
    // only to pick the best-fitting `n`.
    let finger_sections = |n: i64| -> f64 { ((n + 1) / 2) as f64 };
    let hole_sections = |n: i64| -> f64 { ((n - 1) / 2) as f64 };
    let nominal_span = |n: i64| -> f64 { fw * (finger_sections(n) + fg * hole_sections(n)) };

    // Largest feasible odd n at the nominal finger width.
    let mut max_n_feasible: i64 = 0;
    let mut n = 3i64;
    while nominal_span(n) <= max_joint_length {
        max_n_feasible = n;
        n += 2;
    }

    let mut warning = None;
    let (section_count, effective_fw) = if max_n_feasible < 3 {
        // Even N = 3 (2 finger sections, 1 hole section) does not fit at
        // nominal width: clamp finger width down so it exactly fills the
        // joint region.
        let clamped = max_joint_length / (finger_sections(3) + fg * hole_sections(3));
        if clamped <= 0.0 {
            return Err(BoxenError::DimensionsInfeasible {
                detail: format!(
                    "material thickness {mt} leaves no room for finger joints on this axis"
                ),
            });
        }
        warning = Some(BoxenWarning::FingerWidthClamped {
            axis,
            requested: fw,
            used: clamped,
        });
        (3usize, clamped)
    } else {
        // Among feasible odd n, pick the one whose effective width (sized to
        // exactly fill the joint region at that section count) is closest to
        // the nominal finger width.
        let mut best_n = 3usize;
        let mut best_diff = f64::MAX;
        let mut best_fw = fw;
        let mut n = 3i64;
        while n <= max_n_feasible {
            let eff = max_joint_length / (finger_sections(n) + fg * hole_sections(n));
            let diff = (eff - fw).abs();
            if diff < best_diff {
                best_diff = diff;
                best_n = n as usize;
                best_fw = eff;
            }
            n += 2;
        }
        (best_n, best_fw)
    };

    let gap_width = fg * effective_fw;
    let n = section_count as i64;
    let used = finger_sections(n) * effective_fw + hole_sections(n) * gap_width;
    let inner_offset = (max_joint_length - used) / 2.0;

    let mut points = Vec::with_capacity(section_count - 1);
    let mut pos = inner_offset;
    for i in 0..section_count - 1 {
        let section_len = if i % 2 == 0 { effective_fw } else { gap_width };
        pos += section_len;
        points.push(pos);
    }

    let data = AssemblyFingerData {
        axis,
        points,
        inner_offset,
        max_joint_length,
        effective_finger_width: effective_fw,
        gap_width,
        section_count,
    };

    Ok((data, warning))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mc() -> MaterialConfig {
        MaterialConfig {
            thickness: 3.0,
            finger_width: 12.8,
            finger_gap: 0.12,
        }
    }

    #[test]
    fn section_count_is_odd_and_at_least_three() {
        let (data, _) = compute_finger_data(Axis::X, 100.0, &mc()).unwrap();
        assert!(data.section_count >= 3);
        assert_eq!(data.section_count % 2, 1);
    }

    #[test]
    fn points_strictly_increasing_within_bounds() {
        let (data, _) = compute_finger_data(Axis::X, 200.0, &mc()).unwrap();
        let lo = data.inner_offset;
        let hi = data.max_joint_length - data.inner_offset;
        let mut prev = lo;
        for &p in &data.points {
            assert!(p > prev);
            assert!(p >= lo && p <= hi + 1e-9);
            prev = p;
        }
    }

    #[test]
    fn point_count_matches_section_count_minus_one() {
        let (data, _) = compute_finger_data(Axis::Y, 150.0, &mc()).unwrap();
        assert_eq!(data.points.len(), data.section_count - 1);
    }

    #[test]
    fn finger_sections_are_evenly_distributed() {
        // L=100, MT=3, FW=12.8, FG=0.12 - every finger section must share
        // the same width; the joint region must not dump its slack into
        // whichever section happens to be last.
        let (data, _) = compute_finger_data(Axis::X, 100.0, &mc()).unwrap();
        let mut finger_widths = Vec::new();
        let mut hole_widths = Vec::new();
        for i in 0..data.section_count {
            let (s, e) = data.section_bounds(i);
            let width = e - s;
            if data.section_is_finger(i) {
                finger_widths.push(width);
            } else {
                hole_widths.push(width);
            }
        }
        let first_finger = finger_widths[0];
        for w in &finger_widths {
            assert!(
                (w - first_finger).abs() < 1e-6,
                "finger sections must all share one width, got {finger_widths:?}"
            );
        }
        if let Some(&first_hole) = hole_widths.first() {
            for w in &hole_widths {
                assert!(
                    (w - first_hole).abs() < 1e-6,
                    "hole sections must all share one width, got {hole_widths:?}"
                );
            }
        }
        // The joint region should be (almost) fully consumed - no single
        // section should absorb leftover slack.
        assert!(data.inner_offset.abs() < 1e-6);
        assert!((finger_widths[0] - data.effective_finger_width).abs() < 1e-6);
    }

    #[test]
    fn tiny_axis_length_clamps_finger_width() {
        let material = MaterialConfig {
            thickness: 3.0,
            finger_width: 12.8,
            finger_gap: 0.12,
        };
        // max_joint_length = 20 - 6 = 14; nominal 3 fingers at 12.8 needs
        // 3*12.8 + 2*0.12*12.8 = 41.47, far too big - forces a clamp.
        let (data, warning) = compute_finger_data(Axis::X, 20.0, &material).unwrap();
        assert_eq!(data.section_count, 3);
        assert!(data.effective_finger_width < material.finger_width);
        assert!(matches!(warning, Some(BoxenWarning::FingerWidthClamped { .. })));
    }

    #[test]
    fn non_positive_joint_region_is_infeasible() {
        let material = mc();
        let result = compute_finger_data(Axis::X, 5.0, &material);
        assert!(matches!(result, Err(BoxenError::DimensionsInfeasible { .. })));
    }

    #[test]
    fn same_axis_length_is_deterministic() {
        let (a, _) = compute_finger_data(Axis::Z, 173.4, &mc()).unwrap();
        let (b, _) = compute_finger_data(Axis::Z, 173.4, &mc()).unwrap();
        assert_eq!(a, b);
    }
}
