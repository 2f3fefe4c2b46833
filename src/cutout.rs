//! ═══════════════════════════════════════════════════════════════════════════════
//! FILE: cutout.rs | src/cutout.rs
//! PURPOSE: Cutout engine - user holes with safe-space validation
//! LAYER: boxen (core)
//! ═══════════════════════════════════════════════════════════════════════════════

use crate::error::BoxenError;
use crate::geometry::{Bounds2, Point2, Polyline};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CutoutKind {
    Rect,
    Polygon,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cutout {
    pub id: String,
    pub kind: CutoutKind,
    pub center: Point2,
    pub width: f64,
    pub height: f64,
    pub points: Option<Vec<Point2>>,
}

impl Cutout {
    /// CW polygon for this cutout, as inserted into a panel's holes.
    pub fn to_polyline(&self) -> Polyline {
        let pts = match self.kind {
            CutoutKind::Rect => {
                let hw = self.width / 2.0;
                let hh = self.height / 2.0;
                vec![
                    Point2::new(self.center.x - hw, self.center.y - hh),
                    Point2::new(self.center.x + hw, self.center.y - hh),
                    Point2::new(self.center.x + hw, self.center.y + hh),
                    Point2::new(self.center.x - hw, self.center.y + hh),
                ]
            }
            CutoutKind::Polygon => self.points.clone().unwrap_or_default(),
        };
        let mut poly = Polyline::new(pts);
        poly.ensure_cw();
        poly
    }

    pub fn bounds(&self) -> Bounds2 {
        self.to_polyline().bounds()
    }
}

/// The subset of a panel where cutouts may be placed: the panel body
/// shrunk by `2*MT` on every edge with an active joint, plus extension
/// regions shrunk by `MT` from the body-edge boundary only.
#[derive(Debug, Clone)]
pub struct SafeSpace {
    pub regions: Vec<Bounds2>,
}

impl SafeSpace {
    pub fn contains(&self, bounds: Bounds2, margin: f64) -> bool {
        self.regions.iter().any(|r| {
            bounds.min.x > r.min.x + margin
                && bounds.min.y > r.min.y + margin
                && bounds.max.x < r.max.x - margin
                && bounds.max.y < r.max.y - margin
        })
    }
}

/// Validate a cutout lies entirely within `safe_space`, and does not
/// overlap any `existing` cutout.
pub fn validate_cutout(
    cutout: &Cutout,
    safe_space: &SafeSpace,
    existing: &[Cutout],
) -> Result<(), BoxenError> {
    use crate::constants::EPS_WALL;

    let bounds = cutout.bounds();
    if !safe_space.contains(bounds, EPS_WALL) {
        return Err(BoxenError::CutoutOutsideSafeSpace {
            panel_id: cutout.id.clone(),
        });
    }

    for other in existing {
        let ob = other.bounds();
        let overlap = bounds.min.x < ob.max.x
            && bounds.max.x > ob.min.x
            && bounds.min.y < ob.max.y
            && bounds.max.y > ob.min.y;
        if overlap {
            return Err(BoxenError::CutoutOutsideSafeSpace {
                panel_id: cutout.id.clone(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn space(min: Point2, max: Point2) -> SafeSpace {
        SafeSpace {
            regions: vec![Bounds2 { min, max }],
        }
    }

    #[test]
    fn rect_cutout_inside_safe_space_is_valid() {
        let cutout = Cutout {
            id: "c1".to_string(),
            kind: CutoutKind::Rect,
            center: Point2::new(50.0, 40.0),
            width: 10.0,
            height: 10.0,
            points: None,
        };
        let safe = space(Point2::new(0.0, 0.0), Point2::new(100.0, 80.0));
        assert!(validate_cutout(&cutout, &safe, &[]).is_ok());
    }

    #[test]
    fn rect_cutout_outside_safe_space_is_rejected() {
        let cutout = Cutout {
            id: "c1".to_string(),
            kind: CutoutKind::Rect,
            center: Point2::new(5.0, 5.0),
            width: 10.0,
            height: 10.0,
            points: None,
        };
        let safe = space(Point2::new(0.0, 0.0), Point2::new(100.0, 80.0));
        assert!(matches!(
            validate_cutout(&cutout, &safe, &[]),
            Err(BoxenError::CutoutOutsideSafeSpace { .. })
        ));
    }

    #[test]
    fn overlapping_cutouts_are_rejected() {
        let a = Cutout {
            id: "a".to_string(),
            kind: CutoutKind::Rect,
            center: Point2::new(50.0, 40.0),
            width: 10.0,
            height: 10.0,
            points: None,
        };
        let b = Cutout {
            id: "b".to_string(),
            kind: CutoutKind::Rect,
            center: Point2::new(52.0, 40.0),
            width: 10.0,
            height: 10.0,
            points: None,
        };
        let safe = space(Point2::new(0.0, 0.0), Point2::new(100.0, 80.0));
        assert!(matches!(
            validate_cutout(&b, &safe, &[a]),
            Err(BoxenError::CutoutOutsideSafeSpace { .. })
        ));
    }
}
