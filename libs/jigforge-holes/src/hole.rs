//! # Hole Parameters
//!
//! Serializable hole descriptions and their sanitization. Hole parameters
//! arrive from interactive UI edits and persisted documents, so any field may
//! be missing-as-NaN, zero, or negative; sanitization coerces each bad field
//! to a documented default instead of failing the recompute.

use config::constants::{
    DEFAULT_COUNTERBORE_DEPTH, DEFAULT_COUNTERSINK_ANGLE_DEG, DEFAULT_ENLARGED_DIAMETER_FACTOR,
    DEFAULT_HOLE_DIAMETER,
};
use serde::{Deserialize, Serialize};

/// The head style of a hole.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "camelCase")]
pub enum HoleKind {
    /// Straight bore all the way through.
    Through,
    /// Conical recess at the top so a flat-head screw sits flush.
    #[serde(rename_all = "camelCase")]
    Countersink {
        /// Full included cone angle in degrees.
        angle_deg: f64,
        /// Diameter of the cone at the surface, in mm.
        rim_diameter: f64,
    },
    /// Cylindrical pocket at the top for a socket-head screw.
    #[serde(rename_all = "camelCase")]
    Counterbore {
        /// Pocket diameter in mm, wider than the bore.
        bore_diameter: f64,
        /// Pocket depth in mm, measured from the surface.
        bore_depth: f64,
    },
}

/// Parametric description of one hole.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoleConfig {
    /// Bore diameter in mm.
    pub diameter: f64,
    /// Head style.
    pub kind: HoleKind,
}

impl HoleConfig {
    /// A plain through hole with the given diameter.
    pub fn through(diameter: f64) -> Self {
        Self {
            diameter,
            kind: HoleKind::Through,
        }
    }

    /// Returns a copy with every invalid field coerced to its default.
    ///
    /// - Bore diameter must be finite and positive, else 3 mm.
    /// - Countersink angle must be finite in (0, 180), else 90 degrees.
    /// - Countersink rim and counterbore pocket diameters must exceed the
    ///   bore, else twice the bore diameter.
    /// - Counterbore depth must be finite and positive, else 3 mm.
    pub fn sanitized(&self) -> Self {
        let diameter = positive_or(self.diameter, DEFAULT_HOLE_DIAMETER);

        let kind = match self.kind {
            HoleKind::Through => HoleKind::Through,
            HoleKind::Countersink {
                angle_deg,
                rim_diameter,
            } => {
                let angle_deg = if angle_deg.is_finite() && angle_deg > 0.0 && angle_deg < 180.0 {
                    angle_deg
                } else {
                    DEFAULT_COUNTERSINK_ANGLE_DEG
                };
                HoleKind::Countersink {
                    angle_deg,
                    rim_diameter: enlarged_or_default(rim_diameter, diameter),
                }
            }
            HoleKind::Counterbore {
                bore_diameter,
                bore_depth,
            } => HoleKind::Counterbore {
                bore_diameter: enlarged_or_default(bore_diameter, diameter),
                bore_depth: positive_or(bore_depth, DEFAULT_COUNTERBORE_DEPTH),
            },
        };

        Self { diameter, kind }
    }
}

/// A hole placed on the target's top plane.
///
/// `x` and `y` are local coordinates on that plane; `depth` is the nominal
/// penetration along -Z from the surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedHole {
    pub config: HoleConfig,
    pub x: f64,
    pub y: f64,
    pub depth: f64,
}

fn positive_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

/// A head diameter must exceed the bore diameter to cut any material.
fn enlarged_or_default(value: f64, bore_diameter: f64) -> f64 {
    if value.is_finite() && value > bore_diameter {
        value
    } else {
        bore_diameter * DEFAULT_ENLARGED_DIAMETER_FACTOR
    }
}
