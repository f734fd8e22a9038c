//! # Cutter Solid Construction
//!
//! Builds the cutter solid for one hole in the local surface frame: the top
//! of the target is the XY plane at z = 0 and the bore descends along -Z.
//! Every solid is extended past both surfaces by the configured end margin so
//! roundoff can never leave a skin of material.
//!
//! Countersink and counterbore heads are separate primitives unioned onto the
//! bore. When the union fails the solid falls back to a naive concatenation
//! of the two primitives, which still subtracts correctly but is not
//! manifold; the fallback is recorded in [`SolidQuality`] and logged.

use crate::error::HoleError;
use crate::hole::{HoleConfig, HoleKind};
use crate::primitives::{countersink_frustum_height, cylinder};
use config::constants::CutterConfig;
use glam::DVec3;
use jigforge_csg::{BooleanEvaluator, BooleanOp, BspEvaluator};
use jigforge_mesh::Mesh;
use tracing::warn;

/// Whether a cutter solid came out of a clean boolean union.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolidQuality {
    /// Single primitive or successful union; watertight.
    Manifold,
    /// Union failed; primitives were concatenated instead.
    ConcatFallback,
}

/// A built cutter solid.
#[derive(Debug, Clone)]
pub struct HoleSolid {
    pub mesh: Mesh,
    pub quality: SolidQuality,
}

/// Builds the cutter solid for one hole.
///
/// ## Parameters
///
/// - `config`: Hole parameters; sanitized internally
/// - `depth`: Nominal penetration in mm, must be finite and positive
/// - `cutter`: Tessellation and margin settings
///
/// ## Returns
///
/// The cutter solid with recomputed normals, spanning
/// z in [-(depth + margin), +margin].
pub fn build_hole_solid(
    config: &HoleConfig,
    depth: f64,
    cutter: &CutterConfig,
) -> Result<HoleSolid, HoleError> {
    if !depth.is_finite() || depth <= 0.0 {
        return Err(HoleError::invalid_dimension("depth", depth));
    }

    let config = config.sanitized();
    let margin = cutter.end_margin;
    let bore_radius = config.diameter / 2.0;

    // Bore spans both surfaces plus the margin at each end
    let mut bore = cylinder(depth + 2.0 * margin, bore_radius, bore_radius, cutter.segments)?;
    bore.translate(DVec3::new(0.0, 0.0, -(depth + margin)));

    let head = match config.kind {
        HoleKind::Through => None,
        HoleKind::Countersink {
            angle_deg,
            rim_diameter,
        } => {
            let rim_radius = rim_diameter / 2.0;
            let height = countersink_frustum_height(bore_radius, rim_radius, angle_deg);
            // Extend the cone slope past the surface by the margin
            let top_radius = rim_radius + margin * (rim_radius - bore_radius) / height;
            let mut cone = cylinder(height + margin, bore_radius, top_radius, cutter.segments)?;
            cone.translate(DVec3::new(0.0, 0.0, -height));
            Some(cone)
        }
        HoleKind::Counterbore {
            bore_diameter,
            bore_depth,
        } => {
            let pocket_radius = bore_diameter / 2.0;
            let mut pocket =
                cylinder(bore_depth + margin, pocket_radius, pocket_radius, cutter.segments)?;
            pocket.translate(DVec3::new(0.0, 0.0, -bore_depth));
            Some(pocket)
        }
    };

    let solid = match head {
        None => {
            let mut mesh = bore;
            mesh.compute_normals();
            HoleSolid {
                mesh,
                quality: SolidQuality::Manifold,
            }
        }
        Some(head) => union_with_fallback(bore, head),
    };

    Ok(solid)
}

/// Unions the bore and head primitives; falls back to naive concatenation
/// when the boolean evaluation fails.
fn union_with_fallback(bore: Mesh, head: Mesh) -> HoleSolid {
    let evaluator = BspEvaluator;

    let unioned = evaluator.prepare(&bore).and_then(|a| {
        let b = evaluator.prepare(&head)?;
        evaluator.evaluate(&a, &b, BooleanOp::Union)
    });

    match unioned {
        Ok(mesh) => HoleSolid {
            mesh,
            quality: SolidQuality::Manifold,
        },
        Err(error) => {
            warn!(%error, "cutter head union failed, concatenating primitives");
            let mut mesh = bore;
            mesh.merge(&head);
            mesh.compute_normals();
            HoleSolid {
                mesh,
                quality: SolidQuality::ConcatFallback,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn default_cutter() -> CutterConfig {
        CutterConfig::default()
    }

    #[test]
    fn test_through_solid_spans_margins() {
        // 6 mm hole through a 20 mm deep target
        let config = HoleConfig::through(6.0);
        let solid = build_hole_solid(&config, 20.0, &default_cutter()).unwrap();

        assert_eq!(solid.quality, SolidQuality::Manifold);
        let (min, max) = solid.mesh.bounding_box();
        assert_relative_eq!(min.z, -22.0);
        assert_relative_eq!(max.z, 2.0);
        // Full height covers depth plus both margins
        assert!(max.z - min.z >= 24.0);
        assert_relative_eq!(max.x, 3.0);
    }

    #[test]
    fn test_through_solid_has_normals() {
        let solid =
            build_hole_solid(&HoleConfig::through(4.0), 10.0, &default_cutter()).unwrap();
        assert!(solid.mesh.normals().is_some());
        assert!(solid.mesh.validate());
    }

    #[test]
    fn test_countersink_solid_widens_at_surface() {
        let config = HoleConfig {
            diameter: 5.0,
            kind: HoleKind::Countersink {
                angle_deg: 90.0,
                rim_diameter: 10.4,
            },
        };
        let solid = build_hole_solid(&config, 12.0, &default_cutter()).unwrap();

        let (min, max) = solid.mesh.bounding_box();
        // Wider than the 2.5 mm bore radius at the top
        assert!(max.x > 5.0);
        assert_relative_eq!(min.z, -14.0);
        assert_relative_eq!(max.z, 2.0);
        assert!(!solid.mesh.is_empty());
    }

    #[test]
    fn test_counterbore_solid_pocket_radius() {
        let config = HoleConfig {
            diameter: 4.0,
            kind: HoleKind::Counterbore {
                bore_diameter: 8.0,
                bore_depth: 5.0,
            },
        };
        let solid = build_hole_solid(&config, 15.0, &default_cutter()).unwrap();

        let (min, max) = solid.mesh.bounding_box();
        assert_relative_eq!(max.x, 4.0);
        assert_relative_eq!(min.z, -17.0);
    }

    #[test]
    fn test_invalid_depth_rejected() {
        let config = HoleConfig::through(6.0);
        assert!(build_hole_solid(&config, 0.0, &default_cutter()).is_err());
        assert!(build_hole_solid(&config, f64::NAN, &default_cutter()).is_err());
    }

    #[test]
    fn test_malformed_config_still_builds() {
        let config = HoleConfig {
            diameter: f64::NAN,
            kind: HoleKind::Countersink {
                angle_deg: -10.0,
                rim_diameter: 0.0,
            },
        };
        let solid = build_hole_solid(&config, 10.0, &default_cutter()).unwrap();
        assert!(!solid.mesh.is_empty());
    }
}
