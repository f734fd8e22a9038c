//! # Cutter Set Merging
//!
//! Turns a set of placed holes into the single cutter buffer a recompute
//! subtracts from the target. Solids are built in the local surface frame,
//! translated to world position, de-indexed, and concatenated.

use crate::hole::PlacedHole;
use crate::solid::build_hole_solid;
use config::constants::CutterConfig;
use glam::{DVec2, DVec3};
use jigforge_mesh::{merge::merge_with_fallback, MeshBuffers};
use tracing::warn;

/// World placement of the target's top surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementContext {
    /// Offset of the target's local origin in the world XY plane.
    pub origin_offset: DVec2,
    /// Additional offset from target expansion controls.
    pub expansion_offset: DVec2,
    /// World Z of the top surface; also the fallback penetration depth.
    pub top_height: f64,
}

impl PlacementContext {
    /// Context for a target at the world origin with the given thickness.
    pub fn at_origin(top_height: f64) -> Self {
        Self {
            origin_offset: DVec2::ZERO,
            expansion_offset: DVec2::ZERO,
            top_height,
        }
    }
}

/// Builds and merges the cutter solids for every placed hole.
///
/// Holes with a missing or non-positive depth fall back to the target
/// thickness so they always cut through. A hole whose solid fails to build
/// is skipped with a warning rather than aborting the whole set.
///
/// ## Returns
///
/// One merged cutter buffer, or `None` when the set is empty (the defined
/// "nothing to cut" case).
pub fn merge_hole_set(
    holes: &[PlacedHole],
    context: &PlacementContext,
    cutter: &CutterConfig,
) -> Option<MeshBuffers> {
    if holes.is_empty() {
        return None;
    }

    let mut parts = Vec::with_capacity(holes.len());

    for hole in holes {
        let depth = if hole.depth.is_finite() && hole.depth > 0.0 {
            hole.depth
        } else {
            context.top_height
        };

        match build_hole_solid(&hole.config, depth, cutter) {
            Ok(solid) => {
                let mut mesh = solid.mesh.deindexed();
                mesh.translate(DVec3::new(
                    hole.x + context.origin_offset.x + context.expansion_offset.x,
                    hole.y + context.origin_offset.y + context.expansion_offset.y,
                    context.top_height,
                ));
                // De-indexed vertices are already in triangle order; the
                // concatenation path wants them without an index buffer
                parts.push(MeshBuffers {
                    positions: mesh.positions_f32(),
                    normals: mesh.normals_f32(),
                    indices: None,
                });
            }
            Err(error) => {
                warn!(%error, x = hole.x, y = hole.y, "skipping unbuildable cutter solid");
            }
        }
    }

    merge_with_fallback(&parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hole::HoleConfig;
    use approx::assert_relative_eq;

    fn placed(x: f64, y: f64, depth: f64) -> PlacedHole {
        PlacedHole {
            config: HoleConfig::through(6.0),
            x,
            y,
            depth,
        }
    }

    #[test]
    fn test_empty_set_is_none() {
        let context = PlacementContext::at_origin(10.0);
        assert!(merge_hole_set(&[], &context, &CutterConfig::default()).is_none());
    }

    #[test]
    fn test_merged_triangle_count_is_sum() {
        let context = PlacementContext::at_origin(10.0);
        let cutter = CutterConfig::default();

        let single = merge_hole_set(&[placed(0.0, 0.0, 10.0)], &context, &cutter).unwrap();
        let pair = merge_hole_set(
            &[placed(0.0, 0.0, 10.0), placed(20.0, 0.0, 10.0)],
            &context,
            &cutter,
        )
        .unwrap();

        assert_eq!(pair.triangle_count(), 2 * single.triangle_count());
        assert!(pair.has_normals());
        assert!(!pair.is_indexed());
    }

    #[test]
    fn test_placement_offsets_applied() {
        let context = PlacementContext {
            origin_offset: DVec2::new(100.0, 0.0),
            expansion_offset: DVec2::new(0.0, 5.0),
            top_height: 8.0,
        };
        let merged = merge_hole_set(
            &[placed(1.0, 2.0, 8.0)],
            &context,
            &CutterConfig::default(),
        )
        .unwrap();

        let mesh = merged.to_mesh();
        let (min, max) = mesh.bounding_box();
        // Hole centered at (101, 7), radius 3; top at z = 8 plus margin.
        // Positions round-trip through f32, so compare loosely.
        assert_relative_eq!((min.x + max.x) / 2.0, 101.0, epsilon = 1e-4);
        assert_relative_eq!((min.y + max.y) / 2.0, 7.0, epsilon = 1e-4);
        assert_relative_eq!(max.z, 10.0);
        assert_relative_eq!(min.z, -2.0);
    }

    #[test]
    fn test_invalid_depth_falls_back_to_thickness() {
        let context = PlacementContext::at_origin(12.0);
        let merged = merge_hole_set(
            &[placed(0.0, 0.0, f64::NAN)],
            &context,
            &CutterConfig::default(),
        )
        .unwrap();

        let (min, _) = merged.to_mesh().bounding_box();
        // Depth 12 plus the 2 mm margin, translated up to the surface
        assert_relative_eq!(min.z, -2.0);
    }
}
