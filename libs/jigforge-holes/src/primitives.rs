//! # Cutter Primitives
//!
//! Tessellated cylinder and frustum construction for cutter solids, plus the
//! countersink cone-height relation.

use crate::error::HoleError;
use config::constants::MIN_FRUSTUM_HEIGHT;
use glam::DVec3;
use jigforge_mesh::Mesh;
use std::f64::consts::TAU;

/// Creates a closed cylinder or frustum with its base cap on the XY plane
/// at z = 0 and its top cap at z = `height`.
///
/// ## Parameters
///
/// - `height`: Extent along +Z, in mm
/// - `radius_bottom`: Radius of the base cap, in mm
/// - `radius_top`: Radius of the top cap, in mm
/// - `segments`: Number of wall segments (minimum 3)
///
/// ## Returns
///
/// A watertight mesh with outward-facing windings, or an error for
/// degenerate dimensions.
pub fn cylinder(
    height: f64,
    radius_bottom: f64,
    radius_top: f64,
    segments: u32,
) -> Result<Mesh, HoleError> {
    if !height.is_finite() || height <= 0.0 {
        return Err(HoleError::invalid_dimension("height", height));
    }
    if !radius_bottom.is_finite() || radius_bottom <= 0.0 {
        return Err(HoleError::invalid_dimension("radius_bottom", radius_bottom));
    }
    if !radius_top.is_finite() || radius_top <= 0.0 {
        return Err(HoleError::invalid_dimension("radius_top", radius_top));
    }
    if segments < 3 {
        return Err(HoleError::InvalidSegments { segments });
    }

    let ring = segments as usize;
    let mut mesh = Mesh::with_capacity(2 + 2 * ring, 4 * ring);

    let bottom_center = mesh.add_vertex(DVec3::ZERO);
    let top_center = mesh.add_vertex(DVec3::new(0.0, 0.0, height));

    for i in 0..segments {
        let angle = TAU * f64::from(i) / f64::from(segments);
        let (sin, cos) = angle.sin_cos();
        mesh.add_vertex(DVec3::new(radius_bottom * cos, radius_bottom * sin, 0.0));
    }
    for i in 0..segments {
        let angle = TAU * f64::from(i) / f64::from(segments);
        let (sin, cos) = angle.sin_cos();
        mesh.add_vertex(DVec3::new(radius_top * cos, radius_top * sin, height));
    }

    let bottom_ring = 2;
    let top_ring = 2 + segments;

    for i in 0..segments {
        let j = (i + 1) % segments;
        let b_i = bottom_ring + i;
        let b_j = bottom_ring + j;
        let t_i = top_ring + i;
        let t_j = top_ring + j;

        // Side quad, outward-facing
        mesh.add_triangle(b_i, b_j, t_j);
        mesh.add_triangle(b_i, t_j, t_i);

        // Caps fan around the center vertices
        mesh.add_triangle(bottom_center, b_j, b_i);
        mesh.add_triangle(top_center, t_i, t_j);
    }

    Ok(mesh)
}

/// Height of a countersink cone given bore and rim radii and the full
/// included angle, clamped to [`MIN_FRUSTUM_HEIGHT`].
///
/// A 90-degree countersink widening from a 2.5 mm bore to a 5.2 mm rim is
/// 2.7 mm tall.
pub fn countersink_frustum_height(bore_radius: f64, rim_radius: f64, angle_deg: f64) -> f64 {
    let half_angle = angle_deg.to_radians() / 2.0;
    let height = (rim_radius - bore_radius) / half_angle.tan();
    height.max(MIN_FRUSTUM_HEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cylinder_counts() {
        let mesh = cylinder(10.0, 3.0, 3.0, 16).unwrap();
        assert_eq!(mesh.vertex_count(), 2 + 2 * 16);
        assert_eq!(mesh.triangle_count(), 4 * 16);
        assert!(mesh.validate());
    }

    #[test]
    fn test_cylinder_bounds() {
        let mesh = cylinder(10.0, 3.0, 3.0, 32).unwrap();
        let (min, max) = mesh.bounding_box();
        assert_relative_eq!(min.z, 0.0);
        assert_relative_eq!(max.z, 10.0);
        assert_relative_eq!(max.x, 3.0);
        assert_relative_eq!(min.x, -3.0, epsilon = 0.1);
    }

    #[test]
    fn test_frustum_radii_differ() {
        let mesh = cylinder(4.0, 1.0, 5.0, 32).unwrap();
        let (min, max) = mesh.bounding_box();
        assert_relative_eq!(max.x, 5.0);
        assert!(mesh.validate());
        assert_relative_eq!(min.z, 0.0);
    }

    #[test]
    fn test_cylinder_rejects_degenerate() {
        assert!(cylinder(0.0, 3.0, 3.0, 32).is_err());
        assert!(cylinder(10.0, -1.0, 3.0, 32).is_err());
        assert!(cylinder(10.0, 3.0, f64::NAN, 32).is_err());
        assert!(cylinder(10.0, 3.0, 3.0, 2).is_err());
    }

    #[test]
    fn test_countersink_height_90_degrees() {
        // 5 mm bore, 10.4 mm rim, 90 degrees
        let height = countersink_frustum_height(2.5, 5.2, 90.0);
        assert_relative_eq!(height, 2.7, epsilon = 1e-12);
    }

    #[test]
    fn test_countersink_height_clamped() {
        let height = countersink_frustum_height(2.5, 2.6, 90.0);
        assert_relative_eq!(height, MIN_FRUSTUM_HEIGHT);
    }
}
