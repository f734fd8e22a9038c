//! # Plane for BSP Operations
//!
//! Plane representation with point classification.

use glam::DVec3;

/// Epsilon for floating point comparisons.
pub(crate) const EPSILON: f64 = 1e-5;

/// Classification of a point or polygon relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// In front of the plane (positive side).
    Front,
    /// Behind the plane (negative side).
    Back,
    /// On the plane.
    Coplanar,
    /// Has vertices on both sides.
    Spanning,
}

/// A plane in 3D space defined by unit normal and distance from origin.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    /// Normal vector (unit length).
    normal: DVec3,
    /// Distance from origin along normal.
    w: f64,
}

impl Plane {
    /// Create plane from normal and distance.
    pub fn new(normal: DVec3, w: f64) -> Self {
        Self { normal, w }
    }

    /// Create plane from three points in counter-clockwise order.
    ///
    /// Returns None for a degenerate (zero-area) triangle.
    pub fn from_points(a: DVec3, b: DVec3, c: DVec3) -> Option<Self> {
        let cross = (b - a).cross(c - a);
        if cross.length() < EPSILON {
            return None;
        }
        let normal = cross.normalize();
        Some(Self {
            normal,
            w: normal.dot(a),
        })
    }

    /// Get the plane normal.
    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    /// Flip the plane in place (reverse normal).
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// Classify a point relative to this plane.
    pub fn classify_point(&self, point: DVec3) -> Classification {
        let dist = self.signed_distance(point);
        if dist > EPSILON {
            Classification::Front
        } else if dist < -EPSILON {
            Classification::Back
        } else {
            Classification::Coplanar
        }
    }

    /// Signed distance from point to plane.
    ///
    /// Positive = front, negative = back, zero = on plane.
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.w
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_from_points() {
        let plane = Plane::from_points(DVec3::ZERO, DVec3::X, DVec3::Y).unwrap();
        assert!((plane.normal().z - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_plane_from_collinear_points_is_none() {
        let plane = Plane::from_points(DVec3::ZERO, DVec3::X, DVec3::new(2.0, 0.0, 0.0));
        assert!(plane.is_none());
    }

    #[test]
    fn test_plane_classify_point() {
        let plane = Plane::new(DVec3::Z, 0.0);
        assert_eq!(plane.classify_point(DVec3::Z), Classification::Front);
        assert_eq!(plane.classify_point(-DVec3::Z), Classification::Back);
        assert_eq!(
            plane.classify_point(DVec3::new(1.0, 1.0, 0.0)),
            Classification::Coplanar
        );
    }

    #[test]
    fn test_plane_flip() {
        let mut plane = Plane::new(DVec3::Z, 5.0);
        plane.flip();
        assert!((plane.normal().z + 1.0).abs() < EPSILON);
        assert!((plane.signed_distance(DVec3::new(0.0, 0.0, -5.0))).abs() < EPSILON);
    }
}
