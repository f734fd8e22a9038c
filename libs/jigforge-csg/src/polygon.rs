//! # Polygon for BSP Operations
//!
//! Convex polygon with plane and csg.js-style splitting.

use crate::plane::{Classification, Plane};
use glam::DVec3;

/// A convex polygon with its containing plane.
#[derive(Debug, Clone)]
pub struct Polygon {
    /// Vertices in counter-clockwise order.
    vertices: Vec<DVec3>,
    /// Plane containing this polygon.
    plane: Plane,
}

impl Polygon {
    /// Create polygon from vertices.
    ///
    /// Returns None if the vertices don't form a valid polygon.
    pub fn from_vertices(vertices: Vec<DVec3>) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }
        let plane = Plane::from_points(vertices[0], vertices[1], vertices[2])?;
        Some(Self { vertices, plane })
    }

    /// Get polygon vertices.
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Get polygon plane.
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Flip the polygon in place (reverse winding order and plane).
    pub fn flip(&mut self) {
        self.vertices.reverse();
        self.plane.flip();
    }

    /// Classify this polygon relative to a plane.
    pub fn classify(&self, plane: &Plane) -> Classification {
        let mut front_count = 0;
        let mut back_count = 0;

        for &v in &self.vertices {
            match plane.classify_point(v) {
                Classification::Front => front_count += 1,
                Classification::Back => back_count += 1,
                _ => {}
            }
        }

        if front_count > 0 && back_count > 0 {
            Classification::Spanning
        } else if front_count > 0 {
            Classification::Front
        } else if back_count > 0 {
            Classification::Back
        } else {
            Classification::Coplanar
        }
    }

    /// Split polygon by a plane into the four csg.js output lists.
    ///
    /// ## Parameters
    ///
    /// - `plane`: Splitting plane
    /// - `coplanar_front`: Coplanar polygons facing the same direction
    /// - `coplanar_back`: Coplanar polygons facing the opposite direction
    /// - `front`: Polygons in front of the plane
    /// - `back`: Polygons behind the plane
    pub fn split(
        &self,
        plane: &Plane,
        coplanar_front: &mut Vec<Polygon>,
        coplanar_back: &mut Vec<Polygon>,
        front: &mut Vec<Polygon>,
        back: &mut Vec<Polygon>,
    ) {
        match self.classify(plane) {
            Classification::Coplanar => {
                if self.plane.normal().dot(plane.normal()) > 0.0 {
                    coplanar_front.push(self.clone());
                } else {
                    coplanar_back.push(self.clone());
                }
            }
            Classification::Front => front.push(self.clone()),
            Classification::Back => back.push(self.clone()),
            Classification::Spanning => {
                let mut front_verts = Vec::new();
                let mut back_verts = Vec::new();

                for i in 0..self.vertices.len() {
                    let j = (i + 1) % self.vertices.len();
                    let vi = self.vertices[i];
                    let vj = self.vertices[j];

                    let ti = plane.classify_point(vi);
                    let tj = plane.classify_point(vj);

                    if ti != Classification::Back {
                        front_verts.push(vi);
                    }
                    if ti != Classification::Front {
                        back_verts.push(vi);
                    }

                    // Edge crosses the plane: add the intersection to both sides
                    if (ti == Classification::Front && tj == Classification::Back)
                        || (ti == Classification::Back && tj == Classification::Front)
                    {
                        let di = plane.signed_distance(vi);
                        let dj = plane.signed_distance(vj);
                        let t = di / (di - dj);
                        let intersection = vi.lerp(vj, t);
                        front_verts.push(intersection);
                        back_verts.push(intersection);
                    }
                }

                if front_verts.len() >= 3 {
                    if let Some(poly) = Polygon::from_vertices(front_verts) {
                        front.push(poly);
                    }
                }
                if back_verts.len() >= 3 {
                    if let Some(poly) = Polygon::from_vertices(back_verts) {
                        back.push(poly);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_at(z: f64) -> Polygon {
        Polygon::from_vertices(vec![
            DVec3::new(0.0, 0.0, z),
            DVec3::new(1.0, 0.0, z),
            DVec3::new(0.5, 1.0, z),
        ])
        .unwrap()
    }

    #[test]
    fn test_from_vertices_rejects_short_list() {
        assert!(Polygon::from_vertices(vec![DVec3::ZERO, DVec3::X]).is_none());
    }

    #[test]
    fn test_flip_reverses_winding() {
        let mut poly = triangle_at(0.0);
        let first = poly.vertices()[0];
        poly.flip();
        assert_eq!(poly.vertices()[2], first);
        assert!((poly.plane().normal().z + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_classify_front_and_back() {
        let plane = Plane::new(DVec3::Z, 0.0);
        assert_eq!(triangle_at(1.0).classify(&plane), Classification::Front);
        assert_eq!(triangle_at(-1.0).classify(&plane), Classification::Back);
        assert_eq!(triangle_at(0.0).classify(&plane), Classification::Coplanar);
    }

    #[test]
    fn test_split_spanning_produces_both_sides() {
        let poly = Polygon::from_vertices(vec![
            DVec3::new(0.0, 0.0, -1.0),
            DVec3::new(1.0, 0.0, -1.0),
            DVec3::new(0.5, 0.0, 1.0),
        ])
        .unwrap();
        let plane = Plane::new(DVec3::Z, 0.0);

        let mut cf = Vec::new();
        let mut cb = Vec::new();
        let mut f = Vec::new();
        let mut b = Vec::new();
        poly.split(&plane, &mut cf, &mut cb, &mut f, &mut b);

        assert!(!f.is_empty(), "should have a front polygon");
        assert!(!b.is_empty(), "should have a back polygon");
    }

    #[test]
    fn test_split_coplanar_sorted_by_facing() {
        let plane = Plane::new(DVec3::Z, 0.0);
        let mut facing = triangle_at(0.0);

        let mut cf = Vec::new();
        let mut cb = Vec::new();
        let mut f = Vec::new();
        let mut b = Vec::new();
        facing.split(&plane, &mut cf, &mut cb, &mut f, &mut b);
        assert_eq!(cf.len(), 1);

        facing.flip();
        facing.split(&plane, &mut cf, &mut cb, &mut f, &mut b);
        assert_eq!(cb.len(), 1);
    }
}
