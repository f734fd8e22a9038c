//! # Prepared Boolean Operands
//!
//! A [`Brush`] wraps a mesh as a polygon soup with a prebuilt BSP tree and
//! bounding box. Preparing an operand once lets a batch of evaluations share
//! the tree build cost; clip operations mutate trees, so each evaluation
//! clones the prepared tree instead of rebuilding it.

use crate::bsp::BspNode;
use crate::error::CsgError;
use crate::polygon::Polygon;
use glam::DVec3;
use jigforge_mesh::Mesh;

/// A mesh prepared for boolean evaluation.
#[derive(Debug, Clone)]
pub struct Brush {
    polygons: Vec<Polygon>,
    tree: BspNode,
    min: DVec3,
    max: DVec3,
}

impl Brush {
    /// Prepares a mesh for boolean evaluation.
    ///
    /// Builds the BSP tree and bounding box up front.
    ///
    /// ## Returns
    ///
    /// Error if the mesh has no non-degenerate triangles.
    pub fn prepare(mesh: &Mesh) -> Result<Self, CsgError> {
        let polygons = mesh_to_polygons(mesh);
        if polygons.is_empty() {
            return Err(CsgError::degenerate(
                "mesh has no non-degenerate triangles",
            ));
        }

        let (min, max) = bounds_of(&polygons);
        let tree = BspNode::new(polygons.clone());

        Ok(Self {
            polygons,
            tree,
            min,
            max,
        })
    }

    /// Polygons of this brush, in input order.
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// A fresh copy of the prebuilt BSP tree.
    pub fn tree(&self) -> BspNode {
        self.tree.clone()
    }

    /// Axis-aligned bounding box as (min, max).
    pub fn bounds(&self) -> (DVec3, DVec3) {
        (self.min, self.max)
    }

    /// Whether the bounding boxes of two brushes overlap.
    pub fn intersects(&self, other: &Brush) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }
}

/// Converts a mesh to BSP polygons, skipping degenerate triangles.
pub(crate) fn mesh_to_polygons(mesh: &Mesh) -> Vec<Polygon> {
    let mut polygons = Vec::with_capacity(mesh.triangle_count());

    for tri in mesh.triangles() {
        let vertices = vec![
            mesh.vertex(tri[0]),
            mesh.vertex(tri[1]),
            mesh.vertex(tri[2]),
        ];
        if let Some(poly) = Polygon::from_vertices(vertices) {
            polygons.push(poly);
        }
    }

    polygons
}

/// Converts BSP polygons back to a triangle mesh by fan triangulation.
pub(crate) fn polygons_to_mesh(polygons: &[Polygon]) -> Mesh {
    let mut mesh = Mesh::with_capacity(polygons.len() * 3, polygons.len());

    for poly in polygons {
        let verts = poly.vertices();
        if verts.len() < 3 {
            continue;
        }

        let base = mesh.vertex_count() as u32;
        for &v in verts {
            mesh.add_vertex(v);
        }
        for i in 1..verts.len() as u32 - 1 {
            mesh.add_triangle(base, base + i, base + i + 1);
        }
    }

    mesh
}

fn bounds_of(polygons: &[Polygon]) -> (DVec3, DVec3) {
    let mut min = DVec3::splat(f64::INFINITY);
    let mut max = DVec3::splat(f64::NEG_INFINITY);

    for poly in polygons {
        for &v in poly.vertices() {
            min = min.min(v);
            max = max.max(v);
        }
    }

    (min, max)
}
