//! # Transport Buffers
//!
//! Flat numeric buffers that cross the worker boundary. Ownership of the
//! vectors moves with the message, so a buffer is transferred, never copied;
//! the sender must not touch it after handing it off.

use crate::error::MeshError;
use crate::mesh::Mesh;
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Flat mesh form used on the request and response paths.
///
/// ## Memory Layout
///
/// - `positions`: [x0, y0, z0, x1, y1, z1, ...] - 3 floats per vertex
/// - `normals`: optional, same layout and length as `positions`
/// - `indices`: optional [i0, i1, i2, ...] - 3 indices per triangle; when
///   absent, consecutive position triples form triangles
///
/// # Example
///
/// ```rust
/// use jigforge_mesh::MeshBuffers;
///
/// let buffers = MeshBuffers {
///     positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
///     normals: None,
///     indices: Some(vec![0, 1, 2]),
/// };
/// assert!(buffers.validate().is_ok());
/// assert_eq!(buffers.triangle_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshBuffers {
    /// Vertex positions, 3 floats per vertex.
    pub positions: Vec<f32>,
    /// Optional vertex normals, 3 floats per vertex.
    pub normals: Option<Vec<f32>>,
    /// Optional triangle index buffer.
    pub indices: Option<Vec<u32>>,
}

impl MeshBuffers {
    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len() / 3,
            None => self.positions.len() / 9,
        }
    }

    /// Returns true if the buffer holds no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns true if an index buffer is present.
    #[inline]
    pub fn is_indexed(&self) -> bool {
        self.indices.is_some()
    }

    /// Returns true if per-vertex normals are present.
    #[inline]
    pub fn has_normals(&self) -> bool {
        self.normals.is_some()
    }

    /// Checks the structural invariants: position length divisible by 3,
    /// normal length matching, index length divisible by 3 and every index
    /// below the vertex count, all values finite.
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.positions.len() % 3 != 0 {
            return Err(MeshError::RaggedPositions {
                len: self.positions.len(),
            });
        }

        if self.positions.iter().any(|v| !v.is_finite()) {
            return Err(MeshError::NonFinite {
                buffer: "position",
            });
        }

        if let Some(normals) = &self.normals {
            if normals.len() != self.positions.len() {
                return Err(MeshError::NormalMismatch {
                    normals: normals.len(),
                    positions: self.positions.len(),
                });
            }
            if normals.iter().any(|v| !v.is_finite()) {
                return Err(MeshError::NonFinite { buffer: "normal" });
            }
        }

        if let Some(indices) = &self.indices {
            if indices.len() % 3 != 0 {
                return Err(MeshError::RaggedIndices {
                    len: indices.len(),
                });
            }
            let vertex_count = self.vertex_count();
            for &index in indices {
                if index as usize >= vertex_count {
                    return Err(MeshError::IndexOutOfRange {
                        index,
                        vertex_count,
                    });
                }
            }
        }

        Ok(())
    }

    /// Builds transport buffers from a working mesh.
    pub fn from_mesh(mesh: &Mesh) -> Self {
        Self {
            positions: mesh.positions_f32(),
            normals: mesh.normals_f32(),
            indices: Some(mesh.indices_u32()),
        }
    }

    /// Reconstructs a working mesh. Non-indexed buffers get a sequential
    /// index buffer (every 3 positions = 1 triangle).
    pub fn to_mesh(&self) -> Mesh {
        let vertex_count = self.vertex_count();
        let mut mesh = Mesh::with_capacity(vertex_count, self.triangle_count());

        for chunk in self.positions.chunks_exact(3) {
            mesh.add_vertex(DVec3::new(
                f64::from(chunk[0]),
                f64::from(chunk[1]),
                f64::from(chunk[2]),
            ));
        }

        match &self.indices {
            Some(indices) => {
                for tri in indices.chunks_exact(3) {
                    mesh.add_triangle(tri[0], tri[1], tri[2]);
                }
            }
            None => {
                let mut i = 0u32;
                while (i as usize) < vertex_count {
                    mesh.add_triangle(i, i + 1, i + 2);
                    i += 3;
                }
            }
        }

        if let Some(normals) = &self.normals {
            let converted = normals
                .chunks_exact(3)
                .map(|n| DVec3::new(f64::from(n[0]), f64::from(n[1]), f64::from(n[2])))
                .collect();
            mesh.set_normals(converted);
        }

        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_buffers() -> MeshBuffers {
        MeshBuffers {
            positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            normals: Some(vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0]),
            indices: Some(vec![0, 1, 2]),
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(triangle_buffers().validate().is_ok());
    }

    #[test]
    fn test_validate_ragged_positions() {
        let buffers = MeshBuffers {
            positions: vec![0.0, 1.0],
            normals: None,
            indices: None,
        };
        assert!(matches!(
            buffers.validate(),
            Err(MeshError::RaggedPositions { len: 2 })
        ));
    }

    #[test]
    fn test_validate_index_out_of_range() {
        let mut buffers = triangle_buffers();
        buffers.indices = Some(vec![0, 1, 3]);
        assert!(matches!(
            buffers.validate(),
            Err(MeshError::IndexOutOfRange { index: 3, .. })
        ));
    }

    #[test]
    fn test_validate_normal_mismatch() {
        let mut buffers = triangle_buffers();
        buffers.normals = Some(vec![0.0, 0.0, 1.0]);
        assert!(matches!(
            buffers.validate(),
            Err(MeshError::NormalMismatch { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_nan() {
        let mut buffers = triangle_buffers();
        buffers.positions[0] = f32::NAN;
        assert!(matches!(
            buffers.validate(),
            Err(MeshError::NonFinite { buffer: "position" })
        ));
    }

    /// Transport round-trip must be lossless: buffers -> mesh -> buffers
    /// yields position- and index-identical data.
    #[test]
    fn test_round_trip_identical() {
        let original = triangle_buffers();
        let rebuilt = MeshBuffers::from_mesh(&original.to_mesh());
        assert_eq!(rebuilt.positions, original.positions);
        assert_eq!(rebuilt.indices, original.indices);
        assert_eq!(rebuilt.normals, original.normals);
    }

    #[test]
    fn test_to_mesh_non_indexed() {
        let buffers = MeshBuffers {
            positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            normals: None,
            indices: None,
        };
        let mesh = buffers.to_mesh();
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.triangles()[0], [0, 1, 2]);
    }
}
