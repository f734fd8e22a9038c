//! # Boolean Evaluator
//!
//! Typed seam between callers and the boolean engine. The orchestrator and
//! worker layers talk to [`BooleanEvaluator`] only, so the BSP backend can be
//! swapped without touching them.

use crate::brush::{polygons_to_mesh, Brush};
use crate::error::CsgError;
use jigforge_mesh::Mesh;

/// Boolean operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    /// Keep geometry belonging to either operand.
    Union,
    /// Remove the cutter's volume from the target.
    Subtraction,
}

/// A boolean evaluation backend.
pub trait BooleanEvaluator {
    /// Prepares a mesh as an operand, building acceleration structures.
    fn prepare(&self, mesh: &Mesh) -> Result<Brush, CsgError>;

    /// Evaluates `target op cutter` and returns the result mesh with
    /// recomputed normals.
    fn evaluate(&self, target: &Brush, cutter: &Brush, op: BooleanOp) -> Result<Mesh, CsgError>;
}

/// BSP-tree boolean backend (csg.js clip sequences).
#[derive(Debug, Clone, Copy, Default)]
pub struct BspEvaluator;

impl BooleanEvaluator for BspEvaluator {
    fn prepare(&self, mesh: &Mesh) -> Result<Brush, CsgError> {
        Brush::prepare(mesh)
    }

    fn evaluate(&self, target: &Brush, cutter: &Brush, op: BooleanOp) -> Result<Mesh, CsgError> {
        // Disjoint operands cannot change the target under subtraction
        if op == BooleanOp::Subtraction && !target.intersects(cutter) {
            let mut mesh = polygons_to_mesh(target.polygons());
            mesh.compute_normals();
            return Ok(mesh);
        }

        // Clipping mutates the trees, so each evaluation works on clones
        // of the prepared trees.
        let mut a = target.tree();
        let mut b = cutter.tree();

        let polygons = match op {
            BooleanOp::Union => {
                a.clip_to(&b);
                b.clip_to(&a);
                b.invert();
                b.clip_to(&a);
                b.invert();

                let mut polygons = a.all_polygons();
                polygons.extend(b.all_polygons());
                polygons
            }
            BooleanOp::Subtraction => {
                a.invert();
                a.clip_to(&b);
                b.clip_to(&a);
                b.invert();
                b.clip_to(&a);
                b.invert();

                let mut polygons = a.all_polygons();
                polygons.extend(b.all_polygons());
                // Undo the initial inversion of the target
                for poly in &mut polygons {
                    poly.flip();
                }
                polygons
            }
        };

        if polygons.is_empty() {
            return Err(CsgError::EmptyResult);
        }

        let mut mesh = polygons_to_mesh(&polygons);
        if mesh.triangle_count() == 0 {
            return Err(CsgError::EmptyResult);
        }

        mesh.compute_normals();
        Ok(mesh)
    }
}
