//! # Buffer Concatenation
//!
//! Merging many cutter solids into one mesh. The primary routine requires
//! attribute-compatible inputs (de-indexed, with normals) and fails loudly;
//! the policy wrapper recovers via a manual re-indexing merge so a merge
//! failure never aborts a recompute cycle.

use crate::buffers::MeshBuffers;
use crate::error::MergeError;
use tracing::warn;

/// Concatenates de-indexed buffers with normals into one de-indexed buffer.
///
/// Every input must already be in the form where each triangle owns its own
/// three vertices and carries per-vertex normals; mixed indexed/non-indexed
/// or missing-normal inputs cannot be concatenated attribute-by-attribute
/// and are rejected.
///
/// ## Returns
///
/// A single de-indexed buffer, or the first incompatibility found.
pub fn concat_deindexed(inputs: &[MeshBuffers]) -> Result<MeshBuffers, MergeError> {
    if inputs.is_empty() {
        return Err(MergeError::NoInputs);
    }

    let mut total = 0;
    for (index, input) in inputs.iter().enumerate() {
        input
            .validate()
            .map_err(|source| MergeError::Invalid { index, source })?;
        if input.is_indexed() {
            return Err(MergeError::StillIndexed { index });
        }
        if !input.has_normals() {
            return Err(MergeError::MissingNormals { index });
        }
        total += input.positions.len();
    }

    let mut positions = Vec::with_capacity(total);
    let mut normals = Vec::with_capacity(total);

    for input in inputs {
        positions.extend_from_slice(&input.positions);
        if let Some(n) = &input.normals {
            normals.extend_from_slice(n);
        }
    }

    Ok(MeshBuffers {
        positions,
        normals: Some(normals),
        indices: None,
    })
}

/// Manual re-indexing merge: rebuilds a single index buffer keyed by
/// cumulative vertex offsets. Accepts any mix of indexed and non-indexed
/// inputs; normals are kept only when every input provides them.
pub fn reindex_concat(inputs: &[MeshBuffers]) -> MeshBuffers {
    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut indices = Vec::new();
    let mut keep_normals = true;

    for input in inputs {
        let offset = (positions.len() / 3) as u32;
        positions.extend_from_slice(&input.positions);

        match &input.normals {
            Some(n) if keep_normals => normals.extend_from_slice(n),
            _ => keep_normals = false,
        }

        match &input.indices {
            Some(own) => indices.extend(own.iter().map(|i| i + offset)),
            None => {
                let vertex_count = (input.positions.len() / 3) as u32;
                indices.extend((0..vertex_count).map(|i| i + offset));
            }
        }
    }

    MeshBuffers {
        positions,
        normals: if keep_normals && !normals.is_empty() {
            Some(normals)
        } else {
            None
        },
        indices: Some(indices),
    }
}

/// Policy wrapper: try the attribute-level concatenation, fall back to the
/// re-indexing merge on failure. Returns `None` only for an empty input
/// list (a defined degenerate case for the caller, not an error).
pub fn merge_with_fallback(inputs: &[MeshBuffers]) -> Option<MeshBuffers> {
    if inputs.is_empty() {
        return None;
    }

    match concat_deindexed(inputs) {
        Ok(merged) => Some(merged),
        Err(error) => {
            warn!(
                inputs = inputs.len(),
                %error,
                "primary cutter merge failed, using re-indexing fallback"
            );
            Some(reindex_concat(inputs))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_triangle(offset: f32) -> MeshBuffers {
        MeshBuffers {
            positions: vec![
                offset, 0.0, 0.0, //
                offset + 1.0, 0.0, 0.0, //
                offset, 1.0, 0.0,
            ],
            normals: Some(vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0]),
            indices: None,
        }
    }

    fn indexed_triangle() -> MeshBuffers {
        MeshBuffers {
            positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            normals: None,
            indices: Some(vec![0, 1, 2]),
        }
    }

    #[test]
    fn test_concat_deindexed_two_inputs() {
        let merged = concat_deindexed(&[flat_triangle(0.0), flat_triangle(5.0)]).unwrap();
        assert_eq!(merged.vertex_count(), 6);
        assert_eq!(merged.triangle_count(), 2);
        assert!(merged.has_normals());
        assert!(!merged.is_indexed());
    }

    #[test]
    fn test_concat_rejects_indexed_input() {
        let result = concat_deindexed(&[flat_triangle(0.0), indexed_triangle()]);
        assert!(matches!(result, Err(MergeError::StillIndexed { index: 1 })));
    }

    #[test]
    fn test_concat_rejects_missing_normals() {
        let mut input = flat_triangle(0.0);
        input.normals = None;
        assert!(matches!(
            concat_deindexed(&[input]),
            Err(MergeError::MissingNormals { index: 0 })
        ));
    }

    #[test]
    fn test_concat_rejects_empty_list() {
        assert!(matches!(concat_deindexed(&[]), Err(MergeError::NoInputs)));
    }

    #[test]
    fn test_reindex_concat_offsets_indices() {
        let merged = reindex_concat(&[indexed_triangle(), indexed_triangle()]);
        assert_eq!(merged.vertex_count(), 6);
        assert_eq!(merged.indices.as_ref().unwrap(), &vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_reindex_concat_mixed_inputs() {
        let merged = reindex_concat(&[flat_triangle(0.0), indexed_triangle()]);
        assert_eq!(merged.triangle_count(), 2);
        // One input lacks normals, so the merged result drops them
        assert!(!merged.has_normals());
        assert!(merged.validate().is_ok());
    }

    #[test]
    fn test_merge_with_fallback_recovers() {
        // Incompatible inputs force the fallback path
        let merged = merge_with_fallback(&[flat_triangle(0.0), indexed_triangle()]).unwrap();
        assert_eq!(merged.triangle_count(), 2);
    }

    #[test]
    fn test_merge_with_fallback_empty_is_none() {
        assert!(merge_with_fallback(&[]).is_none());
    }
}
