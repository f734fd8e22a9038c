//! # Mesh Errors
//!
//! Error types for mesh validation and buffer merging.

use thiserror::Error;

/// Errors that can occur while validating or converting meshes.
#[derive(Debug, Error)]
pub enum MeshError {
    /// Position buffer length is not a multiple of 3
    #[error("Ragged position buffer: {len} floats is not a multiple of 3")]
    RaggedPositions { len: usize },

    /// Normal buffer length does not match the position buffer
    #[error("Normal buffer length {normals} does not match position length {positions}")]
    NormalMismatch { normals: usize, positions: usize },

    /// Index buffer length is not a multiple of 3
    #[error("Ragged index buffer: {len} indices is not a multiple of 3")]
    RaggedIndices { len: usize },

    /// Triangle index refers past the end of the vertex buffer
    #[error("Index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    /// Buffer contains NaN or infinite values
    #[error("Non-finite value in {buffer} buffer")]
    NonFinite { buffer: &'static str },
}

/// Errors from the primary buffer-concatenation routine.
///
/// The policy wrapper in [`crate::merge`] recovers from these via the manual
/// re-indexing merge; they are surfaced so callers can observe degradation.
#[derive(Debug, Error)]
pub enum MergeError {
    /// No buffers were supplied
    #[error("Cannot merge an empty buffer list")]
    NoInputs,

    /// Input still carries an index buffer; concatenation needs de-indexed form
    #[error("Input {index} is indexed; de-index before concatenation")]
    StillIndexed { index: usize },

    /// Input is missing per-vertex normals
    #[error("Input {index} has no normals; concatenation needs uniform attributes")]
    MissingNormals { index: usize },

    /// Input failed basic validation
    #[error("Input {index} is malformed: {source}")]
    Invalid {
        index: usize,
        #[source]
        source: MeshError,
    },
}
