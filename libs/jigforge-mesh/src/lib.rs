//! # JigForge Mesh
//!
//! Triangle mesh core for the JigForge fixture-design pipeline.
//!
//! ## Architecture
//!
//! ```text
//! Mesh (f64, indexed)  <->  MeshBuffers (f32, transport form)
//! ```
//!
//! `Mesh` is the working representation used by the boolean kernel and the
//! hole builders. `MeshBuffers` is the flat form that crosses the worker
//! boundary: ownership of its vectors moves with the message, so buffers
//! are transferred, never copied.

pub mod buffers;
pub mod error;
pub mod merge;
pub mod mesh;

pub use buffers::MeshBuffers;
pub use error::{MergeError, MeshError};
pub use mesh::Mesh;
