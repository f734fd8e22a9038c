//! # Worker Protocol
//!
//! Serializable request and response types for subtraction jobs. The
//! protocol is transport-agnostic: in-process pools move the values through
//! channels, and the serde derives keep the shapes stable for any
//! out-of-process transport.

use jigforge_mesh::MeshBuffers;
use serde::{Deserialize, Serialize};

/// A job submitted to the worker pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WorkerRequest {
    /// Subtract one cutter from one target.
    #[serde(rename_all = "camelCase")]
    SubtractSingle {
        job_id: u64,
        target: MeshBuffers,
        cutter: MeshBuffers,
    },
    /// Subtract one shared cutter from several targets.
    ///
    /// The cutter's acceleration structure is built once for the whole
    /// batch.
    #[serde(rename_all = "camelCase")]
    SubtractBatch {
        job_id: u64,
        targets: Vec<BatchTarget>,
        cutter: MeshBuffers,
    },
}

impl WorkerRequest {
    /// The job identifier carried by this request.
    pub fn job_id(&self) -> u64 {
        match self {
            Self::SubtractSingle { job_id, .. } | Self::SubtractBatch { job_id, .. } => *job_id,
        }
    }
}

/// One target in a batch request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchTarget {
    /// Caller-chosen identifier echoed back in progress and results.
    pub id: String,
    pub mesh: MeshBuffers,
}

/// A message emitted while executing a job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WorkerResponse {
    /// Terminal result of a single subtraction.
    #[serde(rename_all = "camelCase")]
    Result { job_id: u64, mesh: MeshBuffers },
    /// Terminal per-item results of a batch.
    #[serde(rename_all = "camelCase")]
    BatchResult { job_id: u64, items: Vec<BatchItem> },
    /// Emitted after each batch item completes.
    #[serde(rename_all = "camelCase")]
    Progress {
        job_id: u64,
        current: usize,
        total: usize,
        target_id: String,
    },
    /// Terminal failure of the whole job.
    #[serde(rename_all = "camelCase")]
    Error { job_id: u64, message: String },
}

/// Outcome of one batch item. A failed item carries its error message and
/// never aborts the rest of the batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItem {
    pub target_id: String,
    pub success: bool,
    pub mesh: Option<MeshBuffers>,
    pub error: Option<String>,
}

impl BatchItem {
    /// A successful item.
    pub fn ok(target_id: String, mesh: MeshBuffers) -> Self {
        Self {
            target_id,
            success: true,
            mesh: Some(mesh),
            error: None,
        }
    }

    /// A failed item.
    pub fn failed(target_id: String, message: String) -> Self {
        Self {
            target_id,
            success: false,
            mesh: None,
            error: Some(message),
        }
    }
}
