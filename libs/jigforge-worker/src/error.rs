//! # Worker Pool Errors

use thiserror::Error;

/// Errors from pool construction.
#[derive(Debug, Error)]
pub enum WorkerError {
    /// A pool needs at least one worker thread
    #[error("Invalid worker count: {count}")]
    InvalidWorkerCount { count: usize },

    /// The operating system refused to spawn a worker thread
    #[error("Failed to spawn worker thread")]
    Spawn(#[from] std::io::Error),
}
