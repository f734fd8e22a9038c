//! # JigForge Worker
//!
//! Boolean evaluation off the interaction thread. Subtraction jobs move to a
//! pool of worker threads as serializable [`WorkerRequest`] values; buffer
//! ownership moves through the channel, so no mesh data is copied between
//! threads. Responses stream back per job: progress per batch item, a
//! per-item result vector for batches, and a terminal result or error.
//!
//! The [`CsgBackend`] trait is the seam the orchestrator depends on, so
//! tests can substitute a scripted backend for the real pool.

pub mod error;
pub mod exec;
pub mod pool;
pub mod protocol;

pub use error::WorkerError;
pub use pool::{CsgBackend, WorkerPool};
pub use protocol::{BatchItem, BatchTarget, WorkerRequest, WorkerResponse};
