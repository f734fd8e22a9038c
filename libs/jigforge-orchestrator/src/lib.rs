//! # JigForge Orchestrator
//!
//! Drives the recompute lifecycle for interactive hole editing. The
//! orchestrator owns the hole set, captures the source mesh, merges the
//! cutters, submits the subtraction to a [`jigforge_worker::CsgBackend`],
//! and publishes the result, while a four-state machine guards every step
//! against drag gestures arriving mid-flight.
//!
//! The orchestrator is single-threaded and cooperative: the host calls
//! [`CsgOrchestrator::update`] once per frame, and all timing phases are
//! driven from there.

pub mod orchestrator;
pub mod state;

pub use orchestrator::{CsgOrchestrator, RecomputeTiming};
pub use state::OrchestratorState;
