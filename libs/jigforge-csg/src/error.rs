//! # CSG Errors
//!
//! Error types for boolean evaluation. Evaluator failures are surfaced as
//! per-item results by the worker layer, never thrown across the pipeline.

use thiserror::Error;

/// Errors from brush preparation and boolean evaluation.
#[derive(Debug, Error)]
pub enum CsgError {
    /// Operand mesh cannot participate in a boolean operation
    #[error("Degenerate operand: {reason}")]
    DegenerateOperand { reason: String },

    /// Boolean evaluation yielded no geometry; an empty result is treated
    /// as an evaluator failure, not a valid empty solid
    #[error("Boolean evaluation produced an empty mesh")]
    EmptyResult,
}

impl CsgError {
    /// Creates a degenerate-operand error.
    pub fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateOperand {
            reason: reason.into(),
        }
    }
}
