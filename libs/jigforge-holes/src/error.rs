//! # Hole Construction Errors
//!
//! Construction errors only occur for dimensions that bypassed
//! sanitization; sanitized configs always build.

use thiserror::Error;

/// Errors from cutter primitive and solid construction.
#[derive(Debug, Error)]
pub enum HoleError {
    /// A dimension is non-finite or out of range
    #[error("Invalid {name}: {value}")]
    InvalidDimension { name: &'static str, value: f64 },

    /// Segment count too small to form a closed wall
    #[error("Invalid segment count: {segments} (minimum 3)")]
    InvalidSegments { segments: u32 },
}

impl HoleError {
    /// Creates an invalid-dimension error.
    pub fn invalid_dimension(name: &'static str, value: f64) -> Self {
        Self::InvalidDimension { name, value }
    }
}
