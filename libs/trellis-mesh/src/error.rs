//! # Mesh Errors
//!
//! Error types for mesh construction. Lookup misses (absent material, group
//! or color) are not errors: they resolve to documented defaults.

use thiserror::Error;

/// Result type for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors raised by invalid construction arguments.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    /// An argument is out of range or degenerate.
    #[error("Validation failed: {message}")]
    Validation { message: String },

    /// Two rings that must pair up point-for-point have different lengths.
    #[error("Ring lengths differ: {left} vs {right}")]
    MismatchedRings { left: usize, right: usize },

    /// A ring or polygon has fewer points than the operation needs.
    #[error("Too few points: {count} (min: {min})")]
    TooFewPoints { count: usize, min: usize },
}

impl MeshError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a too-few-points error.
    pub fn too_few_points(count: usize, min: usize) -> Self {
        Self::TooFewPoints { count, min }
    }
}
