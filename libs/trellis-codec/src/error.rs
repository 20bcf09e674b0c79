//! # Codec Errors
//!
//! Error types for encoding and decoding meshes.

use thiserror::Error;
use trellis_mesh::MeshError;

use crate::text::Element;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors raised while encoding or decoding.
#[derive(Debug, Error)]
pub enum CodecError {
    /// An element string has the wrong number of segments.
    #[error("Malformed {element}: expected {expected} segments, got {actual} in {input:?}")]
    Format {
        element: Element,
        expected: usize,
        actual: usize,
        input: String,
    },

    /// A segment is labeled with the wrong key.
    #[error("Malformed {element}: expected key {expected:?}, got {actual:?}")]
    UnexpectedKey {
        element: Element,
        expected: &'static str,
        actual: String,
    },

    /// A numeric field failed to parse.
    #[error("Invalid number in {element}: {value:?}")]
    InvalidNumber { element: Element, value: String },

    /// A color is not a valid hex string.
    #[error("Invalid color: {value:?}")]
    InvalidColor { value: String },

    /// Binary input ended inside a record.
    #[error("Unexpected end of input at byte {position} (needed {needed} more)")]
    UnexpectedEof { position: usize, needed: usize },

    /// A value does not fit the selected binary width.
    #[error("Index {index} does not fit the binary width (max: {max})")]
    IndexOverflow { index: i64, max: i64 },

    /// A binary element count is negative.
    #[error("Negative element count: {count}")]
    NegativeCount { count: i64 },

    /// A binary id or index is negative.
    #[error("Negative index: {index}")]
    NegativeIndex { index: i64 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A decoded element failed mesh validation.
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

impl CodecError {
    /// Creates a segment-count error.
    pub fn format(element: Element, expected: usize, actual: usize, input: impl Into<String>) -> Self {
        Self::Format {
            element,
            expected,
            actual,
            input: input.into(),
        }
    }

    /// Creates a number parse error.
    pub fn invalid_number(element: Element, value: impl Into<String>) -> Self {
        Self::InvalidNumber {
            element,
            value: value.into(),
        }
    }
}
