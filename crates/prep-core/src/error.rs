//! Error types for slice-level statistics
//!
//! Provides the error type shared by the prep-* crates for numeric failures.

use thiserror::Error;

/// Core error type for statistical operations on slices
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Two slices that must be aligned have different lengths
    #[error("Size mismatch in {context}: expected {expected}, got {actual}")]
    SizeMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for empty input
    pub fn empty_input() -> Self {
        Self::InsufficientData {
            expected: 1,
            actual: 0,
        }
    }

    /// Create an error for invalid quantile probability
    pub fn invalid_quantile(p: f64) -> Self {
        Self::InvalidParameter(format!("Quantile {p} must be in [0, 1]"))
    }

    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::SizeMismatch {
            context: context.to_string(),
            expected,
            actual,
        }
    }
}
