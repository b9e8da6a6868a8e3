//! Error types for company normalization.

use thiserror::Error;

/// Errors from applying the normalizer to a frame.
#[derive(Debug, Error)]
pub enum NormalizationError {
    /// The company column is not in the frame.
    #[error("column not found: {0}")]
    ColumnNotFound(String),

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for NormalizationError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for normalization operations.
pub type Result<T> = std::result::Result<T, NormalizationError>;
