//! Error types for table transformations.

use thiserror::Error;

/// Errors from filters, aggregations and comparisons.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A column named by the caller is not in the frame.
    #[error("column not found: {0}")]
    ColumnNotFound(String),

    /// A date column holds no parseable dates.
    #[error("no parseable dates in column '{column}'")]
    NoDates { column: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for transformations.
pub type Result<T> = std::result::Result<T, TransformError>;

pub(crate) fn column<'a>(
    df: &'a polars::prelude::DataFrame,
    name: &str,
) -> Result<&'a polars::prelude::Column> {
    df.column(name)
        .map_err(|_| TransformError::ColumnNotFound(name.to_string()))
}
