use serde::{Deserialize, Serialize};

/// Hints about a source column's content.
///
/// Used to pick numeric columns for statistics and to describe columns in
/// the `inspect` preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnHint {
    /// True if more than 90% of the non-null values are numeric.
    pub is_numeric: bool,
    /// Ratio of unique values to non-null values (0.0 to 1.0).
    pub unique_ratio: f64,
    /// Ratio of null/blank values to total rows (0.0 to 1.0).
    pub null_ratio: f64,
}
