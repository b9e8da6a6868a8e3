//! Data wrangling for the freight dashboards.
//!
//! Every function works on an eager Polars frame plus column names coming
//! from the column resolver, and tolerates bad cells: unparseable numbers
//! and dates are treated as missing instead of failing the whole table.

#![deny(unsafe_code)]

mod aggregate;
mod dates;
mod error;
mod executive;
mod filter;
mod numeric;
mod stats;

pub use aggregate::{GroupValue, ValueCount, group_mean, group_sum, value_counts};
pub use dates::{date_bounds, distinct_dates, parse_date_values};
pub use error::{Result, TransformError};
pub use executive::{
    Alert, CompanyDelta, ComparisonInputs, DailyComparison, compare_days, pct_change,
};
pub use filter::{distinct_values, filter_by_date, filter_by_values};
pub use numeric::{coerce_numeric, numeric_sum, numeric_values};
pub use stats::{ColumnSummary, CorrelationMatrix, correlation_matrix, describe};
