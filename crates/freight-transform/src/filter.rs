//! Row filters.

use std::collections::HashSet;

use chrono::NaiveDate;
use polars::prelude::*;

use freight_common::any_to_string_non_empty;

use crate::dates::parse_date_values;
use crate::error::{Result, column};

/// Rows whose date equals `date`. Rows with unparseable dates are dropped.
pub fn filter_by_date(df: &DataFrame, date_column: &str, date: NaiveDate) -> Result<DataFrame> {
    let mask: BooleanChunked = parse_date_values(column(df, date_column)?)
        .into_iter()
        .map(|value| value == Some(date))
        .collect();
    let filtered = df.filter(&mask)?;
    tracing::debug!(
        column = date_column,
        %date,
        rows = filtered.height(),
        "filtered by date"
    );
    Ok(filtered)
}

/// Rows whose stringified value is one of `values`. An empty selection
/// keeps no rows.
pub fn filter_by_values(df: &DataFrame, value_column: &str, values: &[String]) -> Result<DataFrame> {
    let wanted: HashSet<&str> = values.iter().map(String::as_str).collect();
    let col = column(df, value_column)?;
    let mask: BooleanChunked = (0..col.len())
        .map(|idx| {
            col.get(idx)
                .ok()
                .and_then(any_to_string_non_empty)
                .is_some_and(|value| wanted.contains(value.as_str()))
        })
        .collect();
    let filtered = df.filter(&mask)?;
    tracing::debug!(
        column = value_column,
        selected = values.len(),
        rows = filtered.height(),
        "filtered by values"
    );
    Ok(filtered)
}

/// Distinct non-blank values in first-appearance order.
pub fn distinct_values(df: &DataFrame, value_column: &str) -> Result<Vec<String>> {
    let col = column(df, value_column)?;
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for idx in 0..col.len() {
        if let Some(value) = col.get(idx).ok().and_then(any_to_string_non_empty)
            && seen.insert(value.clone())
        {
            out.push(value);
        }
    }
    Ok(out)
}
