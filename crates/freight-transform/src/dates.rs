//! Date column helpers.

use chrono::NaiveDate;
use polars::prelude::*;

use freight_common::any_to_date;

use crate::error::{Result, column};

/// Parses every cell of a column; failures are `None`.
pub fn parse_date_values(col: &Column) -> Vec<Option<NaiveDate>> {
    (0..col.len())
        .map(|idx| col.get(idx).ok().and_then(any_to_date))
        .collect()
}

/// Earliest and latest parseable date, or `None` when nothing parses.
pub fn date_bounds(df: &DataFrame, date_column: &str) -> Result<Option<(NaiveDate, NaiveDate)>> {
    let dates = parse_date_values(column(df, date_column)?);
    let mut parsed = dates.into_iter().flatten();
    let Some(first) = parsed.next() else {
        return Ok(None);
    };
    Ok(Some(parsed.fold((first, first), |(min, max), d| {
        (min.min(d), max.max(d))
    })))
}

/// Distinct parseable dates, ascending.
pub fn distinct_dates(df: &DataFrame, date_column: &str) -> Result<Vec<NaiveDate>> {
    let mut dates: Vec<NaiveDate> = parse_date_values(column(df, date_column)?)
        .into_iter()
        .flatten()
        .collect();
    dates.sort_unstable();
    dates.dedup();
    Ok(dates)
}
