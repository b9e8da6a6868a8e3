//! Row previews for display.

use polars::prelude::*;

use freight_common::any_to_string;

/// Column names in frame order.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}

/// First `n` rows rendered as strings; nulls become empty strings.
pub fn preview(df: &DataFrame, n: usize) -> Vec<Vec<String>> {
    let rows = n.min(df.height());
    (0..rows)
        .map(|row| {
            df.get_columns()
                .iter()
                .map(|col| col.get(row).map(any_to_string).unwrap_or_default())
                .collect()
        })
        .collect()
}
