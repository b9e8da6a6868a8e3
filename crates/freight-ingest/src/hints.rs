//! Column hints.

use std::collections::{BTreeMap, BTreeSet};

use polars::prelude::*;

use freight_common::{any_to_string, parse_f64};
use freight_model::ColumnHint;

/// Builds a hint for every column, keyed by column name.
pub fn build_column_hints(df: &DataFrame) -> BTreeMap<String, ColumnHint> {
    df.get_columns()
        .iter()
        .map(|col| (col.name().to_string(), analyze_column(col)))
        .collect()
}

/// Names of the columns whose hint says numeric, in frame order.
pub fn numeric_columns(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|col| analyze_column(col).is_numeric)
        .map(|col| col.name().to_string())
        .collect()
}

fn analyze_column(col: &Column) -> ColumnHint {
    let total = col.len();
    if total == 0 {
        return ColumnHint {
            is_numeric: false,
            unique_ratio: 0.0,
            null_ratio: 1.0,
        };
    }

    let native_numeric = col.dtype().is_numeric();
    let mut null_count = 0usize;
    let mut numeric_count = 0usize;
    let mut unique_values: BTreeSet<String> = BTreeSet::new();

    for idx in 0..total {
        let value = col.get(idx).map(any_to_string).unwrap_or_default();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            null_count += 1;
            continue;
        }
        if native_numeric || parse_f64(trimmed).is_some() {
            numeric_count += 1;
        }
        unique_values.insert(trimmed.to_string());
    }

    let non_null = total - null_count;
    let unique_ratio = if non_null > 0 {
        unique_values.len() as f64 / non_null as f64
    } else {
        0.0
    };

    ColumnHint {
        is_numeric: non_null > 0 && (numeric_count as f64 / non_null as f64) > 0.9,
        unique_ratio,
        null_ratio: null_count as f64 / total as f64,
    }
}
