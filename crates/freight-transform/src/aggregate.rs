//! Grouped aggregations.
//!
//! Keys are the stringified cells of the key column; blank keys are
//! skipped. Values are coerced the same way as [`crate::coerce_numeric`].

use std::cmp::Ordering;
use std::collections::HashMap;

use polars::prelude::*;
use serde::Serialize;

use freight_common::{any_to_f64, any_to_string_non_empty};

use crate::error::{Result, column};

/// Aggregated value for one key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupValue {
    pub key: String,
    pub value: f64,
    /// Rows with a numeric value in this group.
    pub rows: usize,
}

/// Occurrences of one value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

#[derive(Default)]
struct Accumulator {
    sum: f64,
    rows: usize,
}

fn accumulate(df: &DataFrame, key_column: &str, value_column: &str) -> Result<Vec<(String, Accumulator)>> {
    let keys = column(df, key_column)?;
    let values = column(df, value_column)?;
    let mut order: Vec<(String, Accumulator)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for idx in 0..df.height() {
        let Some(key) = keys.get(idx).ok().and_then(any_to_string_non_empty) else {
            continue;
        };
        let slot = match index.get(&key) {
            Some(&slot) => slot,
            None => {
                index.insert(key.clone(), order.len());
                order.push((key, Accumulator::default()));
                order.len() - 1
            }
        };
        if let Some(value) = values.get(idx).ok().and_then(any_to_f64) {
            let acc = &mut order[slot].1;
            acc.sum += value;
            acc.rows += 1;
        }
    }
    Ok(order)
}

fn by_value_desc(a: &GroupValue, b: &GroupValue) -> Ordering {
    b.value.total_cmp(&a.value).then_with(|| a.key.cmp(&b.key))
}

/// Sum of `value_column` per key, largest first (ties by key).
pub fn group_sum(df: &DataFrame, key_column: &str, value_column: &str) -> Result<Vec<GroupValue>> {
    let mut out: Vec<GroupValue> = accumulate(df, key_column, value_column)?
        .into_iter()
        .map(|(key, acc)| GroupValue {
            key,
            value: acc.sum,
            rows: acc.rows,
        })
        .collect();
    out.sort_by(by_value_desc);
    Ok(out)
}

/// Mean of `value_column` per key, largest first. Keys without a single
/// numeric value are left out.
pub fn group_mean(df: &DataFrame, key_column: &str, value_column: &str) -> Result<Vec<GroupValue>> {
    let mut out: Vec<GroupValue> = accumulate(df, key_column, value_column)?
        .into_iter()
        .filter(|(_, acc)| acc.rows > 0)
        .map(|(key, acc)| GroupValue {
            key,
            value: acc.sum / acc.rows as f64,
            rows: acc.rows,
        })
        .collect();
    out.sort_by(by_value_desc);
    Ok(out)
}

/// The `limit` most frequent non-blank values, ties by value.
pub fn value_counts(df: &DataFrame, value_column: &str, limit: usize) -> Result<Vec<ValueCount>> {
    let col = column(df, value_column)?;
    let mut counts: HashMap<String, usize> = HashMap::new();
    for idx in 0..col.len() {
        if let Some(value) = col.get(idx).ok().and_then(any_to_string_non_empty) {
            *counts.entry(value).or_default() += 1;
        }
    }
    let mut out: Vec<ValueCount> = counts
        .into_iter()
        .map(|(value, count)| ValueCount { value, count })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    out.truncate(limit);
    Ok(out)
}
