//! Numeric coercion.
//!
//! Tonnage and duration columns often arrive as text with stray entries
//! (`"abc"`, `"s/i"`). Coercion turns anything unparseable into null so the
//! remaining values still aggregate.

use polars::prelude::*;

use freight_common::any_to_f64;

/// Cell values as `f64`; unparseable cells are `None`.
pub fn numeric_values(col: &Column) -> Vec<Option<f64>> {
    (0..col.len())
        .map(|idx| col.get(idx).ok().and_then(any_to_f64))
        .collect()
}

/// Float64 series with the column's name and unparseable cells as null.
pub fn coerce_numeric(col: &Column) -> Series {
    let values = numeric_values(col);
    Series::new(col.name().clone(), values)
}

/// Sum of the parseable values.
pub fn numeric_sum(col: &Column) -> f64 {
    numeric_values(col).into_iter().flatten().sum()
}
