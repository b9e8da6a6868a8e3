//! Date column detection over a loaded frame.
//!
//! Columns that already carry a temporal dtype are the date columns.
//! Without any, columns whose name matches a date keyword are parsed cell
//! by cell and kept when at least one cell parses.

use polars::prelude::*;

use freight_common::{any_to_date, column_key};
use freight_model::{ColumnMatchMode, DashboardConfig, Role};

use crate::resolver::{ResolvedRoles, RoleMatch, resolve};

fn is_temporal(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Date | DataType::Datetime(_, _))
}

fn has_parseable_date(col: &Column) -> bool {
    (0..col.len()).any(|idx| col.get(idx).ok().and_then(any_to_date).is_some())
}

/// Detects date columns, in frame order.
///
/// The name filter follows `mode` (substring in loose mode, equality in
/// exact mode); temporal columns qualify regardless of their name.
pub fn detect_date_columns(
    df: &DataFrame,
    keywords: &[String],
    mode: ColumnMatchMode,
) -> Vec<RoleMatch> {
    let temporal: Vec<RoleMatch> = df
        .get_columns()
        .iter()
        .filter(|col| is_temporal(col.dtype()))
        .map(|col| RoleMatch::by_dtype(col.name().as_str()))
        .collect();
    if !temporal.is_empty() {
        tracing::debug!(count = temporal.len(), "date columns found by dtype");
        return temporal;
    }

    let keyword_keys: Vec<(&String, String)> = keywords
        .iter()
        .map(|keyword| (keyword, column_key(keyword)))
        .filter(|(_, key)| !key.is_empty())
        .collect();

    let mut detected = Vec::new();
    for col in df.get_columns() {
        let name_key = column_key(col.name().as_str());
        let matched = keyword_keys.iter().find(|(_, key)| match mode {
            ColumnMatchMode::Exact => name_key == *key,
            ColumnMatchMode::Loose => name_key.contains(key.as_str()),
        });
        let Some((keyword, _)) = matched else {
            continue;
        };
        if has_parseable_date(col) {
            detected.push(RoleMatch::by_keyword(col.name().as_str(), keyword.as_str()));
        } else {
            tracing::debug!(column = %col.name(), "date-like column has no parseable values");
        }
    }
    detected
}

/// Resolves every role over a frame.
///
/// DATE is the first detected date column; the other roles come from the
/// keyword resolver over the column names.
pub fn resolve_frame(df: &DataFrame, config: &DashboardConfig) -> ResolvedRoles {
    let mode = config.matching.columns;
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let mut resolved = resolve(&names, &config.roles, mode);
    resolved.remove(Role::Date);
    if let Some(date) = detect_date_columns(df, config.roles.get(Role::Date), mode)
        .into_iter()
        .next()
    {
        resolved.insert(Role::Date, date);
    }
    tracing::info!(
        resolved = resolved.len(),
        missing = Role::ALL.len() - resolved.len(),
        "resolved column roles"
    );
    resolved
}
