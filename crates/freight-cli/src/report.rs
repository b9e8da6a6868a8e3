//! Report builders behind the `inspect`, `normalize`, `dashboard` and
//! `compare` commands.
//!
//! Builders return plain serializable data; rendering lives in the binary.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use polars::prelude::{DataFrame, DataType};
use serde::Serialize;
use tracing::{debug, info, warn};

use freight_ingest::{build_column_hints, column_names, numeric_columns, preview, read_table};
use freight_map::{ResolvedRoles, detect_date_columns, resolve_frame};
use freight_model::{ColumnHint, DashboardConfig, Role};
use freight_normalization::{
    CompanyMapping, CompanyNormalizer, distinct_mappings, normalize_column,
};
use freight_transform::{
    ColumnSummary, ComparisonInputs, CorrelationMatrix, DailyComparison, GroupValue, ValueCount,
    compare_days, correlation_matrix, date_bounds, describe, distinct_dates, distinct_values,
    filter_by_date, filter_by_values, group_mean, group_sum, numeric_sum, value_counts,
};

use crate::logging::redact_value;

/// Name of the derived column holding canonical company names.
pub const CANONICAL_COMPANY_COLUMN: &str = "company_canonical";

/// Text columns counted when no role column is available for value counts.
pub const FALLBACK_COUNT_COLUMNS: usize = 3;

/// Numeric columns included in the correlation matrix.
pub const CORRELATION_COLUMNS: usize = 5;

/// Roles the executive comparison cannot do without.
pub const COMPARISON_ROLES: [Role; 4] = [Role::Date, Role::Product, Role::Tonnage, Role::Company];

/// Reads a dispatch export, with guidance when the file cannot be used.
pub fn load_table(path: &Path) -> Result<DataFrame> {
    let (df, _) = read_table(path).with_context(|| {
        format!(
            "could not load {}; make sure it is a valid CSV export of the dispatch sheet and try again",
            path.display()
        )
    })?;
    Ok(df)
}

/// One role and the column picked for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleRow {
    pub role: Role,
    pub column: Option<String>,
    /// Keyword that matched; `None` for dtype-detected dates or unresolved roles.
    pub keyword: Option<String>,
}

fn role_rows(resolved: &ResolvedRoles) -> Vec<RoleRow> {
    Role::ALL
        .into_iter()
        .map(|role| {
            let found = resolved.get_match(role);
            RoleRow {
                role,
                column: found.map(|m| m.column.clone()),
                keyword: found.and_then(|m| m.keyword.clone()),
            }
        })
        .collect()
}

/// Output of `freight inspect`.
#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    pub rows: usize,
    pub columns: Vec<String>,
    pub preview: Vec<Vec<String>>,
    pub roles: Vec<RoleRow>,
    pub date_columns: Vec<String>,
    /// Days present in the DATE column, ascending; what `dashboard --date` accepts.
    pub dates: Vec<NaiveDate>,
    /// Canonical company names in first-appearance order; what `dashboard --company` accepts.
    pub companies: Vec<String>,
    pub hints: BTreeMap<String, ColumnHint>,
}

pub fn build_inspect(
    df: &DataFrame,
    config: &DashboardConfig,
    rows: usize,
) -> Result<InspectReport> {
    let (frame, resolved) = prepare(df, config)?;
    let date_columns = detect_date_columns(df, config.roles.get(Role::Date), config.matching.columns)
        .into_iter()
        .map(|m| m.column)
        .collect();
    let dates = match resolved.get(Role::Date) {
        Some(column) => distinct_dates(&frame, column)?,
        None => Vec::new(),
    };
    let companies = match resolved.get(Role::Company) {
        Some(_) => distinct_values(&frame, CANONICAL_COMPANY_COLUMN)?,
        None => Vec::new(),
    };
    Ok(InspectReport {
        rows: df.height(),
        columns: column_names(df),
        preview: preview(df, rows),
        roles: role_rows(&resolved),
        date_columns,
        dates,
        companies,
        hints: build_column_hints(df),
    })
}

/// Distinct company spellings and their canonical names.
pub fn build_mappings(df: &DataFrame, config: &DashboardConfig) -> Result<Vec<CompanyMapping>> {
    let resolved = resolve_frame(df, config);
    resolved.require(&[Role::Company])?;
    let company = resolved.get(Role::Company).unwrap_or_default();
    let normalizer = CompanyNormalizer::from_config(config);
    let mappings = distinct_mappings(df, &normalizer, company)?;
    for mapping in &mappings {
        tracing::trace!(
            raw = redact_value(&mapping.raw),
            canonical = redact_value(&mapping.canonical),
            rows = mapping.rows,
            "company mapping"
        );
    }
    Ok(mappings)
}

/// Filters and limits for [`build_dashboard`].
#[derive(Debug, Clone, Default)]
pub struct DashboardOptions {
    /// Day to show; defaults to the earliest date.
    pub date: Option<NaiveDate>,
    /// Companies to keep, in any known spelling. Empty keeps all.
    pub companies: Vec<String>,
    /// Roles that must resolve.
    pub require: Vec<Role>,
    /// Entries per value-count table.
    pub top: usize,
}

/// Value counts for one column.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnCounts {
    pub column: String,
    pub counts: Vec<ValueCount>,
}

/// Output of `freight dashboard`.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub roles: Vec<RoleRow>,
    pub missing_roles: Vec<Role>,
    pub rows_total: usize,
    pub rows_selected: usize,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    pub date: Option<NaiveDate>,
    pub companies: Vec<String>,
    pub total_tonnage: Option<f64>,
    pub tonnage_by_company: Vec<GroupValue>,
    pub tonnage_by_product: Vec<GroupValue>,
    pub tonnage_by_destination: Vec<GroupValue>,
    pub duration_by_company: Vec<GroupValue>,
    pub statistics: Vec<ColumnSummary>,
    pub value_counts: Vec<ColumnCounts>,
    pub correlation: Option<CorrelationMatrix>,
}

/// First text columns that are neither numeric-looking nor the date column.
fn text_columns(frame: &DataFrame, numeric: &[String], date_column: Option<&str>) -> Vec<String> {
    frame
        .get_columns()
        .iter()
        .filter(|col| col.dtype() == &DataType::String)
        .map(|col| col.name().to_string())
        .filter(|name| !numeric.contains(name) && Some(name.as_str()) != date_column)
        .take(FALLBACK_COUNT_COLUMNS)
        .collect()
}

/// Resolves roles and adds the canonical company column when COMPANY resolved.
fn prepare(df: &DataFrame, config: &DashboardConfig) -> Result<(DataFrame, ResolvedRoles)> {
    let resolved = resolve_frame(df, config);
    let df = match resolved.get(Role::Company) {
        Some(company) => {
            let normalizer = CompanyNormalizer::from_config(config);
            normalize_column(df, &normalizer, company, CANONICAL_COMPANY_COLUMN)?
        }
        None => df.clone(),
    };
    Ok((df, resolved))
}

pub fn build_dashboard(
    df: &DataFrame,
    config: &DashboardConfig,
    options: &DashboardOptions,
) -> Result<DashboardReport> {
    let (mut frame, resolved) = prepare(df, config)?;
    resolved.require(&options.require)?;
    let missing_roles = resolved.missing(&Role::ALL);
    if !missing_roles.is_empty() {
        warn!(missing = ?missing_roles, "some column roles could not be resolved");
    }
    let rows_total = frame.height();

    let mut date_range = None;
    let mut date = None;
    match resolved.get(Role::Date) {
        Some(date_column) => {
            date_range = date_bounds(&frame, date_column)?;
            date = options.date.or(date_range.map(|(first, _)| first));
            if let Some(day) = date {
                frame = filter_by_date(&frame, date_column, day)?;
                info!(%day, rows = frame.height(), "applied date filter");
            }
        }
        None => warn!("no date column; showing every row"),
    }

    let normalizer = CompanyNormalizer::from_config(config);
    let mut companies: Vec<String> = Vec::new();
    for requested in &options.companies {
        let canonical = normalizer.normalize_str(requested.trim());
        debug!(
            requested = redact_value(requested),
            canonical = redact_value(&canonical),
            "company filter"
        );
        if !companies.contains(&canonical) {
            companies.push(canonical);
        }
    }
    if !companies.is_empty() {
        if resolved.get(Role::Company).is_some() {
            frame = filter_by_values(&frame, CANONICAL_COMPANY_COLUMN, &companies)?;
            info!(companies = companies.len(), rows = frame.height(), "applied company filter");
        } else {
            warn!("no company column; ignoring the company filter");
        }
    }

    let company_key = resolved
        .get(Role::Company)
        .map(|_| CANONICAL_COMPANY_COLUMN);
    let tonnage = resolved.get(Role::Tonnage);
    let sums_by = |key: Option<&str>| -> Result<Vec<GroupValue>> {
        match (key, tonnage) {
            (Some(key), Some(value)) => Ok(group_sum(&frame, key, value)?),
            _ => Ok(Vec::new()),
        }
    };
    let tonnage_by_company = sums_by(company_key)?;
    let tonnage_by_product = sums_by(resolved.get(Role::Product))?;
    let tonnage_by_destination = sums_by(resolved.get(Role::Destination))?;
    let duration_by_company = match (company_key, resolved.get(Role::Duration)) {
        (Some(key), Some(value)) => group_mean(&frame, key, value)?,
        _ => Vec::new(),
    };
    let total_tonnage = match tonnage {
        Some(column) => Some(numeric_sum(frame.column(column)?)),
        None => None,
    };

    let numeric = numeric_columns(&frame);
    let statistics = describe(&frame, &numeric)?;
    let correlated: Vec<String> = numeric.iter().take(CORRELATION_COLUMNS).cloned().collect();
    let correlation = if correlated.len() >= 2 {
        Some(correlation_matrix(&frame, &correlated)?)
    } else {
        None
    };

    let mut count_columns: Vec<String> =
        [company_key, resolved.get(Role::Product), resolved.get(Role::Destination)]
            .into_iter()
            .flatten()
            .map(str::to_string)
            .collect();
    if count_columns.is_empty() {
        count_columns = text_columns(&frame, &numeric, resolved.get(Role::Date));
        debug!(columns = ?count_columns, "no role columns for value counts; using text columns");
    }
    let mut counts = Vec::new();
    for column in &count_columns {
        counts.push(ColumnCounts {
            column: column.clone(),
            counts: value_counts(&frame, column, options.top)?,
        });
    }

    Ok(DashboardReport {
        roles: role_rows(&resolved),
        missing_roles,
        rows_total,
        rows_selected: frame.height(),
        date_range,
        date,
        companies,
        total_tonnage,
        tonnage_by_company,
        tonnage_by_product,
        tonnage_by_destination,
        duration_by_company,
        statistics,
        value_counts: counts,
        correlation,
    })
}

/// Day-over-day comparison for `product` (or the configured product code).
pub fn build_comparison(
    df: &DataFrame,
    config: &DashboardConfig,
    product: Option<&str>,
    today: Option<NaiveDate>,
) -> Result<DailyComparison> {
    let (frame, resolved) = prepare(df, config)?;
    resolved.require(&COMPARISON_ROLES)?;

    let mut thresholds = config.executive.clone();
    if let Some(product) = product {
        thresholds.product_code = product.to_string();
    }
    let inputs = ComparisonInputs {
        date_column: resolved.get(Role::Date).unwrap_or_default(),
        product_column: resolved.get(Role::Product).unwrap_or_default(),
        tonnage_column: resolved.get(Role::Tonnage).unwrap_or_default(),
        company_column: CANONICAL_COMPANY_COLUMN,
        today,
        thresholds: &thresholds,
    };
    Ok(compare_days(&frame, &inputs)?)
}
