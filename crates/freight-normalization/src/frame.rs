//! Applying the normalizer to a frame column.

use polars::prelude::*;

use freight_common::{any_to_string, any_to_string_non_empty};
use serde::Serialize;

use crate::error::{NormalizationError, Result};
use crate::normalizer::{CompanyNormalizer, MatchKind};

/// How one distinct raw value was normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyMapping {
    /// Value as it appears in the sheet.
    pub raw: String,
    /// Canonical name, or the raw value when unmatched.
    pub canonical: String,
    /// `None` when the value passed through unchanged.
    pub kind: Option<MatchKind>,
    /// Rows holding this raw value.
    pub rows: usize,
}

fn company_column<'a>(df: &'a DataFrame, column: &str) -> Result<&'a Column> {
    df.column(column)
        .map_err(|_| NormalizationError::ColumnNotFound(column.to_string()))
}

/// Returns a copy of `df` with an `output` column holding the canonical
/// company name per row. Null cells stay null; blank cells pass through
/// unchanged like any unmatched value.
pub fn normalize_column(
    df: &DataFrame,
    normalizer: &CompanyNormalizer,
    column: &str,
    output: &str,
) -> Result<DataFrame> {
    let source = company_column(df, column)?;
    let mut matched = 0usize;
    let values: Vec<Option<String>> = (0..source.len())
        .map(|idx| {
            let raw = match source.get(idx) {
                Ok(AnyValue::Null) | Err(_) => return None,
                Ok(value) => any_to_string(value),
            };
            Some(match normalizer.resolve(&raw) {
                Some(found) => {
                    matched += 1;
                    found.canonical.to_string()
                }
                None => raw,
            })
        })
        .collect();

    let mut out = df.clone();
    out.with_column(Series::new(output.into(), values))?;
    tracing::info!(
        column,
        output,
        rows = out.height(),
        matched,
        "normalized company column"
    );
    Ok(out)
}

/// Distinct raw values with their canonical names, in first-appearance order.
pub fn distinct_mappings(
    df: &DataFrame,
    normalizer: &CompanyNormalizer,
    column: &str,
) -> Result<Vec<CompanyMapping>> {
    let source = company_column(df, column)?;
    let mut mappings: Vec<CompanyMapping> = Vec::new();
    for idx in 0..source.len() {
        let Some(raw) = source.get(idx).ok().and_then(any_to_string_non_empty) else {
            continue;
        };
        if let Some(existing) = mappings.iter_mut().find(|m| m.raw == raw) {
            existing.rows += 1;
            continue;
        }
        let (canonical, kind) = match normalizer.resolve(&raw) {
            Some(found) => (found.canonical.to_string(), Some(found.kind)),
            None => (raw.clone(), None),
        };
        mappings.push(CompanyMapping {
            raw,
            canonical,
            kind,
            rows: 1,
        });
    }
    Ok(mappings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use freight_model::{AliasGroup, AliasTable, CompanyMatchMode};

    fn normalizer() -> CompanyNormalizer {
        let table = AliasTable::new(vec![AliasGroup::new(
            "M&Q SPA",
            vec!["M & Q".to_string()],
        )]);
        CompanyNormalizer::new(&table, CompanyMatchMode::Strict)
    }

    fn frame() -> DataFrame {
        df! {
            "Empresa" => &[Some("m & q"), None, Some("Fletes Sur"), Some("M&Q SPA"), Some("m & q")],
            "Toneladas" => &[1.0, 2.0, 3.0, 4.0, 5.0],
        }
        .unwrap()
    }

    #[test]
    fn adds_canonical_column() {
        let out = normalize_column(&frame(), &normalizer(), "Empresa", "Empresa Canonica").unwrap();
        let values: Vec<Option<&str>> = out
            .column("Empresa Canonica")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(
            values,
            vec![
                Some("M&Q SPA"),
                None,
                Some("Fletes Sur"),
                Some("M&Q SPA"),
                Some("M&Q SPA")
            ]
        );
        assert_eq!(out.width(), 3);
    }

    #[test]
    fn blank_cells_pass_through_and_nulls_stay_null() {
        let df = df! { "Empresa" => &[Some(""), Some("   "), None, Some("M & Q")] }.unwrap();
        let out = normalize_column(&df, &normalizer(), "Empresa", "canonical").unwrap();
        let values: Vec<Option<&str>> = out
            .column("canonical")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(values, vec![Some(""), Some("   "), None, Some("M&Q SPA")]);
    }

    #[test]
    fn missing_column_is_an_error() {
        let err = normalize_column(&frame(), &normalizer(), "Compañía", "out").unwrap_err();
        assert!(matches!(err, NormalizationError::ColumnNotFound(name) if name == "Compañía"));
    }

    #[test]
    fn mappings_count_rows_per_raw_value() {
        let mappings = distinct_mappings(&frame(), &normalizer(), "Empresa").unwrap();
        assert_eq!(mappings.len(), 3);
        assert_eq!(mappings[0].raw, "m & q");
        assert_eq!(mappings[0].rows, 2);
        assert_eq!(mappings[0].kind, Some(MatchKind::Exact));
        assert_eq!(mappings[1].canonical, "Fletes Sur");
        assert_eq!(mappings[1].kind, None);
        assert_eq!(mappings[2].canonical, "M&Q SPA");
    }
}
