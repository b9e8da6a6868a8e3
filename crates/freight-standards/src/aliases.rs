//! Alias sheets: a two-column CSV (`canonical`, `variant`) maintained by
//! the people who actually see the misspellings.
//!
//! Rows are grouped by canonical name in first-appearance order. A row with
//! an empty variant only declares the group.

use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;

use freight_model::{AliasGroup, AliasTable};

use crate::error::{Result, StandardsError};

const CANONICAL_HEADER: &str = "canonical";
const VARIANT_HEADER: &str = "variant";

fn header_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().trim_matches('\u{feff}').eq_ignore_ascii_case(name))
}

/// Reads an alias sheet from any reader. `origin` is used in error messages.
pub fn parse_alias_csv<R: Read>(reader: R, origin: &Path) -> Result<AliasTable> {
    let csv_error = |e: csv::Error| StandardsError::Csv {
        path: origin.to_path_buf(),
        message: e.to_string(),
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers = reader.headers().map_err(csv_error)?.clone();
    let missing = |column: &str| StandardsError::MissingColumn {
        path: origin.to_path_buf(),
        column: column.to_string(),
    };
    let canonical_idx =
        header_index(&headers, CANONICAL_HEADER).ok_or_else(|| missing(CANONICAL_HEADER))?;
    let variant_idx =
        header_index(&headers, VARIANT_HEADER).ok_or_else(|| missing(VARIANT_HEADER))?;

    let mut groups: Vec<AliasGroup> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        let canonical = record.get(canonical_idx).unwrap_or("").trim();
        if canonical.is_empty() {
            continue;
        }
        let variant = record.get(variant_idx).unwrap_or("").trim();
        let position = match groups.iter().position(|g| g.canonical == canonical) {
            Some(position) => position,
            None => {
                groups.push(AliasGroup::new(canonical, Vec::new()));
                groups.len() - 1
            }
        };
        if !variant.is_empty() && !groups[position].variants.iter().any(|v| v == variant) {
            groups[position].variants.push(variant.to_string());
        }
    }
    tracing::debug!(
        path = %origin.display(),
        groups = groups.len(),
        "parsed alias sheet"
    );
    Ok(AliasTable::new(groups))
}

/// Reads an alias sheet from disk.
pub fn load_alias_csv(path: &Path) -> Result<AliasTable> {
    let file = std::fs::File::open(path).map_err(|e| StandardsError::io(path, e))?;
    parse_alias_csv(file, path)
}
