//! Text canonicalization for comparing names across inconsistent sources.
//!
//! Spreadsheet headers and company names arrive with mixed case, accents
//! (`Compañía`, `Día`) and irregular spacing. Both the column resolver and
//! the company normalizer compare strings only after passing them through
//! [`canonical_key`].

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// How internal whitespace is treated when building a canonical key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WhitespacePolicy {
    /// Drop every whitespace character (`"M & Q"` becomes `"M&Q"`).
    #[default]
    Remove,
    /// Collapse whitespace runs to a single space.
    Collapse,
}

/// Removes diacritics by decomposing to NFD and dropping combining marks.
///
/// ```
/// use freight_common::strip_diacritics;
///
/// assert_eq!(strip_diacritics("Compañía"), "Compania");
/// assert_eq!(strip_diacritics("DÍA"), "DIA");
/// ```
pub fn strip_diacritics(value: &str) -> String {
    value.nfd().filter(|ch| !is_combining_mark(*ch)).collect()
}

/// Builds the comparison key for a raw string: trimmed, upper-cased,
/// diacritics stripped, whitespace handled per `policy`.
pub fn canonical_key(value: &str, policy: WhitespacePolicy) -> String {
    let upper = strip_diacritics(&value.trim().to_uppercase());
    match policy {
        WhitespacePolicy::Remove => upper.chars().filter(|ch| !ch.is_whitespace()).collect(),
        WhitespacePolicy::Collapse => upper.split_whitespace().collect::<Vec<_>>().join(" "),
    }
}

/// Key used for column names and role keywords (all whitespace removed).
pub fn column_key(value: &str) -> String {
    canonical_key(value, WhitespacePolicy::Remove)
}
