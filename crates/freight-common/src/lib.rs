//! Shared utilities for the freight dashboard crates.
//!
//! This crate provides the text canonicalization used to compare column
//! names and company names, date parsing for dispatch exports, and Polars
//! `AnyValue` conversion helpers.

pub mod dates;
pub mod polars;
pub mod text;

// Re-export commonly used functions at crate root for convenience
pub use dates::{any_to_date, parse_date_str};
pub use polars::{any_to_f64, any_to_string, any_to_string_non_empty, format_numeric, parse_f64};
pub use text::{WhitespacePolicy, canonical_key, column_key, strip_diacritics};
