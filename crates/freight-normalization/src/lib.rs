//! Company name normalization.
//!
//! Dispatch sheets spell the same transport company many ways
//! (`M & Q`, `m&q spa`, `Mining and Quarrying SPA`). [`CompanyNormalizer`]
//! maps each spelling to the canonical name from the configured alias
//! table, and [`normalize_column`] applies it to a whole frame column.

#![deny(unsafe_code)]

mod error;
mod frame;
mod normalizer;

pub use error::{NormalizationError, Result};
pub use frame::{CompanyMapping, distinct_mappings, normalize_column};
pub use normalizer::{CompanyMatch, CompanyNormalizer, MatchKind};
