//! Loading freight exports into Polars DataFrames.
//!
//! The dispatch spreadsheet is read as a CSV export with a single header
//! row. Loading checks file size, rejects UTF-16 files, detects `,` or `;`
//! separators and refuses blank or duplicate header names.
//!
//! ```ignore
//! use std::path::Path;
//! use freight_ingest::{build_column_hints, preview, read_table};
//!
//! let (df, headers) = read_table(Path::new("despachos.csv"))?;
//! let hints = build_column_hints(&df);
//! let first_rows = preview(&df, 5);
//! ```

mod csv;
mod error;
mod hints;
mod preview;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{
    MAX_CSV_FILE_SIZE, TableHeaders, check_file_size, check_file_size_with_limit,
    read_csv_schema, read_table, validate_dataframe_shape, validate_encoding,
};

// === Column Hints ===
pub use hints::{build_column_hints, numeric_columns};

// === Preview ===
pub use preview::{column_names, preview};
