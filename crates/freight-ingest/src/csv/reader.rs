//! CSV file reading.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use polars::prelude::*;

use crate::error::{IngestError, Result};

use super::header::{TableHeaders, detect_separator, parse_csv_line};

/// Maximum file size for CSV loading (500 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Rows used for schema inference.
const INFER_SCHEMA_ROWS: usize = 100;

/// Columns above which a dataset is flagged as wide.
const WIDE_DATASET_COLUMNS: usize = 500;

fn open_error(path: &Path, e: std::io::Error) -> IngestError {
    if e.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| open_error(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Validate that the file is not UTF-16 (UTF-8 with or without BOM is accepted).
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;

    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read == 2 {
        let encoding = match buffer {
            [0xFF, 0xFE] => Some("UTF-16 LE"),
            [0xFE, 0xFF] => Some("UTF-16 BE"),
            _ => None,
        };
        if let Some(encoding) = encoding {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding,
            });
        }
    }

    Ok(())
}

/// Validate DataFrame shape after loading.
///
/// A frame without rows or with a blank column name is rejected; more than
/// 500 columns only logs a warning.
pub fn validate_dataframe_shape(df: &DataFrame, path: &Path) -> Result<()> {
    if df.height() == 0 {
        return Err(IngestError::EmptyDataFrame {
            path: path.to_path_buf(),
        });
    }

    if df.width() > WIDE_DATASET_COLUMNS {
        tracing::warn!(
            path = %path.display(),
            columns = df.width(),
            "dataset has more than {WIDE_DATASET_COLUMNS} columns"
        );
    }

    if df
        .get_column_names()
        .iter()
        .any(|name| name.trim().is_empty())
    {
        return Err(IngestError::EmptyColumnName {
            path: path.to_path_buf(),
        });
    }

    Ok(())
}

/// Reads the first line of a file, without a UTF-8 BOM.
fn read_first_line(path: &Path) -> Result<Option<String>> {
    let file = File::open(path).map_err(|e| open_error(path, e))?;
    let mut reader = BufReader::new(file);
    let mut line = String::new();
    let read = reader
        .read_line(&mut line)
        .map_err(|e| IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
    if read == 0 {
        return Ok(None);
    }
    let line = line.trim_end_matches(['\r', '\n']);
    Ok(Some(line.strip_prefix('\u{feff}').unwrap_or(line).to_string()))
}

/// Reads and checks the header row.
pub fn read_csv_schema(path: &Path) -> Result<TableHeaders> {
    let Some(line) = read_first_line(path)? else {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    };

    let separator = detect_separator(&line);
    let columns = parse_csv_line(&line, separator);
    if columns.iter().all(String::is_empty) {
        return Err(IngestError::NoHeaderDetected {
            path: path.to_path_buf(),
        });
    }
    if columns.iter().any(String::is_empty) {
        return Err(IngestError::EmptyColumnName {
            path: path.to_path_buf(),
        });
    }

    let headers = TableHeaders { columns, separator };
    if let Some(column) = headers.first_duplicate() {
        return Err(IngestError::DuplicateColumnName {
            column: column.to_string(),
            path: path.to_path_buf(),
        });
    }
    Ok(headers)
}

/// Reads a CSV export into a DataFrame.
///
/// Runs the size, encoding and header checks first, then infers the schema
/// from the first 100 rows. Column names in the returned frame are the
/// trimmed header names.
pub fn read_table(path: &Path) -> Result<(DataFrame, TableHeaders)> {
    check_file_size(path)?;
    validate_encoding(path)?;
    let headers = read_csv_schema(path)?;

    let csv_error = |e: PolarsError| IngestError::CsvParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .with_parse_options(CsvParseOptions::default().with_separator(headers.separator))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(csv_error)?
        .finish()
        .map_err(csv_error)?;

    if df.width() == headers.len() {
        df.set_column_names(headers.columns.iter().map(String::as_str))?;
    } else {
        tracing::warn!(
            path = %path.display(),
            header_columns = headers.len(),
            frame_columns = df.width(),
            "header width differs from parsed width; keeping parsed names"
        );
    }

    validate_dataframe_shape(&df, path)?;

    tracing::info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded table"
    );
    Ok((df, headers))
}
