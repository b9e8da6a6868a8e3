//! Date parsing for dispatch exports.
//!
//! Day-first formats are tried before month-first ones, so `03/04/2024` is
//! the 3rd of April. Parsers that default to month-first read the same cell
//! as the 4th of March; the dispatch sheets are written day-first. A slash
//! date only falls back to month-first when the day-first reading is
//! impossible (`12/31/2024`).

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use polars::prelude::{AnyValue, TimeUnit};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%d-%b-%Y %H:%M:%S", // 15-Jan-2024 10:30:00
    "%d-%b-%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d-%b-%Y", // 15-Jan-2024
    "%d-%B-%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%m/%d/%Y",
    "%Y%m%d",
];

/// Parses a date or datetime string; the time part is discarded.
pub fn parse_date_str(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Converts a cell to a date. Temporal cells are converted directly, text
/// cells are parsed; anything else is `None`.
pub fn any_to_date(value: AnyValue<'_>) -> Option<NaiveDate> {
    match value {
        AnyValue::Date(days) => {
            epoch_date().checked_add_signed(chrono::Duration::days(i64::from(days)))
        }
        AnyValue::Datetime(v, unit, _) | AnyValue::DatetimeOwned(v, unit, _) => {
            datetime_to_date(v, unit)
        }
        AnyValue::String(s) => parse_date_str(s),
        AnyValue::StringOwned(s) => parse_date_str(s.as_str()),
        _ => None,
    }
}

fn epoch_date() -> NaiveDate {
    NaiveDate::default()
}

fn datetime_to_date(value: i64, unit: TimeUnit) -> Option<NaiveDate> {
    let per_second = match unit {
        TimeUnit::Nanoseconds => 1_000_000_000,
        TimeUnit::Microseconds => 1_000_000,
        TimeUnit::Milliseconds => 1_000,
    };
    DateTime::from_timestamp(value.div_euclid(per_second), 0).map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_common_formats() {
        assert_eq!(parse_date_str("2024-03-01"), Some(date(2024, 3, 1)));
        assert_eq!(parse_date_str("01/03/2024"), Some(date(2024, 3, 1)));
        assert_eq!(parse_date_str("01-03-2024"), Some(date(2024, 3, 1)));
        assert_eq!(parse_date_str("01.03.2024"), Some(date(2024, 3, 1)));
        assert_eq!(parse_date_str("15-Jan-2024"), Some(date(2024, 1, 15)));
        assert_eq!(parse_date_str(" 2024-03-01 08:30:00 "), Some(date(2024, 3, 1)));
        assert_eq!(parse_date_str("2024-03-01T08:30"), Some(date(2024, 3, 1)));
    }

    #[test]
    fn test_ambiguous_slash_dates_are_day_first() {
        assert_eq!(parse_date_str("01/03/2024"), Some(date(2024, 3, 1)));
        assert_eq!(parse_date_str("03/04/2024 10:15"), Some(date(2024, 4, 3)));
    }

    #[test]
    fn test_month_first_only_when_day_first_fails() {
        assert_eq!(parse_date_str("12/31/2024"), Some(date(2024, 12, 31)));
    }

    #[test]
    fn test_unparseable() {
        assert_eq!(parse_date_str(""), None);
        assert_eq!(parse_date_str("mañana"), None);
        assert_eq!(parse_date_str("31/02/2024"), None);
    }

    #[test]
    fn test_temporal_values() {
        assert_eq!(epoch_date(), date(1970, 1, 1));
        assert_eq!(any_to_date(AnyValue::Date(19_783)), Some(date(2024, 3, 1)));
        let millis = 19_783i64 * 86_400_000 + 3_600_000;
        assert_eq!(
            any_to_date(AnyValue::Datetime(millis, TimeUnit::Milliseconds, None)),
            Some(date(2024, 3, 1))
        );
        assert_eq!(any_to_date(AnyValue::Null), None);
        assert_eq!(any_to_date(AnyValue::Int64(20240301)), None);
    }
}
