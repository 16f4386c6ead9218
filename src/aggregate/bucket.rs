//! Time bucketing: mapping a record timestamp to a bucket key and label.
//!
//! All functions here are pure; the aggregator calls them once per record.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::error::DataError;
use crate::types::{BucketKey, Granularity};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Parse a record timestamp into a calendar date.
///
/// Accepts full RFC 3339 timestamps (`2024-01-01T00:00:00Z`), offset-less
/// datetimes, and plain dates. The civil date of the timestamp itself is
/// used; no time-zone conversion is applied.
pub fn parse_timestamp(timestamp: &str) -> Result<NaiveDate, DataError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return Ok(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt.date());
    }
    if let Ok(d) = NaiveDate::parse_from_str(timestamp, "%Y-%m-%d") {
        return Ok(d);
    }
    Err(DataError::InvalidTimestamp(timestamp.to_string()))
}

/// Week-of-year number for a date.
///
/// `ceil((day_of_year + weekday_of_jan1 + 1) / 7)` with day_of_year 0-based
/// and weekday 0=Sunday..6=Saturday. This deliberately is NOT ISO-8601 week
/// numbering (no Monday-start or week-containing-Jan-4 correction); it
/// reproduces the numbering the dashboard has always shown.
pub fn week_of_year(date: NaiveDate) -> u32 {
    let day_of_year = date.ordinal0();
    let jan1 = NaiveDate::from_yo_opt(date.year(), 1)
        .unwrap_or(date)
        .weekday()
        .num_days_from_sunday();
    (day_of_year + jan1 + 1).div_ceil(7)
}

/// Full English month name for a zero-based month index.
pub fn month_name(month0: u32) -> &'static str {
    MONTH_NAMES[month0 as usize]
}

/// Derive the bucket key and display label for one record.
///
/// Daily never parses the timestamp: the raw string is both key and label,
/// so daily bucketing cannot fail. Weekly and Monthly parse the timestamp
/// and return [`DataError::InvalidTimestamp`] when it is not a date.
pub fn bucket_key_and_label(
    timestamp: &str,
    granularity: Granularity,
) -> Result<(BucketKey, String), DataError> {
    match granularity {
        Granularity::Daily => Ok((
            BucketKey::Timestamp(timestamp.to_string()),
            timestamp.to_string(),
        )),
        Granularity::Weekly => {
            let date = parse_timestamp(timestamp)?;
            let week = week_of_year(date);
            let year = date.year();
            Ok((
                BucketKey::Week { week, year },
                format!("Week {}-{}", week, year),
            ))
        }
        Granularity::Monthly => {
            let date = parse_timestamp(timestamp)?;
            let month = date.month0();
            let year = date.year();
            Ok((
                BucketKey::Month { month, year },
                format!("{} {}", month_name(month), year),
            ))
        }
    }
}
