//! Timezone-aware parsing of `YYYY-MM-DD HH:MM:SS` timestamps.
//!
//! Parsed times are returned as milliseconds since the Unix epoch. CST here is
//! China Standard Time, a fixed UTC+08:00 offset.

use std::fmt::Write as _;

use chrono::{FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};
use thiserror::Error;

/// Input pattern accepted by every parser in this module.
pub const DATE_TIME_PATTERN: &str = "%Y-%m-%d %H:%M:%S";

/// Offset of China Standard Time from UTC, in seconds.
pub const CST_OFFSET_SECONDS: i32 = 8 * 3600;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeFormatError {
    #[error("malformed time {input:?}: {source}")]
    Malformed {
        input: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("time {input:?} does not map to a single instant")]
    Unrepresentable { input: String },
    #[error("invalid utc offset of {0} seconds")]
    InvalidOffset(i32),
}

/// Parses `text` as a local time at `offset`.
///
/// # Errors
///
/// - [`TimeFormatError::Malformed`] if `text` does not match [`DATE_TIME_PATTERN`]
/// - [`TimeFormatError::Unrepresentable`] if the local time has no single instant
pub fn must_parse_in_offset(text: &str, offset: FixedOffset) -> Result<i64, TimeFormatError> {
    let naive = NaiveDateTime::parse_from_str(text.trim(), DATE_TIME_PATTERN).map_err(|source| {
        TimeFormatError::Malformed {
            input: text.to_string(),
            source,
        }
    })?;
    offset
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.timestamp_millis())
        .ok_or_else(|| TimeFormatError::Unrepresentable {
            input: text.to_string(),
        })
}

/// Parses `text` as a local time at `offset`, or `None` when malformed.
pub fn parse_in_offset(text: &str, offset: FixedOffset) -> Option<i64> {
    must_parse_in_offset(text, offset).ok()
}

fn utc() -> FixedOffset {
    Utc.fix()
}

fn cst() -> Result<FixedOffset, TimeFormatError> {
    FixedOffset::east_opt(CST_OFFSET_SECONDS).ok_or(TimeFormatError::InvalidOffset(CST_OFFSET_SECONDS))
}

/// Parses `text` as a UTC time.
///
/// # Examples
///
/// ```
/// use protobind_util::time::must_parse_utc;
///
/// assert_eq!(must_parse_utc("1970-01-01 00:00:01").unwrap(), 1000);
/// assert!(must_parse_utc("crap").is_err());
/// ```
pub fn must_parse_utc(text: &str) -> Result<i64, TimeFormatError> {
    must_parse_in_offset(text, utc())
}

/// Parses `text` as a UTC time, or `None` when malformed.
pub fn parse_utc(text: &str) -> Option<i64> {
    must_parse_utc(text).ok()
}

/// Parses `text` as a China Standard Time (UTC+08:00) time.
pub fn must_parse_cst(text: &str) -> Result<i64, TimeFormatError> {
    must_parse_in_offset(text, cst()?)
}

/// Parses `text` as a China Standard Time time, or `None` when malformed.
pub fn parse_cst(text: &str) -> Option<i64> {
    must_parse_cst(text).ok()
}

/// Formats epoch milliseconds in UTC with a `chrono` format string.
///
/// Returns `None` when the instant is out of range or `format` contains an
/// unknown specifier.
///
/// # Examples
///
/// ```
/// use protobind_util::time::{must_parse_utc, time_in_utc};
///
/// let millis = must_parse_utc("2017-02-16 23:50:00").unwrap();
/// assert_eq!(time_in_utc(millis, "%Y-%m-%d").as_deref(), Some("2017-02-16"));
/// ```
pub fn time_in_utc(millis: i64, format: &str) -> Option<String> {
    let dt = Utc.timestamp_millis_opt(millis).single()?;
    let mut out = String::new();
    write!(out, "{}", dt.format(format)).ok()?;
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cst_is_eight_hours_ahead() {
        let ts = "2017-02-10 10:00:00";
        let cst = must_parse_cst(ts).unwrap();
        let utc = must_parse_utc(ts).unwrap();
        assert_eq!(utc - cst, 8 * 3600 * 1000);
    }

    #[test]
    fn test_format_date() {
        let utc = must_parse_utc("2017-02-16 23:50:00").unwrap();
        assert_eq!(time_in_utc(utc, "%Y-%m-%d").as_deref(), Some("2017-02-16"));
        // the same wall time in CST is still the 16th in UTC, 8 hours earlier
        let cst = must_parse_cst("2017-02-16 23:50:00").unwrap();
        assert_eq!(time_in_utc(cst, "%Y-%m-%d %H:%M").as_deref(), Some("2017-02-16 15:50"));
    }

    #[test]
    fn test_parse_malformed() {
        assert_eq!(parse_utc("crap").unwrap_or(-2), -2);
        assert_eq!(parse_cst("2017-02-30 10:00:00"), None);
        assert!(matches!(
            must_parse_utc("crap"),
            Err(TimeFormatError::Malformed { .. })
        ));
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert_eq!(parse_utc(" 1970-01-01 00:00:00 "), Some(0));
    }

    #[test]
    fn test_custom_offset() {
        let offset = FixedOffset::west_opt(5 * 3600).unwrap();
        assert_eq!(parse_in_offset("1970-01-01 00:00:00", offset), Some(5 * 3600 * 1000));
    }

    #[test]
    fn test_bad_format_specifier() {
        assert_eq!(time_in_utc(0, "%Q"), None);
    }
}
