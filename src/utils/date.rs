//! Date/time parsing and formatting helpers.
//! All persisted timestamps are RFC3339 in UTC; dates are "YYYY-MM-DD".

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, Utc};

/// Parse a "YYYY-MM-DD" date string.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Parse an RFC3339 timestamp into UTC.
pub fn parse_ts(s: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| AppError::InvalidTimestamp(s.to_string()))
}

/// Format a timestamp for storage.
pub fn format_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339()
}

/// Today's calendar date in UTC.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn format_date(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_date() {
        assert_eq!(
            parse_date("2026-08-29"),
            NaiveDate::from_ymd_opt(2026, 8, 29)
        );
    }

    #[test]
    fn rejects_garbage_date() {
        assert!(parse_date("29/08/2026").is_none());
        assert!(parse_date("not-a-date").is_none());
    }

    #[test]
    fn timestamp_round_trips() {
        let now = Utc::now();
        let parsed = parse_ts(&format_ts(now)).unwrap();
        assert_eq!(parsed.timestamp(), now.timestamp());
    }
}
