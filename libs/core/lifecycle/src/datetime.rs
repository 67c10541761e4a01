//! Canonical date-time handling.
//!
//! Every timestamp that crosses an entity boundary (audit fields, estimated
//! end dates) uses one recognized format. Values in any other shape are
//! rejected during validation.

use chrono::{NaiveDate, NaiveDateTime, Utc};

/// The single recognized date-time format, UTC.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Recognized format for date-only fields.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Current UTC time rendered in the recognized format.
pub fn now_str() -> String {
    Utc::now().format(DATETIME_FORMAT).to_string()
}

/// Whether `candidate` parses under the recognized date-time format.
pub fn check_format(candidate: &str) -> bool {
    NaiveDateTime::parse_from_str(candidate, DATETIME_FORMAT).is_ok()
}

/// Whether `candidate` parses under the recognized date-only format.
pub fn check_date_format(candidate: &str) -> bool {
    NaiveDate::parse_from_str(candidate, DATE_FORMAT).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_round_trips_through_check() {
        assert!(check_format(&now_str()));
    }

    #[test]
    fn rejects_other_formats() {
        assert!(!check_format("2026-08-25T10:00:00Z"));
        assert!(!check_format("25/08/2026 10:00"));
        assert!(!check_format("not a date"));
        assert!(check_format("2026-08-25 10:00:00"));
    }

    #[test]
    fn date_only_check() {
        assert!(check_date_format("1990-04-02"));
        assert!(!check_date_format("1990-04-02 00:00:00"));
    }
}
