//! Conversion of calendar dates into the Zulu timestamps the listing endpoint expects.

use crate::client_error::ClientError;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wire format for the `from` and `to` query parameters.
pub const ZULU_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Format accepted for caller-supplied calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Size of the window used when no `from` date is supplied.
pub const DEFAULT_WINDOW_DAYS: i64 = 7;

/// A `{from, to}` pair of Zulu timestamps, `from <= to`.
///
/// Deserialized ranges go through the same checks as constructed ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRange")]
pub struct DateRange {
    from: String,
    to: String,
}

#[derive(Deserialize)]
struct RawRange {
    from: String,
    to: String,
}

impl TryFrom<RawRange> for DateRange {
    type Error = ClientError;

    fn try_from(raw: RawRange) -> Result<DateRange, ClientError> {
        DateRange::between(parse_zulu(&raw.from)?, parse_zulu(&raw.to)?)
    }
}

impl DateRange {
    /// Normalize optional `YYYY-MM-DD` dates into a range, defaulting to the last seven days.
    pub fn normalize(from_date: Option<&str>, to_date: Option<&str>) -> Result<DateRange, ClientError> {
        DateRange::normalize_at(from_date, to_date, Utc::now())
    }

    /// Same as [`DateRange::normalize`], with "now" supplied by the caller.
    pub fn normalize_at(
        from_date: Option<&str>,
        to_date: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<DateRange, ClientError> {
        let from = match from_date {
            Some(date) => midnight_utc(date)?,
            None => now - Duration::days(DEFAULT_WINDOW_DAYS),
        };
        let to = match to_date {
            Some(date) => midnight_utc(date)?,
            None => now,
        };

        DateRange::between(from, to)
    }

    /// Build a range from two instants. Sub-second precision is dropped by the wire format.
    pub fn between(from: DateTime<Utc>, to: DateTime<Utc>) -> Result<DateRange, ClientError> {
        let from = from.format(ZULU_FORMAT).to_string();
        let to = to.format(ZULU_FORMAT).to_string();

        // the format is fixed width, so lexical order is chronological order
        if from > to {
            return Err(ClientError::InvalidDateRange { from, to });
        }

        Ok(DateRange { from, to })
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }
}

fn parse_zulu(value: &str) -> Result<DateTime<Utc>, ClientError> {
    NaiveDateTime::parse_from_str(value, ZULU_FORMAT)
        .map(|parsed| parsed.and_utc())
        .map_err(|_| ClientError::InvalidDateFormat { input: value.to_string() })
}

fn midnight_utc(date: &str) -> Result<DateTime<Utc>, ClientError> {
    let invalid = || ClientError::InvalidDateFormat { input: date.to_string() };

    let parsed = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).map_err(|_| invalid())?;
    let midnight = parsed.and_hms_opt(0, 0, 0).ok_or_else(invalid)?;

    Ok(midnight.and_utc())
}

#[cfg(test)]
mod tests {
    use super::{parse_zulu, DateRange};
    use crate::ClientError;
    use chrono::{TimeZone, Utc};

    #[test]
    fn explicit_dates_become_midnight_zulu() {
        let range = DateRange::normalize(Some("2024-01-05"), Some("2024-01-10")).unwrap();

        assert_eq!(range.from(), "2024-01-05T00:00:00Z");
        assert_eq!(range.to(), "2024-01-10T00:00:00Z");
    }

    #[test]
    fn default_window_is_seven_days_ending_now() {
        let now = Utc.with_ymd_and_hms(2024, 3, 2, 15, 4, 5).unwrap();
        let range = DateRange::normalize_at(None, None, now).unwrap();

        assert_eq!(range.to(), "2024-03-02T15:04:05Z");
        assert_eq!(range.from(), "2024-02-24T15:04:05Z");
    }

    #[test]
    fn default_window_tracks_the_clock() {
        let before = Utc::now();
        let range = DateRange::normalize(None, None).unwrap();
        let after = Utc::now();

        let from = parse_zulu(range.from()).unwrap();
        let to = parse_zulu(range.to()).unwrap();

        assert_eq!((to - from).num_days(), 7);
        assert_eq!((to - from).num_seconds(), 7 * 24 * 60 * 60);
        assert!(to.timestamp() >= before.timestamp() && to.timestamp() <= after.timestamp());
    }

    #[test]
    fn only_to_date_supplied() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let range = DateRange::normalize_at(None, Some("2024-01-01"), now).unwrap();

        assert_eq!(range.from(), "2023-12-25T00:00:00Z");
        assert_eq!(range.to(), "2024-01-01T00:00:00Z");
    }

    #[test]
    fn malformed_date_is_rejected() {
        match DateRange::normalize(Some("not-a-date"), Some("2024-01-10")) {
            Err(ClientError::InvalidDateFormat { input }) => assert_eq!(input, "not-a-date"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn impossible_calendar_date_is_rejected() {
        let result = DateRange::normalize(Some("2024-02-30"), None);

        assert!(matches!(result, Err(ClientError::InvalidDateFormat { .. })));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let result = DateRange::normalize(Some("2024-01-10"), Some("2024-01-05"));

        assert!(matches!(result, Err(ClientError::InvalidDateRange { .. })));
    }

    #[test]
    fn deserialized_range_is_validated() {
        let range: DateRange =
            serde_json::from_str(r#"{"from":"2024-01-05T00:00:00Z","to":"2024-01-10T00:00:00Z"}"#).unwrap();

        assert_eq!(range, DateRange::normalize(Some("2024-01-05"), Some("2024-01-10")).unwrap());
    }

    #[test]
    fn deserializing_garbage_timestamp_fails() {
        let result = serde_json::from_str::<DateRange>(r#"{"from":"2024-12-31T00:00:00Z","to":"garbage"}"#);

        assert!(result.is_err());
    }

    #[test]
    fn deserializing_inverted_range_fails() {
        let result =
            serde_json::from_str::<DateRange>(r#"{"from":"2024-01-10T00:00:00Z","to":"2024-01-05T00:00:00Z"}"#);

        let message = result.unwrap_err().to_string();
        assert!(message.contains("invalid date range"));
    }

    #[test]
    fn same_day_range_is_allowed() {
        let range = DateRange::normalize(Some("2024-01-05"), Some("2024-01-05")).unwrap();

        assert_eq!(range.from(), range.to());
    }
}
