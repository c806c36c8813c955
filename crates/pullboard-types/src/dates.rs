//! Calendar days are UTC days throughout. Offset timestamps are converted to
//! UTC before their date is taken, and "today" is the current UTC day.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not a calendar date: '{0}'")]
pub struct DateParseError(pub String);

/// The current UTC calendar day.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Reduce a date or timestamp string to its calendar date.
///
/// Accepts `YYYY-MM-DD`, naive timestamps with a space or `T` separator, and
/// RFC 3339 timestamps. Timestamps carrying an offset are converted to UTC
/// before the time of day is dropped, so they land on the same day as
/// [`today`]. Naive inputs are taken as already being UTC.
pub fn parse_calendar_date(input: &str) -> Result<NaiveDate, DateParseError> {
    let s = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc).date_naive());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| DateParseError(input.to_string()))
}

/// Every day from `start` through `end`, both inclusive. Empty when
/// `start > end`.
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |day| *day <= end)
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn plain_dates_pass_through() {
        assert_eq!(parse_calendar_date("2024-01-01").unwrap(), ymd(2024, 1, 1));
        assert_eq!(parse_calendar_date(" 2024-02-29 ").unwrap(), ymd(2024, 2, 29));
    }

    #[test]
    fn time_of_day_is_dropped() {
        assert_eq!(parse_calendar_date("2024-01-01 23:59:59").unwrap(), ymd(2024, 1, 1));
        assert_eq!(parse_calendar_date("2024-01-01T08:15").unwrap(), ymd(2024, 1, 1));
        assert_eq!(parse_calendar_date("2024-01-01T08:15:00.250").unwrap(), ymd(2024, 1, 1));
    }

    #[test]
    fn offsets_are_normalised_to_utc() {
        assert_eq!(parse_calendar_date("2024-01-01T23:00:00-05:00").unwrap(), ymd(2024, 1, 2));
        assert_eq!(parse_calendar_date("2024-01-02T03:00:00+09:00").unwrap(), ymd(2024, 1, 1));
    }

    #[test]
    fn offset_timestamp_of_now_lands_on_today() {
        let now = Utc::now();
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let submitted = now.with_timezone(&tokyo).to_rfc3339();

        assert_eq!(parse_calendar_date(&submitted).unwrap(), now.date_naive());
        assert_eq!(today(), Utc::now().date_naive());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse_calendar_date("yesterday").is_err());
        assert!(parse_calendar_date("2024-13-01").is_err());
        assert!(parse_calendar_date("").is_err());
    }

    #[test]
    fn day_range_is_inclusive() {
        let days: Vec<_> = days_inclusive(ymd(2024, 2, 28), ymd(2024, 3, 1)).collect();
        assert_eq!(days, vec![ymd(2024, 2, 28), ymd(2024, 2, 29), ymd(2024, 3, 1)]);
        assert_eq!(days_inclusive(ymd(2024, 3, 2), ymd(2024, 3, 1)).count(), 0);
    }
}
