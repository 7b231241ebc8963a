use bdays::HolidayCalendar;
use bdays::calendars::WeekendsOnly;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use std::fmt;

/// A date-bearing string that failed to parse at the boundary.
///
/// The engine rejects malformed dates instead of coercing them to "now";
/// every date inside the engine is already a typed `NaiveDate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedDateError {
    pub value: String,
}

impl fmt::Display for MalformedDateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not parse date value {:?}", self.value)
    }
}

impl std::error::Error for MalformedDateError {}

pub fn parse_date(value: &str) -> Result<NaiveDate, MalformedDateError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| MalformedDateError {
        value: value.to_string(),
    })
}

pub fn parse_datetime(value: &str) -> Result<NaiveDateTime, MalformedDateError> {
    let trimmed = value.trim();
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S"))
        .map_err(|_| MalformedDateError {
            value: value.to_string(),
        })
}

/// ISO-week bucket key, e.g. "2025-W07". Uses the ISO week-year, so early
/// January days can belong to the previous year's last week.
pub fn week_key(date: NaiveDate) -> String {
    let iso = date.iso_week();
    format!("{}-W{:02}", iso.year(), iso.week())
}

/// Year-month bucket key, e.g. "2025-02".
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

pub fn is_weekday(date: NaiveDate) -> bool {
    WeekendsOnly.is_bday(date)
}

/// Number of Monday-Friday days in the month containing `date`.
pub fn weekdays_in_month(date: NaiveDate) -> i64 {
    let month = date.month();
    let mut current = date.with_day(1).unwrap_or(date);
    let mut count = 0;
    while current.month() == month {
        if is_weekday(current) {
            count += 1;
        }
        current += Duration::days(1);
    }
    count
}

/// Inclusive list of calendar days from `start` to `end`.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let mut current = start;
    while current <= end {
        days.push(current);
        current += Duration::days(1);
    }
    days
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn parses_iso_dates_and_rejects_garbage() {
        assert_eq!(parse_date("2025-02-03").unwrap(), d(2025, 2, 3));
        assert_eq!(parse_date(" 2025-02-03 ").unwrap(), d(2025, 2, 3));
        assert!(parse_date("03/02/2025").is_err());
        assert!(parse_date("not a date").is_err());
    }

    #[test]
    fn parses_datetimes_in_both_separators() {
        assert!(parse_datetime("2025-02-03T09:00:00").is_ok());
        assert!(parse_datetime("2025-02-03 09:00:00").is_ok());
        assert!(parse_datetime("2025-02-03").is_err());
    }

    #[test]
    fn period_keys() {
        assert_eq!(week_key(d(2025, 2, 12)), "2025-W07");
        assert_eq!(month_key(d(2025, 2, 12)), "2025-02");
        // 2024-12-30 is a Monday in ISO week 1 of 2025.
        assert_eq!(week_key(d(2024, 12, 30)), "2025-W01");
    }

    #[test]
    fn weekday_accounting() {
        assert!(is_weekday(d(2025, 2, 3))); // Monday
        assert!(!is_weekday(d(2025, 2, 1))); // Saturday
        assert_eq!(weekdays_in_month(d(2025, 2, 12)), 20);
        assert_eq!(weekdays_in_month(d(2025, 8, 1)), 21);
    }

    #[test]
    fn inclusive_range() {
        let days = date_range(d(2025, 1, 30), d(2025, 2, 2));
        assert_eq!(
            days,
            vec![d(2025, 1, 30), d(2025, 1, 31), d(2025, 2, 1), d(2025, 2, 2)]
        );
        assert_eq!(date_range(d(2025, 1, 2), d(2025, 1, 1)), Vec::new());
    }
}
