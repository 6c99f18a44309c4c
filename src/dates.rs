//! Month-granular date axis used throughout the forecasting pipeline

use chrono::{Datelike, NaiveDate};

/// Truncate a date to the first day of its month.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    // Day 1 is valid for every month.
    date.with_day(1).unwrap()
}

/// First day of the month immediately after the given date's month.
pub fn next_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap()
}

/// Generate every month-start from `start`'s month through `end`'s month
/// inclusive. Returns an empty sequence when `start` is after `end`.
pub fn month_sequence(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let end = month_start(end);
    let mut dates = Vec::new();
    let mut current = month_start(start);
    while current <= end {
        dates.push(current);
        current = next_month(current);
    }
    dates
}

/// Number of whole months since January 1970, used as the regression
/// time index.
pub fn month_index(date: NaiveDate) -> i64 {
    (date.year() as i64 - 1970) * 12 + (date.month() as i64 - 1)
}

/// Check if a given year is a leap year.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Convert an English month name to its number, case-insensitively.
pub fn month_number(month: &str) -> Option<u32> {
    const MONTHS: [&str; 12] = [
        "january",
        "february",
        "march",
        "april",
        "may",
        "june",
        "july",
        "august",
        "september",
        "october",
        "november",
        "december",
    ];
    MONTHS
        .iter()
        .position(|name| name.eq_ignore_ascii_case(month))
        .map(|i| i as u32 + 1)
}
