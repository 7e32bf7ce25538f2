//! Calendar-day helpers shared by the analytics components
//!
//! Every component receives an explicit reference instant (`now`). Stored
//! timestamps are UTC; they are bucketed into calendar days in the time zone
//! of that reference instant, so "today" and "the day a workout happened"
//! always agree on which clock they are read from.

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Utc, Weekday};

/// Calendar day of `now` in its own time zone
pub fn today<Tz: TimeZone>(now: &DateTime<Tz>) -> NaiveDate {
    now.date_naive()
}

/// Calendar day of a stored timestamp, read in `zone`
pub fn local_day<Tz: TimeZone>(instant: &DateTime<Utc>, zone: &Tz) -> NaiveDate {
    instant.with_timezone(zone).date_naive()
}

/// Whole calendar days from `earlier` to `later` (negative if `earlier` is after `later`)
pub fn days_between(earlier: NaiveDate, later: NaiveDate) -> i64 {
    (later - earlier).num_days()
}

/// `day` moved back by `days`, clamped at the earliest representable date
pub fn days_before(day: NaiveDate, days: u64) -> NaiveDate {
    day.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN)
}

/// Most recent `week_start` on or before `day`
pub fn start_of_week(day: NaiveDate, week_start: Weekday) -> NaiveDate {
    let offset = (7 + day.weekday().num_days_from_sunday() - week_start.num_days_from_sunday()) % 7;
    days_before(day, u64::from(offset))
}

/// Short month/day label used on chart axes, e.g. `Oct 01`
pub fn chart_label(day: NaiveDate) -> String {
    day.format("%b %d").to_string()
}
