use chrono::{DateTime, Datelike, Local, Months, NaiveDate, Utc};

use gymdesk_domain::PlanType;

use crate::{Error, Result};

/// Today as a local calendar date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Local calendar date of a timestamp, comparable with [`today`].
pub fn local_date(timestamp: DateTime<Utc>) -> NaiveDate {
    timestamp.with_timezone(&Local).date_naive()
}

/// Parse an ISO 8601 calendar date (`YYYY-MM-DD`).
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| Error::InvalidDate(value.to_string()))
}

/// Add the interval of a plan to a date.
///
/// Months are added on the calendar: when the target month is
/// shorter than the day of `date`, the result is clamped to the
/// last day of the target month (Jan 31 + 1 month = Feb 28/29).
/// Yearly plans add twelve months, so Feb 29 + 1 year = Feb 28.
pub fn add_interval(date: NaiveDate, plan: PlanType) -> Result<NaiveDate> {
    date.checked_add_months(Months::new(plan.months()))
        .ok_or_else(|| Error::InvalidDate(format!("{} + {} months", date, plan.months())))
}

/// Whole days from `a` to `b`, negative if `b` is before `a`.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days()
}

/// First day of the month of `date`
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date - chrono::Days::new(u64::from(date.day0()))
}
