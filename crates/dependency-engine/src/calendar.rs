use chrono::{DateTime, Months, NaiveDate, NaiveTime, Utc};

const MILLIS_PER_DAY: i64 = 1000 * 60 * 60 * 24;

/// Whole-day arithmetic for document expiry dates
pub struct ExpiryCalendar;

impl ExpiryCalendar {
    /// Days from `now` until `expiry` (taken at 00:00 UTC), rounded up.
    ///
    /// Any partial day left counts as a full day, so a document expiring
    /// tomorrow reads as 1 all through today. Zero or less means expired.
    pub fn days_until(expiry: NaiveDate, now: DateTime<Utc>) -> i64 {
        let expiry_at = expiry.and_time(NaiveTime::MIN).and_utc();
        let millis = (expiry_at - now).num_milliseconds();
        Self::ceil_days(millis)
    }

    /// Signed number of days from `from` to `to`
    pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
        (to - from).num_days()
    }

    /// Add calendar months, clamping to the last day of a shorter month
    pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
        date.checked_add_months(Months::new(months))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Long US-style date, e.g. "March 15, 2025"
    pub fn format_date(date: NaiveDate) -> String {
        date.format("%B %-d, %Y").to_string()
    }

    fn ceil_days(millis: i64) -> i64 {
        let days = millis / MILLIS_PER_DAY;
        if millis % MILLIS_PER_DAY > 0 {
            days + 1
        } else {
            days
        }
    }
}
