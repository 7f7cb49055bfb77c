//! Time utilities: timezone-aware "today" and calendar arithmetic.

use anyhow::Result;
use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use chrono_tz::Tz;

/// Parse an IANA timezone name like "Asia/Kolkata".
pub fn parse_tz(tz: &str) -> Result<Tz> {
    tz.parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))
}

/// The local calendar date of `now` in `tz`.
pub fn local_date(now: DateTime<Utc>, tz: Tz) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

/// Today's date in `tz`.
pub fn today_in(tz: Tz) -> NaiveDate {
    local_date(Utc::now(), tz)
}

/// Whole days from `from` to `to` (negative when `to` is in the past).
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Same calendar month and year.
pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// `date` shifted back by `n` calendar months (day clamped to month end).
pub fn months_back(date: NaiveDate, n: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(n)).unwrap_or(NaiveDate::MIN)
}
