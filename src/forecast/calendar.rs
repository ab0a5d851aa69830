//! Business-day calendar (weekends only, no exchange holidays)

use chrono::{Datelike, NaiveDate, Weekday};

pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The `count` business days strictly after `after`
pub fn next_business_days(after: NaiveDate, count: usize) -> Vec<NaiveDate> {
    after
        .iter_days()
        .skip(1)
        .filter(|d| is_business_day(*d))
        .take(count)
        .collect()
}
