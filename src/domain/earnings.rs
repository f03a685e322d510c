//! Earnings date window.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// `today` and the `days_back` calendar days before it, newest first, with
/// Saturdays and Sundays dropped. The window ends early at the first
/// representable date.
pub fn earnings_dates(today: NaiveDate, days_back: u32) -> Vec<NaiveDate> {
    (0..=i64::from(days_back))
        .map_while(|i| today.checked_sub_signed(Duration::days(i)))
        .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
        .collect()
}
