use chrono::NaiveDate;

use crate::core::primitives::format_calendar_date;

/// `Day 1`, `Day 2`, ... placeholders for results that carry no dates.
#[must_use]
pub fn day_placeholders(count: usize) -> Vec<String> {
    (1..=count).map(|day| format!("Day {day}")).collect()
}

/// Consecutive calendar days starting at `start`, as `YYYY-MM-DD`.
#[must_use]
pub fn generate_date_sequence(start: NaiveDate, count: usize) -> Vec<String> {
    start
        .iter_days()
        .take(count)
        .map(format_calendar_date)
        .collect()
}
