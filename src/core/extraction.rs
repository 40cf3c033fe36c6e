use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::RawResultRow;
use crate::core::aliases::{FieldAliases, fallback_value, lookup_first};
use crate::core::date_sequence::{day_placeholders, generate_date_sequence};
use crate::core::primitives::{coerce_value_f64, truncate_to_calendar_date};

/// What to put in the date slots when no retained row carried a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "start", rename_all = "snake_case")]
pub enum DateFallback {
    /// `Day 1`, `Day 2`, ...
    #[default]
    DayPlaceholders,
    /// Consecutive calendar days from a known start date.
    CalendarFrom(NaiveDate),
}

/// Values and dates pulled out of raw rows, before bucket labelling.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedSeries {
    pub portfolio_values: Vec<f64>,
    pub raw_dates: Vec<Option<String>>,
    /// Set when every date slot came from the [`DateFallback`].
    pub synthesized_dates: bool,
}

/// Extracts one value and one date per usable row, in input order.
///
/// Rows without a usable value are skipped silently. If no retained row has a
/// date, every date slot is filled from `fallback`.
#[must_use]
pub fn extract_series(
    rows: &[RawResultRow],
    aliases: &FieldAliases,
    fallback: DateFallback,
) -> ExtractedSeries {
    let mut portfolio_values = Vec::with_capacity(rows.len());
    let mut raw_dates = Vec::with_capacity(rows.len());

    for (row_index, row) in rows.iter().enumerate() {
        let Some(value) = row_value(row, aliases) else {
            trace!(row_index, fields = row.len(), "skip row without usable value");
            continue;
        };
        portfolio_values.push(value);
        let date = lookup_first(row, aliases.date.as_slice()).and_then(truncate_to_calendar_date);
        raw_dates.push(date);
    }

    let synthesized_dates = !raw_dates.is_empty() && raw_dates.iter().all(Option::is_none);
    if synthesized_dates {
        raw_dates = synthesize_dates(raw_dates.len(), fallback)
            .into_iter()
            .map(Some)
            .collect();
    }

    debug!(
        source_rows = rows.len(),
        retained_rows = portfolio_values.len(),
        synthesized_dates,
        "extracted result series"
    );

    ExtractedSeries {
        portfolio_values,
        raw_dates,
        synthesized_dates,
    }
}

fn row_value(row: &RawResultRow, aliases: &FieldAliases) -> Option<f64> {
    match lookup_first(row, aliases.value.as_slice()) {
        Some(value) => Some(coerce_value_f64(value)),
        None => fallback_value(row, aliases),
    }
}

fn synthesize_dates(count: usize, fallback: DateFallback) -> Vec<String> {
    match fallback {
        DateFallback::DayPlaceholders => day_placeholders(count),
        DateFallback::CalendarFrom(start) => generate_date_sequence(start, count),
    }
}
