use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::core::RawResultRow;
use crate::core::primitives::{coerce_value_f64, truncate_date_text, truncate_to_calendar_date};

pub const BENCHMARK_DATE_FIELD: &str = "Date";
pub const BENCHMARK_PRICE_FIELDS: [&str; 2] = ["Close", "Price"];

/// Price of a benchmark market-data row.
///
/// Uses `Close`, then `Price`, then whatever sits in the second column.
/// Empty, zero or unparseable cells do not count as a price.
#[must_use]
pub fn benchmark_price(row: &RawResultRow) -> Option<f64> {
    let cell = BENCHMARK_PRICE_FIELDS
        .iter()
        .filter_map(|field| row.get(field))
        .find(|value| is_filled(value))
        .or_else(|| row.fields().nth(1).map(|(_, value)| value))?;
    let price = coerce_value_f64(cell);
    (!price.is_nan()).then_some(price)
}

/// Aligns benchmark prices to `raw_dates` and normalizes them to the first
/// aligned price.
///
/// Gaps are forward-filled, and leading gaps are back-filled from the first
/// aligned value. Returns `None` when no date aligns.
#[must_use]
pub fn normalize_benchmark<S: AsRef<str>>(
    rows: &[RawResultRow],
    raw_dates: &[S],
) -> Option<Vec<f64>> {
    if raw_dates.is_empty() {
        return None;
    }

    let mut prices = HashMap::with_capacity(rows.len());
    for row in rows {
        let date = row
            .get(BENCHMARK_DATE_FIELD)
            .and_then(truncate_to_calendar_date);
        if let (Some(date), Some(price)) = (date, benchmark_price(row)) {
            prices.insert(date, price);
        }
    }

    let mut base_price = None;
    let mut aligned: Vec<Option<f64>> = raw_dates
        .iter()
        .map(|raw| {
            let price = *prices.get(truncate_date_text(raw.as_ref()))?;
            let base = *base_price.get_or_insert(price);
            Some(price / base)
        })
        .collect();

    let matched = aligned.iter().filter(|slot| slot.is_some()).count();
    debug!(
        benchmark_rows = rows.len(),
        dates = raw_dates.len(),
        matched,
        "aligned benchmark prices"
    );

    let first_valid = aligned.iter().copied().flatten().next()?;
    for index in 1..aligned.len() {
        if aligned[index].is_none() {
            aligned[index] = aligned[index - 1];
        }
    }
    for slot in aligned.iter_mut().take_while(|slot| slot.is_none()) {
        *slot = Some(first_valid);
    }

    aligned.into_iter().collect()
}

fn is_filled(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
