use chrono::Datelike;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::core::primitives::parse_calendar_date;

/// Year-month bucket key formats for sparse axis ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketLabelFormat {
    /// `24/1`
    #[default]
    ShortYearMonth,
    /// `2024-01`
    YearMonth,
}

/// Bucket labels aligned with their source dates, plus the distinct buckets
/// in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BucketLabels {
    pub labels: Vec<String>,
    pub buckets: IndexSet<String>,
}

/// Returns the year-month bucket key of a date-like string.
#[must_use]
pub fn bucket_key(date: &str, format: BucketLabelFormat) -> Option<String> {
    let date = parse_calendar_date(date)?;
    Some(match format {
        BucketLabelFormat::ShortYearMonth => {
            format!("{:02}/{}", date.year().rem_euclid(100), date.month())
        }
        BucketLabelFormat::YearMonth => format!("{:04}-{:02}", date.year(), date.month()),
    })
}

/// Labels the first date of each bucket and blanks the rest.
///
/// Output length always equals input length. Dates that do not parse get an
/// empty label and do not open a bucket.
#[must_use]
pub fn generate_bucket_labels<S: AsRef<str>>(
    raw_dates: &[S],
    format: BucketLabelFormat,
) -> BucketLabels {
    let mut buckets = IndexSet::new();
    let labels = raw_dates
        .iter()
        .map(|raw| match bucket_key(raw.as_ref(), format) {
            Some(key) if !buckets.contains(&key) => {
                buckets.insert(key.clone());
                key
            }
            _ => String::new(),
        })
        .collect();

    BucketLabels { labels, buckets }
}
