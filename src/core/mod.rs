pub mod aliases;
pub mod analytics;
pub mod benchmark;
pub mod bucket_labels;
pub mod date_sequence;
pub mod extraction;
pub mod histogram;
pub mod primitives;
pub mod types;

pub use aliases::{
    AliasList, DEFAULT_DATE_ALIASES, DEFAULT_VALUE_ALIASES, FieldAliases, fallback_value,
    lookup_first,
};
pub use analytics::{
    EquityCurve, daily_returns, drawdown_curve, equity_curve, max_drawdown,
    resolve_initial_capital, shifted_dates,
};
pub use benchmark::{benchmark_price, normalize_benchmark};
pub use bucket_labels::{BucketLabelFormat, BucketLabels, bucket_key, generate_bucket_labels};
pub use date_sequence::{day_placeholders, generate_date_sequence};
pub use extraction::{DateFallback, ExtractedSeries, extract_series};
pub use histogram::{
    DEFAULT_HISTOGRAM_BINS, ReturnHistogram, exclude_flat_returns, return_histogram,
};
pub use primitives::{
    coerce_value_f64, parse_calendar_date, parse_leading_float, truncate_to_calendar_date,
};
pub use types::{NormalizedSeries, RawResultRow};
