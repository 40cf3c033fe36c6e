mod chart_series;
mod json_contract;
mod metrics_format;
mod processor;
mod processor_config;
mod result_envelope;

pub use chart_series::{ChartBundle, ChartSeries, HistogramSeries};
pub use json_contract::{
    CHART_BUNDLE_JSON_SCHEMA_V1, ChartBundleJsonContractV1, SUMMARY_ROWS_JSON_SCHEMA_V1,
    SummaryRowsJsonContractV1, summary_rows_json_contract_v1_pretty,
};
pub use metrics_format::{
    DEFAULT_START_CAPITAL, MetricRow, SummaryMetrics, Tone, format_count, format_currency,
    format_percent, format_ratio, format_signed_percent,
};
pub use processor::{
    DerivedMetrics, TimeSeriesResultProcessor, market_rows_from_value, rows_from_value,
};
pub use processor_config::ProcessorConfig;
pub use result_envelope::{BacktestResultEnvelope, VALUES_FIELD};
