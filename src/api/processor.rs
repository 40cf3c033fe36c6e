use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::core::{
    EquityCurve, NormalizedSeries, RawResultRow, ReturnHistogram, daily_returns, drawdown_curve,
    equity_curve, exclude_flat_returns, extract_series, generate_bucket_labels, max_drawdown,
    normalize_benchmark, resolve_initial_capital, return_histogram, shifted_dates,
};
use crate::error::{ChartError, ChartResult};

use super::{ChartBundle, ChartSeries, ProcessorConfig};

/// Analytic views derived from a [`NormalizedSeries`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub initial_capital: f64,
    pub equity: EquityCurve,
    pub drawdown: Vec<f64>,
    pub daily_returns: Vec<f64>,
    pub daily_return_dates: Vec<String>,
    pub histogram: Option<ReturnHistogram>,
}

impl DerivedMetrics {
    /// Deepest drawdown percentage, if any finite sample exists.
    #[must_use]
    pub fn max_drawdown(&self) -> Option<f64> {
        max_drawdown(&self.drawdown)
    }

    /// `true` when any derived sample is `NaN` or infinite.
    #[must_use]
    pub fn has_non_finite(&self) -> bool {
        self.equity
            .equity
            .iter()
            .chain(&self.drawdown)
            .chain(&self.daily_returns)
            .any(|sample| !sample.is_finite())
    }
}

/// Turns raw backtest result rows into aligned, chart-ready series.
///
/// The processor is pure and synchronous; a fresh [`NormalizedSeries`] is
/// built per call and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct TimeSeriesResultProcessor {
    config: ProcessorConfig,
}

impl TimeSeriesResultProcessor {
    pub fn new(config: ProcessorConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Extracts values and dates, then attaches sparse bucket labels.
    #[must_use]
    pub fn normalize(&self, rows: &[RawResultRow]) -> NormalizedSeries {
        let extracted = extract_series(rows, &self.config.aliases, self.config.date_fallback);
        let raw_dates: Vec<String> = extracted
            .raw_dates
            .into_iter()
            .map(Option::unwrap_or_default)
            .collect();
        let labels = generate_bucket_labels(&raw_dates, self.config.bucket_format);
        debug!(
            points = raw_dates.len(),
            buckets = labels.buckets.len(),
            "normalized result series"
        );

        NormalizedSeries {
            portfolio_values: extracted.portfolio_values,
            raw_dates,
            display_labels: labels.labels,
        }
    }

    /// Derives equity, drawdown, daily returns and the return distribution.
    ///
    /// Division by zero is not guarded: a zero capital, peak or previous value
    /// yields `NaN`/infinite samples, which are passed through as-is.
    #[must_use]
    pub fn derive(
        &self,
        series: &NormalizedSeries,
        initial_capital: Option<f64>,
    ) -> DerivedMetrics {
        let values = &series.portfolio_values;
        let initial_capital = resolve_initial_capital(
            values,
            initial_capital
                .filter(|capital| *capital != 0.0 && !capital.is_nan())
                .or(self.config.default_initial_capital),
        );
        let returns = daily_returns(values);

        let bins = self.config.histogram_bins;
        let histogram = if self.config.histogram_exclude_flat_returns {
            return_histogram(&exclude_flat_returns(&returns), bins)
        } else {
            return_histogram(&returns, bins)
        };

        let metrics = DerivedMetrics {
            initial_capital,
            equity: equity_curve(values, initial_capital),
            drawdown: drawdown_curve(values),
            daily_return_dates: shifted_dates(&series.raw_dates).to_vec(),
            daily_returns: returns,
            histogram,
        };

        if metrics.has_non_finite() {
            warn!(
                initial_capital,
                points = values.len(),
                "derived metrics contain non-finite samples"
            );
        }
        metrics
    }

    /// Builds the label/value series handed to the charting layer.
    #[must_use]
    pub fn chart_bundle(
        &self,
        series: &NormalizedSeries,
        initial_capital: Option<f64>,
    ) -> ChartBundle {
        let metrics = self.derive(series, initial_capital);
        ChartBundle::from_parts(series, &metrics, self.config.bucket_format)
    }

    /// Benchmark price series on the same axis as `series`.
    ///
    /// `None` when no market row shares a date with the result.
    #[must_use]
    pub fn benchmark_series(
        &self,
        market_rows: &[RawResultRow],
        series: &NormalizedSeries,
    ) -> Option<ChartSeries> {
        let values = normalize_benchmark(market_rows, &series.raw_dates)?;
        Some(ChartSeries::new(
            series.display_labels.clone(),
            values,
            series.raw_dates.clone(),
        ))
    }

    /// Parses a JSON array of row objects and normalizes it.
    ///
    /// Array entries that are not objects are skipped like rows without a
    /// value.
    pub fn process_json_rows(&self, input: &str) -> ChartResult<NormalizedSeries> {
        let value: Value = serde_json::from_str(input)?;
        let rows = rows_from_value(value)?;
        Ok(self.normalize(&rows))
    }
}

/// Converts a JSON array into result rows, dropping non-object entries.
pub fn rows_from_value(value: Value) -> ChartResult<Vec<RawResultRow>> {
    match value {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(RawResultRow::from_value)
            .collect()),
        other => Err(ChartError::InvalidData(format!(
            "result rows must be a json array, got {}",
            json_kind(&other)
        ))),
    }
}

/// Reads market data rows from either a bare JSON array or a data-file
/// response (`{"data": [...]}`).
pub fn market_rows_from_value(value: Value) -> ChartResult<Vec<RawResultRow>> {
    match value {
        Value::Object(mut body) => match body.remove("data") {
            Some(rows) => rows_from_value(rows),
            None => Err(ChartError::InvalidData(
                "market data object has no `data` field".to_owned(),
            )),
        },
        other => rows_from_value(other),
    }
}

pub(super) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
