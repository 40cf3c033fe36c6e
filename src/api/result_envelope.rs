use chrono::NaiveDate;
use serde_json::{Map, Value};
use tracing::debug;

use crate::core::{DateFallback, RawResultRow};
use crate::core::primitives::{parse_calendar_date, truncate_to_calendar_date};
use crate::error::{ChartError, ChartResult};

use super::{MetricRow, SummaryMetrics};
use super::processor::{json_kind, rows_from_value};

pub const VALUES_FIELD: &str = "values_df";

/// Backtest result body as served by the backend, reduced to what the charts
/// and the summary panel need.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BacktestResultEnvelope {
    pub rows: Vec<RawResultRow>,
    pub metrics: SummaryMetrics,
    pub initial_capital: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub symbol: Option<String>,
}

impl BacktestResultEnvelope {
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_value(&value)
    }

    /// Reads either a full response body (`{"result": {...}}`) or the stored
    /// result record itself.
    ///
    /// The value table and metrics are looked up in `result`, then `results`,
    /// then the record itself. A missing value table yields no rows.
    pub fn from_value(value: &Value) -> ChartResult<Self> {
        let body = value.as_object().ok_or_else(|| {
            ChartError::InvalidData(format!(
                "backtest result must be a json object, got {}",
                json_kind(value)
            ))
        })?;
        let record = body
            .get("result")
            .and_then(Value::as_object)
            .unwrap_or(body);
        let results = ["result", "results"]
            .iter()
            .find_map(|key| record.get(*key).and_then(Value::as_object))
            .unwrap_or(record);

        let rows = match results.get(VALUES_FIELD) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::String(encoded)) => rows_from_value(serde_json::from_str(encoded)?)?,
            Some(table) => rows_from_value(table.clone())?,
        };
        let metrics = match results.get("metrics") {
            Some(metrics @ Value::Object(_)) => serde_json::from_value(metrics.clone())?,
            _ => SummaryMetrics::default(),
        };

        let envelope = Self {
            rows,
            metrics,
            initial_capital: number_field(record, "initial_capital"),
            start_date: record
                .get("start_date")
                .and_then(truncate_to_calendar_date)
                .and_then(|date| parse_calendar_date(&date)),
            symbol: record
                .get("symbol")
                .and_then(Value::as_str)
                .filter(|symbol| !symbol.is_empty())
                .map(str::to_owned),
        };
        debug!(
            rows = envelope.rows.len(),
            initial_capital = ?envelope.initial_capital,
            symbol = ?envelope.symbol,
            "parsed backtest result envelope"
        );
        Ok(envelope)
    }

    /// Calendar-day fallback starting at the reported start date, for results
    /// whose value table carries no dates.
    #[must_use]
    pub fn start_date_fallback(&self) -> Option<DateFallback> {
        self.start_date.map(DateFallback::CalendarFrom)
    }

    /// Summary panel rows, measured against
    /// [`SummaryMetrics::starting_capital`].
    #[must_use]
    pub fn summary_rows(&self) -> Vec<MetricRow> {
        let capital = self.metrics.starting_capital(self.initial_capital);
        self.metrics.display_rows(capital)
    }
}

fn number_field(record: &Map<String, Value>, key: &str) -> Option<f64> {
    record
        .get(key)
        .and_then(Value::as_f64)
        .filter(|number| *number != 0.0 && number.is_finite())
}
