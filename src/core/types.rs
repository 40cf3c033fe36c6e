use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One record of a tabular backtest result as decoded from the backend.
///
/// Field order follows the source JSON object, which matters for the
/// positive-number value fallback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawResultRow(Map<String, Value>);

impl RawResultRow {
    #[must_use]
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Wraps a JSON object. Any other JSON shape is not a row.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Iterates fields in their natural (source) order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for RawResultRow {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Aligned output of the value/date extraction and bucket labelling passes.
///
/// Invariant: `portfolio_values`, `raw_dates` and `display_labels` always have
/// the same length. Rows without a usable value are dropped, so the length
/// may be smaller than the number of source rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSeries {
    pub portfolio_values: Vec<f64>,
    /// `YYYY-MM-DD` dates, `Day N` placeholders, or an empty string for a row
    /// that had no date while its siblings did.
    pub raw_dates: Vec<String>,
    /// Bucket key at the first occurrence of each bucket, empty elsewhere.
    pub display_labels: Vec<String>,
}

impl NormalizedSeries {
    #[must_use]
    pub fn len(&self) -> usize {
        self.portfolio_values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.portfolio_values.is_empty()
    }
}
