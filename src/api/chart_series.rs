use serde::{Deserialize, Deserializer, Serialize};

use crate::core::primitives::{parse_calendar_date, truncate_date_text};
use crate::core::{BucketLabelFormat, NormalizedSeries, ReturnHistogram, generate_bucket_labels};

use super::DerivedMetrics;

/// `{labels, values}` series for the charting layer, with the full raw dates
/// kept alongside for tooltips.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    /// Non-finite samples serialize as `null` and read back as `NaN`.
    #[serde(deserialize_with = "deserialize_nullable_samples")]
    pub values: Vec<f64>,
    #[serde(default)]
    pub raw_dates: Vec<String>,
}

impl ChartSeries {
    #[must_use]
    pub fn new(labels: Vec<String>, values: Vec<f64>, raw_dates: Vec<String>) -> Self {
        Self {
            labels,
            values,
            raw_dates,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Hover title for the sample at `index`.
    ///
    /// Re-derives the calendar date from the raw-date side array, since the
    /// axis label is blank for most samples. Falls back to the axis label, then
    /// to an empty string. Text that is not a date (`Day 3`) is returned whole.
    #[must_use]
    pub fn tooltip_title(&self, index: usize) -> String {
        let Some(source) =
            non_empty(self.raw_dates.get(index)).or_else(|| non_empty(self.labels.get(index)))
        else {
            return String::new();
        };
        let date = truncate_date_text(source);
        let title = if parse_calendar_date(date).is_some() {
            date
        } else {
            source
        };
        title.to_owned()
    }
}

/// Frequency series of the return distribution: bin-start labels and one
/// sample count per bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramSeries {
    pub labels: Vec<String>,
    pub values: Vec<usize>,
    /// Position of the 0% marker across the plot width, when inside the range.
    pub zero_line_ratio: Option<f64>,
}

impl From<&ReturnHistogram> for HistogramSeries {
    fn from(histogram: &ReturnHistogram) -> Self {
        Self {
            labels: histogram.bin_labels(),
            values: histogram.frequencies.clone(),
            zero_line_ratio: histogram.zero_line_ratio(),
        }
    }
}

/// Everything a backtest result page draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartBundle {
    pub equity: ChartSeries,
    pub equity_baseline: ChartSeries,
    pub drawdown: ChartSeries,
    pub daily_returns: ChartSeries,
    /// Absent when there were no returns to bin.
    pub histogram: Option<HistogramSeries>,
    /// Benchmark prices normalized to 1.0 and aligned to the result dates.
    #[serde(default)]
    pub benchmark: Option<ChartSeries>,
}

impl ChartBundle {
    /// Pairs derived values with their display labels and raw dates.
    ///
    /// Daily returns get their own bucket labels, computed over the shifted
    /// dates, so the first month tick is not lost.
    #[must_use]
    pub fn from_parts(
        series: &NormalizedSeries,
        metrics: &DerivedMetrics,
        format: BucketLabelFormat,
    ) -> Self {
        let over_series = |values: Vec<f64>| {
            ChartSeries::new(
                series.display_labels.clone(),
                values,
                series.raw_dates.clone(),
            )
        };
        let return_labels = generate_bucket_labels(&metrics.daily_return_dates, format);

        Self {
            equity: over_series(metrics.equity.equity.clone()),
            equity_baseline: over_series(metrics.equity.baseline.clone()),
            drawdown: over_series(metrics.drawdown.clone()),
            daily_returns: ChartSeries::new(
                return_labels.labels,
                metrics.daily_returns.clone(),
                metrics.daily_return_dates.clone(),
            ),
            histogram: metrics.histogram.as_ref().map(HistogramSeries::from),
            benchmark: None,
        }
    }

    #[must_use]
    pub fn with_benchmark(mut self, benchmark: Option<ChartSeries>) -> Self {
        self.benchmark = benchmark;
        self
    }
}

fn non_empty(text: Option<&String>) -> Option<&str> {
    text.map(String::as_str).filter(|text| !text.is_empty())
}

fn deserialize_nullable_samples<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let samples = Vec::<Option<f64>>::deserialize(deserializer)?;
    Ok(samples
        .into_iter()
        .map(|sample| sample.unwrap_or(f64::NAN))
        .collect())
}
