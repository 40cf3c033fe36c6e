use serde::{Deserialize, Serialize};

use crate::core::{BucketLabelFormat, DEFAULT_HISTOGRAM_BINS, DateFallback, FieldAliases};
use crate::error::{ChartError, ChartResult};

/// Public processor configuration.
///
/// Serializable so hosts can keep one JSON document per result page instead
/// of wiring each knob by hand. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessorConfig {
    #[serde(default)]
    pub aliases: FieldAliases,
    #[serde(default)]
    pub bucket_format: BucketLabelFormat,
    #[serde(default)]
    pub date_fallback: DateFallback,
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,
    #[serde(default)]
    pub histogram_exclude_flat_returns: bool,
    /// Capital used when a caller passes none. The first value still wins
    /// when this is unset.
    #[serde(default)]
    pub default_initial_capital: Option<f64>,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessorConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            aliases: FieldAliases::default(),
            bucket_format: BucketLabelFormat::default(),
            date_fallback: DateFallback::default(),
            histogram_bins: default_histogram_bins(),
            histogram_exclude_flat_returns: false,
            default_initial_capital: None,
        }
    }

    /// Sets value/date column aliases.
    #[must_use]
    pub fn with_aliases(mut self, aliases: FieldAliases) -> Self {
        self.aliases = aliases;
        self
    }

    /// Sets the year-month bucket label format.
    #[must_use]
    pub fn with_bucket_format(mut self, format: BucketLabelFormat) -> Self {
        self.bucket_format = format;
        self
    }

    /// Sets what fills date slots when a result has no dates.
    #[must_use]
    pub fn with_date_fallback(mut self, fallback: DateFallback) -> Self {
        self.date_fallback = fallback;
        self
    }

    /// Sets the return-distribution bin count.
    #[must_use]
    pub fn with_histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = bins;
        self
    }

    /// Drops exactly-flat returns before building the distribution.
    #[must_use]
    pub fn with_histogram_exclude_flat_returns(mut self, exclude: bool) -> Self {
        self.histogram_exclude_flat_returns = exclude;
        self
    }

    /// Sets the capital assumed when a result does not report one.
    #[must_use]
    pub fn with_default_initial_capital(mut self, capital: f64) -> Self {
        self.default_initial_capital = Some(capital);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.histogram_bins == 0 {
            return Err(ChartError::InvalidConfig(
                "histogram bin count must be > 0".to_owned(),
            ));
        }
        if self.aliases.value.is_empty() {
            return Err(ChartError::InvalidConfig(
                "value alias list must not be empty".to_owned(),
            ));
        }
        if self.aliases.date.is_empty() {
            return Err(ChartError::InvalidConfig(
                "date alias list must not be empty".to_owned(),
            ));
        }
        Ok(())
    }

    /// Parses and validates a JSON config document.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }
}

fn default_histogram_bins() -> usize {
    DEFAULT_HISTOGRAM_BINS
}
