use serde::{Deserialize, Serialize};

pub const DEFAULT_HISTOGRAM_BINS: usize = 20;

/// Fixed-bin frequency distribution of daily returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnHistogram {
    pub min: f64,
    pub max: f64,
    pub bin_size: f64,
    pub frequencies: Vec<usize>,
    pub bin_starts: Vec<f64>,
}

impl ReturnHistogram {
    #[must_use]
    pub fn bin_count(&self) -> usize {
        self.frequencies.len()
    }

    /// Total number of binned samples.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.frequencies.iter().sum()
    }

    /// Bin starts formatted with two decimals, for category axes.
    #[must_use]
    pub fn bin_labels(&self) -> Vec<String> {
        self.bin_starts
            .iter()
            .map(|start| format!("{start:.2}"))
            .collect()
    }

    /// Horizontal position of the 0% marker in `[0, 1]`, when zero lies inside
    /// the sampled range.
    #[must_use]
    pub fn zero_line_ratio(&self) -> Option<f64> {
        let span = self.max - self.min;
        (self.min <= 0.0 && self.max >= 0.0 && span > 0.0).then(|| -self.min / span)
    }
}

/// Bins `returns` into `bin_count` equal-width buckets between the sample
/// minimum and maximum.
///
/// Returns `None` for empty input, which callers treat as nothing to draw.
/// The maximum sample lands in the last bin. When every sample is equal the
/// bin width is zero and all samples go to the first bin, so frequencies
/// always sum to `returns.len()`.
#[must_use]
pub fn return_histogram(returns: &[f64], bin_count: usize) -> Option<ReturnHistogram> {
    if returns.is_empty() || bin_count == 0 {
        return None;
    }

    let min = returns.iter().copied().fold(f64::INFINITY, f64::min);
    let max = returns.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let bin_size = (max - min) / bin_count as f64;

    let last_bin = bin_count - 1;
    let mut frequencies = vec![0usize; bin_count];
    for &sample in returns {
        frequencies[bin_index(sample, min, bin_size, last_bin)] += 1;
    }

    let bin_starts = (0..bin_count)
        .map(|bin| min + bin as f64 * bin_size)
        .collect();

    Some(ReturnHistogram {
        min,
        max,
        bin_size,
        frequencies,
        bin_starts,
    })
}

/// Drops exactly-flat returns (idle days) before binning.
#[must_use]
pub fn exclude_flat_returns(returns: &[f64]) -> Vec<f64> {
    returns
        .iter()
        .copied()
        .filter(|sample| *sample != 0.0)
        .collect()
}

fn bin_index(sample: f64, min: f64, bin_size: f64, last_bin: usize) -> usize {
    if !bin_size.is_finite() || bin_size <= 0.0 {
        return 0;
    }
    let raw = ((sample - min) / bin_size).floor();
    if raw.is_nan() || raw <= 0.0 {
        0
    } else {
        (raw as usize).min(last_bin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bin_index_clamps_both_ends() {
        assert_eq!(bin_index(-5.0, 0.0, 1.0, 19), 0);
        assert_eq!(bin_index(20.0, 0.0, 1.0, 19), 19);
        assert_eq!(bin_index(f64::NAN, 0.0, 1.0, 19), 0);
        assert_eq!(bin_index(3.0, 3.0, 0.0, 19), 0);
    }
}
