use serde::{Deserialize, Serialize};

/// Normalized equity plus the constant `1.0` reference overlay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquityCurve {
    pub equity: Vec<f64>,
    pub baseline: Vec<f64>,
}

/// Picks the capital equity is normalized against.
///
/// An explicit non-zero capital wins; otherwise the first portfolio value is
/// used. With no values at all the result is `NaN`.
#[must_use]
pub fn resolve_initial_capital(values: &[f64], explicit: Option<f64>) -> f64 {
    match explicit {
        Some(capital) if capital != 0.0 && !capital.is_nan() => capital,
        _ => values.first().copied().unwrap_or(f64::NAN),
    }
}

#[must_use]
pub fn equity_curve(values: &[f64], initial_capital: f64) -> EquityCurve {
    EquityCurve {
        equity: values.iter().map(|value| value / initial_capital).collect(),
        baseline: vec![1.0; values.len()],
    }
}

/// Percentage decline from the running peak. Never positive for finite input;
/// zero wherever a new peak is set, including index 0.
#[must_use]
pub fn drawdown_curve(values: &[f64]) -> Vec<f64> {
    let Some(&first) = values.first() else {
        return Vec::new();
    };

    let mut peak = first;
    values
        .iter()
        .map(|&value| {
            if value > peak {
                peak = value;
            }
            (value - peak) / peak * 100.0
        })
        .collect()
}

/// Step-over-step percentage returns; `n - 1` samples for `n` values.
#[must_use]
pub fn daily_returns(values: &[f64]) -> Vec<f64> {
    values
        .windows(2)
        .map(|pair| (pair[1] - pair[0]) / pair[0] * 100.0)
        .collect()
}

/// Dates paired with [`daily_returns`]: every slot after the first.
#[must_use]
pub fn shifted_dates<T>(raw_dates: &[T]) -> &[T] {
    raw_dates.get(1..).unwrap_or_default()
}

/// Deepest drawdown in a drawdown curve, ignoring `NaN` samples.
#[must_use]
pub fn max_drawdown(drawdown: &[f64]) -> Option<f64> {
    drawdown
        .iter()
        .copied()
        .filter(|sample| !sample.is_nan())
        .reduce(f64::min)
}
