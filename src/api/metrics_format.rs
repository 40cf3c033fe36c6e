use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Capital shown when neither the metrics nor the result report one.
pub const DEFAULT_START_CAPITAL: f64 = 100_000.0;

/// Summary statistics reported by the backend next to the value table.
///
/// Ratios are fractions (`0.05` is 5%); money fields are in account currency.
/// Missing fields default to zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryMetrics {
    pub total_trading_days: f64,
    pub profitable_days: f64,
    pub losing_days: f64,
    pub start_capital: Option<f64>,
    pub end_capital: Option<f64>,
    pub total_return: f64,
    pub annualized_return: f64,
    pub avg_daily_return: f64,
    pub max_drawdown: f64,
    pub return_std: f64,
    pub volatility: f64,
    pub sharpe_ratio: f64,
    pub return_drawdown_ratio: f64,
    pub win_rate: f64,
    pub profit_loss_ratio: f64,
    pub avg_win: f64,
    pub avg_loss: f64,
    pub total_commission: f64,
    pub total_turnover: f64,
    pub total_trade_count: f64,
    pub avg_daily_pnl: f64,
    pub avg_daily_commission: f64,
    pub avg_daily_turnover: f64,
    pub avg_daily_trade_count: f64,
}

/// Direction of a displayed figure, for gain/loss coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Neutral,
    Gain,
    Loss,
}

impl Tone {
    #[must_use]
    pub fn of(value: f64) -> Self {
        if value >= 0.0 { Self::Gain } else { Self::Loss }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricRow {
    pub key: &'static str,
    pub text: String,
    pub tone: Tone,
}

impl MetricRow {
    fn neutral(key: &'static str, text: String) -> Self {
        Self {
            key,
            text,
            tone: Tone::Neutral,
        }
    }

    fn toned(key: &'static str, text: String, tone: Tone) -> Self {
        Self { key, text, tone }
    }
}

impl SummaryMetrics {
    /// Capital the summary is measured against: the metrics' own
    /// `start_capital`, then the result's `initial_capital`, then
    /// [`DEFAULT_START_CAPITAL`]. Zero and `NaN` count as unreported.
    #[must_use]
    pub fn starting_capital(&self, reported_initial_capital: Option<f64>) -> f64 {
        [self.start_capital, reported_initial_capital]
            .into_iter()
            .flatten()
            .find(|capital| *capital != 0.0 && !capital.is_nan())
            .unwrap_or(DEFAULT_START_CAPITAL)
    }

    /// Capital change over the run, as an absolute amount and a percentage of
    /// `initial_capital`. The percentage is zero for a non-positive capital.
    #[must_use]
    pub fn capital_growth(&self, initial_capital: f64) -> (f64, f64) {
        let ending = self.end_capital.unwrap_or(initial_capital);
        let growth = ending - initial_capital;
        let percent = if initial_capital > 0.0 {
            growth / initial_capital * 100.0
        } else {
            0.0
        };
        (growth, percent)
    }

    /// Ordered display rows for the result summary panel.
    #[must_use]
    pub fn display_rows(&self, initial_capital: f64) -> Vec<MetricRow> {
        let ending = self.end_capital.unwrap_or(initial_capital);
        let (growth, growth_percent) = self.capital_growth(initial_capital);

        vec![
            MetricRow::neutral("total_trading_days", format_count(self.total_trading_days)),
            MetricRow::toned("profitable_days", format_count(self.profitable_days), Tone::Gain),
            MetricRow::toned("losing_days", format_count(self.losing_days), Tone::Loss),
            MetricRow::neutral("initial_capital", format_currency(initial_capital)),
            MetricRow::neutral("ending_capital", format_currency(ending)),
            MetricRow::toned(
                "capital_growth",
                format_signed_percent(growth_percent),
                Tone::of(growth),
            ),
            fraction_row("total_return", self.total_return),
            fraction_row("annualized_return", self.annualized_return),
            fraction_row("avg_daily_return", self.avg_daily_return),
            MetricRow::neutral("max_drawdown", format_percent(self.max_drawdown)),
            MetricRow::neutral("return_std", format_percent(self.return_std)),
            MetricRow::neutral("volatility", format_percent(self.volatility)),
            MetricRow::neutral("sharpe_ratio", format_ratio(self.sharpe_ratio)),
            MetricRow::neutral(
                "return_drawdown_ratio",
                format_ratio(self.return_drawdown_ratio),
            ),
            MetricRow::neutral("win_rate", format_percent(self.win_rate)),
            MetricRow::neutral("profit_loss_ratio", format_ratio(self.profit_loss_ratio)),
            MetricRow::toned("avg_win", format_currency(self.avg_win), Tone::Gain),
            MetricRow::toned("avg_loss", format_currency(self.avg_loss.abs()), Tone::Loss),
            MetricRow::toned("total_pnl", format_currency(growth), Tone::of(growth)),
            MetricRow::neutral("total_commission", format_currency(self.total_commission)),
            MetricRow::neutral("total_turnover", format_currency(self.total_turnover)),
            MetricRow::neutral("total_trade_count", format_count(self.total_trade_count)),
            MetricRow::toned(
                "avg_daily_pnl",
                format_currency(self.avg_daily_pnl),
                Tone::of(self.avg_daily_pnl),
            ),
            MetricRow::neutral(
                "avg_daily_commission",
                format_currency(self.avg_daily_commission),
            ),
            MetricRow::neutral("avg_daily_turnover", format_currency(self.avg_daily_turnover)),
            MetricRow::neutral(
                "avg_daily_trade_count",
                format_ratio(self.avg_daily_trade_count),
            ),
        ]
    }
}

fn fraction_row(key: &'static str, fraction: f64) -> MetricRow {
    MetricRow::toned(key, format_percent(fraction), Tone::of(fraction))
}

/// `0.0512` -> `5.12%`. Non-finite input renders as `-`.
#[must_use]
pub fn format_percent(fraction: f64) -> String {
    if !fraction.is_finite() {
        return "-".to_owned();
    }
    format!("{:.2}%", fraction * 100.0)
}

/// Percentage with an explicit sign for non-negative values: `+1.50%`.
#[must_use]
pub fn format_signed_percent(percent: f64) -> String {
    if !percent.is_finite() {
        return "-".to_owned();
    }
    let sign = if percent >= 0.0 { "+" } else { "" };
    format!("{sign}{percent:.2}%")
}

/// Two-decimal amount with thousands separators: `1,234,567.89`.
///
/// Rounds half away from zero. Non-finite input renders as `-`.
#[must_use]
pub fn format_currency(value: f64) -> String {
    let Some(amount) = Decimal::from_f64(value) else {
        return "-".to_owned();
    };
    let mut amount = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    amount.rescale(2);

    let text = amount.abs().to_string();
    let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{}.{fraction}", group_thousands(integer))
}

/// Two decimals, `inf` for infinity and `-` for `NaN`.
#[must_use]
pub fn format_ratio(value: f64) -> String {
    if value.is_nan() {
        "-".to_owned()
    } else if value == f64::INFINITY {
        "inf".to_owned()
    } else if value == f64::NEG_INFINITY {
        "-inf".to_owned()
    } else {
        format!("{value:.2}")
    }
}

#[must_use]
pub fn format_count(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_owned();
    }
    format!("{value:.0}")
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
