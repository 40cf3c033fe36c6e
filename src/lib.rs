//! backtest-charts: chart data for backtest results.
//!
//! Turns loosely-typed result tables into aligned value/date/label series and
//! derives equity, drawdown, daily-return and return-distribution views for a
//! charting front end.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{ChartBundle, ProcessorConfig, TimeSeriesResultProcessor};
pub use error::{ChartError, ChartResult};
