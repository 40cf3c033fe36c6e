use backtest_charts::api::{BacktestResultEnvelope, ProcessorConfig, TimeSeriesResultProcessor};
use backtest_charts::core::DateFallback;
use chrono::NaiveDate;
use serde_json::json;

#[test]
fn reads_nested_backend_response_body() {
    let body = json!({
        "result": {
            "initial_capital": 100000,
            "start_date": "2024-01-01",
            "symbol": "600519.SS",
            "result": {
                "values_df": [
                    {"date": "2024-01-01", "total_value": 100000},
                    {"date": "2024-01-02", "total_value": 101000}
                ],
                "metrics": {"total_return": 0.01, "max_drawdown": 0.0, "sharpe_ratio": 1.5}
            }
        }
    });

    let envelope = BacktestResultEnvelope::from_value(&body).expect("envelope");
    assert_eq!(envelope.rows.len(), 2);
    assert_eq!(envelope.initial_capital, Some(100000.0));
    assert_eq!(envelope.start_date, NaiveDate::from_ymd_opt(2024, 1, 1));
    assert_eq!(envelope.symbol.as_deref(), Some("600519.SS"));
    assert_eq!(envelope.metrics.total_return, 0.01);
    assert_eq!(envelope.metrics.sharpe_ratio, 1.5);
    assert_eq!(envelope.metrics.win_rate, 0.0);

    let processor = TimeSeriesResultProcessor::default();
    let series = processor.normalize(&envelope.rows);
    assert_eq!(series.portfolio_values, vec![100000.0, 101000.0]);
}

#[test]
fn accepts_results_key_and_string_encoded_table() {
    let body = json!({
        "initial_capital": 0,
        "results": {
            "values_df": "[{\"equity\": 5.0}, {\"equity\": 6.0}]"
        }
    });

    let envelope = BacktestResultEnvelope::from_value(&body).expect("envelope");
    assert_eq!(envelope.rows.len(), 2);
    assert_eq!(envelope.initial_capital, None);
    assert_eq!(envelope.symbol, None);
}

#[test]
fn missing_value_table_yields_no_rows() {
    let envelope = BacktestResultEnvelope::from_json_str(r#"{"result": {"symbol": ""}}"#)
        .expect("envelope");
    assert!(envelope.rows.is_empty());
    assert_eq!(envelope.symbol, None);
}

#[test]
fn rejects_non_object_bodies() {
    let err = BacktestResultEnvelope::from_json_str("[1, 2]").expect_err("array body");
    assert!(format!("{err}").contains("json object"));

    let err = BacktestResultEnvelope::from_json_str(r#"{"values_df": 5}"#)
        .expect_err("scalar table");
    assert!(format!("{err}").contains("json array"));

    assert!(BacktestResultEnvelope::from_json_str("{").is_err());
}

#[test]
fn summary_rows_use_reported_start_capital() {
    let body = json!({
        "initial_capital": 150000,
        "result": {
            "values_df": [{"total_value": 210000}, {"total_value": 220000}],
            "metrics": {"start_capital": 200000, "end_capital": 220000}
        }
    });

    let envelope = BacktestResultEnvelope::from_value(&body).expect("envelope");
    let rows = envelope.summary_rows();
    let text = |key: &str| {
        rows.iter()
            .find(|row| row.key == key)
            .map(|row| row.text.clone())
            .unwrap_or_else(|| panic!("missing row {key}"))
    };

    assert_eq!(text("initial_capital"), "200,000.00");
    assert_eq!(text("ending_capital"), "220,000.00");
    assert_eq!(text("capital_growth"), "+10.00%");
}

#[test]
fn summary_rows_default_capital_when_nothing_reported() {
    let envelope = BacktestResultEnvelope::from_json_str(r#"{"values_df": []}"#)
        .expect("envelope");
    let rows = envelope.summary_rows();
    let initial = rows
        .iter()
        .find(|row| row.key == "initial_capital")
        .expect("initial capital row");
    assert_eq!(initial.text, "100,000.00");
}

#[test]
fn start_date_anchors_calendar_dates_for_dateless_tables() {
    let envelope = BacktestResultEnvelope::from_value(&json!({
        "start_date": "2024-01-30 00:00:00",
        "values_df": [{"value": 1.0}, {"value": 2.0}, {"value": 3.0}]
    }))
    .expect("envelope");

    let fallback = envelope.start_date_fallback().expect("start date");
    assert_eq!(
        fallback,
        DateFallback::CalendarFrom(NaiveDate::from_ymd_opt(2024, 1, 30).expect("date"))
    );

    let processor =
        TimeSeriesResultProcessor::new(ProcessorConfig::default().with_date_fallback(fallback))
            .expect("processor");
    let series = processor.normalize(&envelope.rows);
    assert_eq!(series.raw_dates, vec!["2024-01-30", "2024-01-31", "2024-02-01"]);
    assert_eq!(series.display_labels, vec!["24/1", "", "24/2"]);

    let undated = BacktestResultEnvelope::from_json_str("{}").expect("envelope");
    assert_eq!(undated.start_date_fallback(), None);
}
