use backtest_charts::api::{
    CHART_BUNDLE_JSON_SCHEMA_V1, ChartBundle, ChartSeries, TimeSeriesResultProcessor,
};
use backtest_charts::core::{NormalizedSeries, RawResultRow};
use serde_json::json;

fn sample_series() -> NormalizedSeries {
    let rows: Vec<RawResultRow> = [
        json!({"date": "2024-01-30", "total_value": 100.0}),
        json!({"date": "2024-01-31", "total_value": 105.0}),
        json!({"date": "2024-02-01", "total_value": 102.9}),
        json!({"date": "2024-02-02", "total_value": 110.0}),
    ]
    .into_iter()
    .map(|row| RawResultRow::from_value(row).expect("row"))
    .collect();
    TimeSeriesResultProcessor::default().normalize(&rows)
}

#[test]
fn bundle_series_share_labels_and_raw_dates() {
    let series = sample_series();
    let bundle = TimeSeriesResultProcessor::default().chart_bundle(&series, None);

    for chart in [&bundle.equity, &bundle.equity_baseline, &bundle.drawdown] {
        assert_eq!(chart.labels, series.display_labels);
        assert_eq!(chart.raw_dates, series.raw_dates);
        assert_eq!(chart.len(), series.len());
    }
    assert_eq!(bundle.equity_baseline.values, vec![1.0; 4]);
}

#[test]
fn daily_returns_relabel_shifted_dates() {
    let series = sample_series();
    let bundle = TimeSeriesResultProcessor::default().chart_bundle(&series, None);

    assert_eq!(bundle.daily_returns.len(), 3);
    assert_eq!(
        bundle.daily_returns.raw_dates,
        vec!["2024-01-31", "2024-02-01", "2024-02-02"]
    );
    assert_eq!(bundle.daily_returns.labels, vec!["24/1", "24/2", ""]);

    let histogram = bundle.histogram.expect("histogram");
    assert_eq!(histogram.values.iter().sum::<usize>(), 3);
    assert_eq!(histogram.labels.len(), 20);
    assert!(histogram.zero_line_ratio.is_some());
}

#[test]
fn tooltip_title_recovers_full_date_from_raw_dates() {
    let chart = ChartSeries::new(
        vec!["24/1".into(), String::new(), String::new()],
        vec![1.0, 2.0, 3.0],
        vec![
            "2024-01-30".into(),
            "2024-01-31T15:00:00".into(),
            String::new(),
        ],
    );

    assert_eq!(chart.tooltip_title(0), "2024-01-30");
    assert_eq!(chart.tooltip_title(1), "2024-01-31");
    assert_eq!(chart.tooltip_title(2), "");
    assert_eq!(chart.tooltip_title(99), "");
}

#[test]
fn tooltip_title_keeps_day_placeholders_whole() {
    let processor = TimeSeriesResultProcessor::default();
    let rows: Vec<RawResultRow> = [json!({"value": 10.0}), json!({"value": 11.0})]
        .into_iter()
        .map(|row| RawResultRow::from_value(row).expect("row"))
        .collect();
    let bundle = processor.chart_bundle(&processor.normalize(&rows), None);

    assert_eq!(bundle.equity.tooltip_title(0), "Day 1");
    assert_eq!(bundle.equity.tooltip_title(1), "Day 2");
    assert_eq!(bundle.daily_returns.tooltip_title(0), "Day 2");
}

#[test]
fn tooltip_title_falls_back_to_label() {
    let chart = ChartSeries::new(vec!["Day 7".into()], vec![1.0], Vec::new());
    assert_eq!(chart.tooltip_title(0), "Day 7");
}

#[test]
fn empty_series_bundle_has_no_histogram() {
    let processor = TimeSeriesResultProcessor::default();
    let bundle = processor.chart_bundle(&processor.normalize(&[]), None);

    assert!(bundle.equity.is_empty());
    assert!(bundle.daily_returns.is_empty());
    assert!(bundle.histogram.is_none());
}

#[test]
fn json_contract_round_trips_including_non_finite_samples() {
    let series = NormalizedSeries {
        portfolio_values: vec![0.0, 10.0],
        raw_dates: vec!["Day 1".into(), "Day 2".into()],
        display_labels: vec![String::new(), String::new()],
    };
    let bundle = TimeSeriesResultProcessor::default().chart_bundle(&series, None);

    let json = bundle.to_json_contract_v1_pretty().expect("serialize");
    assert!(json.contains(&format!("\"schema_version\": {CHART_BUNDLE_JSON_SCHEMA_V1}")));
    assert!(json.contains("null"));

    let restored = ChartBundle::from_json_compat_str(&json).expect("parse contract");
    assert!(restored.equity.values[0].is_nan());
    assert!(restored.equity.values[1].is_nan());
    assert!(restored.drawdown.values[0].is_nan());
    assert_eq!(restored.equity.labels, bundle.equity.labels);
    assert_eq!(restored.histogram, bundle.histogram);
}

#[test]
fn compat_reader_accepts_bare_bundle_and_rejects_unknown_schema() {
    let bundle = TimeSeriesResultProcessor::default().chart_bundle(&sample_series(), None);

    let bare = serde_json::to_string(&bundle).expect("bare json");
    let restored = ChartBundle::from_json_compat_str(&bare).expect("parse bare");
    assert_eq!(restored, bundle);

    let future = json!({"schema_version": 99, "bundle": bundle}).to_string();
    let err = ChartBundle::from_json_compat_str(&future).expect_err("unknown schema");
    assert!(format!("{err}").contains("unsupported chart bundle schema version"));
}

#[test]
fn every_view_serializes_labels_and_values() {
    let bundle = TimeSeriesResultProcessor::default().chart_bundle(&sample_series(), None);
    let json = serde_json::to_value(&bundle).expect("bundle json");

    for view in ["equity", "drawdown", "daily_returns", "histogram"] {
        let object = json[view].as_object().expect("view object");
        assert!(object.contains_key("labels"), "{view} has no labels");
        assert!(object.contains_key("values"), "{view} has no values");
    }
    assert_eq!(json["histogram"]["values"].as_array().map(Vec::len), Some(20));
    assert!(json["histogram"].get("frequencies").is_none());
}

#[test]
fn json_contract_preserves_float_bits() {
    let series = NormalizedSeries {
        portfolio_values: vec![100.0, 102.9, 0.1 + 0.2],
        raw_dates: vec!["2024-01-02".into(), "2024-01-03".into(), "2024-01-04".into()],
        display_labels: vec!["24/1".into(), String::new(), String::new()],
    };
    let bundle = TimeSeriesResultProcessor::default().chart_bundle(&series, None);

    let json = bundle.to_json_contract_v1_pretty().expect("serialize");
    let restored = ChartBundle::from_json_compat_str(&json).expect("parse contract");
    for (restored, original) in restored.equity.values.iter().zip(&bundle.equity.values) {
        assert_eq!(restored.to_bits(), original.to_bits());
    }
}

#[test]
fn benchmark_series_follows_result_axis() {
    let processor = TimeSeriesResultProcessor::default();
    let series = sample_series();
    let market: Vec<RawResultRow> = [
        json!({"Date": "2024-01-31", "Close": 50.0}),
        json!({"Date": "2024-02-02", "Close": 55.0}),
    ]
    .into_iter()
    .map(|row| RawResultRow::from_value(row).expect("row"))
    .collect();

    let benchmark = processor
        .benchmark_series(&market, &series)
        .expect("aligned benchmark");
    assert_eq!(benchmark.values, vec![1.0, 1.0, 1.0, 1.1]);
    assert_eq!(benchmark.labels, series.display_labels);
    assert_eq!(benchmark.raw_dates, series.raw_dates);

    let bundle = processor
        .chart_bundle(&series, None)
        .with_benchmark(Some(benchmark.clone()));
    let json = bundle.to_json_contract_v1_pretty().expect("serialize");
    let restored = ChartBundle::from_json_compat_str(&json).expect("parse contract");
    assert_eq!(restored.benchmark, Some(benchmark));

    let unrelated: Vec<RawResultRow> = vec![
        RawResultRow::from_value(json!({"Date": "2019-05-05", "Close": 1.0})).expect("row"),
    ];
    assert!(processor.benchmark_series(&unrelated, &series).is_none());
}

#[test]
fn bundles_without_benchmark_key_still_parse() {
    let bundle = TimeSeriesResultProcessor::default().chart_bundle(&sample_series(), None);
    let mut json = serde_json::to_value(&bundle).expect("bundle json");
    json.as_object_mut().expect("object").remove("benchmark");

    let restored: ChartBundle = serde_json::from_value(json).expect("parse");
    assert_eq!(restored.benchmark, None);
    assert_eq!(restored, bundle);
}
