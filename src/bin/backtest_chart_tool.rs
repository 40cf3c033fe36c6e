use backtest_charts::api::{
    BacktestResultEnvelope, ProcessorConfig, TimeSeriesResultProcessor, market_rows_from_value,
    summary_rows_json_contract_v1_pretty,
};
use backtest_charts::core::{BucketLabelFormat, DateFallback, RawResultRow};
use std::fs;
use std::path::{Path, PathBuf};

const USAGE: &str = "usage: backtest_chart_tool <bundle|summary> --input <path> --output <path> [--bucket-format short|long] [--bins <count>] [--exclude-flat-returns] [--benchmark <path>] [--config <path>]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandKind {
    Bundle,
    Summary,
}

#[derive(Debug)]
struct CliArgs {
    command: CommandKind,
    input: PathBuf,
    output: PathBuf,
    benchmark: Option<PathBuf>,
    config: ProcessorConfig,
}

fn main() {
    let _ = backtest_charts::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let raw = fs::read_to_string(&args.input)
        .map_err(|err| format!("failed to read `{}`: {err}", args.input.display()))?;
    let envelope = BacktestResultEnvelope::from_json_str(&raw)
        .map_err(|err| format!("invalid backtest result: {err}"))?;

    let payload = match args.command {
        CommandKind::Bundle => {
            let mut config = args.config;
            if config.date_fallback == DateFallback::DayPlaceholders {
                if let Some(fallback) = envelope.start_date_fallback() {
                    config = config.with_date_fallback(fallback);
                }
            }
            let processor = TimeSeriesResultProcessor::new(config).map_err(|err| err.to_string())?;
            let series = processor.normalize(&envelope.rows);
            let benchmark = match &args.benchmark {
                Some(path) => processor.benchmark_series(&read_market_rows(path)?, &series),
                None => None,
            };
            processor
                .chart_bundle(&series, envelope.initial_capital)
                .with_benchmark(benchmark)
                .to_json_contract_v1_pretty()
        }
        CommandKind::Summary => summary_rows_json_contract_v1_pretty(&envelope.summary_rows()),
    }
    .map_err(|err| err.to_string())?;

    fs::write(&args.output, payload)
        .map_err(|err| format!("failed to write `{}`: {err}", args.output.display()))
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let command = match args.next().as_deref() {
        Some("bundle") => CommandKind::Bundle,
        Some("summary") => CommandKind::Summary,
        _ => return Err(USAGE.to_owned()),
    };

    let mut input = None::<PathBuf>;
    let mut output = None::<PathBuf>;
    let mut benchmark = None::<PathBuf>;
    let mut config = ProcessorConfig::default();
    let mut bucket_format = None::<BucketLabelFormat>;
    let mut bins = None::<usize>;
    let mut exclude_flat_returns = false;

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--input" => input = Some(PathBuf::from(flag_value(&mut args, "--input")?)),
            "--output" => output = Some(PathBuf::from(flag_value(&mut args, "--output")?)),
            "--benchmark" => {
                benchmark = Some(PathBuf::from(flag_value(&mut args, "--benchmark")?));
            }
            "--config" => {
                let path = flag_value(&mut args, "--config")?;
                let raw = fs::read_to_string(&path)
                    .map_err(|err| format!("failed to read `{path}`: {err}"))?;
                config = ProcessorConfig::from_json_str(&raw).map_err(|err| err.to_string())?;
            }
            "--bucket-format" => {
                bucket_format = Some(match flag_value(&mut args, "--bucket-format")?.as_str() {
                    "short" => BucketLabelFormat::ShortYearMonth,
                    "long" => BucketLabelFormat::YearMonth,
                    other => return Err(format!("unknown bucket format `{other}`")),
                });
            }
            "--bins" => {
                let value = flag_value(&mut args, "--bins")?;
                bins = Some(
                    value
                        .parse()
                        .map_err(|err| format!("invalid --bins `{value}`: {err}"))?,
                );
            }
            "--exclude-flat-returns" => exclude_flat_returns = true,
            "--help" | "-h" => return Err(USAGE.to_owned()),
            other => return Err(format!("unknown argument `{other}`\n{USAGE}")),
        }
    }

    if let Some(format) = bucket_format {
        config = config.with_bucket_format(format);
    }
    if let Some(bins) = bins {
        config = config.with_histogram_bins(bins);
    }
    if exclude_flat_returns {
        config = config.with_histogram_exclude_flat_returns(true);
    }

    Ok(CliArgs {
        command,
        input: input.ok_or_else(|| format!("missing --input\n{USAGE}"))?,
        output: output.ok_or_else(|| format!("missing --output\n{USAGE}"))?,
        benchmark,
        config,
    })
}

fn read_market_rows(path: &Path) -> Result<Vec<RawResultRow>, String> {
    let raw = fs::read_to_string(path)
        .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
    let value = serde_json::from_str(&raw)
        .map_err(|err| format!("invalid market data `{}`: {err}", path.display()))?;
    market_rows_from_value(value).map_err(|err| err.to_string())
}

fn flag_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, String> {
    args.next()
        .ok_or_else(|| format!("missing value for {flag}"))
}
