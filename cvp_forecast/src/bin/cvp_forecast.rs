use anyhow::{Context, Result};
use clap::Parser;
use cvp_forecast::{forecast_records, DataLoader, ForecastConfig, Granularity};
use std::path::PathBuf;

/// Project future sales from a CSV of dated amounts.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// CSV file with a date column and an amount column
    #[arg(long)]
    input: PathBuf,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of future periods to project
    #[arg(long)]
    horizon: Option<usize>,

    /// Period length: daily, weekly or monthly
    #[arg(long)]
    granularity: Option<Granularity>,

    /// Confidence level of prediction intervals, e.g. 0.95
    #[arg(long)]
    confidence: Option<f64>,

    /// Share of trailing periods held out to score the model
    #[arg(long)]
    holdout: Option<f64>,

    /// Fit only this many recent periods
    #[arg(long)]
    window: Option<usize>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = Cli::parse();
    log::debug!("{args:#?}");

    let mut config = match &args.config {
        Some(path) => ForecastConfig::from_file(path)
            .with_context(|| format!("failed to load config {path:?}"))?,
        None => ForecastConfig::default(),
    };

    if let Some(horizon) = args.horizon {
        config.horizon = horizon;
    }
    if let Some(granularity) = args.granularity {
        config.granularity = granularity;
    }
    if args.confidence.is_some() {
        config.confidence_level = args.confidence;
    }
    if args.holdout.is_some() {
        config.holdout_ratio = args.holdout;
    }
    if args.window.is_some() {
        config.window = args.window;
    }
    config.validate().context("invalid options")?;

    let records = DataLoader::from_csv(&args.input)
        .with_context(|| format!("failed to load sales from {:?}", args.input))?;

    let result = forecast_records(&records, &config).context("failed to forecast sales")?;

    if args.json {
        println!("{}", result.to_json()?);
    } else {
        print!("{result}");
    }

    Ok(())
}
