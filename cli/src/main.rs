mod convert;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use recipe_core::{ConvertOptions, ConverterConfig, Direction};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "recipe-convert")]
#[command(about = "Convert recipe measurements between US and metric units", long_about = None)]
struct Cli {
    /// Recipe file to read ("-" for stdin)
    #[arg(default_value = "-")]
    input: PathBuf,

    /// Where to write the converted recipe ("-" for stdout)
    #[arg(default_value = "-")]
    output: PathBuf,

    /// Convert to US units instead of metric
    #[arg(long)]
    to_us: bool,

    /// Log every converted line
    #[arg(short, long)]
    verbose: bool,

    /// Extra ingredient density file (JSON); overrides RECIPE_CONVERTER_DENSITIES
    #[arg(long)]
    densities: Option<PathBuf>,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.densities {
        Some(path) => ConverterConfig::with_density_file(path),
        None => ConverterConfig::from_env(),
    };
    let converter = config
        .build_converter()
        .context("Failed to load ingredient densities")?;

    let options = ConvertOptions {
        direction: if cli.to_us {
            Direction::ToUs
        } else {
            Direction::ToMetric
        },
        verbose: cli.verbose,
    };

    let conversions = convert::run(&converter, &options, &cli.input, &cli.output)?;
    tracing::info!("converted {} ingredients", conversions);

    Ok(())
}
