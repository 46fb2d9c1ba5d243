use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use energy_strategy::{report, RaceConfig, StrategyOptimiser};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "energy-strategy",
    version,
    about = "Find the speed strategy that minimises total race time on a limited battery"
)]
struct Cli {
    /// JSON file with race parameters; any field left out takes its default.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the number of laps.
    #[arg(long)]
    race_distance: Option<u32>,

    /// Override the weather multiplier on energy consumption.
    #[arg(long)]
    weather_factor: Option<f64>,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Evaluate candidate strategies in parallel.
    #[arg(long)]
    parallel: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Csv,
    Json,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    info!(
        laps = config.race_distance,
        capacity = config.battery_capacity,
        weather = config.weather_factor,
        "Starting strategy search"
    );

    let result = StrategyOptimiser::new(&config)
        .parallel(cli.parallel)
        .optimise()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        Format::Text => report::write_summary(&mut out, &result)?,
        Format::Csv => report::write_csv(&mut out, &result)?,
        Format::Json => {
            report::write_json(&mut out, &result)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .try_init();
}

fn load_config(cli: &Cli) -> Result<RaceConfig> {
    let mut config = match &cli.config {
        Some(path) => RaceConfig::load(path)
            .with_context(|| format!("failed to load race config from {}", path.display()))?,
        None => RaceConfig::default(),
    };
    if let Some(laps) = cli.race_distance {
        config.race_distance = laps;
    }
    if let Some(weather) = cli.weather_factor {
        config.weather_factor = weather;
    }
    config.validate().context("invalid race configuration")?;
    Ok(config)
}
