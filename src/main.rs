use anyhow::Context;
use chrono::NaiveDateTime;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use kitchen::{OutputFormat, Simulation};
use kitchen_core::config::{DEFAULT_TIME_BUDGET_MINUTES, TIMESTAMP_FORMAT};
use kitchen_core::SimulationConfig;

#[derive(Parser, Debug)]
#[command(name = "kitchen")]
#[command(version)]
#[command(about = "Replay restaurant orders against kitchen capacity and stock")]
struct Args {
    /// Input file: restaurant definitions and order lines
    #[arg(default_value = "input.txt")]
    input: PathBuf,

    /// Orders must finish strictly within this many minutes
    #[arg(long, default_value_t = DEFAULT_TIME_BUDGET_MINUTES)]
    budget_minutes: u32,

    /// Reference instant that order timestamps are measured from
    #[arg(long, default_value = "2020-12-08 19:15:31", value_parser = parse_timestamp)]
    epoch: NaiveDateTime,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Evaluate each restaurant on its own lane in parallel
    #[arg(long)]
    parallel: bool,
}

fn parse_timestamp(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|e| e.to_string())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .init();

    let input = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    let config = SimulationConfig::new()
        .with_time_budget_minutes(args.budget_minutes)
        .with_epoch(args.epoch);

    let simulation =
        Simulation::load(&input, config).context("failed to load restaurant definitions")?;
    let report = simulation.run(args.parallel);

    for err in report.errors() {
        eprintln!("skipped: {}", err);
    }
    for line in report.render(args.format)? {
        println!("{}", line);
    }

    Ok(())
}
