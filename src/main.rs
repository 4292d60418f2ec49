//! Command line entry point for race-average
//!
//! Averages finish times given on the command line, or prints the red-fill
//! colour for a percentage.

use anyhow::Result;
use clap::Parser;
use race_average::color::red_fill_style;
use race_average::config::{validate_config, AppConfig};
use race_average::types::RoundingMode;
use race_average::ElapsedTimeAverager;
use std::path::PathBuf;
use tracing::{debug, info};

/// Race Average - mean elapsed minutes for multi-day race finish times
#[derive(Parser)]
#[command(
    name = "race-average",
    version,
    about = "Average race finish times relative to the race start",
    long_about = "Race Average parses finish times written as \"HH:MM XM, DAY n\", converts each \
                 to minutes elapsed since the race start (08:00 AM, DAY 1 by default) and prints \
                 the rounded mean."
)]
struct Args {
    /// Finish times, e.g. "02:00 PM, DAY 19"
    #[arg(value_name = "TIME", required_unless_present_any = ["red_fill", "dry_run"])]
    times: Vec<String>,

    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Race start override
    #[arg(short, long, value_name = "TIME", help = "Override race start time")]
    start: Option<String>,

    /// Rounding mode override
    #[arg(
        short,
        long,
        value_name = "MODE",
        help = "Rounding for .5 averages (half-away-from-zero, half-to-even)"
    )]
    rounding: Option<RoundingMode>,

    /// Print a JSON summary instead of the bare average
    #[arg(long, help = "Print count, mean, average, fastest and slowest as JSON")]
    summary: bool,

    /// Print the red-fill colour for a percentage and exit
    #[arg(long, value_name = "PERCENT", allow_negative_numbers = true)]
    red_fill: Option<f64>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode (validate config and exit)
    #[arg(long, help = "Validate configuration and exit without averaging")]
    dry_run: bool,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from environment, file and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    apply_overrides(&mut config, args);

    // Validate once, after every source has been merged
    validate_config(&config)?;
    Ok(config)
}

/// Apply CLI overrides on top of file and environment settings
fn apply_overrides(config: &mut AppConfig, args: &Args) {
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if let Some(start) = &args.start {
        config.race.start = start.clone();
    }

    if let Some(rounding) = args.rounding {
        config.race.rounding = rounding;
    }
}

fn run(args: &Args, config: &AppConfig) -> Result<()> {
    if let Some(percent) = args.red_fill {
        println!("{}", red_fill_style(percent)?);
        return Ok(());
    }

    let averager = ElapsedTimeAverager::from_config(&config.race)?;
    debug!(
        start = %averager.start(),
        rounding = %averager.rounding(),
        "Averaging {} finish times",
        args.times.len()
    );

    if args.summary {
        let summary = averager.summarize(&args.times)?;
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", averager.average_minutes(&args.times)?);
    }

    Ok(())
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration (CLI args can override environment/config file)
    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if args.dry_run {
        info!(
            service = %config.service.name,
            start = %config.race.start,
            rounding = %config.race.rounding,
            "Configuration validation successful"
        );
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    if let Err(e) = run(&args, &config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
