use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use co2_impact::{Estimator, EstimatorConfig, FuelType, ImpactForm, Report, TimeFrame};

/// Vehicle CO2 emissions calculator
#[derive(Parser, Debug)]
#[command(name = "co2-impact", author, version, about, long_about = None)]
struct Args {
    /// Gasoline, Diesel, Hybrid or Electric (exact spelling, else Gasoline)
    #[arg(long, default_value = "Gasoline")]
    fuel_type: String,

    /// Miles per gallon (kWh-equivalent for Electric)
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    efficiency: String,

    /// Miles driven per year
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    distance: String,

    /// annual, weekly or daily (exact spelling, else annual)
    #[arg(long, default_value = "annual")]
    time_frame: String,

    /// TOML file overriding emission factors and constants
    #[arg(long, env = "CO2_IMPACT_CONFIG")]
    config: Option<PathBuf>,

    /// Print the estimate as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = match &args.config {
        Some(path) => EstimatorConfig::load(path)
            .with_context(|| format!("loading estimator config from {}", path.display()))?,
        None => EstimatorConfig::default(),
    };
    let estimator = Estimator::from_config(&config)?;

    let mut form = ImpactForm::new(
        FuelType::from_label(&args.fuel_type),
        TimeFrame::from_label(&args.time_frame),
    );
    form.fuel_efficiency = args.efficiency;
    form.distance = args.distance;

    match form.submit(&estimator) {
        Ok(estimate) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(estimate)?);
            } else {
                print!("{}", Report::new(estimate));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            if args.json {
                let body = serde_json::json!({ "error": err, "message": err.user_message() });
                println!("{body}");
            }
            eprintln!("{}", err.user_message());
            Ok(ExitCode::from(2))
        }
    }
}
