//! # quakecast
//!
//! Command-line interface for regional earthquake pattern forecasting.

mod catalog;
mod render;

use catalog::{load_catalog, parse_timestamp, Catalog};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use quake_facade::{EngineBuilder, ForecastEngine, ForecastReport, QuakeConfig, QuakeError};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub(crate) type CliResult<T> = std::result::Result<T, String>;

#[derive(Parser)]
#[command(name = "quakecast")]
#[command(about = "Regional earthquake next-event forecasting", long_about = None)]
struct Cli {
    /// TOML file with [engine] settings and [[regions]] (defaults when absent)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Text,
}

/// Catalog inputs shared by the analysis commands
#[derive(clap::Args)]
struct CatalogArgs {
    /// Historical catalog (CSV: time, latitude, longitude, depth, magnitude)
    #[arg(short, long)]
    catalog: PathBuf,

    /// Recent events appended after the historical catalog
    #[arg(short, long)]
    live: Option<PathBuf>,

    /// Reference date (defaults to the current time)
    #[arg(long)]
    now: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,

    /// Output file (optional)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the configured regions
    Regions,

    /// Pattern summary and confidence breakdown for one region
    Analyze {
        /// Region name (case-insensitive)
        #[arg(short, long)]
        region: String,

        #[command(flatten)]
        input: CatalogArgs,
    },

    /// Predict the next significant event for one region
    Predict {
        /// Region name (case-insensitive)
        #[arg(short, long)]
        region: String,

        #[command(flatten)]
        input: CatalogArgs,
    },

    /// Predict for every configured region in parallel
    PredictAll {
        #[command(flatten)]
        input: CatalogArgs,
    },
}

fn init_tracing() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quakecast=info,quake_core=info".into()),
        )
        .init();
}

fn build_engine(config: Option<&Path>) -> CliResult<ForecastEngine> {
    let config = match config {
        Some(path) => QuakeConfig::load(path).map_err(|e| e.to_string())?,
        None => QuakeConfig::default(),
    };
    EngineBuilder::from_config(&config)
        .and_then(|builder| builder.build())
        .map_err(|e| e.to_string())
}

/// Loaded catalogs plus the reference date
struct Inputs {
    historical: Catalog,
    live: Catalog,
    now: DateTime<Utc>,
}

fn load_inputs(args: &CatalogArgs) -> CliResult<Inputs> {
    let historical = load_catalog(&args.catalog)?;
    let live = match &args.live {
        Some(path) => load_catalog(path)?,
        None => Catalog::default(),
    };
    let now = match &args.now {
        Some(text) => parse_timestamp(text).ok_or_else(|| format!("Invalid --now date: {}", text))?,
        None => Utc::now(),
    };
    info!(
        historical = historical.events.len(),
        live = live.events.len(),
        skipped = historical.skipped + live.skipped,
        "Catalogs loaded"
    );
    Ok(Inputs {
        historical,
        live,
        now,
    })
}

/// Write to the output file, or stdout when none is given
fn emit(text: &str, output: Option<&PathBuf>) -> CliResult<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text).map_err(|e| format!("Failed to write output: {}", e))?;
            println!("Results written to {:?}", path);
        }
        None => print!("{}", text),
    }
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value)
        .map(|json| json + "\n")
        .map_err(|e| format!("Failed to serialize JSON: {}", e))
}

fn run_regions(engine: &ForecastEngine) -> CliResult<()> {
    emit(&render::regions(engine.registry()), None)
}

fn run_analyze(engine: &ForecastEngine, region: &str, args: &CatalogArgs) -> CliResult<()> {
    engine.region(region).map_err(|e| e.to_string())?;
    let inputs = load_inputs(args)?;
    let analysis = engine
        .analyze(region, &inputs.historical.events, &inputs.live.events, inputs.now)
        .map_err(|e| e.to_string())?;

    let text = match args.format {
        Format::Json => to_json(&analysis)?,
        Format::Text => render::analysis(&analysis),
    };
    emit(&text, args.output.as_ref())
}

fn run_predict(engine: &ForecastEngine, region: &str, args: &CatalogArgs) -> CliResult<()> {
    engine.region(region).map_err(|e| e.to_string())?;
    let inputs = load_inputs(args)?;
    let report = engine
        .forecast(region, &inputs.historical.events, &inputs.live.events, inputs.now)
        .map_err(|e| e.to_string())?;

    let text = match args.format {
        Format::Json => to_json(&report)?,
        Format::Text => render::report(&report),
    };
    emit(&text, args.output.as_ref())
}

fn run_predict_all(engine: &ForecastEngine, args: &CatalogArgs) -> CliResult<()> {
    let inputs = load_inputs(args)?;
    let names: Vec<&str> = engine.registry().names().collect();

    let results: Vec<(&str, Result<ForecastReport, QuakeError>)> = names
        .par_iter()
        .map(|name| {
            let result = engine.forecast(
                name,
                &inputs.historical.events,
                &inputs.live.events,
                inputs.now,
            );
            (*name, result)
        })
        .collect();

    let mut reports = Vec::new();
    let mut skipped = Vec::new();
    for (name, result) in results {
        match result {
            Ok(report) => reports.push(report),
            Err(e @ QuakeError::InsufficientData { .. }) => skipped.push((name, e.to_string())),
            Err(e) => return Err(e.to_string()),
        }
    }
    info!(forecasts = reports.len(), skipped = skipped.len(), "Forecast all regions");

    let text = match args.format {
        Format::Json => to_json(&serde_json::json!({
            "forecasts": reports,
            "skipped": skipped
                .iter()
                .map(|(region, reason)| serde_json::json!({ "region": region, "reason": reason }))
                .collect::<Vec<_>>(),
        }))?,
        Format::Text => {
            let mut out: String = reports.iter().map(|r| render::report(r) + "\n").collect();
            for (region, reason) in &skipped {
                out.push_str(&format!("{}: skipped ({})\n", region, reason));
            }
            out
        }
    };
    emit(&text, args.output.as_ref())
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = build_engine(cli.config.as_deref()).and_then(|engine| match &cli.command {
        Commands::Regions => run_regions(&engine),
        Commands::Analyze { region, input } => run_analyze(&engine, region, input),
        Commands::Predict { region, input } => run_predict(&engine, region, input),
        Commands::PredictAll { input } => run_predict_all(&engine, input),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
