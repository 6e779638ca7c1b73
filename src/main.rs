//! central-fill - find the closest central fill facilities to a coordinate
//!
//! Builds a world of facilities (from config or randomly generated), reads a
//! query coordinate, and prints the top-K facilities by distance and then by
//! cheapest medication price.
//!
//! Module structure:
//! - `domain/` - Core value types (Facility, Price, QueryPoint, RankedResult)
//! - `services/` - Ranking logic
//! - `io/` - Query input, world generation, result rendering
//! - `infra/` - Configuration

use anyhow::Context;
use central_fill::domain::Facility;
use central_fill::infra::Config;
use central_fill::io::{
    generate_facilities, parse_query_point, read_query_point, resolve_seed, OutputFormat, Report,
};
use central_fill::services::rank;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, Write};
use tracing::info;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

/// Central fill lookup - closest facilities by distance, then cheapest price
#[derive(Parser, Debug)]
#[command(name = "central-fill", version, about)]
struct Args {
    /// Path to TOML configuration file (falls back to CONFIG_FILE, then config/dev.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Query coordinates as "x,y"; prompts on stdin when omitted
    #[arg(short, long, allow_hyphen_values = true)]
    query: Option<String>,

    /// Number of facilities to return
    #[arg(short = 'k', long = "top", allow_negative_numbers = true)]
    top: Option<i64>,

    /// RNG seed for world generation
    #[arg(long)]
    seed: Option<u64>,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Print each facility's coordinates under its result line
    #[arg(long)]
    show_coords: bool,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only results.
    // Default: WARN, use RUST_LOG=debug for per-query detail
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::rfc_3339())
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::load(args.config.as_deref())?;
    let config = apply_overrides(config, &args);

    info!(
        config_file = %config.config_file(),
        k = %config.k(),
        format = %config.output_format().as_str(),
        static_facilities = %config.facilities().len(),
        "config_loaded"
    );

    let facilities = load_facilities(&config)?;

    let query = match args.query.as_deref() {
        Some(text) => parse_query_point(text),
        None => {
            // Keep the prompt off stdout when stdout carries JSON
            let stdin = io::stdin();
            match config.output_format() {
                OutputFormat::Text => read_query_point(stdin.lock(), io::stdout()),
                OutputFormat::Json => read_query_point(stdin.lock(), io::stderr()),
            }
        }
    }
    .context("Invalid query coordinates")?;

    let results = rank(&facilities, query, config.k())?;
    info!(query = %query, returned = %results.len(), "query_complete");

    let mut report = Report::new(query, &results);
    if config.show_coords() {
        report = report.with_coordinates(&facilities);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report.write(config.output_format(), &mut out)?;
    out.flush()?;

    Ok(())
}

fn apply_overrides(mut config: Config, args: &Args) -> Config {
    if let Some(k) = args.top {
        config = config.with_k(k);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if let Some(format) = args.format {
        config = config.with_output_format(format);
    }
    if args.show_coords {
        config = config.with_show_coords(true);
    }
    config
}

/// Configured facilities if any, otherwise a generated world
fn load_facilities(config: &Config) -> anyhow::Result<Vec<Facility>> {
    if !config.facilities().is_empty() {
        info!(count = %config.facilities().len(), source = "config", "facilities_loaded");
        return Ok(config.facilities().to_vec());
    }

    let seed = resolve_seed(config.seed());
    let mut rng = StdRng::seed_from_u64(seed);
    let facilities = generate_facilities(config.generator(), &mut rng)
        .context("Failed to generate facilities")?;

    info!(count = %facilities.len(), source = "generated", seed = %seed, "facilities_loaded");
    Ok(facilities)
}
