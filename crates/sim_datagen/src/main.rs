use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::Context;
use clap::{Parser, ValueEnum};

use sim_core::geo::GeoPoint;
use sim_core::scenario::ScenarioParams;
use sim_datagen::{run_generation, GenerateOptions, OutputFormats};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Parquet,
    Csv,
    All,
}

/// Generate synthetic ride-hailing event data by running the city
/// simulation and writing its record streams to disk.
#[derive(Parser)]
#[command(name = "sim_datagen")]
#[command(about = "Generate synthetic ride-hailing event data")]
struct Cli {
    /// Number of drivers in the fleet.
    #[arg(long, default_value_t = 350)]
    drivers: usize,

    /// Number of passengers issuing ride requests.
    #[arg(long, default_value_t = 650)]
    passengers: usize,

    /// City center latitude.
    #[arg(long, default_value_t = 40.7128, allow_hyphen_values = true)]
    center_lat: f64,

    /// City center longitude.
    #[arg(long, default_value_t = -74.0060, allow_hyphen_values = true)]
    center_lon: f64,

    /// Approximate city radius in kilometers.
    #[arg(long, default_value_t = 15.0)]
    radius_km: f64,

    /// Simulated minutes to run the clock for.
    #[arg(long, default_value_t = 60)]
    duration_minutes: u64,

    /// Wall-clock pause between simulated minutes, in milliseconds.
    /// Zero runs the simulation flat out.
    #[arg(long, default_value_t = 2000)]
    tick_interval_ms: u64,

    /// RNG seed for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// Directory the output files are written into.
    #[arg(long, default_value = "out")]
    out_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::All)]
    format: OutputFormat,

    /// Rows captured in each CSV sample file.
    #[arg(long, default_value_t = 100)]
    csv_sample_rows: usize,

    /// Disable the progress bar.
    #[arg(long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let epoch_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock before Unix epoch")?
        .as_millis() as i64;

    let mut params = ScenarioParams::default()
        .with_rosters(cli.drivers, cli.passengers)
        .with_city(GeoPoint::new(cli.center_lat, cli.center_lon), cli.radius_km)
        .with_duration_minutes(cli.duration_minutes)
        .with_epoch_ms(epoch_ms);
    if let Some(seed) = cli.seed {
        params = params.with_seed(seed);
    }

    let formats = match cli.format {
        OutputFormat::Json => OutputFormats {
            json: true,
            parquet: false,
            csv_sample: false,
        },
        OutputFormat::Parquet => OutputFormats {
            json: false,
            parquet: true,
            csv_sample: false,
        },
        OutputFormat::Csv => OutputFormats {
            json: false,
            parquet: false,
            csv_sample: true,
        },
        OutputFormat::All => OutputFormats::default(),
    };

    let summary = run_generation(GenerateOptions {
        params,
        out_dir: cli.out_dir.clone(),
        tick_interval: Duration::from_millis(cli.tick_interval_ms),
        formats,
        csv_sample_rows: cli.csv_sample_rows,
        show_progress: !cli.quiet,
    })?;

    println!("wrote event data to {}", cli.out_dir.display());
    println!("  requests generated: {}", summary.requests_generated);
    println!("  requests matched:   {}", summary.requests_matched);
    println!("  requests abandoned: {}", summary.requests_abandoned);
    println!("  rides completed:    {}", summary.rides_completed);
    println!("  heartbeats emitted: {}", summary.heartbeats_emitted);
    if summary.sink_publish_failures > 0 {
        println!(
            "  sink publish failures: {}",
            summary.sink_publish_failures
        );
    }
    Ok(())
}
