#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the fire watch toolchain.
//!
//! Wraps the decision pipeline, the individual analysis stages, and the
//! API server behind one binary.
//!
//! Logging goes through [`fire_watch_cli_utils::init_logger`], which pairs
//! the `log` output with `indicatif::MultiProgress` so progress bars and
//! log lines share the terminal cleanly.

mod pipeline;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use fire_watch_analytics::{aggregate, apply_trend};
use fire_watch_engine::{
    EngineConfig, EngineContext, load_prior_table, load_readings, load_table, resolve_config_path,
};
use fire_watch_fusion::sensor_score;
use fire_watch_grid::sensors::latest_per_device;
use fire_watch_hotspot::{HotspotParams, detect_hotspots};

#[derive(Parser)]
#[command(name = "fire_watch_cli", about = "Wildfire risk decision tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full decision pipeline and print the report
    Decide {
        /// Configuration file path (overrides `FIRE_WATCH_CONFIG`)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List per-region aggregates with day-over-day movement
    Regions {
        /// Configuration file path (overrides `FIRE_WATCH_CONFIG`)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Detect hotspot clusters in the current risk grid
    Hotspots {
        /// Configuration file path (overrides `FIRE_WATCH_CONFIG`)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Neighborhood radius in kilometers
        #[arg(long)]
        eps_km: Option<f64>,
        /// Minimum neighborhood size for a core cell, self included
        #[arg(long)]
        min_samples: Option<usize>,
        /// Risk score floor for cluster candidates
        #[arg(long)]
        threshold: Option<f64>,
    },
    /// Show the latest reading and derived score per sensor device
    Sensors {
        /// Configuration file path (overrides `FIRE_WATCH_CONFIG`)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Start the HTTP API server
    Serve,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = fire_watch_cli_utils::init_logger();
    let cli = Cli::parse();

    match cli.command {
        Commands::Decide { config, json } => pipeline::run(&multi, config, json)?,
        Commands::Regions { config } => regions(config)?,
        Commands::Hotspots {
            config,
            eps_km,
            min_samples,
            threshold,
        } => hotspots(config, eps_km, min_samples, threshold)?,
        Commands::Sensors { config } => sensors(config)?,
        Commands::Serve => {
            actix_web::rt::System::new().block_on(fire_watch_server::run_server())?;
        }
    }

    Ok(())
}

/// Loads the engine context from a config flag, the `FIRE_WATCH_CONFIG`
/// environment variable, or the default path, in that order.
fn load_context(config: Option<PathBuf>) -> Result<EngineContext, Box<dyn std::error::Error>> {
    let config = EngineConfig::load_or_default(&resolve_config_path(config))?;
    Ok(EngineContext::load(config)?)
}

/// Prints per-region aggregates joined against the prior-day grid.
fn regions(config: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let context = load_context(config)?;
    let table = load_table(context.config())?;
    let prior = load_prior_table(context.config())?;

    let today = aggregate(table.cells(), context.index());
    let prior_aggregates = prior.map(|p| aggregate(p.cells(), context.index()));
    let rows = apply_trend(&today, prior_aggregates.as_deref());

    if rows.is_empty() {
        println!("No regions matched the risk grid.");
        return Ok(());
    }

    println!(
        "{:<24} {:>6} {:>6} {:>6} {:>7} TREND",
        "REGION", "MEAN", "MAX", "CELLS", "DELTA"
    );
    println!("{}", "-".repeat(62));
    for row in &rows {
        println!(
            "{:<24} {:>6.2} {:>6.2} {:>6} {:>+7.2} {}",
            row.region_name, row.mean_risk, row.max_risk, row.cell_count, row.delta, row.trend
        );
    }

    Ok(())
}

/// Prints hotspot clusters, with optional parameter overrides layered
/// on top of the configured clustering section.
fn hotspots(
    config: Option<PathBuf>,
    eps_km: Option<f64>,
    min_samples: Option<usize>,
    threshold: Option<f64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let context = load_context(config)?;
    let table = load_table(context.config())?;

    let base = context.config().hotspot.params();
    let params = HotspotParams {
        eps_km: eps_km.unwrap_or(base.eps_km),
        min_samples: min_samples.unwrap_or(base.min_samples),
        threshold: threshold.unwrap_or(base.threshold),
    };

    let clusters = detect_hotspots(table.cells(), &params);
    if clusters.is_empty() {
        println!("No hotspot clusters detected.");
        return Ok(());
    }

    println!(
        "{:<8} {:>6} {:>9} {:>10} {:>6} {:>6}",
        "CLUSTER", "CELLS", "LAT", "LON", "MEAN", "MAX"
    );
    println!("{}", "-".repeat(50));
    for cluster in &clusters {
        let (lat, lon) = cluster.centroid();
        println!(
            "{:<8} {:>6} {:>9.4} {:>10.4} {:>6.2} {:>6.2}",
            cluster.cluster_id,
            cluster.cell_count(),
            lat,
            lon,
            cluster.mean_risk(),
            cluster.max_risk(),
        );
    }

    Ok(())
}

/// Prints the latest reading and derived smoke score per device.
fn sensors(config: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let context = load_context(config)?;
    let readings = load_readings(context.config())?;
    let latest = latest_per_device(&readings);

    if latest.is_empty() {
        println!("No sensor readings available.");
        return Ok(());
    }

    println!(
        "{:<16} {:>8} {:>8} {:>6} {:>6}",
        "DEVICE", "PM2.5", "TEMP C", "RH %", "SCORE"
    );
    println!("{}", "-".repeat(48));
    for reading in &latest {
        println!(
            "{:<16} {:>8} {:>8} {:>6} {:>6}",
            reading.device_id,
            format_channel(reading.pm25, 1),
            format_channel(reading.temp_c, 1),
            format_channel(reading.rh, 0),
            sensor_score(reading).map_or_else(|| "-".to_string(), |s| format!("{s:.2}")),
        );
    }

    Ok(())
}

/// Formats an optional channel value, `-` when the channel is absent.
fn format_channel(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.decimals$}"))
}
