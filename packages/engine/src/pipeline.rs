//! The decision pipeline.
//!
//! `decide()` loads every configured input and delegates to
//! `decide_with_inputs()`, which is pure over already-loaded data. The
//! server loads inputs once at startup and calls the pure entry per
//! request.

use std::sync::Arc;

use chrono::Utc;
use fire_watch_alert::{ExplainInputs, explain, sensor_statements, summary_lines};
use fire_watch_analytics::{aggregate, apply_trend};
use fire_watch_fusion::{fuse_with_policy, latest_score};
use fire_watch_grid::RiskTable;
use fire_watch_grid::progress::{ProgressSink, discard};
use fire_watch_grid::sensors::{latest_per_device, load_sensors};
use fire_watch_hotspot::detect_hotspots;
use fire_watch_risk_models::SensorReading;
use fire_watch_risk_models::fri::{self, FriLevel};

use crate::report::{DecisionFlags, DecisionReport};
use crate::{EngineConfig, EngineContext, EngineError};

/// Loads the current-day risk table named by the configuration, or an
/// empty table when none is configured.
///
/// # Errors
///
/// Returns an error if the configured file cannot be read or its schema
/// is unusable.
pub fn load_table(config: &EngineConfig) -> Result<RiskTable, EngineError> {
    load_table_with_progress(config, None)
}

/// Same as [`load_table`], reporting per-row progress through `progress`.
///
/// # Errors
///
/// Returns an error if the configured file cannot be read or its schema
/// is unusable.
pub fn load_table_with_progress(
    config: &EngineConfig,
    progress: Option<Arc<dyn ProgressSink>>,
) -> Result<RiskTable, EngineError> {
    match &config.risk_csv {
        Some(path) => {
            let progress = progress.unwrap_or_else(discard);
            Ok(RiskTable::from_csv_path_with_progress(path, &progress)?)
        }
        None => {
            log::warn!("No risk grid configured");
            Ok(RiskTable::from_cells(Vec::new()))
        }
    }
}

/// Loads the prior-day risk table, `None` when not configured.
///
/// # Errors
///
/// Returns an error if the configured file cannot be read or its schema
/// is unusable.
pub fn load_prior_table(config: &EngineConfig) -> Result<Option<RiskTable>, EngineError> {
    load_prior_table_with_progress(config, None)
}

/// Same as [`load_prior_table`], reporting per-row progress through
/// `progress`.
///
/// # Errors
///
/// Returns an error if the configured file cannot be read or its schema
/// is unusable.
pub fn load_prior_table_with_progress(
    config: &EngineConfig,
    progress: Option<Arc<dyn ProgressSink>>,
) -> Result<Option<RiskTable>, EngineError> {
    match &config.prior_csv {
        Some(path) => {
            let progress = progress.unwrap_or_else(discard);
            Ok(Some(RiskTable::from_csv_path_with_progress(path, &progress)?))
        }
        None => Ok(None),
    }
}

/// Loads sensor readings, empty when no feed is configured.
///
/// # Errors
///
/// Returns an error if the configured file cannot be read or its schema
/// is unusable.
pub fn load_readings(config: &EngineConfig) -> Result<Vec<SensorReading>, EngineError> {
    match &config.sensors_csv {
        Some(path) => Ok(load_sensors(path)?),
        None => Ok(Vec::new()),
    }
}

/// Runs the full pipeline from the configured files.
///
/// # Errors
///
/// Returns an error if any configured input file cannot be read or
/// parsed. Configured-but-empty inputs are not errors; they surface as
/// [`DecisionFlags`] on the report.
pub fn decide(ctx: &EngineContext) -> Result<DecisionReport, EngineError> {
    let config = ctx.config();
    let table = load_table(config)?;
    let prior = load_prior_table(config)?;
    let readings = load_readings(config)?;
    Ok(decide_with_inputs(ctx, &table, prior.as_ref(), &readings))
}

/// Runs the pipeline over already-loaded inputs.
///
/// Pure over its arguments: clustering, aggregation, trend, fusion, and
/// alerting in sequence, with per-stage results collected into the
/// report.
#[must_use]
pub fn decide_with_inputs(
    ctx: &EngineContext,
    table: &RiskTable,
    prior: Option<&RiskTable>,
    readings: &[SensorReading],
) -> DecisionReport {
    let config = ctx.config();
    let mut flags = DecisionFlags::default();

    if table.is_empty() {
        log::warn!("Risk grid is empty; decision degrades to configured inputs");
        flags.empty_grid = true;
    }
    if !ctx.has_regions() {
        flags.no_boundaries = true;
    }

    let climate_score = config
        .climate_score
        .or_else(|| table.mean_score())
        .unwrap_or(0.0);

    let clusters = detect_hotspots(table.cells(), &config.hotspot.params());

    let today = aggregate(table.cells(), ctx.index());
    let aggregates = match prior {
        Some(prior_table) => {
            let prior_aggregates = aggregate(prior_table.cells(), ctx.index());
            apply_trend(&today, Some(&prior_aggregates))
        }
        None => {
            flags.no_prior = true;
            apply_trend(&today, None)
        }
    };

    let latest = latest_per_device(readings);
    if latest.is_empty() {
        flags.no_sensors = true;
    }
    let sensor_score = latest_score(&latest);

    let fusion = fuse_with_policy(climate_score, sensor_score, config.fallback_policy);
    let fri = fri::from_unit(fusion.fused_score);
    let fri_delta = config.baseline_fri.map(|baseline| fri - fri::clamp(baseline));

    let alerts = explain(&ExplainInputs {
        fusion: Some(&fusion),
        aggregates: &aggregates,
        clusters: &clusters,
        sensor_score,
        fri_delta,
        aqi_band: config.aqi_band,
    });
    let sensor_alerts = sensor_statements(&latest);
    let summary = summary_lines(&aggregates, &clusters);

    log::info!(
        "Decision: fused {:.3} ({}), {} clusters, {} regions, {} alerts",
        fusion.fused_score,
        fusion.level,
        clusters.len(),
        aggregates.len(),
        alerts.len()
    );

    DecisionReport {
        generated_at: Utc::now(),
        fusion,
        fri,
        fri_level: FriLevel::from_fri(fri),
        recommendation: fusion.level.recommendation().to_string(),
        aggregates,
        clusters,
        alerts,
        sensor_alerts,
        summary,
        grid_stats: *table.stats(),
        flags,
    }
}
