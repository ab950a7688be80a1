//! Staged decision run for the fire watch toolchain.
//!
//! Chains boundary load -> grid loads -> decision in one flow, with
//! `indicatif` progress bars for real-time visual feedback, then prints
//! the report as text or JSON.

use std::path::PathBuf;
use std::time::Instant;

use fire_watch_cli_utils::{IndicatifProgress, MultiProgress};
use fire_watch_engine::{
    DecisionReport, EngineConfig, EngineContext, decide_with_inputs, load_prior_table,
    load_prior_table_with_progress, load_readings, load_table, load_table_with_progress,
    resolve_config_path,
};

/// Runs the decision pipeline end to end.
///
/// The `multi` parameter is the shared [`MultiProgress`] that is also
/// registered with the log bridge, so all `log::info!` output is
/// automatically suspended while progress bars redraw.
///
/// # Errors
///
/// Returns an error if the configuration is malformed or any configured
/// input file cannot be read. Missing optional inputs degrade the
/// report instead of failing.
pub fn run(
    multi: &MultiProgress,
    config_path: Option<PathBuf>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();

    let config = EngineConfig::load_or_default(&resolve_config_path(config_path))?;

    let total_steps =
        1 + usize::from(config.risk_csv.is_some()) + usize::from(config.prior_csv.is_some());
    let mut current_step = 0usize;

    log::info!("Loading boundary dataset...");
    let context = EngineContext::load(config)?;
    let config = context.config();

    let table = if config.risk_csv.is_some() {
        current_step += 1;
        let bar = IndicatifProgress::rows_bar(
            multi,
            &format!("[{current_step}/{total_steps}] Loading risk grid"),
        );
        load_table_with_progress(config, Some(bar))?
    } else {
        load_table(config)?
    };

    let prior = if config.prior_csv.is_some() {
        current_step += 1;
        let bar = IndicatifProgress::rows_bar(
            multi,
            &format!("[{current_step}/{total_steps}] Loading prior grid"),
        );
        load_prior_table_with_progress(config, Some(bar))?
    } else {
        load_prior_table(config)?
    };

    let readings = load_readings(config)?;

    current_step += 1;
    let decide_bar = IndicatifProgress::stage_bar(
        multi,
        &format!("[{current_step}/{total_steps}] Computing decision"),
    );
    let report = decide_with_inputs(&context, &table, prior.as_ref(), &readings);
    decide_bar.finish(format!(
        "[{current_step}/{total_steps}] {} -- index {:.0} ({})",
        report.fusion.level, report.fri, report.fri_level
    ));

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    let elapsed = start.elapsed();
    log::info!("Decision complete in {:.1}s", elapsed.as_secs_f64());

    Ok(())
}

/// Prints the operator-facing text rendering of a report.
fn print_report(report: &DecisionReport) {
    println!();
    println!(
        "Fire Risk Index: {:.0} ({}) -- fused score {:.3}",
        report.fri, report.fri_level, report.fusion.fused_score
    );
    println!("Recommendation: {}", report.recommendation);
    println!();

    for line in &report.summary {
        println!("{line}");
    }

    if !report.alerts.is_empty() {
        println!();
        println!("Alerts:");
        for alert in &report.alerts {
            println!("  [{}] {}", alert.severity, alert.message);
        }
    }

    if !report.sensor_alerts.is_empty() {
        println!();
        println!("Device alerts:");
        for alert in &report.sensor_alerts {
            println!("  [{}] {}", alert.severity, alert.message);
        }
    }

    if report.flags.any() {
        let mut degraded = Vec::new();
        if report.flags.empty_grid {
            degraded.push("empty grid");
        }
        if report.flags.no_boundaries {
            degraded.push("no boundaries");
        }
        if report.flags.no_sensors {
            degraded.push("no sensors");
        }
        if report.flags.no_prior {
            degraded.push("no prior day");
        }
        println!();
        println!("Degraded inputs: {}", degraded.join(", "));
    }
}
