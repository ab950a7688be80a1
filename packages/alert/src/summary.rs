//! Plain-text situation summary.

use fire_watch_analytics::{most_decreasing, most_increasing, overall_mean_risk, top_by_mean_risk};
use fire_watch_analytics_models::RegionAggregate;
use fire_watch_hotspot::HotspotCluster;

/// Regions listed in the leaderboard section.
pub const LEADERBOARD_SIZE: usize = 3;

/// Regions listed in each trend section.
pub const TREND_SIZE: usize = 4;

/// Renders a human-readable summary of the current picture.
///
/// Sections in order: top regions by mean risk, rising regions, easing
/// regions, the overall posture line, and the hotspot count.
#[must_use]
pub fn summary_lines(aggregates: &[RegionAggregate], clusters: &[HotspotCluster]) -> Vec<String> {
    let mut lines = Vec::new();

    for aggregate in top_by_mean_risk(aggregates, LEADERBOARD_SIZE) {
        lines.push(format!(
            "{}: mean risk {:.2}, peak {:.2} across {} cells.",
            aggregate.region_name, aggregate.mean_risk, aggregate.max_risk, aggregate.cell_count
        ));
    }

    for aggregate in most_increasing(aggregates, TREND_SIZE) {
        lines.push(format!(
            "Rising: {} up {:+.2} since the prior run.",
            aggregate.region_name, aggregate.delta
        ));
    }

    for aggregate in most_decreasing(aggregates, TREND_SIZE) {
        lines.push(format!(
            "Easing: {} down {:+.2} since the prior run.",
            aggregate.region_name, aggregate.delta
        ));
    }

    lines.push(posture_line(overall_mean_risk(aggregates)));

    if clusters.is_empty() {
        lines.push("No hotspot clusters detected.".to_string());
    } else {
        let n = clusters.len();
        let noun = if n == 1 { "cluster" } else { "clusters" };
        lines.push(format!("{n} hotspot {noun} under watch."));
    }

    lines
}

fn posture_line(mean: f64) -> String {
    let descriptor = if mean > 0.7 {
        "very high"
    } else if mean > 0.5 {
        "elevated"
    } else if mean > 0.3 {
        "moderate"
    } else {
        "low"
    };
    format!("Overall posture: {descriptor} (mean risk {mean:.2}).")
}
