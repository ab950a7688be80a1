//! Ranking helpers over region aggregates.
//!
//! Deterministic sort orders used by the explain layer and the API: score
//! descending with region name as the tie-breaker.

use fire_watch_analytics_models::{RegionAggregate, Trend};

/// Regions ranked by mean risk, highest first.
#[must_use]
pub fn top_by_mean_risk(aggregates: &[RegionAggregate], limit: usize) -> Vec<&RegionAggregate> {
    let mut ranked: Vec<&RegionAggregate> = aggregates.iter().collect();
    ranked.sort_by(|a, b| {
        b.mean_risk
            .total_cmp(&a.mean_risk)
            .then_with(|| a.region_name.cmp(&b.region_name))
    });
    ranked.truncate(limit);
    ranked
}

/// Increasing regions ranked by delta, largest rise first.
#[must_use]
pub fn most_increasing(aggregates: &[RegionAggregate], limit: usize) -> Vec<&RegionAggregate> {
    let mut ranked: Vec<&RegionAggregate> = aggregates
        .iter()
        .filter(|aggregate| aggregate.trend == Trend::Increasing)
        .collect();
    ranked.sort_by(|a, b| {
        b.delta
            .total_cmp(&a.delta)
            .then_with(|| a.region_name.cmp(&b.region_name))
    });
    ranked.truncate(limit);
    ranked
}

/// Decreasing regions ranked by delta, largest drop first.
#[must_use]
pub fn most_decreasing(aggregates: &[RegionAggregate], limit: usize) -> Vec<&RegionAggregate> {
    let mut ranked: Vec<&RegionAggregate> = aggregates
        .iter()
        .filter(|aggregate| aggregate.trend == Trend::Decreasing)
        .collect();
    ranked.sort_by(|a, b| {
        a.delta
            .total_cmp(&b.delta)
            .then_with(|| a.region_name.cmp(&b.region_name))
    });
    ranked.truncate(limit);
    ranked
}

/// Mean of `mean_risk` across all aggregates, zero-filled regions
/// included. `0.0` for an empty set.
#[must_use]
pub fn overall_mean_risk(aggregates: &[RegionAggregate]) -> f64 {
    if aggregates.is_empty() {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = aggregates.len() as f64;
    aggregates.iter().map(|a| a.mean_risk).sum::<f64>() / n
}
