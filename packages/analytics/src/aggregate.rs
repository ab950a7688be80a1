//! Point-in-polygon aggregation of risk cells into named regions.
//!
//! Each cell joins at most one region (first containing polygon wins);
//! cells outside every polygon are dropped. Every region in the boundary
//! set appears in the output exactly once, zero-filled when it contains
//! no cells.

use std::collections::HashMap;

use fire_watch_analytics_models::RegionAggregate;
use fire_watch_risk_models::RiskCell;
use fire_watch_spatial::RegionIndex;

/// Accumulated statistics for one region.
#[derive(Default)]
struct Accumulator {
    sum: f64,
    max: f64,
    count: usize,
}

/// Aggregates cells into per-region statistics.
///
/// Output order follows the boundary dataset order. Trend fields start in
/// their no-prior state; [`crate::trend::apply_trend`] fills them.
#[must_use]
pub fn aggregate(cells: &[RiskCell], index: &RegionIndex) -> Vec<RegionAggregate> {
    let mut accumulators: HashMap<&str, Accumulator> = HashMap::new();
    let mut unattributed = 0_usize;

    for cell in cells {
        let Some(name) = index.locate(cell.longitude, cell.latitude) else {
            unattributed += 1;
            continue;
        };
        let entry = accumulators.entry(name).or_default();
        entry.sum += cell.risk_score;
        entry.max = entry.max.max(cell.risk_score);
        entry.count += 1;
    }

    if unattributed > 0 {
        log::debug!("{unattributed} cells fell outside every region boundary");
    }

    index
        .region_names()
        .iter()
        .map(|name| {
            accumulators.get(name.as_str()).map_or_else(
                || RegionAggregate::empty(name.clone()),
                |acc| {
                    #[allow(clippy::cast_precision_loss)]
                    let mean = acc.sum / acc.count as f64;
                    RegionAggregate::new(name.clone(), mean, acc.max, acc.count)
                },
            )
        })
        .collect()
}
