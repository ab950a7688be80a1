//! Decision report model.

use chrono::{DateTime, Utc};
use fire_watch_alert::Alert;
use fire_watch_analytics_models::RegionAggregate;
use fire_watch_fusion::FusionResult;
use fire_watch_grid::IngestStats;
use fire_watch_hotspot::HotspotCluster;
use fire_watch_risk_models::fri::FriLevel;
use serde::{Deserialize, Serialize};

/// Informational flags describing inputs that were missing or empty.
///
/// Missing inputs degrade the decision rather than failing it; these
/// flags tell the consumer which parts ran on empty collections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionFlags {
    /// The risk grid held no usable cells.
    pub empty_grid: bool,
    /// No region boundaries were loaded; aggregates are empty.
    pub no_boundaries: bool,
    /// No usable sensor readings; fusion fell back to climate only.
    pub no_sensors: bool,
    /// No prior dataset; every region trend is `new`.
    pub no_prior: bool,
}

impl DecisionFlags {
    /// Whether any degradation flag is set.
    #[must_use]
    pub const fn any(self) -> bool {
        self.empty_grid || self.no_boundaries || self.no_sensors || self.no_prior
    }
}

/// The full output of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionReport {
    /// When the report was produced.
    pub generated_at: DateTime<Utc>,
    /// The fused decision.
    pub fusion: FusionResult,
    /// Fused score on the 0 to 300 display scale.
    pub fri: f64,
    /// Display-scale banding of `fri`.
    pub fri_level: FriLevel,
    /// Operational recommendation for the decision level.
    pub recommendation: String,
    /// Per-region aggregates with trend classification.
    pub aggregates: Vec<RegionAggregate>,
    /// Detected hotspot clusters.
    pub clusters: Vec<HotspotCluster>,
    /// Priority-ordered alert statements.
    pub alerts: Vec<Alert>,
    /// Per-device sensor statements.
    pub sensor_alerts: Vec<Alert>,
    /// Human-readable situation digest.
    pub summary: Vec<String>,
    /// Ingestion counters for the current-day grid.
    pub grid_stats: IngestStats,
    /// Input degradation flags.
    pub flags: DecisionFlags,
}
