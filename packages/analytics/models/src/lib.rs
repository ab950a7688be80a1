#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Region aggregate and trend classification types.
//!
//! Defines the per-region statistics produced by point-in-polygon
//! aggregation and the trend taxonomies applied to day-over-day deltas
//! and rolling index histories.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Day-over-day movement of a region's mean risk.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Trend {
    /// Delta above `+0.05`.
    Increasing,
    /// Delta below `-0.05`.
    Decreasing,
    /// Delta within the `±0.05` band.
    Stable,
    /// No prior dataset exists to compare against.
    New,
}

/// Half-width of the stable band around zero delta. A fixed design
/// constant, not configuration.
pub const TREND_DELTA_BAND: f64 = 0.05;

impl Trend {
    /// Classifies a day-over-day delta. `New` is never produced here; it
    /// only applies when no prior dataset exists at all.
    #[must_use]
    pub fn from_delta(delta: f64) -> Self {
        if delta > TREND_DELTA_BAND {
            Self::Increasing
        } else if delta < -TREND_DELTA_BAND {
            Self::Decreasing
        } else {
            Self::Stable
        }
    }
}

/// Direction of a rolling Fire Risk Index history.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SeriesTrend {
    /// Slope above `+0.015` index points per minute.
    Up,
    /// Slope below `-0.015` index points per minute.
    Down,
    /// Slope within the flat band.
    Flat,
}

/// Half-width of the flat band around zero slope, in index points per
/// minute.
pub const SERIES_SLOPE_BAND: f64 = 0.015;

impl SeriesTrend {
    /// Classifies a least-squares slope in index points per minute.
    #[must_use]
    pub fn from_slope(slope: f64) -> Self {
        if slope > SERIES_SLOPE_BAND {
            Self::Up
        } else if slope < -SERIES_SLOPE_BAND {
            Self::Down
        } else {
            Self::Flat
        }
    }
}

/// Per-region risk statistics with day-over-day movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionAggregate {
    /// Canonical region name.
    pub region_name: String,
    /// Mean risk score of the cells inside the region.
    pub mean_risk: f64,
    /// Highest risk score of the cells inside the region.
    pub max_risk: f64,
    /// Number of cells inside the region.
    pub cell_count: usize,
    /// Mean risk from the prior dataset, `0.0` when absent.
    pub mean_risk_prior: f64,
    /// `mean_risk - mean_risk_prior`.
    pub delta: f64,
    /// Classified movement.
    pub trend: Trend,
}

impl RegionAggregate {
    /// Builds an aggregate with no prior-period information.
    #[must_use]
    pub const fn new(
        region_name: String,
        mean_risk: f64,
        max_risk: f64,
        cell_count: usize,
    ) -> Self {
        Self {
            region_name,
            mean_risk,
            max_risk,
            cell_count,
            mean_risk_prior: 0.0,
            delta: 0.0,
            trend: Trend::New,
        }
    }

    /// An aggregate for a region containing no cells.
    #[must_use]
    pub const fn empty(region_name: String) -> Self {
        Self::new(region_name, 0.0, 0.0, 0)
    }
}
