#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Core wildfire risk taxonomy shared across the workspace: risk level
//! scales, fused decision levels, grid cell and sensor reading models, and
//! the Fire Risk Index display scale.

pub mod fri;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Risk classification for a single climate grid cell, banded from the
/// model's unit-interval `risk_score`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    /// Score below 0.30. Background fire weather.
    Low,
    /// Score in `[0.30, 0.60)`. Elevated but not actionable on its own.
    Medium,
    /// Score in `[0.60, 0.80)`. Conditions favor ignition and spread.
    High,
    /// Score of 0.80 or above. Worst-case fire weather.
    Extreme,
}

impl RiskLevel {
    /// Bands a unit-interval risk score into a level. Scores outside
    /// `[0.0, 1.0]` are clamped first.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        let score = clamp_unit(score);
        if score < 0.30 {
            Self::Low
        } else if score < 0.60 {
            Self::Medium
        } else if score < 0.80 {
            Self::High
        } else {
            Self::Extreme
        }
    }

    /// Ordering weight for sorting and comparisons.
    #[must_use]
    pub const fn severity(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
            Self::Extreme => 3,
        }
    }
}

/// Decision level produced by climate and sensor fusion. Same thresholds as
/// [`RiskLevel`] but applied to the fused score, with response-oriented
/// naming.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum FusionLevel {
    /// Fused score below 0.30.
    Low,
    /// Fused score in `[0.30, 0.60)`.
    Moderate,
    /// Fused score in `[0.60, 0.80)`.
    High,
    /// Fused score of 0.80 or above.
    Critical,
}

impl FusionLevel {
    /// Bands a fused unit-interval score into a decision level. Scores
    /// outside `[0.0, 1.0]` are clamped first.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        let score = clamp_unit(score);
        if score < 0.30 {
            Self::Low
        } else if score < 0.60 {
            Self::Moderate
        } else if score < 0.80 {
            Self::High
        } else {
            Self::Critical
        }
    }

    /// Operational recommendation surfaced alongside the level in reports.
    #[must_use]
    pub const fn recommendation(self) -> &'static str {
        match self {
            Self::Low => "Normal conditions. Routine monitoring is sufficient.",
            Self::Moderate => "Elevated conditions. Increase monitoring frequency.",
            Self::High => "High fire danger. Stage response units and verify readiness.",
            Self::Critical => "Critical fire danger. Immediate emergency response posture.",
        }
    }

    /// Ordering weight for sorting and comparisons.
    #[must_use]
    pub const fn severity(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Moderate => 1,
            Self::High => 2,
            Self::Critical => 3,
        }
    }
}

/// One climate model grid cell: a point location with its modeled risk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskCell {
    /// Latitude in decimal degrees, WGS84.
    pub latitude: f64,
    /// Longitude in decimal degrees, WGS84.
    pub longitude: f64,
    /// Modeled risk score in `[0.0, 1.0]`.
    pub risk_score: f64,
    /// Banded classification of `risk_score`.
    pub risk_level: RiskLevel,
    /// Forecast date the score applies to, when the dataset carries one.
    pub date: Option<NaiveDate>,
}

impl RiskCell {
    /// Builds a cell from a location and score, banding the level from the
    /// score.
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, risk_score: f64) -> Self {
        Self {
            latitude,
            longitude,
            risk_score,
            risk_level: RiskLevel::from_score(risk_score),
            date: None,
        }
    }
}

/// One field sensor report. Every measurement channel is optional because
/// nodes degrade channel by channel rather than all at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
    /// Stable device identifier.
    pub device_id: String,
    /// Latitude in decimal degrees, WGS84.
    pub latitude: f64,
    /// Longitude in decimal degrees, WGS84.
    pub longitude: f64,
    /// Particulate matter 2.5 in ug/m3.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pm25: Option<f64>,
    /// Air temperature in degrees Celsius.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_c: Option<f64>,
    /// Relative humidity in percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rh: Option<f64>,
    /// Battery voltage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery_v: Option<f64>,
    /// Radio signal strength in dBm.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rssi: Option<f64>,
    /// Report time, when the feed carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl SensorReading {
    /// Builds a reading with a location and no measurement channels.
    #[must_use]
    pub const fn new(device_id: String, latitude: f64, longitude: f64) -> Self {
        Self {
            device_id,
            latitude,
            longitude,
            pm25: None,
            temp_c: None,
            rh: None,
            battery_v: None,
            rssi: None,
            timestamp: None,
        }
    }

    /// Whether any measurement channel carries a finite value.
    #[must_use]
    pub fn has_measurements(&self) -> bool {
        [self.pm25, self.temp_c, self.rh]
            .into_iter()
            .flatten()
            .any(f64::is_finite)
    }
}

/// One timestamped Fire Risk Index observation in a history series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriSample {
    /// Observation time.
    pub timestamp: DateTime<Utc>,
    /// Fire Risk Index on the 0 to 300 display scale.
    pub fri: f64,
}

/// Clamps a score to the unit interval. Non-finite input maps to `0.0`.
#[must_use]
pub fn clamp_unit(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{FusionLevel, RiskCell, RiskLevel, SensorReading, clamp_unit};

    #[test]
    fn risk_level_bands_at_thresholds() {
        assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(0.299), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(0.30), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(0.60), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(0.799), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(0.80), RiskLevel::Extreme);
        assert_eq!(RiskLevel::from_score(1.0), RiskLevel::Extreme);
    }

    #[test]
    fn risk_level_clamps_out_of_range_scores() {
        assert_eq!(RiskLevel::from_score(-0.5), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(7.0), RiskLevel::Extreme);
        assert_eq!(RiskLevel::from_score(f64::NAN), RiskLevel::Low);
    }

    #[test]
    fn fusion_level_bands_at_thresholds() {
        assert_eq!(FusionLevel::from_score(0.29), FusionLevel::Low);
        assert_eq!(FusionLevel::from_score(0.30), FusionLevel::Moderate);
        assert_eq!(FusionLevel::from_score(0.59), FusionLevel::Moderate);
        assert_eq!(FusionLevel::from_score(0.60), FusionLevel::High);
        assert_eq!(FusionLevel::from_score(0.80), FusionLevel::Critical);
    }

    #[test]
    fn levels_parse_and_display_screaming_case() {
        assert_eq!(RiskLevel::Extreme.to_string(), "EXTREME");
        assert_eq!("MEDIUM".parse::<RiskLevel>().ok(), Some(RiskLevel::Medium));
        assert_eq!(FusionLevel::Critical.to_string(), "CRITICAL");
        assert_eq!(
            "MODERATE".parse::<FusionLevel>().ok(),
            Some(FusionLevel::Moderate)
        );
    }

    #[test]
    fn severity_orders_levels() {
        assert!(RiskLevel::Low.severity() < RiskLevel::Extreme.severity());
        assert!(FusionLevel::Moderate.severity() < FusionLevel::High.severity());
    }

    #[test]
    fn risk_cell_bands_level_from_score() {
        let cell = RiskCell::new(34.05, -118.24, 0.72);
        assert_eq!(cell.risk_level, RiskLevel::High);
        assert!(cell.date.is_none());
    }

    #[test]
    fn risk_cell_carries_forecast_date() {
        let mut cell = RiskCell::new(34.05, -118.24, 0.72);
        cell.date = NaiveDate::from_ymd_opt(2024, 7, 4);
        assert_eq!(cell.date, NaiveDate::from_ymd_opt(2024, 7, 4));
    }

    #[test]
    fn sensor_reading_measurement_presence() {
        let mut reading = SensorReading::new("node-7".to_string(), 34.0, -118.0);
        assert!(!reading.has_measurements());
        reading.pm25 = Some(f64::NAN);
        assert!(!reading.has_measurements());
        reading.temp_c = Some(31.5);
        assert!(reading.has_measurements());
    }

    #[test]
    fn clamp_unit_handles_non_finite() {
        assert!((clamp_unit(0.5) - 0.5).abs() < f64::EPSILON);
        assert!((clamp_unit(-1.0) - 0.0).abs() < f64::EPSILON);
        assert!((clamp_unit(2.0) - 1.0).abs() < f64::EPSILON);
        assert!((clamp_unit(f64::INFINITY) - 0.0).abs() < f64::EPSILON);
        assert!((clamp_unit(f64::NAN) - 0.0).abs() < f64::EPSILON);
    }
}
