#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the fire watch server.
//!
//! Everything here serializes to camelCase JSON. The engine's own types
//! never cross the wire directly, so the HTTP contract can move without
//! touching the pipeline.

use chrono::{DateTime, Utc};
use fire_watch_analytics_models::{RegionAggregate, Trend};
use fire_watch_hotspot::{HotspotCluster, HotspotParams};
use fire_watch_risk_models::{SensorReading, fri};
use serde::{Deserialize, Serialize};

/// Liveness probe payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Always `true` when the process can answer at all.
    pub healthy: bool,
    /// Crate version the binary was built from.
    pub version: String,
}

/// A region aggregate as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRegion {
    /// Region name.
    pub name: String,
    /// Mean risk score over attributed cells.
    pub mean_risk: f64,
    /// Highest risk score among attributed cells.
    pub max_risk: f64,
    /// Number of attributed cells.
    pub cell_count: usize,
    /// Prior-period mean risk.
    pub mean_risk_prior: f64,
    /// Day-over-day mean movement.
    pub delta: f64,
    /// Trend classification.
    pub trend: Trend,
    /// Mean risk on the 0 to 300 display scale.
    pub fri: f64,
}

impl From<&RegionAggregate> for ApiRegion {
    fn from(aggregate: &RegionAggregate) -> Self {
        Self {
            name: aggregate.region_name.clone(),
            mean_risk: aggregate.mean_risk,
            max_risk: aggregate.max_risk,
            cell_count: aggregate.cell_count,
            mean_risk_prior: aggregate.mean_risk_prior,
            delta: aggregate.delta,
            trend: aggregate.trend,
            fri: fri::from_unit(aggregate.mean_risk),
        }
    }
}

/// A hotspot cluster as returned by the API: derived statistics only,
/// not the member cells.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHotspot {
    /// Cluster label, stable within one response only.
    pub cluster_id: usize,
    /// Number of member cells.
    pub cell_count: usize,
    /// Centroid latitude.
    pub latitude: f64,
    /// Centroid longitude.
    pub longitude: f64,
    /// Mean member risk score.
    pub mean_risk: f64,
    /// Highest member risk score.
    pub max_risk: f64,
}

impl From<&HotspotCluster> for ApiHotspot {
    fn from(cluster: &HotspotCluster) -> Self {
        let (latitude, longitude) = cluster.centroid();
        Self {
            cluster_id: cluster.cluster_id,
            cell_count: cluster.cell_count(),
            latitude,
            longitude,
            mean_risk: cluster.mean_risk(),
            max_risk: cluster.max_risk(),
        }
    }
}

/// A sensor device as returned by the API: the latest reading plus its
/// derived ground score.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSensor {
    /// Device identifier.
    pub device_id: String,
    /// Device latitude.
    pub latitude: f64,
    /// Device longitude.
    pub longitude: f64,
    /// PM2.5 in micrograms per cubic meter.
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
    /// Radio signal strength.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rssi: Option<f64>,
    /// When the reading was taken.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Derived ground risk score, when any signal channel is usable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl ApiSensor {
    /// Builds the API shape from a reading and its derived score.
    #[must_use]
    pub fn from_reading(reading: &SensorReading, score: Option<f64>) -> Self {
        Self {
            device_id: reading.device_id.clone(),
            latitude: reading.latitude,
            longitude: reading.longitude,
            pm25: reading.pm25,
            temp_c: reading.temp_c,
            rh: reading.rh,
            battery_v: reading.battery_v,
            rssi: reading.rssi,
            timestamp: reading.timestamp,
            score,
        }
    }
}

/// Query parameters for the hotspots endpoint. Absent fields fall back
/// to the server's configured clustering parameters.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotspotQueryParams {
    /// Neighborhood radius in kilometers.
    pub eps_km: Option<f64>,
    /// Minimum neighborhood size for a core point, self included.
    pub min_samples: Option<usize>,
    /// Risk score floor for cluster candidates.
    pub threshold: Option<f64>,
}

impl HotspotQueryParams {
    /// Overlays the query overrides onto the configured base parameters.
    #[must_use]
    pub fn apply_to(self, base: HotspotParams) -> HotspotParams {
        HotspotParams {
            eps_km: self.eps_km.unwrap_or(base.eps_km),
            min_samples: self.min_samples.unwrap_or(base.min_samples),
            threshold: self.threshold.unwrap_or(base.threshold),
        }
    }
}

#[cfg(test)]
mod tests {
    use fire_watch_analytics_models::{RegionAggregate, Trend};
    use fire_watch_hotspot::{HotspotCluster, HotspotParams};
    use fire_watch_risk_models::{RiskCell, SensorReading};

    use super::{ApiHotspot, ApiRegion, ApiSensor, HotspotQueryParams};

    #[test]
    fn region_conversion_carries_the_display_scale() {
        let mut aggregate = RegionAggregate::new("Kern".to_string(), 0.5, 0.9, 12);
        aggregate.delta = 0.1;
        aggregate.trend = Trend::Increasing;

        let api = ApiRegion::from(&aggregate);
        assert_eq!(api.name, "Kern");
        assert_eq!(api.cell_count, 12);
        assert_eq!(api.trend, Trend::Increasing);
        assert!((api.fri - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn hotspot_conversion_summarizes_members() {
        let cluster = HotspotCluster {
            cluster_id: 3,
            cells: vec![
                RiskCell::new(34.0, -118.0, 0.7),
                RiskCell::new(34.2, -118.2, 0.9),
            ],
        };
        let api = ApiHotspot::from(&cluster);
        assert_eq!(api.cluster_id, 3);
        assert_eq!(api.cell_count, 2);
        assert!((api.latitude - 34.1).abs() < 1e-12);
        assert!((api.longitude + 118.1).abs() < 1e-12);
        assert!((api.mean_risk - 0.8).abs() < 1e-12);
        assert!((api.max_risk - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn sensor_shape_keeps_optional_channels() {
        let mut reading = SensorReading::new("edge-01".to_string(), 34.0, -118.0);
        reading.pm25 = Some(42.0);

        let api = ApiSensor::from_reading(&reading, Some(0.25));
        assert_eq!(api.device_id, "edge-01");
        assert_eq!(api.pm25, Some(42.0));
        assert!(api.temp_c.is_none());
        assert_eq!(api.score, Some(0.25));
    }

    #[test]
    fn query_overrides_fall_back_per_field() {
        let params = HotspotQueryParams {
            eps_km: Some(10.0),
            min_samples: None,
            threshold: None,
        };
        let merged = params.apply_to(HotspotParams::default());
        assert!((merged.eps_km - 10.0).abs() < f64::EPSILON);
        assert_eq!(merged.min_samples, 10);
        assert!((merged.threshold - 0.7).abs() < f64::EPSILON);
    }
}
