//! Decision explanation.
//!
//! Applies the alert rules in a fixed priority order over the pipeline
//! outputs. Rules only ever append; the order of the returned alerts is
//! part of the contract.

use fire_watch_analytics::top_by_mean_risk;
use fire_watch_analytics_models::RegionAggregate;
use fire_watch_fusion::FusionResult;
use fire_watch_hotspot::HotspotCluster;
use fire_watch_risk_models::FusionLevel;

use crate::{Alert, AlertSeverity};

/// Mean risk above which a region earns a call-out.
pub const REGION_CALLOUT_MEAN: f64 = 0.7;

/// Maximum number of region call-outs per explanation.
pub const REGION_CALLOUT_CAP: usize = 6;

/// Sensor score at which ground conditions are called elevated.
pub const SENSOR_ELEVATED: f64 = 0.55;

/// Sensor score at which ground conditions are called extreme.
pub const SENSOR_EXTREME: f64 = 0.75;

/// Fire Risk Index movement against baseline worth a statement, on the
/// 0 to 300 display scale.
pub const FRI_BASELINE_DELTA: f64 = 10.0;

/// Air quality band (OpenWeather 1 to 5 convention) treated as heavy.
pub const AQI_HEAVY_BAND: u8 = 4;

/// Fused score floor for the air quality reinforcement statement.
pub const AQI_FUSED_FLOOR: f64 = 0.60;

/// Everything the explanation rules look at.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplainInputs<'a> {
    /// Fusion decision, when one was computed.
    pub fusion: Option<&'a FusionResult>,
    /// Region aggregates with trend fields filled.
    pub aggregates: &'a [RegionAggregate],
    /// Detected hotspot clusters.
    pub clusters: &'a [HotspotCluster],
    /// Derived ground sensor score, when available.
    pub sensor_score: Option<f64>,
    /// Fire Risk Index movement against the baseline, display scale.
    pub fri_delta: Option<f64>,
    /// Air quality band accompanying the decision.
    pub aqi_band: Option<u8>,
}

/// Generates alerts in priority order.
///
/// When no rule fires a single informational "no critical alerts"
/// statement is returned.
#[must_use]
pub fn explain(inputs: &ExplainInputs<'_>) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if let Some(fusion) = inputs.fusion {
        alerts.push(banding_alert(fusion));
    }

    region_callouts(inputs.aggregates, &mut alerts);

    if !inputs.clusters.is_empty() {
        let n = inputs.clusters.len();
        let noun = if n == 1 { "cluster" } else { "clusters" };
        alerts.push(Alert::new(
            AlertSeverity::Warning,
            format!("{n} active hotspot {noun} detected."),
        ));
    }

    match inputs.sensor_score {
        Some(score) if score >= SENSOR_EXTREME => alerts.push(Alert::new(
            AlertSeverity::Critical,
            format!("Ground sensors indicate extreme fire conditions (score {score:.2})."),
        )),
        Some(score) if score >= SENSOR_ELEVATED => alerts.push(Alert::new(
            AlertSeverity::Warning,
            format!("Ground sensors indicate elevated fire conditions (score {score:.2})."),
        )),
        Some(_) => {}
        None => {
            if inputs.fusion.is_some() {
                alerts.push(Alert::new(
                    AlertSeverity::Info,
                    "Sensor feed unavailable; decision based on climate signal only.".to_string(),
                ));
            }
        }
    }

    if let (Some(band), Some(fusion)) = (inputs.aqi_band, inputs.fusion)
        && band >= AQI_HEAVY_BAND
        && fusion.fused_score >= AQI_FUSED_FLOOR
    {
        alerts.push(Alert::new(
            AlertSeverity::Warning,
            format!("Air quality band {band}/5 corroborates elevated fire risk."),
        ));
    }

    if let Some(delta) = inputs.fri_delta
        && delta.abs() > FRI_BASELINE_DELTA
    {
        alerts.push(Alert::new(
            AlertSeverity::Watch,
            format!("Fire Risk Index shifted {delta:+.1} points against the baseline."),
        ));
    }

    if alerts.is_empty() {
        log::debug!("No alert rule fired");
        alerts.push(Alert::new(
            AlertSeverity::Info,
            "No critical alerts; conditions within normal bounds.".to_string(),
        ));
    }

    alerts
}

const fn banding_severity(level: FusionLevel) -> AlertSeverity {
    match level {
        FusionLevel::Low => AlertSeverity::Info,
        FusionLevel::Moderate => AlertSeverity::Watch,
        FusionLevel::High => AlertSeverity::Warning,
        FusionLevel::Critical => AlertSeverity::Critical,
    }
}

fn banding_alert(fusion: &FusionResult) -> Alert {
    let descriptor = match fusion.level {
        FusionLevel::Low => "Low fire danger",
        FusionLevel::Moderate => "Moderate fire danger",
        FusionLevel::High => "High fire danger",
        FusionLevel::Critical => "Critical fire danger",
    };
    Alert::new(
        banding_severity(fusion.level),
        format!("{descriptor}: fused risk {:.2}.", fusion.fused_score),
    )
}

fn region_callouts(aggregates: &[RegionAggregate], alerts: &mut Vec<Alert>) {
    let callouts = top_by_mean_risk(aggregates, REGION_CALLOUT_CAP);
    for aggregate in callouts {
        if aggregate.mean_risk > REGION_CALLOUT_MEAN {
            alerts.push(Alert::new(
                AlertSeverity::Warning,
                format!(
                    "Region {}: mean risk {:.2} exceeds {REGION_CALLOUT_MEAN:.2}.",
                    aggregate.region_name, aggregate.mean_risk
                ),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use fire_watch_analytics_models::RegionAggregate;
    use fire_watch_fusion::fuse;
    use fire_watch_hotspot::HotspotCluster;
    use fire_watch_risk_models::RiskCell;

    use super::{AlertSeverity, ExplainInputs, explain};

    fn aggregate(name: &str, mean: f64) -> RegionAggregate {
        RegionAggregate::new(name.to_string(), mean, mean, 4)
    }

    fn cluster(id: usize) -> HotspotCluster {
        HotspotCluster {
            cluster_id: id,
            cells: vec![RiskCell::new(34.0, -118.0, 0.9)],
        }
    }

    #[test]
    fn rules_fire_in_priority_order() {
        let fusion = fuse(0.9, Some(0.8));
        let aggregates = vec![aggregate("Kern", 0.85), aggregate("Inyo", 0.2)];
        let clusters = vec![cluster(0), cluster(1)];
        let inputs = ExplainInputs {
            fusion: Some(&fusion),
            aggregates: &aggregates,
            clusters: &clusters,
            sensor_score: Some(0.8),
            fri_delta: Some(-14.0),
            aqi_band: Some(5),
        };

        let alerts = explain(&inputs);
        let messages: Vec<&str> = alerts.iter().map(|a| a.message.as_str()).collect();

        assert!(messages[0].starts_with("Critical fire danger"));
        assert!(messages[1].starts_with("Region Kern"));
        assert!(messages[2].contains("2 active hotspot clusters"));
        assert!(messages[3].contains("extreme fire conditions"));
        assert!(messages[4].contains("Air quality band 5/5"));
        assert!(messages[5].contains("shifted -14.0 points"));
        assert_eq!(alerts.len(), 6);
    }

    #[test]
    fn region_callouts_are_capped_at_six() {
        let aggregates: Vec<RegionAggregate> = (0..8)
            .map(|i| aggregate(&format!("Region{i}"), 0.75 + f64::from(i) * 0.01))
            .collect();
        let inputs = ExplainInputs {
            aggregates: &aggregates,
            ..ExplainInputs::default()
        };

        let alerts = explain(&inputs);
        let region_alerts = alerts
            .iter()
            .filter(|a| a.message.starts_with("Region "))
            .count();
        assert_eq!(region_alerts, 6);
        // Highest mean risk leads.
        assert!(alerts[0].message.starts_with("Region Region7"));
    }

    #[test]
    fn no_firing_rule_emits_the_fallback_statement() {
        let inputs = ExplainInputs::default();
        let alerts = explain(&inputs);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, AlertSeverity::Info);
        assert!(alerts[0].message.contains("No critical alerts"));
    }

    #[test]
    fn missing_sensor_score_is_noted_when_a_decision_exists() {
        let fusion = fuse(0.2, None);
        let inputs = ExplainInputs {
            fusion: Some(&fusion),
            ..ExplainInputs::default()
        };
        let alerts = explain(&inputs);
        assert_eq!(alerts.len(), 2);
        assert!(alerts[1].message.contains("Sensor feed unavailable"));
    }

    #[test]
    fn sensor_tiers_are_inclusive() {
        let base = ExplainInputs {
            sensor_score: Some(0.55),
            ..ExplainInputs::default()
        };
        let alerts = explain(&base);
        assert!(alerts[0].message.contains("elevated fire conditions"));

        let extreme = ExplainInputs {
            sensor_score: Some(0.75),
            ..ExplainInputs::default()
        };
        let alerts = explain(&extreme);
        assert!(alerts[0].message.contains("extreme fire conditions"));
        assert_eq!(alerts[0].severity, AlertSeverity::Critical);

        let calm = ExplainInputs {
            sensor_score: Some(0.54),
            ..ExplainInputs::default()
        };
        let alerts = explain(&calm);
        assert!(alerts[0].message.contains("No critical alerts"));
    }

    #[test]
    fn baseline_shift_requires_more_than_ten_points() {
        let at_bound = ExplainInputs {
            fri_delta: Some(10.0),
            ..ExplainInputs::default()
        };
        assert!(explain(&at_bound)[0].message.contains("No critical alerts"));

        let beyond = ExplainInputs {
            fri_delta: Some(10.1),
            ..ExplainInputs::default()
        };
        assert!(explain(&beyond)[0].message.contains("shifted +10.1 points"));
    }

    #[test]
    fn aqi_reinforcement_needs_heavy_band_and_elevated_fusion() {
        let fusion_high = fuse(1.0, None);
        let firing = ExplainInputs {
            fusion: Some(&fusion_high),
            aqi_band: Some(4),
            ..ExplainInputs::default()
        };
        let alerts = explain(&firing);
        assert!(alerts.iter().any(|a| a.message.contains("Air quality band 4/5")));

        let fusion_low = fuse(0.2, None);
        let suppressed = ExplainInputs {
            fusion: Some(&fusion_low),
            aqi_band: Some(5),
            ..ExplainInputs::default()
        };
        let alerts = explain(&suppressed);
        assert!(!alerts.iter().any(|a| a.message.contains("Air quality")));

        let light_band = ExplainInputs {
            fusion: Some(&fusion_high),
            aqi_band: Some(3),
            ..ExplainInputs::default()
        };
        let alerts = explain(&light_band);
        assert!(!alerts.iter().any(|a| a.message.contains("Air quality")));
    }

    #[test]
    fn single_cluster_reads_singular() {
        let clusters = vec![cluster(0)];
        let inputs = ExplainInputs {
            clusters: &clusters,
            ..ExplainInputs::default()
        };
        let alerts = explain(&inputs);
        assert!(alerts[0].message.contains("1 active hotspot cluster detected"));
    }
}
