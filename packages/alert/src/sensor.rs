//! Per-device sensor alerting.
//!
//! These thresholds flag individual readings worth a human look. They
//! are deliberately looser than the tiers the fusion score is built
//! from, which exist to grade the aggregate signal rather than to page
//! anyone.

use fire_watch_risk_models::SensorReading;

use crate::{Alert, AlertSeverity};

/// PM2.5 at which smoke is called extreme, in micrograms per cubic meter.
pub const PM25_EXTREME: f64 = 150.0;

/// PM2.5 at which smoke is called elevated.
pub const PM25_ELEVATED: f64 = 80.0;

/// Air temperature treated as a heat anomaly, in degrees Celsius.
pub const TEMP_ANOMALY_C: f64 = 45.0;

/// Relative humidity treated as critically low, in percent.
pub const RH_CRITICAL: f64 = 20.0;

/// PM2.5 floor for the multi-signal confirmation rule.
pub const CONFIRM_PM25: f64 = 80.0;

/// Temperature floor for the multi-signal confirmation rule.
pub const CONFIRM_TEMP_C: f64 = 35.0;

/// Humidity ceiling for the multi-signal confirmation rule.
pub const CONFIRM_RH: f64 = 30.0;

/// Generates per-device alerts from raw readings.
///
/// One pass per device in input order: smoke first, then heat, then
/// humidity, then the multi-signal confirmation when all three agree.
#[must_use]
pub fn sensor_statements(readings: &[SensorReading]) -> Vec<Alert> {
    let mut alerts = Vec::new();
    for reading in readings {
        device_statements(reading, &mut alerts);
    }
    alerts
}

fn device_statements(reading: &SensorReading, alerts: &mut Vec<Alert>) {
    let device = reading.device_id.as_str();

    if let Some(pm25) = reading.pm25 {
        if pm25 >= PM25_EXTREME {
            alerts.push(Alert::new(
                AlertSeverity::Critical,
                format!("Device {device}: extreme smoke, PM2.5 {pm25:.0} ug/m3."),
            ));
        } else if pm25 >= PM25_ELEVATED {
            alerts.push(Alert::new(
                AlertSeverity::Warning,
                format!("Device {device}: elevated smoke, PM2.5 {pm25:.0} ug/m3."),
            ));
        }
    }

    if let Some(temp_c) = reading.temp_c
        && temp_c >= TEMP_ANOMALY_C
    {
        alerts.push(Alert::new(
            AlertSeverity::Warning,
            format!("Device {device}: heat anomaly, {temp_c:.1} C."),
        ));
    }

    if let Some(rh) = reading.rh
        && rh <= RH_CRITICAL
    {
        alerts.push(Alert::new(
            AlertSeverity::Warning,
            format!("Device {device}: critically low humidity, {rh:.0}%."),
        ));
    }

    if let (Some(pm25), Some(temp_c), Some(rh)) = (reading.pm25, reading.temp_c, reading.rh)
        && pm25 >= CONFIRM_PM25
        && temp_c >= CONFIRM_TEMP_C
        && rh <= CONFIRM_RH
    {
        alerts.push(Alert::new(
            AlertSeverity::Critical,
            format!("Device {device}: smoke, heat, and dryness all indicate active fire."),
        ));
    }
}
