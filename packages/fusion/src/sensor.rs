//! Ground-truth sensor score derivation.
//!
//! Maps the latest field sensor reading onto the unit interval with a
//! tiered contribution per signal. The highest matching tier wins per
//! signal; contributions are summed and clamped. These tiers feed the
//! fusion input and are distinct from the per-device alert tiers.

use fire_watch_risk_models::{SensorReading, clamp_unit};

/// Derives a normalized risk score from one sensor reading.
///
/// Returns `None` when none of pm2.5, humidity, or temperature carries a
/// finite value; a reading with finite but calm values scores `Some(0.0)`.
#[must_use]
pub fn sensor_score(reading: &SensorReading) -> Option<f64> {
    let mut score = 0.0;
    let mut usable = false;

    if let Some(pm25) = finite(reading.pm25) {
        usable = true;
        score += if pm25 >= 600.0 {
            0.60
        } else if pm25 >= 200.0 {
            0.40
        } else if pm25 >= 80.0 {
            0.25
        } else {
            0.0
        };
    }

    if let Some(rh) = finite(reading.rh) {
        usable = true;
        score += if rh < 15.0 {
            0.35
        } else if rh < 30.0 {
            0.25
        } else if rh < 45.0 {
            0.10
        } else {
            0.0
        };
    }

    if let Some(temp_c) = finite(reading.temp_c) {
        usable = true;
        score += if temp_c > 55.0 {
            0.25
        } else if temp_c > 40.0 {
            0.18
        } else if temp_c > 32.0 {
            0.10
        } else {
            0.0
        };
    }

    usable.then(|| clamp_unit(score))
}

/// Derives the fusion input from a sensor feed: the score of the most
/// recent reading.
///
/// Readings without timestamps sort before timestamped ones; among equal
/// timestamps the later slice position wins. Returns `None` for an empty
/// feed or when the latest reading carries no usable signal.
#[must_use]
pub fn latest_score(readings: &[SensorReading]) -> Option<f64> {
    let latest = readings
        .iter()
        .enumerate()
        .max_by_key(|(position, reading)| (reading.timestamp, *position))
        .map(|(_, reading)| reading)?;

    let score = sensor_score(latest);
    if score.is_none() {
        log::warn!(
            "Latest reading from device {} carries no usable signal",
            latest.device_id
        );
    }
    score
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}
