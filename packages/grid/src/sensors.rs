//! Field sensor table ingestion.
//!
//! Loads a sensor readings CSV (`device_id`, `lat`, `lon` required; the
//! measurement channels optional) and deduplicates to the latest reading
//! per device.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};
use fire_watch_risk_models::SensorReading;

use crate::GridError;
use crate::schema::{LAT_ALIASES, LON_ALIASES};

/// Resolved column positions for one sensor table.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SensorSchema {
    device_id: usize,
    latitude: usize,
    longitude: usize,
    pm25: Option<usize>,
    temp_c: Option<usize>,
    rh: Option<usize>,
    battery_v: Option<usize>,
    rssi: Option<usize>,
    timestamp: Option<usize>,
}

impl SensorSchema {
    fn detect(headers: &[String]) -> Result<Self, GridError> {
        let lowered: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
        let find = |aliases: &[&str]| {
            lowered
                .iter()
                .position(|header| aliases.contains(&header.as_str()))
        };

        let device_id = find(&["device_id"]).ok_or_else(|| GridError::Schema {
            message: "no device_id column found in sensor table".to_string(),
        })?;
        let latitude = find(&LAT_ALIASES).ok_or_else(|| GridError::Schema {
            message: format!(
                "no latitude column found in sensor table; accepted aliases: {}",
                LAT_ALIASES.join(", ")
            ),
        })?;
        let longitude = find(&LON_ALIASES).ok_or_else(|| GridError::Schema {
            message: format!(
                "no longitude column found in sensor table; accepted aliases: {}",
                LON_ALIASES.join(", ")
            ),
        })?;

        Ok(Self {
            device_id,
            latitude,
            longitude,
            pm25: find(&["pm25"]),
            temp_c: find(&["temp_c"]),
            rh: find(&["rh"]),
            battery_v: find(&["battery_v"]),
            rssi: find(&["rssi"]),
            timestamp: find(&["timestamp_utc", "timestamp"]),
        })
    }
}

/// Loads sensor readings from a CSV file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, the CSV is malformed,
/// or a required column is missing.
pub fn load_sensors(path: &Path) -> Result<Vec<SensorReading>, GridError> {
    let file = std::fs::File::open(path)?;
    let readings = parse_sensors(file)?;
    log::info!(
        "Loaded {} sensor readings from {}",
        readings.len(),
        path.display()
    );
    Ok(readings)
}

/// Parses sensor readings from any CSV reader.
///
/// Rows with unusable coordinates are dropped. Readings keep file order.
///
/// # Errors
///
/// Returns an error if the CSV is malformed or a required column is
/// missing.
pub fn parse_sensors<R: Read>(reader: R) -> Result<Vec<SensorReading>, GridError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_owned())
        .collect();
    let schema = SensorSchema::detect(&headers)?;

    let mut readings = Vec::new();
    for result in reader.records() {
        let record = result?;
        if let Some(reading) = convert_row(&record, &schema) {
            readings.push(reading);
        }
    }

    if readings.is_empty() {
        log::warn!("Sensor table contains no usable readings");
    }
    Ok(readings)
}

/// Latest reading per device, ordered by device id.
///
/// Timestamped readings beat untimestamped ones; among equal timestamps
/// the later file position wins.
#[must_use]
pub fn latest_per_device(readings: &[SensorReading]) -> Vec<SensorReading> {
    let mut latest: BTreeMap<&str, &SensorReading> = BTreeMap::new();

    for reading in readings {
        match latest.get(reading.device_id.as_str()) {
            Some(current) if reading.timestamp < current.timestamp => {}
            _ => {
                latest.insert(&reading.device_id, reading);
            }
        }
    }

    latest.into_values().cloned().collect()
}

fn convert_row(record: &csv::StringRecord, schema: &SensorSchema) -> Option<SensorReading> {
    let device_id = record.get(schema.device_id)?.trim();
    if device_id.is_empty() {
        return None;
    }

    let latitude = parse_field(record, Some(schema.latitude))?;
    let longitude = parse_field(record, Some(schema.longitude))?;

    let mut reading = SensorReading::new(device_id.to_string(), latitude, longitude);
    reading.pm25 = parse_field(record, schema.pm25);
    reading.temp_c = parse_field(record, schema.temp_c);
    reading.rh = parse_field(record, schema.rh);
    reading.battery_v = parse_field(record, schema.battery_v);
    reading.rssi = parse_field(record, schema.rssi);
    reading.timestamp = schema
        .timestamp
        .and_then(|i| record.get(i))
        .and_then(parse_timestamp);

    Some(reading)
}

/// Parses a numeric field. Returns `None` if the column is absent, the
/// value is empty or unparseable, or the value is non-finite.
fn parse_field(record: &csv::StringRecord, index: Option<usize>) -> Option<f64> {
    let raw = record.get(index?)?.trim();
    if raw.is_empty() {
        return None;
    }
    let value = raw.parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

/// Parses an ISO 8601 timestamp (with optional fractional seconds or a
/// trailing `Z`), treating naive values as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim().trim_end_matches('Z');
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    None
}
