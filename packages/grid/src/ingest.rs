//! Risk grid table ingestion.
//!
//! Converts raw CSV rows into typed [`RiskCell`] values using a
//! [`GridSchema`] resolved once from the header row. Rows with unusable
//! coordinates or scores are dropped and counted rather than failing the
//! whole table.

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use fire_watch_risk_models::{RiskCell, RiskLevel};
use serde::{Deserialize, Serialize};

use crate::progress::{ProgressSink, discard};
use crate::{GridError, GridSchema};

/// Per-table ingestion counters, reported alongside the loaded cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestStats {
    /// Data rows read from the file.
    pub rows_read: usize,
    /// Rows converted into usable cells.
    pub cells_kept: usize,
    /// Rows dropped for missing or non-finite coordinates.
    pub missing_coordinates: usize,
    /// Scores outside `[0.0, 1.0]` that were clamped.
    pub clamped_scores: usize,
    /// Rows dropped for missing or non-finite scores.
    pub dropped_scores: usize,
}

/// A loaded risk grid table.
#[derive(Debug, Clone)]
pub struct RiskTable {
    cells: Vec<RiskCell>,
    stats: IngestStats,
}

impl RiskTable {
    /// Loads a risk table from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, the CSV is
    /// malformed, or required columns are missing.
    pub fn from_csv_path(path: &Path) -> Result<Self, GridError> {
        Self::from_csv_path_with_progress(path, &discard())
    }

    /// Loads a risk table from a CSV file, reporting per-row progress
    /// through `progress`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, the CSV is
    /// malformed, or required columns are missing.
    pub fn from_csv_path_with_progress(
        path: &Path,
        progress: &Arc<dyn ProgressSink>,
    ) -> Result<Self, GridError> {
        let file = std::fs::File::open(path)?;
        let table = Self::from_reader_with_progress(file, progress)?;
        log::info!(
            "Loaded {} risk cells from {} ({} rows read)",
            table.cells.len(),
            path.display(),
            table.stats.rows_read
        );
        Ok(table)
    }

    /// Parses a risk table from any CSV reader.
    ///
    /// # Errors
    ///
    /// Returns an error if the CSV is malformed or required columns are
    /// missing.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, GridError> {
        Self::from_reader_with_progress(reader, &discard())
    }

    /// Parses a risk table from any CSV reader, reporting per-row
    /// progress through `progress`.
    ///
    /// # Errors
    ///
    /// Returns an error if the CSV is malformed or required columns are
    /// missing.
    pub fn from_reader_with_progress<R: Read>(
        reader: R,
        progress: &Arc<dyn ProgressSink>,
    ) -> Result<Self, GridError> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_owned())
            .collect();
        let schema = GridSchema::detect(&headers)?;

        let mut cells = Vec::new();
        let mut stats = IngestStats::default();

        for result in reader.records() {
            let record = result?;
            stats.rows_read += 1;
            progress.inc(1);
            if let Some(cell) = convert_row(&record, &schema, &mut stats) {
                cells.push(cell);
            }
        }
        stats.cells_kept = cells.len();

        if cells.is_empty() {
            log::warn!("Risk table contains no usable cells");
        }

        progress.finish(format!(
            "{} cells loaded ({} rows read)",
            stats.cells_kept, stats.rows_read
        ));

        Ok(Self { cells, stats })
    }

    /// Wraps already-typed cells, for feeds that bypass CSV.
    #[must_use]
    pub fn from_cells(cells: Vec<RiskCell>) -> Self {
        let stats = IngestStats {
            rows_read: cells.len(),
            cells_kept: cells.len(),
            ..IngestStats::default()
        };
        Self { cells, stats }
    }

    /// The loaded cells, in file order.
    #[must_use]
    pub fn cells(&self) -> &[RiskCell] {
        &self.cells
    }

    /// Ingestion counters for this table.
    #[must_use]
    pub const fn stats(&self) -> &IngestStats {
        &self.stats
    }

    /// Number of loaded cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the table holds no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells with a risk score at or above `threshold`.
    #[must_use]
    pub fn select_above(&self, threshold: f64) -> Vec<RiskCell> {
        select_above(&self.cells, threshold)
    }

    /// Mean risk score across all cells, or `None` for an empty table.
    #[must_use]
    pub fn mean_score(&self) -> Option<f64> {
        if self.cells.is_empty() {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let mean = self.cells.iter().map(|c| c.risk_score).sum::<f64>() / self.cells.len() as f64;
        Some(mean)
    }
}

/// Cells with a risk score at or above `threshold` (inclusive).
#[must_use]
pub fn select_above(cells: &[RiskCell], threshold: f64) -> Vec<RiskCell> {
    cells
        .iter()
        .filter(|cell| cell.risk_score >= threshold)
        .cloned()
        .collect()
}

/// Converts one CSV row, updating drop counters for unusable rows.
fn convert_row(
    record: &csv::StringRecord,
    schema: &GridSchema,
    stats: &mut IngestStats,
) -> Option<RiskCell> {
    let latitude = parse_field(record, schema.latitude);
    let longitude = parse_field(record, schema.longitude);
    let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
        stats.missing_coordinates += 1;
        return None;
    };

    let Some(raw_score) = parse_field(record, schema.risk_score) else {
        stats.dropped_scores += 1;
        log::warn!("Dropped row at ({latitude}, {longitude}): missing or non-numeric risk score");
        return None;
    };

    let risk_score = if (0.0..=1.0).contains(&raw_score) {
        raw_score
    } else {
        stats.clamped_scores += 1;
        let clamped = raw_score.clamp(0.0, 1.0);
        log::warn!("Clamped out-of-range risk score {raw_score} to {clamped}");
        clamped
    };

    // A pre-banded level from the dataset wins; otherwise band from the
    // final score.
    let risk_level = schema
        .risk_level
        .and_then(|i| record.get(i))
        .and_then(|raw| raw.trim().to_uppercase().parse::<RiskLevel>().ok())
        .unwrap_or_else(|| RiskLevel::from_score(risk_score));

    let date = schema.date.and_then(|i| record.get(i)).and_then(parse_date);

    Some(RiskCell {
        latitude,
        longitude,
        risk_score,
        risk_level,
        date,
    })
}

/// Parses a numeric field. Returns `None` if missing, empty, unparseable,
/// or non-finite.
fn parse_field(record: &csv::StringRecord, index: usize) -> Option<f64> {
    let raw = record.get(index)?.trim();
    if raw.is_empty() {
        return None;
    }
    let value = raw.parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

/// Parses a forecast date (plain date or ISO 8601 datetime).
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    None
}
