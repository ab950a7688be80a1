#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Risk grid ingestion.
//!
//! Loads per-cell climate risk tables and field sensor tables from CSV,
//! resolving column naming variants once at the ingestion boundary so the
//! rest of the engine works with typed records. Also provides threshold
//! selection over the loaded grid.

pub mod ingest;
pub mod progress;
pub mod schema;
pub mod sensors;

pub use ingest::{IngestStats, RiskTable, select_above};
pub use schema::GridSchema;

use thiserror::Error;

/// Errors that can occur during grid ingestion.
#[derive(Debug, Error)]
pub enum GridError {
    /// Reading the input file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is missing from the header row.
    #[error("Schema error: {message}")]
    Schema {
        /// Description of the missing column and the aliases tried.
        message: String,
    },
}
