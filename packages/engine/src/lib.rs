#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Decision pipeline.
//!
//! Composes the ingestion, clustering, aggregation, trend, fusion, and
//! alerting crates into one `decide()` call producing a serializable
//! [`DecisionReport`]. File paths and tuning come from an
//! [`EngineConfig`]; boundary data is loaded once into an
//! [`EngineContext`] and shared by reference across calls.

use thiserror::Error;

pub mod config;
pub mod context;
pub mod pipeline;
pub mod report;

pub use config::{
    CONFIG_ENV, DEFAULT_CONFIG_PATH, EngineConfig, HotspotSection, resolve_config_path,
};
pub use context::EngineContext;
pub use pipeline::{
    decide, decide_with_inputs, load_prior_table, load_prior_table_with_progress, load_readings,
    load_table, load_table_with_progress,
};
pub use report::{DecisionFlags, DecisionReport};

/// Error type for configuration loading and pipeline runs.
#[derive(Debug, Error)]
pub enum EngineError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config parse error
    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// Grid ingestion error
    #[error("Grid error: {0}")]
    Grid(#[from] fire_watch_grid::GridError),

    /// Boundary loading error
    #[error("Boundary error: {0}")]
    Boundary(#[from] fire_watch_boundary::BoundaryError),
}
