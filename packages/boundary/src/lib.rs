#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Region boundary loading and normalization.
//!
//! Parses a region `GeoJSON` `FeatureCollection` (WGS84), resolves the
//! region name property across known dataset naming conventions, and
//! produces normalized [`RegionBoundary`] values ready for spatial
//! indexing.

pub mod load;
pub mod normalize;

pub use load::{load_regions, parse_regions};

use fire_watch_boundary_models::RegionBoundary;
use thiserror::Error;

/// Errors that can occur while loading region boundaries.
#[derive(Debug, Error)]
pub enum BoundaryError {
    /// Reading the boundary file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// `GeoJSON` parsing failed.
    #[error("GeoJSON error: {0}")]
    Geojson(#[from] geojson::Error),

    /// The document parsed but is not a `FeatureCollection`.
    #[error("Expected a GeoJSON FeatureCollection")]
    NotAFeatureCollection,

    /// No accepted region name property was found in any feature.
    #[error("Schema error: {message}")]
    Schema {
        /// Description of the missing field and the aliases tried.
        message: String,
    },
}
