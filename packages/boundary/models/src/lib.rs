#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Region boundary types.
//!
//! Defines the normalized boundary produced after parsing a region
//! `GeoJSON` dataset, and the property-name aliases accepted when
//! resolving the region name field.

use serde::{Deserialize, Serialize};

/// Property keys accepted as the region name field, checked in order.
///
/// Covers the field naming of GADM exports (`NAME_1`, `VARNAME_1`,
/// `NL_NAME_1`), plain `GeoJSON` conventions (`name`, `NAME`, `NAME_EN`),
/// and US state datasets (`state`, `STATE`).
pub const REGION_NAME_ALIASES: [&str; 8] = [
    "NAME_1", "name", "NAME", "state", "STATE", "VARNAME_1", "NL_NAME_1", "NAME_EN",
];

/// A normalized region boundary, ready for spatial indexing.
///
/// Geometry is kept as a `GeoJSON` string so the models crate stays free
/// of geometry dependencies; the spatial index parses it when building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionBoundary {
    /// Canonical region name, unique per dataset.
    pub name: String,
    /// `GeoJSON` Polygon or `MultiPolygon` geometry as a JSON string.
    pub geometry_json: String,
}

impl RegionBoundary {
    /// Returns the canonical region name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}
