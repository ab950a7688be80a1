//! Loads region boundaries from a `GeoJSON` `FeatureCollection`.

use std::path::Path;

use fire_watch_boundary_models::{REGION_NAME_ALIASES, RegionBoundary};
use geojson::{Feature, GeoJson};

use crate::{BoundaryError, normalize};

/// Loads and normalizes region boundaries from a `GeoJSON` file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the document is not a
/// `FeatureCollection`, or no accepted region name property exists.
pub fn load_regions(path: &Path) -> Result<Vec<RegionBoundary>, BoundaryError> {
    let raw = std::fs::read_to_string(path)?;
    let regions = parse_regions(&raw)?;
    log::info!(
        "Loaded {} region boundaries from {}",
        regions.len(),
        path.display()
    );
    Ok(regions)
}

/// Parses and normalizes region boundaries from `GeoJSON` text.
///
/// # Errors
///
/// Returns an error if the document fails to parse, is not a
/// `FeatureCollection`, or no accepted region name property exists.
pub fn parse_regions(raw: &str) -> Result<Vec<RegionBoundary>, BoundaryError> {
    let geojson: GeoJson = raw.parse()?;
    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(BoundaryError::NotAFeatureCollection);
    };

    let name_key = resolve_name_key(&collection.features)?;
    log::debug!("Resolved region name property to '{name_key}'");

    let regions = normalize::normalize_features(&collection.features, name_key);
    if regions.is_empty() {
        log::warn!("Boundary dataset produced no usable regions");
    }
    Ok(regions)
}

/// Resolves which property key carries the region name.
///
/// Aliases are checked in definition order; the first one present in any
/// feature's properties wins, so datasets with per-feature property gaps
/// still resolve consistently.
fn resolve_name_key(features: &[Feature]) -> Result<&'static str, BoundaryError> {
    for alias in REGION_NAME_ALIASES {
        if features
            .iter()
            .any(|feature| feature.property(alias).is_some())
        {
            return Ok(alias);
        }
    }

    Err(BoundaryError::Schema {
        message: format!(
            "no region name property found; accepted aliases: {}",
            REGION_NAME_ALIASES.join(", ")
        ),
    })
}
