//! Normalizes `GeoJSON` features into [`RegionBoundary`] values.
//!
//! Extracts the region name from the resolved property key and keeps the
//! geometry as a `GeoJSON` string for the spatial index to parse.

use std::collections::BTreeSet;

use fire_watch_boundary_models::RegionBoundary;
use geojson::{Feature, Value};

/// Normalizes a list of features into boundaries.
///
/// Skips features with missing or empty names, non-areal geometries, and
/// duplicate names (first occurrence wins).
#[must_use]
pub fn normalize_features(features: &[Feature], name_key: &str) -> Vec<RegionBoundary> {
    let mut seen = BTreeSet::new();
    let mut regions = Vec::new();

    for feature in features {
        let Some(region) = normalize_feature(feature, name_key) else {
            continue;
        };
        if seen.insert(region.name.clone()) {
            regions.push(region);
        } else {
            log::warn!("Duplicate region name '{}' skipped", region.name);
        }
    }

    regions
}

/// Normalizes a single feature.
fn normalize_feature(feature: &Feature, name_key: &str) -> Option<RegionBoundary> {
    let name = feature
        .property(name_key)?
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())?
        .to_string();

    let geometry = feature.geometry.as_ref()?;
    if !matches!(geometry.value, Value::Polygon(_) | Value::MultiPolygon(_)) {
        log::warn!("Region '{name}' has non-areal geometry, skipped");
        return None;
    }

    let geometry_json = serde_json::to_string(geometry).ok()?;

    Some(RegionBoundary {
        name,
        geometry_json,
    })
}

#[cfg(test)]
mod tests {
    use geojson::{Feature, Geometry, Value};
    use serde_json::json;

    use super::normalize_features;

    fn feature(name: Option<&str>, geometry: Option<Geometry>) -> Feature {
        let mut properties = serde_json::Map::new();
        if let Some(name) = name {
            properties.insert("name".to_string(), json!(name));
        }
        Feature {
            bbox: None,
            geometry,
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }

    fn square() -> Geometry {
        Geometry::new(Value::Polygon(vec![vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![1.0, 1.0],
            vec![0.0, 1.0],
            vec![0.0, 0.0],
        ]]))
    }

    #[test]
    fn keeps_named_areal_features() {
        let regions = normalize_features(&[feature(Some("Plumas"), Some(square()))], "name");
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].name, "Plumas");
        assert!(regions[0].geometry_json.contains("Polygon"));
    }

    #[test]
    fn trims_names_and_skips_empty() {
        let regions = normalize_features(
            &[
                feature(Some("  Shasta  "), Some(square())),
                feature(Some("   "), Some(square())),
                feature(None, Some(square())),
            ],
            "name",
        );
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].name, "Shasta");
    }

    #[test]
    fn skips_missing_and_point_geometries() {
        let point = Geometry::new(Value::Point(vec![0.5, 0.5]));
        let regions = normalize_features(
            &[
                feature(Some("NoGeometry"), None),
                feature(Some("JustAPoint"), Some(point)),
            ],
            "name",
        );
        assert!(regions.is_empty());
    }

    #[test]
    fn first_duplicate_name_wins() {
        let regions = normalize_features(
            &[
                feature(Some("Butte"), Some(square())),
                feature(Some("Butte"), Some(square())),
            ],
            "name",
        );
        assert_eq!(regions.len(), 1);
    }
}
