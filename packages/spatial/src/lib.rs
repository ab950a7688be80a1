#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! In-memory spatial index for region attribution.
//!
//! Builds an R-tree over region boundary polygons at startup and provides
//! fast point-in-polygon lookups. Used by the region aggregation step and
//! the decision pipeline.

use fire_watch_boundary_models::RegionBoundary;
use geo::{BoundingRect, Contains, MultiPolygon, Rect};
use geojson::GeoJson;
use rstar::{AABB, RTree, RTreeObject};

/// One indexed region: parsed polygon plus its precomputed envelope.
struct RegionEntry {
    name: String,
    envelope: AABB<[f64; 2]>,
    polygon: MultiPolygon<f64>,
}

impl RTreeObject for RegionEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Pre-built spatial index over region boundaries.
///
/// Constructed once and shared across all consumers. Provides fast
/// point-in-polygon lookups for region attribution, plus the full region
/// name list in dataset order for left-join aggregation.
pub struct RegionIndex {
    regions: RTree<RegionEntry>,
    names: Vec<String>,
}

impl RegionIndex {
    /// Builds the R-tree index from normalized boundaries.
    ///
    /// Boundaries whose geometry fails to parse are skipped with a warning
    /// rather than failing the whole index.
    #[must_use]
    pub fn build(boundaries: &[RegionBoundary]) -> Self {
        let mut entries = Vec::with_capacity(boundaries.len());
        let mut names = Vec::with_capacity(boundaries.len());

        for boundary in boundaries {
            let Some(polygon) = parse_multipolygon(&boundary.geometry_json) else {
                log::warn!("Failed to parse geometry for region {}", boundary.name);
                continue;
            };

            let envelope = envelope_of(&polygon);
            names.push(boundary.name.clone());
            entries.push(RegionEntry {
                name: boundary.name.clone(),
                envelope,
                polygon,
            });
        }

        let regions = RTree::bulk_load(entries);
        log::info!("Built spatial index over {} regions", regions.size());

        Self { regions, names }
    }

    /// Look up the region containing a point.
    ///
    /// Regions are expected to tile the dataset without overlap, so the
    /// first containing polygon wins.
    #[must_use]
    pub fn locate(&self, longitude: f64, latitude: f64) -> Option<&str> {
        let point = geo::Point::new(longitude, latitude);
        let query = AABB::from_point([longitude, latitude]);

        for entry in self.regions.locate_in_envelope_intersecting(&query) {
            if entry.polygon.contains(&point) {
                return Some(&entry.name);
            }
        }
        None
    }

    /// All indexed region names, in dataset order.
    #[must_use]
    pub fn region_names(&self) -> &[String] {
        &self.names
    }

    /// Number of indexed regions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.size()
    }

    /// Whether the index holds no regions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.size() == 0
    }
}

/// Parses a region's `GeoJSON` geometry into a [`MultiPolygon`],
/// promoting a bare `Polygon` to a single-member multi.
fn parse_multipolygon(geometry_json: &str) -> Option<MultiPolygon<f64>> {
    let GeoJson::Geometry(geometry) = geometry_json.parse().ok()? else {
        return None;
    };
    match geo::Geometry::<f64>::try_from(geometry).ok()? {
        geo::Geometry::MultiPolygon(mp) => Some(mp),
        geo::Geometry::Polygon(p) => Some(MultiPolygon(vec![p])),
        _ => None,
    }
}

/// Axis-aligned bounding box of a polygon, for R-tree insertion. An empty
/// polygon degenerates to a point envelope at the origin.
fn envelope_of(polygon: &MultiPolygon<f64>) -> AABB<[f64; 2]> {
    let rect = polygon
        .bounding_rect()
        .unwrap_or_else(|| Rect::new((0.0, 0.0), (0.0, 0.0)));
    AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y])
}

#[cfg(test)]
mod tests {
    use fire_watch_boundary_models::RegionBoundary;

    use super::RegionIndex;

    fn square_region(name: &str, min_x: f64, min_y: f64, size: f64) -> RegionBoundary {
        let max_x = min_x + size;
        let max_y = min_y + size;
        RegionBoundary {
            name: name.to_string(),
            geometry_json: format!(
                r#"{{"type":"Polygon","coordinates":[[[{min_x},{min_y}],[{max_x},{min_y}],[{max_x},{max_y}],[{min_x},{max_y}],[{min_x},{min_y}]]]}}"#
            ),
        }
    }

    #[test]
    fn locates_points_in_their_region() {
        let index = RegionIndex::build(&[
            square_region("West", 0.0, 0.0, 1.0),
            square_region("East", 2.0, 0.0, 1.0),
        ]);

        assert_eq!(index.locate(0.5, 0.5), Some("West"));
        assert_eq!(index.locate(2.5, 0.5), Some("East"));
    }

    #[test]
    fn points_outside_all_regions_are_unattributed() {
        let index = RegionIndex::build(&[square_region("Only", 0.0, 0.0, 1.0)]);
        assert_eq!(index.locate(5.0, 5.0), None);
    }

    #[test]
    fn keeps_dataset_order_in_region_names() {
        let index = RegionIndex::build(&[
            square_region("Alpha", 0.0, 0.0, 1.0),
            square_region("Beta", 2.0, 0.0, 1.0),
            square_region("Gamma", 4.0, 0.0, 1.0),
        ]);
        assert_eq!(index.region_names(), ["Alpha", "Beta", "Gamma"]);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn unparseable_geometry_is_skipped() {
        let bad = RegionBoundary {
            name: "Broken".to_string(),
            geometry_json: "not geojson".to_string(),
        };
        let index = RegionIndex::build(&[bad, square_region("Good", 0.0, 0.0, 1.0)]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.region_names(), ["Good"]);
    }

    #[test]
    fn handles_multipolygon_geometry() {
        let multi = RegionBoundary {
            name: "Islands".to_string(),
            geometry_json: r#"{"type":"MultiPolygon","coordinates":[
                [[[0.0,0.0],[1.0,0.0],[1.0,1.0],[0.0,1.0],[0.0,0.0]]],
                [[[3.0,3.0],[4.0,3.0],[4.0,4.0],[3.0,4.0],[3.0,3.0]]]
            ]}"#
                .to_string(),
        };
        let index = RegionIndex::build(&[multi]);
        assert_eq!(index.locate(0.5, 0.5), Some("Islands"));
        assert_eq!(index.locate(3.5, 3.5), Some("Islands"));
        assert_eq!(index.locate(2.0, 2.0), None);
    }

    #[test]
    fn empty_input_builds_empty_index() {
        let index = RegionIndex::build(&[]);
        assert!(index.is_empty());
        assert_eq!(index.locate(0.0, 0.0), None);
    }
}
