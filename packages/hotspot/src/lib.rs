#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Density-based hotspot clustering.
//!
//! Groups high-risk grid cells into spatial clusters with DBSCAN over
//! (longitude, latitude) degree coordinates, using an R-tree for the
//! neighborhood queries. Noise points are dropped; surviving points carry
//! a cluster id stable within one invocation.

use std::collections::{BTreeMap, VecDeque};

use fire_watch_risk_models::RiskCell;
use rstar::{RTree, primitives::GeomWithData};
use serde::{Deserialize, Serialize};

/// Kilometers per degree of latitude. Used to convert the `eps_km` radius
/// into degrees; a flat-earth approximation valid at single-country scale
/// at moderate latitudes.
pub const KM_PER_DEGREE: f64 = 111.0;

/// Default neighborhood radius in kilometers.
pub const DEFAULT_EPS_KM: f64 = 25.0;

/// Default minimum neighborhood size for a core point (self included).
pub const DEFAULT_MIN_SAMPLES: usize = 10;

/// Default risk score threshold for hotspot candidates.
pub const DEFAULT_THRESHOLD: f64 = 0.7;

/// Clustering parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HotspotParams {
    /// Neighborhood radius in kilometers.
    pub eps_km: f64,
    /// Minimum points (self included) within `eps_km` for a core point.
    pub min_samples: usize,
    /// Minimum risk score for a cell to participate.
    pub threshold: f64,
}

impl Default for HotspotParams {
    fn default() -> Self {
        Self {
            eps_km: DEFAULT_EPS_KM,
            min_samples: DEFAULT_MIN_SAMPLES,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// One detected hotspot cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotspotCluster {
    /// Cluster label, stable within one invocation only.
    pub cluster_id: usize,
    /// Member cells, in input order.
    pub cells: Vec<RiskCell>,
}

impl HotspotCluster {
    /// Number of member cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Mean (latitude, longitude) of the member cells.
    #[must_use]
    pub fn centroid(&self) -> (f64, f64) {
        if self.cells.is_empty() {
            return (0.0, 0.0);
        }
        #[allow(clippy::cast_precision_loss)]
        let n = self.cells.len() as f64;
        let lat = self.cells.iter().map(|c| c.latitude).sum::<f64>() / n;
        let lon = self.cells.iter().map(|c| c.longitude).sum::<f64>() / n;
        (lat, lon)
    }

    /// Mean risk score of the member cells.
    #[must_use]
    pub fn mean_risk(&self) -> f64 {
        if self.cells.is_empty() {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let n = self.cells.len() as f64;
        self.cells.iter().map(|c| c.risk_score).sum::<f64>() / n
    }

    /// Highest risk score among the member cells.
    #[must_use]
    pub fn max_risk(&self) -> f64 {
        self.cells.iter().map(|c| c.risk_score).fold(0.0, f64::max)
    }
}

/// Selects cells at or above the risk threshold and clusters them.
///
/// Cells with non-finite coordinates are excluded before indexing.
#[must_use]
pub fn detect_hotspots(cells: &[RiskCell], params: &HotspotParams) -> Vec<HotspotCluster> {
    let selected: Vec<RiskCell> = cells
        .iter()
        .filter(|cell| {
            cell.risk_score >= params.threshold
                && cell.latitude.is_finite()
                && cell.longitude.is_finite()
        })
        .cloned()
        .collect();

    log::debug!(
        "{} of {} cells above threshold {}",
        selected.len(),
        cells.len(),
        params.threshold
    );

    let clusters = cluster(&selected, params.eps_km, params.min_samples);
    log::info!(
        "Detected {} hotspot clusters from {} candidate cells",
        clusters.len(),
        selected.len()
    );
    clusters
}

/// Clusters already-selected cells with DBSCAN.
///
/// A point is a core point when at least `min_samples` points (itself
/// included) lie within `eps_km` of it. Noise points are dropped. Cluster
/// ids are assigned in input-scan order starting at 0.
#[must_use]
pub fn cluster(cells: &[RiskCell], eps_km: f64, min_samples: usize) -> Vec<HotspotCluster> {
    if cells.is_empty() {
        return Vec::new();
    }

    let points: Vec<[f64; 2]> = cells
        .iter()
        .map(|cell| [cell.longitude, cell.latitude])
        .collect();
    let eps_deg = eps_km / KM_PER_DEGREE;
    let labels = dbscan_labels(&points, eps_deg, min_samples);

    let mut members: BTreeMap<usize, Vec<RiskCell>> = BTreeMap::new();
    for (cell, label) in cells.iter().zip(&labels) {
        if let Some(cluster_id) = label {
            members.entry(*cluster_id).or_default().push(cell.clone());
        }
    }

    members
        .into_iter()
        .map(|(cluster_id, cells)| HotspotCluster { cluster_id, cells })
        .collect()
}

/// DBSCAN labeling over degree coordinates. `None` marks noise.
fn dbscan_labels(points: &[[f64; 2]], eps_deg: f64, min_samples: usize) -> Vec<Option<usize>> {
    let indexed: Vec<GeomWithData<[f64; 2], usize>> = points
        .iter()
        .enumerate()
        .map(|(i, point)| GeomWithData::new(*point, i))
        .collect();
    let tree = RTree::bulk_load(indexed);
    let eps_sq = eps_deg * eps_deg;

    let neighbors = |i: usize| -> Vec<usize> {
        tree.locate_within_distance(points[i], eps_sq)
            .map(|entry| entry.data)
            .collect()
    };

    let mut labels: Vec<Option<usize>> = vec![None; points.len()];
    let mut visited = vec![false; points.len()];
    let mut next_cluster = 0_usize;

    for start in 0..points.len() {
        if visited[start] {
            continue;
        }
        visited[start] = true;

        let seed_neighbors = neighbors(start);
        if seed_neighbors.len() < min_samples {
            // Provisionally noise; a later core point may still claim it.
            continue;
        }

        labels[start] = Some(next_cluster);
        let mut seeds: VecDeque<usize> = seed_neighbors.into_iter().collect();

        while let Some(point) = seeds.pop_front() {
            if labels[point].is_none() {
                labels[point] = Some(next_cluster);
            } else if labels[point] != Some(next_cluster) {
                // Border of an earlier cluster; first assignment wins.
                continue;
            }

            if visited[point] {
                continue;
            }
            visited[point] = true;

            let expansion = neighbors(point);
            if expansion.len() >= min_samples {
                seeds.extend(expansion);
            }
        }

        next_cluster += 1;
    }

    labels
}

#[cfg(test)]
mod tests {
    use fire_watch_risk_models::RiskCell;

    use super::{HotspotParams, KM_PER_DEGREE, cluster, detect_hotspots};

    fn cell(lat: f64, lon: f64, score: f64) -> RiskCell {
        RiskCell::new(lat, lon, score)
    }

    /// Memberships as sorted coordinate lists, for order-insensitive
    /// partition comparison.
    #[allow(clippy::cast_possible_truncation)]
    fn memberships(clusters: &[super::HotspotCluster]) -> Vec<Vec<(i64, i64)>> {
        let mut out: Vec<Vec<(i64, i64)>> = clusters
            .iter()
            .map(|c| {
                let mut coords: Vec<(i64, i64)> = c
                    .cells
                    .iter()
                    .map(|cell| ((cell.latitude * 1e6) as i64, (cell.longitude * 1e6) as i64))
                    .collect();
                coords.sort_unstable();
                coords
            })
            .collect();
        out.sort();
        out
    }

    #[test]
    fn empty_input_yields_no_clusters() {
        assert!(cluster(&[], 25.0, 10).is_empty());
        assert!(detect_hotspots(&[], &HotspotParams::default()).is_empty());
    }

    #[test]
    fn dense_blob_forms_one_cluster_and_scattered_points_are_noise() {
        let mut cells = Vec::new();

        // 40 high-risk cells inside roughly 5 km.
        for i in 0..40 {
            cells.push(cell(34.0 + f64::from(i) * 0.001, -118.0, 0.85));
        }
        // 15 scattered high-risk cells, pairwise more than a degree apart.
        for i in 0..15 {
            cells.push(cell(20.0 + f64::from(i) * 1.5, -100.0, 0.9));
        }
        // Background below the threshold.
        for i in 0..945 {
            let row = f64::from(i / 35);
            let col = f64::from(i % 35);
            cells.push(cell(30.0 + row * 0.3, -125.0 + col * 0.3, 0.3));
        }
        assert_eq!(cells.len(), 1000);

        let clusters = detect_hotspots(&cells, &HotspotParams::default());
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].cell_count(), 40);
        assert_eq!(clusters[0].cluster_id, 0);
    }

    #[test]
    fn clustering_is_idempotent() {
        let mut cells = Vec::new();
        for i in 0..20 {
            cells.push(cell(34.0 + f64::from(i) * 0.002, -118.0, 0.8));
        }
        for i in 0..20 {
            cells.push(cell(37.0 + f64::from(i) * 0.002, -121.0, 0.8));
        }

        let params = HotspotParams {
            eps_km: 25.0,
            min_samples: 5,
            threshold: 0.7,
        };
        let first = detect_hotspots(&cells, &params);
        let second = detect_hotspots(&cells, &params);
        assert_eq!(memberships(&first), memberships(&second));
    }

    #[test]
    fn separated_blobs_get_increasing_ids_in_scan_order() {
        let mut cells = Vec::new();
        for i in 0..6 {
            cells.push(cell(34.0 + f64::from(i) * 0.001, -118.0, 0.9));
        }
        for i in 0..6 {
            cells.push(cell(40.0 + f64::from(i) * 0.001, -110.0, 0.9));
        }

        let clusters = cluster(&cells, 25.0, 4);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].cluster_id, 0);
        assert_eq!(clusters[1].cluster_id, 1);
        assert!((clusters[0].centroid().0 - 34.0025).abs() < 1e-9);
        assert!((clusters[1].centroid().0 - 40.0025).abs() < 1e-9);
    }

    #[test]
    fn early_noise_is_reclaimed_as_border_by_a_later_core() {
        // A sees only {A, B}; B sees all three. With min_samples 3, A is
        // provisionally noise until B's expansion claims it.
        let cells = vec![
            cell(0.0, 0.0, 0.9),
            cell(0.0, 0.2, 0.9),
            cell(0.0, 0.4, 0.9),
        ];
        let eps_km = 0.25 * KM_PER_DEGREE;

        let clusters = cluster(&cells, eps_km, 3);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].cell_count(), 3);
    }

    #[test]
    fn isolated_points_below_min_samples_are_dropped() {
        let cells = vec![
            cell(10.0, 10.0, 0.9),
            cell(20.0, 20.0, 0.9),
            cell(30.0, 30.0, 0.9),
        ];
        assert!(cluster(&cells, 25.0, 2).is_empty());
    }

    #[test]
    fn min_samples_counts_the_point_itself() {
        // Two points within eps: each neighborhood is exactly 2.
        let cells = vec![cell(0.0, 0.0, 0.9), cell(0.0, 0.1, 0.9)];
        let eps_km = 0.15 * KM_PER_DEGREE;

        assert_eq!(cluster(&cells, eps_km, 2).len(), 1);
        assert!(cluster(&cells, eps_km, 3).is_empty());
    }

    #[test]
    fn threshold_filters_before_clustering() {
        let mut cells = Vec::new();
        for i in 0..10 {
            cells.push(cell(34.0 + f64::from(i) * 0.001, -118.0, 0.65));
        }
        let params = HotspotParams {
            eps_km: 25.0,
            min_samples: 5,
            threshold: 0.7,
        };
        assert!(detect_hotspots(&cells, &params).is_empty());
    }

    #[test]
    fn cluster_statistics() {
        let cells = vec![
            cell(0.0, 0.0, 0.7),
            cell(0.0, 0.001, 0.8),
            cell(0.001, 0.0, 0.9),
        ];
        let clusters = cluster(&cells, 25.0, 3);
        assert_eq!(clusters.len(), 1);
        let hotspot = &clusters[0];
        assert!((hotspot.mean_risk() - 0.8).abs() < 1e-12);
        assert!((hotspot.max_risk() - 0.9).abs() < f64::EPSILON);
    }
}
