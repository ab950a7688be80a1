//! Trend classification.
//!
//! Day-over-day movement of region aggregates, plus the least-squares
//! direction of a rolling Fire Risk Index history.

use std::collections::HashMap;

use fire_watch_analytics_models::{RegionAggregate, SeriesTrend, Trend};
use fire_watch_risk_models::FriSample;

/// Fills the trend fields of today's aggregates from a prior period.
///
/// With no prior dataset every region classifies as [`Trend::New`] with a
/// zero delta. Otherwise today is left-joined against the prior period by
/// region name; a region missing from the prior period compares against a
/// prior mean of `0.0`.
#[must_use]
pub fn apply_trend(
    today: &[RegionAggregate],
    prior: Option<&[RegionAggregate]>,
) -> Vec<RegionAggregate> {
    let Some(prior) = prior else {
        return today
            .iter()
            .map(|aggregate| RegionAggregate {
                mean_risk_prior: 0.0,
                delta: 0.0,
                trend: Trend::New,
                ..aggregate.clone()
            })
            .collect();
    };

    let prior_means: HashMap<&str, f64> = prior
        .iter()
        .map(|aggregate| (aggregate.region_name.as_str(), aggregate.mean_risk))
        .collect();

    today
        .iter()
        .map(|aggregate| {
            let mean_risk_prior = prior_means
                .get(aggregate.region_name.as_str())
                .copied()
                .unwrap_or(0.0);
            let delta = aggregate.mean_risk - mean_risk_prior;
            RegionAggregate {
                mean_risk_prior,
                delta,
                trend: Trend::from_delta(delta),
                ..aggregate.clone()
            }
        })
        .collect()
}

/// Classifies the direction of a rolling index history.
///
/// Fits a least-squares slope over (minutes since the first sample, index)
/// pairs. Returns `None` when fewer than three finite samples exist or all
/// samples share one timestamp.
#[must_use]
pub fn series_trend(samples: &[FriSample]) -> Option<SeriesTrend> {
    let usable: Vec<&FriSample> = samples.iter().filter(|s| s.fri.is_finite()).collect();
    if usable.len() < 3 {
        return None;
    }

    let first = usable[0].timestamp;
    if !usable.iter().any(|sample| sample.timestamp != first) {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let n = usable.len() as f64;
    #[allow(clippy::cast_precision_loss)]
    let xs: Vec<f64> = usable
        .iter()
        .map(|sample| (sample.timestamp - first).num_seconds() as f64 / 60.0)
        .collect();

    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = usable.iter().map(|s| s.fri).sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut variance = 0.0;
    for (x, sample) in xs.iter().zip(&usable) {
        covariance += (x - mean_x) * (sample.fri - mean_y);
        variance += (x - mean_x) * (x - mean_x);
    }
    if variance == 0.0 {
        return None;
    }

    Some(SeriesTrend::from_slope(covariance / variance))
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, Utc};
    use fire_watch_analytics_models::{RegionAggregate, SeriesTrend, Trend};
    use fire_watch_risk_models::FriSample;

    use super::{apply_trend, series_trend};

    fn aggregate(name: &str, mean: f64) -> RegionAggregate {
        RegionAggregate::new(name.to_string(), mean, mean, 5)
    }

    fn epoch() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap_or_default()
    }

    fn history(values: &[(i64, f64)]) -> Vec<FriSample> {
        values
            .iter()
            .map(|(minutes, fri)| FriSample {
                timestamp: epoch() + Duration::minutes(*minutes),
                fri: *fri,
            })
            .collect()
    }

    #[test]
    fn rising_mean_classifies_as_increasing() {
        let today = vec![aggregate("Kern", 0.72)];
        let prior = vec![aggregate("Kern", 0.60)];
        let out = apply_trend(&today, Some(&prior));
        assert_eq!(out[0].trend, Trend::Increasing);
        assert!((out[0].delta - 0.12).abs() < 1e-12);
        assert!((out[0].mean_risk_prior - 0.60).abs() < f64::EPSILON);
    }

    #[test]
    fn small_moves_classify_as_stable() {
        let today = vec![aggregate("Kern", 0.50)];
        let prior = vec![aggregate("Kern", 0.52)];
        let out = apply_trend(&today, Some(&prior));
        assert_eq!(out[0].trend, Trend::Stable);
        assert!((out[0].delta - (-0.02)).abs() < 1e-12);
    }

    #[test]
    fn no_prior_dataset_marks_every_region_new() {
        let today = vec![aggregate("Kern", 0.72), aggregate("Inyo", 0.10)];
        let out = apply_trend(&today, None);
        assert!(out.iter().all(|a| a.trend == Trend::New));
        assert!(out.iter().all(|a| (a.delta - 0.0).abs() < f64::EPSILON));
    }

    #[test]
    fn region_missing_from_prior_compares_against_zero() {
        let today = vec![aggregate("Mono", 0.40)];
        let prior = vec![aggregate("Kern", 0.60)];
        let out = apply_trend(&today, Some(&prior));
        assert!((out[0].mean_risk_prior - 0.0).abs() < f64::EPSILON);
        assert!((out[0].delta - 0.40).abs() < f64::EPSILON);
        assert_eq!(out[0].trend, Trend::Increasing);
    }

    #[test]
    fn rising_history_classifies_up() {
        let samples = history(&[(0, 100.0), (10, 110.0), (20, 121.0), (30, 133.0)]);
        assert_eq!(series_trend(&samples), Some(SeriesTrend::Up));
    }

    #[test]
    fn flat_history_classifies_flat() {
        let samples = history(&[(0, 120.0), (10, 120.1), (20, 119.9), (30, 120.0)]);
        assert_eq!(series_trend(&samples), Some(SeriesTrend::Flat));
    }

    #[test]
    fn falling_history_classifies_down() {
        let samples = history(&[(0, 200.0), (15, 180.0), (30, 155.0)]);
        assert_eq!(series_trend(&samples), Some(SeriesTrend::Down));
    }

    #[test]
    fn short_histories_are_not_classified() {
        let samples = history(&[(0, 100.0), (10, 140.0)]);
        assert_eq!(series_trend(&samples), None);
        assert_eq!(series_trend(&[]), None);
    }

    #[test]
    fn single_timestamp_histories_are_not_classified() {
        let samples = history(&[(0, 100.0), (0, 120.0), (0, 140.0)]);
        assert_eq!(series_trend(&samples), None);
    }

    #[test]
    fn non_finite_samples_are_ignored() {
        let mut samples = history(&[(0, 100.0), (10, f64::NAN)]);
        samples.extend(history(&[(20, 121.0)]));
        // Only two finite samples remain.
        assert_eq!(series_trend(&samples), None);
    }
}
