#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Climate and sensor risk fusion.
//!
//! Combines a normalized climate risk score with an optional ground-truth
//! sensor score into one fused score and a discrete decision level. The
//! sensor-absent behavior is an explicit [`FallbackPolicy`] rather than an
//! implicit rule.

pub mod sensor;

pub use sensor::{latest_score, sensor_score};

use fire_watch_risk_models::{FusionLevel, clamp_unit};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Weight of the climate score when a sensor score is present.
pub const CLIMATE_WEIGHT: f64 = 0.60;

/// Weight of the sensor score when present.
pub const SENSOR_WEIGHT: f64 = 0.40;

/// Multiplier applied under [`FallbackPolicy::Discounted`].
pub const FALLBACK_DISCOUNT: f64 = 0.90;

/// How fusion behaves when no sensor score is available.
///
/// Every surface in this workspace defaults to pass-through; the discount
/// variant exists only as explicit configuration.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FallbackPolicy {
    /// Fused score equals the climate score.
    #[default]
    PassThrough,
    /// Fused score is `0.90 x` the climate score, reflecting reduced
    /// confidence without ground truth.
    Discounted,
}

/// One fusion decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FusionResult {
    /// Normalized climate score, after clamping.
    pub climate_score: f64,
    /// Normalized sensor score, when one was available.
    pub sensor_score: Option<f64>,
    /// Combined score in `[0.0, 1.0]`.
    pub fused_score: f64,
    /// Banded decision level of the fused score.
    pub level: FusionLevel,
}

/// Fuses a climate score with an optional sensor score under the
/// pass-through fallback.
#[must_use]
pub fn fuse(climate_score: f64, sensor_score: Option<f64>) -> FusionResult {
    fuse_with_policy(climate_score, sensor_score, FallbackPolicy::PassThrough)
}

/// Fuses a climate score with an optional sensor score.
///
/// Both inputs are clamped to the unit interval first. With a sensor
/// score present the result is the `0.60 / 0.40` weighted combination;
/// otherwise the fallback policy decides. The fused score is monotonic
/// non-decreasing in both inputs.
#[must_use]
pub fn fuse_with_policy(
    climate_score: f64,
    sensor_score: Option<f64>,
    policy: FallbackPolicy,
) -> FusionResult {
    let climate_score = clamp_unit(climate_score);
    let sensor_score = sensor_score.map(clamp_unit);

    let fused_score = match (sensor_score, policy) {
        (Some(sensor), _) => clamp_unit(CLIMATE_WEIGHT * climate_score + SENSOR_WEIGHT * sensor),
        (None, FallbackPolicy::PassThrough) => climate_score,
        (None, FallbackPolicy::Discounted) => clamp_unit(FALLBACK_DISCOUNT * climate_score),
    };

    let level = FusionLevel::from_score(fused_score);
    log::debug!(
        "Fused climate {climate_score:.3} with sensor {sensor_score:?} -> {fused_score:.3} ({level})"
    );

    FusionResult {
        climate_score,
        sensor_score,
        fused_score,
        level,
    }
}
