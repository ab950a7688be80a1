//! Fire Risk Index display scale. The engine computes on the unit interval;
//! operator-facing surfaces show the same quantity on a 0 to 300 scale with
//! its own banding.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::clamp_unit;

/// Upper bound of the display scale.
pub const FRI_MAX: f64 = 300.0;

/// Banded classification of a Fire Risk Index value.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum FriLevel {
    /// Index below 80.
    Low,
    /// Index in `[80, 150)`.
    Moderate,
    /// Index in `[150, 220)`.
    High,
    /// Index of 220 or above.
    Extreme,
}

impl FriLevel {
    /// Bands an index value. Out-of-range input is clamped first.
    #[must_use]
    pub fn from_fri(fri: f64) -> Self {
        let fri = clamp(fri);
        if fri < 80.0 {
            Self::Low
        } else if fri < 150.0 {
            Self::Moderate
        } else if fri < 220.0 {
            Self::High
        } else {
            Self::Extreme
        }
    }
}

/// Clamps an index value to `[0.0, 300.0]`. Non-finite input maps to `0.0`.
#[must_use]
pub fn clamp(fri: f64) -> f64 {
    if fri.is_finite() {
        fri.clamp(0.0, FRI_MAX)
    } else {
        0.0
    }
}

/// Converts a unit-interval score to the display scale.
#[must_use]
pub fn from_unit(score: f64) -> f64 {
    clamp_unit(score) * FRI_MAX
}

/// Converts a display-scale index back to the unit interval.
#[must_use]
pub fn to_unit(fri: f64) -> f64 {
    clamp(fri) / FRI_MAX
}

#[cfg(test)]
mod tests {
    use super::{FriLevel, clamp, from_unit, to_unit};

    #[test]
    fn bands_at_thresholds() {
        assert_eq!(FriLevel::from_fri(0.0), FriLevel::Low);
        assert_eq!(FriLevel::from_fri(79.9), FriLevel::Low);
        assert_eq!(FriLevel::from_fri(80.0), FriLevel::Moderate);
        assert_eq!(FriLevel::from_fri(150.0), FriLevel::High);
        assert_eq!(FriLevel::from_fri(219.9), FriLevel::High);
        assert_eq!(FriLevel::from_fri(220.0), FriLevel::Extreme);
        assert_eq!(FriLevel::from_fri(300.0), FriLevel::Extreme);
    }

    #[test]
    fn clamps_before_banding() {
        assert_eq!(FriLevel::from_fri(-40.0), FriLevel::Low);
        assert_eq!(FriLevel::from_fri(900.0), FriLevel::Extreme);
        assert_eq!(FriLevel::from_fri(f64::NAN), FriLevel::Low);
    }

    #[test]
    fn converts_between_scales() {
        assert!((from_unit(0.5) - 150.0).abs() < f64::EPSILON);
        assert!((from_unit(1.2) - 300.0).abs() < f64::EPSILON);
        assert!((to_unit(150.0) - 0.5).abs() < f64::EPSILON);
        assert!((to_unit(-10.0) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn clamp_bounds_the_scale() {
        assert!((clamp(310.0) - 300.0).abs() < f64::EPSILON);
        assert!((clamp(f64::NEG_INFINITY) - 0.0).abs() < f64::EPSILON);
    }
}
