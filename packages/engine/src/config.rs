//! Engine configuration.
//!
//! Deserialized from a TOML file. Every field has a default so an empty
//! document is a valid (if inert) configuration; surfaces layer their
//! own overrides on top of the parsed value.

use std::path::{Path, PathBuf};

use fire_watch_fusion::FallbackPolicy;
use fire_watch_hotspot::{DEFAULT_EPS_KM, DEFAULT_MIN_SAMPLES, DEFAULT_THRESHOLD, HotspotParams};
use serde::Deserialize;

use crate::EngineError;

/// Environment variable naming the engine configuration file.
pub const CONFIG_ENV: &str = "FIRE_WATCH_CONFIG";

/// Configuration path used when [`CONFIG_ENV`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "fire-watch.toml";

/// Resolves the configuration path from an explicit override, the
/// [`CONFIG_ENV`] environment variable, or [`DEFAULT_CONFIG_PATH`], in
/// that order.
#[must_use]
pub fn resolve_config_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Per-cell risk table CSV for the current day.
    pub risk_csv: Option<PathBuf>,
    /// Prior-day risk table CSV for trend classification.
    pub prior_csv: Option<PathBuf>,
    /// Region boundary GeoJSON `FeatureCollection`.
    pub boundaries: Option<PathBuf>,
    /// Ground sensor readings CSV.
    pub sensors_csv: Option<PathBuf>,
    /// Explicit climate score. When absent the grid mean is used.
    pub climate_score: Option<f64>,
    /// Fire Risk Index baseline for the movement statement, 0 to 300.
    pub baseline_fri: Option<f64>,
    /// Air quality band accompanying the decision, 1 to 5.
    pub aqi_band: Option<u8>,
    /// Sensor-absent fusion behavior.
    pub fallback_policy: FallbackPolicy,
    /// Hotspot clustering tuning.
    pub hotspot: HotspotSection,
}

impl EngineConfig {
    /// Loads a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML is
    /// malformed.
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&raw)?;
        log::info!("Loaded engine configuration from {}", path.display());
        Ok(config)
    }

    /// Loads a configuration file, falling back to the default
    /// configuration when the file does not exist.
    ///
    /// A missing file is an inert-but-valid setup; a present-but-
    /// malformed file still errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self, EngineError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!("Config file {} not found; using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or a field has the
    /// wrong type.
    pub fn from_toml_str(raw: &str) -> Result<Self, EngineError> {
        Ok(toml::de::from_str(raw)?)
    }
}

/// The `[hotspot]` table. Kept separate from [`HotspotParams`] so the
/// config file reads in snake_case while the API model stays camelCase.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct HotspotSection {
    /// Neighborhood radius in kilometers.
    pub eps_km: f64,
    /// Minimum neighborhood size for a core point, self included.
    pub min_samples: usize,
    /// Risk score floor for cluster candidates.
    pub threshold: f64,
}

impl Default for HotspotSection {
    fn default() -> Self {
        Self {
            eps_km: DEFAULT_EPS_KM,
            min_samples: DEFAULT_MIN_SAMPLES,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl HotspotSection {
    /// Converts the config section into clustering parameters.
    #[must_use]
    pub const fn params(self) -> HotspotParams {
        HotspotParams {
            eps_km: self.eps_km,
            min_samples: self.min_samples,
            threshold: self.threshold,
        }
    }
}
