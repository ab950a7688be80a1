//! Shared engine context.
//!
//! Holds the configuration and the region index built once at startup.
//! Callers pass the context by reference; nothing in it mutates after
//! construction.

use fire_watch_boundary::load_regions;
use fire_watch_spatial::RegionIndex;

use crate::{EngineConfig, EngineError};

/// Configuration plus the one-time-loaded region index.
pub struct EngineContext {
    config: EngineConfig,
    index: RegionIndex,
}

impl EngineContext {
    /// Wraps an already-built index, for callers that load boundaries
    /// themselves.
    #[must_use]
    pub const fn new(config: EngineConfig, index: RegionIndex) -> Self {
        Self { config, index }
    }

    /// Builds a context from the configuration, loading the boundary
    /// dataset when one is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured boundary file cannot be read
    /// or parsed.
    pub fn load(config: EngineConfig) -> Result<Self, EngineError> {
        let index = match &config.boundaries {
            Some(path) => {
                let regions = load_regions(path)?;
                RegionIndex::build(&regions)
            }
            None => {
                log::warn!("No boundary dataset configured; region aggregation will be empty");
                RegionIndex::build(&[])
            }
        };
        Ok(Self::new(config, index))
    }

    /// The configuration this context was built from.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The region index.
    #[must_use]
    pub const fn index(&self) -> &RegionIndex {
        &self.index
    }

    /// Whether any region boundaries are loaded.
    #[must_use]
    pub fn has_regions(&self) -> bool {
        !self.index.is_empty()
    }
}
