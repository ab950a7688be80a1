#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Region analytics over the risk grid.
//!
//! Point-in-polygon aggregation of risk cells into named regions,
//! day-over-day trend classification, least-squares direction of rolling
//! index histories, and the ranking helpers used by the explain layer and
//! the API.

pub mod aggregate;
pub mod rank;
pub mod trend;

pub use aggregate::aggregate;
pub use rank::{most_decreasing, most_increasing, overall_mean_risk, top_by_mean_risk};
pub use trend::{apply_trend, series_trend};
