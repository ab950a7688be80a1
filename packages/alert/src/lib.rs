#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Alert and explanation generation.
//!
//! Derives short operator-facing statements from the fusion decision,
//! region aggregates, hotspot clusters, and sensor feed. Everything here
//! is deterministic thresholding and ranking; no free-form generation.

pub mod explain;
pub mod sensor;
pub mod summary;

pub use explain::{ExplainInputs, explain};
pub use sensor::sensor_statements;
pub use summary::summary_lines;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Severity tag carried alongside each alert message.
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
pub enum AlertSeverity {
    /// Informational; no action implied.
    Info,
    /// Worth monitoring.
    Watch,
    /// Action should be prepared.
    Warning,
    /// Immediate action.
    Critical,
}

/// One generated alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    /// Severity tag.
    pub severity: AlertSeverity,
    /// Operator-facing message.
    pub message: String,
}

impl Alert {
    /// Builds an alert from a severity and message.
    #[must_use]
    pub const fn new(severity: AlertSeverity, message: String) -> Self {
        Self { severity, message }
    }
}

/// Flattens alerts to their plain messages, preserving order.
#[must_use]
pub fn statements(alerts: &[Alert]) -> Vec<String> {
    alerts.iter().map(|alert| alert.message.clone()).collect()
}
