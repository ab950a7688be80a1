#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared CLI utilities for the fire watch toolchain.
//!
//! Provides `indicatif`-backed progress bars behind the [`ProgressSink`]
//! trait, plus [`init_logger`] which wires up `indicatif-log-bridge` so that
//! `log::info!` and friends print above active bars instead of tearing them.

use std::sync::Arc;
use std::time::Duration;

use fire_watch_grid::progress::ProgressSink;
use indicatif::{ProgressBar, ProgressStyle};

pub use indicatif::MultiProgress;

const TICK: Duration = Duration::from_millis(120);

/// An `indicatif` [`ProgressBar`] behind the [`ProgressSink`] trait.
///
/// Every bar starts as a spinner because row counts are unknown until the
/// loader has scanned its input; the first `set_total()` switches to the
/// full bar template supplied by the constructor.
pub struct IndicatifProgress {
    bar: ProgressBar,
    bar_template: &'static str,
}

impl IndicatifProgress {
    /// Progress for row-oriented CSV loads (risk grid, prior grid).
    /// Reports rows/sec once the total row count is known.
    #[must_use]
    pub fn rows_bar(multi: &MultiProgress, message: &str) -> Arc<dyn ProgressSink> {
        Self::spinner(
            multi,
            message,
            "{msg} {wide_bar:.cyan/dim} {human_pos}/{human_len} rows ({per_sec})",
        )
    }

    /// Progress for coarse pipeline stages (clustering, aggregation, the
    /// decision itself) where a total may never be set.
    #[must_use]
    pub fn stage_bar(multi: &MultiProgress, message: &str) -> Arc<dyn ProgressSink> {
        Self::spinner(
            multi,
            message,
            "{msg} {wide_bar:.yellow/dim} {pos}/{len} [{eta}]",
        )
    }

    fn spinner(
        multi: &MultiProgress,
        message: &str,
        bar_template: &'static str,
    ) -> Arc<dyn ProgressSink> {
        let bar = multi.add(ProgressBar::new_spinner());
        bar.enable_steady_tick(TICK);
        if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(message.to_string());
        Arc::new(Self { bar, bar_template })
    }
}

impl ProgressSink for IndicatifProgress {
    fn set_total(&self, total: u64) {
        self.bar.set_length(total);
        self.bar.set_position(0);
        // The spinner template has no bar; swap styles now that a total exists.
        let style = ProgressStyle::with_template(self.bar_template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-");
        self.bar.set_style(style);
    }

    fn set_position(&self, pos: u64) {
        self.bar.set_position(pos);
    }

    fn inc(&self, delta: u64) {
        self.bar.inc(delta);
    }

    fn set_message(&self, msg: String) {
        self.bar.set_message(msg);
    }

    fn finish(&self, msg: String) {
        self.bar.finish_with_message(msg);
    }

    fn finish_and_clear(&self) {
        self.bar.finish_and_clear();
    }
}

/// Initializes the global logger and returns the [`MultiProgress`] that
/// every progress bar must be added to.
///
/// The logger is built from `RUST_LOG` and wrapped in
/// `indicatif-log-bridge`, which suspends bar redraws while a log line is
/// printed. If a logger is already installed (tests call this repeatedly)
/// the existing one is left untouched.
#[must_use]
pub fn init_logger() -> MultiProgress {
    let multi = MultiProgress::new();

    let logger = pretty_env_logger::formatted_builder()
        .parse_env("RUST_LOG")
        .build();
    let max_level = logger.filter();

    let bridge = indicatif_log_bridge::LogWrapper::new(multi.clone(), logger);
    if bridge.try_init().is_ok() {
        log::set_max_level(max_level);
    }

    multi
}
