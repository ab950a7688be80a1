//! Progress event sink for long-running loads.
//!
//! Loaders report through the [`ProgressSink`] trait instead of driving a
//! concrete progress bar, so the same code path serves the CLI (`indicatif`
//! bars), the server (discarded), and tests (counting fakes).

use std::sync::Arc;

/// Receiver for progress events emitted by a loader.
///
/// Bounds are `Send + Sync` so one sink can be shared through an `Arc`
/// between the loader and whatever renders the events.
pub trait ProgressSink: Send + Sync {
    /// Announce the total units of work, once known.
    fn set_total(&self, total: u64);

    /// Jump to an absolute position.
    fn set_position(&self, pos: u64);

    /// Advance by `delta` units.
    fn inc(&self, delta: u64);

    /// Replace the label shown next to the indicator.
    fn set_message(&self, msg: String);

    /// Complete with a final label left on screen.
    fn finish(&self, msg: String);

    /// Complete and erase the indicator.
    fn finish_and_clear(&self);
}

/// Sink that swallows every event. Used by the server and by callers that
/// load synchronously without a terminal.
pub struct DiscardProgress;

impl ProgressSink for DiscardProgress {
    fn set_total(&self, _total: u64) {}
    fn set_position(&self, _pos: u64) {}
    fn inc(&self, _delta: u64) {}
    fn set_message(&self, _msg: String) {}
    fn finish(&self, _msg: String) {}
    fn finish_and_clear(&self) {}
}

/// Shared [`DiscardProgress`] for call sites that take an `Arc` sink.
#[must_use]
pub fn discard() -> Arc<dyn ProgressSink> {
    Arc::new(DiscardProgress)
}
