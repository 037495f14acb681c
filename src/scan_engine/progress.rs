//! Progress reporting abstraction for scan runs
//!
//! Defines the `ProgressReporter` trait for per-target lifecycle events and
//! provides a no-op implementation for callers that only want the returned
//! outcomes.

use super::scan_types::RunOutcome;

/// Receives per-target lifecycle events as they happen
///
/// Called concurrently from every worker.
pub trait ProgressReporter: Send + Sync {
    /// A worker picked up `target`
    fn report_started(&self, target: &str);

    /// `target` reached its terminal outcome
    fn report_outcome(&self, outcome: &RunOutcome);
}

/// Progress reporter that does nothing
#[derive(Debug, Clone, Copy)]
pub struct NoOpProgress;

impl ProgressReporter for NoOpProgress {
    #[inline(always)]
    fn report_started(&self, _target: &str) {}

    #[inline(always)]
    fn report_outcome(&self, _outcome: &RunOutcome) {}
}
