//! Scan Engine Module
//!
//! Per-target pipeline, the worker pool that drives it, and the run
//! orchestration around them.

// Sub-modules
pub mod page_timeout;
pub mod pipeline;
pub mod progress;
pub mod runner;
pub mod scan_types;
pub mod worker_pool;

// Re-exports for public API
pub use page_timeout::with_page_timeout;
pub use pipeline::{PipelineContext, process_target};
pub use progress::{NoOpProgress, ProgressReporter};
pub use runner::{enforce_anonymity_policy, run_scan};
pub use scan_types::{FailureKind, RunOutcome, RunSummary, ScanError, ScanResult, TargetStatus};
pub use worker_pool::WorkerPool;
