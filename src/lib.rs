pub mod browser;
pub mod config;
pub mod content_saver;
pub mod logging;
pub mod page_extractor;
pub mod scan_engine;
pub mod targets;
pub mod transport;
pub mod utils;

use std::sync::Arc;

pub use browser::{ChromiumSnapshotCapturer, PageCapture, SnapshotCapturer};
pub use config::ScanConfig;
pub use content_saver::{ContentEncoding, build_artifact_dir, decode_body, url_digest};
pub use page_extractor::{
    LinkExtractor, MarkupSanitizer, RegexLinkExtractor, RegexSanitizer, extract_links,
    extract_title_slug, sanitize_html,
};
pub use scan_engine::{
    FailureKind, NoOpProgress, PipelineContext, ProgressReporter, RunOutcome, RunSummary,
    ScanError, ScanResult, TargetStatus, WorkerPool, process_target, run_scan,
};
pub use targets::{load_targets, parse_targets};
pub use transport::{
    AnonymityReport, FetchError, FetchResult, Fetcher, HttpFetcher, ProxyEndpoint, discover_proxy,
};

/// Run a scan without progress callbacks
pub async fn scan(config: ScanConfig) -> ScanResult<Vec<RunOutcome>> {
    run_scan(&config, Arc::new(NoOpProgress)).await
}
