//! Single target processing
//!
//! Handles the complete lifecycle of one target:
//! 1. Fetch through the anonymizing transport
//! 2. Reverse transport compression
//! 3. Derive the artifact directory from the title and URL, create it
//! 4. Sanitize and save the markup
//! 5. Extract and save absolute links
//! 6. Capture screenshot + snapshot on an independent timer
//! 7. Record the outcome
//!
//! A failure in steps 1-5 ends the target with [`TargetStatus::Failed`].
//! A failure in step 6 only downgrades it to [`TargetStatus::Partial`].

use log::{info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

use super::page_timeout::with_page_timeout;
use super::scan_types::{FailureKind, RunOutcome, TargetStatus};
use crate::browser::SnapshotCapturer;
use crate::content_saver::{self, build_artifact_dir};
use crate::page_extractor::{
    LinkExtractor, MarkupSanitizer, RegexLinkExtractor, RegexSanitizer, extract_title_slug,
};
use crate::transport::{FetchError, Fetcher};
use crate::utils::constants::DEFAULT_SCREENSHOT_TIMEOUT;

/// Collaborators shared read-only by every pipeline run
#[derive(Clone)]
pub struct PipelineContext {
    pub fetcher: Arc<dyn Fetcher>,
    /// `None` skips step 6 entirely; the target can still fully succeed
    pub capturer: Option<Arc<dyn SnapshotCapturer>>,
    pub sanitizer: Arc<dyn MarkupSanitizer>,
    pub link_extractor: Arc<dyn LinkExtractor>,
    pub output_dir: PathBuf,
    pub screenshot_timeout: Duration,
}

impl PipelineContext {
    /// Context with the pattern-based sanitizer/extractor and no capturer
    #[must_use]
    pub fn new(fetcher: Arc<dyn Fetcher>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            fetcher,
            capturer: None,
            sanitizer: Arc::new(RegexSanitizer),
            link_extractor: Arc::new(RegexLinkExtractor),
            output_dir: output_dir.into(),
            screenshot_timeout: DEFAULT_SCREENSHOT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_capturer(mut self, capturer: Arc<dyn SnapshotCapturer>, timeout: Duration) -> Self {
        self.capturer = Some(capturer);
        self.screenshot_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_sanitizer(mut self, sanitizer: Arc<dyn MarkupSanitizer>) -> Self {
        self.sanitizer = sanitizer;
        self
    }

    #[must_use]
    pub fn with_link_extractor(mut self, extractor: Arc<dyn LinkExtractor>) -> Self {
        self.link_extractor = extractor;
        self
    }
}

fn fail(
    target: &str,
    artifact_dir: Option<PathBuf>,
    kind: FailureKind,
    message: impl Into<String>,
) -> RunOutcome {
    let message = message.into();
    warn!("[ERR ] {target} -> {kind} ({message})");
    RunOutcome::failed(target, artifact_dir, kind, message)
}

/// Run every step for `target`, returning its terminal outcome.
///
/// Never panics on I/O or content errors and never returns early without an
/// outcome.
pub async fn process_target(target: &str, ctx: &PipelineContext) -> RunOutcome {
    if let Err(e) = Url::parse(target) {
        return fail(target, None, FailureKind::InvalidTarget, e.to_string());
    }

    let start = Instant::now();

    // Step 1: fetch
    let fetched = match ctx.fetcher.fetch(target).await {
        Ok(fetched) => fetched,
        Err(FetchError::Timeout(msg)) => return fail(target, None, FailureKind::Timeout, msg),
        Err(FetchError::Network(msg)) => return fail(target, None, FailureKind::Network, msg),
        Err(FetchError::Read(msg)) => return fail(target, None, FailureKind::Read, msg),
    };

    // Step 2: decode
    let decoded = match fetched.decode() {
        Ok(bytes) => bytes,
        Err(e) => return fail(target, None, FailureKind::Read, e.to_string()),
    };
    let html = String::from_utf8_lossy(&decoded);

    // Step 3: artifact directory
    let slug = extract_title_slug(&html);
    let artifact_dir = build_artifact_dir(&ctx.output_dir, target, &slug);
    if let Err(e) = tokio::fs::create_dir_all(&artifact_dir).await {
        return fail(
            target,
            None,
            FailureKind::Write,
            format!("create {}: {e}", artifact_dir.display()),
        );
    }

    // Step 4: sanitized markup
    let sanitized = ctx.sanitizer.sanitize(&html);
    if let Err(e) = content_saver::save_site_data(&artifact_dir, sanitized).await {
        return fail(target, Some(artifact_dir), FailureKind::Write, format!("{e:#}"));
    }

    // Step 5: links
    let links = ctx.link_extractor.extract_links(&html);
    if let Err(e) = content_saver::save_links(&artifact_dir, &links).await {
        return fail(target, Some(artifact_dir), FailureKind::Write, format!("{e:#}"));
    }

    // Step 6: visual capture, isolated
    let capture_error = match &ctx.capturer {
        Some(capturer) => {
            // Only the render is timed; the save below is never cut off halfway
            let captured =
                with_page_timeout(capturer.capture(target), ctx.screenshot_timeout, "Screenshot capture")
                    .await;
            let saved = match captured {
                Ok(capture) => content_saver::save_page_capture(&artifact_dir, capture).await,
                Err(e) => Err(e),
            };
            saved.err().map(|e| {
                warn!("[ERR ] {target} -> SCREENSHOT FAILED ({e:#})");
                format!("{e:#}")
            })
        }
        None => None,
    };

    // Step 7: outcome
    let status_code = fetched.status;
    let elapsed = start.elapsed();
    info!("[INFO] {target} -> {status_code} ({elapsed:?})");

    let status = match capture_error {
        None => TargetStatus::Success {
            status_code,
            elapsed,
        },
        Some(reason) => TargetStatus::Partial {
            status_code,
            elapsed,
            reason,
        },
    };

    RunOutcome {
        target: target.to_string(),
        artifact_dir: Some(artifact_dir),
        status,
    }
}
