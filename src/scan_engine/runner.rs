//! Whole-run orchestration
//!
//! Order of a run:
//! 1. load targets (fatal if unreadable)
//! 2. discover the local Tor proxy (fatal if none)
//! 3. prepare the output root
//! 4. anonymity self-check (observational unless `require_anonymity`)
//! 5. drain the targets through the worker pool
//!
//! Nothing after step 5 starts can abort the run.

use log::{info, warn};
use std::sync::Arc;

use super::pipeline::PipelineContext;
use super::progress::ProgressReporter;
use super::scan_types::{RunOutcome, ScanError, ScanResult};
use super::worker_pool::WorkerPool;
use crate::browser::{ChromiumSnapshotCapturer, find_browser_executable};
use crate::config::ScanConfig;
use crate::targets::load_targets;
use crate::transport::{AnonymityReport, HttpFetcher, discover_proxy, verify_anonymity};

/// Apply the anonymity policy to a self-check result.
///
/// Fail-open by default: any report is accepted and scanning proceeds, even
/// when traffic is visibly not leaving through Tor. With `require_anonymity`
/// only [`AnonymityReport::Confirmed`] lets the run continue.
pub fn enforce_anonymity_policy(report: &AnonymityReport, require_anonymity: bool) -> ScanResult<()> {
    if report.is_confirmed() {
        return Ok(());
    }
    if require_anonymity {
        return Err(ScanError::AnonymityNotConfirmed(report.to_string()));
    }
    warn!("Continuing without confirmed anonymity: {report}");
    Ok(())
}

/// Execute a complete scan described by `config`
pub async fn run_scan<P>(config: &ScanConfig, progress: Arc<P>) -> ScanResult<Vec<RunOutcome>>
where
    P: ProgressReporter + ?Sized + 'static,
{
    let targets = load_targets(config.targets_file()).await?;
    info!(
        "Loaded {} targets from {}",
        targets.len(),
        config.targets_file().display()
    );

    let proxy = discover_proxy(config.proxy_candidates(), config.probe_timeout()).await?;

    tokio::fs::create_dir_all(config.output_dir()).await?;

    let fetcher = HttpFetcher::through_proxy(&proxy, config.http_timeout(), config.user_agent())
        .map_err(|e| ScanError::Transport(format!("{e:#}")))?;

    let report = verify_anonymity(fetcher.client(), config.anonymity_check_url()).await;
    enforce_anonymity_policy(&report, config.require_anonymity())?;

    let mut ctx = PipelineContext::new(Arc::new(fetcher), config.output_dir().clone());
    if config.capture_snapshots() {
        let executable = match find_browser_executable() {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("{e}; screenshots will fail and targets will be recorded as partial");
                None
            }
        };
        let capturer = ChromiumSnapshotCapturer::new(
            executable,
            proxy.clone(),
            config.viewport(),
            config.settle_delay(),
            config.user_agent(),
            config.headless(),
        );
        ctx = ctx.with_capturer(Arc::new(capturer), config.screenshot_timeout());
    }

    let pool = WorkerPool::new(config.workers());
    let outcomes = pool.run(targets, Arc::new(ctx), progress).await;

    info!("Scan finished: {} outcomes", outcomes.len());
    Ok(outcomes)
}
