//! Core configuration types for a scan run
//!
//! This module contains the main `ScanConfig` struct that carries every
//! tunable of a run. The proxy endpoint itself is not part of the config:
//! it is discovered at startup and threaded into the transport and the
//! snapshot capturer explicitly.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::utils::constants::{
    ANONYMITY_CHECK_URL, DEFAULT_HTTP_TIMEOUT, DEFAULT_LOG_FILE, DEFAULT_OUTPUT_DIR,
    DEFAULT_PROBE_TIMEOUT, DEFAULT_SCREENSHOT_TIMEOUT, DEFAULT_SETTLE_DELAY, DEFAULT_USER_AGENT,
    DEFAULT_VIEWPORT, DEFAULT_WORKERS, TOR_BROWSER_PROXY, TOR_DAEMON_PROXY,
};

/// Main configuration struct for a scan run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// File listing one target URL per line
    pub(crate) targets_file: PathBuf,

    /// Root under which one artifact directory per target is created
    pub(crate) output_dir: PathBuf,

    /// Number of pipelines allowed to run at the same time
    pub(crate) workers: usize,

    /// Overall timeout of the HTTP fetch (step 1 of the pipeline)
    pub(crate) http_timeout: Duration,

    /// Timeout of the headless capture (step 6), independent of `http_timeout`
    pub(crate) screenshot_timeout: Duration,

    /// Delay between navigation and capture so late scripts can render
    pub(crate) settle_delay: Duration,

    /// Headless viewport as (width, height)
    pub(crate) viewport: (u32, u32),

    pub(crate) user_agent: String,

    /// Local SOCKS endpoints probed in order; the first reachable one is used
    pub(crate) proxy_candidates: Vec<String>,

    pub(crate) probe_timeout: Duration,

    /// Endpoint used for the anonymity self-check
    pub(crate) anonymity_check_url: String,

    /// Abort the run when the anonymity self-check does not confirm Tor.
    ///
    /// Default: false (the check is observational only)
    pub(crate) require_anonymity: bool,

    /// Capture screenshot + MHTML snapshot for each target
    ///
    /// Default: true
    pub(crate) capture_snapshots: bool,

    pub(crate) headless: bool,

    /// Report log; `None` logs to stderr
    pub(crate) log_file: Option<PathBuf>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            targets_file: PathBuf::from("targets.yaml"),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            workers: DEFAULT_WORKERS,
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            screenshot_timeout: DEFAULT_SCREENSHOT_TIMEOUT,
            settle_delay: DEFAULT_SETTLE_DELAY,
            viewport: DEFAULT_VIEWPORT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            proxy_candidates: vec![TOR_DAEMON_PROXY.to_string(), TOR_BROWSER_PROXY.to_string()],
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            anonymity_check_url: ANONYMITY_CHECK_URL.to_string(),
            require_anonymity: false,
            capture_snapshots: true,
            headless: true,
            log_file: Some(PathBuf::from(DEFAULT_LOG_FILE)),
        }
    }
}

impl ScanConfig {
    /// Create a builder for configuring a `ScanConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> super::builder::ScanConfigBuilder<()> {
        super::builder::ScanConfigBuilder::default()
    }
}
