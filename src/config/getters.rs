//! Getter methods for `ScanConfig`

use std::path::{Path, PathBuf};
use std::time::Duration;

use super::types::ScanConfig;

impl ScanConfig {
    #[must_use]
    pub fn targets_file(&self) -> &Path {
        &self.targets_file
    }

    #[must_use]
    pub fn output_dir(&self) -> &PathBuf {
        &self.output_dir
    }

    #[must_use]
    pub fn workers(&self) -> usize {
        self.workers
    }

    #[must_use]
    pub fn http_timeout(&self) -> Duration {
        self.http_timeout
    }

    #[must_use]
    pub fn screenshot_timeout(&self) -> Duration {
        self.screenshot_timeout
    }

    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    #[must_use]
    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    #[must_use]
    pub fn proxy_candidates(&self) -> &[String] {
        &self.proxy_candidates
    }

    #[must_use]
    pub fn probe_timeout(&self) -> Duration {
        self.probe_timeout
    }

    #[must_use]
    pub fn anonymity_check_url(&self) -> &str {
        &self.anonymity_check_url
    }

    #[must_use]
    pub fn require_anonymity(&self) -> bool {
        self.require_anonymity
    }

    #[must_use]
    pub fn capture_snapshots(&self) -> bool {
        self.capture_snapshots
    }

    #[must_use]
    pub fn headless(&self) -> bool {
        self.headless
    }

    #[must_use]
    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }
}
