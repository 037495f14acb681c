//! Builder methods available for all states
//!
//! This module contains methods that can be called on the builder
//! regardless of its current type state.

use std::path::PathBuf;
use std::time::Duration;

use super::builder::ScanConfigBuilder;

impl<State> ScanConfigBuilder<State> {
    #[must_use]
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    #[must_use]
    pub fn workers(mut self, workers: usize) -> Self {
        self.config.workers = workers;
        self
    }

    #[must_use]
    pub fn http_timeout(mut self, timeout: Duration) -> Self {
        self.config.http_timeout = timeout;
        self
    }

    /// Set the headless capture timeout
    ///
    /// Runs on its own timer: a slow fetch does not shorten the capture budget.
    #[must_use]
    pub fn screenshot_timeout(mut self, timeout: Duration) -> Self {
        self.config.screenshot_timeout = timeout;
        self
    }

    #[must_use]
    pub fn settle_delay(mut self, delay: Duration) -> Self {
        self.config.settle_delay = delay;
        self
    }

    #[must_use]
    pub fn viewport(mut self, width: u32, height: u32) -> Self {
        self.config.viewport = (width, height);
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Replace the list of local SOCKS endpoints probed at startup
    #[must_use]
    pub fn proxy_candidates<I, S>(mut self, candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.proxy_candidates = candidates.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn probe_timeout(mut self, timeout: Duration) -> Self {
        self.config.probe_timeout = timeout;
        self
    }

    #[must_use]
    pub fn anonymity_check_url(mut self, url: impl Into<String>) -> Self {
        self.config.anonymity_check_url = url.into();
        self
    }

    /// Turn the anonymity self-check into a gate
    ///
    /// When enabled, a run whose self-check does not confirm Tor aborts before
    /// any target is fetched. When disabled (the default) the result is only
    /// logged and scanning proceeds.
    #[must_use]
    pub fn require_anonymity(mut self, require: bool) -> Self {
        self.config.require_anonymity = require;
        self
    }

    #[must_use]
    pub fn capture_snapshots(mut self, capture: bool) -> Self {
        self.config.capture_snapshots = capture;
        self
    }

    #[must_use]
    pub fn headless(mut self, headless: bool) -> Self {
        self.config.headless = headless;
        self
    }

    #[must_use]
    pub fn log_file(mut self, path: Option<PathBuf>) -> Self {
        self.config.log_file = path;
        self
    }
}
