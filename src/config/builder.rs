//! Type-safe builder for `ScanConfig` using the typestate pattern
//!
//! The targets file is the only required field; `build()` is only callable
//! once it has been provided.

use anyhow::{Result, anyhow};
use std::marker::PhantomData;
use std::path::PathBuf;

use super::types::ScanConfig;
use crate::utils::constants::MAX_WORKERS;

// Type states for the builder
pub struct WithTargetsFile;

pub struct ScanConfigBuilder<State = ()> {
    pub(crate) config: ScanConfig,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for ScanConfigBuilder<()> {
    fn default() -> Self {
        Self {
            config: ScanConfig::default(),
            _phantom: PhantomData,
        }
    }
}

impl ScanConfigBuilder<()> {
    pub fn targets_file(self, path: impl Into<PathBuf>) -> ScanConfigBuilder<WithTargetsFile> {
        let mut config = self.config;
        config.targets_file = path.into();
        ScanConfigBuilder {
            config,
            _phantom: PhantomData,
        }
    }
}

// Build method only available when all required fields are set
impl ScanConfigBuilder<WithTargetsFile> {
    pub fn build(self) -> Result<ScanConfig> {
        let config = self.config;

        if config.workers == 0 || config.workers > MAX_WORKERS {
            return Err(anyhow!(
                "workers must be between 1 and {MAX_WORKERS}, got {}",
                config.workers
            ));
        }
        if config.http_timeout.is_zero() {
            return Err(anyhow!("http timeout must be non-zero"));
        }
        if config.screenshot_timeout.is_zero() {
            return Err(anyhow!("screenshot timeout must be non-zero"));
        }
        if config.proxy_candidates.is_empty() {
            return Err(anyhow!("at least one proxy candidate is required"));
        }
        if config.viewport.0 == 0 || config.viewport.1 == 0 {
            return Err(anyhow!(
                "viewport must be non-empty, got {}x{}",
                config.viewport.0,
                config.viewport.1
            ));
        }
        if config.user_agent.trim().is_empty() {
            return Err(anyhow!("user agent must not be empty"));
        }

        Ok(config)
    }
}
