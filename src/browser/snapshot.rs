//! Screenshot + MHTML capture of a rendered page

use anyhow::{Context, Result};
use async_trait::async_trait;
use chromiumoxide::Page;
use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::cdp::browser_protocol::page::{CaptureScreenshotFormat, CaptureSnapshotParams};
use chromiumoxide::page::ScreenshotParams;
use log::debug;
use std::path::PathBuf;
use std::time::Duration;

use super::setup::{BrowserLaunchOptions, launch_browser, shutdown_browser};
use crate::transport::ProxyEndpoint;

/// Visual artifacts of one rendered page
#[derive(Debug, Clone)]
pub struct PageCapture {
    /// Full-page PNG
    pub screenshot_png: Vec<u8>,
    /// Single-file MHTML snapshot of the document and its resources
    pub snapshot_mhtml: String,
}

/// Renders a URL headlessly and returns its visual artifacts
#[async_trait]
pub trait SnapshotCapturer: Send + Sync {
    async fn capture(&self, url: &str) -> Result<PageCapture>;
}

/// Chromium-backed capturer.
///
/// Starts a fresh browser per capture, bound to the same proxy as the HTTP
/// transport, with a throwaway profile so concurrent captures never share
/// state.
#[derive(Debug, Clone)]
pub struct ChromiumSnapshotCapturer {
    executable: Option<PathBuf>,
    proxy: ProxyEndpoint,
    viewport: (u32, u32),
    settle_delay: Duration,
    user_agent: String,
    headless: bool,
}

impl ChromiumSnapshotCapturer {
    /// `executable` of `None` makes every capture fail, which the pipeline
    /// records as a partial success.
    #[must_use]
    pub fn new(
        executable: Option<PathBuf>,
        proxy: ProxyEndpoint,
        viewport: (u32, u32),
        settle_delay: Duration,
        user_agent: impl Into<String>,
        headless: bool,
    ) -> Self {
        Self {
            executable,
            proxy,
            viewport,
            settle_delay,
            user_agent: user_agent.into(),
            headless,
        }
    }

    async fn render(&self, page: &Page, url: &str) -> Result<PageCapture> {
        let (width, height) = self.viewport;
        page.execute(
            SetDeviceMetricsOverrideParams::builder()
                .width(i64::from(width))
                .height(i64::from(height))
                .device_scale_factor(1.0)
                .mobile(false)
                .build()
                .map_err(anyhow::Error::msg)?,
        )
        .await
        .context("Failed to set viewport")?;

        page.goto(url).await.context("Navigation failed")?;
        tokio::time::sleep(self.settle_delay).await;

        let screenshot_png = page
            .screenshot(
                ScreenshotParams::builder()
                    .format(CaptureScreenshotFormat::Png)
                    .full_page(true)
                    .build(),
            )
            .await
            .context("Failed to capture screenshot")?;

        let snapshot = page
            // CDP defaults the snapshot format to MHTML
            .execute(CaptureSnapshotParams::default())
            .await
            .context("Failed to capture MHTML snapshot")?;

        Ok(PageCapture {
            screenshot_png,
            snapshot_mhtml: snapshot.result.data,
        })
    }
}

#[async_trait]
impl SnapshotCapturer for ChromiumSnapshotCapturer {
    async fn capture(&self, url: &str) -> Result<PageCapture> {
        let executable = self
            .executable
            .clone()
            .ok_or_else(|| anyhow::anyhow!("no Chrome/Chromium executable available"))?;

        let options = BrowserLaunchOptions {
            executable,
            proxy: self.proxy.clone(),
            viewport: self.viewport,
            user_agent: self.user_agent.clone(),
            headless: self.headless,
        };

        // Removed on drop, after the browser has exited
        let profile_dir = tempfile::Builder::new()
            .prefix("torscrape_chrome_")
            .tempdir()
            .context("Failed to create browser profile directory")?;

        let (browser, handler_task) = launch_browser(&options, profile_dir.path()).await?;

        let result = match browser.new_page("about:blank").await {
            Ok(page) => {
                let rendered = self.render(&page, url).await;
                if let Err(e) = page.close().await {
                    debug!("Failed to close page for {url}: {e}");
                }
                rendered
            }
            Err(e) => Err(anyhow::anyhow!("Failed to open page: {e}")),
        };

        shutdown_browser(browser, handler_task).await;
        result
    }
}
