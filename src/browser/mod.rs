//! Headless browser capture
//!
//! Rendering is delegated to Chromium over CDP. The pipeline only sees the
//! narrow [`SnapshotCapturer`] interface.

pub mod setup;
pub mod snapshot;

pub use setup::{BrowserLaunchOptions, find_browser_executable, launch_browser};
pub use snapshot::{ChromiumSnapshotCapturer, PageCapture, SnapshotCapturer};
