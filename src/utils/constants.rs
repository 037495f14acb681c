//! Shared configuration constants for torscrape
//!
//! This module contains default values and configuration constants used
//! throughout the codebase to ensure consistency and avoid magic numbers.

use std::time::Duration;

/// Default number of concurrent target pipelines
pub const DEFAULT_WORKERS: usize = 5;

/// Upper bound accepted by the config builder for the worker count
pub const MAX_WORKERS: usize = 64;

/// Overall timeout for the HTTP GET of one target (connect + headers + body)
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(25);

/// Timeout for the whole headless capture of one target.
///
/// Independent of [`DEFAULT_HTTP_TIMEOUT`]; covers browser launch, navigation,
/// settle delay, screenshot and snapshot.
pub const DEFAULT_SCREENSHOT_TIMEOUT: Duration = Duration::from_secs(40);

/// Time given to a page after navigation before it is captured
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(5);

/// TCP connect timeout used when probing local SOCKS endpoints
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Viewport used for headless rendering
pub const DEFAULT_VIEWPORT: (u32, u32) = (1920, 1080);

/// Tor daemon SOCKS port
pub const TOR_DAEMON_PROXY: &str = "127.0.0.1:9050";

/// Tor Browser bundle SOCKS port
pub const TOR_BROWSER_PROXY: &str = "127.0.0.1:9150";

/// Endpoint reporting whether the caller arrives from a Tor exit
pub const ANONYMITY_CHECK_URL: &str = "https://check.torproject.org/api/ip";

/// Root directory for artifact bundles
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Append-only report log
pub const DEFAULT_LOG_FILE: &str = "scan_report.log";

/// Browser user agent sent with every fetch.
///
/// Firefox ESR on Linux, which is what Tor Browser presents, so the crawler
/// blends in with ordinary Tor traffic.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:102.0) Gecko/20100101 Firefox/102.0";

/// Marker prepended to every archived page
pub const OFFLINE_MARKER: &str = "<!--\nOFFLINE ARCHIVE\n-->";

/// Slug used when a page has no usable `<title>`
pub const UNKNOWN_TITLE: &str = "unknown_title";

/// Number of hex digits of the URL digest kept in directory names
pub const URL_DIGEST_LEN: usize = 6;

/// Artifact file names
pub const SITE_DATA_FILE: &str = "site_data.html";
pub const LINKS_FILE: &str = "links.txt";
pub const SCREENSHOT_FILE: &str = "screenshot.png";
pub const SNAPSHOT_FILE: &str = "site_snapshot.mhtml";
