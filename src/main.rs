//! torscrape: archive a fixed list of targets through a local Tor proxy.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use torscrape::config::ScanConfig;
use torscrape::logging::init_logging;
use torscrape::scan_engine::{ProgressReporter, RunOutcome, RunSummary, run_scan};
use torscrape::utils::constants::{
    ANONYMITY_CHECK_URL, DEFAULT_HTTP_TIMEOUT, DEFAULT_LOG_FILE, DEFAULT_OUTPUT_DIR,
    DEFAULT_PROBE_TIMEOUT, DEFAULT_SCREENSHOT_TIMEOUT, DEFAULT_SETTLE_DELAY, DEFAULT_USER_AGENT,
    DEFAULT_VIEWPORT, DEFAULT_WORKERS, TOR_BROWSER_PROXY, TOR_DAEMON_PROXY,
};

#[derive(Parser, Debug)]
#[command(
    name = "torscrape",
    version,
    about = "Archive a target list through a local Tor SOCKS proxy"
)]
struct Cli {
    /// File with one target URL per line
    #[arg(short = 'f', long = "targets")]
    targets: PathBuf,

    /// Root directory for artifact bundles
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Number of targets processed concurrently
    #[arg(short, long, default_value_t = DEFAULT_WORKERS)]
    workers: usize,

    /// HTTP fetch timeout in seconds
    #[arg(long, default_value_t = DEFAULT_HTTP_TIMEOUT.as_secs())]
    http_timeout: u64,

    /// Headless capture timeout in seconds
    #[arg(long, default_value_t = DEFAULT_SCREENSHOT_TIMEOUT.as_secs())]
    screenshot_timeout: u64,

    /// Seconds to wait after navigation before capturing
    #[arg(long, default_value_t = DEFAULT_SETTLE_DELAY.as_secs())]
    settle_delay: u64,

    /// Seconds allowed for each proxy probe
    #[arg(long, default_value_t = DEFAULT_PROBE_TIMEOUT.as_secs())]
    probe_timeout: u64,

    /// Viewport width for captures
    #[arg(long, default_value_t = DEFAULT_VIEWPORT.0)]
    viewport_width: u32,

    /// Viewport height for captures
    #[arg(long, default_value_t = DEFAULT_VIEWPORT.1)]
    viewport_height: u32,

    /// User agent sent with every request
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// SOCKS5 candidates (host:port), probed in order
    #[arg(
        long = "proxy",
        env = "TORSCRAPE_PROXIES",
        value_delimiter = ',',
        default_values_t = [TOR_DAEMON_PROXY.to_string(), TOR_BROWSER_PROXY.to_string()]
    )]
    proxies: Vec<String>,

    /// Endpoint used for the anonymity self-check
    #[arg(long, default_value = ANONYMITY_CHECK_URL)]
    check_url: String,

    /// Abort unless the self-check confirms Tor egress
    #[arg(long)]
    require_anonymity: bool,

    /// Skip screenshots and MHTML snapshots
    #[arg(long)]
    no_snapshots: bool,

    /// Show the browser window during captures
    #[arg(long)]
    headed: bool,

    /// Append-only report log
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// Log to stderr instead of the report file
    #[arg(long, conflicts_with = "log_file")]
    log_stderr: bool,
}

impl Cli {
    fn into_config(self) -> Result<ScanConfig> {
        let log_file = (!self.log_stderr).then_some(self.log_file);
        ScanConfig::builder()
            .targets_file(self.targets)
            .output_dir(self.output)
            .workers(self.workers)
            .http_timeout(Duration::from_secs(self.http_timeout))
            .screenshot_timeout(Duration::from_secs(self.screenshot_timeout))
            .settle_delay(Duration::from_secs(self.settle_delay))
            .probe_timeout(Duration::from_secs(self.probe_timeout))
            .viewport(self.viewport_width, self.viewport_height)
            .user_agent(self.user_agent)
            .proxy_candidates(self.proxies)
            .anonymity_check_url(self.check_url)
            .require_anonymity(self.require_anonymity)
            .capture_snapshots(!self.no_snapshots)
            .headless(!self.headed)
            .log_file(log_file)
            .build()
    }
}

/// Prints one console line per finished target
struct ConsoleProgress;

impl ProgressReporter for ConsoleProgress {
    fn report_started(&self, _target: &str) {}

    fn report_outcome(&self, outcome: &RunOutcome) {
        if outcome.is_success() || outcome.is_partial() {
            // A closed stdout (e.g. piped into `head`) must not stop the scan
            let _ = writeln!(io::stdout().lock(), "[OK ] {}", outcome.target);
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.into_config().context("Invalid configuration")?;
    if let Err(e) = init_logging(config.log_file()) {
        eprintln!("Report log unavailable ({e:#}), logging to stderr");
        init_logging(None)?;
    }

    let outcomes = run_scan(&config, Arc::new(ConsoleProgress)).await?;
    let summary = RunSummary::from_outcomes(&outcomes);
    log::info!("Scan finished: {summary}");
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{summary}");
    let _ = writeln!(
        stdout,
        "Scan complete. Artifacts saved under {}",
        config.output_dir().display()
    );
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("torscrape: {e:#}");
            ExitCode::FAILURE
        }
    }
}
