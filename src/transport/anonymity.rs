//! Best-effort check that traffic really exits through Tor
//!
//! The check endpoint answers `{"IsTor": bool, "IP": "..."}` for the
//! address it sees. By default the outcome is only logged; the caller
//! decides whether to gate the run on it.

use log::{info, warn};
use serde::Deserialize;
use std::fmt;

#[derive(Debug, Deserialize)]
struct TorCheckResponse {
    #[serde(rename = "IsTor")]
    is_tor: bool,
    #[serde(rename = "IP", default)]
    ip: String,
}

/// Result of the anonymity self-check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnonymityReport {
    /// The check endpoint saw a Tor exit
    Confirmed { exit_ip: String },
    /// The check endpoint saw a non-Tor address; the proxy is leaking
    NotAnonymous { ip: String },
    /// The check could not be completed
    Unverified { reason: String },
}

impl AnonymityReport {
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed { .. })
    }
}

impl fmt::Display for AnonymityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Confirmed { exit_ip } => write!(f, "Tor confirmed (exit {exit_ip})"),
            Self::NotAnonymous { ip } => write!(f, "NOT using Tor (seen as {ip})"),
            Self::Unverified { reason } => write!(f, "anonymity unverified: {reason}"),
        }
    }
}

/// Query `check_url` with `client` and classify the answer.
///
/// Never fails: transport and parse problems become
/// [`AnonymityReport::Unverified`].
pub async fn verify_anonymity(client: &reqwest::Client, check_url: &str) -> AnonymityReport {
    let report = match fetch_check(client, check_url).await {
        Ok(body) => match serde_json::from_str::<TorCheckResponse>(&body) {
            Ok(resp) if resp.is_tor => AnonymityReport::Confirmed { exit_ip: resp.ip },
            Ok(resp) => AnonymityReport::NotAnonymous { ip: resp.ip },
            Err(e) => AnonymityReport::Unverified {
                reason: format!("unexpected response {body:?}: {e}"),
            },
        },
        Err(reason) => AnonymityReport::Unverified { reason },
    };

    match &report {
        AnonymityReport::Confirmed { .. } => info!("[TOR] {check_url}: {report}"),
        _ => warn!("[TOR] {check_url}: {report}"),
    }
    report
}

async fn fetch_check(client: &reqwest::Client, check_url: &str) -> Result<String, String> {
    let response = client
        .get(check_url)
        .send()
        .await
        .map_err(|e| format!("request failed: {e}"))?;
    let status = response.status();
    if !status.is_success() {
        return Err(format!("HTTP {status}"));
    }
    response
        .text()
        .await
        .map_err(|e| format!("body read failed: {e}"))
}
