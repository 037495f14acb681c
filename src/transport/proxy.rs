//! Local SOCKS endpoint discovery

use log::{debug, info};
use std::fmt;
use std::time::Duration;
use tokio::net::TcpStream;

use crate::scan_engine::ScanError;

/// A reachable local SOCKS5 proxy, `host:port`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyEndpoint {
    addr: String,
}

impl ProxyEndpoint {
    #[must_use]
    pub fn new(addr: impl Into<String>) -> Self {
        Self { addr: addr.into() }
    }

    #[must_use]
    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// Proxy URL for the HTTP client.
    ///
    /// `socks5h` makes the proxy resolve host names, which `.onion`
    /// addresses require and which keeps DNS off the local resolver.
    #[must_use]
    pub fn socks5h_url(&self) -> String {
        format!("socks5h://{}", self.addr)
    }

    /// Value for Chromium's `--proxy-server` switch
    #[must_use]
    pub fn browser_proxy_server(&self) -> String {
        format!("socks5://{}", self.addr)
    }
}

impl fmt::Display for ProxyEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.addr)
    }
}

/// True when a TCP connection to `addr` opens within `timeout`
pub async fn probe_endpoint(addr: &str, timeout: Duration) -> bool {
    match tokio::time::timeout(timeout, TcpStream::connect(addr)).await {
        Ok(Ok(_stream)) => true,
        Ok(Err(e)) => {
            debug!("Proxy probe {addr} refused: {e}");
            false
        }
        Err(_) => {
            debug!("Proxy probe {addr} timed out after {timeout:?}");
            false
        }
    }
}

/// Return the first candidate accepting TCP connections.
///
/// Candidates are tried in order. No reachable candidate is fatal for the run.
pub async fn discover_proxy(
    candidates: &[String],
    timeout: Duration,
) -> Result<ProxyEndpoint, ScanError> {
    for candidate in candidates {
        if probe_endpoint(candidate, timeout).await {
            info!("Tor SOCKS5 proxy active: {candidate}");
            return Ok(ProxyEndpoint::new(candidate.clone()));
        }
    }
    Err(ScanError::ProxyUnavailable {
        candidates: candidates.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    async fn closed_port() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        drop(listener);
        addr
    }

    #[tokio::test]
    async fn first_reachable_candidate_wins() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let open = listener.local_addr().unwrap().to_string();
        let closed = closed_port().await;

        let endpoint = discover_proxy(&[closed, open.clone()], Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(endpoint.addr(), open);
    }

    #[tokio::test]
    async fn no_reachable_candidate_is_fatal() {
        let closed = closed_port().await;
        let err = discover_proxy(&[closed.clone()], Duration::from_millis(500))
            .await
            .unwrap_err();
        match err {
            ScanError::ProxyUnavailable { candidates } => assert_eq!(candidates, vec![closed]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn proxy_urls() {
        let endpoint = ProxyEndpoint::new("127.0.0.1:9050");
        assert_eq!(endpoint.socks5h_url(), "socks5h://127.0.0.1:9050");
        assert_eq!(endpoint.browser_proxy_server(), "socks5://127.0.0.1:9050");
    }
}
