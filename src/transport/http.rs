//! HTTP fetch through the anonymizing proxy

use async_trait::async_trait;
use reqwest::header::{ACCEPT_ENCODING, CONTENT_ENCODING, HeaderMap, USER_AGENT};
use std::time::{Duration, Instant};
use thiserror::Error;

use super::proxy::ProxyEndpoint;
use crate::content_saver::{ContentEncoding, DecodeError, decode_body};

/// Raw response of one target fetch
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub status: u16,
    pub headers: HeaderMap,
    /// Body exactly as received, still transport-compressed
    pub body: Vec<u8>,
    pub elapsed: Duration,
}

impl FetchResult {
    #[must_use]
    pub fn content_encoding(&self) -> ContentEncoding {
        ContentEncoding::from_header(
            self.headers
                .get(CONTENT_ENCODING)
                .and_then(|v| v.to_str().ok()),
        )
    }

    /// Body with transport compression reversed
    pub fn decode(&self) -> Result<Vec<u8>, DecodeError> {
        decode_body(&self.body, self.content_encoding())
    }
}

/// Why a fetch produced no response
#[derive(Debug, Error)]
pub enum FetchError {
    /// The overall request deadline fired before headers arrived
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Connect, proxy handshake or protocol failure
    #[error("network error: {0}")]
    Network(String),

    /// Headers arrived but the body could not be read
    #[error("body read failed: {0}")]
    Read(String),
}

/// Issues a GET for one target
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchResult, FetchError>;
}

/// reqwest-backed fetcher.
///
/// Transparent decompression is off: the `Accept-Encoding` header is sent
/// explicitly and the body is decoded by [`FetchResult::decode`].
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    user_agent: String,
}

impl HttpFetcher {
    /// Client routing every request through `proxy`, bounded by `timeout`
    pub fn through_proxy(
        proxy: &ProxyEndpoint,
        timeout: Duration,
        user_agent: impl Into<String>,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .proxy(reqwest::Proxy::all(proxy.socks5h_url())?)
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build SOCKS5 client: {e}"))?;
        Ok(Self::with_client(client, user_agent))
    }

    /// Wrap an already configured client
    #[must_use]
    pub fn with_client(client: reqwest::Client, user_agent: impl Into<String>) -> Self {
        Self {
            client,
            user_agent: user_agent.into(),
        }
    }

    #[must_use]
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResult, FetchError> {
        let start = Instant::now();

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT_ENCODING, "gzip, deflate")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout(e.to_string())
                } else {
                    FetchError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Read(e.to_string()))?
            .to_vec();

        Ok(FetchResult {
            status,
            headers,
            body,
            elapsed: start.elapsed(),
        })
    }
}
