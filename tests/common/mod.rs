//! Test utilities shared by the torscrape integration tests

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use flate2::Compression;
use flate2::write::{GzEncoder, ZlibEncoder};
use reqwest::header::{CONTENT_ENCODING, HeaderMap, HeaderValue};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use torscrape::browser::{PageCapture, SnapshotCapturer};
use torscrape::scan_engine::PipelineContext;
use torscrape::transport::{FetchError, FetchResult, Fetcher};

/// Creates a small HTML document with a title and body
#[allow(dead_code)]
pub fn create_test_html(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <base target="_blank">
    <title>{title}</title>
    <script src="http://cdn.example.com/app.js"></script>
</head>
<body>
    {body}
</body>
</html>"#
    )
}

#[allow(dead_code)]
pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).expect("gzip write");
    encoder.finish().expect("gzip finish")
}

#[allow(dead_code)]
pub fn zlib(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).expect("zlib write");
    encoder.finish().expect("zlib finish")
}

/// How the fake transport answers a given target
#[allow(dead_code)]
#[derive(Clone)]
pub enum FakeResponse {
    Page {
        status: u16,
        encoding: Option<&'static str>,
        body: Vec<u8>,
        delay: Duration,
    },
    Timeout {
        after: Duration,
    },
    Network,
    Panic,
}

#[allow(dead_code)]
impl FakeResponse {
    pub fn html(html: &str) -> Self {
        Self::Page {
            status: 200,
            encoding: None,
            body: html.as_bytes().to_vec(),
            delay: Duration::ZERO,
        }
    }

    pub fn gzipped(html: &str) -> Self {
        Self::Page {
            status: 200,
            encoding: Some("gzip"),
            body: gzip(html.as_bytes()),
            delay: Duration::ZERO,
        }
    }

    pub fn raw(encoding: &'static str, body: Vec<u8>) -> Self {
        Self::Page {
            status: 200,
            encoding: Some(encoding),
            body,
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, by: Duration) -> Self {
        if let Self::Page { delay, .. } = &mut self {
            *delay = by;
        }
        self
    }
}

/// In-memory `Fetcher` keyed by target URL
#[derive(Default)]
pub struct FakeFetcher {
    responses: HashMap<String, FakeResponse>,
}

#[allow(dead_code)]
impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, url: &str, response: FakeResponse) -> Self {
        self.responses.insert(url.to_string(), response);
        self
    }
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResult, FetchError> {
        match self.responses.get(url).cloned() {
            Some(FakeResponse::Page {
                status,
                encoding,
                body,
                delay,
            }) => {
                tokio::time::sleep(delay).await;
                let mut headers = HeaderMap::new();
                if let Some(encoding) = encoding {
                    headers.insert(CONTENT_ENCODING, HeaderValue::from_static(encoding));
                }
                Ok(FetchResult {
                    status,
                    headers,
                    body,
                    elapsed: delay,
                })
            }
            Some(FakeResponse::Timeout { after }) => {
                tokio::time::sleep(after).await;
                Err(FetchError::Timeout(format!("no response within {after:?}")))
            }
            Some(FakeResponse::Network) | None => {
                Err(FetchError::Network("connection refused".to_string()))
            }
            Some(FakeResponse::Panic) => panic!("fetcher blew up on {url}"),
        }
    }
}

/// Capturer behaviour for the visual capture step
#[allow(dead_code)]
#[derive(Clone, Copy)]
pub enum FakeCapturer {
    Succeed,
    Fail,
    Hang,
}

#[async_trait]
impl SnapshotCapturer for FakeCapturer {
    async fn capture(&self, url: &str) -> Result<PageCapture> {
        match self {
            Self::Succeed => Ok(PageCapture {
                screenshot_png: b"\x89PNG\r\n\x1a\nfake".to_vec(),
                snapshot_mhtml: format!("MIME-Version: 1.0\r\nSnapshot-Content-Location: {url}\r\n"),
            }),
            Self::Fail => Err(anyhow!("browser crashed")),
            Self::Hang => std::future::pending().await,
        }
    }
}

#[allow(dead_code)]
pub fn context(fetcher: FakeFetcher, output: &Path) -> PipelineContext {
    PipelineContext::new(Arc::new(fetcher), output.to_path_buf())
}

/// The single artifact directory created under `output`
#[allow(dead_code)]
pub fn only_artifact_dir(output: &Path) -> PathBuf {
    let mut dirs: Vec<PathBuf> = std::fs::read_dir(output)
        .expect("read output dir")
        .map(|entry| entry.expect("dir entry").path())
        .collect();
    assert_eq!(dirs.len(), 1, "expected one artifact dir, got {dirs:?}");
    dirs.remove(0)
}
