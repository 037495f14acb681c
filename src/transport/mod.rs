//! Anonymizing network transport
//!
//! Every request the crawler makes leaves through a local Tor SOCKS proxy.
//! The endpoint is discovered once at startup and handed to the HTTP
//! client and the snapshot capturer explicitly.

pub mod anonymity;
pub mod http;
pub mod proxy;

pub use anonymity::{AnonymityReport, verify_anonymity};
pub use http::{FetchError, FetchResult, Fetcher, HttpFetcher};
pub use proxy::{ProxyEndpoint, discover_proxy, probe_endpoint};
