//! Artifact directory naming
//!
//! Each target gets `<root>/<slug>_<timestamp>_<site>_<digest>` where
//! `site` is the URL host with `.onion` removed and `digest` is the first
//! six hex digits of SHA-256 over the full URL string.
//!
//! Two different URLs fetched in the same second, with the same slug and
//! host, only differ in the digest. Six hex digits carry 24 bits, so such a
//! pair collides with probability 2^-24.

use chrono::{DateTime, Local};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use url::Url;

use crate::utils::constants::URL_DIGEST_LEN;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// First [`URL_DIGEST_LEN`] hex characters of SHA-256 over `url`
#[must_use]
pub fn url_digest(url: &str) -> String {
    let hash = Sha256::digest(url.as_bytes());
    let mut hex = hex::encode(hash);
    hex.truncate(URL_DIGEST_LEN);
    hex
}

/// Host of `target` with every `.onion` suffix stripped.
///
/// Only `[A-Za-z0-9._-]` survive, so IPv6 brackets and colons never reach a
/// path. Unparseable targets yield an empty label.
#[must_use]
pub fn site_label(target: &str) -> String {
    Url::parse(target)
        .ok()
        .and_then(|url| url.host_str().map(|host| host.replace(".onion", "")))
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect()
}

/// Directory name for one target, stamped with `at`.
///
/// The digest is taken over `target` exactly as listed, not over a
/// normalized form of the URL.
#[must_use]
pub fn artifact_dir_name(target: &str, slug: &str, at: DateTime<Local>) -> String {
    format!(
        "{slug}_{}_{}_{}",
        at.format(TIMESTAMP_FORMAT),
        site_label(target),
        url_digest(target)
    )
}

/// Full artifact directory path under `output_root`, stamped with the current time
#[must_use]
pub fn build_artifact_dir(output_root: &Path, target: &str, slug: &str) -> PathBuf {
    output_root.join(artifact_dir_name(target, slug, Local::now()))
}
