//! Offline neutralization of archived markup
//!
//! Archived pages must not reach back to the network when opened later, which
//! for onion services would both leak the reader and hit a live origin.
//!
//! The default implementation is a best-effort textual pass, not an HTML
//! security boundary. It does NOT touch:
//! - inline event handlers (`onclick=`, `onload=`, ...)
//! - `javascript:` URIs outside `href`/`src`
//! - `<meta http-equiv="refresh">` redirects
//! - CSS `url(...)` references and `srcset`
//!
//! Open archives with scripting disabled.

use regex::Regex;
use std::sync::LazyLock;

use crate::utils::constants::OFFLINE_MARKER;

static BASE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<base[^>]*>").expect("base regex is valid"));

static HREF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)href=["'][^"']+["']"#).expect("href regex is valid"));

static SRC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)src=["'][^"']+["']"#).expect("src regex is valid"));

/// Rewrites captured markup so it is safe to keep offline
pub trait MarkupSanitizer: Send + Sync {
    fn sanitize(&self, html: &str) -> String;
}

/// Pattern-based sanitizer, see the module docs for what it leaves alone
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexSanitizer;

impl MarkupSanitizer for RegexSanitizer {
    fn sanitize(&self, html: &str) -> String {
        sanitize_html(html)
    }
}

/// See [`RegexSanitizer`].
///
/// - `<base ...>` elements are removed
/// - every quoted `href` value becomes `#`
/// - every quoted `src` value becomes empty
/// - the offline marker comment is prepended (once)
#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let body = html
        .strip_prefix(OFFLINE_MARKER)
        .map_or(html, |rest| rest.strip_prefix('\n').unwrap_or(rest));

    let without_base = BASE_RE.replace_all(body, "");
    let hrefs = HREF_RE.replace_all(&without_base, r##"href="#""##);
    let srcs = SRC_RE.replace_all(&hrefs, r#"src="""#);

    format!("{OFFLINE_MARKER}\n{srcs}")
}
