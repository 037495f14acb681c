//! Absolute link discovery

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static ABSOLUTE_HREF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"href=["'](http[^"']+)"#).expect("href regex is valid")
});

/// Pulls link targets out of captured markup
pub trait LinkExtractor: Send + Sync {
    /// Distinct absolute links in first-seen order
    fn extract_links(&self, html: &str) -> Vec<String>;
}

/// Pattern-based extractor matching `href="http…"` / `href='http…'`.
///
/// Relative, `javascript:` and `mailto:` links never start with `http`
/// and are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexLinkExtractor;

impl LinkExtractor for RegexLinkExtractor {
    fn extract_links(&self, html: &str) -> Vec<String> {
        extract_links(html)
    }
}

/// See [`RegexLinkExtractor`]
#[must_use]
pub fn extract_links(html: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    ABSOLUTE_HREF_RE
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|link| seen.insert(*link))
        .map(str::to_string)
        .collect()
}
