//! Title-derived directory labels

use regex::Regex;
use std::sync::LazyLock;

use crate::utils::constants::UNKNOWN_TITLE;

static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<title>(.*?)</title>").expect("title regex is valid")
});

static UNSAFE_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9 _\-]").expect("slug regex is valid"));

/// Derive a path-safe slug from the first `<title>` element of `html`.
///
/// The title text is trimmed, every character outside `[A-Za-z0-9 _-]` is
/// dropped and spaces become underscores. Returns `unknown_title` when there
/// is no title or nothing survives the filter.
#[must_use]
pub fn extract_title_slug(html: &str) -> String {
    let Some(raw) = TITLE_RE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
    else {
        return UNKNOWN_TITLE.to_string();
    };

    let slug = UNSAFE_CHARS_RE.replace_all(raw, "").replace(' ', "_");
    if slug.is_empty() {
        UNKNOWN_TITLE.to_string()
    } else {
        slug
    }
}
