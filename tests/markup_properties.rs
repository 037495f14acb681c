//! Property tests for markup sanitization and link extraction

use proptest::prelude::*;
use torscrape::page_extractor::{extract_links, sanitize_html};
use torscrape::utils::constants::OFFLINE_MARKER;

fn markup() -> impl Strategy<Value = String> {
    let fragment = prop_oneof![
        "[a-z ]{0,12}",
        "https?://[a-z]{1,6}\\.onion/[a-z]{0,4}".prop_map(|u| format!(r#"<a href="{u}">x</a>"#)),
        "[a-z]{1,6}\\.png".prop_map(|u| format!("<img src='{u}'>")),
        Just(r#"<base href="http://mirror.onion/">"#.to_string()),
        Just("<title>T</title>".to_string()),
    ];
    prop::collection::vec(fragment, 0..12).prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn sanitizing_twice_changes_nothing(html in markup()) {
        let once = sanitize_html(&html);
        prop_assert_eq!(sanitize_html(&once), once.clone());
        prop_assert!(once.starts_with(OFFLINE_MARKER));
        prop_assert!(!once.contains("<base"));
    }

    #[test]
    fn links_are_unique_and_in_first_seen_order(html in markup()) {
        let links = extract_links(&html);
        let mut expected: Vec<String> = Vec::new();
        let mut rest = html.as_str();
        while let Some(pos) = rest.find("href=\"http") {
            let start = pos + "href=\"".len();
            let end = rest[start..].find('"').map_or(rest.len(), |e| start + e);
            let link = rest[start..end].to_string();
            if !expected.contains(&link) {
                expected.push(link);
            }
            rest = &rest[end..];
        }
        prop_assert_eq!(links, expected);
    }
}
