//! End-to-end tests of a single target pipeline against fake collaborators

use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use torscrape::content_saver::url_digest;
use torscrape::page_extractor::{LinkExtractor, MarkupSanitizer};
use torscrape::scan_engine::{FailureKind, TargetStatus, process_target};
use torscrape::utils::constants::{
    LINKS_FILE, OFFLINE_MARKER, SCREENSHOT_FILE, SITE_DATA_FILE, SNAPSHOT_FILE,
};

mod common;
use common::{FakeCapturer, FakeFetcher, FakeResponse, context, create_test_html, only_artifact_dir};

const TARGET: &str = "http://exampleonionaddress.onion/index.html";

#[tokio::test]
async fn gzip_page_produces_full_artifact_bundle() {
    let output = TempDir::new().unwrap();
    let html = create_test_html(
        "Test Page",
        r#"<a href="http://example.com/x">one</a> <a href="http://example.com/x">two</a>
           <img src="/logo.png">"#,
    );
    let fetcher = FakeFetcher::new().respond(TARGET, FakeResponse::gzipped(&html));
    let ctx = context(fetcher, output.path())
        .with_capturer(Arc::new(FakeCapturer::Succeed), Duration::from_secs(5));

    let outcome = process_target(TARGET, &ctx).await;

    assert!(outcome.is_success(), "unexpected outcome: {outcome:?}");
    assert_eq!(outcome.status_code(), Some(200));

    let dir = only_artifact_dir(output.path());
    assert_eq!(outcome.artifact_dir.as_deref(), Some(dir.as_path()));
    let name = dir.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("Test_Page_"), "{name}");
    assert!(
        name.ends_with(&format!("_exampleonionaddress_{}", url_digest(TARGET))),
        "{name}"
    );

    let site_data = std::fs::read_to_string(dir.join(SITE_DATA_FILE)).unwrap();
    assert!(site_data.starts_with(OFFLINE_MARKER));
    assert!(!site_data.contains(r#"href="http://example.com/x""#));
    assert!(!site_data.contains("<base"));
    assert!(site_data.contains(r#"src="""#));

    let links = std::fs::read_to_string(dir.join(LINKS_FILE)).unwrap();
    assert_eq!(links, "http://example.com/x");

    assert!(dir.join(SCREENSHOT_FILE).exists());
    let snapshot = std::fs::read_to_string(dir.join(SNAPSHOT_FILE)).unwrap();
    assert!(snapshot.contains(TARGET));
}

#[tokio::test]
async fn capture_failure_keeps_text_artifacts() {
    let output = TempDir::new().unwrap();
    let html = create_test_html("Broken Render", r#"<a href="https://a.example/">a</a>"#);
    let fetcher = FakeFetcher::new().respond(TARGET, FakeResponse::html(&html));
    let ctx = context(fetcher, output.path())
        .with_capturer(Arc::new(FakeCapturer::Fail), Duration::from_secs(5));

    let outcome = process_target(TARGET, &ctx).await;

    match &outcome.status {
        TargetStatus::Partial { reason, .. } => assert!(reason.contains("browser crashed")),
        other => panic!("expected partial, got {other:?}"),
    }
    let dir = only_artifact_dir(output.path());
    assert!(dir.join(SITE_DATA_FILE).exists());
    assert_eq!(
        std::fs::read_to_string(dir.join(LINKS_FILE)).unwrap(),
        "https://a.example/"
    );
    assert!(!dir.join(SCREENSHOT_FILE).exists());
    assert!(!dir.join(SNAPSHOT_FILE).exists());
}

#[tokio::test]
async fn hanging_capture_is_cut_off_by_its_own_timer() {
    let output = TempDir::new().unwrap();
    let html = create_test_html("Slow", "");
    let fetcher = FakeFetcher::new().respond(TARGET, FakeResponse::html(&html));
    let ctx = context(fetcher, output.path())
        .with_capturer(Arc::new(FakeCapturer::Hang), Duration::from_millis(200));

    let outcome = tokio::time::timeout(Duration::from_secs(10), process_target(TARGET, &ctx))
        .await
        .expect("pipeline must not hang");

    assert!(outcome.is_partial(), "{outcome:?}");
    assert!(only_artifact_dir(output.path()).join(SITE_DATA_FILE).exists());
}

#[tokio::test]
async fn no_capturer_means_plain_success() {
    let output = TempDir::new().unwrap();
    let fetcher = FakeFetcher::new().respond(TARGET, FakeResponse::html("<p>no title</p>"));
    let ctx = context(fetcher, output.path());

    let outcome = process_target(TARGET, &ctx).await;

    assert!(outcome.is_success());
    let dir = only_artifact_dir(output.path());
    let name = dir.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("unknown_title_"), "{name}");
    assert_eq!(std::fs::read_to_string(dir.join(LINKS_FILE)).unwrap(), "");
}

#[tokio::test]
async fn malformed_target_fails_before_fetching() {
    let output = TempDir::new().unwrap();
    let ctx = context(FakeFetcher::new(), output.path());

    let outcome = process_target("not a url", &ctx).await;

    assert_eq!(outcome.failure_kind(), Some(FailureKind::InvalidTarget));
    assert!(outcome.artifact_dir.is_none());
    assert_eq!(std::fs::read_dir(output.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn corrupt_gzip_is_a_read_error_without_artifacts() {
    let output = TempDir::new().unwrap();
    let fetcher = FakeFetcher::new().respond(
        TARGET,
        FakeResponse::raw("gzip", b"this is not gzip".to_vec()),
    );
    let ctx = context(fetcher, output.path());

    let outcome = process_target(TARGET, &ctx).await;

    assert_eq!(outcome.failure_kind(), Some(FailureKind::Read));
    assert_eq!(std::fs::read_dir(output.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn deflate_page_is_decoded() {
    let output = TempDir::new().unwrap();
    let html = create_test_html("Deflated", "");
    let fetcher = FakeFetcher::new().respond(
        TARGET,
        FakeResponse::raw("deflate", common::zlib(html.as_bytes())),
    );
    let ctx = context(fetcher, output.path());

    let outcome = process_target(TARGET, &ctx).await;

    assert!(outcome.is_success());
    let name = only_artifact_dir(output.path())
        .file_name()
        .unwrap()
        .to_string_lossy()
        .to_string();
    assert!(name.starts_with("Deflated_"), "{name}");
}

#[tokio::test]
async fn transport_failures_map_to_failure_kinds() {
    let output = TempDir::new().unwrap();
    let fetcher = FakeFetcher::new()
        .respond(
            "http://slow.onion/",
            FakeResponse::Timeout {
                after: Duration::from_millis(10),
            },
        )
        .respond("http://down.onion/", FakeResponse::Network);
    let ctx = context(fetcher, output.path());

    let slow = process_target("http://slow.onion/", &ctx).await;
    let down = process_target("http://down.onion/", &ctx).await;

    assert_eq!(slow.failure_kind(), Some(FailureKind::Timeout));
    assert_eq!(down.failure_kind(), Some(FailureKind::Network));
    assert_eq!(std::fs::read_dir(output.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn unwritable_output_is_a_write_error() {
    let output = TempDir::new().unwrap();
    let blocker = output.path().join("occupied");
    std::fs::write(&blocker, b"file, not a directory").unwrap();
    let fetcher = FakeFetcher::new().respond(TARGET, FakeResponse::html("<title>x</title>"));
    let ctx = context(fetcher, &blocker);

    let outcome = process_target(TARGET, &ctx).await;

    assert_eq!(outcome.failure_kind(), Some(FailureKind::Write));
}

struct UppercaseSanitizer;

impl MarkupSanitizer for UppercaseSanitizer {
    fn sanitize(&self, html: &str) -> String {
        html.to_uppercase()
    }
}

struct FixedLinks;

impl LinkExtractor for FixedLinks {
    fn extract_links(&self, _html: &str) -> Vec<String> {
        vec!["http://fixed.onion/1".to_string(), "http://fixed.onion/2".to_string()]
    }
}

#[tokio::test]
async fn custom_sanitizer_and_extractor_replace_the_defaults() {
    let output = TempDir::new().unwrap();
    let html = create_test_html("Swapped", r#"<a href="http://example.com/x">x</a>"#);
    let fetcher = FakeFetcher::new().respond(TARGET, FakeResponse::html(&html));
    let ctx = context(fetcher, output.path())
        .with_sanitizer(Arc::new(UppercaseSanitizer))
        .with_link_extractor(Arc::new(FixedLinks));

    let outcome = process_target(TARGET, &ctx).await;

    assert!(outcome.is_success());
    let dir = only_artifact_dir(output.path());
    assert_eq!(
        std::fs::read_to_string(dir.join(SITE_DATA_FILE)).unwrap(),
        html.to_uppercase()
    );
    assert_eq!(
        std::fs::read_to_string(dir.join(LINKS_FILE)).unwrap(),
        "http://fixed.onion/1\nhttp://fixed.onion/2"
    );
}
