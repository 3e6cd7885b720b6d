//! Integration tests for the harvester
//!
//! These tests use wiremock to stand in for the catalog portal and exercise
//! pagination, dedup, failure handling, and the full crawl cycle end-to-end.

use datahound::config::CrawlConfig;
use datahound::crawler::{build_http_client, collect_dataset_urls, run_crawl, Fetcher, FixedDelay};
use datahound::state::VisitedSet;
use std::time::Duration;
use tempfile::NamedTempFile;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointed at the mock portal, with no pacing
fn test_config(portal: &MockServer) -> CrawlConfig {
    let mut config = CrawlConfig::new(Url::parse(&portal.uri()).unwrap());
    config.request_delay = Duration::ZERO;
    config.request_timeout = Duration::from_secs(5);
    config
}

fn test_fetcher() -> Fetcher<FixedDelay> {
    let client = build_http_client(Duration::from_secs(5)).unwrap();
    Fetcher::new(client, FixedDelay::new(Duration::ZERO))
}

/// Builds a listing page with one dataset heading per href
fn listing_html(hrefs: &[&str]) -> String {
    let headings: String = hrefs
        .iter()
        .map(|href| format!(r#"<h2 class="dataset-heading"><a href="{href}">Dataset</a></h2>"#))
        .collect();
    format!("<html><body><div class=\"dataset-list\">{headings}</div></body></html>")
}

const EMPTY_LISTING: &str = "<html><body><p>No datasets found</p></body></html>";

/// Builds a minimal dataset detail page
fn detail_html(title: &str) -> String {
    format!(
        r#"<html><body>
            <h1>{title}</h1>
            <div class="notes">Description of {title}</div>
            <ul class="tag-list"><li><a>cassini</a></li></ul>
            <section id="dataset-resources">
                <a href="/resource/{title}/download">Download</a>
            </section>
        </body></html>"#
    )
}

/// Mounts a listing page for the given tag/page pair
async fn mount_listing(server: &MockServer, tag: &str, page: &str, body: String, hits: u64) {
    Mock::given(method("GET"))
        .and(path("/dataset/"))
        .and(query_param("tags", tag))
        .and(query_param("page", page))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(hits)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_pagination_stops_at_first_empty_page() {
    let server = MockServer::start().await;

    mount_listing(&server, "cassini", "1", listing_html(&["/dataset/a", "/dataset/b"]), 1).await;
    mount_listing(&server, "cassini", "2", listing_html(&["/dataset/c"]), 1).await;
    mount_listing(&server, "cassini", "3", EMPTY_LISTING.to_string(), 1).await;
    // Page 4 must never be requested
    mount_listing(&server, "cassini", "4", listing_html(&["/dataset/d"]), 0).await;

    let config = test_config(&server);
    let mut fetcher = test_fetcher();
    let mut visited = VisitedSet::new();

    let urls = collect_dataset_urls(&mut fetcher, &mut visited, &config, "cassini").await;

    let base = server.uri();
    assert_eq!(
        urls,
        vec![
            format!("{base}/dataset/a"),
            format!("{base}/dataset/b"),
            format!("{base}/dataset/c"),
        ]
    );
}

#[tokio::test]
async fn test_listing_failure_ends_pagination() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dataset/"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    // A failed listing page is treated the same as an empty one
    mount_listing(&server, "cassini", "2", listing_html(&["/dataset/a"]), 0).await;

    let config = test_config(&server);
    let mut fetcher = test_fetcher();
    let mut visited = VisitedSet::new();

    let urls = collect_dataset_urls(&mut fetcher, &mut visited, &config, "cassini").await;
    assert!(urls.is_empty());
}

#[tokio::test]
async fn test_full_crawl_end_to_end() {
    let server = MockServer::start().await;

    mount_listing(
        &server,
        "cassini",
        "1",
        listing_html(&["/dataset/alpha", "/dataset/beta", "/dataset/gamma"]),
        1,
    )
    .await;
    mount_listing(&server, "cassini", "2", EMPTY_LISTING.to_string(), 1).await;

    for name in ["alpha", "beta", "gamma"] {
        Mock::given(method("GET"))
            .and(path(format!("/dataset/{name}")))
            .respond_with(ResponseTemplate::new(200).set_body_string(detail_html(name)))
            .expect(1)
            .mount(&server)
            .await;
    }

    let out = NamedTempFile::new().unwrap();
    let report = run_crawl(test_config(&server), "cassini", out.path())
        .await
        .unwrap();

    assert_eq!(report.discovered, 3);
    assert_eq!(report.written, 3);
    assert_eq!(report.failed, 0);

    let contents = std::fs::read_to_string(out.path()).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);

    let base = server.uri();
    for (line, name) in lines.iter().zip(["alpha", "beta", "gamma"]) {
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        let expected_url = format!("{base}/dataset/{name}");

        // All six documented keys are present
        for key in [
            "dataset_url",
            "title",
            "description",
            "tags",
            "resource_links",
            "landing_page",
        ] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }

        assert_eq!(value["dataset_url"], expected_url.as_str());
        assert_eq!(value["title"], name);
        assert_eq!(
            value["text_sources"],
            serde_json::json!([expected_url.as_str()])
        );
    }
}

#[tokio::test]
async fn test_failed_detail_page_is_counted_and_skipped() {
    let server = MockServer::start().await;

    mount_listing(
        &server,
        "mars",
        "1",
        listing_html(&["/dataset/good", "/dataset/broken", "/dataset/also-good"]),
        1,
    )
    .await;
    mount_listing(&server, "mars", "2", EMPTY_LISTING.to_string(), 1).await;

    for name in ["good", "also-good"] {
        Mock::given(method("GET"))
            .and(path(format!("/dataset/{name}")))
            .respond_with(ResponseTemplate::new(200).set_body_string(detail_html(name)))
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/dataset/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let out = NamedTempFile::new().unwrap();
    let report = run_crawl(test_config(&server), "mars", out.path())
        .await
        .unwrap();

    assert_eq!(report.discovered, 3);
    assert_eq!(report.written, 2);
    assert_eq!(report.failed, 1);

    let contents = std::fs::read_to_string(out.path()).unwrap();
    assert_eq!(contents.lines().count(), 2);
    // Output preserves discovery order
    assert!(contents.lines().next().unwrap().contains("/dataset/good"));
}

#[tokio::test]
async fn test_duplicate_listing_entry_fetched_once() {
    let server = MockServer::start().await;

    // The portal lists the same dataset on both pages (e.g., re-sorted
    // between requests). The fetcher's visited set makes the repeat a no-op.
    mount_listing(&server, "mars", "1", listing_html(&["/dataset/dup"]), 1).await;
    mount_listing(&server, "mars", "2", listing_html(&["/dataset/dup"]), 1).await;
    mount_listing(&server, "mars", "3", EMPTY_LISTING.to_string(), 1).await;

    Mock::given(method("GET"))
        .and(path("/dataset/dup"))
        .respond_with(ResponseTemplate::new(200).set_body_string(detail_html("dup")))
        .expect(1)
        .mount(&server)
        .await;

    let out = NamedTempFile::new().unwrap();
    let report = run_crawl(test_config(&server), "mars", out.path())
        .await
        .unwrap();

    assert_eq!(report.discovered, 2);
    assert_eq!(report.written, 1);
    assert_eq!(report.failed, 1);

    let contents = std::fs::read_to_string(out.path()).unwrap();
    assert_eq!(contents.lines().count(), 1);
}

#[tokio::test]
async fn test_unwritable_output_path_fails_the_run() {
    let server = MockServer::start().await;
    let result = run_crawl(
        test_config(&server),
        "mars",
        std::path::Path::new("/nonexistent-dir/out.jsonl"),
    )
    .await;
    assert!(result.is_err());
}
