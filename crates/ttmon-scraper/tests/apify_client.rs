//! Integration tests for `Scraper::scrape_target` against a mock Apify API.
//!
//! Uses `wiremock` to stand up a local HTTP server for each test so no real
//! network traffic is made.

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ttmon_core::{MonitoringTarget, TargetKind};
use ttmon_scraper::{ApifyClient, Scraper, ScraperError};

const ACTOR: &str = "test-actor";

fn test_scraper(server: &MockServer) -> Scraper {
    let client = ApifyClient::with_base_url("test-token", 5, &server.uri())
        .expect("failed to build test ApifyClient");
    Scraper::new(client, ACTOR)
}

fn profile_target(strategy: Option<&str>) -> MonitoringTarget {
    MonitoringTarget {
        record_id: "rec1".to_string(),
        target_value: "@blinkist".to_string(),
        kind: TargetKind::Profile,
        active: true,
        results_limit: 30,
        monitoring_strategy: strategy.map(ToString::to_string),
    }
}

fn one_item_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "webVideoUrl": format!("https://www.tiktok.com/@blinkist/video/{id}"),
        "text": "Three books that changed how I work",
        "authorMeta": {"name": "blinkist"},
        "videoMeta": {
            "subtitleLinks": [
                {"language": "eng", "downloadLink": "https://cdn.example.com/sub.srt"}
            ]
        },
        "mediaUrls": ["https://cdn.example.com/video.mp4"],
        "diggCount": 1200,
        "commentCount": "1.1K",
        "playCount": 50000,
        "isSlideshow": false
    })
}

#[tokio::test]
async fn profile_scrape_posts_run_input_and_normalizes_items() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/v2/acts/{ACTOR}/run-sync-get-dataset-items")))
        .and(query_param("token", "test-token"))
        .and(body_partial_json(json!({
            "profiles": ["@blinkist"],
            "resultsPerPage": 30,
            "shouldDownloadSubtitles": true,
            "proxyConfiguration": {"useApifyProxy": true}
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!([one_item_json("7301")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let scraper = test_scraper(&server);
    let contents = scraper
        .scrape_target(&profile_target(Some("Competitor Intelligence")))
        .await
        .expect("scrape should succeed");

    assert_eq!(contents.len(), 1);
    let content = &contents[0];
    assert_eq!(content.content_id, "7301");
    assert_eq!(content.author_username, "blinkist");
    assert_eq!(content.likes, 1200);
    assert_eq!(content.comments, 1100);
    assert_eq!(content.views, 50000);
    assert_eq!(
        content.video_download_url.as_deref(),
        Some("https://cdn.example.com/video.mp4")
    );
    assert_eq!(
        content.subtitle_url.as_deref(),
        Some("https://cdn.example.com/sub.srt")
    );
    assert_eq!(
        content.monitoring_strategy.as_deref(),
        Some("Competitor Intelligence")
    );
    assert!(content.discovered_at.is_some());
}

#[tokio::test]
async fn slideshows_are_dropped_from_the_dataset() {
    let server = MockServer::start().await;

    let mut slideshow = one_item_json("7302");
    slideshow["isSlideshow"] = json!(true);

    Mock::given(method("POST"))
        .and(path(format!("/v2/acts/{ACTOR}/run-sync-get-dataset-items")))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!([one_item_json("7301"), slideshow])),
        )
        .mount(&server)
        .await;

    let scraper = test_scraper(&server);
    let contents = scraper
        .scrape_target(&profile_target(None))
        .await
        .expect("scrape should succeed");

    assert_eq!(contents.len(), 1);
    assert_eq!(contents[0].content_id, "7301");
}

#[tokio::test]
async fn hashtag_and_search_targets_are_unsupported() {
    let server = MockServer::start().await;
    let scraper = test_scraper(&server);

    for kind in [TargetKind::Hashtag, TargetKind::Search] {
        let mut target = profile_target(None);
        target.kind = kind;
        let err = scraper.scrape_target(&target).await.unwrap_err();
        assert!(
            matches!(err, ScraperError::UnsupportedTarget { kind: k } if k == kind),
            "expected UnsupportedTarget for {kind}, got: {err:?}"
        );
    }

    // No HTTP call may be made for unsupported kinds.
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn non_success_status_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/v2/acts/{ACTOR}/run-sync-get-dataset-items")))
        .respond_with(ResponseTemplate::new(402).set_body_string("payment required"))
        .mount(&server)
        .await;

    let scraper = test_scraper(&server);
    let err = scraper
        .scrape_target(&profile_target(None))
        .await
        .unwrap_err();

    match err {
        ScraperError::UnexpectedStatus { status, url } => {
            assert_eq!(status, 402);
            assert!(
                !url.contains("token"),
                "error URL must not leak the API token: {url}"
            );
        }
        other => panic!("expected UnexpectedStatus, got: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/v2/acts/{ACTOR}/run-sync-get-dataset-items")))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"not\": \"an array\"}"))
        .mount(&server)
        .await;

    let scraper = test_scraper(&server);
    let err = scraper
        .scrape_target(&profile_target(None))
        .await
        .unwrap_err();

    assert!(matches!(err, ScraperError::Deserialize { .. }), "got: {err:?}");
}
