// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Route tests for the free `/search` endpoint

use axum::http::StatusCode;
use site_search::config::StaticCredential;
use wiremock::MockServer;

use super::common::{body_text, get, setup};

#[tokio::test]
async fn test_empty_query_renders_empty_state() {
    let provider = MockServer::start().await;
    let test = setup(&provider, StaticCredential::new("k"), 5).await;

    let (status, html) = body_text(get(&test.app, "/search", &[]).await).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("empty-state"));

    let (status, html) = body_text(get(&test.app, "/search?q=%20%20", &[]).await).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("empty-state"));
}

#[tokio::test]
async fn test_oversized_query_is_bad_request() {
    let provider = MockServer::start().await;
    let test = setup(&provider, StaticCredential::new("k"), 5).await;

    let uri = format!("/search?q={}", "a".repeat(257));
    let (status, html) = body_text(get(&test.app, &uri, &[]).await).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(html.contains("Bad request"));
}

#[tokio::test]
async fn test_results_render_links_ages_and_snippets() {
    let provider = MockServer::start().await;
    let test = setup(&provider, StaticCredential::new("k"), 5).await;

    let (status, html) = body_text(get(&test.app, "/search?q=rust", &[]).await).await;
    assert_eq!(status, StatusCode::OK);

    assert!(html.contains("href=\"/news?id=42\""));
    assert!(html.contains("href=\"https://x\""));
    assert!(html.contains("href=\"/video\""));
    assert!(html.contains("5 hours ago"));
    assert!(html.contains(&format!("{}...", "r".repeat(160))));
    assert!(!html.contains(&"r".repeat(161)));
}

#[tokio::test]
async fn test_no_results_state() {
    let provider = MockServer::start().await;
    let test = setup(&provider, StaticCredential::new("k"), 5).await;

    let (status, html) = body_text(get(&test.app, "/search?q=zebra", &[]).await).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("no-results"));
}

#[tokio::test]
async fn test_script_query_is_escaped() {
    let provider = MockServer::start().await;
    let test = setup(&provider, StaticCredential::new("k"), 5).await;

    let (_, html) = body_text(
        get(&test.app, "/search?q=%3Cscript%3Ealert(1)%3C%2Fscript%3E", &[]).await,
    )
    .await;
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
}

#[tokio::test]
async fn test_local_search_never_calls_provider() {
    let provider = MockServer::start().await;
    let test = setup(&provider, StaticCredential::new("k"), 5).await;

    get(&test.app, "/search?q=rust", &[]).await;
    assert!(test.recorder.is_empty());
    assert!(provider.received_requests().await.unwrap().is_empty());
}
