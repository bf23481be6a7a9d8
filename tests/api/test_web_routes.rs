// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Route tests for the metered `/web` endpoint
//!
//! These verify that:
//! - validation and authentication happen before any provider call
//! - a successful call charges exactly once
//! - a failed call is recorded but never charged
//! - provider internals never reach the rendered page

use axum::http::StatusCode;
use site_search::{billing::Wallet, config::StaticCredential};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::common::{body_text, brave_results, get, session_cookie, setup, ACCOUNT};

async fn mount_results(provider: &MockServer, count: usize, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/res/v1/web/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(brave_results(count)))
        .expect(expected_calls)
        .mount(provider)
        .await;
}

#[tokio::test]
async fn test_unauthenticated_request_is_rejected_without_charge() {
    let provider = MockServer::start().await;
    mount_results(&provider, 3, 0).await;
    let test = setup(&provider, StaticCredential::new("k"), 5).await;

    let (status, _) = body_text(get(&test.app, "/web?q=rust", &[]).await).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = body_text(
        get(&test.app, "/web?q=rust", &[("cookie", "session=forged")]).await,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    assert_eq!(test.wallet.balance(ACCOUNT).await.unwrap(), 5);
    assert!(test.recorder.is_empty());
}

#[tokio::test]
async fn test_empty_and_oversized_queries_skip_everything() {
    let provider = MockServer::start().await;
    mount_results(&provider, 3, 0).await;
    let test = setup(&provider, StaticCredential::new("k"), 5).await;
    let cookie = session_cookie();

    let (status, html) = body_text(get(&test.app, "/web", &[]).await).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("empty-state"));

    let uri = format!("/web?q={}", "b".repeat(300));
    let (status, _) = body_text(get(&test.app, &uri, &[("cookie", cookie.as_str())]).await).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(test.wallet.balance(ACCOUNT).await.unwrap(), 5);
}

#[tokio::test]
async fn test_successful_search_charges_once() {
    let provider = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/res/v1/web/search"))
        .and(query_param("q", "rust lang"))
        .and(query_param("count", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(brave_results(2)))
        .expect(1)
        .mount(&provider)
        .await;
    let test = setup(&provider, StaticCredential::new("k"), 5).await;
    let cookie = session_cookie();

    let (status, html) = body_text(
        get(&test.app, "/web?q=%20rust%20lang%20", &[("cookie", cookie.as_str())]).await,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Web result 0"));
    assert!(html.contains("target=\"_blank\""));
    assert!(html.contains("3 days ago"));

    assert_eq!(test.wallet.balance(ACCOUNT).await.unwrap(), 4);
    assert_eq!(test.recorder.len(), 1);
}

#[tokio::test]
async fn test_bearer_token_is_accepted() {
    let provider = MockServer::start().await;
    mount_results(&provider, 1, 1).await;
    let test = setup(&provider, StaticCredential::new("k"), 5).await;

    let (status, _) = body_text(
        get(
            &test.app,
            "/web?q=rust",
            &[("authorization", "Bearer alice-session")],
        )
        .await,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(test.wallet.balance(ACCOUNT).await.unwrap(), 4);
}

#[tokio::test]
async fn test_empty_provider_results_still_charge() {
    let provider = MockServer::start().await;
    mount_results(&provider, 0, 1).await;
    let test = setup(&provider, StaticCredential::new("k"), 5).await;
    let cookie = session_cookie();

    let (status, html) = body_text(get(&test.app, "/web?q=rust", &[("cookie", cookie.as_str())]).await).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("no-results"));
    assert_eq!(test.wallet.balance(ACCOUNT).await.unwrap(), 4);
}

#[tokio::test]
async fn test_provider_failure_is_free_and_recorded() {
    let provider = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal provider trace id=123"))
        .expect(1)
        .mount(&provider)
        .await;
    let test = setup(&provider, StaticCredential::new("k"), 5).await;
    let cookie = session_cookie();

    let (status, html) = body_text(get(&test.app, "/web?q=rust", &[("cookie", cookie.as_str())]).await).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(html.contains("temporarily unavailable"));
    assert!(!html.contains("trace id"));

    assert_eq!(test.wallet.balance(ACCOUNT).await.unwrap(), 5);
    let records = test.recorder.recent(10);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, 500);
}

#[tokio::test]
async fn test_provider_timeout_is_free() {
    let provider = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(brave_results(1))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&provider)
        .await;
    let test = setup(&provider, StaticCredential::new("k"), 5).await;
    let cookie = session_cookie();

    let (status, _) = body_text(get(&test.app, "/web?q=slow", &[("cookie", cookie.as_str())]).await).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(test.wallet.balance(ACCOUNT).await.unwrap(), 5);
    assert_eq!(test.recorder.recent(1)[0].status, 0);
}

#[tokio::test]
async fn test_missing_credential_looks_like_outage_to_user() {
    let provider = MockServer::start().await;
    mount_results(&provider, 3, 0).await;
    let test = setup(&provider, StaticCredential::missing(), 5).await;
    let cookie = session_cookie();

    let (status, html) = body_text(get(&test.app, "/web?q=rust", &[("cookie", cookie.as_str())]).await).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(html.contains("temporarily unavailable"));
    assert!(!html.contains("API key"));
    assert_eq!(test.wallet.balance(ACCOUNT).await.unwrap(), 5);
    assert_eq!(test.recorder.len(), 1);
}

#[tokio::test]
async fn test_quota_exceeded_blocks_provider_call() {
    let provider = MockServer::start().await;
    mount_results(&provider, 3, 0).await;
    let test = setup(&provider, StaticCredential::new("k"), 0).await;
    let cookie = session_cookie();

    let (status, html) = body_text(get(&test.app, "/web?q=rust", &[("cookie", cookie.as_str())]).await).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("quota-exceeded"));
    assert!(html.contains("costs 1 credit"));
    assert!(html.contains("class=\"search-bar\""));
    assert!(test.recorder.is_empty());
}

#[tokio::test]
async fn test_balance_drains_one_per_successful_search() {
    let provider = MockServer::start().await;
    mount_results(&provider, 1, 2).await;
    let test = setup(&provider, StaticCredential::new("k"), 2).await;
    let cookie = session_cookie();

    for _ in 0..3 {
        get(&test.app, "/web?q=rust", &[("cookie", cookie.as_str())]).await;
    }

    // Third request is denied by the quota gate before reaching the provider
    assert_eq!(test.wallet.balance(ACCOUNT).await.unwrap(), 0);
    assert_eq!(test.recorder.len(), 2);
}

#[tokio::test]
async fn test_provider_text_is_escaped() {
    let provider = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "web": { "results": [{
                "title": "<img src=x onerror=alert(1)>",
                "url": "https://evil.example/\"><script>",
                "description": "<b>bold</b>"
            }]}
        })))
        .mount(&provider)
        .await;
    let test = setup(&provider, StaticCredential::new("k"), 5).await;
    let cookie = session_cookie();

    let (_, html) = body_text(get(&test.app, "/web?q=rust", &[("cookie", cookie.as_str())]).await).await;
    assert!(!html.contains("<img"));
    assert!(!html.contains("<script>"));
    assert!(!html.contains("<b>bold"));
}
