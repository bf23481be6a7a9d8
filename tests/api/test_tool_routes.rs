// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Content negotiation tests for `/tools` and `/tools/:name`

use axum::http::StatusCode;
use site_search::{api::ToolListResponse, config::StaticCredential, registry::builtin_tools};
use wiremock::MockServer;

use super::common::{body_text, get, setup, TestApp};

async fn app() -> TestApp {
    let provider = MockServer::start().await;
    setup(&provider, StaticCredential::new("k"), 5).await
}

#[tokio::test]
async fn test_json_listing_count_matches_entries() {
    let test = app().await;
    let (status, body) =
        body_text(get(&test.app, "/tools", &[("accept", "application/json")]).await).await;
    assert_eq!(status, StatusCode::OK);

    let listing: ToolListResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(listing.count, listing.tools.len());
    assert_eq!(listing.count, builtin_tools().len());
}

#[tokio::test]
async fn test_json_detail_is_raw_tool() {
    let test = app().await;
    let (status, body) = body_text(
        get(&test.app, "/tools/web_search", &[("accept", "application/json")]).await,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let tool: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(tool["name"], "web_search");
    assert_eq!(tool["parameters"]["q"]["required"], true);
    assert_eq!(tool["parameters"]["q"]["type"], "string");
}

#[tokio::test]
async fn test_missing_tool_json_error() {
    let test = app().await;
    let (status, body) = body_text(
        get(&test.app, "/tools/missing", &[("accept", "application/json")]).await,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&body).unwrap(),
        serde_json::json!({ "error": "tool not found" })
    );
}

#[tokio::test]
async fn test_missing_tool_html_page() {
    let test = app().await;
    let (status, body) = body_text(get(&test.app, "/tools/missing", &[]).await).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("<h1>Not Found</h1>"));
    assert!(serde_json::from_str::<serde_json::Value>(&body).is_err());
}

#[tokio::test]
async fn test_html_listing_and_detail() {
    let test = app().await;
    let (status, html) =
        body_text(get(&test.app, "/tools", &[("accept", "text/html")]).await).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<h2>search</h2>"));
    assert!(html.contains("<span class=\"required\">*</span>"));
    assert!(html.contains(&format!("{} tools in 2 categories", builtin_tools().len())));

    let (_, html) = body_text(get(&test.app, "/tools/list_tools", &[]).await).await;
    assert!(html.contains("no-parameters"));
}

#[tokio::test]
async fn test_accept_quality_values_are_weighed() {
    let test = app().await;
    let (status, body) = body_text(
        get(
            &test.app,
            "/tools",
            &[("accept", "text/html;q=0.1, application/json")],
        )
        .await,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(serde_json::from_str::<ToolListResponse>(&body).is_ok());
}

#[tokio::test]
async fn test_format_query_overrides_accept() {
    let test = app().await;
    let (status, body) = body_text(
        get(&test.app, "/tools?format=json", &[("accept", "text/html")]).await,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(serde_json::from_str::<ToolListResponse>(&body).is_ok());

    let (status, _) = body_text(get(&test.app, "/tools?format=yaml", &[]).await).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health() {
    let test = app().await;
    let (status, body) = body_text(get(&test.app, "/health", &[]).await).await;
    assert_eq!(status, StatusCode::OK);
    let health: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(health["status"], "ok");
    assert_eq!(health["recorded_calls"], 0);
    assert!(health.get("build").is_none());
}

#[tokio::test]
async fn test_verbose_health_includes_build_details() {
    let test = app().await;
    let (status, body) = body_text(get(&test.app, "/health?verbose=true", &[]).await).await;
    assert_eq!(status, StatusCode::OK);
    let health: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(health["build"]["name"], "site-search");
    assert!(health["build"]["features"]
        .as_array()
        .unwrap()
        .iter()
        .any(|f| f == "metered-web-search"));
}
