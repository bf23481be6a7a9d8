// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Shared fixtures for the HTTP route tests

use axum::{
    body::{to_bytes, Body},
    http::{Request, Response, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use serde_json::json;
use site_search::{
    api::{create_app, AppState},
    auth::SessionAuthenticator,
    billing::{InMemoryWallet, WalletQuotaGate, WEB_SEARCH_OPERATION},
    config::StaticCredential,
    index::{InMemoryIndex, LocalResult},
    registry::ToolRegistry,
    search::{BraveSearchClient, SearchOrchestrator},
    telemetry::InMemoryCallRecorder,
};
use std::sync::Arc;
use std::time::Duration as StdDuration;
use tower::util::ServiceExt; // for `oneshot`
use wiremock::MockServer;

pub const ACCOUNT: &str = "alice";
pub const SESSION: &str = "alice-session";

pub struct TestApp {
    pub app: Router,
    pub wallet: Arc<InMemoryWallet>,
    pub recorder: Arc<InMemoryCallRecorder>,
}

/// App wired to in-memory collaborators and a mock provider at `provider`
pub async fn setup(provider: &MockServer, credential: StaticCredential, balance: u64) -> TestApp {
    let index = Arc::new(InMemoryIndex::new());
    let now = Utc::now();
    index
        .insert(
            LocalResult::new("42", "news", "Rust news roundup")
                .with_content("r".repeat(200))
                .with_indexed_at(now - Duration::hours(5)),
        )
        .await;
    index
        .insert(
            LocalResult::new("7", "video", "Rust video").with_metadata("url", json!("https://x")),
        )
        .await;
    index
        .insert(LocalResult::new("8", "video", "Rust video without link"))
        .await;

    let sessions = Arc::new(SessionAuthenticator::new());
    sessions.insert(SESSION, ACCOUNT).await;

    let wallet = Arc::new(InMemoryWallet::new());
    wallet.deposit(ACCOUNT, balance).await;

    let recorder = Arc::new(InMemoryCallRecorder::new(100));
    let client = BraveSearchClient::with_endpoint(
        format!("{}/res/v1/web/search", provider.uri()),
        StdDuration::from_secs(2),
        Arc::new(credential),
        recorder.clone(),
    )
    .expect("client should build");

    let quota = WalletQuotaGate::new(wallet.clone()).with_price(WEB_SEARCH_OPERATION, 1);
    let orchestrator = SearchOrchestrator::new(
        index,
        sessions,
        Arc::new(quota),
        Arc::new(client),
        10,
    );

    let state = AppState {
        orchestrator: Arc::new(orchestrator),
        registry: Arc::new(ToolRegistry::with_builtin_tools()),
        recorder: recorder.clone(),
    };

    TestApp {
        app: create_app(state),
        wallet,
        recorder,
    }
}

pub async fn get(app: &Router, uri: &str, headers: &[(&str, &str)]) -> Response<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_text(response: Response<Body>) -> (StatusCode, String) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

pub fn session_cookie() -> String {
    format!("session={}", SESSION)
}

pub fn brave_results(count: usize) -> serde_json::Value {
    let results: Vec<_> = (0..count)
        .map(|i| {
            json!({
                "title": format!("Web result {}", i),
                "url": format!("https://example.com/{}", i),
                "description": "Found on the web",
                "age": "3 days ago"
            })
        })
        .collect();
    json!({ "web": { "results": results } })
}
