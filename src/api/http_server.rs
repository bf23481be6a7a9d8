// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::search::{search_handler, web_handler};
use super::tools::{get_tool_handler, list_tools_handler};
use crate::registry::ToolRegistry;
use crate::search::SearchOrchestrator;
use crate::telemetry::InMemoryCallRecorder;

/// Shared handles for every request; no per-request state lives here
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<SearchOrchestrator>,
    pub registry: Arc<ToolRegistry>,
    pub recorder: Arc<InMemoryCallRecorder>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Provider calls currently held by the call recorder
    pub recorded_calls: usize,
    /// Build details, only with `?verbose=true`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<BuildInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildInfo {
    pub name: String,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HealthParams {
    #[serde(default)]
    pub verbose: bool,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/search", get(search_handler))
        .route("/web", get(web_handler))
        .route("/tools", get(list_tools_handler))
        .route("/tools/:name", get(get_tool_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

pub async fn start_server(state: AppState, addr: &str) -> anyhow::Result<()> {
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Search server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_handler(
    State(state): State<AppState>,
    Query(params): Query<HealthParams>,
) -> Json<HealthResponse> {
    let build = params.verbose.then(|| BuildInfo {
        name: crate::version::NAME.to_string(),
        features: crate::version::FEATURES
            .iter()
            .map(|f| f.to_string())
            .collect(),
    });

    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::version::VERSION.to_string(),
        recorded_calls: state.recorder.len(),
        build,
    })
}
