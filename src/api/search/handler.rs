// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search page handlers

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::Html,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::debug;

use crate::api::http_server::AppState;
use crate::render::pages::{render_local, render_web};
use crate::search::{LocalOutcome, WebOutcome};

/// Query string for both search pages: `?q=<string>`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// GET /search - free local index search
///
/// # Responses
/// - 200: empty state, no results, or result cards
/// - 400: query longer than 256 characters
/// - 503: local index unavailable
pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> (StatusCode, Html<String>) {
    let outcome = state.orchestrator.local_search(&params.q).await;
    let status = local_status(&outcome);
    debug!("Local search answered {}", status);
    (status, Html(render_local(&outcome, Utc::now())))
}

/// GET /web - metered external web search
///
/// # Responses
/// - 200: empty state, quota exceeded notice, no results, or result cards
/// - 400: query longer than 256 characters
/// - 401: no valid session
/// - 503: provider or configuration failure (details are logged only)
pub async fn web_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<SearchParams>,
) -> (StatusCode, Html<String>) {
    let outcome = state.orchestrator.web_search(&params.q, &headers).await;
    (web_status(&outcome), Html(render_web(&outcome)))
}

pub fn local_status(outcome: &LocalOutcome) -> StatusCode {
    match outcome {
        LocalOutcome::BadRequest(_) => StatusCode::BAD_REQUEST,
        LocalOutcome::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        LocalOutcome::Empty | LocalOutcome::NoResults { .. } | LocalOutcome::Results { .. } => {
            StatusCode::OK
        }
    }
}

pub fn web_status(outcome: &WebOutcome) -> StatusCode {
    match outcome {
        WebOutcome::BadRequest(_) => StatusCode::BAD_REQUEST,
        WebOutcome::Unauthorized => StatusCode::UNAUTHORIZED,
        WebOutcome::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        WebOutcome::Empty
        | WebOutcome::QuotaExceeded { .. }
        | WebOutcome::NoResults { .. }
        | WebOutcome::Results { .. } => StatusCode::OK,
    }
}
