// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Content-negotiated tool registry endpoints
//!
//! Each request produces one [`ToolsView`] from the registry, which is then
//! handed to either the JSON or the HTML renderer.

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::registry::{Tool, ToolListing, ToolRegistry};
use crate::render::tools::{render_not_found, render_tool_detail, render_tool_list};

/// Requested response representation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    Json,
    Html,
}

/// Optional `?format=json|html` override
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormatParams {
    pub format: Option<String>,
}

/// JSON listing body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolListResponse {
    pub tools: Vec<Tool>,
    pub count: usize,
}

/// Registry data for one response, independent of representation
#[derive(Debug, Clone, PartialEq)]
pub enum ToolsView {
    Listing(ToolListing),
    Detail(Tool),
    Missing(String),
}

impl ToolsView {
    pub fn listing(registry: &ToolRegistry) -> Self {
        ToolsView::Listing(registry.snapshot())
    }

    pub fn lookup(registry: &ToolRegistry, name: &str) -> Self {
        match registry.get(name) {
            Some(tool) => ToolsView::Detail(tool),
            None => ToolsView::Missing(name.to_string()),
        }
    }
}

/// Pick JSON or HTML from the `format` override, else the `Accept` header
///
/// Among media ranges naming JSON or HTML the highest `q` wins, earlier
/// ranges breaking ties. Ranges with `q=0` are refused. Anything else is HTML.
pub fn negotiate(headers: &HeaderMap, params: &FormatParams) -> Result<Representation, ApiError> {
    if let Some(format) = params.format.as_deref() {
        return match format.to_ascii_lowercase().as_str() {
            "json" => Ok(Representation::Json),
            "html" => Ok(Representation::Html),
            other => Err(ApiError::InvalidRequest(format!(
                "unsupported format: {}",
                other
            ))),
        };
    }

    let accept = headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    let mut best: Option<(Representation, f32)> = None;
    for range in accept.split(',') {
        let mut parts = range.split(';');
        let media = parts.next().unwrap_or("").trim().to_ascii_lowercase();
        let representation = if media == "application/json" || media.ends_with("+json") {
            Representation::Json
        } else if media == "text/html" || media == "application/xhtml+xml" {
            Representation::Html
        } else {
            continue;
        };

        let weight = quality(parts);
        if weight <= 0.0 {
            continue;
        }
        if best.map_or(true, |(_, q)| weight > q) {
            best = Some((representation, weight));
        }
    }
    Ok(best.map_or(Representation::Html, |(representation, _)| representation))
}

/// `q` parameter of one media range; missing or unparseable means 1
fn quality<'a>(params: impl Iterator<Item = &'a str>) -> f32 {
    params
        .filter_map(|param| param.trim().strip_prefix("q="))
        .filter_map(|q| q.trim().parse::<f32>().ok())
        .next()
        .map_or(1.0, |q| q.clamp(0.0, 1.0))
}

pub fn render_json(view: ToolsView) -> Response {
    match view {
        ToolsView::Listing(listing) => {
            let count = listing.count();
            Json(ToolListResponse {
                tools: listing.tools,
                count,
            })
            .into_response()
        }
        ToolsView::Detail(tool) => Json(tool).into_response(),
        ToolsView::Missing(_) => ApiError::NotFound("tool not found".to_string()).into_response(),
    }
}

pub fn render_html(view: ToolsView) -> Response {
    match view {
        ToolsView::Listing(listing) => Html(render_tool_list(&listing)).into_response(),
        ToolsView::Detail(tool) => Html(render_tool_detail(&tool)).into_response(),
        ToolsView::Missing(_) => (StatusCode::NOT_FOUND, Html(render_not_found())).into_response(),
    }
}

fn respond(view: ToolsView, representation: Representation) -> Response {
    match representation {
        Representation::Json => render_json(view),
        Representation::Html => render_html(view),
    }
}

/// GET /tools - list all tools
pub async fn list_tools_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<FormatParams>,
) -> Response {
    let representation = match negotiate(&headers, &params) {
        Ok(r) => r,
        Err(e) => return e.into_response(),
    };
    respond(ToolsView::listing(&state.registry), representation)
}

/// GET /tools/:name - describe one tool
pub async fn get_tool_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
    Query(params): Query<FormatParams>,
) -> Response {
    let representation = match negotiate(&headers, &params) {
        Ok(r) => r,
        Err(e) => return e.into_response(),
    };
    let view = ToolsView::lookup(&state.registry, &name);
    if let ToolsView::Missing(ref missing) = view {
        debug!("Tool lookup miss: {}", missing);
    }
    respond(view, representation)
}
