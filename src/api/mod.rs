// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod errors;
pub mod http_server;
pub mod search;
pub mod tools;

pub use errors::{ApiError, ErrorResponse};
pub use http_server::{create_app, start_server, AppState, BuildInfo, HealthParams, HealthResponse};
pub use search::{search_handler, web_handler, SearchParams};
pub use tools::{get_tool_handler, list_tools_handler, ToolListResponse};
