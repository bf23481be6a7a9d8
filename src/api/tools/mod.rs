// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tool registry endpoints (`/tools`, `/tools/:name`)

pub mod handler;

pub use handler::{
    get_tool_handler, list_tools_handler, negotiate, FormatParams, Representation,
    ToolListResponse, ToolsView,
};
