// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod auth;
pub mod billing;
pub mod cli;
pub mod config;
pub mod index;
pub mod registry;
pub mod render;
pub mod search;
pub mod telemetry;
pub mod utils;
pub mod version;

// Re-export main types
pub use api::{create_app, AppState};
pub use billing::{QuotaDecision, QuotaGate, Wallet};
pub use config::ServerConfig;
pub use index::{ContentIndex, LocalResult};
pub use registry::{Tool, ToolRegistry};
pub use search::{ExternalResult, SearchError, SearchOrchestrator, WebSearchClient};
pub use telemetry::{CallRecord, CallRecorder};
