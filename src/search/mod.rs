// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Site search
//!
//! Two request paths share query validation:
//! - free lookups against the local content index (`/search`)
//! - metered, authenticated lookups against the Brave web-search API (`/web`)
//!
//! Key properties of the metered path:
//! - authentication precedes any quota check
//! - one provider attempt per request, bounded by a timeout, never retried
//! - quota consumed only after the provider call succeeds
//! - every provider attempt is recorded, success or failure

pub mod brave;
pub mod orchestrator;
pub mod provider;
pub mod query;
pub mod types;

// Re-export commonly used types
pub use brave::BraveSearchClient;
pub use orchestrator::{LocalOutcome, SearchOrchestrator, WebOutcome, LOCAL_RESULT_LIMIT};
pub use provider::WebSearchClient;
pub use query::{Query, QueryError, MAX_QUERY_CHARS};
pub use types::{ExternalResult, SearchError};
