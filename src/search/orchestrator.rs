// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Per-request control flow for the free and metered search paths
//!
//! Metered path ordering: validate -> authenticate -> quota check ->
//! external call -> consume on success. Nothing is retried and no state
//! survives the request.

use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::provider::WebSearchClient;
use super::query::{Query, QueryError};
use super::types::ExternalResult;
use crate::auth::Authenticator;
use crate::billing::{QuotaDecision, QuotaGate, WEB_SEARCH_OPERATION};
use crate::index::{ContentIndex, LocalResult};
use axum::http::HeaderMap;

/// Number of local results shown per query
pub const LOCAL_RESULT_LIMIT: usize = 10;

/// Terminal state of a local search
#[derive(Debug, Clone, PartialEq)]
pub enum LocalOutcome {
    Empty,
    BadRequest(QueryError),
    NoResults { query: String },
    Results { query: String, results: Vec<LocalResult> },
    Unavailable { query: String },
}

/// Terminal state of a metered web search
#[derive(Debug, Clone, PartialEq)]
pub enum WebOutcome {
    Empty,
    BadRequest(QueryError),
    Unauthorized,
    QuotaExceeded { query: String, decision: QuotaDecision },
    Unavailable { query: String },
    NoResults { query: String },
    Results { query: String, results: Vec<ExternalResult> },
}

/// Ties the index, auth, quota gate and provider client together
pub struct SearchOrchestrator {
    index: Arc<dyn ContentIndex>,
    auth: Arc<dyn Authenticator>,
    quota: Arc<dyn QuotaGate>,
    client: Arc<dyn WebSearchClient>,
    result_limit: usize,
}

impl SearchOrchestrator {
    pub fn new(
        index: Arc<dyn ContentIndex>,
        auth: Arc<dyn Authenticator>,
        quota: Arc<dyn QuotaGate>,
        client: Arc<dyn WebSearchClient>,
        result_limit: usize,
    ) -> Self {
        Self {
            index,
            auth,
            quota,
            client,
            result_limit,
        }
    }

    /// Free lookup against the local index
    pub async fn local_search(&self, raw_query: &str) -> LocalOutcome {
        let query = match Query::parse(raw_query) {
            Ok(query) => query,
            Err(e) => {
                debug!("Rejected local query: {}", e);
                return LocalOutcome::BadRequest(e);
            }
        };
        if query.is_empty() {
            return LocalOutcome::Empty;
        }

        let query_text = query.as_str().to_string();
        match self.index.search(query.as_str(), LOCAL_RESULT_LIMIT).await {
            Ok(results) if results.is_empty() => LocalOutcome::NoResults { query: query_text },
            Ok(results) => LocalOutcome::Results {
                query: query_text,
                results,
            },
            Err(e) => {
                error!("Local index search failed: {}", e);
                LocalOutcome::Unavailable { query: query_text }
            }
        }
    }

    /// Metered lookup against the external provider
    pub async fn web_search(&self, raw_query: &str, headers: &HeaderMap) -> WebOutcome {
        let query = match Query::parse(raw_query) {
            Ok(query) => query,
            Err(e) => {
                debug!("Rejected web query: {}", e);
                return WebOutcome::BadRequest(e);
            }
        };
        if query.is_empty() {
            return WebOutcome::Empty;
        }
        let query_text = query.as_str().to_string();

        let account = match self.auth.authenticate(headers).await {
            Some(account) => account,
            None => return WebOutcome::Unauthorized,
        };

        let decision = match self.quota.check(&account.id, WEB_SEARCH_OPERATION).await {
            Ok(decision) => decision,
            Err(e) => {
                error!(account = %account.id, "Quota check failed: {}", e);
                return WebOutcome::Unavailable { query: query_text };
            }
        };
        if !decision.allowed {
            info!(
                account = %account.id,
                remaining = decision.remaining,
                cost = decision.cost,
                "Web search denied by quota"
            );
            return WebOutcome::QuotaExceeded {
                query: query_text,
                decision,
            };
        }

        let results = match self.client.search(query.as_str(), self.result_limit).await {
            Ok(results) => results,
            Err(e) => {
                if e.is_configuration() {
                    error!(provider = self.client.name(), "Web search misconfigured: {}", e);
                } else {
                    warn!(provider = self.client.name(), "Web search failed: {}", e);
                }
                return WebOutcome::Unavailable { query: query_text };
            }
        };

        // Charged only after a confirmed success; a lost race is logged, not surfaced
        if let Err(e) = self.quota.consume(&account.id, WEB_SEARCH_OPERATION).await {
            warn!(account = %account.id, "Failed to charge web search: {}", e);
        }

        if results.is_empty() {
            WebOutcome::NoResults { query: query_text }
        } else {
            WebOutcome::Results {
                query: query_text,
                results,
            }
        }
    }
}
