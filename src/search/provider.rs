// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Web search client trait definition

use async_trait::async_trait;

use super::types::{ExternalResult, SearchError};

/// Client for the external (metered) web-search provider
///
/// Implementations make exactly one outbound attempt per call and never retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WebSearchClient: Send + Sync {
    /// Perform a web search
    ///
    /// # Arguments
    /// * `query` - The search query string
    /// * `limit` - Maximum number of results to return
    ///
    /// # Returns
    /// Results in provider order (possibly empty), or an error
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<ExternalResult>, SearchError>;

    /// Provider name for logging and call records
    fn name(&self) -> &'static str;
}
