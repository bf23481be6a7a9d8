// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Local content index
//!
//! The orchestrator only reads [`LocalResult`]s; ranking is the index's own
//! business. [`InMemoryIndex`] is a small reference implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

/// Projection of an indexed entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalResult {
    pub id: String,
    /// Category tag, e.g. "news", "video", "blog"
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexed_at: Option<DateTime<Utc>>,
    /// Category-specific fields, e.g. `url` for videos
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl LocalResult {
    pub fn new(id: impl Into<String>, kind: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            title: title.into(),
            content: None,
            indexed_at: None,
            metadata: HashMap::new(),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_indexed_at(mut self, at: DateTime<Utc>) -> Self {
        self.indexed_at = Some(at);
        self
    }

    pub fn with_metadata(mut self, key: &str, value: serde_json::Value) -> Self {
        self.metadata.insert(key.to_string(), value);
        self
    }

    /// String-valued metadata field, if present and non-empty
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata
            .get(key)
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Index unavailable: {0}")]
    Unavailable(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentIndex: Send + Sync {
    /// Up to `limit` entries matching `query`, most relevant first
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<LocalResult>, IndexError>;
}

/// Term-matching index held in memory
#[derive(Default)]
pub struct InMemoryIndex {
    entries: RwLock<Vec<LocalResult>>,
}

impl InMemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, entry: LocalResult) {
        self.entries.write().await.push(entry);
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    fn score(entry: &LocalResult, terms: &[String]) -> usize {
        let title = entry.title.to_lowercase();
        let content = entry
            .content
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_default();

        terms
            .iter()
            .map(|term| title.matches(term.as_str()).count() * 2 + content.matches(term.as_str()).count())
            .sum()
    }
}

#[async_trait]
impl ContentIndex for InMemoryIndex {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<LocalResult>, IndexError> {
        let terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let entries = self.entries.read().await;
        let mut scored: Vec<(usize, &LocalResult)> = entries
            .iter()
            .map(|entry| (Self::score(entry, &terms), entry))
            .filter(|(score, _)| *score > 0)
            .collect();

        // Higher score first, newer first on ties
        scored.sort_by(|(a_score, a), (b_score, b)| {
            b_score
                .cmp(a_score)
                .then_with(|| b.indexed_at.cmp(&a.indexed_at))
        });

        debug!("Index matched {} entries for '{}'", scored.len(), query);

        Ok(scored
            .into_iter()
            .take(limit)
            .map(|(_, entry)| entry.clone())
            .collect())
    }
}
