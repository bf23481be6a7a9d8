// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Bounded in-memory call recorder

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::RwLock;
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

use crate::utils::truncate_chars;

/// Request/response snippets are cut to this many code points
pub const SNIPPET_MAX_CHARS: usize = 1024;

/// A single outbound call, as observed by the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRecord {
    pub id: Uuid,
    /// Provider name, e.g. "brave"
    pub provider: String,
    /// HTTP verb
    pub method: String,
    /// Target URL (never carries the credential)
    pub url: String,
    /// HTTP status, 0 if the network was never reached
    pub status: u16,
    /// Wall-clock time spent on the network call
    #[serde(with = "duration_ms")]
    pub duration: Duration,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub request_snippet: String,
    pub response_snippet: String,
    pub recorded_at: DateTime<Utc>,
}

impl CallRecord {
    /// Start a record for `method url` against `provider`
    pub fn new(provider: &str, method: &str, url: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            provider: provider.to_string(),
            method: method.to_string(),
            url: url.to_string(),
            status: 0,
            duration: Duration::ZERO,
            error: None,
            request_snippet: String::new(),
            response_snippet: String::new(),
            recorded_at: Utc::now(),
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_error(mut self, error: impl ToString) -> Self {
        self.error = Some(error.to_string());
        self
    }

    pub fn with_request(mut self, body: &str) -> Self {
        self.request_snippet = truncate_chars(body, SNIPPET_MAX_CHARS).to_string();
        self
    }

    pub fn with_response(mut self, body: &str) -> Self {
        self.response_snippet = truncate_chars(body, SNIPPET_MAX_CHARS).to_string();
        self
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none() && (200..300).contains(&self.status)
    }
}

/// Sink for outbound call records
pub trait CallRecorder: Send + Sync {
    fn record(&self, record: CallRecord);
}

/// Keeps the most recent records in a ring, evicting the oldest
pub struct InMemoryCallRecorder {
    records: RwLock<VecDeque<CallRecord>>,
    capacity: usize,
}

impl InMemoryCallRecorder {
    /// Create a recorder holding at most `capacity` records
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: RwLock::new(VecDeque::with_capacity(capacity.min(1024))),
            capacity,
        }
    }

    /// Most recent records, newest first
    pub fn recent(&self, limit: usize) -> Vec<CallRecord> {
        match self.records.read() {
            Ok(records) => records.iter().rev().take(limit).cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CallRecorder for InMemoryCallRecorder {
    fn record(&self, record: CallRecord) {
        let duration_ms = record.duration.as_millis() as u64;
        match &record.error {
            Some(error) => warn!(
                provider = %record.provider,
                method = %record.method,
                status = record.status,
                duration_ms,
                error = %error,
                "External call failed"
            ),
            None => info!(
                provider = %record.provider,
                method = %record.method,
                status = record.status,
                duration_ms,
                "External call completed"
            ),
        }

        let mut records = match self.records.write() {
            Ok(r) => r,
            Err(_) => return,
        };
        if records.len() >= self.capacity {
            records.pop_front();
        }
        records.push_back(record);
    }
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}
