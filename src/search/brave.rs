// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Brave Search API client
//!
//! Issues a single GET per search with a fixed client-wide timeout and
//! reports every attempt to the [`CallRecorder`], whatever the outcome.

use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use url::Url;

use super::provider::WebSearchClient;
use super::types::{ExternalResult, SearchError};
use crate::config::{CredentialSource, DEFAULT_PROVIDER_URL, MAX_PROVIDER_RESULTS};
use crate::telemetry::{CallRecord, CallRecorder, SNIPPET_MAX_CHARS};
use crate::utils::truncate_chars;

const PROVIDER: &str = "brave";
const METHOD: &str = "GET";

/// Brave Search API client
pub struct BraveSearchClient {
    client: Client,
    base_url: String,
    timeout: Duration,
    credentials: Arc<dyn CredentialSource>,
    recorder: Arc<dyn CallRecorder>,
}

impl BraveSearchClient {
    /// Create a client against the public Brave endpoint with a 10 second timeout
    pub fn new(
        credentials: Arc<dyn CredentialSource>,
        recorder: Arc<dyn CallRecorder>,
    ) -> Result<Self, SearchError> {
        Self::with_endpoint(
            DEFAULT_PROVIDER_URL,
            Duration::from_secs(10),
            credentials,
            recorder,
        )
    }

    /// Create a client against an arbitrary endpoint
    ///
    /// # Arguments
    /// * `base_url` - Provider search endpoint
    /// * `timeout` - Whole-request timeout applied to every call
    pub fn with_endpoint(
        base_url: impl Into<String>,
        timeout: Duration,
        credentials: Arc<dyn CredentialSource>,
        recorder: Arc<dyn CallRecorder>,
    ) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SearchError::InvalidRequest {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            timeout,
            credentials,
            recorder,
        })
    }

    fn build_url(&self, query: &str, limit: usize) -> Result<Url, SearchError> {
        let count = limit.clamp(1, MAX_PROVIDER_RESULTS).to_string();
        Url::parse_with_params(&self.base_url, &[("q", query), ("count", count.as_str())]).map_err(
            |e| SearchError::InvalidRequest {
                message: format!("Bad provider URL '{}': {}", self.base_url, e),
            },
        )
    }

    /// Record a failed attempt; the recorded status always matches the error's
    fn fail(&self, record: CallRecord, error: SearchError) -> SearchError {
        self.recorder.record(
            record
                .with_status(error.recorded_status())
                .with_error(&error),
        );
        error
    }
}

#[async_trait]
impl WebSearchClient for BraveSearchClient {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<ExternalResult>, SearchError> {
        let record = CallRecord::new(PROVIDER, METHOD, &self.base_url).with_request(query);

        let api_key = match self.credentials.api_key() {
            Some(key) => key,
            None => {
                let error = SearchError::MissingCredential {
                    provider: PROVIDER.to_string(),
                };
                return Err(self.fail(record, error));
            }
        };

        let url = match self.build_url(query, limit) {
            Ok(url) => url,
            Err(error) => return Err(self.fail(record, error)),
        };
        let record = CallRecord {
            url: url.to_string(),
            ..record
        };

        debug!("Sending search to {}: {}", PROVIDER, url);
        let start = Instant::now();

        let sent = self
            .client
            .get(url)
            .header("X-Subscription-Token", api_key)
            .header(ACCEPT, "application/json")
            .send()
            .await;

        let response = match sent {
            Ok(response) => response,
            Err(e) => {
                let record = record.with_duration(start.elapsed());
                let error = if e.is_timeout() {
                    SearchError::Timeout {
                        timeout_ms: self.timeout.as_millis() as u64,
                    }
                } else {
                    SearchError::Transport {
                        message: e.to_string(),
                    }
                };
                return Err(self.fail(record, error));
            }
        };

        let status = response.status();
        let body = response.text().await;
        let record = record
            .with_status(status.as_u16())
            .with_duration(start.elapsed());

        let body = match body {
            Ok(body) => body,
            Err(e) => {
                let error = SearchError::BodyRead {
                    status: status.as_u16(),
                    timed_out: e.is_timeout(),
                    message: e.to_string(),
                };
                return Err(self.fail(record, error));
            }
        };
        let record = record.with_response(&body);

        if !status.is_success() {
            warn!("{} returned HTTP {}", PROVIDER, status);
            let error = SearchError::ApiError {
                status: status.as_u16(),
                body: truncate_chars(&body, SNIPPET_MAX_CHARS).to_string(),
            };
            return Err(self.fail(record, error));
        }

        let data: BraveResponse = match serde_json::from_str(&body) {
            Ok(data) => data,
            Err(e) => {
                let error = SearchError::Decode {
                    status: status.as_u16(),
                    message: e.to_string(),
                };
                return Err(self.fail(record, error));
            }
        };

        self.recorder.record(record);

        Ok(data
            .web
            .and_then(|web| web.results)
            .unwrap_or_default()
            .into_iter()
            .take(limit)
            .map(|r| ExternalResult {
                title: r.title.unwrap_or_default(),
                url: r.url.unwrap_or_default(),
                description: r.description.unwrap_or_default(),
                age: r.age.unwrap_or_default(),
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        PROVIDER
    }
}

#[derive(Debug, serde::Deserialize)]
struct BraveResponse {
    #[serde(default)]
    web: Option<BraveWebResults>,
}

#[derive(Debug, serde::Deserialize)]
struct BraveWebResults {
    #[serde(default)]
    results: Option<Vec<BraveResult>>,
}

/// One web result; Brave sends `null` as readily as it omits a field
#[derive(Debug, serde::Deserialize)]
struct BraveResult {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    age: Option<String>,
}
