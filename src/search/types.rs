// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for web search functionality

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single result returned by the external web-search provider
///
/// Every field is provider-supplied; a missing value is an empty string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalResult {
    /// Title of the result
    pub title: String,
    /// Canonical URL of the result
    pub url: String,
    /// Description/snippet of the result
    pub description: String,
    /// Relative-age label, e.g. "2 days ago"
    pub age: String,
}

/// Errors that can occur while calling the external provider
#[derive(Debug, Error)]
pub enum SearchError {
    /// No credential configured for the provider
    #[error("No API key configured for {provider}")]
    MissingCredential {
        /// Name of the provider missing its credential
        provider: String,
    },

    /// The outbound request could not be constructed
    #[error("Invalid provider request: {message}")]
    InvalidRequest {
        /// Construction failure detail
        message: String,
    },

    /// Search request timed out
    #[error("Search timeout after {timeout_ms}ms")]
    Timeout {
        /// Timeout duration in milliseconds
        timeout_ms: u64,
    },

    /// Network failure before any HTTP status was received
    #[error("Transport error: {message}")]
    Transport {
        /// Underlying transport error
        message: String,
    },

    /// Provider sent a status but the body could not be read
    #[error("Failed to read provider response (status {status}, timed out: {timed_out}): {message}")]
    BodyRead {
        /// HTTP status the provider answered with
        status: u16,
        /// Whether the read hit the request timeout
        timed_out: bool,
        /// Underlying read error
        message: String,
    },

    /// Non-2xx response from the provider
    #[error("Search API error: {status} - {body}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Truncated response body
        body: String,
    },

    /// Provider responded but the body could not be decoded
    #[error("Malformed provider response (status {status}): {message}")]
    Decode {
        /// HTTP status the provider answered with
        status: u16,
        /// Decode failure detail
        message: String,
    },
}

impl SearchError {
    /// Whether this is an operator configuration fault rather than a provider fault
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            SearchError::MissingCredential { .. } | SearchError::InvalidRequest { .. }
        )
    }

    /// HTTP status to record for this failure (0 when the network was never reached)
    pub fn recorded_status(&self) -> u16 {
        match self {
            SearchError::ApiError { status, .. }
            | SearchError::Decode { status, .. }
            | SearchError::BodyRead { status, .. } => *status,
            _ => 0,
        }
    }
}
