// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! User query validation shared by the local and metered search paths

use thiserror::Error;

/// Maximum query length in Unicode code points
pub const MAX_QUERY_CHARS: usize = 256;

/// Query validation failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// Query exceeds [`MAX_QUERY_CHARS`]
    #[error("Query too long ({length} characters, max {max})")]
    TooLong { length: usize, max: usize },
}

/// A trimmed, length-checked search query
///
/// An empty query is valid and means "show the empty state".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    /// Trim surrounding whitespace and enforce the length limit
    pub fn parse(raw: &str) -> Result<Self, QueryError> {
        let trimmed = raw.trim();
        let length = trimmed.chars().count();
        if length > MAX_QUERY_CHARS {
            return Err(QueryError::TooLong {
                length,
                max: MAX_QUERY_CHARS,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for Query {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
