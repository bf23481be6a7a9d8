// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Provider credential sources
//!
//! Credentials are resolved on every call rather than captured at startup,
//! so a key rotated in the environment takes effect on the next request.

use std::env;

/// Environment variable holding the Brave Search API key
pub const BRAVE_API_KEY_VAR: &str = "BRAVE_API_KEY";

/// Source of the provider API key, consulted at call time
pub trait CredentialSource: Send + Sync {
    /// Current API key, or `None` when unset or empty
    fn api_key(&self) -> Option<String>;
}

/// Reads the key from a process environment variable on each call
#[derive(Debug, Clone)]
pub struct EnvCredential {
    var: String,
}

impl EnvCredential {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    pub fn brave() -> Self {
        Self::new(BRAVE_API_KEY_VAR)
    }
}

impl CredentialSource for EnvCredential {
    fn api_key(&self) -> Option<String> {
        env::var(&self.var).ok().filter(|key| !key.trim().is_empty())
    }
}

/// Fixed key, mainly for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct StaticCredential(Option<String>);

impl StaticCredential {
    pub fn new(key: impl Into<String>) -> Self {
        Self(Some(key.into()))
    }

    pub fn missing() -> Self {
        Self(None)
    }
}

impl CredentialSource for StaticCredential {
    fn api_key(&self) -> Option<String> {
        self.0.clone().filter(|key| !key.trim().is_empty())
    }
}
