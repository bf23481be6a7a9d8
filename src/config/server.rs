// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for the search server

use std::env;
use std::time::Duration;

/// Default Brave web-search endpoint
pub const DEFAULT_PROVIDER_URL: &str = "https://api.search.brave.com/res/v1/web/search";

/// Hard upper bound the provider accepts for the result count
pub const MAX_PROVIDER_RESULTS: usize = 20;

/// Configuration for the search server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind host
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Number of external results requested per metered search
    pub result_limit: usize,
    /// Price of one metered web search, in wallet units
    pub web_search_cost: u64,
    /// Provider endpoint
    pub provider_url: String,
    /// Provider request timeout
    pub provider_timeout: Duration,
    /// Number of call records kept in memory
    pub call_record_capacity: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let parsed = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());

        Self {
            host: lookup("API_HOST").unwrap_or(defaults.host),
            port: lookup("API_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            result_limit: parsed("SEARCH_RESULT_LIMIT")
                .map(|v| (v as usize).clamp(1, MAX_PROVIDER_RESULTS))
                .unwrap_or(defaults.result_limit),
            web_search_cost: parsed("WEB_SEARCH_COST").unwrap_or(defaults.web_search_cost),
            provider_url: lookup("PROVIDER_BASE_URL").unwrap_or(defaults.provider_url),
            provider_timeout: parsed("PROVIDER_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.provider_timeout),
            call_record_capacity: parsed("CALL_RECORD_CAPACITY")
                .map(|v| v as usize)
                .unwrap_or(defaults.call_record_capacity),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.web_search_cost == 0 {
            return Err("Web search cost must be greater than 0".to_string());
        }
        if self.provider_timeout.is_zero() {
            return Err("Provider timeout must be greater than 0".to_string());
        }
        if self.call_record_capacity == 0 {
            return Err("Call record capacity must be greater than 0".to_string());
        }
        if url::Url::parse(&self.provider_url).is_err() {
            return Err(format!("Invalid provider URL: {}", self.provider_url));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            result_limit: 10,
            web_search_cost: 1,
            provider_url: DEFAULT_PROVIDER_URL.to_string(),
            provider_timeout: Duration::from_secs(10),
            call_record_capacity: 1000,
        }
    }
}
