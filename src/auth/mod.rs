// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Session authentication for metered endpoints
//!
//! A session token is accepted from the `session` cookie or from an
//! `Authorization: Bearer` header. Token issuance lives elsewhere.

use async_trait::async_trait;
use axum::http::{header, HeaderMap};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Cookie carrying the session token
pub const SESSION_COOKIE: &str = "session";

/// An authenticated account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Resolve the request's session to an account, if any
    async fn authenticate(&self, headers: &HeaderMap) -> Option<Account>;
}

/// Token-to-account lookup held in memory
#[derive(Default)]
pub struct SessionAuthenticator {
    sessions: RwLock<HashMap<String, String>>,
}

impl SessionAuthenticator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `token` as a session for `account_id`
    pub async fn insert(&self, token: &str, account_id: &str) {
        self.sessions
            .write()
            .await
            .insert(token.to_string(), account_id.to_string());
    }

    pub async fn revoke(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }
}

#[async_trait]
impl Authenticator for SessionAuthenticator {
    async fn authenticate(&self, headers: &HeaderMap) -> Option<Account> {
        let token = session_token(headers)?;
        let sessions = self.sessions.read().await;
        let account = sessions.get(&token).map(|id| Account { id: id.clone() });
        if account.is_none() {
            debug!("Rejected unknown session token");
        }
        account
    }
}

/// Extract the session token from cookies or a bearer header
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let from_cookie = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string());

    let token = from_cookie.or_else(|| {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(|value| value.trim().to_string())
    })?;

    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
