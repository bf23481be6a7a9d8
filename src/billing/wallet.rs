// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Account balances backing the quota gate

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Answer to "may this account perform this operation now"
///
/// Produced fresh per request, never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotaDecision {
    pub allowed: bool,
    /// Balance left before this operation is charged
    pub remaining: u64,
    /// Price of one operation
    pub cost: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl QuotaDecision {
    pub fn allow(remaining: u64, cost: u64) -> Self {
        Self {
            allowed: true,
            remaining,
            cost,
            reason: None,
        }
    }

    pub fn deny(remaining: u64, cost: u64, reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            remaining,
            cost,
            reason: Some(reason.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuotaError {
    #[error("Unknown account: {0}")]
    UnknownAccount(String),

    #[error("Insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u64, available: u64 },

    #[error("Wallet unavailable: {0}")]
    Unavailable(String),
}

/// Ledger collaborator holding per-account balances
#[async_trait]
pub trait Wallet: Send + Sync {
    /// Current balance of `account`
    async fn balance(&self, account: &str) -> Result<u64, QuotaError>;

    /// Deduct `amount` if and only if the balance covers it
    async fn debit(&self, account: &str, amount: u64) -> Result<u64, QuotaError>;
}

/// Process-local wallet
///
/// `debit` is a single decrement-if-available under one write lock, so two
/// concurrent debits can never take the balance below zero.
#[derive(Default)]
pub struct InMemoryWallet {
    balances: RwLock<HashMap<String, u64>>,
}

impl InMemoryWallet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit an account, creating it if needed
    pub async fn deposit(&self, account: &str, amount: u64) {
        let mut balances = self.balances.write().await;
        let balance = balances.entry(account.to_string()).or_insert(0);
        *balance = balance.saturating_add(amount);
        info!("Deposited {} to {} (balance: {})", amount, account, balance);
    }
}

#[async_trait]
impl Wallet for InMemoryWallet {
    async fn balance(&self, account: &str) -> Result<u64, QuotaError> {
        let balances = self.balances.read().await;
        balances
            .get(account)
            .copied()
            .ok_or_else(|| QuotaError::UnknownAccount(account.to_string()))
    }

    async fn debit(&self, account: &str, amount: u64) -> Result<u64, QuotaError> {
        let mut balances = self.balances.write().await;
        let balance = balances
            .get_mut(account)
            .ok_or_else(|| QuotaError::UnknownAccount(account.to_string()))?;

        if *balance < amount {
            return Err(QuotaError::InsufficientBalance {
                needed: amount,
                available: *balance,
            });
        }

        *balance -= amount;
        debug!("Debited {} from {} (balance: {})", amount, account, balance);
        Ok(*balance)
    }
}
