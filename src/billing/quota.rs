// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Quota gate: check before a priced operation, consume after it succeeds
//!
//! Check and consume are separate calls. Two concurrent requests from the
//! same account may both pass `check` before either consumes; the wallet's
//! `debit` is the only place that refuses to overdraw.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use super::wallet::{QuotaDecision, QuotaError, Wallet};

/// Operation name for a metered web search
pub const WEB_SEARCH_OPERATION: &str = "web_search";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuotaGate: Send + Sync {
    /// Decide whether `account` may perform `operation` now
    async fn check(&self, account: &str, operation: &str) -> Result<QuotaDecision, QuotaError>;

    /// Charge one `operation` to `account`, returning the new balance
    async fn consume(&self, account: &str, operation: &str) -> Result<u64, QuotaError>;
}

/// Quota gate priced from a fixed operation table over a [`Wallet`]
pub struct WalletQuotaGate<W: Wallet> {
    wallet: Arc<W>,
    prices: HashMap<String, u64>,
}

impl<W: Wallet> WalletQuotaGate<W> {
    pub fn new(wallet: Arc<W>) -> Self {
        Self {
            wallet,
            prices: HashMap::new(),
        }
    }

    /// Set the price of `operation`
    pub fn with_price(mut self, operation: &str, cost: u64) -> Self {
        self.prices.insert(operation.to_string(), cost);
        self
    }

    /// Price of `operation`; unpriced operations cost one unit
    pub fn price(&self, operation: &str) -> u64 {
        self.prices.get(operation).copied().unwrap_or(1)
    }
}

#[async_trait]
impl<W: Wallet + 'static> QuotaGate for WalletQuotaGate<W> {
    async fn check(&self, account: &str, operation: &str) -> Result<QuotaDecision, QuotaError> {
        let cost = self.price(operation);
        let remaining = match self.wallet.balance(account).await {
            Ok(balance) => balance,
            Err(QuotaError::UnknownAccount(_)) => {
                return Ok(QuotaDecision::deny(0, cost, "no balance for this account"))
            }
            Err(e) => return Err(e),
        };

        debug!(
            "Quota check for {} on {}: balance {} cost {}",
            account, operation, remaining, cost
        );

        if remaining >= cost {
            Ok(QuotaDecision::allow(remaining, cost))
        } else {
            Ok(QuotaDecision::deny(remaining, cost, "insufficient balance"))
        }
    }

    async fn consume(&self, account: &str, operation: &str) -> Result<u64, QuotaError> {
        let cost = self.price(operation);
        let balance = self.wallet.debit(account, cost).await?;
        info!(
            "Charged {} for {} ({} units, balance now {})",
            account, operation, cost, balance
        );
        Ok(balance)
    }
}
