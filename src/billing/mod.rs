// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Metering of priced operations

pub mod quota;
pub mod wallet;

pub use quota::{QuotaGate, WalletQuotaGate, WEB_SEARCH_OPERATION};
pub use wallet::{InMemoryWallet, QuotaDecision, QuotaError, Wallet};

#[cfg(test)]
pub use quota::MockQuotaGate;
