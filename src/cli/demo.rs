// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Demo data for trying the server locally

use chrono::{Duration, Utc};
use serde_json::json;
use tracing::info;

use super::Services;
use crate::index::LocalResult;

pub const DEMO_ACCOUNT: &str = "demo";
pub const DEMO_SESSION: &str = "demo-session";
pub const DEMO_BALANCE: u64 = 10;

/// Load sample index entries, a session token and a wallet balance
pub async fn seed(services: &Services) {
    let now = Utc::now();
    let entries = vec![
        LocalResult::new("1", "news", "Search service launches metered web results")
            .with_content("Signed-in users can now search the wider web. Each successful search is charged to their balance; failed searches are free.")
            .with_indexed_at(now - Duration::hours(2)),
        LocalResult::new("2", "blog", "How our local search ranks pages")
            .with_content("Title matches weigh double, then newer pages win ties.")
            .with_indexed_at(now - Duration::days(3)),
        LocalResult::new("3", "video", "Search tips in two minutes")
            .with_metadata("url", json!("https://videos.example.com/search-tips"))
            .with_indexed_at(now - Duration::minutes(15)),
        LocalResult::new("4", "video", "Behind the scenes of search")
            .with_content("No external link for this one yet."),
        LocalResult::new("5", "docs", "Search query syntax")
            .with_content("Queries are plain text, at most 256 characters."),
    ];

    let count = entries.len();
    for entry in entries {
        services.index.insert(entry).await;
    }
    services.sessions.insert(DEMO_SESSION, DEMO_ACCOUNT).await;
    services.wallet.deposit(DEMO_ACCOUNT, DEMO_BALANCE).await;

    info!(
        "Seeded {} index entries; session cookie 'session={}' has {} credits",
        count, DEMO_SESSION, DEMO_BALANCE
    );
}
