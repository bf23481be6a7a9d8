// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod demo;

use anyhow::{anyhow, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;

use crate::api::AppState;
use crate::auth::SessionAuthenticator;
use crate::billing::{InMemoryWallet, WalletQuotaGate, WEB_SEARCH_OPERATION};
use crate::config::{EnvCredential, ServerConfig};
use crate::index::InMemoryIndex;
use crate::registry::ToolRegistry;
use crate::search::{BraveSearchClient, SearchOrchestrator};
use crate::telemetry::InMemoryCallRecorder;

/// Site search server
#[derive(Parser, Debug)]
#[command(name = "site-search")]
#[command(version)]
#[command(about = "Local and metered web search server", long_about = None)]
pub struct Cli {
    /// Bind host
    #[arg(long, env = "API_HOST")]
    pub host: Option<String>,

    /// Bind port
    #[arg(long, env = "API_PORT")]
    pub port: Option<u16>,

    /// Load a demo index, session and wallet balance
    #[arg(long)]
    pub seed_demo: bool,
}

impl Cli {
    /// Environment configuration with command-line overrides applied
    pub fn config(&self) -> Result<ServerConfig> {
        let mut config = ServerConfig::from_env();
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        config.validate().map_err(|e| anyhow!(e))?;
        Ok(config)
    }
}

/// In-memory collaborators behind the application state
pub struct Services {
    pub index: Arc<InMemoryIndex>,
    pub sessions: Arc<SessionAuthenticator>,
    pub wallet: Arc<InMemoryWallet>,
    pub state: AppState,
}

/// Wire collaborators, provider client and registry into an [`AppState`]
pub fn bootstrap(config: &ServerConfig) -> Result<Services> {
    let index = Arc::new(InMemoryIndex::new());
    let sessions = Arc::new(SessionAuthenticator::new());
    let wallet = Arc::new(InMemoryWallet::new());
    let recorder = Arc::new(InMemoryCallRecorder::new(config.call_record_capacity));

    let quota = WalletQuotaGate::new(wallet.clone())
        .with_price(WEB_SEARCH_OPERATION, config.web_search_cost);
    let client = BraveSearchClient::with_endpoint(
        config.provider_url.clone(),
        config.provider_timeout,
        Arc::new(EnvCredential::brave()),
        recorder.clone(),
    )?;

    let orchestrator = SearchOrchestrator::new(
        index.clone(),
        sessions.clone(),
        Arc::new(quota),
        Arc::new(client),
        config.result_limit,
    );

    info!(
        "Web search: {} results per query, {} units per call, {:?} timeout",
        config.result_limit, config.web_search_cost, config.provider_timeout
    );

    Ok(Services {
        index,
        sessions,
        wallet,
        state: AppState {
            orchestrator: Arc::new(orchestrator),
            registry: Arc::new(ToolRegistry::with_builtin_tools()),
            recorder,
        },
    })
}
