// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::Parser;
use site_search::{
    api::start_server,
    cli::{bootstrap, demo, Cli},
    config::BRAVE_API_KEY_VAR,
    version,
};
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting {}", version::banner());

    let cli = Cli::parse();
    let config = cli.config()?;

    if env::var(BRAVE_API_KEY_VAR).map(|v| v.is_empty()).unwrap_or(true) {
        tracing::warn!(
            "{} is not set; web searches will fail until it is",
            BRAVE_API_KEY_VAR
        );
    }

    let services = bootstrap(&config)?;
    if cli.seed_demo {
        demo::seed(&services).await;
    }

    start_server(services.state, &config.bind_addr()).await
}
