// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the site search server

/// Semantic version number
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name as published
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "local-search",
    "metered-web-search",
    "brave-provider",
    "call-recording",
    "tool-registry",
    "content-negotiation",
];

/// Banner line logged at startup
pub fn banner() -> String {
    format!("{} v{} [{}]", NAME, VERSION, FEATURES.join(", "))
}
