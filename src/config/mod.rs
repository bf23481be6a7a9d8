// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Server configuration and provider credentials

pub mod credentials;
pub mod server;

pub use credentials::{CredentialSource, EnvCredential, StaticCredential, BRAVE_API_KEY_VAR};
pub use server::{ServerConfig, DEFAULT_PROVIDER_URL, MAX_PROVIDER_RESULTS};
