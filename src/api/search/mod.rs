// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search page endpoints
//!
//! `/search` (free, local index) and `/web` (metered, external provider).

pub mod handler;

pub use handler::{local_status, search_handler, web_handler, web_status, SearchParams};
