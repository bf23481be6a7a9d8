// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Outbound API call recording
//!
//! Every call to an external provider produces exactly one [`CallRecord`],
//! whatever its outcome. Records are append-only from the caller's side.

pub mod recorder;

pub use recorder::{CallRecord, CallRecorder, InMemoryCallRecorder, SNIPPET_MAX_CHARS};
