// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod text;

pub use text::{relative_age, truncate_chars, truncate_with_ellipsis, ELLIPSIS};
