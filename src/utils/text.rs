// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Text helpers shared by the renderers and the call recorder

use chrono::{DateTime, Utc};

/// Marker appended to truncated snippets
pub const ELLIPSIS: &str = "...";

/// Keep at most `max_chars` code points of `text`
///
/// Operates on `char` boundaries so multi-byte characters are never split.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Truncate to `max_chars` code points, appending [`ELLIPSIS`] when anything was cut
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    let head = truncate_chars(text, max_chars);
    if head.len() < text.len() {
        format!("{}{}", head, ELLIPSIS)
    } else {
        text.to_string()
    }
}

/// Human-relative age label for a timestamp, measured against `now`
pub fn relative_age(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();

    if seconds < 60 {
        return "just now".to_string();
    }

    let minutes = seconds / 60;
    if minutes < 60 {
        return plural(minutes, "minute");
    }

    let hours = minutes / 60;
    if hours < 24 {
        return plural(hours, "hour");
    }

    let days = hours / 24;
    if days < 30 {
        return plural(days, "day");
    }

    then.format("%Y-%m-%d").to_string()
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}
