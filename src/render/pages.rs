// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search result pages

use chrono::{DateTime, Utc};
use std::fmt::Write;

use super::{document, escape};
use crate::index::LocalResult;
use crate::search::{ExternalResult, LocalOutcome, WebOutcome, MAX_QUERY_CHARS};
use crate::utils::{relative_age, truncate_with_ellipsis};

/// Snippets on local result cards are cut to this many code points
pub const SNIPPET_MAX_CHARS: usize = 160;

pub const UNAVAILABLE_MESSAGE: &str =
    "Search is temporarily unavailable. Please try again later.";
pub const UNAUTHORIZED_MESSAGE: &str = "Please sign in to use web search.";

fn search_bar(action: &str, query: &str) -> String {
    format!(
        "<form class=\"search-bar\" action=\"{}\" method=\"get\">\
         <input type=\"search\" name=\"q\" value=\"{}\" maxlength=\"{}\">\
         <button type=\"submit\">Search</button></form>\n",
        action,
        escape(query),
        MAX_QUERY_CHARS
    )
}

fn notice(class: &str, message: &str) -> String {
    format!("<p class=\"{}\">{}</p>\n", class, message)
}

fn empty_state() -> String {
    notice("empty-state", "Enter a search term to get started.")
}

fn bad_request() -> String {
    notice(
        "error",
        &format!(
            "Bad request: search queries are limited to {} characters.",
            MAX_QUERY_CHARS
        ),
    )
}

fn no_results(query: &str) -> String {
    notice(
        "no-results",
        &format!("No results found for &quot;{}&quot;.", escape(query)),
    )
}

/// Destination link for a local result, chosen by category
pub fn local_result_link(result: &LocalResult) -> String {
    match result.kind.as_str() {
        "news" => format!("/news?id={}", encode_param(&result.id)),
        "blog" => format!("/blog?id={}", encode_param(&result.id)),
        "video" => result
            .metadata_str("url")
            .filter(|url| is_safe_link(url))
            .map(str::to_string)
            .unwrap_or_else(|| "/video".to_string()),
        "" => "/".to_string(),
        other => format!("/{}", encode_path(other)),
    }
}

fn encode_param(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

fn encode_path(segment: &str) -> String {
    encode_param(segment).replace('+', "%20")
}

/// Absolute http(s) URLs or same-site paths; `//host` and `/\host` leave the site
fn is_safe_link(url: &str) -> bool {
    if url.starts_with("https://") || url.starts_with("http://") {
        return true;
    }
    match url.strip_prefix('/') {
        Some(rest) => !rest.starts_with('/') && !rest.starts_with('\\'),
        None => false,
    }
}

fn local_card(result: &LocalResult, now: DateTime<Utc>) -> String {
    let mut card = String::from("<article class=\"result\">\n");
    let _ = writeln!(
        card,
        "<h3><a href=\"{}\">{}</a></h3>",
        escape(&local_result_link(result)),
        escape(&result.title)
    );

    let mut meta = vec![escape(&result.kind)];
    if let Some(indexed_at) = result.indexed_at {
        meta.push(escape(&relative_age(indexed_at, now)));
    }
    let _ = writeln!(card, "<p class=\"meta\">{}</p>", meta.join(" &middot; "));

    if let Some(content) = result.content.as_deref().filter(|c| !c.is_empty()) {
        let _ = writeln!(
            card,
            "<p class=\"snippet\">{}</p>",
            escape(&truncate_with_ellipsis(content, SNIPPET_MAX_CHARS))
        );
    }
    card.push_str("</article>\n");
    card
}

fn external_card(result: &ExternalResult) -> String {
    let mut card = String::from("<article class=\"result\">\n");
    let _ = writeln!(
        card,
        "<h3><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a></h3>",
        escape(&result.url),
        escape(&result.title)
    );
    if !result.description.is_empty() {
        let _ = writeln!(
            card,
            "<p class=\"description\">{}</p>",
            escape(&result.description)
        );
    }

    let mut meta = escape(&result.url);
    if !result.age.is_empty() {
        meta.push_str(" &middot; ");
        meta.push_str(&escape(&result.age));
    }
    let _ = writeln!(card, "<p class=\"meta\">{}</p>", meta);
    card.push_str("</article>\n");
    card
}

/// Render the free search page
pub fn render_local(outcome: &LocalOutcome, now: DateTime<Utc>) -> String {
    let body = match outcome {
        LocalOutcome::Empty => search_bar("/search", "") + &empty_state(),
        LocalOutcome::BadRequest(_) => search_bar("/search", "") + &bad_request(),
        LocalOutcome::NoResults { query } => search_bar("/search", query) + &no_results(query),
        LocalOutcome::Unavailable { query } => {
            search_bar("/search", query) + &notice("error", UNAVAILABLE_MESSAGE)
        }
        LocalOutcome::Results { query, results } => {
            let mut body = search_bar("/search", query);
            body.push_str("<section class=\"results\">\n");
            for result in results {
                body.push_str(&local_card(result, now));
            }
            body.push_str("</section>\n");
            body
        }
    };
    document("Search", &body)
}

/// Render the metered web search page
pub fn render_web(outcome: &WebOutcome) -> String {
    let body = match outcome {
        WebOutcome::Empty => search_bar("/web", "") + &empty_state(),
        WebOutcome::BadRequest(_) => search_bar("/web", "") + &bad_request(),
        WebOutcome::Unauthorized => notice("error", UNAUTHORIZED_MESSAGE),
        WebOutcome::QuotaExceeded { query, decision } => {
            search_bar("/web", query)
                + &notice(
                    "quota-exceeded",
                    &format!(
                        "Web search quota exceeded. Each search costs {} credit{}; your balance is {}.",
                        decision.cost,
                        if decision.cost == 1 { "" } else { "s" },
                        decision.remaining
                    ),
                )
        }
        WebOutcome::Unavailable { query } => {
            search_bar("/web", query) + &notice("error", UNAVAILABLE_MESSAGE)
        }
        WebOutcome::NoResults { query } => search_bar("/web", query) + &no_results(query),
        WebOutcome::Results { query, results } => {
            let mut body = search_bar("/web", query);
            body.push_str("<section class=\"results\">\n");
            for result in results {
                body.push_str(&external_card(result));
            }
            body.push_str("</section>\n");
            body
        }
    };
    document("Web Search", &body)
}
