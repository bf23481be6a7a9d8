// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTML views of the tool registry

use std::fmt::Write;

use super::{document, escape};
use crate::registry::{Tool, ToolListing};

/// Marker shown next to required parameters
pub const REQUIRED_MARKER: &str = "*";

fn parameter_list(tool: &Tool) -> String {
    if tool.parameters.is_empty() {
        return String::new();
    }
    let mut html = String::from("<ul class=\"parameters\">\n");
    for (name, param) in &tool.parameters {
        let marker = if param.required {
            format!("<span class=\"required\">{}</span>", REQUIRED_MARKER)
        } else {
            String::new()
        };
        let _ = writeln!(
            html,
            "<li><code>{}</code>{} <em>({})</em> {}</li>",
            escape(name),
            marker,
            escape(&param.param_type),
            escape(&param.description)
        );
    }
    html.push_str("</ul>\n");
    html
}

/// Full catalog grouped by category
pub fn render_tool_list(listing: &ToolListing) -> String {
    let mut body = String::from("<h1>Tools</h1>\n");
    let groups = listing.grouped();

    for (category, tools) in &groups {
        let _ = writeln!(body, "<section class=\"category\">\n<h2>{}</h2>", escape(category));
        for tool in tools {
            let _ = writeln!(
                body,
                "<div class=\"tool\">\n<h3><a href=\"/tools/{}\">{}</a></h3>\n<p>{}</p>",
                escape(&url::form_urlencoded::byte_serialize(tool.name.as_bytes()).collect::<String>()),
                escape(&tool.name),
                escape(&tool.description)
            );
            body.push_str(&parameter_list(tool));
            body.push_str("</div>\n");
        }
        body.push_str("</section>\n");
    }

    let _ = writeln!(
        body,
        "<p class=\"summary\">{} tools in {} categories</p>",
        listing.count(),
        groups.len()
    );
    document("Tools", &body)
}

/// Single tool with its parameter table
pub fn render_tool_detail(tool: &Tool) -> String {
    let mut body = String::new();
    let _ = writeln!(body, "<h1>{}</h1>", escape(&tool.name));
    let _ = writeln!(
        body,
        "<p class=\"category\">Category: {}</p>\n<p>{}</p>",
        escape(&tool.category),
        escape(&tool.description)
    );

    if tool.parameters.is_empty() {
        body.push_str("<p class=\"no-parameters\">This tool takes no parameters.</p>\n");
    } else {
        body.push_str(
            "<table class=\"parameters\">\n<tr><th>Name</th><th>Type</th><th>Required</th><th>Description</th></tr>\n",
        );
        for (name, param) in &tool.parameters {
            let _ = writeln!(
                body,
                "<tr><td><code>{}</code></td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape(name),
                escape(&param.param_type),
                if param.required { REQUIRED_MARKER } else { "" },
                escape(&param.description)
            );
        }
        body.push_str("</table>\n");
    }
    body.push_str("<p><a href=\"/tools\">All tools</a></p>\n");
    document(&tool.name, &body)
}

/// Generic not-found page
pub fn render_not_found() -> String {
    document(
        "Not Found",
        "<h1>Not Found</h1>\n<p>The page you requested does not exist.</p>\n<p><a href=\"/tools\">All tools</a></p>",
    )
}
