// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTML rendering
//!
//! Every user- or provider-supplied string goes through [`escape`] before it
//! is embedded in markup, in text and attribute positions alike.

pub mod pages;
pub mod tools;

use std::fmt::Write;

/// Escape text for embedding in HTML text or quoted attributes
pub fn escape(text: &str) -> String {
    html_escape::encode_quoted_attribute(text).into_owned()
}

/// Wrap `body` in a minimal HTML document
pub fn document(title: &str, body: &str) -> String {
    let mut html = String::with_capacity(body.len() + 256);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape(title));
    html.push_str("</head>\n<body>\n");
    html.push_str(body);
    html.push_str("\n</body>\n</html>\n");
    html
}
