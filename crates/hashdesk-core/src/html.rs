// SPDX-FileCopyrightText: 2026 Hashdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTML escaping for Telegram's HTML parse mode.
//!
//! Telegram only recognizes a small tag subset (`<b>`, `<i>`, `<a>`, ...)
//! and rejects the whole message if the body contains an unescaped `<`,
//! `>`, or `&`. Every piece of user- or upstream-provided text interpolated
//! into a reply goes through [`escape_html`] first; quotes are escaped as
//! well so values are safe inside `href="..."` attributes.

/// Escapes text for Telegram HTML parse mode.
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(ch),
        }
    }
    result
}
