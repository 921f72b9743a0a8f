//! Minimal `{{name}}` placeholder substitution for embedded HTML templates.

use axum::{http::StatusCode, response::Response};
use tracing::error;

use super::embed::Templates;
use super::response::html_response;

/// Escape text for use in HTML content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Substitute placeholders in a single pass.
///
/// Values are inserted verbatim (callers escape them), and text coming from a
/// value is never scanned for further placeholders. Unknown placeholders are
/// replaced with nothing.
pub fn substitute(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = after[..end].trim();
                if let Some((_, value)) = values.iter().find(|(k, _)| *k == key) {
                    out.push_str(value);
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Render an embedded template.
pub fn render(name: &str, values: &[(&str, &str)]) -> Option<String> {
    let file = Templates::get(name)?;
    let template = String::from_utf8_lossy(&file.data);
    Some(substitute(&template, values))
}

/// Render an embedded template into an HTML response.
pub fn render_page(status: StatusCode, name: &str, values: &[(&str, &str)]) -> Response {
    match render(name, values) {
        Some(body) => html_response(status, body),
        None => {
            error!(template = %name, "Template missing from embedded assets");
            html_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "<h1>Internal error</h1>".to_string(),
            )
        }
    }
}
