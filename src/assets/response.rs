use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use rust_embed::Embed;

/// Cache duration for static files (1 hour; names are not content-hashed)
pub const STATIC_CACHE: &str = "public, max-age=3600";
/// Cache duration for HTML pages (no cache, always revalidate)
pub const NO_CACHE: &str = "no-cache";

/// CSP header for every rendered page. Pages ship no scripts.
pub const PAGE_CSP: &str = "default-src 'none'; style-src 'self'; img-src 'self' data:; \
    form-action 'self'; frame-ancestors 'none'; base-uri 'self'";

/// Serve an HTML page with the given status and CSP header
#[inline]
pub fn html_response(status: StatusCode, body: String) -> Response {
    (
        status,
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8"),
            (header::CACHE_CONTROL, NO_CACHE),
            (header::CONTENT_SECURITY_POLICY, PAGE_CSP),
        ],
        body,
    )
        .into_response()
}

/// Get MIME type from file extension. Only supports types we actually serve.
#[inline]
pub fn mime_from_path(path: &str) -> &'static str {
    match path.rsplit('.').next() {
        Some("css") => "text/css",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("ico") => "image/x-icon",
        Some("html") => "text/html",
        _ => "application/octet-stream",
    }
}

/// Serve a file from embedded assets
#[inline]
pub fn serve_asset<T: Embed>(path: &str) -> Response {
    match T::get(path) {
        Some(content) => (
            [
                (header::CONTENT_TYPE, mime_from_path(path)),
                (header::CACHE_CONTROL, STATIC_CACHE),
            ],
            content.data,
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
