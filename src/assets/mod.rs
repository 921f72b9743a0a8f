mod embed;
mod response;
mod templates;

use axum::{
    Router,
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

pub use embed::{PublicAssets, Templates};
pub use response::{NO_CACHE, PAGE_CSP, html_response, mime_from_path, serve_asset};
pub use templates::{escape, render, render_page, substitute};

/// Routes for static files. These paths are on the guard's exclusion list.
pub fn create_assets_router() -> Router {
    Router::new()
        .route("/static/{*path}", get(static_handler))
        .route("/logo.svg", get(|| async { serve_asset::<PublicAssets>("logo.svg") }))
}

async fn static_handler(Path(path): Path<String>) -> Response {
    if path.split('/').any(|segment| segment == "..") {
        return StatusCode::NOT_FOUND.into_response();
    }
    serve_asset::<PublicAssets>(&format!("static/{}", path))
}
