//! Server-rendered pages: authentication screens and the dashboard shell.

mod auth;
mod dashboard;

use std::sync::Arc;

use axum::{
    Router, middleware,
    http::StatusCode,
    response::{Redirect, Response},
    routing::{get, post},
};

use crate::assets::{escape, html_response};
use crate::backend::BackendClient;
use crate::guard::DASHBOARD_PATH;
use crate::rate_limit::{RateLimitConfig, rate_limit_login};

pub use dashboard::{MAIN_NAV, NavItem, SETTINGS_NAV};

#[derive(Clone)]
pub struct PagesState {
    pub backend: BackendClient,
    pub secure_cookies: bool,
}

pub fn create_pages_router(
    backend: BackendClient,
    secure_cookies: bool,
    rate_limit_config: Arc<RateLimitConfig>,
) -> Router {
    let state = PagesState {
        backend,
        secure_cookies,
    };

    Router::new()
        .route("/", get(root_handler))
        .route(
            "/auth/login",
            // The rate limit layer wraps only the POST handler
            post(auth::login_submit)
                .layer(middleware::from_fn_with_state(
                    rate_limit_config,
                    rate_limit_login,
                ))
                .get(auth::login_page),
        )
        .route("/auth/register", get(auth::register_page))
        .route(
            "/auth/forgot-password",
            get(auth::forgot_password_page).post(auth::forgot_password_submit),
        )
        .route(
            "/auth/reset-password/{token}",
            get(auth::reset_password_page).post(auth::reset_password_submit),
        )
        .route("/auth/logout", post(auth::logout))
        .route("/dashboard", get(dashboard::index))
        .route("/dashboard/{*section}", get(dashboard::section))
        .fallback(not_found)
        .with_state(state)
}

/// The root has no content of its own.
async fn root_handler() -> Redirect {
    Redirect::temporary(DASHBOARD_PATH)
}

async fn not_found() -> Response {
    html_response(
        StatusCode::NOT_FOUND,
        "<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <title>Not found - EduScan</title><link rel=\"stylesheet\" href=\"/static/styles.css\">\
         </head><body class=\"auth\"><main class=\"card narrow center\"><h1>Page not found</h1>\
         <p><a href=\"/dashboard\">Back to the dashboard</a></p></main></body></html>"
            .to_string(),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Error,
    Success,
}

/// Inline message the user can dismiss without scripts.
pub fn alert(kind: AlertKind, message: &str) -> String {
    let class = match kind {
        AlertKind::Error => "error",
        AlertKind::Success => "success",
    };
    format!(
        "<input type=\"checkbox\" id=\"alert-dismiss\" class=\"alert-toggle\" hidden>\
         <div class=\"alert {}\" role=\"alert\">\
         <label for=\"alert-dismiss\" class=\"dismiss\" aria-label=\"Dismiss\">&times;</label>{}</div>",
        class,
        escape(message)
    )
}
