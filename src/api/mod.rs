mod auth;
mod error;
mod proxy;

use axum::{
    Router, middleware,
    routing::{any, post},
};
use std::sync::Arc;

use crate::backend::BackendClient;
use crate::rate_limit::{RateLimitConfig, rate_limit_login};

pub use error::ApiError;

#[derive(Clone)]
pub struct ApiState {
    pub backend: BackendClient,
    pub secure_cookies: bool,
}

/// Routes mounted under `/api`.
pub fn create_api_router(
    backend: BackendClient,
    secure_cookies: bool,
    rate_limit_config: Arc<RateLimitConfig>,
) -> Router {
    let state = ApiState {
        backend,
        secure_cookies,
    };

    let login_router = Router::new()
        .route("/auth/login", post(auth::login))
        .with_state(state.clone())
        .layer(middleware::from_fn_with_state(
            rate_limit_config,
            rate_limit_login,
        ));

    Router::new()
        .route("/auth/logout", post(auth::logout))
        .route("/{*path}", any(proxy::proxy))
        .with_state(state)
        .merge(login_router)
}
