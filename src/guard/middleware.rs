use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use super::decision::decide;
use super::exclusions::AssetExclusions;
use super::paths::PathRules;
use crate::auth::{ACCESS_TOKEN_COOKIE, get_cookie};

/// Shared, read-only guard configuration.
#[derive(Clone, Default)]
pub struct GuardState {
    pub rules: Arc<PathRules>,
    pub exclusions: Arc<AssetExclusions>,
}

impl GuardState {
    pub fn new(rules: PathRules, exclusions: AssetExclusions) -> Self {
        Self {
            rules: Arc::new(rules),
            exclusions: Arc::new(exclusions),
        }
    }
}

/// Middleware that runs every request through the guard before routing.
pub async fn route_guard(
    State(guard): State<GuardState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();
    if guard.exclusions.is_excluded(path) {
        return next.run(request).await;
    }

    let token = get_cookie(request.headers(), ACCESS_TOKEN_COOKIE);
    let decision = decide(&guard.rules, path, request.uri().query(), token);

    match decision.location() {
        Some(location) => {
            debug!(path = %path, location = %location, "Guard redirect");
            Redirect::temporary(location).into_response()
        }
        None => next.run(request).await,
    }
}
