use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, Uri},
    response::Response,
};

use super::ApiState;
use super::error::ApiError;
use crate::auth::{ACCESS_TOKEN_COOKIE, get_cookie};
use crate::backend::{ProxiedRequest, forward};

/// Path below the API root, still percent-encoded.
///
/// Inside the nested `/api` router the URI has the prefix stripped already.
fn upstream_path(uri: &Uri) -> &str {
    uri.path().trim_start_matches('/')
}

/// Relay any other API call to the backend, which owns its authorization.
pub(super) async fn proxy(
    State(state): State<ApiState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let token = get_cookie(&headers, ACCESS_TOKEN_COOKIE);
    let request = ProxiedRequest {
        method,
        path: upstream_path(&uri),
        query: uri.query(),
        headers: &headers,
        token,
        body,
    };

    forward(&state.backend, request).await.map_err(|e| {
        ApiError::bad_gateway("API service unavailable", "API proxy request failed", e)
    })
}
