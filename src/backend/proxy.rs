//! Pass-through forwarding of API requests to the backend.

use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, Method, Response, header},
};
use tracing::debug;

use super::{BackendClient, BackendError};

/// An API request on its way to the backend.
pub struct ProxiedRequest<'a> {
    pub method: Method,
    /// Path below the API root as received, still percent-encoded, e.g. `students/3`.
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub headers: &'a HeaderMap,
    /// Session token from the cookie store; sent as a bearer token unless the
    /// caller already set `Authorization`.
    pub token: Option<&'a str>,
    pub body: Bytes,
}

/// Forward a request and relay the backend's status, content type and body.
pub async fn forward(
    client: &BackendClient,
    request: ProxiedRequest<'_>,
) -> Result<Response<Body>, BackendError> {
    let mut url = client.endpoint(request.path);
    if let Some(query) = request.query.filter(|q| !q.is_empty()) {
        url.push('?');
        url.push_str(query);
    }

    let mut upstream = client.http().request(request.method.clone(), &url);
    // Hop-by-hop and cookie headers stay behind
    for name in [header::ACCEPT, header::ACCEPT_LANGUAGE, header::CONTENT_TYPE] {
        if let Some(value) = request.headers.get(&name) {
            upstream = upstream.header(&name, value);
        }
    }
    if let Some(auth) = request.headers.get(header::AUTHORIZATION) {
        upstream = upstream.header(header::AUTHORIZATION, auth);
    } else if let Some(token) = request.token.filter(|t| !t.is_empty()) {
        upstream = upstream.bearer_auth(token);
    }

    let response = upstream.body(request.body).send().await?;
    let status = response.status();
    debug!(method = %request.method, url = %url, status = status.as_u16(), "Proxied API request");

    let mut builder = Response::builder().status(status);
    if let Some(content_type) = response.headers().get(header::CONTENT_TYPE) {
        builder = builder.header(header::CONTENT_TYPE, content_type.clone());
    }
    let bytes = response.bytes().await?;

    builder
        .body(Body::from(bytes))
        .map_err(|e| BackendError::InvalidResponse(e.to_string()))
}
