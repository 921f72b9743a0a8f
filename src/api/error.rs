//! Shared error handling for API endpoints.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::backend::{BackendError, GENERIC_LOGIN_ERROR};

/// API error type with automatic response conversion.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    BadGateway(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    /// Log the upstream failure and answer 502 with `msg`.
    pub fn bad_gateway(msg: impl Into<String>, context: &str, e: impl std::fmt::Display) -> Self {
        error!("{}: {}", context, e);
        Self::BadGateway(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<BackendError> for ApiError {
    fn from(e: BackendError) -> Self {
        let message = e.message_or(GENERIC_LOGIN_ERROR).to_string();
        match e.status() {
            Some(401) => Self::Unauthorized(message),
            Some(403) => Self::Forbidden(message),
            Some(404) => Self::NotFound(message),
            Some(status) if (400..500).contains(&status) => Self::BadRequest(message),
            _ => Self::bad_gateway(
                "Authentication service unavailable",
                "Backend auth call failed",
                e,
            ),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::BadGateway(msg) => msg,
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_rejections_map_to_status() {
        let cases = [
            (401, StatusCode::UNAUTHORIZED),
            (403, StatusCode::FORBIDDEN),
            (404, StatusCode::NOT_FOUND),
            (422, StatusCode::BAD_REQUEST),
            (500, StatusCode::BAD_GATEWAY),
        ];
        for (upstream, expected) in cases {
            let err = ApiError::from(BackendError::rejected(upstream, br#"{"detail":"x"}"#));
            assert_eq!(err.status_code(), expected, "{}", upstream);
        }
    }

    #[test]
    fn test_backend_message_is_kept() {
        let err = ApiError::from(BackendError::rejected(
            401,
            br#"{"detail":"Incorrect email or password"}"#,
        ));
        match err {
            ApiError::Unauthorized(msg) => assert_eq!(msg, "Incorrect email or password"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_invalid_response_is_bad_gateway() {
        let err = ApiError::from(BackendError::InvalidResponse("eof".into()));
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_bad_gateway_keeps_caller_message() {
        let err = ApiError::bad_gateway("API service unavailable", "Proxy failed", "refused");
        match err {
            ApiError::BadGateway(msg) => assert_eq!(msg, "API service unavailable"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
