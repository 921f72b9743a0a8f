//! JSON login and logout.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::info;

use super::ApiState;
use super::error::ApiError;
use crate::auth::append_set_cookies;
use crate::backend::LoginRequest;
use crate::session::{self, RequestCookieStore};

/// Sign in against the backend and store the session cookies.
pub(super) async fn login(
    State(state): State<ApiState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    payload.validate().map_err(ApiError::bad_request)?;

    let login = state.backend.login(&payload).await?;
    info!(user_id = login.user_id, role = %login.role, "User signed in");

    let mut store =
        RequestCookieStore::empty(state.secure_cookies).with_max_age(Some(login.expires_in));
    session::store_login(&mut store, &login);

    let mut response = Json(&login).into_response();
    append_set_cookies(response.headers_mut(), store.into_set_cookies());
    Ok(response)
}

/// Clear all session cookies.
pub(super) async fn logout(State(state): State<ApiState>) -> Response {
    let mut store = RequestCookieStore::empty(state.secure_cookies);
    session::logout(&mut store);

    let mut response = StatusCode::NO_CONTENT.into_response();
    append_set_cookies(response.headers_mut(), store.into_set_cookies());
    response
}
