//! Sign-in, registration and password recovery screens.

use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::{info, warn};

use super::{AlertKind, PagesState, alert};
use crate::assets::{escape, render_page};
use crate::auth::append_set_cookies;
use crate::backend::{
    BackendError, GENERIC_LOGIN_ERROR, LoginRequest, MIN_PASSWORD_LENGTH, NewPasswordRequest,
};
use crate::guard::{DASHBOARD_PATH, LOGIN_PATH, sanitize_callback};
use crate::session::{self, RequestCookieStore};

const RESET_LINK_SENT: &str = "If the email is registered, a reset link has been sent to it.";
const RESET_LINK_FAILED: &str = "Could not send the reset link. Please try again.";
const PASSWORD_CHANGED: &str = "Your password has been reset. You can now sign in.";
const PASSWORD_CHANGE_FAILED: &str = "Could not reset the password. The link may have expired.";

#[derive(Debug, Default, Deserialize)]
pub(super) struct LoginQuery {
    #[serde(rename = "callbackUrl")]
    callback_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct LoginForm {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(rename = "callbackUrl", default)]
    callback_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct ForgotPasswordForm {
    #[serde(default)]
    email: String,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct ResetPasswordForm {
    #[serde(default)]
    password: String,
    #[serde(default)]
    confirm_password: String,
}

/// Status for a page that re-renders after the backend refused a request.
fn backend_status(e: &BackendError) -> StatusCode {
    match e.status() {
        Some(code) if (400..500).contains(&code) => {
            StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST)
        }
        _ => StatusCode::BAD_GATEWAY,
    }
}

fn login_form(
    status: StatusCode,
    error: Option<&str>,
    email: &str,
    callback_url: Option<&str>,
) -> Response {
    let alert_html = error
        .map(|msg| alert(AlertKind::Error, msg))
        .unwrap_or_default();
    render_page(
        status,
        "login.html",
        &[
            ("alert", &alert_html),
            ("callback_url", &escape(callback_url.unwrap_or(""))),
            ("email", &escape(email)),
        ],
    )
}

pub(super) async fn login_page(Query(query): Query<LoginQuery>) -> Response {
    login_form(StatusCode::OK, None, "", query.callback_url.as_deref())
}

/// Sign in, store the session cookies and continue to the callback URL.
pub(super) async fn login_submit(
    State(state): State<PagesState>,
    Form(form): Form<LoginForm>,
) -> Response {
    let request = LoginRequest {
        email: form.email.trim().to_string(),
        password: form.password,
    };
    let callback = form.callback_url.as_deref();

    if let Err(msg) = request.validate() {
        return login_form(StatusCode::BAD_REQUEST, Some(msg), &request.email, callback);
    }

    let login = match state.backend.login(&request).await {
        Ok(login) => login,
        Err(e) => {
            return login_form(
                backend_status(&e),
                Some(e.message_or(GENERIC_LOGIN_ERROR)),
                &request.email,
                callback,
            );
        }
    };
    info!(user_id = login.user_id, role = %login.role, "User signed in");

    let mut store =
        RequestCookieStore::empty(state.secure_cookies).with_max_age(Some(login.expires_in));
    session::store_login(&mut store, &login);

    let target = sanitize_callback(callback, DASHBOARD_PATH);
    let mut response = Redirect::to(target).into_response();
    append_set_cookies(response.headers_mut(), store.into_set_cookies());
    response
}

pub(super) async fn register_page() -> Response {
    render_page(StatusCode::OK, "register.html", &[])
}

fn forgot_password_form(status: StatusCode, alert_html: &str, email: &str) -> Response {
    render_page(
        status,
        "forgot_password.html",
        &[("alert", alert_html), ("email", &escape(email))],
    )
}

pub(super) async fn forgot_password_page() -> Response {
    forgot_password_form(StatusCode::OK, "", "")
}

pub(super) async fn forgot_password_submit(
    State(state): State<PagesState>,
    Form(form): Form<ForgotPasswordForm>,
) -> Response {
    let email = form.email.trim();
    if email.is_empty() {
        return forgot_password_form(
            StatusCode::BAD_REQUEST,
            &alert(AlertKind::Error, "Email cannot be empty"),
            email,
        );
    }

    match state.backend.request_password_reset(email).await {
        Ok(reply) => {
            let message = if reply.message.is_empty() {
                RESET_LINK_SENT
            } else {
                reply.message.as_str()
            };
            forgot_password_form(StatusCode::OK, &alert(AlertKind::Success, message), "")
        }
        Err(e) => {
            warn!(error = %e, "Password reset request failed");
            forgot_password_form(
                backend_status(&e),
                &alert(AlertKind::Error, e.message_or(RESET_LINK_FAILED)),
                email,
            )
        }
    }
}

fn reset_password_form(status: StatusCode, alert_html: &str, token: &str) -> Response {
    let min_length = MIN_PASSWORD_LENGTH.to_string();
    let token = escape(&urlencoding::encode(token));
    render_page(
        status,
        "reset_password.html",
        &[
            ("alert", alert_html),
            ("token", &token),
            ("min_length", &min_length),
        ],
    )
}

pub(super) async fn reset_password_page(Path(token): Path<String>) -> Response {
    reset_password_form(StatusCode::OK, "", &token)
}

pub(super) async fn reset_password_submit(
    State(state): State<PagesState>,
    Path(token): Path<String>,
    Form(form): Form<ResetPasswordForm>,
) -> Response {
    let request = NewPasswordRequest {
        token,
        password: form.password,
        confirm_password: form.confirm_password,
    };

    if let Err(msg) = request.validate() {
        return reset_password_form(
            StatusCode::BAD_REQUEST,
            &alert(AlertKind::Error, msg),
            &request.token,
        );
    }

    match state.backend.confirm_password_reset(&request).await {
        Ok(reply) => {
            let message = if reply.message.is_empty() {
                PASSWORD_CHANGED
            } else {
                reply.message.as_str()
            };
            reset_password_form(
                StatusCode::OK,
                &alert(AlertKind::Success, message),
                &request.token,
            )
        }
        Err(e) => {
            warn!(error = %e, "Password reset confirmation failed");
            reset_password_form(
                backend_status(&e),
                &alert(AlertKind::Error, e.message_or(PASSWORD_CHANGE_FAILED)),
                &request.token,
            )
        }
    }
}

/// Clear the session and go back to the sign-in screen.
pub(super) async fn logout(State(state): State<PagesState>) -> Response {
    let mut store = RequestCookieStore::empty(state.secure_cookies);
    session::logout(&mut store);

    let mut response = Redirect::to(LOGIN_PATH).into_response();
    append_set_cookies(response.headers_mut(), store.into_set_cookies());
    response
}
