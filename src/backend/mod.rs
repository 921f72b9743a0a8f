//! Client for the EduScan REST API.

mod error;
mod proxy;
mod types;

use std::time::Duration;

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};
use url::Url;

pub use error::{BackendError, GENERIC_LOGIN_ERROR, error_message};
pub use proxy::{ProxiedRequest, forward};
pub use types::{
    LoginRequest, LoginResponse, MIN_PASSWORD_LENGTH, MessageResponse, NewPasswordRequest,
    PasswordResetRequest,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base: Url,
}

impl BackendClient {
    /// `base` is the API root, e.g. `http://localhost:8000/api`.
    pub fn new(base: Url) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http, base })
    }

    /// Absolute URL for an API path such as `auth/login`.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// `POST /auth/login`.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, BackendError> {
        let result: Result<LoginResponse, BackendError> =
            self.post_json("auth/login", request).await;
        match &result {
            Ok(login) => debug!(user_id = login.user_id, "Backend login succeeded"),
            Err(e) => warn!(error = %e, "Backend login failed"),
        }
        result
    }

    /// `POST /auth/password-reset/request`.
    pub async fn request_password_reset(
        &self,
        email: &str,
    ) -> Result<MessageResponse, BackendError> {
        let body = PasswordResetRequest {
            email: email.trim().to_string(),
        };
        self.post_json("auth/password-reset/request", &body).await
    }

    /// `POST /auth/password-reset/confirm`.
    pub async fn confirm_password_reset(
        &self,
        request: &NewPasswordRequest,
    ) -> Result<MessageResponse, BackendError> {
        self.post_json("auth/password-reset/confirm", request).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, BackendError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.http.post(self.endpoint(path)).json(body).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            return Err(BackendError::rejected(status.as_u16(), &bytes));
        }

        serde_json::from_slice(&bytes).map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }
}
