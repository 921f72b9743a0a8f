use thiserror::Error;

/// Shown when the backend gives no usable message.
pub const GENERIC_LOGIN_ERROR: &str = "Sign-in failed. Please try again.";

/// Errors talking to the EduScan API.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("backend rejected request with status {status}")]
    Rejected {
        status: u16,
        /// Human-readable `detail` or `message` from the error payload.
        message: Option<String>,
    },

    #[error("invalid backend response: {0}")]
    InvalidResponse(String),
}

impl BackendError {
    pub fn rejected(status: u16, body: &[u8]) -> Self {
        Self::Rejected {
            status,
            message: error_message(body),
        }
    }

    /// Message to show the user, or `fallback` when the backend gave none.
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self {
            BackendError::Rejected {
                message: Some(message),
                ..
            } => message,
            _ => fallback,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Pull a human-readable message out of an error payload.
///
/// FastAPI puts it in `detail` (a string for `HTTPException`, a list for
/// validation errors); other endpoints use `message`. Only strings count.
pub fn error_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    ["detail", "message"]
        .iter()
        .filter_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(str::trim)
        .find(|m| !m.is_empty())
        .map(str::to_string)
}
