//! The guard's decision function.

use super::paths::{PathClass, PathRules};

/// Query parameter carrying the original destination on the login page.
pub const CALLBACK_PARAM: &str = "callbackUrl";

/// Outcome of evaluating one request against the guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Let the request through unmodified.
    PassThrough,
    /// Authenticated user hit a public-only page.
    RedirectToDashboard { location: String },
    /// Unauthenticated user hit a private page.
    RedirectToLogin {
        location: String,
        callback_url: String,
    },
}

impl GuardDecision {
    /// Redirect target, or `None` for pass-through.
    pub fn location(&self) -> Option<&str> {
        match self {
            GuardDecision::PassThrough => None,
            GuardDecision::RedirectToDashboard { location }
            | GuardDecision::RedirectToLogin { location, .. } => Some(location),
        }
    }
}

/// Decide what to do with a request.
///
/// `query` is the raw query string without the leading `?`. `token` is the
/// session token as read from the store; an empty value counts as absent.
/// Only presence is checked.
pub fn decide(
    rules: &PathRules,
    path: &str,
    query: Option<&str>,
    token: Option<&str>,
) -> GuardDecision {
    let has_token = token.is_some_and(|t| !t.is_empty());

    match (rules.classify(path), has_token) {
        (PathClass::ApiOther, _) => GuardDecision::PassThrough,
        (PathClass::Public, true) => GuardDecision::RedirectToDashboard {
            location: rules.dashboard_path.clone(),
        },
        (PathClass::Private, false) => {
            let callback_url = callback_url(path, query);
            let location = login_location(&rules.login_path, &callback_url);
            GuardDecision::RedirectToLogin {
                location,
                callback_url,
            }
        }
        _ => GuardDecision::PassThrough,
    }
}

/// Original destination: path, plus `?query` when the query is non-empty.
pub fn callback_url(path: &str, query: Option<&str>) -> String {
    match query {
        Some(q) if !q.is_empty() => format!("{}?{}", path, q),
        _ => path.to_string(),
    }
}

/// Build `<login>?callbackUrl=<percent-encoded callback>`.
pub fn login_location(login_path: &str, callback_url: &str) -> String {
    format!(
        "{}?{}={}",
        login_path,
        CALLBACK_PARAM,
        urlencoding::encode(callback_url)
    )
}

/// Resolve a `callbackUrl` received by the login page to a safe local target.
///
/// Only same-origin absolute paths are accepted; anything else (including
/// protocol-relative `//host` forms) falls back to `default`. The result is
/// used as a `Location` header, so it must be printable ASCII.
pub fn sanitize_callback<'a>(callback: Option<&'a str>, default: &'a str) -> &'a str {
    match callback {
        Some(c)
            if c.starts_with('/')
                && !c.starts_with("//")
                && !c.starts_with("/\\")
                && c.bytes().all(|b| b.is_ascii_graphic()) =>
        {
            c
        }
        _ => default,
    }
}
