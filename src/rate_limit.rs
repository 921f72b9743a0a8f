//! Rate limiting for login endpoints.
//!
//! Uses a token bucket algorithm with per-IP tracking to slow down password
//! guessing against the backend.

use axum::{
    extract::{Request, State},
    http::{HeaderName, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{Quota, RateLimiter, clock::DefaultClock, state::keyed::DefaultKeyedStateStore};
use std::{num::NonZeroU32, sync::Arc, time::Duration};
use tracing::{debug, warn};

use crate::auth::extract_client_ip;

/// Per-IP rate limiter.
pub type IpLimiter = RateLimiter<String, DefaultKeyedStateStore<String>, DefaultClock>;

/// Default number of login attempts allowed per IP per minute.
pub const DEFAULT_LOGIN_ATTEMPTS_PER_MINUTE: u32 = 10;

/// Interval between limiter pruning runs.
const MAINTENANCE_INTERVAL: Duration = Duration::from_secs(5 * 60);

#[derive(Clone)]
pub struct RateLimitConfig {
    /// Per-IP limiter for login submissions.
    pub login: Arc<IpLimiter>,
    /// Header carrying the client IP when running behind a proxy.
    pub ip_header: Option<HeaderName>,
}

impl RateLimitConfig {
    pub fn new(login_attempts_per_minute: u32, ip_header: Option<HeaderName>) -> Self {
        let per_minute = NonZeroU32::new(login_attempts_per_minute).unwrap_or(NonZeroU32::MIN);
        Self {
            login: Arc::new(RateLimiter::keyed(Quota::per_minute(per_minute))),
            ip_header,
        }
    }

    /// Drop buckets of clients that are back to a full quota.
    /// Returns the number of clients still tracked.
    pub fn prune(&self) -> usize {
        self.login.retain_recent();
        self.login.shrink_to_fit();
        self.login.len()
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LOGIN_ATTEMPTS_PER_MINUTE, None)
    }
}

/// Spawn a background task that prunes idle limiter entries periodically.
/// Returns a handle that can be used to abort the task.
pub fn spawn_maintenance(config: Arc<RateLimitConfig>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(MAINTENANCE_INTERVAL);

        loop {
            interval.tick().await;
            let tracked = config.prune();
            debug!(tracked, "Pruned login rate limiter");
        }
    })
}

/// Middleware for rate limiting login submissions.
pub async fn rate_limit_login(
    State(config): State<Arc<RateLimitConfig>>,
    request: Request,
    next: Next,
) -> Response {
    let ip = match extract_client_ip(&request, config.ip_header.as_ref()) {
        Ok(ip) => ip,
        Err(e) => {
            warn!(error = %e, "Rejecting login without client IP");
            return (StatusCode::FORBIDDEN, "Unable to determine client IP.").into_response();
        }
    };

    match config.login.check_key(&ip) {
        Ok(_) => next.run(request).await,
        Err(_) => {
            warn!(ip = %ip, "Login rate limit exceeded");
            (
                StatusCode::TOO_MANY_REQUESTS,
                "Too many sign-in attempts. Please wait before trying again.",
            )
                .into_response()
        }
    }
}
