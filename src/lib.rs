pub mod api;
pub mod assets;
pub mod auth;
pub mod backend;
pub mod cli;
pub mod guard;
pub mod pages;
pub mod rate_limit;
pub mod session;

use api::create_api_router;
use assets::create_assets_router;
use axum::{Router, http::HeaderName, middleware};
use backend::{BackendClient, BackendError};
use guard::{AssetExclusions, GuardState, PathRules, route_guard};
use pages::create_pages_router;
use rate_limit::RateLimitConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use url::Url;

pub struct ServerConfig {
    /// Root of the EduScan REST API (e.g., "http://localhost:8000/api")
    pub api_url: Url,
    /// Whether to set Secure flag on cookies (should be true in production with HTTPS)
    pub secure_cookies: bool,
    /// Login submissions allowed per client IP per minute
    pub login_attempts_per_minute: u32,
    /// Header carrying the client IP (requires running behind a proxy)
    pub ip_header: Option<HeaderName>,
    /// Public and API path rules for the route guard
    pub rules: PathRules,
    /// Paths that bypass the route guard entirely
    pub exclusions: AssetExclusions,
}

impl ServerConfig {
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            secure_cookies: false,
            login_attempts_per_minute: rate_limit::DEFAULT_LOGIN_ATTEMPTS_PER_MINUTE,
            ip_header: None,
            rules: PathRules::default(),
            exclusions: AssetExclusions::default(),
        }
    }
}

/// Build the shared login limiter and spawn its pruning task.
/// Call this before starting the server.
pub fn init_rate_limits(config: &ServerConfig) -> Arc<RateLimitConfig> {
    let limits = Arc::new(RateLimitConfig::new(
        config.login_attempts_per_minute,
        config.ip_header.clone(),
    ));
    rate_limit::spawn_maintenance(limits.clone());
    limits
}

/// Create the application router with the given configuration.
///
/// Every request, including ones that end up in the 404 fallback, passes the
/// route guard first.
pub fn create_app(config: &ServerConfig) -> Result<Router, BackendError> {
    let limits = Arc::new(RateLimitConfig::new(
        config.login_attempts_per_minute,
        config.ip_header.clone(),
    ));
    create_app_with_limits(config, limits)
}

/// Like `create_app`, with a login limiter owned by the caller.
/// The form and the JSON login share it.
pub fn create_app_with_limits(
    config: &ServerConfig,
    limits: Arc<RateLimitConfig>,
) -> Result<Router, BackendError> {
    let backend = BackendClient::new(config.api_url.clone())?;

    let guard = GuardState::new(config.rules.clone(), config.exclusions.clone());

    let api_router = create_api_router(backend.clone(), config.secure_cookies, limits.clone());
    let pages_router = create_pages_router(backend, config.secure_cookies, limits);

    Ok(Router::new()
        .nest("/api", api_router)
        .merge(create_assets_router())
        .merge(pages_router)
        .layer(middleware::from_fn_with_state(guard, route_guard))
        .layer(TraceLayer::new_for_http()))
}

/// Run the server on the given listener. This function blocks until the server exits.
pub async fn run_server(config: ServerConfig, listener: TcpListener) -> Result<(), std::io::Error> {
    let limits = init_rate_limits(&config);
    let app = create_app_with_limits(&config, limits).map_err(std::io::Error::other)?;
    let make_service = app.into_make_service_with_connect_info::<SocketAddr>();
    axum::serve(listener, make_service).await
}

/// Start the server on the given port in a background task. Use port 0 to let the OS choose a random port.
/// Returns the actual address the server is listening on.
/// Note: For production use, prefer `run_server` directly in main.
pub async fn start_server(
    config: ServerConfig,
    port: u16,
) -> std::io::Result<(tokio::task::JoinHandle<()>, SocketAddr)> {
    let listener = TcpListener::bind(("127.0.0.1", port)).await?;
    let local_addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        run_server(config, listener).await.ok();
    });

    Ok((handle, local_addr))
}
