//! CLI argument parsing, validation, and startup helpers.

use crate::ServerConfig;
use crate::rate_limit::DEFAULT_LOGIN_ATTEMPTS_PER_MINUTE;
use axum::http::HeaderName;
use clap::Parser;
use tracing::error;
use url::Url;

#[derive(clap::ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
    Compact,
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "EduScan",
    about = "Web frontend for the EduScan answer sheet grading system"
)]
pub struct Args {
    /// Port to listen on
    #[arg(short, long, env = "EDUSCAN_PORT", default_value = "3000")]
    pub port: u16,

    /// Root URL of the EduScan REST API
    #[arg(
        long,
        env = "EDUSCAN_API_URL",
        default_value = "http://localhost:8000/api"
    )]
    pub api_url: String,

    /// Set the Secure flag on session cookies (enable when served over HTTPS)
    #[arg(long, env = "EDUSCAN_SECURE_COOKIES")]
    pub secure_cookies: bool,

    /// Header holding the client IP, e.g. "X-Forwarded-For" (only behind a trusted proxy)
    #[arg(long, env = "EDUSCAN_IP_HEADER", value_parser = parse_header_name)]
    pub ip_header: Option<HeaderName>,

    /// Login attempts allowed per client IP per minute
    #[arg(long, default_value_t = DEFAULT_LOGIN_ATTEMPTS_PER_MINUTE,
        value_parser = clap::value_parser!(u32).range(1..))]
    pub login_attempts_per_minute: u32,

    /// Log output format
    #[arg(short, long, default_value = "pretty")]
    pub log_format: LogFormat,
}

fn parse_header_name(s: &str) -> Result<HeaderName, String> {
    HeaderName::from_bytes(s.trim().as_bytes())
        .map_err(|e| format!("Invalid header name '{}': {}", s, e))
}

/// Initialize logging based on the specified format.
pub fn init_logging(format: &LogFormat) {
    match format {
        LogFormat::Pretty => tracing_subscriber::fmt::init(),
        LogFormat::Json => tracing_subscriber::fmt().json().init(),
        LogFormat::Compact => tracing_subscriber::fmt().compact().init(),
    }
}

/// Parse and validate the API URL.
/// Returns None and logs an error if validation fails.
pub fn validate_api_url(api_url: &str) -> Option<Url> {
    let url = match Url::parse(api_url) {
        Ok(url) => url,
        Err(e) => {
            error!(url = %api_url, error = %e, "Invalid API URL");
            return None;
        }
    };

    if !matches!(url.scheme(), "http" | "https") {
        error!(url = %api_url, "API URL must use http or https");
        return None;
    }

    if url.query().is_some() || url.fragment().is_some() {
        error!(url = %api_url, "API URL must not contain a query or fragment");
        return None;
    }

    Some(url)
}

/// Build ServerConfig from validated arguments.
pub fn build_config(args: &Args, api_url: Url) -> ServerConfig {
    ServerConfig {
        secure_cookies: args.secure_cookies,
        login_attempts_per_minute: args.login_attempts_per_minute,
        ip_header: args.ip_header.clone(),
        ..ServerConfig::new(api_url)
    }
}
