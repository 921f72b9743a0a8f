#![allow(dead_code)]

use std::net::SocketAddr;

use axum::{
    Json, Router,
    body::{Body, Bytes},
    extract::{ConnectInfo, RawQuery},
    http::{HeaderMap, Method, Request, StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::{any, get as route_get, post},
};
use eduscan::{ServerConfig, create_app};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::OnceCell;
use url::Url;

pub const TEST_EMAIL: &str = "admin@eduscan.vn";
pub const TEST_PASSWORD: &str = "secret123";
pub const TEST_TOKEN: &str = "test-access-token";
pub const TEST_NAME: &str = "Nguyễn Văn An";
pub const INACTIVE_EMAIL: &str = "inactive@eduscan.vn";
pub const RESET_TOKEN: &str = "good-token";
pub const UNKNOWN_EMAIL: &str = "nobody@eduscan.vn";

/// Percent-encoded `user` cookie value for the test account.
pub fn user_cookie() -> String {
    let profile = json!({
        "id": 1,
        "email": TEST_EMAIL,
        "name": TEST_NAME,
        "role": "admin",
    });
    urlencoding::encode(&profile.to_string()).into_owned()
}

/// Cookie header of a signed-in browser.
pub fn session_cookie_header() -> String {
    format!("accessToken={}; user={}", TEST_TOKEN, user_cookie())
}

/// Mock backend shared by all tests in a binary. Each test runs on its own
/// runtime, so the server gets a dedicated thread.
static BACKEND: OnceCell<Url> = OnceCell::const_new();

pub async fn mock_backend_url() -> Url {
    BACKEND
        .get_or_init(|| async {
            let (tx, rx) = tokio::sync::oneshot::channel();
            std::thread::spawn(move || {
                let rt = tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                    .expect("Failed to create runtime");
                rt.block_on(async move {
                    let listener = TcpListener::bind("127.0.0.1:0")
                        .await
                        .expect("Failed to bind mock backend");
                    let addr = listener.local_addr().expect("Failed to get local address");
                    tx.send(addr).ok();
                    axum::serve(listener, mock_backend_router())
                        .await
                        .expect("Mock backend failed");
                });
            });
            let addr = rx.await.expect("Mock backend did not start");
            Url::parse(&format!("http://{}/api", addr)).expect("Invalid URL")
        })
        .await
        .clone()
}

fn mock_backend_router() -> Router {
    Router::new()
        .route("/api/auth/login", post(mock_login))
        .route("/api/auth/password-reset/request", post(mock_reset_request))
        .route("/api/auth/password-reset/confirm", post(mock_reset_confirm))
        .route("/api/students", any(mock_echo))
        .route("/api/files/{*rest}", route_get(mock_echo_uri))
        .route(
            "/api/broken",
            route_get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
}

async fn mock_login(Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    if email == TEST_EMAIL && password == TEST_PASSWORD {
        return Json(json!({
            "access_token": TEST_TOKEN,
            "token_type": "bearer",
            "expires_in": 3600,
            "user_id": 1,
            "email": TEST_EMAIL,
            "hoTen": TEST_NAME,
            "vaiTro": "admin",
        }))
        .into_response();
    }
    if email == INACTIVE_EMAIL {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "detail": "Account is disabled" })),
        )
            .into_response();
    }
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "detail": "Incorrect email or password" })),
    )
        .into_response()
}

async fn mock_reset_request(Json(body): Json<Value>) -> Response {
    if body["email"].as_str() == Some(UNKNOWN_EMAIL) {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "Email not found" })),
        )
            .into_response();
    }
    Json(json!({ "success": true, "message": "Reset link sent" })).into_response()
}

async fn mock_reset_confirm(Json(body): Json<Value>) -> Response {
    if body["token"].as_str() != Some(RESET_TOKEN) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "Invalid or expired token" })),
        )
            .into_response();
    }
    Json(json!({ "success": true, "message": "Password updated" })).into_response()
}

/// Reflects what the proxy sent.
async fn mock_echo(
    method: Method,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let status = if method == Method::POST {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    let header_str = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    (
        status,
        Json(json!({
            "method": method.as_str(),
            "query": query,
            "authorization": header_str(header::AUTHORIZATION),
            "cookie": header_str(header::COOKIE),
            "body": String::from_utf8_lossy(&body),
        })),
    )
        .into_response()
}

/// Reflects the raw request target the backend received.
async fn mock_echo_uri(uri: Uri) -> Json<Value> {
    Json(json!({ "path": uri.path(), "query": uri.query() }))
}

/// App wired to the mock backend.
pub async fn create_test_app() -> Router {
    let config = ServerConfig::new(mock_backend_url().await);
    create_app(&config).expect("Failed to create app")
}

/// App with a custom configuration, still pointing at the mock backend.
pub async fn create_test_app_with(configure: impl FnOnce(&mut ServerConfig)) -> Router {
    let mut config = ServerConfig::new(mock_backend_url().await);
    configure(&mut config);
    create_app(&config).expect("Failed to create app")
}

pub fn client_addr() -> ConnectInfo<SocketAddr> {
    ConnectInfo("127.0.0.1:50000".parse().unwrap())
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

pub fn post_form(uri: &str, form: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .extension(client_addr())
        .body(Body::from(form.to_string()))
        .unwrap()
}

pub fn post_json(uri: &str, json: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .extension(client_addr())
        .body(Body::from(json.to_string()))
        .unwrap()
}

pub fn location(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

pub fn set_cookies(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}

/// The `Set-Cookie` line for `name`, if any.
pub fn set_cookie_for(response: &Response, name: &str) -> Option<String> {
    let prefix = format!("{}=", name);
    set_cookies(response)
        .into_iter()
        .find(|c| c.starts_with(&prefix))
}

pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
