mod common;

use axum::http::StatusCode;
use common::*;
use tower::ServiceExt;

#[tokio::test]
async fn test_register_page_is_informational() {
    let app = create_test_app().await;

    let response = app.oneshot(get("/auth/register")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Create an account"));
}

#[tokio::test]
async fn test_forgot_password_success() {
    let app = create_test_app().await;

    let response = app
        .oneshot(post_form(
            "/auth/forgot-password",
            &format!("email={}", urlencoding::encode(TEST_EMAIL)),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("class=\"alert success\""));
    assert!(html.contains("Reset link sent"));
}

#[tokio::test]
async fn test_forgot_password_unknown_email() {
    let app = create_test_app().await;

    let response = app
        .oneshot(post_form(
            "/auth/forgot-password",
            &format!("email={}", urlencoding::encode(UNKNOWN_EMAIL)),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let html = body_string(response).await;
    assert!(html.contains("class=\"alert error\""));
    assert!(html.contains("Email not found"));
    assert!(html.contains(&format!("value=\"{}\"", UNKNOWN_EMAIL)));
}

#[tokio::test]
async fn test_forgot_password_requires_email() {
    let app = create_test_app().await;

    let response = app
        .oneshot(post_form("/auth/forgot-password", "email="))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_string(response).await.contains("Email cannot be empty"));
}

#[tokio::test]
async fn test_reset_password_page_embeds_token() {
    let app = create_test_app().await;

    let response = app
        .oneshot(get(&format!("/auth/reset-password/{}", RESET_TOKEN)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains(&format!(
        "action=\"/auth/reset-password/{}\"",
        RESET_TOKEN
    )));
}

#[tokio::test]
async fn test_reset_password_success() {
    let app = create_test_app().await;

    let response = app
        .oneshot(post_form(
            &format!("/auth/reset-password/{}", RESET_TOKEN),
            "password=new-secret-1&confirm_password=new-secret-1",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Password updated"));
}

#[tokio::test]
async fn test_reset_password_validation() {
    let app = create_test_app().await;
    let uri = format!("/auth/reset-password/{}", RESET_TOKEN);

    let cases = [
        ("password=short&confirm_password=short", "at least 8 characters"),
        (
            "password=new-secret-1&confirm_password=new-secret-2",
            "Passwords do not match",
        ),
    ];
    for (form, message) in cases {
        let response = app
            .clone()
            .oneshot(post_form(&uri, form))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", form);
        assert!(body_string(response).await.contains(message), "{}", form);
    }
}

#[tokio::test]
async fn test_reset_password_expired_token() {
    let app = create_test_app().await;

    let response = app
        .oneshot(post_form(
            "/auth/reset-password/stale-token",
            "password=new-secret-1&confirm_password=new-secret-1",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = body_string(response).await;
    assert!(html.contains("Invalid or expired token"));
}
