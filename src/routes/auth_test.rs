use axum::Router;
use axum::routing::post;
use reqwest::StatusCode;
use reqwest::header::SET_COOKIE;
use serde_json::{Value, json};

use crate::routes::app;
use crate::state::test_helpers::{spawn_router, test_app_state, unreachable_base_url};

/// Mock backend: `/register/` echoes a created user, `/login/` issues tokens
/// unless the password is `wrong`.
async fn spawn_backend() -> String {
    let router = Router::new()
        .route(
            "/register/",
            post(|axum::Json(body): axum::Json<Value>| async move {
                axum::Json(json!({ "success": true, "data": { "email": body["email"] } }))
            }),
        )
        .route(
            "/login/",
            post(|axum::Json(body): axum::Json<Value>| async move {
                if body["password"] == "wrong" {
                    axum::Json(json!({ "success": false, "message": "Invalid credentials" }))
                } else {
                    axum::Json(json!({ "success": true, "data": { "access": "acc", "refresh": "ref" } }))
                }
            }),
        );
    spawn_router(router).await
}

async fn spawn_app(api_base_url: &str) -> String {
    spawn_router(app(test_app_state(api_base_url))).await
}

fn set_cookies(resp: &reqwest::Response) -> Vec<String> {
    resp.headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok().map(str::to_owned))
        .collect()
}

// =============================================================================
// register
// =============================================================================

#[tokio::test]
async fn register_forwards_backend_reply() {
    let base = spawn_app(&spawn_backend().await).await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/api/auth/register"))
        .json(&json!({ "email": "a@b.com", "password": "x" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "success": true, "data": { "email": "a@b.com" } }));
}

#[tokio::test]
async fn register_with_backend_down_returns_fallback() {
    let base = spawn_app(&unreachable_base_url()).await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/api/auth/register"))
        .json(&json!({ "email": "a@b.com" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "success": false,
            "message": "An error occurred during registration. Please try again later."
        })
    );
}

#[tokio::test]
async fn register_with_malformed_body_returns_fallback() {
    let base = spawn_app(&spawn_backend().await).await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/api/auth/register"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "An error occurred during registration. Please try again later.");
}

// =============================================================================
// login
// =============================================================================

#[tokio::test]
async fn login_sets_session_cookie() {
    let base = spawn_app(&spawn_backend().await).await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/api/auth/login"))
        .json(&json!({ "email": "a@b.com", "password": "x" }))
        .send()
        .await
        .unwrap();

    let cookies = set_cookies(&resp);
    assert_eq!(cookies.len(), 1);
    assert!(cookies[0].starts_with("refreshToken=ref"));
    assert!(cookies[0].contains("HttpOnly"));
    assert!(cookies[0].contains("SameSite=Strict"));

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn login_rejected_sets_no_cookie() {
    let base = spawn_app(&spawn_backend().await).await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/api/auth/login"))
        .json(&json!({ "email": "a@b.com", "password": "wrong" }))
        .send()
        .await
        .unwrap();

    assert!(set_cookies(&resp).is_empty());
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "success": false, "message": "Invalid credentials" }));
}

#[tokio::test]
async fn login_with_empty_json_body_returns_fallback() {
    let base = spawn_app(&spawn_backend().await).await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/api/auth/login"))
        .header("content-type", "application/json")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(set_cookies(&resp).is_empty());
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "success": false, "message": "Something went wrong, please try again later" }));
}

// =============================================================================
// logout
// =============================================================================

#[tokio::test]
async fn logout_without_body_clears_root_cookie() {
    let base = spawn_app(&unreachable_base_url()).await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/api/auth/logout"))
        .header("cookie", "refreshToken=ref")
        .send()
        .await
        .unwrap();

    let cookies = set_cookies(&resp);
    assert_eq!(cookies.len(), 1);
    assert!(cookies[0].starts_with("refreshToken=;"));
    assert!(cookies[0].contains("Path=/"));
    assert!(cookies[0].contains("Max-Age=0"));

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "success": true }));
}

#[tokio::test]
async fn logout_with_path_clears_scoped_cookie() {
    let base = spawn_app(&unreachable_base_url()).await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/api/auth/logout"))
        .json(&json!({ "path": "/admin" }))
        .send()
        .await
        .unwrap();

    let cookies = set_cookies(&resp);
    assert_eq!(cookies.len(), 1);
    assert!(cookies[0].contains("Path=/admin"));
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "success": true }));
}

#[tokio::test]
async fn logout_with_json_header_and_no_body_clears_root_cookie() {
    let base = spawn_app(&unreachable_base_url()).await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/api/auth/logout"))
        .header("content-type", "application/json")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let cookies = set_cookies(&resp);
    assert_eq!(cookies.len(), 1);
    assert!(cookies[0].contains("Path=/"));
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "success": true }));
}

#[tokio::test]
async fn logout_with_injected_path_is_refused() {
    let base = spawn_app(&unreachable_base_url()).await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/api/auth/logout"))
        .json(&json!({ "path": "/x; Domain=evil.example; Path=/" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(set_cookies(&resp).is_empty());
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "success": false, "error": "Failed to remove cookie" }));
}

// =============================================================================
// healthz
// =============================================================================

#[tokio::test]
async fn healthz_is_ok() {
    let base = spawn_app(&unreachable_base_url()).await;
    let resp = reqwest::get(format!("{base}/healthz")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
