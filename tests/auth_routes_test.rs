// ABOUTME: Integration tests for the account route handlers
// ABOUTME: Covers registration, login, the auth cookie, and current-user lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 CalTrack

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use caltrack_server::routes::auth::{LoginResponse, UserInfo};
use caltrack_server::routes::AuthRoutes;
use common::create_test_resources;
use helpers::axum_test::AxumTestRequest;
use serde_json::json;

#[tokio::test]
async fn test_register_and_login() {
    let resources = create_test_resources().await.unwrap();
    let router = AuthRoutes::routes(resources);

    let response = AxumTestRequest::post("/api/auth/register")
        .json(&json!({
            "email": "alice@example.com",
            "password": "long-enough-pass",
            "display_name": "Alice"
        }))
        .send(router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert!(body["user_id"].is_string());

    let response = AxumTestRequest::post("/api/auth/login")
        .json(&json!({
            "email": "alice@example.com",
            "password": "long-enough-pass"
        }))
        .send(router)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    // Login sets the browser cookie alongside the token
    let cookie = response
        .headers()
        .get("set-cookie")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(cookie.starts_with("auth_token="));
    assert!(cookie.contains("HttpOnly"));

    let login: LoginResponse = response.json();
    assert!(!login.token.is_empty());
    assert_eq!(login.user.email, "alice@example.com");
    assert_eq!(login.user.display_name.as_deref(), Some("Alice"));
}

#[tokio::test]
async fn test_register_rejects_duplicate_email() {
    let resources = create_test_resources().await.unwrap();
    let router = AuthRoutes::routes(resources);

    let body = json!({ "email": "bob@example.com", "password": "long-enough-pass" });
    let first = AxumTestRequest::post("/api/auth/register")
        .json(&body)
        .send(router.clone())
        .await;
    assert_eq!(first.status_code(), StatusCode::CREATED);

    let second = AxumTestRequest::post("/api/auth/register")
        .json(&body)
        .send(router)
        .await;
    assert_eq!(second.status_code(), StatusCode::BAD_REQUEST);
    let error: serde_json::Value = second.json();
    assert_eq!(error["error"], "Email is already registered");
}

#[tokio::test]
async fn test_register_validates_input() {
    let resources = create_test_resources().await.unwrap();
    let router = AuthRoutes::routes(resources);

    let response = AxumTestRequest::post("/api/auth/register")
        .json(&json!({ "email": "not-an-email", "password": "long-enough-pass" }))
        .send(router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = AxumTestRequest::post("/api/auth/register")
        .json(&json!({ "email": "carol@example.com", "password": "short" }))
        .send(router)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_rejects_wrong_password() {
    let resources = create_test_resources().await.unwrap();
    let router = AuthRoutes::routes(resources);

    AxumTestRequest::post("/api/auth/register")
        .json(&json!({ "email": "dave@example.com", "password": "long-enough-pass" }))
        .send(router.clone())
        .await;

    let response = AxumTestRequest::post("/api/auth/login")
        .json(&json!({ "email": "dave@example.com", "password": "wrong-password" }))
        .send(router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = AxumTestRequest::post("/api/auth/login")
        .json(&json!({ "email": "nobody@example.com", "password": "long-enough-pass" }))
        .send(router)
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_requires_and_accepts_token() {
    let resources = create_test_resources().await.unwrap();
    let router = AuthRoutes::routes(resources);

    let unauthenticated = AxumTestRequest::get("/api/auth/me").send(router.clone()).await;
    assert_eq!(unauthenticated.status_code(), StatusCode::UNAUTHORIZED);

    AxumTestRequest::post("/api/auth/register")
        .json(&json!({ "email": "erin@example.com", "password": "long-enough-pass" }))
        .send(router.clone())
        .await;
    let login = AxumTestRequest::post("/api/auth/login")
        .json(&json!({ "email": "erin@example.com", "password": "long-enough-pass" }))
        .send(router.clone())
        .await;
    let login: LoginResponse = login.json();

    let response = AxumTestRequest::get("/api/auth/me")
        .header("authorization", &format!("Bearer {}", login.token))
        .send(router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let me: UserInfo = response.json();
    assert_eq!(me.email, "erin@example.com");

    // Cookie carrier works too
    let response = AxumTestRequest::get("/api/auth/me")
        .header("cookie", &format!("auth_token={}", login.token))
        .send(router)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let resources = create_test_resources().await.unwrap();
    let router = AuthRoutes::routes(resources);

    let response = AxumTestRequest::post("/api/auth/logout").send(router).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let cookie = response
        .headers()
        .get("set-cookie")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(cookie.contains("auth_token="));
    assert!(cookie.contains("Max-Age=0"));
}
