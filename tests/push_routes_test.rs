// ABOUTME: Integration tests for push subscription registration and the test send
// ABOUTME: Runs a local mock provider endpoint to exercise success and error pass-through
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 CalTrack

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use caltrack_server::resources::ServerResources;
use caltrack_server::routes::PushRoutes;
use common::{
    create_authenticated_setup, create_test_resources_with_push, create_test_user,
};
use helpers::axum_test::AxumTestRequest;
use serde_json::json;
use uuid::Uuid;

/// Spawn a mock provider answering POST /notifications with a fixed response
async fn spawn_provider(status: StatusCode, body: serde_json::Value) -> String {
    let app = Router::new().route(
        "/notifications",
        post(move || {
            let body = body.clone();
            async move { (status, Json(body)) }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn authenticated_push_setup(
    provider_base_url: &str,
) -> (Arc<ServerResources>, Uuid, String) {
    let resources = create_test_resources_with_push(provider_base_url)
        .await
        .unwrap();
    let (user_id, user) = create_test_user(&resources.database).await.unwrap();
    let token = resources.auth_manager.generate_token(&user).unwrap();
    (resources, user_id, format!("Bearer {token}"))
}

// ============================================================================
// Subscription registration
// ============================================================================

#[tokio::test]
async fn test_subscribe_requires_auth() {
    let (resources, _user_id, _auth) = create_authenticated_setup().await.unwrap();
    let router = PushRoutes::routes(resources);
    let response = AxumTestRequest::post("/api/push/subscribe")
        .json(&json!({ "subscriptionId": "s1", "platform": "web" }))
        .send(router)
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_subscribe_rejects_missing_fields_with_fixed_message() {
    let (resources, _user_id, auth) = create_authenticated_setup().await.unwrap();
    let router = PushRoutes::routes(resources);

    let response = AxumTestRequest::post("/api/push/subscribe")
        .header("authorization", &auth)
        .json(&json!({ "subscriptionId": "   ", "platform": "web" }))
        .send(router)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "subscriptionId and platform are required");
}

#[tokio::test]
async fn test_subscribe_stores_normalized_registration() {
    let (resources, user_id, auth) = create_authenticated_setup().await.unwrap();
    let router = PushRoutes::routes(resources.clone());

    let response = AxumTestRequest::post("/api/push/subscribe")
        .header("authorization", &auth)
        .json(&json!({
            "subscriptionId": "  sub-1  ",
            "platform": "web",
            "userAgent": "Mozilla/5.0",
            "isEnabled": "definitely"
        }))
        .send(router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["ok"], true);

    let subscriptions = resources
        .database
        .push_subscriptions()
        .list(user_id)
        .await
        .unwrap();
    assert_eq!(subscriptions.len(), 1);
    let sub = &subscriptions[0];
    assert_eq!(sub.onesignal_subscription_id, "sub-1");
    assert_eq!(sub.device_type, "web");
    assert_eq!(sub.user_agent.as_deref(), Some("Mozilla/5.0"));
    assert!(sub.is_enabled); // non-boolean coerces to enabled
    assert_eq!(sub.external_user_id, user_id.to_string());

    // Re-registering the same subscription updates in place
    AxumTestRequest::post("/api/push/subscribe")
        .header("authorization", &auth)
        .json(&json!({
            "subscriptionId": "sub-1",
            "platform": "web",
            "isEnabled": false
        }))
        .send(router)
        .await;
    let subscriptions = resources
        .database
        .push_subscriptions()
        .list(user_id)
        .await
        .unwrap();
    assert_eq!(subscriptions.len(), 1);
    assert!(!subscriptions[0].is_enabled);
}

// ============================================================================
// Test send
// ============================================================================

#[tokio::test]
async fn test_send_test_without_credentials_is_config_error() {
    let (resources, _user_id, auth) = create_authenticated_setup().await.unwrap();
    let router = PushRoutes::routes(resources);

    let response = AxumTestRequest::post("/api/push/send-test")
        .header("authorization", &auth)
        .json(&json!({}))
        .send(router)
        .await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "config_error");
}

#[tokio::test]
async fn test_send_test_success_logs_notification() {
    let provider = spawn_provider(StatusCode::OK, json!({ "id": "msg-1" })).await;
    let (resources, user_id, auth) = authenticated_push_setup(&provider).await;
    let router = PushRoutes::routes(resources.clone());

    let response = AxumTestRequest::post("/api/push/send-test")
        .header("authorization", &auth)
        .json(&json!({ "title": "Hello" }))
        .send(router)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["ok"], true);

    let notifications = resources
        .database
        .notifications()
        .list(user_id)
        .await
        .unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].title, "Hello");
    assert_eq!(notifications[0].source, "onesignal");
    assert_eq!(
        notifications[0].url.as_deref(),
        Some("http://localhost:3000/notifications")
    );
}

#[tokio::test]
async fn test_send_test_passes_provider_error_through_verbatim() {
    let provider = spawn_provider(StatusCode::BAD_REQUEST, json!({ "error": "fail" })).await;
    let (resources, user_id, auth) = authenticated_push_setup(&provider).await;
    let router = PushRoutes::routes(resources.clone());

    let response = AxumTestRequest::post("/api/push/send-test")
        .header("authorization", &auth)
        .json(&json!({}))
        .send(router)
        .await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "fail");

    // Nothing is logged for a failed send
    assert_eq!(
        resources
            .database
            .notifications()
            .count_all(user_id)
            .await
            .unwrap(),
        0
    );
}

#[tokio::test]
async fn test_send_test_joins_provider_errors_array() {
    let provider = spawn_provider(
        StatusCode::BAD_REQUEST,
        json!({ "errors": ["bad app_id", "bad key"] }),
    )
    .await;
    let (resources, _user_id, auth) = authenticated_push_setup(&provider).await;
    let router = PushRoutes::routes(resources);

    let response = AxumTestRequest::post("/api/push/send-test")
        .header("authorization", &auth)
        .json(&json!({}))
        .send(router)
        .await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "bad app_id, bad key");
}
