// ABOUTME: Integration tests for the profile route handlers
// ABOUTME: Covers the null-when-missing fetch and the single-row upsert
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 CalTrack

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use caltrack_server::models::Profile;
use caltrack_server::routes::ProfileRoutes;
use common::create_authenticated_setup;
use helpers::axum_test::AxumTestRequest;
use serde_json::json;

#[tokio::test]
async fn test_get_without_profile_is_null() {
    let (resources, _user_id, auth) = create_authenticated_setup().await.unwrap();
    let router = ProfileRoutes::routes(resources);

    let response = AxumTestRequest::get("/api/profile")
        .header("authorization", &auth)
        .send(router)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert!(body.is_null());
}

#[tokio::test]
async fn test_upsert_then_get() {
    let (resources, user_id, auth) = create_authenticated_setup().await.unwrap();
    let router = ProfileRoutes::routes(resources);

    let response = AxumTestRequest::put("/api/profile")
        .header("authorization", &auth)
        .json(&json!({
            "display_name": "Runner",
            "sex": "f",
            "birth_year": 1992,
            "height_cm": 168.0,
            "target_calories": 1800.0
        }))
        .send(router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let profile: Profile = response.json();
    assert_eq!(profile.user_id, user_id);
    assert_eq!(profile.target_calories, Some(1800.0));

    // A second upsert replaces the single row
    let response = AxumTestRequest::put("/api/profile")
        .header("authorization", &auth)
        .json(&json!({ "display_name": "Runner", "target_calories": 2000.0 }))
        .send(router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let profile: Profile = AxumTestRequest::get("/api/profile")
        .header("authorization", &auth)
        .send(router)
        .await
        .json();
    assert_eq!(profile.target_calories, Some(2000.0));
    // Fields omitted by the upsert are cleared, not merged
    assert_eq!(profile.height_cm, None);
}

#[tokio::test]
async fn test_upsert_validates_numbers() {
    let (resources, _user_id, auth) = create_authenticated_setup().await.unwrap();
    let router = ProfileRoutes::routes(resources);

    let response = AxumTestRequest::put("/api/profile")
        .header("authorization", &auth)
        .json(&json!({ "height_cm": -5.0 }))
        .send(router)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}
