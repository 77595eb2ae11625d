// ABOUTME: Integration tests for the weight route handlers
// ABOUTME: Covers per-date upsert semantics, range listing, delete, and the 7-day delta
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 CalTrack

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use caltrack_server::models::WeightEntry;
use caltrack_server::routes::WeightRoutes;
use common::create_authenticated_setup;
use helpers::axum_test::AxumTestRequest;
use serde_json::json;

async fn put_weight(
    router: &axum::Router,
    auth: &str,
    date: &str,
    kg: f64,
) -> helpers::axum_test::AxumTestResponse {
    AxumTestRequest::put("/api/weights")
        .header("authorization", auth)
        .json(&json!({ "recorded_at": date, "weight_kg": kg }))
        .send(router.clone())
        .await
}

#[tokio::test]
async fn test_weights_require_auth() {
    let (resources, _user_id, _auth) = create_authenticated_setup().await.unwrap();
    let router = WeightRoutes::routes(resources);
    let response = AxumTestRequest::get("/api/weights").send(router).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_upsert_replaces_same_date() {
    let (resources, user_id, auth) = create_authenticated_setup().await.unwrap();
    let router = WeightRoutes::routes(resources.clone());

    let first = put_weight(&router, &auth, "2026-08-20", 82.0).await;
    assert_eq!(first.status_code(), StatusCode::OK);
    let first: WeightEntry = first.json();

    let second = put_weight(&router, &auth, "2026-08-20", 81.4).await;
    assert_eq!(second.status_code(), StatusCode::OK);
    let second: WeightEntry = second.json();

    // Same row, new value
    assert_eq!(second.id, first.id);
    let entries = resources
        .database
        .weights()
        .list(user_id, None, None)
        .await
        .unwrap();
    assert_eq!(entries.len(), 1);
    assert!((entries[0].weight_kg - 81.4).abs() < 1e-9);
}

#[tokio::test]
async fn test_upsert_rejects_non_positive_weight() {
    let (resources, _user_id, auth) = create_authenticated_setup().await.unwrap();
    let router = WeightRoutes::routes(resources);

    let response = put_weight(&router, &auth, "2026-08-20", 0.0).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let response = put_weight(&router, &auth, "2026-08-20", -3.0).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_respects_date_range() {
    let (resources, _user_id, auth) = create_authenticated_setup().await.unwrap();
    let router = WeightRoutes::routes(resources);

    put_weight(&router, &auth, "2026-08-01", 84.0).await;
    put_weight(&router, &auth, "2026-08-10", 83.0).await;
    put_weight(&router, &auth, "2026-08-20", 82.0).await;

    let response = AxumTestRequest::get("/api/weights?from=2026-08-05&to=2026-08-15")
        .header("authorization", &auth)
        .send(router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let entries: Vec<WeightEntry> = response.json();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].recorded_at.to_string(), "2026-08-10");

    // Unbounded listing returns newest first
    let response = AxumTestRequest::get("/api/weights")
        .header("authorization", &auth)
        .send(router)
        .await;
    let entries: Vec<WeightEntry> = response.json();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].recorded_at.to_string(), "2026-08-20");
}

#[tokio::test]
async fn test_delta_route_compares_seven_days_back() {
    let (resources, _user_id, auth) = create_authenticated_setup().await.unwrap();
    let router = WeightRoutes::routes(resources);

    // No entries: null delta
    let response = AxumTestRequest::get("/api/weights/delta")
        .header("authorization", &auth)
        .send(router.clone())
        .await;
    let body: serde_json::Value = response.json();
    assert!(body["delta_kg"].is_null());

    put_weight(&router, &auth, "2026-08-13", 82.5).await;
    put_weight(&router, &auth, "2026-08-16", 82.0).await;
    put_weight(&router, &auth, "2026-08-20", 81.0).await;

    let response = AxumTestRequest::get("/api/weights/delta")
        .header("authorization", &auth)
        .send(router)
        .await;
    let body: serde_json::Value = response.json();
    // 81.0 against the entry exactly 7 days earlier
    assert!((body["delta_kg"].as_f64().unwrap() - (81.0 - 82.5)).abs() < 1e-9);
}

#[tokio::test]
async fn test_delete_scopes_to_owner() {
    let (resources, _user_id, auth) = create_authenticated_setup().await.unwrap();
    let (_other_id, other_user) = common::create_test_user(&resources.database).await.unwrap();
    let other_auth = format!(
        "Bearer {}",
        resources.auth_manager.generate_token(&other_user).unwrap()
    );
    let router = WeightRoutes::routes(resources);

    let entry: WeightEntry = put_weight(&router, &auth, "2026-08-20", 82.0).await.json();

    // Another user cannot delete it
    let response = AxumTestRequest::delete(&format!("/api/weights/{}", entry.id))
        .header("authorization", &other_auth)
        .send(router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let response = AxumTestRequest::delete(&format!("/api/weights/{}", entry.id))
        .header("authorization", &auth)
        .send(router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    // Gone now
    let response = AxumTestRequest::delete(&format!("/api/weights/{}", entry.id))
        .header("authorization", &auth)
        .send(router)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
