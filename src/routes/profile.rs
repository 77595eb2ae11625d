// ABOUTME: Profile routes: fetch and upsert the single per-user profile row
// ABOUTME: The calorie target stored here drives the dashboard budget gauge
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 CalTrack

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::database::profiles::UpsertProfileRequest;
use crate::errors::AppError;
use crate::resources::ServerResources;

use super::authenticate;

/// Profile upsert request body
#[derive(Debug, Deserialize, Default)]
pub struct ProfileBody {
    /// Display name shown in the UI
    pub display_name: Option<String>,
    /// Biological sex, free-form
    pub sex: Option<String>,
    /// Birth year
    pub birth_year: Option<i32>,
    /// Height in centimeters
    pub height_cm: Option<f64>,
    /// Daily calorie target
    pub target_calories: Option<f64>,
}

/// Profile routes
pub struct ProfileRoutes;

impl ProfileRoutes {
    /// Create the profile routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/profile",
                get(Self::handle_get).put(Self::handle_upsert),
            )
            .with_state(resources)
    }

    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let profile = resources.database.profiles().get(auth.user_id).await?;
        match profile {
            Some(profile) => Ok((StatusCode::OK, Json(profile)).into_response()),
            None => Ok((StatusCode::OK, Json(json!(null))).into_response()),
        }
    }

    async fn handle_upsert(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<ProfileBody>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        if body.target_calories.is_some_and(|t| !t.is_finite()) {
            return Err(AppError::invalid_input("target_calories must be a number"));
        }
        if body.height_cm.is_some_and(|h| !h.is_finite() || h <= 0.0) {
            return Err(AppError::invalid_input("height_cm must be positive"));
        }

        let request = UpsertProfileRequest {
            display_name: body.display_name,
            sex: body.sex,
            birth_year: body.birth_year,
            height_cm: body.height_cm,
            target_calories: body.target_calories,
        };
        let profile = resources
            .database
            .profiles()
            .upsert(auth.user_id, &request)
            .await?;
        Ok((StatusCode::OK, Json(profile)).into_response())
    }
}
