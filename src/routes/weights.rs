// ABOUTME: Weight routes: range listing, per-date upsert, delete, and the 7-day delta
// ABOUTME: One entry per date; writing the same date again replaces the measurement
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 CalTrack

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::errors::AppError;
use crate::metrics::{weight_delta_7d, WeightSample};
use crate::resources::ServerResources;

use super::authenticate;

/// Optional inclusive date range filter
#[derive(Debug, Deserialize, Default)]
pub struct RangeQuery {
    /// Earliest date included
    pub from: Option<NaiveDate>,
    /// Latest date included
    pub to: Option<NaiveDate>,
}

/// Weight upsert request body
#[derive(Debug, Deserialize)]
pub struct WeightBody {
    /// Measurement date
    pub recorded_at: NaiveDate,
    /// Weight in kilograms
    pub weight_kg: f64,
}

/// Weight entry routes
pub struct WeightRoutes;

impl WeightRoutes {
    /// Create the weight routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/weights",
                get(Self::handle_list).put(Self::handle_upsert),
            )
            .route("/api/weights/delta", get(Self::handle_delta))
            .route("/api/weights/:id", delete(Self::handle_delete))
            .with_state(resources)
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(range): Query<RangeQuery>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let entries = resources
            .database
            .weights()
            .list(auth.user_id, range.from, range.to)
            .await?;
        Ok((StatusCode::OK, Json(entries)).into_response())
    }

    async fn handle_upsert(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<WeightBody>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        if !body.weight_kg.is_finite() || body.weight_kg <= 0.0 {
            return Err(AppError::invalid_input("weight_kg must be positive"));
        }
        let entry = resources
            .database
            .weights()
            .upsert(auth.user_id, body.recorded_at, body.weight_kg)
            .await?;
        Ok((StatusCode::OK, Json(entry)).into_response())
    }

    async fn handle_delta(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let entries = resources
            .database
            .weights()
            .list(auth.user_id, None, None)
            .await?;
        let samples: Vec<WeightSample> = entries.iter().map(WeightSample::from).collect();
        let delta = weight_delta_7d(&samples);
        Ok((StatusCode::OK, Json(json!({ "delta_kg": delta }))).into_response())
    }

    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        if !resources.database.weights().delete(auth.user_id, id).await? {
            return Err(AppError::not_found("Weight entry not found"));
        }
        Ok((StatusCode::OK, Json(json!({ "ok": true }))).into_response())
    }
}
