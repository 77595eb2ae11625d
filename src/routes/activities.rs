// ABOUTME: Activity routes: per-day log CRUD and the MET-based energy estimate
// ABOUTME: The estimate falls back from query weight to latest logged weight to a default
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 CalTrack

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::database::activity_logs::WriteActivityLogRequest;
use crate::errors::AppError;
use crate::metrics::{estimate_activity_calories, met_for_activity, DEFAULT_WEIGHT_KG};
use crate::resources::ServerResources;

use super::authenticate;

/// Day filter for the log listing; defaults to today
#[derive(Debug, Deserialize, Default)]
pub struct DayQuery {
    /// Day to list, `YYYY-MM-DD`
    pub date: Option<NaiveDate>,
}

/// Activity log write request body
#[derive(Debug, Deserialize)]
pub struct ActivityLogBody {
    /// Day the activity belongs to; defaults to today
    pub recorded_at: Option<NaiveDate>,
    /// Free-form activity type
    pub activity_type: String,
    /// Duration in minutes
    pub duration_min: f64,
    /// Calories burned; estimated from the MET table when omitted
    pub calories_burned: Option<f64>,
}

/// Energy estimate query parameters
#[derive(Debug, Deserialize)]
pub struct EstimateQuery {
    /// Activity type matched against the MET table
    pub activity_type: String,
    /// Duration in minutes
    pub duration_min: f64,
    /// Body weight override in kilograms
    pub weight_kg: Option<f64>,
}

/// Activity log routes
pub struct ActivityRoutes;

impl ActivityRoutes {
    /// Create the activity routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/activities",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/api/activities/estimate",
                get(Self::handle_estimate),
            )
            .route(
                "/api/activities/:id",
                put(Self::handle_update).delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    fn validate_write(body: ActivityLogBody) -> Result<WriteActivityLogRequest, AppError> {
        let activity_type = body.activity_type.trim().to_owned();
        if activity_type.is_empty() {
            return Err(AppError::invalid_input("activity_type is required"));
        }
        if !body.duration_min.is_finite() || body.duration_min <= 0.0 {
            return Err(AppError::invalid_input("duration_min must be positive"));
        }
        if body
            .calories_burned
            .is_some_and(|c| !c.is_finite() || c < 0.0)
        {
            return Err(AppError::invalid_input(
                "calories_burned must be non-negative",
            ));
        }
        Ok(WriteActivityLogRequest {
            recorded_at: body
                .recorded_at
                .unwrap_or_else(|| chrono::Utc::now().date_naive()),
            activity_type,
            duration_min: body.duration_min,
            calories_burned: body.calories_burned,
        })
    }

    /// Body weight used for estimation: explicit query value, then the latest
    /// logged measurement, then the fixed default.
    async fn resolve_weight(
        resources: &Arc<ServerResources>,
        user_id: Uuid,
        explicit: Option<f64>,
    ) -> Result<f64, AppError> {
        if let Some(weight) = explicit {
            if !weight.is_finite() || weight <= 0.0 {
                return Err(AppError::invalid_input("weight_kg must be positive"));
            }
            return Ok(weight);
        }
        let latest = resources.database.weights().latest(user_id).await?;
        Ok(latest.map_or(DEFAULT_WEIGHT_KG, |entry| entry.weight_kg))
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<DayQuery>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let day = query.date.unwrap_or_else(|| chrono::Utc::now().date_naive());
        let logs = resources
            .database
            .activity_logs()
            .list_for_day(auth.user_id, day)
            .await?;
        Ok((StatusCode::OK, Json(logs)).into_response())
    }

    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<ActivityLogBody>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let mut request = Self::validate_write(body)?;

        // Fill in a MET estimate for known activity types when the client
        // logged a duration without a burn figure
        if request.calories_burned.is_none() {
            if let Some(met) = met_for_activity(&request.activity_type) {
                let weight = Self::resolve_weight(&resources, auth.user_id, None).await?;
                request.calories_burned =
                    Some(estimate_activity_calories(met, weight, request.duration_min));
            }
        }

        let log = resources
            .database
            .activity_logs()
            .create(auth.user_id, &request)
            .await?;
        Ok((StatusCode::CREATED, Json(log)).into_response())
    }

    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<Uuid>,
        Json(body): Json<ActivityLogBody>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let request = Self::validate_write(body)?;
        if !resources
            .database
            .activity_logs()
            .update(auth.user_id, id, &request)
            .await?
        {
            return Err(AppError::not_found("Activity log not found"));
        }
        Ok((StatusCode::OK, Json(json!({ "ok": true }))).into_response())
    }

    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        if !resources
            .database
            .activity_logs()
            .delete(auth.user_id, id)
            .await?
        {
            return Err(AppError::not_found("Activity log not found"));
        }
        Ok((StatusCode::OK, Json(json!({ "ok": true }))).into_response())
    }

    async fn handle_estimate(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<EstimateQuery>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let met = met_for_activity(&query.activity_type)
            .ok_or_else(|| AppError::invalid_input("Unknown activity_type"))?;
        let weight = Self::resolve_weight(&resources, auth.user_id, query.weight_kg).await?;
        let calories = estimate_activity_calories(met, weight, query.duration_min);
        Ok((
            StatusCode::OK,
            Json(json!({
                "activity_type": query.activity_type,
                "met": met,
                "weight_kg": weight,
                "duration_min": query.duration_min,
                "calories": calories,
            })),
        )
            .into_response())
    }
}
