// ABOUTME: Meal routes: per-day log CRUD plus reusable template CRUD
// ABOUTME: Logging from a template copies its values; later template edits never rewrite logs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 CalTrack

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::database::meal_logs::WriteMealLogRequest;
use crate::database::meal_templates::WriteMealTemplateRequest;
use crate::errors::AppError;
use crate::models::MealType;
use crate::resources::ServerResources;

use super::authenticate;

/// Day filter for the log listing; defaults to today
#[derive(Debug, Deserialize, Default)]
pub struct DayQuery {
    /// Day to list, `YYYY-MM-DD`
    pub date: Option<NaiveDate>,
}

/// Meal log write request body
#[derive(Debug, Deserialize)]
pub struct MealLogBody {
    /// Day the meal belongs to; defaults to today
    pub recorded_at: Option<NaiveDate>,
    /// Meal slot; unknown values fall back to "snack"
    pub meal_type: Option<String>,
    /// Free-form name
    pub name: Option<String>,
    /// Calories consumed
    pub calories: Option<f64>,
    /// Template to copy name and calories from
    pub template_id: Option<Uuid>,
}

/// Meal template write request body
#[derive(Debug, Deserialize)]
pub struct MealTemplateBody {
    /// Template name
    pub name: String,
    /// Calories per serving
    pub calories: f64,
    /// Protein grams
    pub protein_g: Option<f64>,
    /// Carbohydrate grams
    pub carbs_g: Option<f64>,
    /// Fat grams
    pub fat_g: Option<f64>,
}

impl MealTemplateBody {
    fn validate(&self) -> Result<WriteMealTemplateRequest, AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::invalid_input("name is required"));
        }
        if !self.calories.is_finite() || self.calories < 0.0 {
            return Err(AppError::invalid_input("calories must be non-negative"));
        }
        Ok(WriteMealTemplateRequest {
            name: self.name.trim().to_owned(),
            calories: self.calories,
            protein_g: self.protein_g,
            carbs_g: self.carbs_g,
            fat_g: self.fat_g,
        })
    }
}

/// Meal log and template routes
pub struct MealRoutes;

impl MealRoutes {
    /// Create the meal routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/meals",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/api/meals/:id",
                axum::routing::put(Self::handle_update).delete(Self::handle_delete),
            )
            .route(
                "/api/meal-templates",
                get(Self::handle_list_templates).post(Self::handle_create_template),
            )
            .route(
                "/api/meal-templates/:id",
                axum::routing::put(Self::handle_update_template)
                    .delete(Self::handle_delete_template),
            )
            .with_state(resources)
    }

    /// Resolve the write request, copying name/calories from a template when
    /// one is referenced and the field was not set explicitly.
    async fn resolve_write(
        resources: &Arc<ServerResources>,
        user_id: Uuid,
        body: MealLogBody,
    ) -> Result<WriteMealLogRequest, AppError> {
        if body.calories.is_some_and(|c| !c.is_finite() || c < 0.0) {
            return Err(AppError::invalid_input("calories must be non-negative"));
        }

        let mut name = body.name;
        let mut calories = body.calories;
        if let Some(template_id) = body.template_id {
            let template = resources
                .database
                .meal_templates()
                .list(user_id)
                .await?
                .into_iter()
                .find(|t| t.id == template_id)
                .ok_or_else(|| AppError::not_found("Meal template not found"))?;
            if name.is_none() {
                name = Some(template.name);
            }
            if calories.is_none() {
                calories = Some(template.calories);
            }
        }

        Ok(WriteMealLogRequest {
            recorded_at: body
                .recorded_at
                .unwrap_or_else(|| chrono::Utc::now().date_naive()),
            meal_type: body
                .meal_type
                .as_deref()
                .map_or(MealType::Snack, MealType::parse),
            name,
            calories,
            template_id: body.template_id,
        })
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
            .meal_logs()
            .list_for_day(auth.user_id, day)
            .await?;
        Ok((StatusCode::OK, Json(logs)).into_response())
    }

    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<MealLogBody>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let request = Self::resolve_write(&resources, auth.user_id, body).await?;
        let log = resources
            .database
            .meal_logs()
            .create(auth.user_id, &request)
            .await?;
        Ok((StatusCode::CREATED, Json(log)).into_response())
    }

    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<Uuid>,
        Json(body): Json<MealLogBody>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let request = Self::resolve_write(&resources, auth.user_id, body).await?;
        if !resources
            .database
            .meal_logs()
            .update(auth.user_id, id, &request)
            .await?
        {
            return Err(AppError::not_found("Meal log not found"));
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
            .meal_logs()
            .delete(auth.user_id, id)
            .await?
        {
            return Err(AppError::not_found("Meal log not found"));
        }
        Ok((StatusCode::OK, Json(json!({ "ok": true }))).into_response())
    }

    async fn handle_list_templates(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let templates = resources.database.meal_templates().list(auth.user_id).await?;
        Ok((StatusCode::OK, Json(templates)).into_response())
    }

    async fn handle_create_template(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<MealTemplateBody>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let request = body.validate()?;
        let template = resources
            .database
            .meal_templates()
            .create(auth.user_id, &request)
            .await?;
        Ok((StatusCode::CREATED, Json(template)).into_response())
    }

    async fn handle_update_template(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<Uuid>,
        Json(body): Json<MealTemplateBody>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let request = body.validate()?;
        if !resources
            .database
            .meal_templates()
            .update(auth.user_id, id, &request)
            .await?
        {
            return Err(AppError::not_found("Meal template not found"));
        }
        Ok((StatusCode::OK, Json(json!({ "ok": true }))).into_response())
    }

    async fn handle_delete_template(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        if !resources
            .database
            .meal_templates()
            .delete(auth.user_id, id)
            .await?
        {
            return Err(AppError::not_found("Meal template not found"));
        }
        Ok((StatusCode::OK, Json(json!({ "ok": true }))).into_response())
    }
}
