// ABOUTME: Dashboard route: the daily summary combining budget gauge and weight trend
// ABOUTME: Everything is derived fresh per request; nothing is cached or denormalized
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 CalTrack

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::metrics::{summarize_day, weight_delta_7d, DailyCalorieSummary, WeightSample};
use crate::resources::ServerResources;

use super::authenticate;

/// Day selector; defaults to today
#[derive(Debug, Deserialize, Default)]
pub struct SummaryQuery {
    /// Day to summarize, `YYYY-MM-DD`
    pub date: Option<NaiveDate>,
}

/// Full dashboard payload for one day
#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Day the summary covers
    pub date: NaiveDate,
    /// Calorie budget figures
    pub calories: DailyCalorieSummary,
    /// Daily calorie target, when the profile defines one
    pub target_calories: Option<f64>,
    /// Most recent weight measurement
    pub latest_weight_kg: Option<f64>,
    /// Change over the trailing 7 days
    pub weight_delta_7d_kg: Option<f64>,
}

/// Dashboard routes
pub struct DashboardRoutes;

impl DashboardRoutes {
    /// Create the dashboard routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/dashboard/summary", get(Self::handle_summary))
            .with_state(resources)
    }

    async fn handle_summary(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<SummaryQuery>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let day = query.date.unwrap_or_else(|| chrono::Utc::now().date_naive());

        let meals = resources
            .database
            .meal_logs()
            .list_for_day(auth.user_id, day)
            .await?;
        let activities = resources
            .database
            .activity_logs()
            .list_for_day(auth.user_id, day)
            .await?;
        let target = resources
            .database
            .profiles()
            .target_calories(auth.user_id)
            .await?;
        let weights = resources
            .database
            .weights()
            .list(auth.user_id, None, None)
            .await?;

        let meal_calories: Vec<Option<f64>> = meals.iter().map(|m| m.calories).collect();
        let activity_burns: Vec<Option<f64>> =
            activities.iter().map(|a| a.calories_burned).collect();
        let samples: Vec<WeightSample> = weights.iter().map(WeightSample::from).collect();

        let summary = DashboardSummary {
            date: day,
            calories: summarize_day(&meal_calories, &activity_burns, target),
            target_calories: target.filter(|t| *t > 0.0),
            latest_weight_kg: weights.first().map(|w| w.weight_kg),
            weight_delta_7d_kg: weight_delta_7d(&samples),
        };
        Ok((StatusCode::OK, Json(summary)).into_response())
    }
}
