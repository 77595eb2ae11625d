// ABOUTME: Notification center routes: list, mark-read, and soft delete
// ABOUTME: Deletion hides a row from listings; history is never hard-deleted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 CalTrack

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::json;
use uuid::Uuid;

use crate::errors::AppError;
use crate::resources::ServerResources;

use super::authenticate;

/// Notification center routes
pub struct NotificationRoutes;

impl NotificationRoutes {
    /// Create the notification routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/notifications", get(Self::handle_list))
            .route("/api/notifications/:id/read", post(Self::handle_mark_read))
            .route("/api/notifications/:id", delete(Self::handle_delete))
            .with_state(resources)
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let notifications = resources.database.notifications().list(auth.user_id).await?;
        Ok((StatusCode::OK, Json(notifications)).into_response())
    }

    async fn handle_mark_read(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        if !resources
            .database
            .notifications()
            .mark_read(auth.user_id, id)
            .await?
        {
            return Err(AppError::not_found("Notification not found"));
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
            .notifications()
            .soft_delete(auth.user_id, id)
            .await?
        {
            return Err(AppError::not_found("Notification not found"));
        }
        Ok((StatusCode::OK, Json(json!({ "ok": true }))).into_response())
    }
}
