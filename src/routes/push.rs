// ABOUTME: Push routes: subscription registration and the test-notification send
// ABOUTME: Sends deliver first, then log; a logging failure never fails the request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 CalTrack

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;
use tracing::warn;

use crate::database::notifications::InsertNotificationRequest;
use crate::errors::AppError;
use crate::external::PROVIDER_NAME;
use crate::push::{validate_registration, NotificationContent, RawSubscription, SendTestRequest};
use crate::resources::ServerResources;

use super::authenticate;

/// Push subscription and send routes
pub struct PushRoutes;

impl PushRoutes {
    /// Create the push routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/push/subscribe", post(Self::handle_subscribe))
            .route("/api/push/send-test", post(Self::handle_send_test))
            .with_state(resources)
    }

    async fn handle_subscribe(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(raw): Json<RawSubscription>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let payload = validate_registration(&raw)?;
        resources
            .database
            .push_subscriptions()
            .upsert(auth.user_id, &payload)
            .await?;
        Ok((StatusCode::OK, Json(json!({ "ok": true }))).into_response())
    }

    async fn handle_send_test(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<SendTestRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let client = resources
            .push_client
            .as_ref()
            .ok_or_else(|| AppError::config("Push notifications are not configured"))?;

        let content = NotificationContent::test_defaults(
            request,
            &resources.config.app_name,
            &resources.config.base_url,
        );

        client
            .send_to_user(&auth.user_id.to_string(), &content)
            .await?;

        // The send succeeded; history logging is best-effort from here
        let record = InsertNotificationRequest {
            title: content.title,
            body: content.body,
            url: Some(content.url),
            data: None,
            source: PROVIDER_NAME.to_owned(),
        };
        if let Err(e) = resources
            .database
            .notifications()
            .insert(auth.user_id, &record)
            .await
        {
            warn!(user_id = %auth.user_id, "Failed to log sent notification: {e}");
        }

        Ok((StatusCode::OK, Json(json!({ "ok": true }))).into_response())
    }
}
