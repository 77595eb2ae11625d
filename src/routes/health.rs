// ABOUTME: Health check route for uptime probes
// ABOUTME: Unauthenticated; reports service name and version
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 CalTrack

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;

use crate::resources::ServerResources;

/// Health check routes
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the health routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/health", get(Self::handle_health))
            .with_state(resources)
    }

    async fn handle_health(
        State(resources): State<Arc<ServerResources>>,
    ) -> impl IntoResponse {
        Json(json!({
            "status": "ok",
            "service": resources.config.app_name,
            "version": env!("CARGO_PKG_VERSION"),
        }))
    }
}
