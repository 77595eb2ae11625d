// ABOUTME: Router assembly and the HTTP serve loop
// ABOUTME: Merges every domain router over shared resources and binds the listener
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 CalTrack

//! HTTP server assembly
//!
//! [`create_router`] builds the full API surface from the per-domain routers;
//! tests drive it directly through tower. [`serve`] binds the listener and
//! runs until shutdown.

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::errors::{AppError, AppResult};
use crate::resources::ServerResources;
use crate::routes::{
    ActivityRoutes, AuthRoutes, DashboardRoutes, HealthRoutes, MealRoutes, NotificationRoutes,
    ProfileRoutes, PushRoutes, WeightRoutes,
};

/// Assemble the complete API router
#[must_use]
pub fn create_router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes(resources.clone()))
        .merge(AuthRoutes::routes(resources.clone()))
        .merge(ProfileRoutes::routes(resources.clone()))
        .merge(WeightRoutes::routes(resources.clone()))
        .merge(MealRoutes::routes(resources.clone()))
        .merge(ActivityRoutes::routes(resources.clone()))
        .merge(DashboardRoutes::routes(resources.clone()))
        .merge(NotificationRoutes::routes(resources.clone()))
        .merge(PushRoutes::routes(resources))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Bind the configured port and serve requests until the process is stopped
///
/// # Errors
///
/// Returns an error when the listener cannot bind or the accept loop fails.
pub async fn serve(resources: Arc<ServerResources>) -> AppResult<()> {
    let port = resources.config.http_port;
    let app = create_router(resources);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind port {port}: {e}")))?;
    info!(port, "HTTP server listening");

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))
}
