// ABOUTME: Route module organization for the CalTrack HTTP endpoints
// ABOUTME: One module per domain; handlers are thin and delegate to managers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 CalTrack

//! Route modules
//!
//! Each domain exposes an `XRoutes::routes(Arc<ServerResources>)` constructor
//! returning an axum `Router`. Handlers authenticate, delegate to the database
//! managers or metrics functions, and serialize; nothing here holds state.

use std::sync::Arc;

use axum::http::HeaderMap;

use crate::auth::AuthResult;
use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::security::cookies::{get_cookie_value, AUTH_COOKIE};

/// Activity log endpoints and the energy estimate
pub mod activities;
/// Registration, login, logout, current-user
pub mod auth;
/// Daily calorie budget summary
pub mod dashboard;
/// Health check and system status
pub mod health;
/// Meal log and meal template endpoints
pub mod meals;
/// Notification center endpoints
pub mod notifications;
/// Profile fetch and upsert
pub mod profile;
/// Push subscription registration and test send
pub mod push;
/// Weight entry endpoints and the 7-day delta
pub mod weights;

pub use activities::ActivityRoutes;
pub use auth::AuthRoutes;
pub use dashboard::DashboardRoutes;
pub use health::HealthRoutes;
pub use meals::MealRoutes;
pub use notifications::NotificationRoutes;
pub use profile::ProfileRoutes;
pub use push::PushRoutes;
pub use weights::WeightRoutes;

/// Extract and authenticate the user from the authorization header or cookie
///
/// The `Authorization` header wins; browser clients fall back to the
/// `auth_token` cookie set at login.
///
/// # Errors
///
/// Returns an authentication error when neither carrier is present or the
/// token is invalid.
pub fn authenticate(
    headers: &HeaderMap,
    resources: &Arc<ServerResources>,
) -> Result<AuthResult, AppError> {
    let auth_value =
        if let Some(header) = headers.get("authorization").and_then(|h| h.to_str().ok()) {
            header.to_owned()
        } else if let Some(token) = get_cookie_value(headers, AUTH_COOKIE) {
            format!("Bearer {token}")
        } else {
            return Err(AppError::auth_required(
                "Missing authorization header or cookie",
            ));
        };

    resources.auth_manager.authenticate_request(Some(&auth_value))
}
