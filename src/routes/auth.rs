// ABOUTME: Account routes: register, login, logout, and current-user lookup
// ABOUTME: Login issues a JWT and mirrors it into the auth_token cookie for browsers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 CalTrack

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::auth::{hash_password, verify_password};
use crate::errors::AppError;
use crate::models::User;
use crate::resources::ServerResources;
use crate::security::cookies::{clear_auth_cookie, set_auth_cookie};

use super::authenticate;

/// Registration request body
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Login email
    pub email: String,
    /// Plain password, hashed before storage
    pub password: String,
    /// Optional display name
    pub display_name: Option<String>,
}

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Login email
    pub email: String,
    /// Plain password
    pub password: String,
}

/// Public user info returned to clients
#[derive(Debug, Serialize, Deserialize)]
pub struct UserInfo {
    /// User id
    pub user_id: String,
    /// Login email
    pub email: String,
    /// Display name, if set
    pub display_name: Option<String>,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.to_string(),
            email: user.email.clone(),
            display_name: user.display_name.clone(),
        }
    }
}

/// Login response: the token plus basic user info
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for API clients
    pub token: String,
    /// Basic user info
    pub user: UserInfo,
}

/// Account routes
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all account routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/register", post(Self::handle_register))
            .route("/api/auth/login", post(Self::handle_login))
            .route("/api/auth/logout", post(Self::handle_logout))
            .route("/api/auth/me", get(Self::handle_me))
            .with_state(resources)
    }

    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<RegisterRequest>,
    ) -> Result<Response, AppError> {
        let email = body.email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::invalid_input("A valid email is required"));
        }
        if body.password.len() < 8 {
            return Err(AppError::invalid_input(
                "Password must be at least 8 characters",
            ));
        }

        let password_hash = hash_password(&body.password)?;
        let user = resources
            .database
            .users()
            .create(&email, &password_hash, body.display_name.as_deref())
            .await?;

        Ok((
            StatusCode::CREATED,
            Json(json!({ "user_id": user.id.to_string() })),
        )
            .into_response())
    }

    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<LoginRequest>,
    ) -> Result<Response, AppError> {
        let email = body.email.trim().to_lowercase();
        let user = resources
            .database
            .users()
            .get_by_email(&email)
            .await?
            .ok_or_else(|| AppError::auth_invalid("Invalid email or password"))?;

        if !verify_password(&body.password, &user.password_hash)? {
            return Err(AppError::auth_invalid("Invalid email or password"));
        }

        let token = resources.auth_manager.generate_token(&user)?;

        let mut headers = HeaderMap::new();
        set_auth_cookie(
            &mut headers,
            &token,
            resources.auth_manager.token_lifetime_secs(),
        );

        let response = LoginResponse {
            token,
            user: UserInfo::from(&user),
        };
        Ok((StatusCode::OK, headers, Json(response)).into_response())
    }

    async fn handle_logout() -> Response {
        let mut headers = HeaderMap::new();
        clear_auth_cookie(&mut headers);
        (StatusCode::OK, headers, Json(json!({ "ok": true }))).into_response()
    }

    async fn handle_me(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let user = resources
            .database
            .users()
            .get_by_id(auth.user_id)
            .await?
            .ok_or_else(|| AppError::auth_invalid("Account no longer exists"))?;
        Ok((StatusCode::OK, Json(UserInfo::from(&user))).into_response())
    }
}
