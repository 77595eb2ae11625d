// ABOUTME: Environment-backed server configuration loading and validation
// ABOUTME: All settings come from environment variables; push credentials are optional
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 CalTrack

//! Server configuration
//!
//! Configuration is environment-only. Required: `JWT_SECRET`. Everything else
//! has a development default. `OneSignal` credentials are deliberately optional
//! at startup; the push send route reports a configuration error at call time
//! when they are unset, so the rest of the API stays usable without them.

use std::env;

use crate::errors::{AppError, AppResult};

/// Default HTTP port when `HTTP_PORT` is unset
const DEFAULT_HTTP_PORT: u16 = 8081;

/// Default JWT lifetime in hours when `TOKEN_EXPIRY_HOURS` is unset
const DEFAULT_TOKEN_EXPIRY_HOURS: i64 = 24;

/// `OneSignal` REST API base
const DEFAULT_ONESIGNAL_BASE_URL: &str = "https://onesignal.com/api/v1";

/// `OneSignal` push provider credentials
#[derive(Debug, Clone)]
pub struct OneSignalConfig {
    /// Application id issued by `OneSignal`
    pub app_id: String,
    /// REST API key, sent as Basic authorization
    pub api_key: String,
    /// API base URL (overridable for tests)
    pub base_url: String,
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port the HTTP listener binds
    pub http_port: u16,
    /// SQLite database URL
    pub database_url: String,
    /// Secret for HS256 JWT signing
    pub jwt_secret: String,
    /// JWT lifetime in hours
    pub token_expiry_hours: i64,
    /// Public base URL of the web frontend (used for notification links)
    pub base_url: String,
    /// Display name used as the default notification title
    pub app_name: String,
    /// Push provider credentials; `None` until both env vars are set
    pub onesignal: Option<OneSignalConfig>,
}

impl ServerConfig {
    /// Load configuration from the environment
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `JWT_SECRET` is unset or a numeric
    /// variable does not parse.
    pub fn from_env() -> AppResult<Self> {
        let http_port = match env::var("HTTP_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|e| AppError::config(format!("Invalid HTTP_PORT '{raw}': {e}")))?,
            Err(_) => DEFAULT_HTTP_PORT,
        };

        let token_expiry_hours = match env::var("TOKEN_EXPIRY_HOURS") {
            Ok(raw) => raw
                .parse::<i64>()
                .map_err(|e| AppError::config(format!("Invalid TOKEN_EXPIRY_HOURS '{raw}': {e}")))?,
            Err(_) => DEFAULT_TOKEN_EXPIRY_HOURS,
        };

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| AppError::config("JWT_SECRET environment variable must be set"))?;

        Ok(Self {
            http_port,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:./data/caltrack.db".to_owned()),
            jwt_secret,
            token_expiry_hours,
            base_url: env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned()),
            app_name: env::var("APP_NAME").unwrap_or_else(|_| "CalTrack".to_owned()),
            onesignal: Self::onesignal_from_env(),
        })
    }

    /// Read `OneSignal` credentials; both id and key must be present and non-empty
    fn onesignal_from_env() -> Option<OneSignalConfig> {
        let app_id = env::var("ONESIGNAL_APP_ID").ok().filter(|v| !v.is_empty())?;
        let api_key = env::var("ONESIGNAL_API_KEY")
            .ok()
            .filter(|v| !v.is_empty())?;
        Some(OneSignalConfig {
            app_id,
            api_key,
            base_url: env::var("ONESIGNAL_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_ONESIGNAL_BASE_URL.to_owned()),
        })
    }
}
