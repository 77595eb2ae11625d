// ABOUTME: Unified error handling with standard error codes and HTTP responses
// ABOUTME: Every handler failure path is a typed AppError; nothing panics past a boundary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 CalTrack

//! Application error types
//!
//! The error taxonomy mirrors the HTTP surface: validation (400), authentication
//! (401), not-found (404), configuration (500, fixed message), and
//! upstream/storage failures (500, underlying message passed through verbatim).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Convenient result alias used throughout the crate
pub type AppResult<T> = Result<T, AppError>;

/// Stable machine-readable error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Malformed or missing input fields
    InvalidInput,
    /// No credentials supplied
    AuthRequired,
    /// Credentials supplied but rejected
    AuthInvalid,
    /// Addressed resource does not exist (or is not owned by the caller)
    ResourceNotFound,
    /// Server-side configuration is missing or inconsistent
    ConfigError,
    /// Database operation failed
    DatabaseError,
    /// A third-party service call failed
    ExternalServiceError,
    /// Catch-all internal failure
    InternalError,
}

impl ErrorCode {
    /// String form used in JSON error bodies
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::AuthRequired => "auth_required",
            Self::AuthInvalid => "auth_invalid",
            Self::ResourceNotFound => "resource_not_found",
            Self::ConfigError => "config_error",
            Self::DatabaseError => "database_error",
            Self::ExternalServiceError => "external_service_error",
            Self::InternalError => "internal_error",
        }
    }

    /// HTTP status the code maps to
    #[must_use]
    pub const fn http_status(self) -> StatusCode {
        match self {
            Self::InvalidInput => StatusCode::BAD_REQUEST,
            Self::AuthRequired | Self::AuthInvalid => StatusCode::UNAUTHORIZED,
            Self::ResourceNotFound => StatusCode::NOT_FOUND,
            Self::ConfigError
            | Self::DatabaseError
            | Self::ExternalServiceError
            | Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Application error carrying a code and a human-readable message
#[derive(Debug, Error)]
#[error("{message}")]
pub struct AppError {
    /// Machine-readable error classification
    pub code: ErrorCode,
    /// Human-readable message surfaced to the caller
    pub message: String,
}

impl AppError {
    /// Create an error with an explicit code
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Validation failure (HTTP 400)
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Missing credentials (HTTP 401)
    #[must_use]
    pub fn auth_required(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthRequired, message)
    }

    /// Rejected credentials (HTTP 401)
    #[must_use]
    pub fn auth_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthInvalid, message)
    }

    /// Addressed resource missing (HTTP 404)
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResourceNotFound, message)
    }

    /// Server configuration problem (HTTP 500)
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Database failure (HTTP 500); the underlying message is passed through
    #[must_use]
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Third-party service failure (HTTP 500)
    #[must_use]
    pub fn external_service(service: &str, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{service}: {}", message.into()),
        )
    }

    /// Internal failure (HTTP 500)
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::internal(format!("JSON serialization failed: {err}"))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        Self::database(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.code.http_status();
        if status.is_server_error() {
            tracing::error!(code = self.code.as_str(), "{}", self.message);
        }
        let body = Json(json!({
            "error": self.message,
            "code": self.code.as_str(),
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_map_to_expected_statuses() {
        assert_eq!(
            AppError::invalid_input("bad").code.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::auth_required("who").code.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::not_found("gone").code.http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::database("boom").code.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn external_service_errors_name_the_service() {
        let err = AppError::external_service("OneSignal", "fail");
        assert_eq!(err.message, "OneSignal: fail");
        assert_eq!(err.code, ErrorCode::ExternalServiceError);
    }
}
