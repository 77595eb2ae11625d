// ABOUTME: JWT authentication manager and password hashing
// ABOUTME: HS256 tokens carry the user id; requests authenticate via bearer header or cookie
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 CalTrack

//! Authentication
//!
//! Stateless JWT sessions: login produces an HS256 token that every protected
//! route validates. The token travels either in the `Authorization: Bearer`
//! header or the `auth_token` cookie (header wins).

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::User;

/// JWT claims issued at login
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: Uuid,
    /// Login email, informational
    pub email: String,
    /// Issued-at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
}

/// Outcome of a successful request authentication
#[derive(Debug, Clone)]
pub struct AuthResult {
    /// Authenticated user id
    pub user_id: Uuid,
    /// Email from the token claims
    pub email: String,
}

/// Token issue and validation
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry_hours: i64,
}

impl AuthManager {
    /// Create a manager from the shared signing secret
    #[must_use]
    pub fn new(secret: &str, token_expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_expiry_hours,
        }
    }

    /// Issue a token for a user
    ///
    /// # Errors
    ///
    /// Returns an internal error if JWT encoding fails.
    pub fn generate_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.token_expiry_hours)).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign token: {e}")))
    }

    /// Validate a raw token string and return its claims
    ///
    /// # Errors
    ///
    /// Returns an authentication error for expired, malformed, or forged tokens.
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| AppError::auth_invalid(format!("Invalid token: {e}")))
    }

    /// Authenticate an `Authorization` header value (or cookie-derived equivalent)
    ///
    /// # Errors
    ///
    /// Returns an authentication error when the value is absent, not a bearer
    /// scheme, or carries an invalid token.
    pub fn authenticate_request(&self, auth_value: Option<&str>) -> AppResult<AuthResult> {
        let value = auth_value.ok_or_else(|| AppError::auth_required("Missing credentials"))?;
        let token = value
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::auth_invalid("Expected bearer token"))?;
        let claims = self.validate_token(token)?;
        Ok(AuthResult {
            user_id: claims.sub,
            email: claims.email,
        })
    }

    /// Token lifetime in seconds, for cookie Max-Age
    #[must_use]
    pub const fn token_lifetime_secs(&self) -> i64 {
        self.token_expiry_hours * 3600
    }
}

/// Hash a password for storage
///
/// # Errors
///
/// Returns an internal error if bcrypt fails.
pub fn hash_password(password: &str) -> AppResult<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))
}

/// Verify a password against a stored hash
///
/// # Errors
///
/// Returns an internal error if the stored hash is malformed.
pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    bcrypt::verify(password, hash)
        .map_err(|e| AppError::internal(format!("Failed to verify password: {e}")))
}
