// ABOUTME: User account storage: registration insert and credential lookup
// ABOUTME: Emails are unique; password hashes are opaque bcrypt strings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 CalTrack

use chrono::Utc;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::{parse_timestamp, parse_uuid};
use crate::errors::{AppError, AppResult};
use crate::models::User;

/// User account database operations
pub struct UserManager {
    pool: SqlitePool,
}

impl UserManager {
    /// Create a new user manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new account
    ///
    /// # Errors
    ///
    /// Returns a validation error when the email is already registered, or a
    /// database error on storage failure.
    pub async fn create(
        &self,
        email: &str,
        password_hash: &str,
        display_name: Option<&str>,
    ) -> AppResult<User> {
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_owned(),
            password_hash: password_hash.to_owned(),
            display_name: display_name.map(str::to_owned),
            created_at: Utc::now(),
        };

        sqlx::query(
            r"
            INSERT INTO users (id, email, password_hash, display_name, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.display_name)
        .bind(user.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::invalid_input("Email is already registered")
            }
            _ => AppError::database(format!("Failed to create user: {e}")),
        })?;

        Ok(user)
    }

    /// Look up an account by email
    ///
    /// # Errors
    ///
    /// Returns a database error on storage failure.
    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let row = sqlx::query(
            r"
            SELECT id, email, password_hash, display_name, created_at
            FROM users WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to query user: {e}")))?;

        row.map(row_to_user).transpose()
    }

    /// Look up an account by id
    ///
    /// # Errors
    ///
    /// Returns a database error on storage failure.
    pub async fn get_by_id(&self, user_id: Uuid) -> AppResult<Option<User>> {
        let row = sqlx::query(
            r"
            SELECT id, email, password_hash, display_name, created_at
            FROM users WHERE id = $1
            ",
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to query user: {e}")))?;

        row.map(row_to_user).transpose()
    }
}

fn row_to_user(row: sqlx::sqlite::SqliteRow) -> AppResult<User> {
    Ok(User {
        id: parse_uuid(&row.get::<String, _>("id"))?,
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        display_name: row.get("display_name"),
        created_at: parse_timestamp(&row.get::<String, _>("created_at"))?,
    })
}
