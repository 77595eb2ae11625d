// ABOUTME: Profile storage: one row per user, written with an upsert
// ABOUTME: The calorie target lives here and drives the daily budget gauge
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 CalTrack

use chrono::Utc;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::{parse_timestamp, parse_uuid};
use crate::errors::{AppError, AppResult};
use crate::models::Profile;

/// Fields accepted by a profile upsert
#[derive(Debug, Clone, Default)]
pub struct UpsertProfileRequest {
    /// Display name shown in the UI
    pub display_name: Option<String>,
    /// Biological sex, free-form
    pub sex: Option<String>,
    /// Birth year
    pub birth_year: Option<i32>,
    /// Height in centimeters
    pub height_cm: Option<f64>,
    /// Daily calorie target
    pub target_calories: Option<f64>,
}

/// Profile database operations
pub struct ProfileManager {
    pool: SqlitePool,
}

impl ProfileManager {
    /// Create a new profile manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert or replace the user's profile
    ///
    /// # Errors
    ///
    /// Returns a database error on storage failure.
    pub async fn upsert(&self, user_id: Uuid, request: &UpsertProfileRequest) -> AppResult<Profile> {
        let now = Utc::now();
        sqlx::query(
            r"
            INSERT INTO profiles (user_id, display_name, sex, birth_year, height_cm, target_calories, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (user_id)
            DO UPDATE SET
                display_name = EXCLUDED.display_name,
                sex = EXCLUDED.sex,
                birth_year = EXCLUDED.birth_year,
                height_cm = EXCLUDED.height_cm,
                target_calories = EXCLUDED.target_calories,
                updated_at = EXCLUDED.updated_at
            ",
        )
        .bind(user_id.to_string())
        .bind(&request.display_name)
        .bind(&request.sex)
        .bind(request.birth_year)
        .bind(request.height_cm)
        .bind(request.target_calories)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to upsert profile: {e}")))?;

        Ok(Profile {
            user_id,
            display_name: request.display_name.clone(),
            sex: request.sex.clone(),
            birth_year: request.birth_year,
            height_cm: request.height_cm,
            target_calories: request.target_calories,
            updated_at: now,
        })
    }

    /// Fetch the user's profile, if one exists
    ///
    /// # Errors
    ///
    /// Returns a database error on storage failure.
    pub async fn get(&self, user_id: Uuid) -> AppResult<Option<Profile>> {
        let row = sqlx::query(
            r"
            SELECT user_id, display_name, sex, birth_year, height_cm, target_calories, updated_at
            FROM profiles WHERE user_id = $1
            ",
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to query profile: {e}")))?;

        row.map(|row| {
            Ok(Profile {
                user_id: parse_uuid(&row.get::<String, _>("user_id"))?,
                display_name: row.get("display_name"),
                sex: row.get("sex"),
                birth_year: row.get("birth_year"),
                height_cm: row.get("height_cm"),
                target_calories: row.get("target_calories"),
                updated_at: parse_timestamp(&row.get::<String, _>("updated_at"))?,
            })
        })
        .transpose()
    }

    /// The user's daily calorie target, when a profile defines one
    ///
    /// # Errors
    ///
    /// Returns a database error on storage failure.
    pub async fn target_calories(&self, user_id: Uuid) -> AppResult<Option<f64>> {
        Ok(self.get(user_id).await?.and_then(|p| p.target_calories))
    }
}
