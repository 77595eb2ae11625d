// ABOUTME: Meal log storage: per-day CRUD for logged meals
// ABOUTME: Calories are nullable; aggregation treats missing values as zero
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 CalTrack

use chrono::{NaiveDate, Utc};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::{parse_date, parse_timestamp, parse_uuid};
use crate::errors::{AppError, AppResult};
use crate::models::{MealLog, MealType};

/// Fields accepted when creating or updating a meal log
#[derive(Debug, Clone)]
pub struct WriteMealLogRequest {
    /// Day the meal belongs to
    pub recorded_at: NaiveDate,
    /// Meal slot
    pub meal_type: MealType,
    /// Optional free-form name
    pub name: Option<String>,
    /// Calories consumed
    pub calories: Option<f64>,
    /// Template this log was created from
    pub template_id: Option<Uuid>,
}

/// Meal log database operations
pub struct MealLogManager {
    pool: SqlitePool,
}

impl MealLogManager {
    /// Create a new meal log manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new meal log
    ///
    /// # Errors
    ///
    /// Returns a database error on storage failure.
    pub async fn create(&self, user_id: Uuid, request: &WriteMealLogRequest) -> AppResult<MealLog> {
        let log = MealLog {
            id: Uuid::new_v4(),
            user_id,
            recorded_at: request.recorded_at,
            meal_type: request.meal_type,
            name: request.name.clone(),
            calories: request.calories,
            template_id: request.template_id,
            created_at: Utc::now(),
        };

        sqlx::query(
            r"
            INSERT INTO meal_logs (id, user_id, recorded_at, meal_type, name, calories, template_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(log.id.to_string())
        .bind(user_id.to_string())
        .bind(log.recorded_at.to_string())
        .bind(log.meal_type.as_str())
        .bind(&log.name)
        .bind(log.calories)
        .bind(log.template_id.map(|id| id.to_string()))
        .bind(log.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create meal log: {e}")))?;

        Ok(log)
    }

    /// Replace the editable fields of a log owned by the user
    ///
    /// # Errors
    ///
    /// Returns a database error on storage failure.
    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        request: &WriteMealLogRequest,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE meal_logs
            SET recorded_at = $3, meal_type = $4, name = $5, calories = $6, template_id = $7
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(id.to_string())
        .bind(user_id.to_string())
        .bind(request.recorded_at.to_string())
        .bind(request.meal_type.as_str())
        .bind(&request.name)
        .bind(request.calories)
        .bind(request.template_id.map(|id| id.to_string()))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update meal log: {e}")))?;
        Ok(result.rows_affected() > 0)
    }

    /// List the user's logs for one day, in logging order
    ///
    /// # Errors
    ///
    /// Returns a database error on storage failure.
    pub async fn list_for_day(&self, user_id: Uuid, day: NaiveDate) -> AppResult<Vec<MealLog>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, recorded_at, meal_type, name, calories, template_id, created_at
            FROM meal_logs
            WHERE user_id = $1 AND recorded_at = $2
            ORDER BY created_at
            ",
        )
        .bind(user_id.to_string())
        .bind(day.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list meal logs: {e}")))?;

        rows.into_iter()
            .map(|row| {
                Ok(MealLog {
                    id: parse_uuid(&row.get::<String, _>("id"))?,
                    user_id: parse_uuid(&row.get::<String, _>("user_id"))?,
                    recorded_at: parse_date(&row.get::<String, _>("recorded_at"))?,
                    meal_type: MealType::parse(&row.get::<String, _>("meal_type")),
                    name: row.get("name"),
                    calories: row.get("calories"),
                    template_id: row
                        .get::<Option<String>, _>("template_id")
                        .map(|raw| parse_uuid(&raw))
                        .transpose()?,
                    created_at: parse_timestamp(&row.get::<String, _>("created_at"))?,
                })
            })
            .collect()
    }

    /// Delete a log owned by the user
    ///
    /// # Errors
    ///
    /// Returns a database error on storage failure.
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM meal_logs WHERE id = $1 AND user_id = $2")
            .bind(id.to_string())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete meal log: {e}")))?;
        Ok(result.rows_affected() > 0)
    }
}
