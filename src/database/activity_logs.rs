// ABOUTME: Activity log storage: per-day CRUD for exercise entries
// ABOUTME: Burned calories are nullable; aggregation treats missing values as zero
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 CalTrack

use chrono::{NaiveDate, Utc};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::{parse_date, parse_timestamp, parse_uuid};
use crate::errors::{AppError, AppResult};
use crate::models::ActivityLog;

/// Fields accepted when creating or updating an activity log
#[derive(Debug, Clone)]
pub struct WriteActivityLogRequest {
    /// Day the activity belongs to
    pub recorded_at: NaiveDate,
    /// Free-form activity type
    pub activity_type: String,
    /// Duration in minutes
    pub duration_min: f64,
    /// Calories burned
    pub calories_burned: Option<f64>,
}

/// Activity log database operations
pub struct ActivityLogManager {
    pool: SqlitePool,
}

impl ActivityLogManager {
    /// Create a new activity log manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new activity log
    ///
    /// # Errors
    ///
    /// Returns a database error on storage failure.
    pub async fn create(
        &self,
        user_id: Uuid,
        request: &WriteActivityLogRequest,
    ) -> AppResult<ActivityLog> {
        let log = ActivityLog {
            id: Uuid::new_v4(),
            user_id,
            recorded_at: request.recorded_at,
            activity_type: request.activity_type.clone(),
            duration_min: request.duration_min,
            calories_burned: request.calories_burned,
            created_at: Utc::now(),
        };

        sqlx::query(
            r"
            INSERT INTO activity_logs (id, user_id, recorded_at, activity_type, duration_min, calories_burned, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(log.id.to_string())
        .bind(user_id.to_string())
        .bind(log.recorded_at.to_string())
        .bind(&log.activity_type)
        .bind(log.duration_min)
        .bind(log.calories_burned)
        .bind(log.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create activity log: {e}")))?;

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
        request: &WriteActivityLogRequest,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE activity_logs
            SET recorded_at = $3, activity_type = $4, duration_min = $5, calories_burned = $6
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(id.to_string())
        .bind(user_id.to_string())
        .bind(request.recorded_at.to_string())
        .bind(&request.activity_type)
        .bind(request.duration_min)
        .bind(request.calories_burned)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update activity log: {e}")))?;
        Ok(result.rows_affected() > 0)
    }

    /// List the user's logs for one day, in logging order
    ///
    /// # Errors
    ///
    /// Returns a database error on storage failure.
    pub async fn list_for_day(&self, user_id: Uuid, day: NaiveDate) -> AppResult<Vec<ActivityLog>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, recorded_at, activity_type, duration_min, calories_burned, created_at
            FROM activity_logs
            WHERE user_id = $1 AND recorded_at = $2
            ORDER BY created_at
            ",
        )
        .bind(user_id.to_string())
        .bind(day.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list activity logs: {e}")))?;

        rows.into_iter()
            .map(|row| {
                Ok(ActivityLog {
                    id: parse_uuid(&row.get::<String, _>("id"))?,
                    user_id: parse_uuid(&row.get::<String, _>("user_id"))?,
                    recorded_at: parse_date(&row.get::<String, _>("recorded_at"))?,
                    activity_type: row.get("activity_type"),
                    duration_min: row.get("duration_min"),
                    calories_burned: row.get("calories_burned"),
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
        let result = sqlx::query("DELETE FROM activity_logs WHERE id = $1 AND user_id = $2")
            .bind(id.to_string())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete activity log: {e}")))?;
        Ok(result.rows_affected() > 0)
    }
}
