// ABOUTME: Weight entry storage: upsert keyed on (user_id, recorded_at)
// ABOUTME: Concurrent same-day writes resolve last-write-wins through the upsert
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 CalTrack

use chrono::NaiveDate;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::{parse_date, parse_uuid};
use crate::errors::{AppError, AppResult};
use crate::models::WeightEntry;

/// Weight entry database operations
pub struct WeightManager {
    pool: SqlitePool,
}

impl WeightManager {
    /// Create a new weight manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert or update the measurement for a date
    ///
    /// # Errors
    ///
    /// Returns a database error on storage failure.
    pub async fn upsert(
        &self,
        user_id: Uuid,
        recorded_at: NaiveDate,
        weight_kg: f64,
    ) -> AppResult<WeightEntry> {
        let row = sqlx::query(
            r"
            INSERT INTO weights (id, user_id, recorded_at, weight_kg)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, recorded_at)
            DO UPDATE SET weight_kg = EXCLUDED.weight_kg
            RETURNING id
            ",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(user_id.to_string())
        .bind(recorded_at.to_string())
        .bind(weight_kg)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to upsert weight entry: {e}")))?;

        Ok(WeightEntry {
            id: parse_uuid(&row.get::<String, _>("id"))?,
            user_id,
            recorded_at,
            weight_kg,
        })
    }

    /// List entries, optionally bounded by an inclusive date range, newest first
    ///
    /// # Errors
    ///
    /// Returns a database error on storage failure.
    pub async fn list(
        &self,
        user_id: Uuid,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> AppResult<Vec<WeightEntry>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, recorded_at, weight_kg
            FROM weights
            WHERE user_id = $1
              AND ($2 IS NULL OR recorded_at >= $2)
              AND ($3 IS NULL OR recorded_at <= $3)
            ORDER BY recorded_at DESC
            ",
        )
        .bind(user_id.to_string())
        .bind(from.map(|d| d.to_string()))
        .bind(to.map(|d| d.to_string()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list weight entries: {e}")))?;

        rows.into_iter()
            .map(|row| {
                Ok(WeightEntry {
                    id: parse_uuid(&row.get::<String, _>("id"))?,
                    user_id: parse_uuid(&row.get::<String, _>("user_id"))?,
                    recorded_at: parse_date(&row.get::<String, _>("recorded_at"))?,
                    weight_kg: row.get("weight_kg"),
                })
            })
            .collect()
    }

    /// The most recent measurement, if any
    ///
    /// # Errors
    ///
    /// Returns a database error on storage failure.
    pub async fn latest(&self, user_id: Uuid) -> AppResult<Option<WeightEntry>> {
        Ok(self.list(user_id, None, None).await?.into_iter().next())
    }

    /// Delete an entry owned by the user
    ///
    /// # Errors
    ///
    /// Returns a database error on storage failure.
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM weights WHERE id = $1 AND user_id = $2")
            .bind(id.to_string())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete weight entry: {e}")))?;
        Ok(result.rows_affected() > 0)
    }
}
