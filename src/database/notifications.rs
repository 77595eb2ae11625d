// ABOUTME: Notification log storage: insert on send, mark-read, soft delete
// ABOUTME: Rows are never hard-deleted; deleted_at hides them from listings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 CalTrack

use chrono::Utc;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::{parse_opt_timestamp, parse_timestamp, parse_uuid};
use crate::errors::{AppError, AppResult};
use crate::models::Notification;

/// Fields recorded when a notification is sent
#[derive(Debug, Clone)]
pub struct InsertNotificationRequest {
    /// Heading shown to the user
    pub title: String,
    /// Body text
    pub body: String,
    /// Tap-through link
    pub url: Option<String>,
    /// Arbitrary JSON payload
    pub data: Option<serde_json::Value>,
    /// Delivery source tag (e.g. "onesignal")
    pub source: String,
}

/// Notification log database operations
pub struct NotificationManager {
    pool: SqlitePool,
}

impl NotificationManager {
    /// Create a new notification manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a sent notification
    ///
    /// # Errors
    ///
    /// Returns a database error on storage failure.
    pub async fn insert(
        &self,
        user_id: Uuid,
        request: &InsertNotificationRequest,
    ) -> AppResult<Notification> {
        let notification = Notification {
            id: Uuid::new_v4(),
            user_id,
            title: request.title.clone(),
            body: request.body.clone(),
            url: request.url.clone(),
            data: request.data.clone(),
            source: request.source.clone(),
            sent_at: Utc::now(),
            read_at: None,
            deleted_at: None,
        };

        let data_json = notification
            .data
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        sqlx::query(
            r"
            INSERT INTO notifications (id, user_id, title, body, url, data, source, sent_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(notification.id.to_string())
        .bind(user_id.to_string())
        .bind(&notification.title)
        .bind(&notification.body)
        .bind(&notification.url)
        .bind(data_json)
        .bind(&notification.source)
        .bind(notification.sent_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert notification: {e}")))?;

        Ok(notification)
    }

    /// List the user's non-deleted notifications, newest first
    ///
    /// # Errors
    ///
    /// Returns a database error on storage failure.
    pub async fn list(&self, user_id: Uuid) -> AppResult<Vec<Notification>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, title, body, url, data, source, sent_at, read_at, deleted_at
            FROM notifications
            WHERE user_id = $1 AND deleted_at IS NULL
            ORDER BY sent_at DESC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list notifications: {e}")))?;

        rows.into_iter()
            .map(|row| {
                let data = row
                    .get::<Option<String>, _>("data")
                    .map(|raw| serde_json::from_str(&raw))
                    .transpose()
                    .map_err(|e| AppError::database(format!("Invalid stored payload: {e}")))?;
                Ok(Notification {
                    id: parse_uuid(&row.get::<String, _>("id"))?,
                    user_id: parse_uuid(&row.get::<String, _>("user_id"))?,
                    title: row.get("title"),
                    body: row.get("body"),
                    url: row.get("url"),
                    data,
                    source: row.get("source"),
                    sent_at: parse_timestamp(&row.get::<String, _>("sent_at"))?,
                    read_at: parse_opt_timestamp(row.get("read_at"))?,
                    deleted_at: parse_opt_timestamp(row.get("deleted_at"))?,
                })
            })
            .collect()
    }

    /// Count rows regardless of deletion state (used by tests and diagnostics)
    ///
    /// # Errors
    ///
    /// Returns a database error on storage failure.
    pub async fn count_all(&self, user_id: Uuid) -> AppResult<u32> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM notifications WHERE user_id = $1")
            .bind(user_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count notifications: {e}")))?;
        Ok(row.get::<i64, _>("n") as u32)
    }

    /// Mark a notification as read
    ///
    /// # Errors
    ///
    /// Returns a database error on storage failure.
    pub async fn mark_read(&self, user_id: Uuid, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE notifications SET read_at = $3
            WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL
            ",
        )
        .bind(id.to_string())
        .bind(user_id.to_string())
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to mark notification read: {e}")))?;
        Ok(result.rows_affected() > 0)
    }

    /// Soft-delete a notification
    ///
    /// # Errors
    ///
    /// Returns a database error on storage failure.
    pub async fn soft_delete(&self, user_id: Uuid, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE notifications SET deleted_at = $3
            WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL
            ",
        )
        .bind(id.to_string())
        .bind(user_id.to_string())
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to delete notification: {e}")))?;
        Ok(result.rows_affected() > 0)
    }
}
