// ABOUTME: Push subscription storage: upsert keyed on (user_id, onesignal_subscription_id)
// ABOUTME: Registrations re-sync on every page load; opt-out flips is_enabled, no hard delete
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 CalTrack

use chrono::Utc;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::{parse_timestamp, parse_uuid};
use crate::errors::{AppError, AppResult};
use crate::models::PushSubscription;
use crate::push::SubscriptionPayload;

/// Push subscription database operations
pub struct PushSubscriptionManager {
    pool: SqlitePool,
}

impl PushSubscriptionManager {
    /// Create a new push subscription manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert or refresh a registration
    ///
    /// The external user id mirrors our user id so provider-side sends can be
    /// addressed by it.
    ///
    /// # Errors
    ///
    /// Returns a database error on storage failure.
    pub async fn upsert(
        &self,
        user_id: Uuid,
        payload: &SubscriptionPayload,
    ) -> AppResult<PushSubscription> {
        let subscription = PushSubscription {
            user_id,
            onesignal_subscription_id: payload.subscription_id.clone(),
            platform: payload.platform.clone(),
            device_type: payload.device_type.clone(),
            user_agent: payload.user_agent.clone(),
            is_enabled: payload.is_enabled,
            external_user_id: user_id.to_string(),
            updated_at: Utc::now(),
        };

        sqlx::query(
            r"
            INSERT INTO push_subscriptions
                (user_id, onesignal_subscription_id, platform, device_type, user_agent, is_enabled, external_user_id, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (user_id, onesignal_subscription_id)
            DO UPDATE SET
                platform = EXCLUDED.platform,
                device_type = EXCLUDED.device_type,
                user_agent = EXCLUDED.user_agent,
                is_enabled = EXCLUDED.is_enabled,
                external_user_id = EXCLUDED.external_user_id,
                updated_at = EXCLUDED.updated_at
            ",
        )
        .bind(user_id.to_string())
        .bind(&subscription.onesignal_subscription_id)
        .bind(&subscription.platform)
        .bind(&subscription.device_type)
        .bind(&subscription.user_agent)
        .bind(subscription.is_enabled)
        .bind(&subscription.external_user_id)
        .bind(subscription.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to upsert push subscription: {e}")))?;

        Ok(subscription)
    }

    /// List the user's registrations, newest first
    ///
    /// # Errors
    ///
    /// Returns a database error on storage failure.
    pub async fn list(&self, user_id: Uuid) -> AppResult<Vec<PushSubscription>> {
        let rows = sqlx::query(
            r"
            SELECT user_id, onesignal_subscription_id, platform, device_type, user_agent,
                   is_enabled, external_user_id, updated_at
            FROM push_subscriptions
            WHERE user_id = $1
            ORDER BY updated_at DESC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list push subscriptions: {e}")))?;

        rows.into_iter()
            .map(|row| {
                Ok(PushSubscription {
                    user_id: parse_uuid(&row.get::<String, _>("user_id"))?,
                    onesignal_subscription_id: row.get("onesignal_subscription_id"),
                    platform: row.get("platform"),
                    device_type: row.get("device_type"),
                    user_agent: row.get("user_agent"),
                    is_enabled: row.get("is_enabled"),
                    external_user_id: row.get("external_user_id"),
                    updated_at: parse_timestamp(&row.get::<String, _>("updated_at"))?,
                })
            })
            .collect()
    }
}
