// ABOUTME: Core database management with embedded migrations for SQLite
// ABOUTME: One manager struct per entity over a shared connection pool
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 CalTrack

//! Persistence layer
//!
//! A single `SQLite` pool shared by per-entity managers. Every query is scoped
//! by the authenticated user id; managers are stateless and cheap to construct
//! per request.

/// Activity log CRUD
pub mod activity_logs;
/// Meal log CRUD
pub mod meal_logs;
/// Meal template CRUD
pub mod meal_templates;
/// Notification log insert/list/mark-read/soft-delete
pub mod notifications;
/// Profile upsert and fetch
pub mod profiles;
/// Push subscription upsert
pub mod push_subscriptions;
/// User account create/lookup
pub mod users;
/// Weight entry upsert/list/delete
pub mod weights;

pub use activity_logs::ActivityLogManager;
pub use meal_logs::MealLogManager;
pub use meal_templates::MealTemplateManager;
pub use notifications::NotificationManager;
pub use profiles::ProfileManager;
pub use push_subscriptions::PushSubscriptionManager;
pub use users::UserManager;
pub use weights::WeightManager;

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite, SqlitePool};
use tracing::info;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Database connection pool wrapper
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run pending migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the connection fails, or a
    /// migration fails.
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let pool = if database_url.contains(":memory:") {
            // In-memory databases exist per connection; pin the pool to one
            // connection that never idles out so state survives across queries
            SqlitePoolOptions::new()
                .min_connections(1)
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect(database_url)
                .await
        } else {
            // Ensure SQLite creates the database file if it doesn't exist
            let with_create = if database_url.starts_with("sqlite:") {
                format!("{database_url}?mode=rwc")
            } else {
                database_url.to_owned()
            };
            SqlitePool::connect(&with_create).await
        }
        .map_err(|e| AppError::database(format!("Failed to connect to database: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Run pending migrations embedded at compile time from ./migrations
    async fn migrate(&self) -> AppResult<()> {
        info!("Running database migrations...");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Database migration failed: {e}")))?;
        Ok(())
    }

    /// Get a reference to the pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// User account manager
    #[must_use]
    pub fn users(&self) -> UserManager {
        UserManager::new(self.pool.clone())
    }

    /// Profile manager
    #[must_use]
    pub fn profiles(&self) -> ProfileManager {
        ProfileManager::new(self.pool.clone())
    }

    /// Weight entry manager
    #[must_use]
    pub fn weights(&self) -> WeightManager {
        WeightManager::new(self.pool.clone())
    }

    /// Meal log manager
    #[must_use]
    pub fn meal_logs(&self) -> MealLogManager {
        MealLogManager::new(self.pool.clone())
    }

    /// Meal template manager
    #[must_use]
    pub fn meal_templates(&self) -> MealTemplateManager {
        MealTemplateManager::new(self.pool.clone())
    }

    /// Activity log manager
    #[must_use]
    pub fn activity_logs(&self) -> ActivityLogManager {
        ActivityLogManager::new(self.pool.clone())
    }

    /// Push subscription manager
    #[must_use]
    pub fn push_subscriptions(&self) -> PushSubscriptionManager {
        PushSubscriptionManager::new(self.pool.clone())
    }

    /// Notification manager
    #[must_use]
    pub fn notifications(&self) -> NotificationManager {
        NotificationManager::new(self.pool.clone())
    }
}

// Column parsing helpers shared by the managers. SQLite stores UUIDs, dates,
// and timestamps as TEXT; a malformed stored value is a database error, not a
// panic.

pub(crate) fn parse_uuid(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|e| AppError::database(format!("Invalid stored UUID '{raw}': {e}")))
}

pub(crate) fn parse_date(raw: &str) -> AppResult<NaiveDate> {
    raw.parse::<NaiveDate>()
        .map_err(|e| AppError::database(format!("Invalid stored date '{raw}': {e}")))
}

pub(crate) fn parse_timestamp(raw: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::database(format!("Invalid stored timestamp '{raw}': {e}")))
}

pub(crate) fn parse_opt_timestamp(raw: Option<String>) -> AppResult<Option<DateTime<Utc>>> {
    raw.map(|r| parse_timestamp(&r)).transpose()
}
