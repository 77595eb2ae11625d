// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides database, resource, and user creation helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 CalTrack

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]
#![allow(dead_code, clippy::missing_errors_doc, clippy::must_use_candidate)]

//! Shared test utilities for `caltrack_server`
//!
//! Common setup to reduce duplication across the integration tests. Every test
//! gets a fresh in-memory database with migrations applied.

use std::sync::{Arc, Once};

use anyhow::Result;
use caltrack_server::auth::hash_password;
use caltrack_server::config::{OneSignalConfig, ServerConfig};
use caltrack_server::database::Database;
use caltrack_server::models::User;
use caltrack_server::resources::ServerResources;
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize test logging once per process
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("warn")
            .try_init();
    });
}

/// Configuration used by every test, push credentials unset
pub fn test_config() -> ServerConfig {
    ServerConfig {
        http_port: 0,
        database_url: "sqlite::memory:".to_owned(),
        jwt_secret: "integration-test-secret".to_owned(),
        token_expiry_hours: 24,
        base_url: "http://localhost:3000".to_owned(),
        app_name: "CalTrack".to_owned(),
        onesignal: None,
    }
}

/// Fresh in-memory database with migrations applied
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Ok(Database::new("sqlite::memory:").await?)
}

/// Server resources over a fresh in-memory database, push unconfigured
pub async fn create_test_resources() -> Result<Arc<ServerResources>> {
    let database = create_test_database().await?;
    Ok(ServerResources::new(database, test_config()))
}

/// Server resources with a push client pointed at `provider_base_url`
pub async fn create_test_resources_with_push(
    provider_base_url: &str,
) -> Result<Arc<ServerResources>> {
    let database = create_test_database().await?;
    let mut config = test_config();
    config.onesignal = Some(OneSignalConfig {
        app_id: "test-app-id".to_owned(),
        api_key: "test-api-key".to_owned(),
        base_url: provider_base_url.to_owned(),
    });
    Ok(ServerResources::new(database, config))
}

/// Create a user with a unique email and return it
pub async fn create_test_user(database: &Database) -> Result<(Uuid, User)> {
    let email = format!("user-{}@example.com", Uuid::new_v4());
    create_test_user_with_email(database, &email).await
}

/// Create a user with a specific email
pub async fn create_test_user_with_email(
    database: &Database,
    email: &str,
) -> Result<(Uuid, User)> {
    let password_hash = hash_password("integration-pass-1")?;
    let user = database
        .users()
        .create(email, &password_hash, Some("Test User"))
        .await?;
    Ok((user.id, user))
}

/// Authenticated setup: resources, a user, and their bearer header value
pub async fn create_authenticated_setup() -> Result<(Arc<ServerResources>, Uuid, String)> {
    let resources = create_test_resources().await?;
    let (user_id, user) = create_test_user(&resources.database).await?;
    let token = resources.auth_manager.generate_token(&user)?;
    Ok((resources, user_id, format!("Bearer {token}")))
}
