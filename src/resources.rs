// ABOUTME: Shared server resources for dependency injection into route handlers
// ABOUTME: Constructed once at startup and handed to every router as Arc state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 CalTrack

//! Server resources
//!
//! Everything a handler needs, built once: database pool, auth manager, push
//! client, and the loaded configuration. The push client is `None` when the
//! `OneSignal` credentials are unset; the send route reports a configuration
//! error in that case.

use std::sync::Arc;

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database::Database;
use crate::external::OneSignalClient;

/// Shared state for all route handlers
pub struct ServerResources {
    /// Persistence layer
    pub database: Database,
    /// JWT issue/validation
    pub auth_manager: AuthManager,
    /// Push delivery client, present only with provider credentials
    pub push_client: Option<OneSignalClient>,
    /// Loaded configuration
    pub config: ServerConfig,
}

impl ServerResources {
    /// Assemble resources from a connected database and loaded configuration
    #[must_use]
    pub fn new(database: Database, config: ServerConfig) -> Arc<Self> {
        let auth_manager = AuthManager::new(&config.jwt_secret, config.token_expiry_hours);
        let push_client = config.onesignal.clone().map(OneSignalClient::new);
        Arc::new(Self {
            database,
            auth_manager,
            push_client,
            config,
        })
    }
}
