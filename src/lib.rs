// ABOUTME: Main library entry point for the CalTrack diet/fitness tracking API
// ABOUTME: Provides REST endpoints for meal, activity, and weight logs plus push notifications
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 CalTrack

#![deny(unsafe_code)]

//! # CalTrack Server
//!
//! A personal diet and fitness tracking API server. Users log meals, activities,
//! and body weight, view a daily calorie budget, manage a profile, and receive
//! push notifications through the OneSignal REST API.
//!
//! All displayed totals (daily calorie balance, 7-day weight delta, budget gauge)
//! are derived fresh from the persisted logs on every request; nothing aggregated
//! is ever stored.
//!
//! ## Architecture
//!
//! - **Database managers**: one manager struct per entity over a shared `SQLite` pool
//! - **Metrics**: pure derivation functions over log collections
//! - **Routes**: thin axum handlers that authenticate, delegate, and serialize
//! - **External**: `OneSignal` push delivery client
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use caltrack_server::config::environment::ServerConfig;
//! use caltrack_server::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("CalTrack server configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Authentication and session management
pub mod auth;

/// Configuration management (environment-only)
pub mod config;

/// SQLite persistence layer with per-entity managers
pub mod database;

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// External API clients (`OneSignal` push delivery)
pub mod external;

/// Production logging and structured output
pub mod logging;

/// Derived metrics: calorie aggregation, weight trend, activity energy
pub mod metrics;

/// Common data models for logs, profile, and notifications
pub mod models;

/// Push subscription registration and notification content defaults
pub mod push;

/// Shared server resources for dependency injection
pub mod resources;

/// `HTTP` routes organized by domain
pub mod routes;

/// Security helpers (auth cookies)
pub mod security;

/// Router assembly and serve loop
pub mod server;
