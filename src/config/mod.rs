// ABOUTME: Configuration module organization for the CalTrack server
// ABOUTME: Environment-only configuration; no config files are read
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 CalTrack

/// Environment-backed server configuration
pub mod environment;

pub use environment::{OneSignalConfig, ServerConfig};
