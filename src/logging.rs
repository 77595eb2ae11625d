// ABOUTME: Production logging setup with env-filter controlled verbosity
// ABOUTME: Supports human-readable fmt output and optional JSON structured output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 CalTrack

//! Logging initialization
//!
//! Verbosity is controlled through `RUST_LOG` (default `info`). Setting
//! `LOG_FORMAT=json` switches to structured JSON output for log shippers.

use std::env;

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber
///
/// Safe to call once per process; a second call is a no-op because the global
/// default is already installed.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json_output = env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    if json_output {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .try_init();
    } else {
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    }
}
