// ABOUTME: External API client module organization
// ABOUTME: Third-party collaborators live here behind injectable client structs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 CalTrack

/// `OneSignal` push delivery client
pub mod onesignal_client;

pub use onesignal_client::{OneSignalClient, PROVIDER_NAME};
