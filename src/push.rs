// ABOUTME: Push subscription registration validation and notification content defaults
// ABOUTME: Normalizes the loosely-typed browser payload into a canonical subscription record
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 CalTrack

//! Push registration pipeline
//!
//! The browser obtains a subscription id from the `OneSignal` SDK and posts it
//! here. The payload is loosely typed (the SDK has shipped booleans as strings
//! before), so validation trims, coerces, and defaults rather than rejecting.
//! The single hard rule: a subscription id and a platform must be present.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{AppError, AppResult};

/// Raw registration payload as posted by the client
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawSubscription {
    /// Provider-assigned subscription id
    pub subscription_id: Option<String>,
    /// Client platform ("web", "ios", ...)
    pub platform: Option<String>,
    /// Device classification
    pub device_type: Option<String>,
    /// Registering user agent
    pub user_agent: Option<String>,
    /// Loosely typed on purpose: anything non-boolean defaults to true
    pub is_enabled: Value,
}

/// Canonical, fully-populated registration payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscriptionPayload {
    /// Provider-assigned subscription id, trimmed, non-empty
    pub subscription_id: String,
    /// Client platform, trimmed, non-empty
    pub platform: String,
    /// Device classification; "web" when the client sent nothing
    pub device_type: String,
    /// Registering user agent; blank values collapse to `None`
    pub user_agent: Option<String>,
    /// Subscription enabled flag
    pub is_enabled: bool,
}

/// Validate and normalize a registration payload
///
/// All string fields are trimmed. `device_type` defaults to "web" when blank
/// and `is_enabled` to true when not a boolean. Fails only when the
/// subscription id or platform is empty after trimming.
///
/// # Errors
///
/// Returns a validation error with the message
/// `subscriptionId and platform are required`.
pub fn validate_registration(raw: &RawSubscription) -> AppResult<SubscriptionPayload> {
    let trim = |v: &Option<String>| v.as_deref().unwrap_or_default().trim().to_owned();

    let subscription_id = trim(&raw.subscription_id);
    let platform = trim(&raw.platform);
    if subscription_id.is_empty() || platform.is_empty() {
        return Err(AppError::invalid_input(
            "subscriptionId and platform are required",
        ));
    }

    let device_type = trim(&raw.device_type);
    let user_agent = trim(&raw.user_agent);

    Ok(SubscriptionPayload {
        subscription_id,
        platform,
        device_type: if device_type.is_empty() {
            "web".to_owned()
        } else {
            device_type
        },
        user_agent: (!user_agent.is_empty()).then_some(user_agent),
        is_enabled: raw.is_enabled.as_bool().unwrap_or(true),
    })
}

/// Optional overrides for the test notification
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendTestRequest {
    /// Heading override
    pub title: Option<String>,
    /// Body override
    pub body: Option<String>,
    /// Tap-through link override
    pub url: Option<String>,
}

/// Resolved notification content ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    /// Heading
    pub title: String,
    /// Body text
    pub body: String,
    /// Tap-through link
    pub url: String,
}

impl NotificationContent {
    /// Default test body (Korean-first app; English heading mirrors the title)
    pub const TEST_BODY: &'static str = "캘트랙 테스트 알림입니다.";

    /// Fill unset fields with the standard test-notification defaults
    ///
    /// Title defaults to the app name, body to the fixed test message, and the
    /// url to the in-app notification center under `base_url`.
    #[must_use]
    pub fn test_defaults(request: SendTestRequest, app_name: &str, base_url: &str) -> Self {
        Self {
            title: request.title.unwrap_or_else(|| app_name.to_owned()),
            body: request.body.unwrap_or_else(|| Self::TEST_BODY.to_owned()),
            url: request
                .url
                .unwrap_or_else(|| format!("{}/notifications", base_url.trim_end_matches('/'))),
        }
    }
}
