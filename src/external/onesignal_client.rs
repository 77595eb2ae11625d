// ABOUTME: OneSignal REST API client for push notification delivery
// ABOUTME: Single-attempt sends addressed by external user id; provider errors pass through verbatim
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 CalTrack

//! `OneSignal` API client
//!
//! Delivers push notifications through the `OneSignal` REST API, addressing
//! devices by the external user id that subscription registration mirrors from
//! our user id. Sends are a single attempt; a failure surfaces to the caller
//! and is never retried.
//!
//! # API Reference
//! `OneSignal` create-notification API: <https://documentation.onesignal.com/reference/create-notification>

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::config::OneSignalConfig;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::push::NotificationContent;

/// Source tag written to the notification log for provider-delivered sends
pub const PROVIDER_NAME: &str = "onesignal";

/// Provider error body shape: either a string `error` or an `errors` array
#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    error: Option<String>,
    errors: Option<Vec<String>>,
}

impl ProviderErrorBody {
    /// Best human-readable message the body offers
    fn message(self) -> Option<String> {
        if let Some(error) = self.error.filter(|e| !e.is_empty()) {
            return Some(error);
        }
        self.errors
            .filter(|errs| !errs.is_empty())
            .map(|errs| errs.join(", "))
    }
}

/// `OneSignal` REST API client
pub struct OneSignalClient {
    config: OneSignalConfig,
    http_client: Client,
}

impl OneSignalClient {
    /// Create a new client from provider credentials
    #[must_use]
    pub fn new(config: OneSignalConfig) -> Self {
        Self {
            config,
            http_client: Client::new(),
        }
    }

    /// Send a notification to every device registered under an external user id
    ///
    /// Headings and contents are sent bilingually (en + ko) with the same text,
    /// matching what the web client displays.
    ///
    /// # Errors
    ///
    /// Returns an external-service error when the request cannot be sent, or
    /// when the provider answers non-2xx; in the latter case the message is the
    /// provider's own error text, passed through verbatim.
    pub async fn send_to_user(
        &self,
        external_user_id: &str,
        content: &NotificationContent,
    ) -> AppResult<()> {
        let url = format!("{}/notifications", self.config.base_url);
        let body = json!({
            "app_id": self.config.app_id,
            "include_external_user_ids": [external_user_id],
            "headings": { "en": content.title, "ko": content.title },
            "contents": { "en": content.body, "ko": content.body },
            "url": content.url,
        });

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", format!("Basic {}", self.config.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::external_service("OneSignal", e.to_string()))?;

        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status();
        let message = response
            .json::<ProviderErrorBody>()
            .await
            .ok()
            .and_then(ProviderErrorBody::message)
            .unwrap_or_else(|| format!("Notification send failed with HTTP {status}"));

        // Verbatim pass-through of the provider message, no service prefix
        Err(AppError::new(ErrorCode::ExternalServiceError, message))
    }
}
