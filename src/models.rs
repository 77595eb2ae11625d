// ABOUTME: Common data models for users, logs, profile, and notifications
// ABOUTME: Records mirror the SQLite schema; enums parse leniently from client strings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 CalTrack

//! Domain models
//!
//! All per-user records carry a `user_id` and are only ever read or written
//! through managers scoped to the authenticated user.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registered user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user id
    pub id: Uuid,
    /// Login email, unique
    pub email: String,
    /// bcrypt password hash
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Optional display name
    pub display_name: Option<String>,
    /// Account creation time
    pub created_at: DateTime<Utc>,
}

/// User profile, one row per user, upserted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Owning user id (also the primary key)
    pub user_id: Uuid,
    /// Display name shown in the UI
    pub display_name: Option<String>,
    /// Biological sex, free-form text as entered
    pub sex: Option<String>,
    /// Birth year
    pub birth_year: Option<i32>,
    /// Height in centimeters
    pub height_cm: Option<f64>,
    /// Daily calorie target; `None` or 0 means no objective defined
    pub target_calories: Option<f64>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
}

/// Body weight measurement, unique per user and date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightEntry {
    /// Unique entry id
    pub id: Uuid,
    /// Owning user id
    pub user_id: Uuid,
    /// Measurement date; upsert key together with `user_id`
    pub recorded_at: NaiveDate,
    /// Weight in kilograms
    pub weight_kg: f64,
}

/// Meal slot classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    /// Morning meal
    Breakfast,
    /// Midday meal
    Lunch,
    /// Evening meal
    Dinner,
    /// Anything between meals
    #[default]
    Snack,
}

impl MealType {
    /// Parse a client string, falling back to `Snack` for unknown values
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "breakfast" => Self::Breakfast,
            "lunch" => Self::Lunch,
            "dinner" => Self::Dinner,
            _ => Self::Snack,
        }
    }

    /// Canonical lowercase form stored in the database
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snack => "snack",
        }
    }
}

/// A logged meal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealLog {
    /// Unique log id
    pub id: Uuid,
    /// Owning user id
    pub user_id: Uuid,
    /// Day the meal belongs to
    pub recorded_at: NaiveDate,
    /// Meal slot
    pub meal_type: MealType,
    /// Optional free-form name
    pub name: Option<String>,
    /// Calories consumed; `None` counts as 0 in aggregation
    pub calories: Option<f64>,
    /// Template this log was created from, if any
    pub template_id: Option<Uuid>,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// Reusable meal preset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealTemplate {
    /// Unique template id
    pub id: Uuid,
    /// Owning user id
    pub user_id: Uuid,
    /// Template name
    pub name: String,
    /// Calories per serving
    pub calories: f64,
    /// Protein grams
    pub protein_g: Option<f64>,
    /// Carbohydrate grams
    pub carbs_g: Option<f64>,
    /// Fat grams
    pub fat_g: Option<f64>,
}

/// A logged activity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLog {
    /// Unique log id
    pub id: Uuid,
    /// Owning user id
    pub user_id: Uuid,
    /// Day the activity belongs to
    pub recorded_at: NaiveDate,
    /// Free-form activity type (e.g. "running")
    pub activity_type: String,
    /// Duration in minutes
    pub duration_min: f64,
    /// Calories burned; `None` counts as 0 in aggregation
    pub calories_burned: Option<f64>,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// Push subscription registered with the `OneSignal` provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushSubscription {
    /// Owning user id
    pub user_id: Uuid,
    /// Subscription id assigned by the provider per device/browser
    pub onesignal_subscription_id: String,
    /// Client platform (e.g. "web", "ios")
    pub platform: String,
    /// Device classification, defaults to "web"
    pub device_type: String,
    /// Registering user agent
    pub user_agent: Option<String>,
    /// Opt-out flips this instead of deleting the row
    pub is_enabled: bool,
    /// Mirrors the user id for provider-side correlation
    pub external_user_id: String,
    /// Last registration/sync time
    pub updated_at: DateTime<Utc>,
}

/// A sent notification; rows are soft-deleted, never removed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Unique notification id
    pub id: Uuid,
    /// Owning user id
    pub user_id: Uuid,
    /// Heading shown to the user
    pub title: String,
    /// Body text
    pub body: String,
    /// Link opened on tap
    pub url: Option<String>,
    /// Arbitrary JSON payload attached at send time
    pub data: Option<serde_json::Value>,
    /// Delivery source tag (e.g. "onesignal")
    pub source: String,
    /// Send time
    pub sent_at: DateTime<Utc>,
    /// Set when the user opens the notification
    pub read_at: Option<DateTime<Utc>>,
    /// Soft-delete marker
    pub deleted_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meal_type_parses_known_slots() {
        assert_eq!(MealType::parse("breakfast"), MealType::Breakfast);
        assert_eq!(MealType::parse("LUNCH"), MealType::Lunch);
        assert_eq!(MealType::parse("dinner"), MealType::Dinner);
        assert_eq!(MealType::parse("snack"), MealType::Snack);
    }

    #[test]
    fn meal_type_falls_back_to_snack() {
        assert_eq!(MealType::parse("brunch"), MealType::Snack);
        assert_eq!(MealType::parse(""), MealType::Snack);
    }
}
