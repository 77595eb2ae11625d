// ABOUTME: Pure derivation functions over persisted logs: weight trend, calorie budget, MET energy
// ABOUTME: No side effects; every displayed total is computed fresh from the current log set
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 CalTrack

//! Derived metrics
//!
//! The aggregation layer of the tracker. Nothing here touches storage; handlers
//! load the day's logs and hand them to these functions at render time.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::WeightEntry;

/// Energy equivalent of one kilogram of body weight
pub const KCAL_PER_KG: f64 = 7700.0;

/// Fallback body weight for energy estimates when the user never logged one
pub const DEFAULT_WEIGHT_KG: f64 = 70.0;

/// A dated weight measurement, the minimal input to the trend calculator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightSample {
    /// Measurement date
    pub recorded_at: NaiveDate,
    /// Weight in kilograms
    pub weight_kg: f64,
}

impl From<&WeightEntry> for WeightSample {
    fn from(entry: &WeightEntry) -> Self {
        Self {
            recorded_at: entry.recorded_at,
            weight_kg: entry.weight_kg,
        }
    }
}

/// Change in weight over the trailing 7 days relative to the most recent entry
///
/// Entries may arrive in any order. The comparison point is the first entry, in
/// descending date order, dated at or before `latest - 7 days`; when none is
/// that old the oldest entry is used, so a single entry compares against itself
/// and yields 0. Returns `None` for an empty collection or non-finite weights.
///
/// Tie-break among entries sharing a date is implementation-defined: the sort
/// is stable, so the first occurrence in incoming order wins.
#[must_use]
pub fn weight_delta_7d(samples: &[WeightSample]) -> Option<f64> {
    let mut sorted: Vec<WeightSample> = samples.to_vec();
    sorted.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));

    let latest = sorted.first()?;
    if !latest.weight_kg.is_finite() {
        return None;
    }

    let target = latest.recorded_at.checked_sub_days(Days::new(7))?;
    let compare = sorted
        .iter()
        .find(|s| s.recorded_at <= target)
        .or_else(|| sorted.last())?;

    if !compare.weight_kg.is_finite() {
        return None;
    }
    Some(latest.weight_kg - compare.weight_kg)
}

/// Derived daily calorie budget figures
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyCalorieSummary {
    /// Sum of meal calories (missing values count as 0)
    pub consumed: f64,
    /// Sum of activity burns (missing values count as 0)
    pub burned: f64,
    /// `consumed - burned`
    pub net: f64,
    /// `net - target`; absent when no objective is defined
    pub delta: Option<f64>,
    /// `target - net`; absent when no objective is defined
    pub remaining: Option<f64>,
    /// Net intake expressed as body-weight change at 7700 kcal per kg
    pub weight_equivalent_kg: f64,
    /// Gauge fill ratio, `net/target` clamped to [0, 1]; 0 without a target
    pub progress_ratio: f64,
    /// True only when a target exists and it has been exceeded
    pub over_budget: bool,
}

/// Aggregate one day's meal and activity logs against a calorie target
///
/// Pure and order-independent: shuffling either input changes nothing. A
/// missing or non-positive target means "no objective defined" - the gauge
/// ratio is 0 and no over/under-budget figures are produced.
#[must_use]
pub fn summarize_day(
    meal_calories: &[Option<f64>],
    activity_burns: &[Option<f64>],
    target: Option<f64>,
) -> DailyCalorieSummary {
    let consumed: f64 = meal_calories.iter().map(|c| c.unwrap_or(0.0)).sum();
    let burned: f64 = activity_burns.iter().map(|c| c.unwrap_or(0.0)).sum();
    let net = consumed - burned;

    let target = target.filter(|t| *t > 0.0);
    let delta = target.map(|t| net - t);
    let remaining = target.map(|t| t - net);
    let progress_ratio = target.map_or(0.0, |t| (net / t).clamp(0.0, 1.0));
    let over_budget = remaining.is_some_and(|r| r < 0.0);

    DailyCalorieSummary {
        consumed,
        burned,
        net,
        delta,
        remaining,
        weight_equivalent_kg: net / KCAL_PER_KG,
        progress_ratio,
        over_budget,
    }
}

/// Estimate calories burned from a MET factor, body weight, and duration
///
/// Standard MET conversion scaled per minute: `met * 3.5 * weight / 200 * minutes`.
/// Returns 0 when any input is non-finite or not strictly positive; never
/// negative, never panics.
#[must_use]
pub fn estimate_activity_calories(met: f64, weight_kg: f64, minutes: f64) -> f64 {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if !valid(met) || !valid(weight_kg) || !valid(minutes) {
        return 0.0;
    }
    met * 3.5 * weight_kg / 200.0 * minutes
}

/// MET factor for a known activity type, matched case-insensitively
#[must_use]
pub fn met_for_activity(activity_type: &str) -> Option<f64> {
    let met = match activity_type.to_lowercase().as_str() {
        "walking" => 3.5,
        "running" => 8.0,
        "cycling" => 6.8,
        "swimming" => 7.0,
        "hiking" => 5.3,
        "strength" | "weights" => 3.5,
        "yoga" => 2.5,
        _ => return None,
    };
    Some(met)
}
