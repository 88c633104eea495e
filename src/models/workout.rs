// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout model for storage.

use serde::{Deserialize, Serialize};

/// A planned or completed training session, stored in Firestore.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workout {
    /// Workout ID (also used as document ID)
    pub id: String,
    /// Owning user ID
    pub user_id: String,
    #[serde(default)]
    pub title: Option<String>,
    /// Planned date (YYYY-MM-DD)
    #[serde(default)]
    pub scheduled_date: Option<String>,
    /// Actual distance in meters
    #[serde(default)]
    pub actual_distance: Option<f64>,
    /// Actual duration in seconds
    #[serde(default)]
    pub actual_duration: Option<u32>,
    /// Free-text notes from the athlete or coach
    #[serde(default)]
    pub notes: Option<String>,
    /// Structured metrics recorded alongside the actuals
    #[serde(default)]
    pub metrics: Option<WorkoutMetrics>,
    /// Last modification timestamp (ISO 8601)
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Workout {
    /// Whether some source has already written performance data.
    pub fn has_actuals(&self) -> bool {
        self.actual_distance.is_some() || self.actual_duration.is_some()
    }

    /// Overwrite actual performance data with an import.
    pub fn apply_actuals(&mut self, actuals: &WorkoutActuals, now: &str) {
        self.actual_distance = actuals.distance;
        self.actual_duration = actuals.duration;
        if actuals.metrics.is_some() {
            self.metrics = actuals.metrics.clone();
        }
        self.updated_at = Some(now.to_string());
    }
}

/// Performance data carried by an import.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutActuals {
    /// Distance in meters
    pub distance: Option<f64>,
    /// Duration in seconds
    pub duration: Option<u32>,
    #[serde(default)]
    pub metrics: Option<WorkoutMetrics>,
}

/// Optional per-workout metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutMetrics {
    #[serde(default)]
    pub avg_heart_rate: Option<u16>,
    #[serde(default)]
    pub max_heart_rate: Option<u16>,
    /// Elevation gain in meters
    #[serde(default)]
    pub elevation_gain: Option<f64>,
    /// Average cadence (steps or revolutions per minute)
    #[serde(default)]
    pub avg_cadence: Option<f64>,
    /// Rate of perceived exertion, 1-10
    #[serde(default)]
    pub perceived_effort: Option<u8>,
}
