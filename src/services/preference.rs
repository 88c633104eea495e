// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity source preference lookup.

use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::models::settings::PREFERRED_ACTIVITY_SOURCE;
use crate::models::Source;

/// Read the preferred activity source out of a preferences document.
///
/// Anything other than one of the four known names (missing key, wrong type,
/// unknown string, or a non-object document) is treated as `auto`.
pub fn preference_from_settings(preferences: &serde_json::Value) -> Source {
    preferences
        .get(PREFERRED_ACTIVITY_SOURCE)
        .and_then(|v| v.as_str())
        .and_then(|s| s.parse().ok())
        .unwrap_or_default()
}

/// Read a user's preferred activity source, surfacing storage errors.
///
/// A missing settings document is not an error and resolves to `auto`.
pub async fn load_preference(db: &FirestoreDb, user_id: &str) -> Result<Source, AppError> {
    Ok(db
        .get_user_settings(user_id)
        .await?
        .map(|settings| preference_from_settings(&settings.preferences))
        .unwrap_or_default())
}

/// Look up a user's preferred activity source.
///
/// Never fails: missing settings and read errors both resolve to `auto` so
/// that an import pipeline always has a preference to work with.
pub async fn user_activity_preference(db: &FirestoreDb, user_id: &str) -> Source {
    match load_preference(db, user_id).await {
        Ok(source) => source,
        Err(e) => {
            tracing::warn!(
                user_id,
                error = %e,
                "Failed to read activity source preference, defaulting to auto"
            );
            Source::Auto
        }
    }
}
