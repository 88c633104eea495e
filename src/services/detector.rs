// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Detection of which source currently owns a workout's actual data.
//!
//! Ownership is decided in this order:
//! 1. A `synced` record from a provider, in `Provider::PRECEDENCE` order
//! 2. Actual distance or duration with no synced record (manual entry)
//! 3. Nothing (the workout has no actual data yet)
//!
//! Sync records win over the workout's own fields because they prove where
//! the data came from; actuals alone may be left over from a failed sync.

use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::models::{Provider, Source, SyncRecord, Workout};

/// Decide the owning source from already-loaded records.
///
/// Records for other workouts are ignored.
pub fn detect_source(
    workout_id: &str,
    records: &[SyncRecord],
    workout: Option<&Workout>,
) -> Option<Source> {
    let synced_provider = Provider::PRECEDENCE.into_iter().find(|provider| {
        records
            .iter()
            .any(|r| r.workout_id == workout_id && r.provider == *provider && r.is_synced())
    });

    if let Some(provider) = synced_provider {
        return Some(provider.into());
    }

    workout
        .filter(|w| w.has_actuals())
        .map(|_| Source::Manual)
}

/// Look up which source owns a workout's actual data.
///
/// Returns `None` both for workouts without data and when the lookup fails;
/// a failed lookup is logged rather than surfaced.
pub async fn workout_activity_source(db: &FirestoreDb, workout_id: &str) -> Option<Source> {
    match load_and_detect(db, workout_id).await {
        Ok(source) => source,
        Err(e) => {
            tracing::warn!(
                workout_id,
                error = %e,
                "Failed to detect workout activity source, treating as no source"
            );
            None
        }
    }
}

/// Look up which source owns a workout's data, surfacing storage errors.
pub async fn load_and_detect(
    db: &FirestoreDb,
    workout_id: &str,
) -> Result<Option<Source>, AppError> {
    let records = db.get_sync_records_for_workout(workout_id).await?;

    // Only read the workout when no provider claims it
    if let Some(source) = detect_source(workout_id, &records, None) {
        return Ok(Some(source));
    }

    let workout = db.get_workout(workout_id).await?;
    Ok(detect_source(workout_id, &records, workout.as_ref()))
}
