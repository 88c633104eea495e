// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Import admission: may a provider write actual data to a workout?
//!
//! The verdict is computed fresh from storage on every call. Reads that fail
//! degrade to "auto preference" and "no existing source", so a storage blip
//! never wedges an import; a block is returned as data, never as an error.
//!
//! Writes are stricter: `apply_import` re-reads preference and ownership
//! without degrading, and a failed read aborts the import instead of
//! admitting it on a guessed verdict.
//!
//! Admission is a snapshot check. Two providers importing into the same
//! workout at the same instant can both be admitted, so callers are expected
//! to run provider syncs for a user one at a time.

use crate::db::FirestoreDb;
use crate::error::{AppError, Result};
use crate::models::{
    DecisionReason, ImportDecision, Provider, Source, SyncRecord, SyncStatus, WorkoutActuals,
};
use crate::services::{detector, preference};
use chrono::{SecondsFormat, Utc};
use futures_util::{stream, StreamExt};
use std::future::Future;

/// The workout an import wants to write to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportTarget {
    /// The import would create a new workout
    NewWorkout,
    /// The import would write into an existing workout currently owned by this source
    ExistingWorkout(Option<Source>),
}

/// Decide whether an import may proceed.
///
/// Rules are checked in order and the first match wins:
/// 1. A manual-only preference blocks every import.
/// 2. New workouts follow the preference (`auto` accepts any provider).
/// 3. Workouts with no data, or data from the same provider, accept the import.
/// 4. Under `auto` the first source to write keeps the workout.
/// 5. An explicit preference for the importer overrides the existing source.
/// 6. Anything else is blocked.
pub fn decide(preference: Source, target: ImportTarget, import_source: Provider) -> ImportDecision {
    if preference == Source::Manual {
        let existing = match target {
            ImportTarget::ExistingWorkout(existing) => existing,
            ImportTarget::NewWorkout => None,
        };
        return ImportDecision::block(preference, existing, DecisionReason::ManualOnly);
    }

    let existing = match target {
        ImportTarget::NewWorkout => {
            return if preference == Source::Auto || preference == import_source {
                ImportDecision::allow(preference, None)
            } else {
                ImportDecision::block(preference, None, DecisionReason::PrefersOtherSource)
            };
        }
        ImportTarget::ExistingWorkout(None) => return ImportDecision::allow(preference, None),
        ImportTarget::ExistingWorkout(Some(existing)) => existing,
    };

    // Re-syncing a provider's own data is never a conflict
    if existing == import_source {
        return ImportDecision::allow(preference, Some(existing));
    }

    if preference == Source::Auto {
        ImportDecision::block(preference, Some(existing), DecisionReason::FirstSourceWins)
    } else if preference == import_source {
        ImportDecision {
            should_proceed: true,
            reason: Some(DecisionReason::PreferenceOverride),
            existing_source: Some(existing),
            user_preference: preference,
        }
    } else {
        ImportDecision::block(
            preference,
            Some(existing),
            DecisionReason::DifferentSourceThanPreferred,
        )
    }
}

/// Run `decide_one` for every candidate with at most `concurrency` in
/// flight, returning the decisions in candidate order.
async fn decide_in_order<F, Fut>(
    candidates: &[Option<String>],
    concurrency: usize,
    decide_one: F,
) -> Vec<ImportDecision>
where
    F: Fn(Option<String>) -> Fut,
    Fut: Future<Output = ImportDecision>,
{
    stream::iter(candidates.iter().cloned())
        .map(decide_one)
        .buffered(concurrency)
        .collect()
        .await
}

/// Activity data pulled from a provider, ready to be written to a workout.
#[derive(Debug, Clone)]
pub struct ProviderImport {
    pub provider: Provider,
    /// Activity ID on the provider side
    pub external_activity_id: String,
    pub actuals: WorkoutActuals,
}

/// Result of [`ImportGate::apply_import`].
#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    /// Actuals written and sync record marked `synced`
    Applied {
        decision: ImportDecision,
        /// Data from another source was replaced
        overwrite: bool,
    },
    /// Admission blocked the import; nothing was written
    Skipped(ImportDecision),
}

/// Entry point for sync jobs: admission checks and admitted writes.
#[derive(Clone)]
pub struct ImportGate {
    db: FirestoreDb,
    plan_concurrency: usize,
}

impl ImportGate {
    pub fn new(db: FirestoreDb, plan_concurrency: usize) -> Self {
        Self {
            db,
            plan_concurrency: plan_concurrency.max(1),
        }
    }

    /// The user's preferred activity source (`auto` when unknown).
    pub async fn user_activity_preference(&self, user_id: &str) -> Source {
        preference::user_activity_preference(&self.db, user_id).await
    }

    /// The source that currently owns a workout's data, if any.
    pub async fn workout_activity_source(&self, workout_id: &str) -> Option<Source> {
        detector::workout_activity_source(&self.db, workout_id).await
    }

    /// Check whether `import_source` may write to a workout.
    ///
    /// Pass `None` as `workout_id` when the import would create a new workout.
    pub async fn should_allow_import(
        &self,
        user_id: &str,
        workout_id: Option<&str>,
        import_source: Provider,
    ) -> ImportDecision {
        let preference = self.user_activity_preference(user_id).await;
        self.decide_with_preference(preference, workout_id, import_source)
            .await
    }

    async fn decide_with_preference(
        &self,
        preference: Source,
        workout_id: Option<&str>,
        import_source: Provider,
    ) -> ImportDecision {
        // Manual-only users never need the workout lookup
        if preference == Source::Manual {
            return decide(preference, ImportTarget::NewWorkout, import_source);
        }

        let target = match workout_id {
            None => ImportTarget::NewWorkout,
            Some(id) => ImportTarget::ExistingWorkout(self.workout_activity_source(id).await),
        };

        decide(preference, target, import_source)
    }

    /// Evaluate admission for many candidate workouts of one user.
    ///
    /// The preference is read once for the whole batch. Decisions are
    /// returned in the same order as `workout_ids`.
    pub async fn plan_imports(
        &self,
        user_id: &str,
        workout_ids: &[Option<String>],
        import_source: Provider,
    ) -> Vec<ImportDecision> {
        let preference = self.user_activity_preference(user_id).await;

        let decide_one = move |workout_id: Option<String>| async move {
            self.decide_with_preference(preference, workout_id.as_deref(), import_source)
                .await
        };
        let decisions = decide_in_order(workout_ids, self.plan_concurrency, decide_one).await;

        let admitted = decisions.iter().filter(|d| d.should_proceed).count();
        tracing::info!(
            user_id,
            import_source = %import_source,
            candidates = workout_ids.len(),
            admitted,
            "Planned provider imports"
        );

        decisions
    }

    /// Admission for a write: like `should_allow_import`, but storage errors
    /// are returned instead of degrading to a permissive verdict.
    async fn strict_decision(
        &self,
        user_id: &str,
        workout_id: &str,
        import_source: Provider,
    ) -> Result<ImportDecision> {
        let preference = preference::load_preference(&self.db, user_id).await?;
        if preference == Source::Manual {
            return Ok(decide(preference, ImportTarget::NewWorkout, import_source));
        }

        let existing = detector::load_and_detect(&self.db, workout_id).await?;
        Ok(decide(
            preference,
            ImportTarget::ExistingWorkout(existing),
            import_source,
        ))
    }

    /// Admit and, if allowed, write an import into an existing workout.
    ///
    /// Fails with `AppError::Database` if the preference or ownership cannot
    /// be read. The workout actuals and the `synced` sync record are committed
    /// together; on an override, other providers' synced records are marked
    /// `superseded` in the same commit. Blocked imports are audited at once,
    /// admitted ones only after the commit succeeds.
    pub async fn apply_import(
        &self,
        user_id: &str,
        workout_id: &str,
        import: &ProviderImport,
    ) -> Result<ImportOutcome> {
        let decision = self
            .strict_decision(user_id, workout_id, import.provider)
            .await?;

        if !decision.should_proceed {
            decision.audit(user_id, Some(workout_id), import.provider);
            return Ok(ImportOutcome::Skipped(decision));
        }

        let mut workout = self
            .db
            .get_workout(workout_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Workout {} not found", workout_id)))?;

        if workout.user_id != user_id {
            return Err(AppError::BadRequest(format!(
                "Workout {} does not belong to user {}",
                workout_id, user_id
            )));
        }

        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        workout.apply_actuals(&import.actuals, &now);

        let record = SyncRecord {
            workout_id: workout_id.to_string(),
            user_id: user_id.to_string(),
            provider: import.provider,
            external_activity_id: import.external_activity_id.clone(),
            sync_status: SyncStatus::Synced,
            synced_at: Some(now),
            last_error: None,
        };

        // An override must also retire the displaced provider's claim
        let superseded: Vec<SyncRecord> = if decision.is_overwrite() {
            self.db
                .get_sync_records_for_workout(workout_id)
                .await?
                .into_iter()
                .filter(|r| r.provider != import.provider && r.is_synced())
                .map(|r| SyncRecord {
                    sync_status: SyncStatus::Superseded,
                    ..r
                })
                .collect()
        } else {
            Vec::new()
        };

        self.db
            .apply_import_atomic(&workout, &record, &superseded)
            .await?;
        decision.audit(user_id, Some(workout_id), import.provider);

        let overwrite = decision.is_overwrite();
        Ok(ImportOutcome::Applied {
            decision,
            overwrite,
        })
    }

    /// Mark a provider's link to a workout as failed.
    ///
    /// A failed record no longer counts as proof of ownership.
    pub async fn record_sync_failure(
        &self,
        user_id: &str,
        workout_id: &str,
        provider: Provider,
        external_activity_id: &str,
        error: &str,
    ) -> Result<()> {
        let existing = self.db.get_sync_record(workout_id, provider).await?;

        let record = SyncRecord {
            workout_id: workout_id.to_string(),
            user_id: user_id.to_string(),
            provider,
            external_activity_id: external_activity_id.to_string(),
            sync_status: SyncStatus::Failed,
            synced_at: existing.and_then(|r| r.synced_at),
            last_error: Some(error.to_string()),
        };

        self.db.set_sync_record(&record).await?;

        tracing::warn!(
            user_id,
            workout_id,
            provider = %provider,
            external_activity_id,
            error,
            "Provider sync marked failed"
        );

        Ok(())
    }
}
